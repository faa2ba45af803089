use clap::Parser;
use sales_analytics::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                let reason = match signal {
                    Ok(()) => "Interrupted by user".to_string(),
                    Err(e) => format!("Failed to listen for CTRL+C: {}", e),
                };
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(sales_analytics::Error::processing_interrupted(reason).into())
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sales Analytics - import sales spreadsheets and query them");
    println!("==========================================================");
    println!();
    println!("USAGE:");
    println!("    sales-analytics <COMMAND> --input <PATH|GLOB|-> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Validate and import inputs, reporting record counts");
    println!("    summary     Total revenue, units, orders and average order value");
    println!("    trends      Totals per day, week or month");
    println!("    breakdown   Totals per product, category or region");
    println!("    filters     Distinct products, categories, regions and the date range");
    println!("    records     List matching records, newest first");
    println!();
    println!("EXAMPLES:");
    println!("    sales-analytics summary -i sales.csv --region East");
    println!("    sales-analytics trends -i 'data/*.xlsx' --granularity week");
    println!("    sales-analytics breakdown product --limit 5 -i sales.csv --format json");
    println!("    cat sales.csv | sales-analytics import -i -");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sales-analytics <COMMAND> --help");
}
