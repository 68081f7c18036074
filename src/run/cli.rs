use anyhow::Result;

use crate::config::FILE_ENV;

/// Handle command-line flags. The menu itself takes no arguments.
pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expense-tracker {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown argument: {other}");
        }
    }
}

fn print_usage() {
    println!("Expense Tracker - record expenses and report on them");
    println!();
    println!("Usage: expense-tracker [--help | --version]");
    println!();
    println!("Run without arguments to open the interactive menu.");
    println!();
    println!("Environment:");
    println!("  {FILE_ENV:<22}  CSV file to store expenses in");
    println!("  {:<22}  Log filter (default: warn)", "RUST_LOG");
}
