mod config;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    config::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return run::as_cli(&args);
    }

    let path = config::data_path()?;
    tracing::debug!(path = %path.display(), "using expense file");
    let mut tracker = store::ExpenseTracker::open(&path)?;
    run::as_menu(&mut tracker)
}
