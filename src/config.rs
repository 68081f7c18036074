use anyhow::Result;
use std::path::PathBuf;

/// Environment variable that overrides where expenses are stored.
pub(crate) const FILE_ENV: &str = "EXPENSE_TRACKER_FILE";

const FILE_NAME: &str = "expenses.csv";

/// Where the expense file lives: `$EXPENSE_TRACKER_FILE`, else the platform data dir.
pub(crate) fn data_path() -> Result<PathBuf> {
    resolve_data_path(std::env::var(FILE_ENV).ok())
}

pub(crate) fn resolve_data_path(override_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = override_path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(shellexpand(path)));
    }

    let proj_dirs = directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join(FILE_NAME))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `warn` level.
pub(crate) fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
