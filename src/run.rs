mod cli;
mod menu;
mod prompt;

use anyhow::Result;
use std::io;

use crate::store::ExpenseTracker;

pub(crate) use cli::as_cli;

/// Run the interactive menu on the process's stdin/stdout.
pub(crate) fn as_menu(tracker: &mut ExpenseTracker) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = prompt::Prompter::new(stdin.lock(), stdout.lock());
    menu::run_menu(tracker, &mut prompter)
}
