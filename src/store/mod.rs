use anyhow::{Context, Result};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{normalize_category, today, Expense, ExpenseError, ExpenseRecord};

/// The session's expenses, kept in insertion order and mirrored to a CSV file.
pub(crate) struct ExpenseTracker {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl ExpenseTracker {
    /// Open the store at `path`, creating its directory and loading any saved rows.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        let mut tracker = Self {
            path: path.to_path_buf(),
            expenses: Vec::new(),
        };
        tracker.reload()?;
        Ok(tracker)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    // ── Mutation ──────────────────────────────────────────────

    /// Record an expense dated today.
    pub(crate) fn add(
        &mut self,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<&Expense, ExpenseError> {
        self.add_dated(amount, category, description, None)
    }

    /// Record an expense, defaulting a missing or blank date to today.
    ///
    /// The new row is written to disk before returning. A write failure is
    /// logged and the in-memory store stays authoritative for the session.
    pub(crate) fn add_dated(
        &mut self,
        amount: &str,
        category: &str,
        description: &str,
        date: Option<&str>,
    ) -> Result<&Expense, ExpenseError> {
        let expense = Expense::parse(amount, category, description, date)?;
        self.expenses.push(expense);

        if let Err(e) = self.persist() {
            tracing::error!(path = %self.path.display(), "failed to save expenses: {e:#}");
        }

        let index = self.expenses.len() - 1;
        Ok(&self.expenses[index])
    }

    // ── Persistence ───────────────────────────────────────────

    /// Rewrite the whole file from the in-memory store.
    pub(crate) fn persist(&self) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;

        wtr.write_record(ExpenseRecord::HEADER)
            .context("Failed to write CSV header")?;
        for expense in &self.expenses {
            wtr.serialize(expense.to_record())
                .context("Failed to write CSV record")?;
        }
        wtr.flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;

        tracing::debug!(count = self.expenses.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }

    /// Replace the in-memory store with the file contents.
    ///
    /// A missing file is an empty store. Any malformed row aborts the load and
    /// leaves the current store untouched.
    pub(crate) fn reload(&mut self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no expense file yet");
            self.expenses.clear();
            return Ok(());
        }

        let mut rdr = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut loaded = Vec::new();
        for (i, result) in rdr.deserialize::<ExpenseRecord>().enumerate() {
            // Row 1 is the header.
            let row = i + 2;
            let record = result.with_context(|| format!("Row {row}: failed to read CSV record"))?;
            let expense = Expense::try_from(record)
                .with_context(|| format!("Row {row}: invalid expense"))?;
            loaded.push(expense);
        }

        tracing::debug!(count = loaded.len(), path = %self.path.display(), "loaded expenses");
        self.expenses = loaded;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn count(&self) -> usize {
        self.expenses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub(crate) fn by_category(&self, category: &str) -> Vec<&Expense> {
        let wanted = normalize_category(category);
        self.expenses
            .iter()
            .filter(|e| e.category() == wanted)
            .collect()
    }

    /// Expenses dated in the given month. `None` means the current year/month.
    pub(crate) fn for_month(&self, year: Option<i32>, month: Option<u32>) -> Vec<&Expense> {
        let now = today();
        let year = year.unwrap_or_else(|| now.year());
        let month = month.unwrap_or_else(|| now.month());
        self.expenses
            .iter()
            .filter(|e| e.date().year() == year && e.date().month() == month)
            .collect()
    }

    pub(crate) fn total(&self) -> Decimal {
        total_of(&self.expenses)
    }

    pub(crate) fn totals_by_category(&self) -> BTreeMap<String, Decimal> {
        totals_by_category_of(&self.expenses)
    }
}

// ── Aggregation ───────────────────────────────────────────────

pub(crate) fn total_of<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(Expense::amount).sum()
}

pub(crate) fn totals_by_category_of<'a, I>(expenses: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.category().to_string())
            .or_insert(Decimal::ZERO) += expense.amount();
    }
    totals
}

#[cfg(test)]
mod tests;
