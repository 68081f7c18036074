use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::ui::util::title_case;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest single amount accepted. Keeps every store total far below `Decimal::MAX`.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Why a single expense could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ExpenseError {
    #[error("invalid amount")]
    InvalidAmount,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// One normalized spending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    date: NaiveDate,
    amount: Decimal,
    category: String,
    description: String,
}

/// Flat on-disk shape of an [`Expense`]. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExpenseRecord {
    pub(crate) date: String,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) description: String,
}

impl ExpenseRecord {
    pub(crate) const HEADER: [&'static str; 4] = ["date", "amount", "category", "description"];
}

impl Expense {
    /// Build an expense from raw amount text, as typed by the user or read from disk.
    pub(crate) fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: Option<&str>,
    ) -> Result<Self, ExpenseError> {
        let amount = parse_amount(amount)?;
        Self::new(amount, category, description, date)
    }

    pub(crate) fn new(
        amount: Decimal,
        category: &str,
        description: &str,
        date: Option<&str>,
    ) -> Result<Self, ExpenseError> {
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(ExpenseError::AmountTooLarge);
        }

        let category = normalize_category(category);
        if category.is_empty() {
            return Err(ExpenseError::EmptyCategory);
        }

        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }

        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => today(),
        };

        Ok(Self {
            date,
            amount,
            category,
            description,
        })
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.date
    }

    pub(crate) fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord {
            date: self.date.format(DATE_FORMAT).to_string(),
            amount: self.amount.to_string(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = ExpenseError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        Self::parse(
            &record.amount,
            &record.category,
            &record.description,
            Some(&record.date),
        )
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | ${:.2} | {} | {}",
            self.date.format(DATE_FORMAT),
            self.amount.round_dp(2),
            title_case(&self.category),
            self.description
        )
    }
}

/// Categories compare case- and whitespace-insensitively.
pub(crate) fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse an amount, tolerating a leading `$` and thousands separators.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ExpenseError> {
    let cleaned = raw.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(ExpenseError::InvalidAmount);
    }
    Decimal::from_str(&cleaned).map_err(|_| ExpenseError::InvalidAmount)
}

/// Parse a strict `YYYY-MM-DD` date. chrono alone would accept `2024-1-5`.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ExpenseError> {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok());

    let well_formed = shape.as_ref().map_or(true, |re| re.is_match(raw));
    if !well_formed {
        return Err(ExpenseError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(raw.to_string()))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
