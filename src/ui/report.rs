use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::models::{Expense, DATE_FORMAT};
use crate::ui::util::{format_amount, format_percent, title_case, truncate};

const DATE_W: usize = 10;
const AMOUNT_W: usize = 12;
const CATEGORY_W: usize = 16;
const DESCRIPTION_W: usize = 30;
const SHARE_W: usize = 7;

/// One category's slice of the grand total.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// 0–100, unrounded.
    pub(crate) percent: Decimal,
}

/// Per-category shares in alphabetical order. All shares are 0 when the grand total is 0.
pub(crate) fn category_shares(totals: &BTreeMap<String, Decimal>) -> Vec<CategoryShare> {
    let grand_total: Decimal = totals.values().copied().sum();
    totals
        .iter()
        .map(|(category, &amount)| CategoryShare {
            category: category.clone(),
            amount,
            percent: if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                amount / grand_total * Decimal::ONE_HUNDRED
            },
        })
        .collect()
}

/// Fixed-width expense table with a total footer.
pub(crate) fn render_table<'a, I>(expenses: I, title: &str) -> String
where
    I: IntoIterator<Item = &'a Expense>,
{
    let expenses: Vec<&Expense> = expenses.into_iter().collect();
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");

    if expenses.is_empty() {
        out.push_str("No expenses found.\n");
        return out;
    }

    let width = DATE_W + AMOUNT_W + CATEGORY_W + DESCRIPTION_W + 6;
    let rule = "─".repeat(width);

    let _ = writeln!(
        out,
        "{:<DATE_W$}  {:>AMOUNT_W$}  {:<CATEGORY_W$}  Description",
        "Date", "Amount", "Category"
    );
    let _ = writeln!(out, "{rule}");
    for e in &expenses {
        let _ = writeln!(
            out,
            "{:<DATE_W$}  {:>AMOUNT_W$}  {:<CATEGORY_W$}  {}",
            e.date().format(DATE_FORMAT).to_string(),
            format_amount(e.amount()),
            truncate(&title_case(e.category()), CATEGORY_W),
            truncate(e.description(), DESCRIPTION_W),
        );
    }
    let _ = writeln!(out, "{rule}");

    let total: Decimal = expenses.iter().map(|e| e.amount()).sum();
    let _ = writeln!(
        out,
        "{:<DATE_W$}  {:>AMOUNT_W$}  ({} {})",
        "Total",
        format_amount(total),
        expenses.len(),
        if expenses.len() == 1 { "expense" } else { "expenses" },
    );
    out
}

/// Amount and percentage per category, alphabetically, with a total footer.
pub(crate) fn render_category_summary(totals: &BTreeMap<String, Decimal>) -> String {
    let mut out = String::new();
    out.push_str("== Category Summary ==\n");

    if totals.is_empty() {
        out.push_str("No expenses recorded.\n");
        return out;
    }

    let shares = category_shares(totals);
    let grand_total: Decimal = shares.iter().map(|s| s.amount).sum();
    let rule = "─".repeat(CATEGORY_W + AMOUNT_W + SHARE_W + 4);

    let _ = writeln!(
        out,
        "{:<CATEGORY_W$}  {:>AMOUNT_W$}  {:>SHARE_W$}",
        "Category", "Amount", "Share"
    );
    let _ = writeln!(out, "{rule}");
    for share in &shares {
        let _ = writeln!(
            out,
            "{:<CATEGORY_W$}  {:>AMOUNT_W$}  {:>SHARE_W$}",
            truncate(&title_case(&share.category), CATEGORY_W),
            format_amount(share.amount),
            format_percent(share.percent),
        );
    }
    let _ = writeln!(out, "{rule}");

    let total_share = if grand_total.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED
    };
    let _ = writeln!(
        out,
        "{:<CATEGORY_W$}  {:>AMOUNT_W$}  {:>SHARE_W$}",
        "Total",
        format_amount(grand_total),
        format_percent(total_share),
    );
    out
}
