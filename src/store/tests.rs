#![allow(clippy::unwrap_used)]

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn open_temp() -> (tempfile::TempDir, ExpenseTracker) {
    let dir = tempfile::tempdir().unwrap();
    let tracker = ExpenseTracker::open(&dir.path().join("expenses.csv")).unwrap();
    (dir, tracker)
}

fn seed(tracker: &mut ExpenseTracker) {
    tracker
        .add_dated("12.50", "Food", "lunch", Some("2024-01-15"))
        .unwrap();
    tracker
        .add_dated("40", "transport", "train ticket", Some("2024-02-01"))
        .unwrap();
    tracker
        .add_dated("7.25", " FOOD ", "groceries", Some("2024-01-31"))
        .unwrap();
}

// ── Open / reload ─────────────────────────────────────────────

#[test]
fn test_open_missing_file_is_empty() {
    let (_dir, tracker) = open_temp();
    assert!(tracker.is_empty());
    assert_eq!(tracker.count(), 0);
    assert!(!tracker.path().exists());
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("expenses.csv");
    let tracker = ExpenseTracker::open(&nested).unwrap();
    assert!(tracker.is_empty());
    assert!(nested.parent().unwrap().is_dir());

    // Existing directory is fine too.
    ExpenseTracker::open(&nested).unwrap();
}

#[test]
fn test_persist_then_reopen_roundtrip() {
    let (dir, mut tracker) = open_temp();
    seed(&mut tracker);

    let reopened = ExpenseTracker::open(&dir.path().join("expenses.csv")).unwrap();
    assert_eq!(reopened.count(), 3);
    assert_eq!(reopened.all(), tracker.all());
}

#[test]
fn test_file_layout() {
    let (_dir, mut tracker) = open_temp();
    tracker
        .add_dated("12.50", "Food", "lunch, with friends", Some("2024-01-15"))
        .unwrap();

    let content = std::fs::read_to_string(tracker.path()).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("date,amount,category,description"));
    assert_eq!(
        lines.next(),
        Some("2024-01-15,12.50,food,\"lunch, with friends\"")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_persist_empty_store_writes_header_only() {
    let (_dir, tracker) = open_temp();
    tracker.persist().unwrap();
    let content = std::fs::read_to_string(tracker.path()).unwrap();
    assert_eq!(content.trim_end(), "date,amount,category,description");
}

#[test]
fn test_reload_rejects_malformed_amount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(
        &path,
        "date,amount,category,description\n2024-01-01,5,food,ok\n2024-01-02,lots,food,bad\n",
    )
    .unwrap();

    let err = ExpenseTracker::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("Row 3"), "{err:#}");
}

#[test]
fn test_reload_rejects_malformed_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(
        &path,
        "date,amount,category,description\n15/01/2024,5,food,lunch\n",
    )
    .unwrap();

    let err = ExpenseTracker::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("invalid date"), "{err:#}");
}

#[test]
fn test_reload_rejects_short_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(&path, "date,amount,category,description\n2024-01-01,5,food\n").unwrap();
    assert!(ExpenseTracker::open(&path).is_err());
}

#[test]
fn test_failed_reload_keeps_current_store() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);
    std::fs::write(
        tracker.path(),
        "date,amount,category,description\nbroken,row,,\n",
    )
    .unwrap();

    assert!(tracker.reload().is_err());
    assert_eq!(tracker.count(), 3);
}

#[test]
fn test_reload_normalizes_hand_edited_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(
        &path,
        "date,amount,category,description\n2024-03-03,2.00, Coffee ,  espresso \n",
    )
    .unwrap();

    let tracker = ExpenseTracker::open(&path).unwrap();
    let e = &tracker.all()[0];
    assert_eq!(e.category(), "coffee");
    assert_eq!(e.description(), "espresso");
}

// ── Add ───────────────────────────────────────────────────────

#[test]
fn test_add_stores_normalized_fields() {
    let (_dir, mut tracker) = open_temp();
    let added = tracker.add("8", "  Books ", " novel ").unwrap().clone();

    assert_eq!(added.amount(), dec!(8));
    assert_eq!(added.category(), "books");
    assert_eq!(added.description(), "novel");
    assert_eq!(added.date(), crate::models::today());
    assert_eq!(tracker.all(), &[added]);
}

#[test]
fn test_add_invalid_amount_leaves_store_unchanged() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);
    let before = std::fs::read_to_string(tracker.path()).unwrap();

    let err = tracker.add("abc", "food", "lunch").unwrap_err();
    assert_eq!(err.to_string(), "invalid amount");
    assert_eq!(tracker.count(), 3);
    assert_eq!(std::fs::read_to_string(tracker.path()).unwrap(), before);
}

#[test]
fn test_add_other_failures_report_detail() {
    let (_dir, mut tracker) = open_temp();
    let err = tracker.add("0", "food", "free lunch").unwrap_err();
    assert_eq!(err, ExpenseError::NonPositiveAmount);
    let err = tracker.add("5", "", "lunch").unwrap_err();
    assert_eq!(err, ExpenseError::EmptyCategory);
    assert!(tracker.is_empty());
}

#[test]
fn test_add_allows_duplicates() {
    let (_dir, mut tracker) = open_temp();
    tracker.add_dated("5", "food", "snack", Some("2024-01-01")).unwrap();
    tracker.add_dated("5", "food", "snack", Some("2024-01-01")).unwrap();
    assert_eq!(tracker.count(), 2);
    assert_eq!(tracker.all()[0], tracker.all()[1]);
}

#[test]
fn test_add_keeps_memory_when_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let mut tracker = ExpenseTracker::open(&path).unwrap();
    // A directory where the file should be makes every write fail.
    std::fs::create_dir(&path).unwrap();

    assert!(tracker.persist().is_err());
    tracker.add("5", "food", "snack").unwrap();
    assert_eq!(tracker.count(), 1);
}

// ── Queries ───────────────────────────────────────────────────

#[test]
fn test_by_category_is_case_and_whitespace_insensitive() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);

    let upper = tracker.by_category("Food");
    let lower = tracker.by_category("  food ");
    assert_eq!(upper, lower);
    let descriptions: Vec<&str> = upper.iter().map(|e| e.description()).collect();
    assert_eq!(descriptions, ["lunch", "groceries"]);
    assert!(tracker.by_category("rent").is_empty());
}

#[test]
fn test_for_month_filters_in_insertion_order() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);

    let january = tracker.for_month(Some(2024), Some(1));
    let dates: Vec<NaiveDate> = january.iter().map(|e| e.date()).collect();
    assert_eq!(
        dates,
        [
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        ]
    );
    assert_eq!(tracker.for_month(Some(2024), Some(2)).len(), 1);
    assert!(tracker.for_month(Some(2023), Some(1)).is_empty());
}

#[test]
fn test_for_month_defaults_to_current_month() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);
    let added = tracker.add("3", "coffee", "today's coffee").unwrap().date();

    let in_added_month = tracker.for_month(Some(added.year()), Some(added.month()));
    assert!(in_added_month
        .iter()
        .any(|e| e.description() == "today's coffee"));

    let before = crate::models::today();
    let defaulted = tracker.for_month(None, None);
    let year_only = tracker.for_month(Some(before.year()), None);
    // Skip the comparison if the clock crossed midnight mid-test.
    if crate::models::today() == before {
        let explicit = tracker.for_month(Some(before.year()), Some(before.month()));
        assert_eq!(defaulted, explicit);
        assert_eq!(year_only, explicit);
    }
}

#[test]
fn test_total_and_totals_by_category() {
    let (_dir, mut tracker) = open_temp();
    assert_eq!(tracker.total(), Decimal::ZERO);
    assert!(tracker.totals_by_category().is_empty());

    seed(&mut tracker);
    assert_eq!(tracker.total(), dec!(59.75));

    let totals = tracker.totals_by_category();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["food"], dec!(19.75));
    assert_eq!(totals["transport"], dec!(40));
    assert_eq!(totals.values().copied().sum::<Decimal>(), tracker.total());
}

#[test]
fn test_aggregation_over_subset() {
    let (_dir, mut tracker) = open_temp();
    seed(&mut tracker);

    let january = tracker.for_month(Some(2024), Some(1));
    assert_eq!(total_of(january.iter().copied()), dec!(19.75));
    let totals = totals_by_category_of(january.iter().copied());
    assert_eq!(totals.len(), 1);
    assert_eq!(totals["food"], dec!(19.75));
}

// ── Amount limits ─────────────────────────────────────────────

#[test]
fn test_add_rejects_amount_beyond_limit() {
    let (_dir, mut tracker) = open_temp();
    for _ in 0..2 {
        let err = tracker.add("50000000000000000000000000000", "rent", "castle").unwrap_err();
        assert_eq!(err, ExpenseError::AmountTooLarge);
    }
    assert!(tracker.is_empty());
    assert_eq!(tracker.total(), Decimal::ZERO);
}

#[test]
fn test_totals_of_many_maximum_amounts() {
    let (dir, mut tracker) = open_temp();
    let max = crate::models::MAX_AMOUNT.to_string();
    for _ in 0..50 {
        tracker.add_dated(&max, "rent", "tower", Some("2024-01-01")).unwrap();
    }

    let reopened = ExpenseTracker::open(&dir.path().join("expenses.csv")).unwrap();
    let expected = crate::models::MAX_AMOUNT * Decimal::from(50);
    assert_eq!(reopened.total(), expected);
    assert_eq!(reopened.totals_by_category()["rent"], expected);
}

#[test]
fn test_reload_rejects_oversized_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(
        &path,
        "date,amount,category,description\n\
         2024-01-01,50000000000000000000000000000,rent,a\n\
         2024-01-02,50000000000000000000000000000,rent,b\n",
    )
    .unwrap();

    let err = ExpenseTracker::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("Row 2"), "{err:#}");
}
