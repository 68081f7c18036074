use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

use super::prompt::Prompter;
use crate::models::{parse_amount, parse_date, today, DATE_FORMAT, MAX_AMOUNT};
use crate::store::{totals_by_category_of, ExpenseTracker};
use crate::ui::report::{render_category_summary, render_table};
use crate::ui::theme;
use crate::ui::util::{format_amount, title_case};

const MIN_YEAR: i32 = 2020;

enum Flow {
    Continue,
    Quit,
}

/// Drive the numbered menu until the user exits or input runs out.
pub(crate) fn run_menu<R: BufRead, W: Write>(
    tracker: &mut ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<()> {
    p.say(theme::heading("Expense Tracker"))?;
    let banner = if tracker.is_empty() {
        format!("No expenses yet. Saving to {}", tracker.path().display())
    } else {
        format!(
            "{} expense(s) totalling {} loaded from {}",
            tracker.count(),
            format_amount(tracker.total()),
            tracker.path().display()
        )
    };
    p.say(theme::dim(&banner))?;

    loop {
        print_menu(p)?;
        let Some(choice) = p.line("Choose an option [1-6]: ")? else {
            break;
        };

        let flow = match choice.as_str() {
            "1" => add_expense(tracker, p)?,
            "2" => view_all(tracker, p)?,
            "3" => view_by_category(tracker, p)?,
            "4" => monthly_report(tracker, p)?,
            "5" => category_summary(tracker, p)?,
            "6" => Flow::Quit,
            other => {
                p.complain(&format!(
                    "'{other}' is not a menu option. Enter a number from 1 to 6."
                ))?;
                Flow::Continue
            }
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    p.say(theme::success("Goodbye!"))?;
    Ok(())
}

fn print_menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<()> {
    p.say("")?;
    p.say(theme::heading("Menu"))?;
    p.say("  1. Add expense")?;
    p.say("  2. View all expenses")?;
    p.say("  3. View by category")?;
    p.say("  4. Monthly report")?;
    p.say("  5. Category summary")?;
    p.say("  6. Exit")?;
    Ok(())
}

fn add_expense<R: BufRead, W: Write>(
    tracker: &mut ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<Flow> {
    let Some(amount) = p.parsed_with("Amount: ", None, |raw| {
        let amount =
            parse_amount(raw).map_err(|_| format!("'{raw}' is not a valid amount."))?;
        if amount < Decimal::new(1, 2) {
            return Err("Amount must be at least 0.01.".to_string());
        }
        if amount > MAX_AMOUNT {
            return Err(format!("Amount must be at most {}.", format_amount(MAX_AMOUNT)));
        }
        Ok(amount)
    })?
    else {
        return Ok(Flow::Quit);
    };
    let Some(category) = p.text("Category: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(description) = p.text("Description: ")? else {
        return Ok(Flow::Quit);
    };
    let date_label = "Date (YYYY-MM-DD, blank for today): ";
    let Some(date) = p.parsed_with(date_label, Some(None), |raw| {
        parse_date(raw).map(Some).map_err(|e| e.to_string())
    })?
    else {
        return Ok(Flow::Quit);
    };

    let amount = amount.to_string();
    let added = match date {
        Some(d) => {
            let date = d.format(DATE_FORMAT).to_string();
            tracker.add_dated(&amount, &category, &description, Some(&date))
        }
        None => tracker.add(&amount, &category, &description),
    };
    match added {
        Ok(expense) => {
            let line = format!("Added: {expense}");
            p.say(theme::success(&line))?;
        }
        Err(e) => {
            tracing::warn!("rejected expense: {e}");
            p.complain(&format!("Could not add expense: {e}"))?;
        }
    }
    Ok(Flow::Continue)
}

fn view_all<R: BufRead, W: Write>(
    tracker: &ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<Flow> {
    p.say(render_table(tracker.all(), "All Expenses"))?;
    Ok(Flow::Continue)
}

fn view_by_category<R: BufRead, W: Write>(
    tracker: &ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<Flow> {
    let Some(category) = p.text("Category: ")? else {
        return Ok(Flow::Quit);
    };
    let matches = tracker.by_category(&category);
    let title = format!("Category: {}", title_case(category.trim()));
    p.say(render_table(matches, &title))?;
    Ok(Flow::Continue)
}

fn monthly_report<R: BufRead, W: Write>(
    tracker: &ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<Flow> {
    let now = today();
    let year_label = format!("Year [{}]: ", now.year());
    let Some(year) = p.parsed::<i32, _>(&year_label, Some(now.year()), |y| {
        if *y < MIN_YEAR {
            Err(format!("Year must be {MIN_YEAR} or later."))
        } else {
            Ok(())
        }
    })?
    else {
        return Ok(Flow::Quit);
    };
    let month_label = format!("Month [{}]: ", now.month());
    let Some(month) = p.parsed::<u32, _>(&month_label, Some(now.month()), |m| {
        if (1..=12).contains(m) {
            Ok(())
        } else {
            Err("Month must be between 1 and 12.".to_string())
        }
    })?
    else {
        return Ok(Flow::Quit);
    };

    let expenses = tracker.for_month(Some(year), Some(month));
    let title = format!("Expenses for {year}-{month:02}");
    p.say(render_table(expenses.iter().copied(), &title))?;
    if !expenses.is_empty() {
        let totals = totals_by_category_of(expenses.iter().copied());
        p.say(render_category_summary(&totals))?;
    }
    Ok(Flow::Continue)
}

fn category_summary<R: BufRead, W: Write>(
    tracker: &ExpenseTracker,
    p: &mut Prompter<R, W>,
) -> Result<Flow> {
    p.say(render_category_summary(&tracker.totals_by_category()))?;
    Ok(Flow::Continue)
}
