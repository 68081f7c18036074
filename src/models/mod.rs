mod expense;

pub(crate) use expense::{
    normalize_category, parse_amount, parse_date, today, Expense, ExpenseError, ExpenseRecord,
    DATE_FORMAT, MAX_AMOUNT,
};
