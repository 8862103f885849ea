//! Database query helpers for the expenses page.

use rusqlite::Connection;

use crate::{CategoryName, Error};

use super::core::{Expense, map_expense_row};

/// The order to return expenses in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortMode {
    /// Largest amounts first.
    HighestAmount,
    /// Smallest amounts first.
    LowestAmount,
    /// Most recent dates first.
    Newest,
}

impl SortMode {
    /// Parse a `sort` query param value.
    ///
    /// Unrecognized values fall back to [SortMode::Newest].
    pub(crate) fn from_query_value(value: &str) -> Self {
        match value {
            "high" => Self::HighestAmount,
            "low" => Self::LowestAmount,
            _ => Self::Newest,
        }
    }

    /// The value used for this mode in the page's sort drop-down.
    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            Self::HighestAmount => "high",
            Self::LowestAmount => "low",
            Self::Newest => "newest",
        }
    }

    // Ties are broken by ID to keep the row order stable across reloads.
    fn order_clause(self) -> &'static str {
        match self {
            Self::HighestAmount => "ORDER BY amount DESC, id ASC",
            Self::LowestAmount => "ORDER BY amount ASC, id ASC",
            Self::Newest => "ORDER BY date DESC, id ASC",
        }
    }
}

/// Get expenses, optionally restricted to one category, ordered per `sort`.
///
/// The filter value is always passed as a bound parameter, never spliced
/// into the query text.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn get_expenses(
    category_filter: Option<&CategoryName>,
    sort: SortMode,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let where_clause = match category_filter {
        Some(_) => "WHERE category = ?1 ",
        None => "",
    };
    let query = format!(
        "SELECT id, item, amount, category, date FROM expenses {}{}",
        where_clause,
        sort.order_clause()
    );

    let mut statement = connection.prepare(&query)?;

    let rows = match category_filter {
        Some(category) => statement.query_map([category.as_ref()], map_expense_row)?,
        None => statement.query_map([], map_expense_row)?,
    };

    rows.map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// The sum of the amounts of `expenses`.
pub(crate) fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}
