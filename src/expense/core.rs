//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{CategoryName, Error};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub item: String,
    /// How much was spent.
    pub amount: f64,
    /// The category the expense belongs to, stored post-normalization.
    pub category: CategoryName,
    /// When the expense happened.
    pub date: Date,
}

/// The fields needed to record a new expense.
///
/// The caller is responsible for trimming `item` and normalizing `category`
/// (via [CategoryName::new]) before storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on.
    pub item: String,
    /// How much was spent.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: CategoryName,
    /// When the expense happened.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (item, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, item, amount, category, date",
        )?
        .query_row(
            (
                &new_expense.item,
                new_expense.amount,
                new_expense.category.as_ref(),
                new_expense.date,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a stored expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, item, amount, category, date FROM expenses WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Create the expenses table in the database.
///
/// The table is created only if it is absent; existing data is never dropped
/// or rewritten. IDs are `AUTOINCREMENT` so that the ID of a deleted expense
/// is never reused.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1. sqlite_sequence has no unique
    // constraint on name, so the seed row must not be inserted twice.
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
         SELECT 'expenses', 0
         WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'expenses')",
        (),
    )?;

    // Index used by the category filter and the distinct-category query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let item = row.get(1)?;
    let amount = row.get(2)?;
    let raw_category: String = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        item,
        amount,
        category: CategoryName::new_unchecked(&raw_category),
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{CategoryName, Error, db::initialize};

    use super::{NewExpense, create_expense, get_expense};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_expense(item: &str, amount: f64) -> NewExpense {
        NewExpense {
            item: item.to_owned(),
            amount,
            category: CategoryName::new("food"),
            date: date!(2025 - 07 - 28),
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_expense(new_expense("Flat white", 5.5), &conn);

        match result {
            Ok(expense) => {
                assert_eq!(expense.id, 1);
                assert_eq!(expense.item, "Flat white");
                assert_eq!(expense.amount, 5.5);
                assert_eq!(expense.category, CategoryName::new_unchecked("Food"));
                assert_eq!(expense.date, date!(2025 - 07 - 28));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn get_round_trips() {
        let conn = get_test_connection();
        let created =
            create_expense(new_expense("Groceries", 87.2), &conn).expect("Could not create");

        let got = get_expense(created.id, &conn).expect("Could not get expense");

        assert_eq!(got, created);
    }

    #[test]
    fn get_with_invalid_id_returns_not_found() {
        let conn = get_test_connection();

        let got = get_expense(999, &conn);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let conn = get_test_connection();
        create_expense(new_expense("First", 1.0), &conn).unwrap();
        let second = create_expense(new_expense("Second", 2.0), &conn).unwrap();
        conn.execute("DELETE FROM expenses WHERE id = ?1", [second.id])
            .expect("Could not delete expense");

        let third = create_expense(new_expense("Third", 3.0), &conn).unwrap();

        assert_eq!(third.id, second.id + 1);
    }
}
