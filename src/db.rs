//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Ensure the database schema exists.
///
/// The expenses table is created if it is absent. Existing data is never
/// dropped or rewritten.
///
/// # Errors
/// Returns an error if the table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
