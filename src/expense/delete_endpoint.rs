//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, expense::core::ExpenseId};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the expenses page.
///
/// Deleting an ID that is not in the database is a no-op, not an error, so
/// following a stale delete link twice behaves the same as following it once.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows_affected = delete_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not delete expense {expense_id}: {error}"))?;

    if rows_affected == 0 {
        tracing::debug!("tried to delete expense {expense_id}, which does not exist");
    }

    Ok(Redirect::to(endpoints::ROOT).into_response())
}

type RowsAffected = usize;

fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}
