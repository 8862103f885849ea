//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty date field as None
// instead of rejecting the request like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, CategoryName, Error, endpoints,
    expense::core::{NewExpense, create_expense},
    timezone::current_local_date,
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for storing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub item: String,
    /// How much was spent. Non-numeric input is rejected during form parsing.
    pub amount: f64,
    /// The category for the expense, normalized before storage.
    pub category: String,
    /// The date of the expense. Defaults to today when left empty.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for recording a new expense, redirects to the expenses
/// page on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, Error> {
    let date = match form.date {
        Some(date) => date,
        None => current_local_date(&state.local_timezone)?,
    };

    let new_expense = NewExpense {
        item: form.item.trim().to_owned(),
        amount: form.amount,
        category: CategoryName::new(&form.category),
        date,
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    Ok(Redirect::to(endpoints::ROOT).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::date};

    use crate::{CategoryName, db::initialize, expense::core::get_expense};

    use super::{CreateExpenseState, ExpenseForm, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn records_expense_with_normalized_category_and_trimmed_item() {
        let state = get_test_state();
        let form = ExpenseForm {
            item: "  Flat white ".to_string(),
            amount: 5.5,
            category: "food ".to_string(),
            date: Some(date!(2025 - 07 - 28)),
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_expenses_page(response);

        // We know the first expense will have ID 1
        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.item, "Flat white");
        assert_eq!(expense.amount, 5.5);
        assert_eq!(expense.category, CategoryName::new_unchecked("Food"));
        assert_eq!(expense.date, date!(2025 - 07 - 28));
    }

    #[tokio::test]
    async fn missing_date_defaults_to_today() {
        let state = get_test_state();
        let form = ExpenseForm {
            item: "Flat white".to_string(),
            amount: 5.5,
            category: "Food".to_string(),
            date: None,
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_expenses_page(response);

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.date, OffsetDateTime::now_utc().date());
    }

    #[track_caller]
    fn assert_redirects_to_expenses_page(response: Response<Body>) {
        let location = response
            .headers()
            .get("location")
            .expect("expected response to have the header location");
        assert_eq!(
            location, "/",
            "got redirect to {location:?}, want redirect to /"
        );
    }
}
