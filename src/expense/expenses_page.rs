//! Defines the route handler for the page that lists expenses.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, CategoryName, Error, category::candidate_categories, timezone::current_local_date,
};

use super::{
    query::{SortMode, get_expenses, total_amount},
    view::expenses_view,
};

/// The query param value meaning "do not filter by category".
///
/// The sentinel is matched before normalization, so a stored category can
/// never collide with it.
pub(crate) const ALL_CATEGORIES: &str = "All";

/// The filter and sort query params for the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// Category to restrict the listing to; "All" (or absent) lists every category.
    pub category: Option<String>,
    /// One of "high", "low", or "newest". Unrecognized values fall back to "newest".
    pub sort: Option<String>,
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expenses listing with its total, the filter and sort controls,
/// and the add-expense form.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let sort = query
        .sort
        .as_deref()
        .map(SortMode::from_query_value)
        .unwrap_or(SortMode::Newest);

    // Stored categories are always normalized, so normalizing the filter
    // makes `?category=food` match rows stored as "Food".
    let filter = query
        .category
        .as_deref()
        .filter(|category| *category != ALL_CATEGORIES)
        .map(CategoryName::new);

    let today = current_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_expenses(filter.as_ref(), sort, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let total = total_amount(&expenses);
    let categories = candidate_categories(&connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    Ok(expenses_view(&expenses, total, &categories, filter.as_ref(), sort, today).into_response())
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        CategoryName,
        db::initialize,
        expense::core::{NewExpense, create_expense},
    };

    use super::{ExpensesPageState, ExpensesQuery, get_expenses_page};

    fn get_test_state() -> ExpensesPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ExpensesPageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn insert(item: &str, amount: f64, category: &str, state: &ExpensesPageState) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            NewExpense {
                item: item.to_owned(),
                amount,
                category: CategoryName::new(category),
                date: date!(2025 - 07 - 28),
            },
            &connection,
        )
        .expect("Could not create expense");
    }

    async fn render(state: ExpensesPageState, query: ExpensesQuery) -> Html {
        let response: Response = get_expenses_page(State(state), Query(query))
            .await
            .expect("Could not render expenses page");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    fn cell_texts(document: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn lists_expenses_with_total() {
        let state = get_test_state();
        insert("Flat white", 5.5, "Food", &state);
        insert("Bus fare", 3.0, "Transport", &state);

        let document = render(state, ExpensesQuery::default()).await;

        let items = cell_texts(&document, "tbody tr td:first-child");
        assert_eq!(items, vec!["Flat white", "Bus fare"]);

        let total = cell_texts(&document, "tfoot td#expenses-total");
        assert_eq!(total, vec!["$8.50"]);
    }

    #[tokio::test]
    async fn filters_by_category() {
        let state = get_test_state();
        insert("Flat white", 5.5, "Food", &state);
        insert("Bus fare", 3.0, "Transport", &state);

        let document = render(
            state,
            ExpensesQuery {
                category: Some("Food".to_owned()),
                sort: None,
            },
        )
        .await;

        let items = cell_texts(&document, "tbody tr td:first-child");
        assert_eq!(items, vec!["Flat white"]);

        let total = cell_texts(&document, "tfoot td#expenses-total");
        assert_eq!(total, vec!["$5.50"]);
    }

    #[tokio::test]
    async fn sorts_by_amount_when_requested() {
        let state = get_test_state();
        insert("Cheap", 1.0, "Food", &state);
        insert("Expensive", 100.0, "Food", &state);

        let document = render(
            state,
            ExpensesQuery {
                category: None,
                sort: Some("high".to_owned()),
            },
        )
        .await;

        let items = cell_texts(&document, "tbody tr td:first-child");
        assert_eq!(items, vec!["Expensive", "Cheap"]);
    }

    #[tokio::test]
    async fn filter_drop_down_merges_stored_categories_with_defaults() {
        let state = get_test_state();
        insert("Novel", 25.0, "Books", &state);

        let document = render(state, ExpensesQuery::default()).await;

        let options = cell_texts(&document, "select#category-filter option");
        assert_eq!(options.first().map(String::as_str), Some("All"));
        assert!(options.contains(&"Books".to_owned()));
        assert!(options.contains(&"Food".to_owned()));
    }

    #[tokio::test]
    async fn empty_database_renders_empty_state() {
        let state = get_test_state();

        let document = render(state, ExpensesQuery::default()).await;

        let rows = cell_texts(&document, "tbody tr td");
        assert_eq!(rows, vec!["No expenses recorded yet."]);
    }
}
