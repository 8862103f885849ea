//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    classify::predict_endpoint,
    endpoints,
    expense::{create_expense_endpoint, delete_expense_endpoint, get_expenses_page},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::ADD_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, get(delete_expense_endpoint))
        .route(endpoints::PREDICT, post(predict_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
