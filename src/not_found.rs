//! The 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// A fallback route handler that renders the 404 page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a response containing the rendered 404 page.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Page not found.",
            "Check the URL or head back to the expenses page.",
        ),
    )
        .into_response()
}
