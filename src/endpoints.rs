//! The application's route URIs.
//!
//! For endpoints that take a parameter, e.g., '/delete/{expense_id}', use [format_endpoint].

/// The page listing expenses with the add form and filter/sort controls.
pub const ROOT: &str = "/";
/// The route for recording an expense from the add form.
pub const ADD_EXPENSE: &str = "/add";
/// The route for deleting an expense.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";
/// The route for suggesting a category for a new item.
pub const PREDICT: &str = "/predict";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace and ends with a
/// right brace, e.g. '{expense_id}' in '/delete/{expense_id}'. This function
/// assumes that an endpoint path contains at most one parameter. If no
/// parameter is found, the original `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
