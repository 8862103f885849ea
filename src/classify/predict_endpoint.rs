//! Defines the JSON endpoint that suggests a category for a new item.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, category::candidate_categories};

use super::{SharedClassifier, Suggestion, suggest_category};

/// The state needed to suggest a category.
#[derive(Debug, Clone)]
pub struct PredictState {
    /// The database connection for reading stored categories.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The classifier loaded at startup, if any.
    pub classifier: Option<SharedClassifier>,
}

impl FromRef<AppState> for PredictState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            classifier: state.classifier.clone(),
        }
    }
}

/// The request body for a suggestion.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// The item text to classify.
    pub item: String,
}

/// The response body for a suggestion.
///
/// `category` is null when there is no usable suggestion; `confidence` is
/// present only alongside a category.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// The suggested category, if any.
    pub category: Option<String>,
    /// The classifier's confidence in the suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictResponse {
    fn no_suggestion() -> Self {
        Self {
            category: None,
            confidence: None,
        }
    }
}

/// A route handler that suggests a category for the item in the request.
///
/// Classifier problems (not configured, unreachable, unconfident) never
/// produce an error status; they all yield `{"category": null}`.
pub async fn predict_endpoint(
    State(state): State<PredictState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, Error> {
    let Some(classifier) = state.classifier else {
        return Ok(Json(PredictResponse::no_suggestion()));
    };

    // The lock must be released before awaiting the classifier.
    let candidate_labels: Vec<String> = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        candidate_categories(&connection)
            .inspect_err(|error| tracing::error!("could not get candidate categories: {error}"))?
            .into_iter()
            .map(|category| category.to_string())
            .collect()
    };

    let response =
        match suggest_category(classifier.as_ref(), &request.item, &candidate_labels).await {
            Suggestion::Accepted {
                category,
                confidence,
            } => PredictResponse {
                category: Some(category),
                confidence: Some(confidence),
            },
            Suggestion::NoSuggestion => PredictResponse::no_suggestion(),
        };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{
        classify::{LabelScore, MockClassifier, SharedClassifier},
        db::initialize,
    };

    use super::{PredictRequest, PredictResponse, PredictState, predict_endpoint};

    fn get_test_state(classifier: Option<SharedClassifier>) -> PredictState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        PredictState {
            db_connection: Arc::new(Mutex::new(conn)),
            classifier,
        }
    }

    async fn predict(state: PredictState, item: &str) -> PredictResponse {
        let Json(response) = predict_endpoint(
            State(state),
            Json(PredictRequest {
                item: item.to_string(),
            }),
        )
        .await
        .expect("predict endpoint should not fail");

        response
    }

    #[tokio::test]
    async fn suggests_category_from_confident_classifier() {
        let mock = Arc::new(MockClassifier::returning(vec![
            LabelScore {
                label: "Food".to_string(),
                score: 0.87,
            },
            LabelScore {
                label: "Transport".to_string(),
                score: 0.06,
            },
        ]));
        let state = get_test_state(Some(mock.clone()));

        let response = predict(state, "flat white").await;

        assert_eq!(
            response,
            PredictResponse {
                category: Some("Food".to_string()),
                confidence: Some(0.87)
            }
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn short_item_skips_the_classifier() {
        let mock = Arc::new(MockClassifier::returning(vec![LabelScore {
            label: "Food".to_string(),
            score: 0.87,
        }]));
        let state = get_test_state(Some(mock.clone()));

        let response = predict(state, "ab").await;

        assert_eq!(response.category, None);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn unconfident_classifier_yields_null_category() {
        let mock = Arc::new(MockClassifier::returning(vec![LabelScore {
            label: "Food".to_string(),
            score: 0.12,
        }]));
        let state = get_test_state(Some(mock.clone()));

        let response = predict(state, "mystery purchase").await;

        assert_eq!(response.category, None);
        assert_eq!(response.confidence, None);
    }

    #[tokio::test]
    async fn failing_classifier_yields_null_category() {
        let state = get_test_state(Some(Arc::new(MockClassifier::failing())));

        let response = predict(state, "flat white").await;

        assert_eq!(response.category, None);
    }

    #[tokio::test]
    async fn missing_classifier_yields_null_category() {
        let state = get_test_state(None);

        let response = predict(state, "flat white").await;

        assert_eq!(response.category, None);
    }
}
