//! Category suggestion via zero-shot text classification.
//!
//! The classifier is an external collaborator: given free text and a set of
//! candidate labels, it returns the labels ranked by confidence. It is
//! treated as opaque, possibly slow, and possibly unavailable, so every
//! failure is recovered to "no suggestion" rather than surfaced to the
//! client.

mod http;
#[cfg(test)]
mod mock;
mod predict_endpoint;

pub use http::HttpClassifier;
pub use predict_endpoint::{PredictRequest, PredictResponse, predict_endpoint};

#[cfg(test)]
pub(crate) use mock::MockClassifier;

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

/// The minimum number of characters (after trimming) an item needs before a
/// classification is attempted.
pub const MIN_ITEM_CHARS: usize = 3;

/// A suggestion is reported only when the top label's confidence is strictly
/// above this threshold.
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;

/// A candidate label and the classifier's confidence in it, in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// The candidate label.
    pub label: String,
    /// The classifier's confidence that the label applies.
    pub score: f64,
}

/// The ways a classification attempt can fail.
///
/// These never reach the client; the predict endpoint reports every failure
/// as "no suggestion".
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The inference server could not be reached or returned an error status.
    #[error("classifier request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference server returned a response we could not interpret.
    #[error("classifier returned a malformed response: {0}")]
    InvalidResponse(String),
}

/// A zero-shot text classifier.
#[async_trait]
pub trait ZeroShotClassifier: Debug + Send + Sync {
    /// Rank `candidate_labels` by how well they describe `text`, best first.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifyError>;
}

/// A classifier loaded once at startup and shared read-only across requests.
pub type SharedClassifier = Arc<dyn ZeroShotClassifier>;

/// The outcome of asking for a category suggestion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Suggestion {
    /// The classifier was confident enough in its top label.
    Accepted {
        /// The suggested category.
        category: String,
        /// The classifier's confidence in the suggestion.
        confidence: f64,
    },
    /// No usable suggestion: the input was too short, the classifier failed,
    /// or its top label was not confident enough.
    NoSuggestion,
}

/// Ask `classifier` to suggest a category for `item` from `candidate_labels`.
///
/// Items shorter than [MIN_ITEM_CHARS] after trimming are rejected without
/// invoking the classifier. The top-ranked label is accepted only when its
/// confidence is strictly above [CONFIDENCE_THRESHOLD]. Classifier failures
/// are logged and reported as [Suggestion::NoSuggestion].
pub(crate) async fn suggest_category(
    classifier: &dyn ZeroShotClassifier,
    item: &str,
    candidate_labels: &[String],
) -> Suggestion {
    let item = item.trim();

    if item.chars().count() < MIN_ITEM_CHARS {
        return Suggestion::NoSuggestion;
    }

    let ranked = match classifier.classify(item, candidate_labels).await {
        Ok(ranked) => ranked,
        Err(error) => {
            tracing::warn!("could not classify {item:?}: {error}");
            return Suggestion::NoSuggestion;
        }
    };

    match ranked.into_iter().next() {
        Some(top) if top.score > CONFIDENCE_THRESHOLD => Suggestion::Accepted {
            category: top.label,
            confidence: top.score,
        },
        _ => Suggestion::NoSuggestion,
    }
}
