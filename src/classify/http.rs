//! HTTP backend for zero-shot classification.
//!
//! Talks to an inference server that exposes the Hugging Face zero-shot
//! pipeline over HTTP, e.g. a sidecar hosting `facebook/bart-large-mnli`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ClassifyError, LabelScore, ZeroShotClassifier};

/// A zero-shot classifier backed by an HTTP inference server.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    http_client: Client,
    base_url: String,
    model: String,
}

impl HttpClassifier {
    /// Create a classifier that posts to the inference server at `base_url`,
    /// asking for `model`.
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

/// Request body in the Hugging Face zero-shot pipeline shape.
#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

/// Response body: labels ranked best-first with their scores.
#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[async_trait]
impl ZeroShotClassifier for HttpClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifyError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters { candidate_labels },
        };

        let response = self
            .http_client
            .post(self.model_url())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ZeroShotResponse = response.json().await?;

        if body.labels.len() != body.scores.len() {
            return Err(ClassifyError::InvalidResponse(format!(
                "got {} labels but {} scores",
                body.labels.len(),
                body.scores.len()
            )));
        }

        Ok(body
            .labels
            .into_iter()
            .zip(body.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect())
    }
}

#[cfg(test)]
mod wire_format_tests {
    use serde_json::json;

    use super::{HttpClassifier, ZeroShotParameters, ZeroShotRequest, ZeroShotResponse};

    #[test]
    fn request_serializes_to_pipeline_shape() {
        let labels = vec!["Food".to_string(), "Transport".to_string()];
        let request = ZeroShotRequest {
            inputs: "flat white",
            parameters: ZeroShotParameters {
                candidate_labels: &labels,
            },
        };

        let got = serde_json::to_value(&request).unwrap();

        assert_eq!(
            got,
            json!({
                "inputs": "flat white",
                "parameters": {"candidate_labels": ["Food", "Transport"]}
            })
        );
    }

    #[test]
    fn response_parses_ranked_labels() {
        let body = json!({
            "sequence": "flat white",
            "labels": ["Food", "Transport"],
            "scores": [0.91, 0.04]
        });

        let got: ZeroShotResponse = serde_json::from_value(body).unwrap();

        assert_eq!(got.labels, vec!["Food", "Transport"]);
        assert_eq!(got.scores, vec![0.91, 0.04]);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let classifier = HttpClassifier::new("http://localhost:8090/", "facebook/bart-large-mnli");

        assert_eq!(
            classifier.model_url(),
            "http://localhost:8090/models/facebook/bart-large-mnli"
        );
    }
}
