//! A canned classifier for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ClassifyError, LabelScore, ZeroShotClassifier};

/// A classifier that returns a fixed result and counts how often it is
/// invoked.
#[derive(Debug, Default)]
pub(crate) struct MockClassifier {
    ranked: Vec<LabelScore>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockClassifier {
    /// A mock that returns `ranked` from every call.
    pub(crate) fn returning(ranked: Vec<LabelScore>) -> Self {
        Self {
            ranked,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A mock whose every call fails.
    pub(crate) fn failing() -> Self {
        Self {
            ranked: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times [ZeroShotClassifier::classify] was invoked.
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZeroShotClassifier for MockClassifier {
    async fn classify(
        &self,
        _text: &str,
        _candidate_labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ClassifyError::InvalidResponse(
                "mock classifier failure".to_string(),
            ));
        }

        Ok(self.ranked.clone())
    }
}
