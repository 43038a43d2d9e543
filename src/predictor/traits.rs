use async_trait::async_trait;

use super::types::{PredictionInput, PredictionResult};
use crate::utils::CounselorError;

/// Core trait for anything that can answer a prediction request.
///
/// The chat controller only talks to this seam, so tests can drive the full
/// dialogue against a canned implementation with no network involved.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Submit one prediction request and return the bucketed results
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, CounselorError>;

    /// Human-readable name of the backend (for logs and `status`)
    fn name(&self) -> &str;
}
