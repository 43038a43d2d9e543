use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::traits::Predictor;
use super::types::{PredictionInput, PredictionResult};
use crate::constants::{HTTP_REQUEST_TIMEOUT_SECS, PREDICT_PATH, STATUS_CHECK_TIMEOUT_SECS};
use crate::utils::CounselorError;

/// HTTP client for the remote prediction service
pub struct HttpPredictor {
    client: Client,
    base_url: String,
}

impl HttpPredictor {
    /// Create a new client for the service at `base_url`
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CounselorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CounselorError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with the default request timeout
    pub fn with_defaults(base_url: &str) -> Result<Self, CounselorError> {
        Self::new(base_url, HTTP_REQUEST_TIMEOUT_SECS)
    }

    /// Check whether the service is reachable (used by `counselor status`)
    pub async fn is_reachable(&self) -> bool {
        let client = match Client::builder()
            .timeout(std::time::Duration::from_secs(STATUS_CHECK_TIMEOUT_SECS))
            .build()
        {
            Ok(c) => c,
            Err(_) => return false,
        };
        client.get(&self.base_url).send().await.is_ok()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, CounselorError> {
        let url = format!("{}{}", self.base_url, PREDICT_PATH);
        debug!("POST {} rank={} place={}", url, input.rank, input.place);

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| CounselorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are free-form text, never parsed as JSON
            let body = response.text().await.unwrap_or_default();
            return Err(CounselorError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| CounselorError::Transport(format!("malformed response: {e}")))
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let predictor = HttpPredictor::with_defaults("http://localhost:5000/").unwrap();
        assert_eq!(predictor.base_url(), "http://localhost:5000");
    }
}
