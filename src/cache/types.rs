use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::predictor::{PredictionInput, PredictionResult};

/// One cached prediction: the exact input that produced it plus the results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub input: PredictionInput,
    pub results: PredictionResult,
    pub cached_at: DateTime<Local>,
}
