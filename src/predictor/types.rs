use serde::{Deserialize, Serialize};

/// Request payload for the prediction service, also used as the cache key.
/// Two inputs are the same prediction iff every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub exam_type: String,
    pub state: String,
    pub place: String,
    pub rank: u32,
    pub category: String,
    pub college_type: String,
}

/// One college row as returned by the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub college_name: String,
    pub college_id: String,
    pub place: String,
    pub state: String,
    pub opening_cutoff_rank: u32,
    pub closing_cutoff_rank: u32,
    pub seats: u32,
    pub year: i32,
    pub website: String,
}

/// Prediction results grouped by match confidence.
///
/// All three buckets are required by the schema; a bucket the service omits
/// deserializes as empty rather than failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub exact_matches: Vec<College>,
    #[serde(default)]
    pub near_matches: Vec<College>,
    #[serde(default)]
    pub weak_matches: Vec<College>,
}

impl PredictionResult {
    /// True when every bucket came back empty (a normal outcome, not an error)
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty() && self.near_matches.is_empty() && self.weak_matches.is_empty()
    }
}
