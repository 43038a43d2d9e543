// Gateway module for the prediction service client - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod traits;
mod types;

// Public re-exports - the ONLY way to access predictor functionality
pub use client::HttpPredictor;
pub use traits::Predictor;
pub use types::{College, PredictionInput, PredictionResult};
