pub mod app;
pub mod cache;
pub mod chat;
pub mod cli;
pub mod constants;
pub mod predictor;
pub mod runtime;
pub mod utils;

pub use app::{load_config, Config};
pub use cache::PredictionCache;
pub use chat::{ChatController, Step};
pub use predictor::{HttpPredictor, PredictionInput, PredictionResult, Predictor};
pub use utils::CounselorError;
