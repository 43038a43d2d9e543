use thiserror::Error;

/// Main error type for Counselor
#[derive(Error, Debug)]
pub enum CounselorError {
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Prediction service error ({status}): {body}")]
    Service { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CounselorError {
    /// True for failures the user can fix by correcting their input
    pub fn is_validation(&self) -> bool {
        matches!(self, CounselorError::Validation(_))
    }
}
