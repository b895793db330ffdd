use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    Status { status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Data processing error: {message}")]
    Processing { message: String },

    #[error("Refresh cycle cancelled")]
    Cancelled,
}

impl DashError {
    /// Cancellation is an outcome, not a failure; callers discard the cycle's output.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DashError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
