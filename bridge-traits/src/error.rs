use thiserror::Error;

/// Failures reported by a native capability behind a bridge trait.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// Error object handed back by the platform SDK, carried verbatim.
    #[error("{description}")]
    Native { code: i64, description: String },
}

impl BridgeError {
    /// Platform-facing description of the failure.
    ///
    /// For [`BridgeError::Native`] this is the SDK's own localized text, so the
    /// shell sees exactly what the platform reported.
    pub fn description(&self) -> String {
        match self {
            BridgeError::Native { description, .. } => description.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
