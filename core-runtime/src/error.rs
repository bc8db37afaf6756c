use thiserror::Error;

/// Bridge startup failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid channel configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required native capability was not injected.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
