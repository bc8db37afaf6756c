//! Message types exchanged over a named call channel.
//!
//! A call channel carries one [`MethodCall`] in and exactly one
//! [`MethodResponse`] out. The shape mirrors what cross-platform UI shells send
//! over their platform channels: a method name plus a loosely structured
//! argument payload, answered by a value, a coded error, or a signal that the
//! method is unknown.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound call addressed to a channel handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `getRoute`.
    pub method: String,
    /// Untyped argument payload. `Value::Null` when the caller sent none.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Call without arguments.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// Coded error returned to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelError {
    /// Stable, machine-readable error code (e.g. `BAD_ARGS`).
    pub code: String,
    /// Human-readable message.
    pub message: Option<String>,
    /// Optional structured details.
    pub details: Option<Value>,
}

impl ChannelError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// The single reply a call receives.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// Successful result. `Value::Null` for void methods.
    Success(Value),
    /// Typed failure.
    Error(ChannelError),
    /// The channel does not recognise the method name.
    NotImplemented,
}

impl MethodResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success(_))
    }

    /// Error code, when this is an error reply.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResponse::Error(err) => Some(err.code.as_str()),
            _ => None,
        }
    }
}
