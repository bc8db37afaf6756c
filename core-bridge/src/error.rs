//! # Bridge Error Types
//!
//! [`CallError`] is what a single call can fail with; it maps one-to-one onto
//! the coded errors the shell receives. [`TransportError`] covers failures of
//! the call channel itself.

use bridge_traits::{ChannelError, MethodResponse};
use thiserror::Error;

/// Message sent with a malformed `getRoute` payload.
pub const MISSING_ROUTING_ARGUMENTS: &str = "Missing routing arguments";
/// Message sent with a malformed `play` payload.
pub const MISSING_AUDIO_URL: &str = "Missing audio url";

/// Terminal failure of one call. Never retried by the bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Argument payload missing or malformed.
    #[error("{0}")]
    BadArguments(String),

    /// Playback URL present but not a valid absolute URL.
    #[error("Invalid url")]
    BadUrl,

    /// Native directions engine failed; carries its description verbatim.
    #[error("{0}")]
    NativeRoutingError(String),

    /// Native player could not be created or started.
    #[error("{0}")]
    NativePlaybackError(String),

    /// Method name unknown on this channel.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),
}

impl CallError {
    pub fn bad_arguments(message: impl Into<String>) -> Self {
        CallError::BadArguments(message.into())
    }

    /// Wire code the shell matches on. `None` for [`CallError::NotImplemented`],
    /// which travels as the transport's not-implemented reply instead.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CallError::BadArguments(_) => Some("BAD_ARGS"),
            CallError::BadUrl => Some("BAD_URL"),
            CallError::NativeRoutingError(_) => Some("MKERROR"),
            CallError::NativePlaybackError(_) => Some("PLAYER_ERROR"),
            CallError::NotImplemented(_) => None,
        }
    }

    /// Returns `true` for failures caused by the caller's payload.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, CallError::BadArguments(_) | CallError::BadUrl)
    }

    pub fn into_response(self) -> MethodResponse {
        match self.code() {
            Some(code) => MethodResponse::Error(ChannelError::new(code, self.to_string())),
            None => MethodResponse::NotImplemented,
        }
    }
}

impl From<CallError> for MethodResponse {
    fn from(err: CallError) -> Self {
        err.into_response()
    }
}

/// Failures of the call channel itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No handler is registered under the channel name.
    #[error("No handler registered for channel '{0}'")]
    NoHandler(String),

    /// The channel's dispatch queue or the reply context has shut down.
    #[error("Channel '{0}' is closed")]
    ChannelClosed(String),

    /// The handler released the call without replying.
    #[error("Call was released without a reply")]
    ReplyDropped,

    /// Encoded payload could not be decoded or encoded.
    #[error("Codec error: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
