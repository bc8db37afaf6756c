//! # Host Bridge Traits
//!
//! Contracts between the walking tour bridge core and the host platform.
//!
//! ## Overview
//!
//! The bridge core validates calls from the UI shell and dispatches them to
//! native capabilities it does not implement itself. Each trait here is one
//! such capability; every host (iOS, Android, desktop test harness) ships an
//! adapter for it.
//!
//! ## Traits
//!
//! - [`DirectionsService`](directions::DirectionsService) - Pedestrian route calculation
//! - [`AudioEngine`](audio::AudioEngine) / [`AudioPlayer`](audio::AudioPlayer) - Remote audio playback
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! The [`channel`] module holds the message types carried by a call channel.
//!
//! ## Error Handling
//!
//! Native failures are reported as [`BridgeError`](error::BridgeError). Use
//! `BridgeError::Native` to pass the platform's own error description through
//! unchanged; the bridge surfaces it to the shell verbatim.
//!
//! ## Thread Safety
//!
//! All capability traits require `Send + Sync` so adapters can be shared
//! across the bridge's dispatch and completion tasks.

pub mod audio;
pub mod channel;
pub mod directions;
pub mod error;
pub mod logging;

pub use error::BridgeError;

pub use audio::{
    item_end_channel, AudioEngine, AudioPlayer, ItemEndNotifier, ItemEndSignal, PlaybackSessionId,
};
pub use channel::{ChannelError, MethodCall, MethodResponse};
pub use directions::{
    Coordinate, DirectionsRequest, DirectionsResponse, DirectionsService, Polyline, Route,
    TransportType,
};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
