//! # Walking Tour Bridge Core
//!
//! Exposes two native capabilities to a cross-platform UI shell over named
//! call channels:
//!
//! - **routing** (`getRoute`): walking directions between two coordinates,
//!   answered with the first route's path as `[[lat, lon], ...]`
//! - **audio** (`play`): streams a remote audio URL and answers once the item
//!   has played to its end
//!
//! ## Architecture
//!
//! ```text
//! UI shell ──MethodCall──▶ ChannelMessenger ──▶ RoutingEndpoint ──▶ DirectionsService
//!                               │          └──▶ PlaybackEndpoint ──▶ AudioEngine
//!          ◀──MethodResponse── reply context ◀── Reply (exactly once)
//! ```
//!
//! The native capabilities are injected through
//! [`BridgeConfig`](core_runtime::config::BridgeConfig); [`BridgeHost::start`]
//! registers both endpoints.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::MethodCall;
//! use core_bridge::BridgeHost;
//! use serde_json::json;
//!
//! let host = BridgeHost::start(config).await?;
//! let reply = host
//!     .messenger()
//!     .invoke(
//!         host.routing_channel(),
//!         MethodCall::new("getRoute", json!({
//!             "startLat": 40.0, "startLon": -73.0,
//!             "endLat": 40.01, "endLon": -73.01,
//!         })),
//!     )
//!     .await?
//!     .wait()
//!     .await?;
//! ```

mod arguments;
pub mod codec;
pub mod error;
pub mod host;
pub mod playback;
pub mod routing;
pub mod transport;

pub use codec::JsonMethodCodec;
pub use error::{CallError, TransportError};
pub use host::BridgeHost;
pub use playback::{PlaybackEndpoint, PlaybackRequest};
pub use routing::{RouteRequest, RoutePoint, RouteResult, RoutingEndpoint};
pub use transport::{ChannelMessenger, MethodCallHandler, PendingReply, Reply};
