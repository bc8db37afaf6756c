//! Workspace placeholder crate.
//!
//! Host applications depend on `walking-tour-bridge` to pull in the bridge core
//! (`core-bridge`), its ambient runtime (`core-runtime`) and the capability
//! contracts a platform must implement (`bridge-traits`) through one crate.

pub use bridge_traits;
pub use core_bridge;
pub use core_runtime;

pub use core_bridge::{BridgeHost, ChannelMessenger, PlaybackEndpoint, RoutingEndpoint};
pub use core_runtime::config::BridgeConfig;
