//! # Bridge Configuration Module
//!
//! Builds the [`BridgeConfig`] that `core-bridge` needs to start: the native
//! capabilities it dispatches to and the names of the call channels it
//! answers on.
//!
//! ## Required Dependencies
//!
//! - `DirectionsService` - native pedestrian routing
//! - `AudioEngine` - native remote audio playback
//!
//! Missing capabilities fail fast with [`Error::CapabilityMissing`] so a host
//! that forgot to inject an adapter finds out at startup, not on the first
//! call.
//!
//! ## Channel Names
//!
//! Channels are addressed as `"<namespace>/routing"` and `"<namespace>/audio"`.
//! The namespace defaults to [`DEFAULT_NAMESPACE`]; either channel name can be
//! overridden outright.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .namespace("com.example.walking_tour_app")
//!     .directions_service(Arc::new(MapKitDirections::new()))
//!     .audio_engine(Arc::new(AvAudioEngine::new()))
//!     .build()?;
//!
//! assert_eq!(config.routing_channel(), "com.example.walking_tour_app/routing");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{AudioEngine, DirectionsService};
use std::sync::Arc;

/// Namespace used by the walking tour shell for its platform channels.
pub const DEFAULT_NAMESPACE: &str = "com.example.walking_tour_app";

const ROUTING_SUFFIX: &str = "routing";
const AUDIO_SUFFIX: &str = "audio";

/// Configuration for a bridge instance.
///
/// Use [`BridgeConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Prefix shared by both channel names.
    pub namespace: String,

    /// Explicit routing channel name, replacing `<namespace>/routing`.
    pub routing_channel_override: Option<String>,

    /// Explicit audio channel name, replacing `<namespace>/audio`.
    pub audio_channel_override: Option<String>,

    /// Native routing engine (required)
    pub directions_service: Arc<dyn DirectionsService>,

    /// Native audio engine (required)
    pub audio_engine: Arc<dyn AudioEngine>,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("namespace", &self.namespace)
            .field("routing_channel", &self.routing_channel())
            .field("audio_channel", &self.audio_channel())
            .field("directions_service", &"DirectionsService { ... }")
            .field("audio_engine", &"AudioEngine { ... }")
            .finish()
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Name of the channel the routing endpoint answers on.
    pub fn routing_channel(&self) -> String {
        self.routing_channel_override
            .clone()
            .unwrap_or_else(|| channel_name(&self.namespace, ROUTING_SUFFIX))
    }

    /// Name of the channel the playback endpoint answers on.
    pub fn audio_channel(&self) -> String {
        self.audio_channel_override
            .clone()
            .unwrap_or_else(|| channel_name(&self.namespace, AUDIO_SUFFIX))
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Namespace is not blank when it is used to derive a channel name
    /// - Channel name overrides are not blank
    /// - Routing and audio channels do not collide
    pub fn validate(&self) -> Result<()> {
        let derives_from_namespace =
            self.routing_channel_override.is_none() || self.audio_channel_override.is_none();
        if derives_from_namespace && self.namespace.trim().is_empty() {
            return Err(Error::Config("Channel namespace cannot be empty".to_string()));
        }

        for (label, name) in [
            ("Routing", &self.routing_channel_override),
            ("Audio", &self.audio_channel_override),
        ] {
            if matches!(name, Some(n) if n.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "{} channel name cannot be empty",
                    label
                )));
            }
        }

        if self.routing_channel() == self.audio_channel() {
            return Err(Error::Config(format!(
                "Routing and audio endpoints cannot share channel '{}'",
                self.routing_channel()
            )));
        }

        Ok(())
    }
}

fn channel_name(namespace: &str, suffix: &str) -> String {
    format!("{}/{}", namespace.trim_end_matches('/'), suffix)
}

/// Builder for [`BridgeConfig`].
#[derive(Default)]
pub struct BridgeConfigBuilder {
    namespace: Option<String>,
    routing_channel: Option<String>,
    audio_channel: Option<String>,
    directions_service: Option<Arc<dyn DirectionsService>>,
    audio_engine: Option<Arc<dyn AudioEngine>>,
}

impl BridgeConfigBuilder {
    /// Sets the channel namespace (defaults to [`DEFAULT_NAMESPACE`]).
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Overrides the full routing channel name.
    pub fn routing_channel(mut self, name: impl Into<String>) -> Self {
        self.routing_channel = Some(name.into());
        self
    }

    /// Overrides the full audio channel name.
    pub fn audio_channel(mut self, name: impl Into<String>) -> Self {
        self.audio_channel = Some(name.into());
        self
    }

    pub fn directions_service(mut self, service: Arc<dyn DirectionsService>) -> Self {
        self.directions_service = Some(service);
        self
    }

    pub fn audio_engine(mut self, engine: Arc<dyn AudioEngine>) -> Self {
        self.audio_engine = Some(engine);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when a required native capability was
    ///   not injected
    /// - [`Error::Config`] when validation fails
    pub fn build(self) -> Result<BridgeConfig> {
        let directions_service = self
            .directions_service
            .ok_or_else(|| Error::CapabilityMissing {
                capability: "DirectionsService".to_string(),
                message: "A DirectionsService implementation is required for walking routes. \
                          iOS: wrap MKDirections. Android: wrap the platform directions SDK."
                    .to_string(),
            })?;

        let audio_engine = self
            .audio_engine
            .ok_or_else(|| Error::CapabilityMissing {
                capability: "AudioEngine".to_string(),
                message: "An AudioEngine implementation is required for remote audio playback. \
                          iOS: wrap AVPlayer. Android: wrap ExoPlayer or MediaPlayer."
                    .to_string(),
            })?;

        let config = BridgeConfig {
            namespace: self
                .namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            routing_channel_override: self.routing_channel,
            audio_channel_override: self.audio_channel,
            directions_service,
            audio_engine,
        };

        config.validate()?;
        Ok(config)
    }
}
