//! Bridge bootstrap: wires the injected native capabilities into both
//! endpoints and registers them on their channels.

use crate::playback::PlaybackEndpoint;
use crate::routing::RoutingEndpoint;
use crate::transport::ChannelMessenger;
use core_runtime::config::BridgeConfig;
use core_runtime::Result;
use std::sync::Arc;
use tracing::info;

/// A running bridge instance.
#[derive(Clone)]
pub struct BridgeHost {
    messenger: ChannelMessenger,
    routing: RoutingEndpoint,
    playback: PlaybackEndpoint,
    routing_channel: String,
    audio_channel: String,
}

impl BridgeHost {
    /// Validate `config` and register the routing and audio endpoints.
    ///
    /// # Errors
    ///
    /// [`core_runtime::Error::Config`] when the channel names are invalid.
    pub async fn start(config: BridgeConfig) -> Result<Self> {
        config.validate()?;

        let routing_channel = config.routing_channel();
        let audio_channel = config.audio_channel();
        let routing = RoutingEndpoint::new(Arc::clone(&config.directions_service));
        let playback = PlaybackEndpoint::new(Arc::clone(&config.audio_engine));

        let messenger = ChannelMessenger::new();
        messenger
            .set_method_call_handler(routing_channel.clone(), Arc::new(routing.clone()))
            .await;
        messenger
            .set_method_call_handler(audio_channel.clone(), Arc::new(playback.clone()))
            .await;

        info!(
            routing_channel = %routing_channel,
            audio_channel = %audio_channel,
            "Walking tour bridge started"
        );

        Ok(Self {
            messenger,
            routing,
            playback,
            routing_channel,
            audio_channel,
        })
    }

    /// Messenger the shell side invokes calls through.
    pub fn messenger(&self) -> &ChannelMessenger {
        &self.messenger
    }

    pub fn routing_channel(&self) -> &str {
        &self.routing_channel
    }

    pub fn audio_channel(&self) -> &str {
        &self.audio_channel
    }

    pub fn routing(&self) -> &RoutingEndpoint {
        &self.routing
    }

    pub fn playback(&self) -> &PlaybackEndpoint {
        &self.playback
    }

    /// Unregister both channels and discard the held player. Outstanding
    /// playback calls resolve as dropped.
    pub async fn shutdown(&self) {
        self.messenger
            .remove_method_call_handler(&self.routing_channel)
            .await;
        self.messenger
            .remove_method_call_handler(&self.audio_channel)
            .await;
        self.playback.release().await;
        info!("Walking tour bridge stopped");
    }
}

impl std::fmt::Debug for BridgeHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHost")
            .field("routing_channel", &self.routing_channel)
            .field("audio_channel", &self.audio_channel)
            .finish()
    }
}
