//! # Playback Endpoint
//!
//! Answers `play` on the audio channel by streaming a remote audio URL through
//! the native [`AudioEngine`] and replying once the item plays to its end.
//!
//! ## Player slot
//!
//! At most one player is held at a time. Each `play` call builds a fresh
//! player and swaps it into the slot; the superseded player is discarded and
//! its completion watcher is aborted, so the earlier call never gets a reply.
//!
//! ```text
//! Idle --play(url)--> Playing --item end--> Idle
//!                        |
//!                        +--play(url')--> Playing (previous call orphaned)
//! ```
//!
//! An empty URL is a no-op that succeeds immediately and leaves the slot as
//! it is.

use crate::arguments::decode_arguments;
use crate::error::{CallError, MISSING_AUDIO_URL};
use crate::transport::{MethodCallHandler, Reply};
use bridge_traits::{AudioEngine, AudioPlayer, ItemEndSignal, MethodCall, PlaybackSessionId};
use core_async::sync::Mutex;
use core_async::task::{self, AbortHandle};
use core_runtime::logging::redact_url;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Method answered by [`PlaybackEndpoint`].
pub const PLAY: &str = "play";

/// Validated `play` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackRequest {
    pub url: String,
}

impl PlaybackRequest {
    /// Decode from the call's argument map.
    pub fn from_arguments(arguments: &Value) -> Result<Self, CallError> {
        decode_arguments(arguments, MISSING_AUDIO_URL)
    }

    /// `true` for the empty-URL no-op.
    pub fn is_noop(&self) -> bool {
        self.url.is_empty()
    }

    /// Parse the URL.
    ///
    /// # Errors
    ///
    /// [`CallError::BadUrl`] unless the string is an absolute URL.
    pub fn parse_url(&self) -> Result<Url, CallError> {
        Url::parse(&self.url).map_err(|_| CallError::BadUrl)
    }
}

/// The player currently occupying the slot.
struct ActivePlayer {
    session: PlaybackSessionId,
    // Held only to keep the platform player alive.
    _player: Box<dyn AudioPlayer>,
    watcher: Option<AbortHandle>,
}

impl ActivePlayer {
    /// Detach the completion watcher so dropping this entry leaves it running.
    fn disarm(&mut self) {
        self.watcher.take();
    }
}

impl Drop for ActivePlayer {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

type PlayerSlot = Arc<Mutex<Option<ActivePlayer>>>;

/// Call handler for the audio channel.
#[derive(Clone)]
pub struct PlaybackEndpoint {
    engine: Arc<dyn AudioEngine>,
    slot: PlayerSlot,
}

impl PlaybackEndpoint {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self {
            engine,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Session id of the held player, if any.
    pub async fn active_session(&self) -> Option<PlaybackSessionId> {
        self.slot.lock().await.as_ref().map(|active| active.session)
    }

    /// Discard the held player. Its pending call, if any, is orphaned.
    pub async fn release(&self) -> Option<PlaybackSessionId> {
        let released = self.slot.lock().await.take();
        released.map(|active| {
            info!(session = %active.session, "Released audio player");
            active.session
        })
    }

    async fn dispatch_play(&self, arguments: &Value, reply: Reply) {
        let request = match PlaybackRequest::from_arguments(arguments) {
            Ok(request) => request,
            Err(err) => {
                warn!("Rejected play: {}", err);
                reply.error(err);
                return;
            }
        };

        if request.is_noop() {
            debug!("Empty audio url; nothing to play");
            reply.success(Value::Null);
            return;
        }

        let url = match request.parse_url() {
            Ok(url) => url,
            Err(err) => {
                warn!(url = %redact_url(&request.url), "Rejected play: {}", err);
                reply.error(err);
                return;
            }
        };

        if let Err(err) = self.start(url, reply).await {
            warn!(error = %err, "Audio playback failed to start");
        }
    }

    /// Create a player for `url`, swap it into the slot and start it. On
    /// success `reply` travels with the completion watcher.
    ///
    /// Native calls return promptly and run outside the slot lock, so the
    /// audio channel and [`release`](Self::release) never wait on the
    /// platform.
    async fn start(&self, url: Url, reply: Reply) -> Result<PlaybackSessionId, CallError> {
        let mut player = match self.engine.create_player(&url) {
            Ok(player) => player,
            Err(err) => {
                let err = CallError::NativePlaybackError(err.description());
                reply.error(err.clone());
                return Err(err);
            }
        };
        let signal = player.observe_item_end();
        let session = PlaybackSessionId::new();

        let previous = self.slot.lock().await.take();
        if let Some(previous) = previous {
            info!(
                previous = %previous.session,
                session = %session,
                "Superseding active audio player"
            );
            drop(previous);
        }

        if let Err(err) = player.play() {
            let err = CallError::NativePlaybackError(err.description());
            reply.error(err.clone());
            return Err(err);
        }

        // The watcher cannot observe the slot before this entry is stored.
        let mut slot = self.slot.lock().await;
        let watcher = task::spawn(watch_item_end(
            Arc::clone(&self.slot),
            session,
            signal,
            reply,
        ));
        *slot = Some(ActivePlayer {
            session,
            _player: player,
            watcher: Some(watcher.abort_handle()),
        });
        drop(slot);

        info!(session = %session, url = %redact_url(url.as_str()), "Audio playback started");
        Ok(session)
    }
}

/// Reply once the item ends, then return the slot to idle if it still holds
/// this session.
async fn watch_item_end(
    slot: PlayerSlot,
    session: PlaybackSessionId,
    signal: ItemEndSignal,
    reply: Reply,
) {
    if let Err(err) = signal.ended().await {
        warn!(session = %session, error = %err, "Audio item will not complete");
        return;
    }

    let finished = {
        let mut slot = slot.lock().await;
        let current = slot.as_ref().is_some_and(|active| active.session == session);
        if current {
            slot.take()
        } else {
            None
        }
    };
    if let Some(mut finished) = finished {
        finished.disarm();
    }

    info!(session = %session, call_id = reply.call_id(), "Audio item finished");
    reply.success(Value::Null);
}

#[async_trait::async_trait]
impl MethodCallHandler for PlaybackEndpoint {
    #[instrument(name = "playback", skip_all, fields(method = %call.method, call_id = reply.call_id()))]
    async fn on_method_call(&self, call: MethodCall, reply: Reply) {
        match call.method.as_str() {
            PLAY => self.dispatch_play(&call.arguments, reply).await,
            other => {
                debug!(method = %other, "Unsupported audio method");
                reply.not_implemented();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_string_url() {
        assert_eq!(
            PlaybackRequest::from_arguments(&json!({ "url": "https://a/b.mp3" })).unwrap(),
            PlaybackRequest {
                url: "https://a/b.mp3".to_string()
            }
        );
        for bad in [json!({}), json!({ "url": 7 }), json!({ "url": null }), json!("x")] {
            assert_eq!(
                PlaybackRequest::from_arguments(&bad).unwrap_err(),
                CallError::bad_arguments("Missing audio url")
            );
        }
    }

    #[test]
    fn test_empty_url_is_noop() {
        let request = PlaybackRequest { url: String::new() };
        assert!(request.is_noop());
    }

    #[test]
    fn test_relative_url_is_invalid() {
        let request = PlaybackRequest {
            url: "not a url".to_string(),
        };
        assert_eq!(request.parse_url().unwrap_err(), CallError::BadUrl);

        let request = PlaybackRequest {
            url: "/audio/stop1.mp3".to_string(),
        };
        assert_eq!(request.parse_url().unwrap_err(), CallError::BadUrl);
    }

    #[test]
    fn test_absolute_url_parses() {
        let request = PlaybackRequest {
            url: "https://example.com/a.mp3".to_string(),
        };
        assert_eq!(request.parse_url().unwrap().host_str(), Some("example.com"));
    }
}
