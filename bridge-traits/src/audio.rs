//! Native audio playback contract.
//!
//! Hosts expose their platform player (AVPlayer on iOS, ExoPlayer/MediaPlayer
//! on Android) through [`AudioEngine`], which hands out one [`AudioPlayer`] per
//! remote URL. The bridge only needs three things from a player: start it,
//! learn when its current item has played to the end, and drop it to discard
//! it.

use crate::error::{BridgeError, Result};
use core_async::sync::oneshot;
use url::Url;
use uuid::Uuid;

/// Unique identifier for a player instance created by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackSessionId(Uuid);

impl PlaybackSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlaybackSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlaybackSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Creates a connected notifier/signal pair for one player item.
pub fn item_end_channel() -> (ItemEndNotifier, ItemEndSignal) {
    let (tx, rx) = oneshot::channel();
    (ItemEndNotifier { tx }, ItemEndSignal { rx })
}

/// Player-side half: fired once when the current item plays to its end.
#[derive(Debug)]
pub struct ItemEndNotifier {
    tx: oneshot::Sender<()>,
}

impl ItemEndNotifier {
    /// Signal end of item. Returns `false` when nobody is observing anymore.
    pub fn notify(self) -> bool {
        self.tx.send(()).is_ok()
    }

    /// Whether the observing side has gone away.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Observer-side half of a play-to-end notification.
#[derive(Debug)]
pub struct ItemEndSignal {
    rx: oneshot::Receiver<()>,
}

impl ItemEndSignal {
    /// Wait until the item reaches its end.
    ///
    /// Fails when the player dropped its notifier without firing it, which
    /// means the item will never finish.
    pub async fn ended(self) -> Result<()> {
        self.rx.await.map_err(|_| {
            BridgeError::OperationFailed("player released before reaching end of item".into())
        })
    }
}

/// A player bound to a single remote item.
///
/// Dropping the player discards it; implementations should stop audio output
/// when that happens.
///
/// Methods are synchronous and must return promptly: buffering and playback
/// continue inside the platform, and completion is reported through the
/// [`ItemEndSignal`].
pub trait AudioPlayer: Send + Sync {
    /// Register the one-shot play-to-end observer for the current item.
    ///
    /// Called once per player, before [`AudioPlayer::play`].
    fn observe_item_end(&mut self) -> ItemEndSignal;

    /// Begin playback without waiting for it to finish.
    fn play(&self) -> Result<()>;
}

/// Factory for platform players.
pub trait AudioEngine: Send + Sync {
    /// Create a player for the given remote resource without loading it.
    /// Loading may still fail later inside the platform; in that case the item
    /// never ends.
    fn create_player(&self, url: &Url) -> Result<Box<dyn AudioPlayer>>;
}
