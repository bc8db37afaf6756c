//! Hand-written native capability fakes shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    item_end_channel, AudioEngine, AudioPlayer, BridgeError, Coordinate, DirectionsRequest,
    DirectionsResponse, DirectionsService, ItemEndNotifier, ItemEndSignal, Polyline, Route,
};
use core_async::task;
use core_async::time::{sleep, Duration};
use std::sync::{Arc, Mutex};
use url::Url;

/// Directions fake answering every request with a fixed outcome.
pub struct FakeDirections {
    outcome: Result<DirectionsResponse, (i64, String)>,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl FakeDirections {
    pub fn with_routes(routes: Vec<Vec<(f64, f64)>>) -> Self {
        let routes = routes
            .into_iter()
            .map(|points| {
                Route::new(
                    points
                        .into_iter()
                        .map(|(lat, lon)| Coordinate::new(lat, lon))
                        .collect::<Polyline>(),
                )
            })
            .collect();
        Self::with_outcome(Ok(DirectionsResponse::new(routes)))
    }

    pub fn failing(code: i64, description: &str) -> Self {
        Self::with_outcome(Err((code, description.to_string())))
    }

    fn with_outcome(outcome: Result<DirectionsResponse, (i64, String)>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsService for FakeDirections {
    async fn calculate(&self, request: DirectionsRequest) -> BridgeResult<DirectionsResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err((code, description)) => Err(BridgeError::Native {
                code: *code,
                description: description.clone(),
            }),
        }
    }
}

#[derive(Default)]
struct EngineState {
    created: Vec<Url>,
    notifiers: Vec<Option<ItemEndNotifier>>,
    released: usize,
    create_error: Option<String>,
    play_error: Option<String>,
}

/// Audio engine fake that records every player it creates and lets the test
/// fire each player's end-of-item event.
#[derive(Clone, Default)]
pub struct FakeAudioEngine {
    state: Arc<Mutex<EngineState>>,
}

impl FakeAudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(description: &str) -> Self {
        let engine = Self::new();
        engine.state.lock().unwrap().create_error = Some(description.to_string());
        engine
    }

    pub fn failing_play(description: &str) -> Self {
        let engine = Self::new();
        engine.state.lock().unwrap().play_error = Some(description.to_string());
        engine
    }

    /// Make players created from now on refuse to start.
    pub fn fail_next_play(&self, description: &str) {
        self.state.lock().unwrap().play_error = Some(description.to_string());
    }

    pub fn created(&self) -> Vec<Url> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn player_count(&self) -> usize {
        self.state.lock().unwrap().created.len()
    }

    /// Number of players that have been dropped.
    pub fn released(&self) -> usize {
        self.state.lock().unwrap().released
    }

    /// Fire the end-of-item event of the `index`-th player. Returns `false`
    /// when nobody is observing that player anymore.
    pub fn finish(&self, index: usize) -> bool {
        let notifier = self.state.lock().unwrap().notifiers[index].take();
        notifier.map_or(false, ItemEndNotifier::notify)
    }

    /// Drop the `index`-th player's notifier without firing it.
    pub fn abandon(&self, index: usize) {
        self.state.lock().unwrap().notifiers[index].take();
    }

    pub fn is_observed(&self, index: usize) -> bool {
        self.state.lock().unwrap().notifiers[index]
            .as_ref()
            .map_or(false, |notifier| !notifier.is_abandoned())
    }

    /// Wait until `count` players have registered their end-of-item observer.
    pub async fn wait_for_players(&self, count: usize) {
        for _ in 0..200 {
            if self.state.lock().unwrap().notifiers.len() >= count {
                return;
            }
            task::yield_now().await;
            sleep(Duration::from_millis(1)).await;
        }
        panic!("expected {count} players to be created");
    }
}

impl AudioEngine for FakeAudioEngine {
    fn create_player(&self, url: &Url) -> BridgeResult<Box<dyn AudioPlayer>> {
        let mut state = self.state.lock().unwrap();
        if let Some(description) = state.create_error.clone() {
            return Err(BridgeError::Native {
                code: -11800,
                description,
            });
        }
        state.created.push(url.clone());
        Ok(Box::new(FakePlayer {
            state: Arc::clone(&self.state),
            play_error: state.play_error.clone(),
        }))
    }
}

struct FakePlayer {
    state: Arc<Mutex<EngineState>>,
    play_error: Option<String>,
}

impl AudioPlayer for FakePlayer {
    fn observe_item_end(&mut self) -> ItemEndSignal {
        let (notifier, signal) = item_end_channel();
        self.state.lock().unwrap().notifiers.push(Some(notifier));
        signal
    }

    fn play(&self) -> BridgeResult<()> {
        match &self.play_error {
            Some(description) => Err(BridgeError::Native {
                code: -11828,
                description: description.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Drop for FakePlayer {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.released += 1;
        }
    }
}
