//! Tests for the audio channel's `play` method, driven through the messenger.

mod common;

use bridge_traits::{ChannelError, MethodCall, MethodResponse};
use common::FakeAudioEngine;
use core_async::time::{timeout, Duration};
use core_bridge::{ChannelMessenger, PendingReply, PlaybackEndpoint, TransportError};
use serde_json::{json, Value};
use std::sync::Arc;

const AUDIO: &str = "test/audio";

async fn setup(engine: &FakeAudioEngine) -> (ChannelMessenger, PlaybackEndpoint) {
    let messenger = ChannelMessenger::new();
    let endpoint = PlaybackEndpoint::new(Arc::new(engine.clone()));
    messenger
        .set_method_call_handler(AUDIO, Arc::new(endpoint.clone()))
        .await;
    (messenger, endpoint)
}

async fn play(messenger: &ChannelMessenger, arguments: Value) -> PendingReply {
    messenger
        .invoke(AUDIO, MethodCall::new("play", arguments))
        .await
        .unwrap()
}

async fn settle(pending: PendingReply) -> Result<MethodResponse, TransportError> {
    timeout(Duration::from_secs(2), pending.wait())
        .await
        .expect("reply did not settle in time")
}

#[core_async::test]
async fn test_play_replies_null_on_item_end() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let mut pending = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;

    assert_eq!(engine.created()[0].as_str(), "https://example.com/a.mp3");
    assert!(pending.try_take().is_none());
    assert!(endpoint.active_session().await.is_some());

    assert!(engine.finish(0));
    assert_eq!(settle(pending).await, Ok(MethodResponse::Success(Value::Null)));
    assert_eq!(endpoint.active_session().await, None);
    assert_eq!(engine.released(), 1);
}

#[core_async::test]
async fn test_empty_url_succeeds_without_touching_active_player() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let first = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;
    let session = endpoint.active_session().await;

    let noop = play(&messenger, json!({ "url": "" })).await;
    assert_eq!(settle(noop).await, Ok(MethodResponse::Success(Value::Null)));

    assert_eq!(engine.player_count(), 1);
    assert_eq!(endpoint.active_session().await, session);
    assert!(engine.is_observed(0));

    assert!(engine.finish(0));
    assert_eq!(settle(first).await, Ok(MethodResponse::Success(Value::Null)));
}

#[core_async::test]
async fn test_invalid_url_rejected_before_player_creation() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let pending = play(&messenger, json!({ "url": "not a url" })).await;
    assert_eq!(
        settle(pending).await,
        Ok(MethodResponse::Error(ChannelError::new("BAD_URL", "Invalid url")))
    );
    assert_eq!(engine.player_count(), 0);
    assert_eq!(endpoint.active_session().await, None);
}

#[core_async::test]
async fn test_missing_url_rejected() {
    let engine = FakeAudioEngine::new();
    let (messenger, _endpoint) = setup(&engine).await;

    for arguments in [json!({}), json!({ "url": 42 }), json!(null), json!(["x"])] {
        let pending = play(&messenger, arguments).await;
        assert_eq!(
            settle(pending).await,
            Ok(MethodResponse::Error(ChannelError::new(
                "BAD_ARGS",
                "Missing audio url"
            )))
        );
    }
    assert_eq!(engine.player_count(), 0);
}

#[core_async::test]
async fn test_second_play_orphans_first() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let first = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;
    let first_session = endpoint.active_session().await;

    let second = play(&messenger, json!({ "url": "https://example.com/b.mp3" })).await;
    engine.wait_for_players(2).await;

    // The superseded call is released without a reply.
    assert_eq!(settle(first).await, Err(TransportError::ReplyDropped));
    assert!(!engine.finish(0));
    assert_eq!(engine.released(), 1);

    let second_session = endpoint.active_session().await;
    assert!(second_session.is_some());
    assert_ne!(second_session, first_session);

    assert!(engine.finish(1));
    assert_eq!(settle(second).await, Ok(MethodResponse::Success(Value::Null)));
    assert_eq!(endpoint.active_session().await, None);
}

#[core_async::test]
async fn test_engine_failure_reported_verbatim() {
    let engine = FakeAudioEngine::failing_create("Cannot Open");
    let (messenger, endpoint) = setup(&engine).await;

    let pending = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    assert_eq!(
        settle(pending).await,
        Ok(MethodResponse::Error(ChannelError::new(
            "PLAYER_ERROR",
            "Cannot Open"
        )))
    );
    assert_eq!(endpoint.active_session().await, None);
}

#[core_async::test]
async fn test_start_failure_leaves_slot_idle() {
    let engine = FakeAudioEngine::failing_play("Operation Stopped");
    let (messenger, endpoint) = setup(&engine).await;

    let pending = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    assert_eq!(
        settle(pending).await,
        Ok(MethodResponse::Error(ChannelError::new(
            "PLAYER_ERROR",
            "Operation Stopped"
        )))
    );
    assert_eq!(endpoint.active_session().await, None);
    assert_eq!(engine.released(), 1);
}

#[core_async::test]
async fn test_player_released_without_end_drops_reply() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let pending = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;

    engine.abandon(0);
    assert_eq!(settle(pending).await, Err(TransportError::ReplyDropped));
    assert!(endpoint.active_session().await.is_some());
}

#[core_async::test]
async fn test_release_orphans_pending_call() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let pending = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;

    assert!(endpoint.release().await.is_some());
    assert_eq!(settle(pending).await, Err(TransportError::ReplyDropped));
    assert!(endpoint.release().await.is_none());
}

#[core_async::test]
async fn test_unknown_method_not_implemented() {
    let engine = FakeAudioEngine::new();
    let (messenger, _endpoint) = setup(&engine).await;

    for method in ["pause", "stop", "seek"] {
        let pending = messenger
            .invoke(AUDIO, MethodCall::new(method, json!({ "url": "https://a/b.mp3" })))
            .await
            .unwrap();
        assert_eq!(settle(pending).await, Ok(MethodResponse::NotImplemented));
    }
    assert_eq!(engine.player_count(), 0);
}

#[core_async::test]
async fn test_audio_channel_responsive_while_item_plays() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    // The first item never reaches its end.
    let first = play(&messenger, json!({ "url": "https://example.com/long.mp3" })).await;
    engine.wait_for_players(1).await;

    let noop = play(&messenger, json!({ "url": "" })).await;
    let replied = timeout(Duration::from_millis(500), noop.wait())
        .await
        .expect("empty url reply stalled behind active playback");
    assert_eq!(replied, Ok(MethodResponse::Success(Value::Null)));

    let session = timeout(Duration::from_millis(500), endpoint.active_session())
        .await
        .expect("player slot stayed locked");
    assert!(session.is_some());

    let released = timeout(Duration::from_millis(500), endpoint.release())
        .await
        .expect("release stalled behind active playback");
    assert_eq!(released, session);
    assert_eq!(settle(first).await, Err(TransportError::ReplyDropped));

    let second = play(&messenger, json!({ "url": "https://example.com/b.mp3" })).await;
    timeout(Duration::from_millis(500), engine.wait_for_players(2))
        .await
        .expect("next play was not dispatched");
    assert!(engine.finish(1));
    assert_eq!(settle(second).await, Ok(MethodResponse::Success(Value::Null)));
}

#[core_async::test]
async fn test_failed_start_orphans_previous_call() {
    let engine = FakeAudioEngine::new();
    let (messenger, endpoint) = setup(&engine).await;

    let first = play(&messenger, json!({ "url": "https://example.com/a.mp3" })).await;
    engine.wait_for_players(1).await;

    engine.fail_next_play("Operation Stopped");
    let second = play(&messenger, json!({ "url": "https://example.com/b.mp3" })).await;
    assert_eq!(settle(second).await.unwrap().error_code(), Some("PLAYER_ERROR"));

    assert_eq!(settle(first).await, Err(TransportError::ReplyDropped));
    assert_eq!(endpoint.active_session().await, None);
    assert_eq!(engine.released(), 2);
}
