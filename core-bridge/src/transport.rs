//! # Call Transport
//!
//! In-process implementation of a named, bidirectional call channel.
//!
//! ## Overview
//!
//! A [`ChannelMessenger`] routes each inbound [`MethodCall`] to the
//! [`MethodCallHandler`] registered under the channel name and hands the
//! handler a one-shot [`Reply`]. The caller keeps a [`PendingReply`] that
//! resolves once the handler answers.
//!
//! ## Execution contexts
//!
//! - **Dispatch queue**: every channel owns one task that feeds calls to its
//!   handler one at a time, in arrival order.
//! - **Reply context**: every reply, whichever task produced it, is posted to a
//!   single messenger-wide task that performs the actual delivery. Handlers
//!   never deliver replies from their own completion tasks.
//!
//! ## Exactly-once replies
//!
//! All completion methods on [`Reply`] take `self`, so a call cannot be
//! answered twice. A `Reply` dropped without an answer resolves the caller's
//! [`PendingReply`] with [`TransportError::ReplyDropped`].

use crate::codec::JsonMethodCodec;
use crate::error::{CallError, Result, TransportError};
use bridge_traits::{MethodCall, MethodResponse};
use bytes::Bytes;
use core_async::sync::{mpsc, oneshot, Mutex};
use core_async::task;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Receives the calls addressed to one channel.
///
/// Handlers are invoked serially per channel. Long-running work must be moved
/// onto a spawned task so the channel keeps accepting calls; the [`Reply`] can
/// travel with it.
#[async_trait::async_trait]
pub trait MethodCallHandler: Send + Sync {
    async fn on_method_call(&self, call: MethodCall, reply: Reply);
}

struct Delivery {
    call_id: u64,
    channel: Arc<str>,
    response: MethodResponse,
    deliver: oneshot::Sender<MethodResponse>,
}

struct InboundCall {
    call: MethodCall,
    reply: Reply,
}

/// One-shot reply handle for a single call.
pub struct Reply {
    call_id: u64,
    channel: Arc<str>,
    method: String,
    deliver: Option<oneshot::Sender<MethodResponse>>,
    reply_tx: mpsc::UnboundedSender<Delivery>,
}

impl Reply {
    pub fn call_id(&self) -> u64 {
        self.call_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn success(self, value: Value) {
        self.send(MethodResponse::Success(value));
    }

    pub fn error(self, error: CallError) {
        self.send(error.into_response());
    }

    pub fn not_implemented(self) {
        self.send(MethodResponse::NotImplemented);
    }

    /// Post the response to the reply context.
    pub fn send(mut self, response: MethodResponse) {
        let Some(deliver) = self.deliver.take() else {
            return;
        };

        let delivery = Delivery {
            call_id: self.call_id,
            channel: Arc::clone(&self.channel),
            response,
            deliver,
        };

        if self.reply_tx.send(delivery).is_err() {
            warn!(
                channel = %self.channel,
                method = %self.method,
                call_id = self.call_id,
                "Reply context closed; reply discarded"
            );
        }
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if self.deliver.is_some() {
            debug!(
                channel = %self.channel,
                method = %self.method,
                call_id = self.call_id,
                "Call released without a reply"
            );
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reply")
            .field("call_id", &self.call_id)
            .field("channel", &self.channel)
            .field("method", &self.method)
            .field("sent", &self.deliver.is_none())
            .finish()
    }
}

/// Caller-side handle for an outstanding call.
#[derive(Debug)]
pub struct PendingReply {
    call_id: u64,
    rx: oneshot::Receiver<MethodResponse>,
}

impl PendingReply {
    pub fn call_id(&self) -> u64 {
        self.call_id
    }

    /// Wait for the reply.
    ///
    /// # Errors
    ///
    /// [`TransportError::ReplyDropped`] if the handler released the call
    /// without answering it.
    pub async fn wait(self) -> Result<MethodResponse> {
        self.rx.await.map_err(|_| TransportError::ReplyDropped)
    }

    /// Non-blocking poll: `None` while the call is still outstanding.
    pub fn try_take(&mut self) -> Option<Result<MethodResponse>> {
        use core_async::sync::oneshot::error::TryRecvError;

        match self.rx.try_recv() {
            Ok(response) => Some(Ok(response)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(TransportError::ReplyDropped)),
        }
    }
}

struct MessengerInner {
    channels: Mutex<HashMap<String, mpsc::UnboundedSender<InboundCall>>>,
    reply_tx: mpsc::UnboundedSender<Delivery>,
    next_call_id: AtomicU64,
}

/// Registry of named call channels sharing one reply context.
#[derive(Clone)]
pub struct ChannelMessenger {
    inner: Arc<MessengerInner>,
}

impl ChannelMessenger {
    /// Create a messenger and spawn its reply context.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a runtime context.
    pub fn new() -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        task::spawn(run_reply_context(reply_rx));

        Self {
            inner: Arc::new(MessengerInner {
                channels: Mutex::new(HashMap::new()),
                reply_tx,
                next_call_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register `handler` for `channel`, replacing any previous handler.
    ///
    /// Calls already queued for a replaced handler are still delivered to it.
    pub async fn set_method_call_handler(
        &self,
        channel: impl Into<String>,
        handler: Arc<dyn MethodCallHandler>,
    ) {
        let channel = channel.into();
        let (tx, rx) = mpsc::unbounded_channel();
        task::spawn(run_dispatch_queue(Arc::from(channel.as_str()), handler, rx));

        let previous = self.inner.channels.lock().await.insert(channel.clone(), tx);
        debug!(
            channel = %channel,
            replaced = previous.is_some(),
            "Registered method call handler"
        );
    }

    /// Unregister the handler for `channel`. Returns `false` if none was set.
    pub async fn remove_method_call_handler(&self, channel: &str) -> bool {
        let removed = self.inner.channels.lock().await.remove(channel).is_some();
        if removed {
            debug!(channel = %channel, "Removed method call handler");
        }
        removed
    }

    pub async fn has_handler(&self, channel: &str) -> bool {
        self.inner.channels.lock().await.contains_key(channel)
    }

    /// Send a call to `channel`.
    ///
    /// # Errors
    ///
    /// - [`TransportError::NoHandler`] if nothing is registered for `channel`
    /// - [`TransportError::ChannelClosed`] if its dispatch queue has stopped
    pub async fn invoke(&self, channel: &str, call: MethodCall) -> Result<PendingReply> {
        let channels = self.inner.channels.lock().await;
        let queue = channels
            .get(channel)
            .ok_or_else(|| TransportError::NoHandler(channel.to_string()))?;

        let call_id = self.inner.next_call_id.fetch_add(1, Ordering::Relaxed);
        let (deliver, rx) = oneshot::channel();
        let reply = Reply {
            call_id,
            channel: Arc::from(channel),
            method: call.method.clone(),
            deliver: Some(deliver),
            reply_tx: self.inner.reply_tx.clone(),
        };

        trace!(channel = %channel, method = %call.method, call_id, "Queueing call");

        queue
            .send(InboundCall { call, reply })
            .map_err(|_| TransportError::ChannelClosed(channel.to_string()))?;

        Ok(PendingReply { call_id, rx })
    }

    /// Byte-level variant of [`invoke`](Self::invoke) using the JSON method
    /// codec. Waits for the reply and returns its encoded envelope.
    pub async fn invoke_encoded(&self, channel: &str, message: &[u8]) -> Result<Bytes> {
        let call = JsonMethodCodec::decode_method_call(message)?;
        let response = self.invoke(channel, call).await?.wait().await?;
        JsonMethodCodec::encode_response(&response)
    }
}

impl Default for ChannelMessenger {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_dispatch_queue(
    channel: Arc<str>,
    handler: Arc<dyn MethodCallHandler>,
    mut rx: mpsc::UnboundedReceiver<InboundCall>,
) {
    while let Some(InboundCall { call, reply }) = rx.recv().await {
        debug!(
            channel = %channel,
            method = %call.method,
            call_id = reply.call_id(),
            "Dispatching call"
        );
        handler.on_method_call(call, reply).await;
    }
    debug!(channel = %channel, "Dispatch queue closed");
}

async fn run_reply_context(mut rx: mpsc::UnboundedReceiver<Delivery>) {
    while let Some(delivery) = rx.recv().await {
        let Delivery {
            call_id,
            channel,
            response,
            deliver,
        } = delivery;

        if deliver.send(response).is_err() {
            debug!(channel = %channel, call_id, "Caller stopped waiting; reply dropped");
        } else {
            trace!(channel = %channel, call_id, "Reply delivered");
        }
    }
}
