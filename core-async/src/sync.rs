//! Synchronization primitives.
//!
//! All primitives are async-aware: holding a lock across an `.await` does not
//! block the executor thread. The bridge uses:
//! - `Mutex` for the playback endpoint's player slot
//! - `mpsc` for per-channel dispatch queues and the reply context
//! - `oneshot` for per-call replies and play-to-end notifications
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::{oneshot, Mutex};
//!
//! async fn example() {
//!     let slot = Mutex::new(None::<u32>);
//!     slot.lock().await.replace(7);
//!
//!     let (tx, rx) = oneshot::channel();
//!     tx.send("done").unwrap();
//!     assert_eq!(rx.await.unwrap(), "done");
//! }
//! ```

pub use tokio::sync::{mpsc, oneshot, Mutex, MutexGuard};
