//! Runtime abstraction layer for the walking tour bridge.
//!
//! Bridge crates depend on this crate instead of Tokio directly, so the
//! executor choice stays in one place. Native hosts (the iOS and Android
//! embedders and desktop test harnesses) all run on Tokio.
//!
//! # Modules
//!
//! - `runtime`: runtime handles and `block_on`
//! - `task`: task spawning and abort handles
//! - `sync`: async-aware locks and channels
//! - `time`: sleep, timeout and instants
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

// Re-export the async entry-point/test macros so downstream crates never need
// direct Tokio dependencies.
pub use core_async_macros::{main, test};

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

pub use task::spawn;
pub use time::{sleep, Duration, Instant};
