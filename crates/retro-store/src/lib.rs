//! Retro Store
//!
//! Owns the canonical `{ presences, ideas, stage }` view and keeps it in step
//! with the server:
//! - [`RetroChannel`]: the channel client interface the store consumes
//! - [`RetroStore`]: synchronous core applying join snapshots and events
//! - [`StoreHandle`]: async driver attached to a live channel
//! - [`StoreConfig`]: join retry policy and distribution stage
//! - [`MemoryChannel`]: in-process channel for tests and replays
//!
//! # Example
//!
//! ```rust,ignore
//! use retro_store::{MemoryChannel, StoreConfig, StoreHandle, TracingNotifier};
//! use std::sync::Arc;
//!
//! # async fn example(snapshot: serde_json::Value) -> Result<(), retro_store::StoreError> {
//! let channel = Arc::new(MemoryChannel::with_join_snapshot(snapshot));
//! let store = StoreHandle::attach(channel.clone(), StoreConfig::new(), Arc::new(TracingNotifier));
//!
//! channel.emit("idea_deleted", serde_json::json!({ "id": 1 }));
//! let snapshot = store.flush().await?;
//! println!("{} ideas at {}", snapshot.ideas.len(), snapshot.stage);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod channel;
pub mod config;
pub mod error;
pub mod live;
pub mod memory;
pub mod notify;
pub mod store;

// Re-exports
pub use channel::{EventHandler, RetroChannel, SubscriptionId};
pub use config::{JoinPolicy, StoreConfig};
pub use error::{ChannelError, ConfigError, StoreError};
pub use live::StoreHandle;
pub use memory::MemoryChannel;
pub use notify::{RecordingNotifier, StageNotifier, TracingNotifier, DISTRIBUTION_NOTICE};
pub use store::{JoinStatus, RetroSnapshot, RetroStore, StoreEffect};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the retro store
    pub use crate::{
        JoinStatus, MemoryChannel, RetroChannel, RetroSnapshot, StageNotifier, StoreConfig,
        StoreHandle,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
