//! # Jarama Service Worker
//!
//! Offline cache manager for the Jarama music app.
//!
//! ## Features
//!
//! - **Lifecycle**: install (precache), activate (orphan sweep, claim)
//! - **Cache stores**: named, versioned request → response snapshots
//! - **Routing**: ordered policy table (passthrough / cache-first / network-first)
//! - **Clients**: registry of controlled pages
//! - **Background hooks**: sync, push, notification click
//!
//! ## Architecture
//!
//! ```text
//! OfflineCacheManager
//!     ├── RoutingTable          (request → RoutePolicy, first match wins)
//!     ├── Arc<dyn Fetcher>      (the network seam, see jarama-net)
//!     ├── CacheStorage
//!     │       ├── precache     (manifest assets, written at install)
//!     │       └── runtime      (opportunistic fills during use)
//!     ├── ServiceWorker        (lifecycle state machine)
//!     └── Clients              (open pages, claimed at activation)
//! ```

use thiserror::Error;

pub use jarama_common::{init_logging, LogConfig, LogFormat};

pub mod cache;
pub mod clients;
pub mod events;
pub mod manager;
pub mod routes;
pub mod worker;

pub use cache::{Cache, CacheEntry, CacheKey, CacheStorage};
pub use clients::{Client, Clients};
pub use events::{
    notification_click_outcome, ClickOutcome, Notification, NotificationAction, PushEvent,
    SYNC_DOWNLOADS_TAG,
};
pub use manager::{
    CacheVersions, FetchOutcome, FetchResponse, ManagerConfig, OfflineCacheManager,
};
pub use routes::{FillCondition, Route, RoutePolicy, RoutePredicate, RoutingTable};
pub use worker::{ServiceWorker, WorkerId, WorkerState};

// ==================== Errors ====================

/// Errors that can occur in worker operations.
#[derive(Error, Debug)]
pub enum SwError {
    #[error("Install failed: {0}")]
    InstallFailed(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(#[from] jarama_net::NetError),
}
