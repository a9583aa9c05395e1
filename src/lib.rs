//! DR HIRO chat widget.
//!
//! A server-rendered chat widget: the page is rendered with Leptos SSR and
//! every control talks to the server through HTMX. Each mounted widget owns a
//! session whose dispatcher sequences user messages and (simulated) bot
//! replies.
//!
//! # Modules
//!
//! - [`chat`]: messages, avatar and session state
//! - [`reply`]: reply backend seam and the simulated backend
//! - [`dispatch`]: per-session state machine driving replies
//! - [`session`]: store of mounted sessions
//! - [`server`]: Axum routes
//! - [`ui`]: Leptos components

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::must_use_candidate)]

pub mod chat;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod reply;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::reply::SimulatedReply;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mounted widget sessions.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State backed by the simulated reply backend.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let backend =
            SimulatedReply::new(config.chat.reply_latency(), config.chat.reply_text.clone());
        let sessions = SessionStore::new(Arc::new(backend), config.chat.dispatch_policy());
        Self { sessions, config }
    }
}
