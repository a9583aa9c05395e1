//! Mounted widget sessions.
//!
//! Every page load mounts one widget, which gets its own [`Session`]: an id,
//! activity timestamps, and a [`Dispatcher`](crate::dispatch::Dispatcher)
//! owning the widget state. Sessions are never persisted; they end when the
//! page is closed or after a period of inactivity.
//!
//! # Architecture
//!
//! - [`Session`]: one mounted widget
//! - [`SessionStore`]: thread-safe store for all mounted widgets
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dr_hiro::chat::{SessionState, Theme};
//! use dr_hiro::dispatch::DispatchPolicy;
//! use dr_hiro::reply::SimulatedReply;
//! use dr_hiro::session::SessionStore;
//!
//! let store = SessionStore::new(Arc::new(SimulatedReply::default()), DispatchPolicy::default());
//! let session = store.create(SessionState::default());
//! session.dispatcher().toggle_theme();
//!
//! let snapshot = store.get(session.id()).unwrap().dispatcher().snapshot();
//! assert_eq!(snapshot.state.theme(), Theme::Dark);
//! ```

mod store;

pub use store::{DEFAULT_IDLE_TIMEOUT, Session, SessionStore};
