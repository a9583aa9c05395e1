//! Chat domain model.
//!
//! Plain data for a single mounted widget: the message log, the UI toggles,
//! and the rotating assistant avatar. Nothing here knows about HTTP, tasks or
//! rendering.
//!
//! - [`ChatMessage`]: immutable log entry
//! - [`SessionState`]: the state a widget renders from
//! - [`AvatarMetadata`]: avatar image plus mood

mod avatar;
mod message;
mod state;

pub use avatar::{AVATARS, AvatarMetadata, Mood};
pub use message::{ChatMessage, MessageId, MessageIds, Sender};
pub use state::{ColorScheme, Model, SessionState, Theme, UnknownModel};
