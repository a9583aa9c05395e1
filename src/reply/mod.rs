//! Reply backends.
//!
//! The dispatcher asks a [`ReplyBackend`] for every bot reply. The exchange
//! has the shape a real HTTP backend would use:
//!
//! ```text
//! { "message": "BTC price?" }
//!   -> { "reply": "...", "avatarMetadata": { "imageUrl": "...", "mood": "happy" } }
//! ```
//!
//! Only [`SimulatedReply`] ships: a fixed latency followed by fixed text.

mod simulated;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::{AvatarMetadata, Model};

pub use simulated::{DEFAULT_LATENCY, DEFAULT_REPLY_TEXT, SimulatedReply};

/// Request sent to a reply backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Trimmed user message.
    pub message: String,
    /// Model selected when the message was sent.
    #[serde(skip)]
    pub model: Model,
}

/// Reply produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotReply {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_metadata: Option<AvatarMetadata>,
}

impl BotReply {
    /// Reply with text only; the widget rotates to its next avatar.
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            avatar_metadata: None,
        }
    }
}

/// Errors a reply backend may report.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    /// The backend could not be reached or refused the request.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of bot replies.
///
/// Implementations must be cheap to share; the dispatcher holds one behind
/// an `Arc` and calls it from spawned tasks.
#[async_trait]
pub trait ReplyBackend: Send + Sync + std::fmt::Debug {
    /// Produce the reply to one user message.
    async fn reply(&self, request: ReplyRequest) -> Result<BotReply, ReplyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Mood;

    #[test]
    fn reply_wire_shape_is_camel_case() {
        let json = serde_json::json!({
            "reply": "Bitcoin is up.",
            "avatarMetadata": { "imageUrl": "https://example.com/a.png", "mood": "happy" }
        });
        let reply: BotReply = serde_json::from_value(json).unwrap();
        assert_eq!(reply.reply, "Bitcoin is up.");
        assert_eq!(reply.avatar_metadata.unwrap().mood, Mood::Happy);
    }

    #[test]
    fn avatar_metadata_is_optional() {
        let reply: BotReply = serde_json::from_str(r#"{"reply":"ok"}"#).unwrap();
        assert!(reply.avatar_metadata.is_none());
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"reply":"ok"}"#);
    }

    #[test]
    fn request_carries_only_the_message() {
        let req = ReplyRequest {
            message: "hi".into(),
            model: Model::Claude,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hi"}"#);
    }
}
