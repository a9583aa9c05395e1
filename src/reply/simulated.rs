//! Fixed-latency placeholder backend.

use std::time::Duration;

use async_trait::async_trait;

use super::{BotReply, ReplyBackend, ReplyError, ReplyRequest};

/// Default simulated round trip.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Default placeholder reply.
pub const DEFAULT_REPLY_TEXT: &str = "This is a dummy reply from DR HIRO.";

/// Backend that waits a fixed latency and returns fixed text.
#[derive(Debug, Clone)]
pub struct SimulatedReply {
    latency: Duration,
    text: String,
}

impl Default for SimulatedReply {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, DEFAULT_REPLY_TEXT)
    }
}

impl SimulatedReply {
    pub fn new(latency: Duration, text: impl Into<String>) -> Self {
        Self {
            latency,
            text: text.into(),
        }
    }
}

#[async_trait]
impl ReplyBackend for SimulatedReply {
    async fn reply(&self, request: ReplyRequest) -> Result<BotReply, ReplyError> {
        tracing::debug!(
            name: "reply.simulated",
            model = %request.model,
            latency = ?self.latency,
            "Simulating reply"
        );
        tokio::time::sleep(self.latency).await;
        Ok(BotReply::text(self.text.clone()))
    }
}
