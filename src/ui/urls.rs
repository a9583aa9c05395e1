//! URLs of the per-session widget endpoints.

/// Builds the endpoint URLs for one mounted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUrls {
    base: String,
}

impl SessionUrls {
    #[must_use]
    pub fn new(session_id: &str) -> Self {
        Self {
            base: format!("/sessions/{session_id}"),
        }
    }

    /// Widget fragment; with `after`, waits for a version newer than it.
    #[must_use]
    pub fn widget(&self, after: Option<u64>) -> String {
        match after {
            Some(version) => format!("{}/widget?after={version}", self.base),
            None => format!("{}/widget", self.base),
        }
    }

    #[must_use]
    pub fn toggle_theme(&self) -> String {
        format!("{}/theme/toggle", self.base)
    }

    #[must_use]
    pub fn color_scheme(&self) -> String {
        format!("{}/color-scheme", self.base)
    }

    #[must_use]
    pub fn toggle_sidebar(&self) -> String {
        format!("{}/sidebar/toggle", self.base)
    }

    #[must_use]
    pub fn model(&self) -> String {
        format!("{}/model", self.base)
    }

    #[must_use]
    pub fn draft(&self) -> String {
        format!("{}/draft", self.base)
    }

    #[must_use]
    pub fn messages(&self) -> String {
        format!("{}/messages", self.base)
    }

    #[must_use]
    pub fn clear(&self) -> String {
        format!("{}/clear", self.base)
    }

    #[must_use]
    pub fn keepalive(&self) -> String {
        format!("{}/keepalive", self.base)
    }

    #[must_use]
    pub fn close(&self) -> String {
        format!("{}/close", self.base)
    }
}
