//! Widget session state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::avatar::AvatarMetadata;
use super::message::{ChatMessage, MessageId, MessageIds};

/// Visual theme of the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Color scheme preference reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// Parse a `Sec-CH-Prefers-Color-Scheme` value or a plain `light`/`dark`.
    ///
    /// Client hints are structured-field strings, so surrounding quotes are
    /// accepted.
    #[must_use]
    pub fn parse_hint(value: &str) -> Option<Self> {
        let value = value.trim().trim_matches('"');
        if value.eq_ignore_ascii_case("dark") {
            Some(Self::Dark)
        } else if value.eq_ignore_ascii_case("light") {
            Some(Self::Light)
        } else {
            None
        }
    }
}

impl From<ColorScheme> for Theme {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::Light,
            ColorScheme::Dark => Self::Dark,
        }
    }
}

/// Model offered in the sidebar selector.
///
/// The choice is recorded but does not influence replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt")]
    Gpt,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "claude")]
    Claude,
}

impl Model {
    /// Every selectable model, in display order.
    pub const ALL: [Self; 3] = [Self::Gpt, Self::Gpt4, Self::Claude];

    /// Wire value used by forms and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::Gpt4 => "gpt-4",
            Self::Claude => "claude",
        }
    }

    /// Human label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gpt => "GPT",
            Self::Gpt4 => "GPT-4",
            Self::Claude => "Claude",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a model name is not one of [`Model::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// Everything one mounted widget renders from.
///
/// Mutators here are plain field updates; sequencing of replies lives in the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    theme: Theme,
    sidebar_open: bool,
    selected_model: Model,
    draft: String,
    messages: Vec<ChatMessage>,
    is_typing: bool,
    avatar: AvatarMetadata,
    avatar_changed: bool,
    #[serde(skip)]
    ids: MessageIds,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl SessionState {
    /// Fresh state for a newly mounted widget.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            sidebar_open: true,
            selected_model: Model::default(),
            draft: String::new(),
            messages: Vec::new(),
            is_typing: false,
            avatar: AvatarMetadata::initial(),
            avatar_changed: false,
            ids: MessageIds::default(),
        }
    }

    /// Initial state honoring the host's color-scheme preference, if known.
    #[must_use]
    pub fn mounted(preference: Option<ColorScheme>) -> Self {
        Self::new(preference.map(Theme::from).unwrap_or_default())
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub fn selected_model(&self) -> Model {
        self.selected_model
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    #[must_use]
    pub fn avatar(&self) -> &AvatarMetadata {
        &self.avatar
    }

    /// Whether the avatar changed since the last user action.
    #[must_use]
    pub fn avatar_changed(&self) -> bool {
        self.avatar_changed
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Adopt the host's ambient color scheme.
    pub fn apply_color_scheme(&mut self, scheme: ColorScheme) {
        self.theme = scheme.into();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_model(&mut self, model: Model) {
        self.selected_model = model;
    }

    /// Store the draft verbatim.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Empty the message log. Pending replies are not touched here.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Take the trimmed draft for sending, clearing it.
    ///
    /// Returns `None` and leaves the draft untouched if it is blank.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.draft.clear();
        Some(text)
    }

    /// Append a user message and return its id.
    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.ids.next();
        self.messages.push(ChatMessage::user(id, text));
        id
    }

    /// Append a bot message and return its id.
    pub fn push_bot(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.ids.next();
        self.messages.push(ChatMessage::bot(id, text));
        id
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.is_typing = typing;
    }

    /// Switch avatar after a reply: the supplied one, or the next built-in.
    pub fn rotate_avatar(&mut self, supplied: Option<AvatarMetadata>) {
        self.avatar = supplied.unwrap_or_else(|| self.avatar.next());
        self.avatar_changed = true;
    }

    /// Mark the avatar change animation as played.
    pub fn settle_avatar(&mut self) {
        self.avatar_changed = false;
    }
}
