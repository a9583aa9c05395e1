//! Assistant avatar and mood.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mood shown by the avatar border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Happy,
    Thinking,
}

impl Mood {
    /// Border classes for this mood.
    #[must_use]
    pub fn border_classes(self) -> &'static str {
        match self {
            Self::Neutral => "border-gray-400",
            Self::Happy => "border-green-400",
            Self::Thinking => "border-blue-400",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Thinking => "thinking",
        };
        f.write_str(s)
    }
}

/// Avatar image plus mood, as carried by a bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarMetadata {
    pub image_url: String,
    pub mood: Mood,
}

impl AvatarMetadata {
    fn builtin(image_url: &str, mood: Mood) -> Self {
        Self {
            image_url: image_url.to_string(),
            mood,
        }
    }

    /// The avatar shown when a session is mounted.
    #[must_use]
    pub fn initial() -> Self {
        let (url, mood) = AVATARS[0];
        Self::builtin(url, mood)
    }

    /// The built-in avatar after this one, wrapping around.
    ///
    /// An avatar that is not one of the built-ins is followed by the first one.
    #[must_use]
    pub fn next(&self) -> Self {
        let index = AVATARS
            .iter()
            .position(|(url, _)| *url == self.image_url)
            .map_or(0, |i| (i + 1) % AVATARS.len());
        let (url, mood) = AVATARS[index];
        Self::builtin(url, mood)
    }
}

impl Default for AvatarMetadata {
    fn default() -> Self {
        Self::initial()
    }
}

/// Built-in avatar rotation.
pub const AVATARS: [(&str, Mood); 3] = [
    (
        "https://images.unsplash.com/photo-1667745009296-fae4f97bdf7d?w=600&auto=format&fit=crop&q=60",
        Mood::Neutral,
    ),
    (
        "https://images.unsplash.com/photo-1640143662254-689f48d1ac99?w=600&auto=format&fit=crop&q=60",
        Mood::Happy,
    ),
    (
        "https://images.unsplash.com/photo-1659710173823-b4362e0ab9c7?w=600&auto=format&fit=crop&q=60",
        Mood::Thinking,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_after_the_last_avatar() {
        let first = AvatarMetadata::initial();
        let second = first.next();
        let third = second.next();
        assert_eq!(second.mood, Mood::Happy);
        assert_eq!(third.mood, Mood::Thinking);
        assert_eq!(third.next(), first);
    }

    #[test]
    fn unknown_avatar_restarts_rotation() {
        let custom = AvatarMetadata {
            image_url: "https://example.com/hiro.png".into(),
            mood: Mood::Happy,
        };
        assert_eq!(custom.next(), AvatarMetadata::initial());
    }

    #[test]
    fn metadata_uses_camel_case_on_the_wire() {
        let json = serde_json::json!({ "imageUrl": "x.png", "mood": "thinking" });
        let avatar: AvatarMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(avatar.image_url, "x.png");
        assert_eq!(avatar.mood, Mood::Thinking);
    }
}
