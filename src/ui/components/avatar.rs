//! Assistant avatar.

use leptos::prelude::*;

use crate::chat::AvatarMetadata;

/// Round avatar with a mood-colored border.
///
/// `animate` plays the change animation once; it is set right after a
/// reply switched the avatar.
///
/// # Example
///
/// ```rust,ignore
/// view! { <Avatar avatar=state.avatar().clone() animate=state.avatar_changed() /> }
/// ```
#[component]
pub fn Avatar(
    /// Image and mood to show.
    avatar: AvatarMetadata,
    /// Whether to play the change animation.
    #[prop(default = false)]
    animate: bool,
    /// Alt text for the image.
    #[prop(default = "DR HIRO Avatar")]
    alt: &'static str,
) -> impl IntoView {
    let classes = format!(
        "w-40 h-40 mx-auto rounded-full border-4 {} {} shadow-lg hidden sm:block",
        avatar.mood.border_classes(),
        if animate { "avatar-change" } else { "" },
    );

    view! {
        <img
            id="assistant-avatar"
            src=avatar.image_url
            alt=alt
            class=classes
            data-mood=avatar.mood.to_string()
        />
    }
}
