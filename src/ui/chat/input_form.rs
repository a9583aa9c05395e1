//! Chat input form component.

use leptos::prelude::*;

use super::copy::PLACEHOLDER;
use crate::ui::components::{Button, SendIcon, TextInput};
use crate::ui::palette::Palette;
use crate::ui::urls::SessionUrls;

/// Message field and send button.
///
/// The field reports its value to the draft endpoint as the user types and is
/// preserved across widget swaps, so a re-render never drops keystrokes.
/// Submitting posts the same `message` field to the messages endpoint.
#[component]
pub fn InputForm(urls: SessionUrls, draft: String, palette: Palette) -> impl IntoView {
    let can_submit = !draft.trim().is_empty();
    let footer_classes = format!("p-4 border-t {}", palette.panel);

    view! {
        <footer class=footer_classes>
            <form id="chat-form" class="flex gap-2" hx-post=urls.messages()>
                <TextInput
                    id="chat-input"
                    name="message"
                    placeholder=PLACEHOLDER
                    value=draft
                    hx_post=urls.draft()
                    class=format!("flex-1 {}", palette.field)
                />
                <Button button_type="submit" disabled=!can_submit class=palette.send>
                    <SendIcon class="h-4 w-4 mr-2"/>
                    "Send"
                </Button>
            </form>
        </footer>
    }
}
