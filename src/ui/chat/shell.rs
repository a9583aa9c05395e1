//! Chat widget root.

use leptos::prelude::*;

use super::{ChatHeader, InputForm, MessageList, Sidebar};
use crate::dispatch::Snapshot;
use crate::ui::palette::Palette;
use crate::ui::urls::SessionUrls;

/// Whole widget for one snapshot.
///
/// Descendants inherit `hx-target`/`hx-swap`, so any control that posts gets
/// the re-rendered widget back in place of this element. While a reply is
/// pending a hidden element long-polls for the next version.
#[component]
pub fn ChatWidget(session_id: String, snapshot: Snapshot) -> impl IntoView {
    let urls = SessionUrls::new(&session_id);
    let Snapshot { version, state, .. } = snapshot;
    let theme = state.theme();
    let palette = Palette::for_theme(theme);
    let classes = format!("flex h-screen w-full overflow-hidden {}", palette.root);
    let poll_url = state.is_typing().then(|| urls.widget(Some(version)));

    view! {
        <div
            id="chat-widget"
            class=classes
            data-theme=theme.as_str()
            data-version=version.to_string()
            hx-target="#chat-widget"
            hx-swap="outerHTML"
        >
            <Sidebar
                urls=urls.clone()
                open=state.sidebar_open()
                model=state.selected_model()
                avatar=state.avatar().clone()
                avatar_changed=state.avatar_changed()
                palette=palette
            />
            <div class="flex-1 flex flex-col min-w-0">
                <ChatHeader
                    urls=urls.clone()
                    sidebar_open=state.sidebar_open()
                    theme=theme
                    palette=palette
                />
                <MessageList
                    messages=state.messages().to_vec()
                    typing=state.is_typing()
                    palette=palette
                />
                <InputForm urls=urls draft=state.draft().to_string() palette=palette/>
            </div>
            {poll_url
                .map(|url| {
                    view! {
                        <div
                            id="chat-poll"
                            class="hidden"
                            aria-hidden="true"
                            hx-get=url
                            hx-trigger="load"
                        ></div>
                    }
                })}
        </div>
    }
}
