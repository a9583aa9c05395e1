//! Chat message list component.

use leptos::prelude::*;

use crate::chat::ChatMessage;
use crate::ui::palette::Palette;

/// The chat log, oldest first, followed by the typing indicator while a
/// reply is pending.
#[component]
pub fn MessageList(messages: Vec<ChatMessage>, typing: bool, palette: Palette) -> impl IntoView {
    let classes = format!("flex-1 overflow-auto p-4 {}", palette.main);

    view! {
        <main
            id="chat-messages"
            class=classes
            aria-live="polite"
            aria-label="Chat messages"
        >
            {messages
                .into_iter()
                .map(|message| view! { <MessageBubble message=message palette=palette/> })
                .collect_view()}
            {typing.then(|| view! { <TypingIndicator palette=palette/> })}
        </main>
    }
}

/// One message. User messages sit on the right, DR HIRO's on the left.
#[component]
pub fn MessageBubble(message: ChatMessage, palette: Palette) -> impl IntoView {
    let (align, bubble) = if message.is_from_user() {
        ("text-right", palette.user_bubble)
    } else {
        ("text-left", palette.bot_bubble)
    };

    view! {
        <div
            class=format!("mb-4 {align}")
            data-message-id=message.id().to_string()
            data-sender=message.sender().as_str()
        >
            <div class=format!("inline-block p-3 rounded-lg shadow-md {bubble}")>
                {message.text().to_string()}
            </div>
        </div>
    }
}

/// Three dots animated as a wave by `app.css`.
#[component]
pub fn TypingIndicator(palette: Palette) -> impl IntoView {
    view! {
        <div id="typing-indicator" class="text-left" role="status" aria-label="DR HIRO is typing">
            <div class=format!("inline-block p-3 rounded-lg shadow-md {}", palette.bot_bubble)>
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
            </div>
        </div>
    }
}
