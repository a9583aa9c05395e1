//! Server-rendered widget markup.
//!
//! Leptos components are rendered to strings on the server; HTMX attributes
//! on the markup drive every interaction.
//!
//! # Structure
//!
//! - [`app`]: full page document
//! - [`chat`]: widget layout (sidebar, header, message list, input)
//! - [`components`]: reusable ShadCN-style components
//! - [`palette`]: theme-dependent class sets
//! - [`urls`]: per-session endpoint URLs

pub mod app;
pub mod chat;
pub mod components;
pub mod palette;
pub mod urls;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;
use leptos::tachys::view::RenderHtml;

use crate::dispatch::Snapshot;
use app::{Page, PageAssets};
use chat::ChatWidget;

fn render<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| build().into_view().to_html())
}

/// Render the full page for a freshly mounted session.
#[must_use]
pub fn render_page(
    session_id: &str,
    snapshot: Snapshot,
    assets: PageAssets,
    color_scheme_known: bool,
) -> String {
    let session_id = session_id.to_string();
    render(move || {
        view! {
            <Page
                session_id=session_id
                snapshot=snapshot
                assets=assets
                color_scheme_known=color_scheme_known
            />
        }
    })
}

/// Render the `#chat-widget` fragment swapped in by HTMX.
#[must_use]
pub fn render_widget(session_id: &str, snapshot: Snapshot) -> String {
    let session_id = session_id.to_string();
    render(move || view! { <ChatWidget session_id=session_id snapshot=snapshot/> })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chat::{Model, SessionState, Theme};
    use crate::dispatch::{DispatchPolicy, Dispatcher};
    use crate::reply::SimulatedReply;

    fn assets() -> PageAssets {
        PageAssets {
            htmx_src: "/static/vendor/htmx.min.js".into(),
            stylesheet: "/static/app.css".into(),
            keepalive_secs: 60,
        }
    }

    fn snapshot_of(state: SessionState) -> Snapshot {
        Dispatcher::new(
            state,
            Arc::new(SimulatedReply::default()),
            DispatchPolicy::default(),
        )
        .snapshot()
    }

    #[tokio::test]
    async fn fresh_widget_has_every_control() {
        let html = render_widget("s1", snapshot_of(SessionState::default()));

        assert!(html.contains(r#"id="chat-widget""#));
        assert!(html.contains(chat::TITLE));
        assert!(html.contains("About DR HIRO"));
        assert!(html.contains("Tips for using Dr. Hiro"));
        assert!(html.contains("For historical data, specify a date in your query."));
        assert!(html.contains(
            "DR HIRO is your expert cryptocurrency assistant, providing up-to-date information \
             on prices, trends, and news."
        ));
        assert!(html.contains("Clear Chat"));
        assert!(html.contains(r#"hx-post="/sessions/s1/messages""#));
        assert!(html.contains(r#"hx-post="/sessions/s1/theme/toggle""#));
        assert!(html.contains(chat::PLACEHOLDER));
        assert!(html.contains("w-64 sm:w-72 md:w-80"));
        assert!(!html.contains("typing-indicator"));
        assert!(!html.contains("chat-poll"));
    }

    fn send_button(html: &str) -> &str {
        let start = html.rfind(r#"<button type="submit""#).unwrap();
        let end = start + html[start..].find('>').unwrap();
        &html[start..end]
    }

    #[tokio::test]
    async fn send_is_disabled_for_a_blank_draft() {
        let html = render_widget("s1", snapshot_of(SessionState::default()));
        assert!(send_button(&html).contains("\" disabled"));

        let mut state = SessionState::default();
        state.set_draft("hello");
        let html = render_widget("s1", snapshot_of(state));
        assert!(html.contains(r#"value="hello""#));
        assert!(!send_button(&html).contains("\" disabled"));
    }

    #[tokio::test]
    async fn messages_render_aligned_by_sender_and_escaped() {
        let mut state = SessionState::default();
        state.push_user("<b>BTC?</b>");
        state.push_bot("Up only.");
        let html = render_widget("s1", snapshot_of(state));

        assert!(html.contains(r#"data-sender="user""#));
        assert!(html.contains(r#"data-sender="bot""#));
        assert!(html.contains("&lt;b&gt;BTC?&lt;/b&gt;"));
        assert!(!html.contains("<b>BTC?</b>"));
        let user_at = html.find("BTC?").unwrap();
        let bot_at = html.find("Up only.").unwrap();
        assert!(user_at < bot_at);
    }

    #[tokio::test]
    async fn typing_shows_indicator_and_long_poll() {
        let mut state = SessionState::default();
        state.set_typing(true);
        let snapshot = snapshot_of(state);
        let version = snapshot.version;
        let html = render_widget("s1", snapshot);

        assert!(html.contains(r#"id="typing-indicator""#));
        assert_eq!(html.matches("typing-dot").count(), 3);
        assert!(html.contains(&format!(r#"hx-get="/sessions/s1/widget?after={version}""#)));
        assert!(html.contains(r#"hx-trigger="load""#));
    }

    #[tokio::test]
    async fn closed_sidebar_collapses_and_offers_reopen() {
        let mut state = SessionState::default();
        state.toggle_sidebar();
        let html = render_widget("s1", snapshot_of(state));

        assert!(html.contains("w-0"));
        assert!(html.contains(r#"aria-label="Open sidebar""#));
        assert!(!html.contains("w-64 sm:w-72 md:w-80"));
    }

    #[tokio::test]
    async fn selected_model_is_marked() {
        let mut state = SessionState::default();
        state.set_model(Model::Claude);
        let html = render_widget("s1", snapshot_of(state));

        assert!(html.contains(r#"value="claude" selected"#));
        assert!(!html.contains(r#"value="gpt" selected"#));
    }

    #[tokio::test]
    async fn dark_page_sets_root_class_and_palette() {
        let html = render_page(
            "s1",
            snapshot_of(SessionState::new(Theme::Dark)),
            assets(),
            true,
        );

        assert!(html.contains(r#"class="dark""#));
        assert!(html.contains("bg-[#121212]"));
        assert!(html.contains(r#"data-color-scheme-hint="present""#));
        assert!(html.contains(r#"src="/static/vendor/htmx.min.js""#));
        assert!(html.contains(app::WIDGET_SCRIPT));
    }

    #[tokio::test]
    async fn light_page_has_no_dark_class() {
        let html = render_page("s1", snapshot_of(SessionState::default()), assets(), false);

        assert!(!html.contains(r#"class="dark""#));
        assert!(html.contains(r#"data-color-scheme-hint="absent""#));
        assert!(html.contains(r#"data-close-url="/sessions/s1/close""#));
        assert!(html.contains(r#"hx-post="/sessions/s1/keepalive""#));
        assert!(html.contains(r#"hx-trigger="every 60s""#));
    }

    #[tokio::test]
    async fn changed_avatar_animates() {
        let mut state = SessionState::default();
        state.rotate_avatar(None);
        let html = render_widget("s1", snapshot_of(state));
        assert!(html.contains("avatar-change"));
        assert!(html.contains(r#"data-mood="happy""#));
    }
}
