//! Full page document.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::dispatch::Snapshot;
use crate::ui::chat::ChatWidget;
use crate::ui::urls::SessionUrls;

/// Script that wires the theme class, color-scheme fallback, input clearing
/// and the close beacon.
pub const WIDGET_SCRIPT: &str = "/static/widget.js";

/// Asset URLs and timings the page shell needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAssets {
    pub htmx_src: String,
    pub stylesheet: String,
    /// Seconds between keep-alive reports.
    pub keepalive_secs: u64,
}

impl From<&AppConfig> for PageAssets {
    fn from(config: &AppConfig) -> Self {
        Self {
            htmx_src: config.ui.htmx_src.clone(),
            stylesheet: config.ui.stylesheet.clone(),
            keepalive_secs: config.chat.keepalive_interval().as_secs(),
        }
    }
}

/// Document shell around the widget.
///
/// `color_scheme_known` records whether the request carried a color-scheme
/// hint; when it did not, `widget.js` reads `prefers-color-scheme` and
/// reports it to `data-color-scheme-url`.
#[component]
pub fn Page(
    session_id: String,
    snapshot: Snapshot,
    assets: PageAssets,
    #[prop(default = false)] color_scheme_known: bool,
) -> impl IntoView {
    let urls = SessionUrls::new(&session_id);
    let body_session_id = session_id.clone();
    let html_class = snapshot.state.theme().is_dark().then_some("dark");
    let hint = if color_scheme_known { "present" } else { "absent" };
    let keepalive_trigger = format!("every {}s", assets.keepalive_secs);

    view! {
        <!doctype html>
        <html lang="en" class=html_class>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="DR HIRO, your cryptocurrency chatbot"/>
                <title>"DR HIRO"</title>
                <script src=assets.htmx_src></script>
                <script defer src=WIDGET_SCRIPT></script>
                <link rel="stylesheet" href=assets.stylesheet/>
            </head>
            <body
                class="antialiased"
                data-session-id=body_session_id
                data-close-url=urls.close()
                data-color-scheme-url=urls.color_scheme()
                data-color-scheme-hint=hint
            >
                <ChatWidget session_id=session_id snapshot=snapshot/>
                <div
                    id="chat-keepalive"
                    class="hidden"
                    aria-hidden="true"
                    hx-post=urls.keepalive()
                    hx-trigger=keepalive_trigger
                    hx-swap="none"
                ></div>
            </body>
        </html>
    }
}
