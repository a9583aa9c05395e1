//! HTTP surface of the widget.
//!
//! `GET /` mounts a session and returns the page. Every widget control posts
//! to a `/sessions/{id}/...` endpoint that applies one state transition and
//! answers with the re-rendered `#chat-widget` fragment.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::AppState;
use crate::chat::{ColorScheme, Model, SessionState, Theme};
use crate::config::AppConfig;
use crate::dispatch::Snapshot;
use crate::error::{ChatError, Result};
use crate::session::{Session, SessionStore};
use crate::ui::{self, app::PageAssets};

/// Client hint carrying the host's preferred color scheme.
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

/// HTMX event fired after the theme changes, so the page can restyle its root.
pub const THEME_CHANGED_EVENT: &str = "themeChanged";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "chat.config.loaded",
        reply_latency = ?config.chat.reply_latency(),
        overlap = ?config.chat.overlap,
        on_clear = ?config.chat.on_clear,
        "Chat configuration loaded"
    );

    let state = AppState::new(Arc::clone(&config));
    let shutdown = CancellationToken::new();

    spawn_session_sweeper(
        state.sessions.clone(),
        config.chat.session_idle_timeout(),
        shutdown.clone(),
    );

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(index))
        .route("/sessions/{id}/widget", get(widget))
        .route("/sessions/{id}/theme/toggle", post(toggle_theme))
        .route("/sessions/{id}/color-scheme", post(color_scheme))
        .route("/sessions/{id}/sidebar/toggle", post(toggle_sidebar))
        .route("/sessions/{id}/model", post(select_model))
        .route("/sessions/{id}/draft", post(update_draft))
        .route("/sessions/{id}/messages", post(send_message))
        .route("/sessions/{id}/clear", post(clear_chat))
        .route("/sessions/{id}/close", post(close_session))
        .route("/sessions/{id}/keepalive", post(keep_alive))
        .route("/api/sessions/{id}", get(api_snapshot))
        .route("/api/sessions/{id}/events", get(api_events))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(name: "server.signal_failed", error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!(name: "server.shutdown", "Shutting down");
    shutdown.cancel();
}

/// Periodically close sessions whose page went away without a close beacon.
fn spawn_session_sweeper(sessions: SessionStore, idle: Duration, shutdown: CancellationToken) {
    let period = (idle / 4).clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = sessions.cleanup_expired_with_timeout(idle);
                    if removed > 0 {
                        info!(
                            name: "session.swept",
                            removed,
                            remaining = sessions.len(),
                            "Idle sessions closed"
                        );
                    }
                }
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Page and widget handlers
// ─────────────────────────────────────────────────────────────────────────────

fn lookup(state: &AppState, id: &str) -> Result<Session> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ChatError::SessionNotFound(id.to_string()))
}

fn widget_html(session: &Session, snapshot: Snapshot) -> Html<String> {
    Html(ui::render_widget(session.id(), snapshot))
}

fn current_widget(session: &Session) -> Html<String> {
    widget_html(session, session.dispatcher().snapshot())
}

/// Widget response plus the trigger that restyles the document root.
fn with_theme_trigger(session: &Session, theme: Theme) -> Response {
    let mut trigger = serde_json::Map::new();
    trigger.insert(
        THEME_CHANGED_EVENT.to_string(),
        serde_json::json!({ "theme": theme.as_str() }),
    );
    (
        [("HX-Trigger", serde_json::Value::Object(trigger).to_string())],
        current_widget(session),
    )
        .into_response()
}

/// GET / - Mount a widget session and render the page.
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let preference = headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(ColorScheme::parse_hint);

    let session = state.sessions.create(SessionState::mounted(preference));
    debug!(
        name: "session.mounted",
        session_id = %session.id(),
        color_scheme = ?preference,
        "Widget mounted"
    );

    let html = ui::render_page(
        session.id(),
        session.dispatcher().snapshot(),
        PageAssets::from(state.config.as_ref()),
        preference.is_some(),
    );

    (
        [
            ("Accept-CH", COLOR_SCHEME_HINT),
            ("Critical-CH", COLOR_SCHEME_HINT),
            ("Vary", COLOR_SCHEME_HINT),
            ("Cache-Control", "no-store"),
        ],
        Html(html),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct WidgetQuery {
    /// Version the client already shows; when set, wait for a newer one.
    after: Option<u64>,
}

/// GET /sessions/{id}/widget - Current widget, optionally long-polled.
async fn widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WidgetQuery>,
) -> Result<Html<String>> {
    let session = lookup(&state, &id)?;
    let snapshot = match query.after {
        Some(seen) => {
            session
                .dispatcher()
                .wait_for_change(seen, state.config.chat.poll_timeout())
                .await
        }
        None => session.dispatcher().render_snapshot(),
    };
    Ok(widget_html(&session, snapshot))
}

/// POST /sessions/{id}/theme/toggle
async fn toggle_theme(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let session = lookup(&state, &id)?;
    let theme = session.dispatcher().toggle_theme();
    Ok(with_theme_trigger(&session, theme))
}

#[derive(Debug, Deserialize)]
struct ColorSchemeForm {
    scheme: String,
}

/// POST /sessions/{id}/color-scheme - Ambient preference reported by the page.
async fn color_scheme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ColorSchemeForm>,
) -> Result<Response> {
    let session = lookup(&state, &id)?;
    let scheme = ColorScheme::parse_hint(&form.scheme)
        .ok_or_else(|| ChatError::UnknownColorScheme(form.scheme.clone()))?;
    let theme = session.dispatcher().apply_color_scheme(scheme);
    Ok(with_theme_trigger(&session, theme))
}

/// POST /sessions/{id}/sidebar/toggle
async fn toggle_sidebar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let session = lookup(&state, &id)?;
    session.dispatcher().toggle_sidebar();
    Ok(current_widget(&session))
}

#[derive(Debug, Deserialize)]
struct ModelForm {
    model: String,
}

/// POST /sessions/{id}/model
async fn select_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ModelForm>,
) -> Result<Html<String>> {
    let session = lookup(&state, &id)?;
    let model: Model = form.model.parse()?;
    session.dispatcher().set_model(model);
    Ok(current_widget(&session))
}

#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    message: String,
}

/// POST /sessions/{id}/draft - Record the draft; nothing to swap.
async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<StatusCode> {
    let session = lookup(&state, &id)?;
    session.dispatcher().set_draft(form.message);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/{id}/messages - Submit; blank input changes nothing.
async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>> {
    let session = lookup(&state, &id)?;
    if session.dispatcher().send(form.message).is_none() {
        debug!(name: "dispatch.blank_ignored", session_id = %id, "Blank submission ignored");
    }
    Ok(current_widget(&session))
}

/// POST /sessions/{id}/clear
async fn clear_chat(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let session = lookup(&state, &id)?;
    session.dispatcher().clear_messages();
    Ok(current_widget(&session))
}

/// POST /sessions/{id}/keepalive - The page is still open; nothing to swap.
async fn keep_alive(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    lookup(&state, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/{id}/close - Unmount; idempotent.
async fn close_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.sessions.remove(&id);
    StatusCode::NO_CONTENT
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON API
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/sessions/{id} - Snapshot as JSON.
async fn api_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>> {
    let session = lookup(&state, &id)?;
    Ok(Json(session.dispatcher().snapshot()))
}

/// GET /api/sessions/{id}/events - One `snapshot` event per version until
/// the session closes.
async fn api_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>> + Send>> {
    let session = lookup(&state, &id)?;
    let dispatcher = session.dispatcher().clone();
    let closing = dispatcher.clone();

    let stream = WatchStream::new(dispatcher.subscribe())
        .map(move |_| {
            let snapshot = dispatcher.snapshot();
            let json = serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string());
            Ok(Event::default()
                .event("snapshot")
                .id(snapshot.version.to_string())
                .data(json))
        })
        .take_until(async move { closing.closed().await });

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
