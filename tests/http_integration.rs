use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, BodyDataStream, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use dr_hiro::AppState;
use dr_hiro::config::AppConfig;
use dr_hiro::session::SessionStore;
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

fn setup() -> (Router, SessionStore) {
    let config = AppConfig::load_from_args(["dr-hiro"]).expect("config");
    let state = AppState::new(Arc::new(config));
    let sessions = state.sessions.clone();
    (dr_hiro::server::build_router(state), sessions)
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn snapshot(app: &Router, id: &str) -> Value {
    let response = get(app, &format!("/api/sessions/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Mount a widget and return its session id.
async fn mount(app: &Router) -> String {
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let marker = r#"data-session-id=""#;
    let start = html.find(marker).expect("session id on body") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_string()
}

/// Reads `snapshot` events off an SSE response body.
struct SnapshotEvents {
    body: BodyDataStream,
    buf: String,
}

impl SnapshotEvents {
    fn new(response: Response<Body>) -> Self {
        Self {
            body: response.into_body().into_data_stream(),
            buf: String::new(),
        }
    }

    /// Next event as `(id, payload)`, or `None` once the stream ends.
    async fn next(&mut self) -> Option<(u64, Value)> {
        loop {
            if let Some(end) = self.buf.find("\n\n") {
                let frame: String = self.buf.drain(..end + 2).collect();
                let mut id = None;
                let mut data = None;
                for line in frame.lines() {
                    if let Some(v) = line.strip_prefix("id:") {
                        id = v.trim().parse().ok();
                    } else if let Some(v) = line.strip_prefix("data:") {
                        data = serde_json::from_str(v.trim()).ok();
                    }
                }
                // keep-alive comments carry neither
                if let (Some(id), Some(data)) = (id, data) {
                    return Some((id, data));
                }
                continue;
            }
            let chunk = self.body.next().await?.ok()?;
            self.buf.push_str(std::str::from_utf8(&chunk).ok()?);
        }
    }
}

#[tokio::test]
async fn mount_renders_page_and_asks_for_color_scheme() {
    let (app, sessions) = setup();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("accept-ch").unwrap(),
        "Sec-CH-Prefers-Color-Scheme"
    );
    let html = body_text(response).await;
    assert!(html.contains(r#"id="chat-widget""#));
    assert!(html.contains(r#"data-color-scheme-hint="absent""#));
    assert!(!html.contains(r#"class="dark""#));
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn dark_hint_mounts_dark() {
    let (app, _) = setup();

    let response = app
        .clone()
        .oneshot(
            Request::get("/")
                .header("sec-ch-prefers-color-scheme", "\"dark\"")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains(r#"class="dark""#));
    assert!(html.contains(r#"data-color-scheme-hint="present""#));
}

#[tokio::test(start_paused = true)]
async fn submit_shows_typing_then_reply() {
    let (app, sessions) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/messages"), "message=++BTC%3F++").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("BTC?"));
    assert!(html.contains(r#"id="typing-indicator""#));

    let snap = snapshot(&app, &id).await;
    assert_eq!(snap["isTyping"], true);
    assert_eq!(snap["phase"], "awaiting-reply");
    assert_eq!(snap["draft"], "");
    assert_eq!(snap["messages"][0]["text"], "BTC?");
    assert_eq!(snap["messages"][0]["sender"], "user");

    sessions.get(&id).unwrap().dispatcher().until_idle().await;

    let snap = snapshot(&app, &id).await;
    assert_eq!(snap["messages"].as_array().unwrap().len(), 2);
    assert_eq!(snap["messages"][1]["sender"], "bot");
    assert_eq!(snap["isTyping"], false);
    assert_eq!(snap["avatarChanged"], true);

    let html = body_text(get(&app, &format!("/sessions/{id}/widget")).await).await;
    assert!(html.contains("This is a dummy reply from DR HIRO."));
    assert!(!html.contains("typing-indicator"));
    assert!(html.contains("avatar-change"));

    // the change animation plays once
    let html = body_text(get(&app, &format!("/sessions/{id}/widget")).await).await;
    assert!(!html.contains("avatar-change"));
    assert_eq!(snapshot(&app, &id).await["avatarChanged"], false);
}

#[tokio::test(start_paused = true)]
async fn long_poll_returns_when_the_reply_lands() {
    let (app, _) = setup();
    let id = mount(&app).await;

    post_form(&app, &format!("/sessions/{id}/messages"), "message=hi").await;
    let version = snapshot(&app, &id).await["version"].as_u64().unwrap();

    let html = body_text(get(&app, &format!("/sessions/{id}/widget?after={version}")).await).await;
    assert!(html.contains("This is a dummy reply from DR HIRO."));
    assert!(!html.contains("chat-poll"));
}

#[tokio::test]
async fn blank_submit_changes_nothing() {
    let (app, _) = setup();
    let id = mount(&app).await;
    let before = snapshot(&app, &id).await["version"].as_u64().unwrap();

    let response = post_form(&app, &format!("/sessions/{id}/messages"), "message=+%09+").await;
    assert_eq!(response.status(), StatusCode::OK);

    let snap = snapshot(&app, &id).await;
    assert!(snap["messages"].as_array().unwrap().is_empty());
    assert_eq!(snap["isTyping"], false);
    assert_eq!(snap["version"].as_u64().unwrap(), before);
}

#[tokio::test]
async fn draft_is_recorded_without_a_swap() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/draft"), "message=to+the+moon").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(snapshot(&app, &id).await["draft"], "to the moon");
}

#[tokio::test]
async fn theme_toggle_fires_theme_changed() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/theme/toggle"), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let trigger: Value =
        serde_json::from_str(response.headers().get("hx-trigger").unwrap().to_str().unwrap())
            .unwrap();
    assert_eq!(trigger["themeChanged"]["theme"], "dark");
    assert!(body_text(response).await.contains(r#"data-theme="dark""#));

    let response = post_form(&app, &format!("/sessions/{id}/theme/toggle"), "").await;
    assert!(body_text(response).await.contains(r#"data-theme="light""#));
}

#[tokio::test]
async fn reported_color_scheme_is_applied() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/color-scheme"), "scheme=dark").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(snapshot(&app, &id).await["theme"], "dark");

    let response = post_form(&app, &format!("/sessions/{id}/color-scheme"), "scheme=sepia").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn sidebar_toggle_round_trips() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let html = body_text(post_form(&app, &format!("/sessions/{id}/sidebar/toggle"), "").await).await;
    assert!(html.contains(r#"aria-label="Open sidebar""#));
    assert_eq!(snapshot(&app, &id).await["sidebarOpen"], false);

    post_form(&app, &format!("/sessions/{id}/sidebar/toggle"), "").await;
    assert_eq!(snapshot(&app, &id).await["sidebarOpen"], true);
}

#[tokio::test]
async fn model_selection_is_validated() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/model"), "model=claude").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(snapshot(&app, &id).await["selectedModel"], "claude");

    let response = post_form(&app, &format!("/sessions/{id}/model"), "model=llama").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_text(response).await, "Unknown model: llama");
    assert_eq!(snapshot(&app, &id).await["selectedModel"], "claude");
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_the_pending_reply() {
    let (app, sessions) = setup();
    let id = mount(&app).await;

    post_form(&app, &format!("/sessions/{id}/messages"), "message=hello").await;
    let html = body_text(post_form(&app, &format!("/sessions/{id}/clear"), "").await).await;
    assert!(!html.contains("data-sender"));
    assert!(!html.contains("typing-indicator"));

    sessions.get(&id).unwrap().dispatcher().until_idle().await;
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;

    let snap = snapshot(&app, &id).await;
    assert!(snap["messages"].as_array().unwrap().is_empty());
    assert_eq!(snap["pending"], 0);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (app, _) = setup();

    assert_eq!(
        get(&app, "/sessions/nope/widget").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        post_form(&app, "/sessions/nope/messages", "message=hi")
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        get(&app, "/api/sessions/nope").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn close_unmounts_the_session() {
    let (app, sessions) = setup();
    let id = mount(&app).await;

    let response = post_form(&app, &format!("/sessions/{id}/close"), "").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(sessions.is_empty());
    assert_eq!(
        get(&app, &format!("/sessions/{id}/widget")).await.status(),
        StatusCode::NOT_FOUND
    );

    // closing twice is harmless
    let response = post_form(&app, &format!("/sessions/{id}/close"), "").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn sessions_are_independent() {
    let (app, _) = setup();
    let a = mount(&app).await;
    let b = mount(&app).await;
    assert_ne!(a, b);

    post_form(&app, &format!("/sessions/{a}/theme/toggle"), "").await;
    assert_eq!(snapshot(&app, &a).await["theme"], "dark");
    assert_eq!(snapshot(&app, &b).await["theme"], "light");
}

#[tokio::test]
async fn keepalive_keeps_an_open_page_from_being_swept() {
    let (app, sessions) = setup();
    let open = mount(&app).await;
    let abandoned = mount(&app).await;

    tokio::time::sleep(Duration::from_millis(60)).await;
    let response = post_form(&app, &format!("/sessions/{open}/keepalive"), "").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(sessions.cleanup_expired_with_timeout(Duration::from_millis(40)), 1);
    assert_eq!(sessions.list_ids(), vec![open.clone()]);

    // a swept session answers 404, which the page turns into a reload
    let response = post_form(&app, &format!("/sessions/{abandoned}/keepalive"), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_stream_snapshots_until_close() {
    let (app, _) = setup();
    let id = mount(&app).await;

    let response = get(&app, &format!("/api/sessions/{id}/events")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
    let mut events = SnapshotEvents::new(response);

    let (first, snap) = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .unwrap()
        .unwrap();
    assert!(snap["messages"].as_array().unwrap().is_empty());

    post_form(&app, &format!("/sessions/{id}/messages"), "message=hi").await;
    let (next, snap) = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .unwrap()
        .unwrap();
    assert!(next > first);
    assert_eq!(snap["messages"][0]["text"], "hi");
    assert_eq!(snap["isTyping"], true);

    post_form(&app, &format!("/sessions/{id}/close"), "").await;
    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        while events.next().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok(), "event stream should end once the session closes");
}
