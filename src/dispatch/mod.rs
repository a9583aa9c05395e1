//! Message dispatcher.
//!
//! Owns one [`SessionState`] and drives the reply lifecycle:
//!
//! ```text
//!            submit (non-blank)
//!   Idle ─────────────────────────▶ AwaitingReply
//!    ▲                                   │
//!    └──── last pending reply done ──────┘
//!          (appended, failed or cancelled)
//! ```
//!
//! Every user action locks the state once, mutates it, and bumps the session
//! version exactly once. Observers (the long-poll and SSE endpoints) watch the
//! version through a [`watch`] channel.
//!
//! Replies run as tokio tasks against a [`ReplyBackend`]. Each pending reply
//! is keyed by the id of the user message it answers and carries a
//! cancellation token, so clearing the chat or closing the session can
//! abandon it.

mod policy;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::chat::{ColorScheme, MessageId, Model, SessionState, Theme};
use crate::reply::{BotReply, ReplyBackend, ReplyError, ReplyRequest};

pub use policy::{ClearPolicy, DispatchPolicy, OverlapPolicy};

/// Dispatcher state-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No reply pending.
    Idle,
    /// At least one reply pending.
    AwaitingReply,
}

/// Point-in-time copy of a session, tagged with its version.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub phase: Phase,
    /// Number of replies still pending.
    pub pending: usize,
    #[serde(flatten)]
    pub state: SessionState,
}

/// Drives one session's state and replies.
///
/// Cloning is cheap; clones share the same session.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    core: Mutex<Core>,
    changes: watch::Sender<u64>,
    backend: Arc<dyn ReplyBackend>,
    policy: DispatchPolicy,
    closed: CancellationToken,
}

#[derive(Debug)]
struct Core {
    state: SessionState,
    version: u64,
    pending: BTreeMap<MessageId, CancellationToken>,
    queue: Option<mpsc::UnboundedSender<ReplyJob>>,
}

#[derive(Debug)]
struct ReplyJob {
    id: MessageId,
    request: ReplyRequest,
    token: CancellationToken,
}

impl Core {
    fn phase(&self) -> Phase {
        if self.pending.is_empty() {
            Phase::Idle
        } else {
            Phase::AwaitingReply
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            phase: self.phase(),
            pending: self.pending.len(),
            state: self.state.clone(),
        }
    }

    fn sync_typing(&mut self) {
        let typing = !self.pending.is_empty();
        self.state.set_typing(typing);
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a completed mutation.
    fn commit(&self, core: &mut Core) {
        core.version += 1;
        self.changes.send_replace(core.version);
    }

    async fn run(&self, job: ReplyJob) {
        let ReplyJob { id, request, token } = job;
        if token.is_cancelled() {
            self.abandon(id);
            return;
        }

        let outcome = tokio::select! {
            () = token.cancelled() => None,
            outcome = self.backend.reply(request) => Some(outcome),
        };

        match outcome {
            Some(outcome) => self.finish(id, outcome),
            None => self.abandon(id),
        }
    }

    fn finish(&self, id: MessageId, outcome: Result<BotReply, ReplyError>) {
        let mut core = self.lock();
        if core.pending.remove(&id).is_none() {
            debug!(
                name: "reply.discarded",
                message_id = %id,
                "Reply arrived after it was cancelled"
            );
            return;
        }

        match outcome {
            Ok(reply) => {
                let reply_id = core.state.push_bot(reply.reply);
                core.state.rotate_avatar(reply.avatar_metadata);
                info!(
                    name: "reply.appended",
                    message_id = %id,
                    reply_id = %reply_id,
                    "Bot reply appended"
                );
            }
            Err(e) => {
                error!(
                    name: "reply.failed",
                    message_id = %id,
                    error = %e,
                    "Error fetching bot response"
                );
            }
        }

        core.sync_typing();
        self.commit(&mut core);
    }

    fn abandon(&self, id: MessageId) {
        let mut core = self.lock();
        if core.pending.remove(&id).is_some() {
            core.sync_typing();
            self.commit(&mut core);
        }
        debug!(name: "reply.cancelled", message_id = %id, "Pending reply abandoned");
    }
}

impl Dispatcher {
    /// Create a dispatcher for a freshly mounted session.
    pub fn new(
        state: SessionState,
        backend: Arc<dyn ReplyBackend>,
        policy: DispatchPolicy,
    ) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    state,
                    version: 0,
                    pending: BTreeMap::new(),
                    queue: None,
                }),
                changes,
                backend,
                policy,
                closed: CancellationToken::new(),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.shared.lock().snapshot()
    }

    /// Snapshot for a render that no user action caused.
    ///
    /// A pending avatar change animation plays in the returned snapshot only;
    /// the flag is settled right after, without publishing a new version.
    #[must_use]
    pub fn render_snapshot(&self) -> Snapshot {
        let mut core = self.shared.lock();
        let snapshot = core.snapshot();
        core.state.settle_avatar();
        snapshot
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.lock().version
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.lock().phase()
    }

    /// Receiver that observes every version bump.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.changes.subscribe()
    }

    /// Apply a user-initiated mutation and publish it.
    fn user_action<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut core = self.shared.lock();
        core.state.settle_avatar();
        let result = f(&mut core.state);
        self.shared.commit(&mut core);
        result
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&self) -> Theme {
        self.user_action(|state| {
            state.toggle_theme();
            state.theme()
        })
    }

    /// Adopt the host's color scheme and return the resulting theme.
    pub fn apply_color_scheme(&self, scheme: ColorScheme) -> Theme {
        self.user_action(|state| {
            state.apply_color_scheme(scheme);
            state.theme()
        })
    }

    /// Flip sidebar visibility and return whether it is now open.
    pub fn toggle_sidebar(&self) -> bool {
        self.user_action(|state| {
            state.toggle_sidebar();
            state.sidebar_open()
        })
    }

    pub fn set_model(&self, model: Model) {
        self.user_action(|state| state.set_model(model));
    }

    /// Record the draft.
    ///
    /// The input field already shows what was typed, so this does not bump
    /// the version or wake observers.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.shared.lock().state.set_draft(text);
    }

    /// Empty the log, handling pending replies per [`ClearPolicy`].
    pub fn clear_messages(&self) {
        let mut core = self.shared.lock();
        core.state.settle_avatar();
        core.state.clear_messages();

        if self.shared.policy.on_clear == ClearPolicy::CancelPending {
            let cancelled = std::mem::take(&mut core.pending);
            for token in cancelled.values() {
                token.cancel();
            }
            core.sync_typing();
            if !cancelled.is_empty() {
                info!(
                    name: "dispatch.cancelled",
                    count = cancelled.len(),
                    "Pending replies cancelled by clear"
                );
            }
        }

        self.shared.commit(&mut core);
    }

    /// Send the current draft.
    ///
    /// Returns the id of the appended user message, or `None` when the draft
    /// is blank (in which case nothing changes).
    pub fn submit(&self) -> Option<MessageId> {
        let mut core = self.shared.lock();
        self.submit_locked(&mut core)
    }

    /// Replace the draft with `text` and send it in one step.
    pub fn send(&self, text: impl Into<String>) -> Option<MessageId> {
        let mut core = self.shared.lock();
        core.state.set_draft(text);
        self.submit_locked(&mut core)
    }

    fn submit_locked(&self, core: &mut Core) -> Option<MessageId> {
        let text = core.state.take_submission()?;
        core.state.settle_avatar();

        let model = core.state.selected_model();
        let id = core.state.push_user(text.clone());
        let token = self.shared.closed.child_token();
        core.pending.insert(id, token.clone());
        core.state.set_typing(true);

        let job = ReplyJob {
            id,
            request: ReplyRequest {
                message: text,
                model,
            },
            token,
        };

        match self.shared.policy.overlap {
            OverlapPolicy::Concurrent => {
                let shared = Arc::clone(&self.shared);
                tokio::spawn(async move { shared.run(job).await });
            }
            OverlapPolicy::Queue => self.enqueue(core, job),
        }

        info!(
            name: "dispatch.submitted",
            message_id = %id,
            model = %model,
            pending = core.pending.len(),
            "User message appended"
        );

        self.shared.commit(core);
        Some(id)
    }

    fn enqueue(&self, core: &mut Core, job: ReplyJob) {
        let sender = core
            .queue
            .get_or_insert_with(|| spawn_queue_worker(Arc::downgrade(&self.shared)));

        if let Err(mpsc::error::SendError(job)) = sender.send(job) {
            warn!(
                name: "dispatch.queue_closed",
                message_id = %job.id,
                "Reply queue is gone; dropping request"
            );
            core.pending.remove(&job.id);
            core.queue = None;
            core.sync_typing();
        }
    }

    /// Tear the session down: cancel every pending reply.
    pub fn close(&self) {
        self.shared.closed.cancel();
        let mut core = self.shared.lock();
        core.pending.clear();
        core.queue = None;
        core.sync_typing();
        self.shared.commit(&mut core);
    }

    /// Resolve once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        self.shared.closed.cancelled().await;
    }

    /// Resolve once no reply is pending.
    pub async fn until_idle(&self) {
        let mut rx = self.subscribe();
        loop {
            if self.phase() == Phase::Idle {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Wait until the version differs from `seen`, or `limit` elapses, and
    /// return the snapshot to render (see [`render_snapshot`](Self::render_snapshot)).
    pub async fn wait_for_change(&self, seen: u64, limit: Duration) -> Snapshot {
        let mut rx = self.subscribe();
        let wait = async {
            loop {
                let current = *rx.borrow_and_update();
                if current != seen || rx.changed().await.is_err() {
                    break;
                }
            }
        };
        let changed = tokio::time::timeout(limit, wait).await.is_ok();
        if !changed {
            debug!(name: "dispatch.poll_timeout", seen, "No change before poll limit");
        }
        self.render_snapshot()
    }
}

/// Single consumer that produces queued replies in send order.
///
/// Holds only a weak reference so a dropped session ends the worker.
fn spawn_queue_worker(shared: Weak<Shared>) -> mpsc::UnboundedSender<ReplyJob> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ReplyJob>();
    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let Some(shared) = shared.upgrade() else {
                break;
            };
            shared.run(job).await;
        }
    });
    tx
}
