// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Toast queue with TTL and dedupe, used to surface save and load outcomes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational note ("changes saved").
    Info,
    /// Something was skipped or degraded.
    Warn,
    /// A request failed; edits remain pending.
    Error,
}

impl ToastKind {
    /// Display time used by [`ToastService::notify`].
    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::Info => Duration::from_secs(3),
            Self::Warn => Duration::from_secs(5),
            Self::Error => Duration::from_secs(8),
        }
    }
}

/// Who a toast is relevant to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastScope {
    /// Whole application.
    Global,
    /// The scheme currently open.
    Scheme,
    /// The active tool or dialog only.
    Local,
}

/// Identifier for a toast entry.
pub type ToastId = u64;

/// Toast data stored in the service.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Scope.
    pub scope: ToastScope,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Time-to-live duration.
    pub ttl: Duration,
    /// Creation time (refreshed by a deduped push).
    pub created: Instant,
}

impl Toast {
    fn alive_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) < self.ttl
    }
}

/// Rendering-friendly view of a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRender {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Scope.
    pub scope: ToastScope,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// Bounded toast queue. Oldest entries are evicted first.
#[derive(Debug)]
pub struct ToastService {
    queue: VecDeque<Toast>,
    max: usize,
    dedupe_window: Duration,
    next_id: ToastId,
}

impl ToastService {
    /// Create a queue holding at most `max` toasts (at least one).
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window: Duration::from_millis(500),
            next_id: 1,
        }
    }

    /// Push a toast. An identical toast pushed within the dedupe window is
    /// refreshed instead of duplicated, and keeps its id.
    pub fn push<S, B>(
        &mut self,
        kind: ToastKind,
        scope: ToastScope,
        title: S,
        body: B,
        ttl: Duration,
        now: Instant,
    ) -> ToastId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body = body.into();
        let window = self.dedupe_window;

        if let Some(existing) = self.queue.iter_mut().find(|t| {
            t.kind == kind
                && t.scope == scope
                && t.title == title
                && t.body == body
                && now.saturating_duration_since(t.created) <= window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        while self.queue.len() >= self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            id,
            kind,
            scope,
            title,
            body,
            ttl,
            created: now,
        });
        id
    }

    /// Push a scheme-scoped toast with the kind's default TTL.
    pub fn notify<S, B>(&mut self, kind: ToastKind, title: S, body: B, now: Instant) -> ToastId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        self.push(kind, ToastScope::Scheme, title, body, kind.default_ttl(), now)
    }

    /// Remove a toast before it expires. Returns whether it was present.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() != before
    }

    /// Drop expired toasts (call once per frame/tick).
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue.retain(|t| t.alive_at(now));
    }

    /// Render-ready toasts with progress ratios.
    pub fn visible(&self, now: Instant) -> Vec<ToastRender> {
        self.queue
            .iter()
            .filter(|t| t.alive_at(now))
            .map(|t| ToastRender {
                id: t.id,
                kind: t.kind,
                scope: t.scope,
                title: t.title.clone(),
                body: t.body.clone(),
                progress: 1.0
                    - (now.saturating_duration_since(t.created).as_secs_f32()
                        / t.ttl.as_secs_f32()),
            })
            .collect()
    }

    /// All queued toasts, expired or not, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    /// Number of queued toasts.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new(8)
    }
}
