//! Transient toast notifications.
//!
//! A toast is shown immediately, switches to its fade-out phase after the
//! visible period, and is removed once the fade finishes. Dismissal runs on
//! a detached tokio task that cannot be cancelled. Any number of toasts can
//! be on screen at once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use shoresquad_shared::constants::{TOAST_DURATION_MS, TOAST_FADE_MS};
use shoresquad_shared::Severity;

use crate::events::{
    emit_event, Frontend, ToastIdPayload, ToastPayload, EVENT_TOAST_FADING, EVENT_TOAST_REMOVED,
    EVENT_TOAST_SHOWN,
};
use crate::render::render_toast;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPhase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

#[derive(Clone)]
pub struct Notifier {
    frontend: Arc<dyn Frontend>,
    active: Arc<Mutex<Vec<Toast>>>,
    next_id: Arc<AtomicU64>,
    visible_for: Duration,
    fade_for: Duration,
}

impl Notifier {
    pub fn new(frontend: Arc<dyn Frontend>) -> Self {
        Self::with_timing(
            frontend,
            Duration::from_millis(TOAST_DURATION_MS),
            Duration::from_millis(TOAST_FADE_MS),
        )
    }

    pub fn with_timing(frontend: Arc<dyn Frontend>, visible_for: Duration, fade_for: Duration) -> Self {
        Self {
            frontend,
            active: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            visible_for,
            fade_for,
        }
    }

    /// Show a toast and schedule its removal.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            severity,
            phase: ToastPhase::Visible,
        };
        let id = toast.id;

        debug!(id, %severity, message = %toast.message, "toast");

        emit_event(
            self.frontend.as_ref(),
            EVENT_TOAST_SHOWN,
            ToastPayload {
                id,
                message: toast.message.clone(),
                severity,
                color: severity.color(),
                html: render_toast(&toast),
            },
        );
        lock(&self.active).push(toast);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(dismiss_later(
                    self.frontend.clone(),
                    self.active.clone(),
                    id,
                    self.visible_for,
                    self.fade_for,
                ));
            }
            Err(_) => warn!(id, "no async runtime, toast will not auto-dismiss"),
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, Severity::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, Severity::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, Severity::Info)
    }

    /// Toasts currently on screen, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        lock(&self.active).clone()
    }
}

fn lock(active: &Mutex<Vec<Toast>>) -> std::sync::MutexGuard<'_, Vec<Toast>> {
    // A toast list is always valid, even after a panic mid-update.
    active.lock().unwrap_or_else(|e| e.into_inner())
}

async fn dismiss_later(
    frontend: Arc<dyn Frontend>,
    active: Arc<Mutex<Vec<Toast>>>,
    id: ToastId,
    visible_for: Duration,
    fade_for: Duration,
) {
    tokio::time::sleep(visible_for).await;
    if let Some(toast) = lock(&active).iter_mut().find(|t| t.id == id) {
        toast.phase = ToastPhase::FadingOut;
    }
    emit_event(frontend.as_ref(), EVENT_TOAST_FADING, ToastIdPayload { id });

    tokio::time::sleep(fade_for).await;
    lock(&active).retain(|t| t.id != id);
    emit_event(frontend.as_ref(), EVENT_TOAST_REMOVED, ToastIdPayload { id });
}
