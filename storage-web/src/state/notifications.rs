//! Toast notifications shared by every component

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use shared::dto::{NotificationKind, NotificationQueue};

#[derive(Clone, Copy)]
pub struct NotificationContext {
    pub queue: RwSignal<NotificationQueue>,
    duration_ms: u32,
}

impl NotificationContext {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::new()),
            duration_ms,
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        let id = self
            .queue
            .try_update(|queue| queue.push(kind, message))
            .unwrap_or_default();
        self.schedule_dismiss(id, kind);
        id
    }

    pub fn loading(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Loading, message)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Info, message)
    }

    /// Settle a loading toast in place and return the id now showing the outcome. If the
    /// user already dismissed it, a fresh toast is shown instead so the outcome is never
    /// lost; later resolves must target the returned id.
    pub fn resolve(&self, id: u64, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        let updated = self
            .queue
            .try_update(|queue| queue.update(id, kind, message.clone()))
            .unwrap_or(false);

        if updated {
            self.schedule_dismiss(id, kind);
            id
        } else {
            self.notify(kind, message)
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| {
            queue.dismiss(id);
        });
    }

    /// A zero duration keeps every toast until it is dismissed.
    fn schedule_dismiss(&self, id: u64, kind: NotificationKind) {
        if !kind.auto_dismisses() || self.duration_ms == 0 {
            return;
        }
        let queue = self.queue;
        let duration_ms = self.duration_ms;
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            queue.try_update(|queue| queue.dismiss(id));
        });
    }
}

pub fn provide_notification_context(duration_ms: u32) -> NotificationContext {
    let context = NotificationContext::new(duration_ms);
    provide_context(context);
    context
}

pub fn use_notifications() -> NotificationContext {
    expect_context::<NotificationContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(ctx: &NotificationContext) -> Vec<(u64, NotificationKind)> {
        ctx.queue
            .with(|queue| queue.items().iter().map(|n| (n.id, n.kind)).collect())
    }

    #[test]
    fn test_resolve_updates_in_place() {
        let ctx = NotificationContext::new(0);
        let toast = ctx.loading("Confirm store in your wallet...");

        let same = ctx.resolve(toast, NotificationKind::Success, "store confirmed");
        assert_eq!(same, toast);
        assert_eq!(kinds(&ctx), vec![(toast, NotificationKind::Success)]);
    }

    #[test]
    fn test_resolve_after_dismiss_follows_new_toast() {
        let ctx = NotificationContext::new(0);
        let mut toast = ctx.loading("Confirm store in your wallet...");
        ctx.dismiss(toast);

        toast = ctx.resolve(toast, NotificationKind::Loading, "Transaction pending...");
        toast = ctx.resolve(toast, NotificationKind::Success, "store confirmed");

        // the pending toast settles instead of lingering next to a second outcome toast
        assert_eq!(kinds(&ctx), vec![(toast, NotificationKind::Success)]);
    }

    #[test]
    fn test_dismiss_removes_toast() {
        let ctx = NotificationContext::new(0);
        let toast = ctx.error("boom");
        ctx.dismiss(toast);
        assert!(ctx.queue.with(|queue| queue.is_empty()));
    }
}
