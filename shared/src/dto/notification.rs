//! Toast notifications.
//!
//! A loading toast can be updated in place once its operation settles, the same way a
//! promise toast resolves to success or error.

/// How many toasts are kept on screen; the oldest is dropped first.
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// CSS class suffix for the toast element.
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Loading => "toast-loading",
            NotificationKind::Success => "toast-success",
            NotificationKind::Error => "toast-error",
            NotificationKind::Warning => "toast-warning",
            NotificationKind::Info => "toast-info",
        }
    }

    /// Loading toasts stay until they are updated or dismissed.
    pub fn auto_dismisses(&self) -> bool {
        !matches!(self, NotificationKind::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationQueue {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE_NOTIFICATIONS {
            self.items.remove(0);
        }
        id
    }

    /// Replace kind and message of an existing toast. Returns `false` if it is gone.
    pub fn update(&mut self, id: u64, kind: NotificationKind, message: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(item) => {
                item.kind = kind;
                item.message = message.into();
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_unique_ids() {
        let mut queue = NotificationQueue::new();
        let a = queue.push(NotificationKind::Success, "one");
        let b = queue.push(NotificationKind::Error, "two");
        assert_ne!(a, b);
        assert_eq!(queue.items().len(), 2);
    }

    #[test]
    fn test_loading_resolves_in_place() {
        let mut queue = NotificationQueue::new();
        let id = queue.push(NotificationKind::Loading, "Waiting for wallet confirmation...");
        assert!(queue.update(id, NotificationKind::Error, "User rejected the request."));

        let toast = queue.get(id).unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "User rejected the request.");
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn test_update_after_dismiss_is_noop() {
        let mut queue = NotificationQueue::new();
        let id = queue.push(NotificationKind::Loading, "x");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(!queue.update(id, NotificationKind::Success, "y"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut queue = NotificationQueue::new();
        let first = queue.push(NotificationKind::Info, "0");
        for i in 1..=MAX_VISIBLE_NOTIFICATIONS {
            queue.push(NotificationKind::Info, i.to_string());
        }
        assert_eq!(queue.items().len(), MAX_VISIBLE_NOTIFICATIONS);
        assert!(queue.get(first).is_none());
    }

    #[test]
    fn test_loading_does_not_auto_dismiss() {
        assert!(!NotificationKind::Loading.auto_dismisses());
        assert!(NotificationKind::Warning.auto_dismisses());
    }
}
