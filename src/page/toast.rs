//! Transient notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How many toasts are on screen at once; a new one pushes the oldest out.
pub const TOAST_LIMIT: usize = 1;
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    queue: VecDeque<(Toast, Instant)>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }

    pub fn push_at(&mut self, toast: Toast, now: Instant) {
        tracing::debug!(title = %toast.title, "toast");
        self.queue.push_back((toast, now));
        while self.queue.len() > TOAST_LIMIT {
            self.queue.pop_front();
        }
    }

    /// Drop expired toasts. Returns true when something was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        self.queue
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < TOAST_TTL);
        self.queue.len() != before
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter().map(|(t, _)| t)
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back().map(|(t, _)| t)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_toast_replaces_older_one() {
        let mut toaster = Toaster::new();
        toaster.push(Toast::info("a", "first"));
        toaster.push(Toast::destructive("b", "second"));
        let shown: Vec<_> = toaster.visible().collect();
        assert_eq!(shown.len(), TOAST_LIMIT);
        assert_eq!(toaster.latest().map(|t| t.title.as_str()), Some("b"));
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let mut toaster = Toaster::new();
        let t0 = Instant::now();
        toaster.push_at(Toast::info("a", "x"), t0);
        assert!(!toaster.prune(t0 + Duration::from_secs(1)));
        assert!(toaster.prune(t0 + TOAST_TTL));
        assert!(toaster.is_empty());
    }
}
