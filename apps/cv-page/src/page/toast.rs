#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Toast {
            message: message.into(),
            kind,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Toasts raised by the controller wait in `pending` until the driver shows them;
/// shown toasts stay `visible` until their duration elapses.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    visible: Vec<(Toast, Instant)>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        self.pending.push_back(toast);
    }

    /// Moves pending toasts on screen as of `now` and returns them in raise order.
    pub fn show_pending(&mut self, now: Instant) -> Vec<Toast> {
        let shown: Vec<Toast> = self.pending.drain(..).collect();
        for toast in &shown {
            self.visible.push((toast.clone(), now + toast.duration));
        }
        shown
    }

    /// Removes and returns every visible toast whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<Toast> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .visible
            .drain(..)
            .partition(|(_, deadline)| *deadline <= now);
        self.visible = kept;
        expired.into_iter().map(|(toast, _)| toast).collect()
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.visible.iter().map(|(_, deadline)| *deadline).min()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter().map(|(toast, _)| toast)
    }
}
