//! Application Context
//!
//! Handles every widget receives at mount time: the backend client,
//! the toast queue and the recent log lines.

use console_logger::LogBuffer;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::commands::ApiClient;
use crate::models::{Toast, ToastKind};

/// Most toasts on screen at once
const MAX_VISIBLE_TOASTS: usize = 4;
/// How long a toast stays up
pub const TOAST_LIFETIME_MS: u32 = 4_000;

/// Pending toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(0..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Reactive toast queue with timed dismissal
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn new() -> Self {
        Self { queue: RwSignal::new(ToastQueue::default()) }
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.queue.with(|q| q.visible().to_vec())
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, message));
        let queue = self.queue;
        Timeout::new(TOAST_LIFETIME_MS, move || {
            queue.update(|q| {
                q.dismiss(id);
            });
        })
        .forget();
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Collaborators handed to each widget
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub toasts: Toasts,
    pub logs: LogBuffer,
}

impl AppContext {
    pub fn new(api: ApiClient, toasts: Toasts, logs: LogBuffer) -> Self {
        Self { api, toasts, logs }
    }
}
