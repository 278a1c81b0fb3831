//! Leptos Toast Notifications
//!
//! Small notification queue for Leptos apps. Messages are pushed through a
//! `Toaster` handle, rendered by `ToastHost` and expire on a timer.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Toast severity, mapped to a CSS class
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Info => "toast-info",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first
#[derive(Clone, Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
    max_visible: usize,
}

/// Maximum toasts on screen before the oldest is dropped
const DEFAULT_MAX_VISIBLE: usize = 5;

/// How long a toast stays up
const DEFAULT_DURATION_MS: i32 = 3000;

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VISIBLE)
    }
}

impl ToastQueue {
    pub fn new(max_visible: usize) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            max_visible: max_visible.max(1),
        }
    }

    /// Queue a toast and return its id
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > self.max_visible {
            let overflow = self.toasts.len() - self.max_visible;
            self.toasts.drain(..overflow);
        }
        id
    }

    /// Remove a toast. Returns false if it already expired.
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Copyable handle to the toast queue, meant to be provided via context
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
    duration_ms: i32,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_MS)
    }

    pub fn with_duration(duration_ms: i32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            duration_ms,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> Option<u32> {
        let message = message.into();
        let id = self.queue.try_update(|q| q.push(kind, message))?;
        schedule_dismiss(*self, id);
        Some(id)
    }

    pub fn dismiss(&self, id: u32) {
        // The host may already be gone when a timer fires
        let _ = self.queue.try_update(|q| q.dismiss(id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|q| q.toasts().to_vec())
    }
}

fn schedule_dismiss(toaster: Toaster, id: u32) {
    if let Some(win) = web_sys::window() {
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            toaster.dismiss(id);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            toaster.duration_ms,
        );
        cb.forget();
    }
}

/// Renders the queued toasts. Click a toast to dismiss it early.
#[component]
pub fn ToastHost(toaster: Toaster) -> impl IntoView {
    view! {
        <div class="toast-host">
            <For
                each=move || toaster.toasts()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", toast.kind.class())
                            on:click=move |_| toaster.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::new(5);
        let a = queue.push(ToastKind::Info, "one");
        let b = queue.push(ToastKind::Error, "two");
        assert_eq!(a + 1, b);
        assert_eq!(queue.toasts().len(), 2);
        assert_eq!(queue.toasts()[1].kind, ToastKind::Error);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = ToastQueue::new(2);
        queue.push(ToastKind::Info, "first");
        queue.push(ToastKind::Info, "second");
        queue.push(ToastKind::Info, "third");
        let messages: Vec<_> = queue.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_dismiss() {
        let mut queue = ToastQueue::default();
        let id = queue.push(ToastKind::Success, "saved");
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.toasts().is_empty());
    }
}
