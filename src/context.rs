//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::ApiError;

use crate::models::{Toast, ToastLevel};

/// How long a toast stays on screen
const TOAST_MILLIS: u32 = 4_000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the homepage document - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the homepage document - write
    set_reload_trigger: WriteSignal<u32>,
    /// Visible toasts, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
        }
    }

    /// Trigger a reload of the homepage document
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.push_toast(ToastLevel::Info, message.into());
    }

    /// Error toast for problems caught before any backend call
    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        web_sys::console::warn_1(&format!("[APP] {}", message).into());
        self.push_toast(ToastLevel::Error, message);
    }

    /// Log and surface a failed backend call
    pub fn report(&self, operation: &str, err: &ApiError) {
        web_sys::console::error_1(&format!("[APP] {} failed: {}", operation, err).into());
        self.push_toast(ToastLevel::Error, format!("{} failed: {}", operation, err));
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push_toast(&self, level: ToastLevel, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id.wrapping_add(1));
        self.toasts.update(|toasts| toasts.push(Toast { id, level, message }));

        let toasts = self.toasts;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
