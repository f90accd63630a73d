//! UI Notifier Implementation
//!
//! Desktop hosts have no native HUD, so loading and toast requests become
//! structured tracing events.

use bridge_traits::ui::UiNotifier;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Notifier that reports UI requests through `tracing`
#[derive(Debug, Default)]
pub struct TracingNotifier {
    loading: AtomicBool,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the loading indicator is currently shown
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

impl UiNotifier for TracingNotifier {
    fn show_loading(&self) {
        self.loading.store(true, Ordering::SeqCst);
        info!(target: "ui", "Loading indicator shown");
    }

    fn hide_loading(&self) {
        self.loading.store(false, Ordering::SeqCst);
        info!(target: "ui", "Loading indicator hidden");
    }

    fn show_toast(&self, message: &str) {
        info!(target: "ui", message = message, "Toast");
    }
}
