//! UI Notification Abstraction
//!
//! Lets the core drive the host's blocking loading indicator and transient
//! toast messages without depending on any UI toolkit.

/// UI notifier trait
///
/// Calls are fire-and-forget and must return quickly; implementations are
/// expected to hop to the UI thread themselves.
///
/// # Platform Support
///
/// - **iOS**: activity indicator view + toast library
/// - **Android**: progress dialog + `Toast`
/// - **Desktop**: structured log events
///
/// # Example
///
/// ```ignore
/// use bridge_traits::ui::UiNotifier;
///
/// fn warn_offline(ui: &dyn UiNotifier) {
///     ui.show_toast("Internet connection not available.");
/// }
/// ```
pub trait UiNotifier: Send + Sync {
    /// Show the blocking loading indicator
    fn show_loading(&self);

    /// Hide the blocking loading indicator
    fn hide_loading(&self);

    /// Show a transient message to the user
    fn show_toast(&self, message: &str);
}

/// Notifier that ignores every call. Useful for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl UiNotifier for NoopNotifier {
    fn show_loading(&self) {}

    fn hide_loading(&self) {}

    fn show_toast(&self, _message: &str) {}
}
