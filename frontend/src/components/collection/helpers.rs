//! Utility functions for the collection page.
//!
//! - **User feedback**: transient toast notifications for load and save outcomes.
//! - **Unsaved changes**: mirrors the view-model's dirty state onto
//!   `window.app_dirty`, which the page's `beforeunload` handler reads.
//! - **Formatting**: thousands separators for the collected counter.

use common::model::{Notification, NotificationKind};
use js_sys::Reflect;
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

const TOAST_MILLIS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast is a styled `div` appended to `<body>` and removed after a few
/// seconds. The message is set as text, never as HTML, since it may quote a
/// response body from the store.
pub fn show_toast(message: &str, kind: NotificationKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let background = match kind {
        NotificationKind::Success => "rgba(46, 125, 50, 0.9)",
        NotificationKind::Error => "rgba(183, 28, 28, 0.9)",
    };
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

pub fn notify(notification: &Notification) {
    show_toast(&notification.message, notification.kind);
}

/// Sets the global `app_dirty` flag read by the `beforeunload` guard.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}
