use leptos::prelude::{document, set_timeout, window};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use crate::browser;
use crate::messages::{Notification, Request, Response};
use crate::settings::Settings;
use crate::shortcuts::{classify, KeyChord, Platform, Shortcut};

const SUCCESS_COLOR: &str = "#4CAF50";
const ERROR_COLOR: &str = "#f44336";

/// Inline style for the transient toast in the page's top-right corner.
pub fn notification_style(is_error: bool) -> String {
    let background = if is_error { ERROR_COLOR } else { SUCCESS_COLOR };
    format!(
        "position: fixed; top: 20px; right: 20px; background: {background}; color: white; \
         padding: 12px 20px; border-radius: 4px; z-index: 10000; \
         font-family: Arial, sans-serif; font-size: 14px; box-shadow: 0 2px 10px rgba(0,0,0,0.2);"
    )
}

fn show_notification(message: &str, is_error: bool, duration_ms: i32) {
    let document = document();
    let Some(body) = document.body() else {
        return;
    };
    let node = match document.create_element("div") {
        Ok(node) => node,
        Err(err) => {
            log::error!("cannot create notification: {err:?}");
            return;
        }
    };
    node.set_text_content(Some(message));
    let _ = node.set_attribute("style", &notification_style(is_error));
    if body.append_child(&node).is_err() {
        return;
    }
    set_timeout(
        move || node.remove(),
        std::time::Duration::from_millis(duration_ms.max(0) as u64),
    );
}

async fn save_current_page(settings: &Settings) {
    let request = Request::SaveBookmark {
        title: document().title(),
        url: window().location().href().unwrap_or_default(),
        parent_id: None,
    };
    let saved = match browser::send_message(&request).await {
        Ok(reply) => Response::from_js(reply).success,
        Err(err) => {
            log::error!("Error saving bookmark: {err}");
            false
        }
    };
    if saved {
        let text = browser::message("bookmarkSaved", "Bookmark saved!");
        show_notification(&text, false, settings.notification_ms);
    } else {
        let text = browser::message("bookmarkSaveFailed", "Error saving bookmark");
        show_notification(&text, true, settings.notification_ms);
    }
}

async fn open_popup() {
    if let Err(err) = browser::send_message(&Request::OpenPopup).await {
        log::error!("Error opening popup: {err}");
    }
}

/// Wire page shortcuts and popup notifications into the current document.
pub fn run(settings: Settings) {
    let platform = Platform::detect();

    let notify_ms = settings.notification_ms;
    browser::on_message(Box::new(move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
        let Some(Notification::ShowNotification { message, is_error }) = Notification::from_js(message) else {
            return false;
        };
        show_notification(&message, is_error, notify_ms);
        if let Ok(ack) = serde_wasm_bindgen::to_value(&Response::ok()) {
            let _ = send_response.call1(&JsValue::NULL, &ack);
        }
        false
    }));

    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let Some(shortcut) = classify(platform, &KeyChord::from_event(&event)) else {
            return;
        };
        event.prevent_default();
        let settings = settings.clone();
        match shortcut {
            Shortcut::OpenPopup => spawn_local(open_popup()),
            Shortcut::QuickSave => spawn_local(async move { save_current_page(&settings).await }),
        }
    });
    if let Err(err) =
        document().add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
    {
        log::error!("cannot listen for shortcuts: {err:?}");
    }
    on_keydown.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_reflects_outcome() {
        assert!(notification_style(false).contains("background: #4CAF50"));
        assert!(notification_style(true).contains("background: #f44336"));
        assert!(notification_style(true).starts_with("position: fixed; top: 20px; right: 20px;"));
    }
}
