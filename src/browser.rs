use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::HostError;
use crate::folder_tree::BookmarkNode;
use crate::host::{BookmarksHost, CreateDetails};

// The loader shims alias `browser` to `chrome` on Chromium, so one namespace covers both.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["browser", "bookmarks"], js_name = getTree, catch)]
    async fn bookmarks_get_tree() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "bookmarks"], js_name = get, catch)]
    async fn bookmarks_get(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "bookmarks"], js_name = create, catch)]
    async fn bookmarks_create(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "action"], js_name = openPopup, catch)]
    async fn action_open_popup() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "runtime"], js_name = sendMessage, catch)]
    async fn runtime_send_message(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "runtime", "onMessage"], js_name = addListener)]
    fn runtime_on_message(listener: &js_sys::Function);

    #[wasm_bindgen(js_namespace = ["browser", "tabs"], js_name = query, catch)]
    async fn tabs_query(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "tabs"], js_name = sendMessage, catch)]
    async fn tabs_send_message(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["browser", "i18n"], js_name = getMessage, catch)]
    fn i18n_get_message(name: &str) -> Result<String, JsValue>;
}

/// Listener signature for `runtime.onMessage`: `(message, sender, sendResponse) -> keepOpen`.
pub type MessageListener = dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool;

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveTab {
    pub id: Option<i32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TabQuery {
    active: bool,
    current_window: bool,
}

/// `BookmarksHost` backed by the real extension APIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebExtensionHost;

impl BookmarksHost for WebExtensionHost {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
        let tree = bookmarks_get_tree().await?;
        Ok(serde_wasm_bindgen::from_value(tree)?)
    }

    async fn get(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError> {
        let nodes = bookmarks_get(id).await?;
        Ok(serde_wasm_bindgen::from_value(nodes)?)
    }

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, HostError> {
        let args = serde_wasm_bindgen::to_value(&details)?;
        let created = bookmarks_create(args).await?;
        Ok(serde_wasm_bindgen::from_value(created)?)
    }

    async fn open_popup(&self) -> Result<(), HostError> {
        action_open_popup().await?;
        Ok(())
    }
}

pub async fn send_message<T: Serialize>(message: &T) -> Result<JsValue, HostError> {
    let value = serde_wasm_bindgen::to_value(message)?;
    Ok(runtime_send_message(value).await?)
}

pub async fn send_tab_message<T: Serialize>(tab_id: i32, message: &T) -> Result<JsValue, HostError> {
    let value = serde_wasm_bindgen::to_value(message)?;
    Ok(tabs_send_message(tab_id, value).await?)
}

/// Register a `runtime.onMessage` listener for the lifetime of the page.
pub fn on_message(listener: Box<MessageListener>) {
    let closure = Closure::wrap(listener);
    runtime_on_message(closure.as_ref().unchecked_ref());
    closure.forget();
}

pub async fn active_tab() -> Result<ActiveTab, HostError> {
    let query = serde_wasm_bindgen::to_value(&TabQuery {
        active: true,
        current_window: true,
    })?;
    let tabs: Vec<ActiveTab> = serde_wasm_bindgen::from_value(tabs_query(query).await?)?;
    tabs.into_iter().next().ok_or(HostError::Empty("active tab"))
}

/// Localized string for `key`, or `fallback` when the catalog has no entry.
pub fn message(key: &str, fallback: &str) -> String {
    match i18n_get_message(key) {
        Ok(text) if !text.is_empty() => text,
        _ => fallback.to_string(),
    }
}

/// `navigator.userAgent`, read from the global scope so it also works in the background worker.
pub fn user_agent() -> String {
    let global = js_sys::global();
    js_sys::Reflect::get(&global, &JsValue::from_str("navigator"))
        .and_then(|navigator| js_sys::Reflect::get(&navigator, &JsValue::from_str("userAgent")))
        .ok()
        .and_then(|ua| ua.as_string())
        .unwrap_or_default()
}
