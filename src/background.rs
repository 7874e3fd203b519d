use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::browser::{self, WebExtensionHost};
use crate::host::{BookmarksHost, CreateDetails};
use crate::messages::{Request, Response};
use crate::toolbar::{resolve_toolbar_id, BrowserFlavor};

pub async fn handle_request<H: BookmarksHost>(
    host: &H,
    flavor: BrowserFlavor,
    request: Request,
) -> Response {
    match request {
        Request::SaveBookmark {
            title,
            url,
            parent_id,
        } => {
            let parent_id = match parent_id {
                Some(id) => id,
                None => resolve_toolbar_id(host, flavor).await,
            };
            match host.create(CreateDetails { title, url, parent_id }).await {
                Ok(node) => {
                    log::info!("saved bookmark {}", node.id);
                    Response::ok()
                }
                Err(err) => {
                    log::error!("Error saving bookmark: {err}");
                    Response::failed(err)
                }
            }
        }
        Request::OpenPopup => match host.open_popup().await {
            Ok(()) => Response::ok(),
            Err(err) => {
                log::error!("Error opening popup: {err}");
                Response::failed(err)
            }
        },
    }
}

/// Install the runtime message handler for the background context.
pub fn run() {
    let flavor = BrowserFlavor::detect();
    log::info!("SearchMark background script loaded ({flavor:?})");

    browser::on_message(Box::new(move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
        let Some(request) = Request::from_js(message) else {
            return false;
        };
        spawn_local(async move {
            let response = handle_request(&WebExtensionHost, flavor, request).await;
            let reply = serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL);
            if let Err(err) = send_response.call1(&JsValue::NULL, &reply) {
                log::error!("could not deliver response: {err:?}");
            }
        });
        // Keep the channel open until `send_response` runs.
        true
    }));
}
