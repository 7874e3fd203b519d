use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Requests handled by the background script.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    SaveBookmark {
        title: String,
        url: String,
        /// Target folder; the toolbar when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
    },
    OpenPopup,
}

/// Messages delivered to content scripts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Notification {
    #[serde(rename = "SHOW_NOTIFICATION", rename_all = "camelCase")]
    ShowNotification {
        message: String,
        #[serde(default)]
        is_error: bool,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

impl Request {
    /// Decode a runtime message, `None` if it is not addressed to us.
    pub fn from_js(value: JsValue) -> Option<Self> {
        serde_wasm_bindgen::from_value(value).ok()
    }
}

impl Notification {
    pub fn from_js(value: JsValue) -> Option<Self> {
        serde_wasm_bindgen::from_value(value).ok()
    }
}

impl Response {
    /// Decode a reply; anything unreadable counts as a failure.
    pub fn from_js(value: JsValue) -> Self {
        serde_wasm_bindgen::from_value(value)
            .unwrap_or_else(|err| Response::failed(format!("malformed response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_request_wire_shape() {
        let req = Request::SaveBookmark {
            title: "Rust".into(),
            url: "https://rust-lang.org".into(),
            parent_id: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"action": "saveBookmark", "title": "Rust", "url": "https://rust-lang.org"})
        );
    }

    #[test]
    fn parses_requests_from_json() {
        let req: Request = serde_json::from_value(json!({"action": "openPopup"})).unwrap();
        assert_eq!(req, Request::OpenPopup);

        let req: Request = serde_json::from_value(
            json!({"action": "saveBookmark", "title": "t", "url": "u", "parentId": "42"}),
        )
        .unwrap();
        assert_eq!(
            req,
            Request::SaveBookmark {
                title: "t".into(),
                url: "u".into(),
                parent_id: Some("42".into())
            }
        );
        assert!(serde_json::from_value::<Request>(json!({"action": "reload"})).is_err());
    }

    #[test]
    fn notification_wire_shape() {
        let n: Notification = serde_json::from_value(
            json!({"type": "SHOW_NOTIFICATION", "message": "Bookmark saved!", "isError": false}),
        )
        .unwrap();
        assert_eq!(
            n,
            Notification::ShowNotification {
                message: "Bookmark saved!".into(),
                is_error: false
            }
        );
    }

    #[test]
    fn failure_response_carries_error() {
        assert_eq!(
            serde_json::to_value(Response::failed("nope")).unwrap(),
            json!({"success": false, "error": "nope"})
        );
        assert_eq!(serde_json::to_value(Response::ok()).unwrap(), json!({"success": true}));
    }
}
