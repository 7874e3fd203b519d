use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure reported by a browser extension API call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host call failed: {0}")]
    Js(String),
    #[error("unexpected host payload: {0}")]
    Decode(String),
    #[error("host returned no {0}")]
    Empty(&'static str),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        // Rejections are usually `Error` objects; fall back to the debug form otherwise.
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        HostError::Js(message)
    }
}

impl From<serde_wasm_bindgen::Error> for HostError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        HostError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            HostError::Js("boom".into()).to_string(),
            "host call failed: boom"
        );
        assert_eq!(
            HostError::Empty("bookmark tree").to_string(),
            "host returned no bookmark tree"
        );
    }
}
