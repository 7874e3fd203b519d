use serde::{Deserialize, Serialize};

pub const MAX_RESULTS: usize = 10;
pub const PATH_SEPARATOR: &str = " > ";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub max_results: usize,
    pub path_separator: String,
    /// How long on-page notifications stay visible.
    pub notification_ms: i32,
    /// Delay before re-checking scroll position after a row expands.
    pub settle_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            path_separator: PATH_SEPARATOR.to_string(),
            notification_ms: 2000,
            settle_ms: 100,
        }
    }
}

impl Settings {
    /// Parse settings, keeping defaults for any missing field. Bad input yields defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|err| {
            log::warn!("ignoring malformed settings: {err}");
            Self::default()
        })
    }
}
