use serde::{Deserialize, Serialize};

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub clipboard_enabled: bool,
    /// Top-left corner of the list window, `[x, y]` on disk
    #[serde(default = "default_window_position")]
    pub window_position: (i32, i32),
    /// List to reopen on next launch
    #[serde(default)]
    pub last_list_id: Option<String>,
    #[serde(default = "default_true")]
    pub window_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            clipboard_enabled: false,
            window_position: default_window_position(),
            last_list_id: None,
            window_visible: true,
        }
    }
}

fn default_window_position() -> (i32, i32) {
    (100, 100)
}

fn default_true() -> bool {
    true
}
