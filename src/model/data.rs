use serde::{Deserialize, Serialize};

use super::list::TodoList;
use super::settings::Settings;

/// The whole persisted document: settings plus every list, the clipboard
/// list included as an ordinary entry when active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub lists: Vec<TodoList>,
}
