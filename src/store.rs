//! The aggregate owning every list and the settings.
//!
//! Every mutating method persists before returning: the whole document is
//! rewritten on each change, last write wins. Load and save failures are
//! logged and swallowed so callers always see a usable (possibly empty)
//! store.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::io::data_io::{self, DataError};
use crate::model::data::DataFile;
use crate::model::list::{CLIPBOARD_LIST_ID, TodoList};
use crate::model::settings::Settings;

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    pub settings: Settings,
    /// Ordinary lists only; never contains the clipboard list
    pub lists: Vec<TodoList>,
    /// Present once clipboard capture has been enabled for this file
    pub clipboard_list: Option<TodoList>,
}

impl Store {
    /// An empty store bound to `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            path: path.into(),
            settings: Settings::default(),
            lists: Vec::new(),
            clipboard_list: None,
        }
    }

    /// Create a store for `path` and load it
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Populate from the data file. A missing file leaves the defaults; an
    /// unreadable or malformed one is logged and also leaves the defaults.
    pub fn load(&mut self) {
        match data_io::read_data(&self.path) {
            Ok(Some(data)) => self.apply(data),
            Ok(None) => debug!(path = %self.path.display(), "no data file yet"),
            Err(e) => warn!(error = %e, "error loading data"),
        }
    }

    fn apply(&mut self, data: DataFile) {
        let DataFile { settings, lists } = data;
        let mut stored_clipboard = None;
        let mut ordinary = Vec::with_capacity(lists.len());
        for list in lists {
            if list.is_clipboard() {
                stored_clipboard.get_or_insert(list);
            } else {
                ordinary.push(list);
            }
        }

        self.settings = settings;
        self.lists = ordinary;
        if self.settings.clipboard_enabled {
            self.clipboard_list = Some(stored_clipboard.unwrap_or_else(TodoList::clipboard));
        }
        debug!(
            lists = self.lists.len(),
            clipboard = self.clipboard_list.is_some(),
            "data loaded"
        );
    }

    /// The document as it would be written right now
    pub fn to_data(&self) -> DataFile {
        DataFile {
            settings: self.settings.clone(),
            lists: self.get_all_lists().into_iter().cloned().collect(),
        }
    }

    /// Rewrite the data file. Failures are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!(error = %e, "error saving data");
        }
    }

    /// Rewrite the data file, reporting failure to the caller
    pub fn try_save(&self) -> Result<(), DataError> {
        data_io::write_data(&self.path, &self.to_data())
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    pub fn add_list(&mut self, name: impl Into<String>, color: impl Into<String>) -> &TodoList {
        let list = TodoList::new(name, color);
        debug!(id = %list.id, name = %list.name, "list added");
        self.lists.push(list);
        self.save();
        &self.lists[self.lists.len() - 1]
    }

    /// Remove an ordinary list. Unknown ids leave the lists untouched but
    /// still persist.
    pub fn remove_list(&mut self, list_id: &str) {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != list_id);
        if self.lists.len() != before {
            debug!(id = list_id, "list removed");
            if self.settings.last_list_id.as_deref() == Some(list_id) {
                self.settings.last_list_id = None;
            }
        }
        self.save();
    }

    pub fn rename_list(&mut self, list_id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(list) = self.get_list_mut(list_id) else {
            return false;
        };
        list.name = name.to_string();
        self.save();
        true
    }

    pub fn set_list_color(&mut self, list_id: &str, color: &str) -> bool {
        let Some(list) = self.get_list_mut(list_id) else {
            return false;
        };
        list.color = color.to_string();
        self.save();
        true
    }

    pub fn get_list(&self, list_id: &str) -> Option<&TodoList> {
        if list_id == CLIPBOARD_LIST_ID {
            return self.clipboard_list.as_ref();
        }
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn get_list_mut(&mut self, list_id: &str) -> Option<&mut TodoList> {
        if list_id == CLIPBOARD_LIST_ID {
            return self.clipboard_list.as_mut();
        }
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    /// Every list the user may see: ordinary lists, then the clipboard list
    /// while capture is enabled.
    pub fn get_all_lists(&self) -> Vec<&TodoList> {
        let mut all: Vec<&TodoList> = self.lists.iter().collect();
        if self.settings.clipboard_enabled
            && let Some(clipboard) = &self.clipboard_list
        {
            all.push(clipboard);
        }
        all
    }

    /// Default name for the next user-created list
    pub fn next_default_list_name(&self) -> String {
        format!("List {}", self.lists.len() + 1)
    }

    // -----------------------------------------------------------------------
    // Clipboard list
    // -----------------------------------------------------------------------

    pub fn enable_clipboard(&mut self) {
        self.settings.clipboard_enabled = true;
        if self.clipboard_list.is_none() {
            self.clipboard_list = Some(TodoList::clipboard());
        }
        self.save();
    }

    /// Stop capture. The clipboard list stays in memory but is hidden and
    /// left out of the next save.
    pub fn disable_clipboard(&mut self) {
        self.settings.clipboard_enabled = false;
        self.save();
    }

    // -----------------------------------------------------------------------
    // Current list and window state
    // -----------------------------------------------------------------------

    /// Remember `list_id` as the list to reopen. False if it is not visible.
    pub fn set_current_list(&mut self, list_id: &str) -> bool {
        if !self.get_all_lists().iter().any(|l| l.id == list_id) {
            return false;
        }
        self.settings.last_list_id = Some(list_id.to_string());
        self.save();
        true
    }

    /// The list to open: the remembered one if it is still visible,
    /// otherwise the first visible list.
    pub fn current_list(&self) -> Option<&TodoList> {
        let all = self.get_all_lists();
        if let Some(last) = self.settings.last_list_id.as_deref()
            && let Some(list) = all.iter().find(|l| l.id == last)
        {
            return Some(*list);
        }
        all.first().copied()
    }

    pub fn set_window_visible(&mut self, visible: bool) {
        self.settings.window_visible = visible;
        self.save();
    }

    /// Flip window visibility and return the new state
    pub fn toggle_window_visible(&mut self) -> bool {
        let visible = !self.settings.window_visible;
        self.set_window_visible(visible);
        visible
    }

    pub fn set_window_position(&mut self, x: i32, y: i32) {
        self.settings.window_position = (x, y);
        self.save();
    }
}
