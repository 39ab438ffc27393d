use std::sync::mpsc;

use tracing::{debug, info};

use super::backend::ClipboardSource;
use crate::model::list::CLIPBOARD_LIST_ID;
use crate::store::Store;

/// Events sent from the watcher to anything displaying the clipboard list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardEvent {
    /// A new entry was appended to the clipboard list.
    Captured { item_id: String, text: String },
}

/// What a single change notification led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The watcher is not observing
    NotObserving,
    /// Capture is off, or there is no clipboard list
    Disabled,
    /// Unreadable, empty, blank, or the same as the last captured text
    Ignored,
    /// The clipboard list already holds this exact text
    Duplicate,
    Captured { item_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Observing,
}

/// Captures copied text into the clipboard list.
///
/// The watcher is driven by change notifications from its host; it never
/// polls on its own. Each notification reads the clipboard once.
#[derive(Debug)]
pub struct ClipboardWatcher {
    state: WatcherState,
    last_text: String,
    observers: Vec<mpsc::Sender<ClipboardEvent>>,
}

impl Default for ClipboardWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardWatcher {
    pub fn new() -> Self {
        ClipboardWatcher {
            state: WatcherState::Idle,
            last_text: String::new(),
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Start handling notifications
    pub fn start(&mut self) {
        self.state = WatcherState::Observing;
    }

    /// Stop handling notifications. The last captured text is kept.
    pub fn stop(&mut self) {
        self.state = WatcherState::Idle;
    }

    pub fn last_text(&self) -> &str {
        &self.last_text
    }

    /// Register an observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> mpsc::Receiver<ClipboardEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    /// Handle one clipboard-change notification.
    pub fn on_clipboard_changed(
        &mut self,
        store: &mut Store,
        source: &mut dyn ClipboardSource,
    ) -> CaptureOutcome {
        if self.state != WatcherState::Observing {
            return CaptureOutcome::NotObserving;
        }
        if !store.settings.clipboard_enabled || store.clipboard_list.is_none() {
            return CaptureOutcome::Disabled;
        }

        let text = match source.read_text() {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "clipboard read failed");
                return CaptureOutcome::Ignored;
            }
        };
        if text.is_empty() || text == self.last_text || text.trim().is_empty() {
            return CaptureOutcome::Ignored;
        }

        // Remembered before the duplicate check, so a rejected duplicate
        // still suppresses repeat notifications for the same text.
        self.last_text = text.clone();

        let Some(list) = store.get_list_mut(CLIPBOARD_LIST_ID) else {
            return CaptureOutcome::Disabled;
        };
        if list.contains_text(&text) {
            debug!("clipboard text already captured");
            return CaptureOutcome::Duplicate;
        }

        let item_id = list.add_item(text.clone()).id.clone();
        store.save();
        info!(item = %item_id, chars = text.chars().count(), "clipboard text captured");

        self.notify(ClipboardEvent::Captured {
            item_id: item_id.clone(),
            text,
        });
        CaptureOutcome::Captured { item_id }
    }

    /// Handle a notification for a store whose data file other processes
    /// also write. The store is reloaded first, so the capture is saved on
    /// top of their changes and a capture switched off elsewhere is seen.
    pub fn on_shared_clipboard_changed(
        &mut self,
        store: &mut Store,
        source: &mut dyn ClipboardSource,
    ) -> CaptureOutcome {
        store.load();
        self.on_clipboard_changed(store, source)
    }

    fn notify(&mut self, event: ClipboardEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::backend::{ClipboardError, MemoryClipboard};
    use tempfile::TempDir;

    fn enabled_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new(dir.path().join("data.json"));
        store.enable_clipboard();
        (dir, store)
    }

    fn observing() -> ClipboardWatcher {
        let mut watcher = ClipboardWatcher::new();
        watcher.start();
        watcher
    }

    fn clipboard_texts(store: &Store) -> Vec<String> {
        store
            .get_list(CLIPBOARD_LIST_ID)
            .unwrap()
            .items
            .iter()
            .map(|i| i.text.clone())
            .collect()
    }

    #[test]
    fn sequence_appends_each_distinct_text_once() {
        let (_dir, mut store) = enabled_store();
        let mut watcher = observing();
        let mut clip = MemoryClipboard::new();

        for text in ["a", "a", "", "b", "a"] {
            clip.set(text);
            watcher.on_clipboard_changed(&mut store, &mut clip);
        }
        assert_eq!(clipboard_texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn outcomes_for_each_rejection_path() {
        let (_dir, mut store) = enabled_store();
        let mut watcher = observing();
        let mut clip = MemoryClipboard::new();

        clip.set("a");
        assert!(matches!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::Captured { .. }
        ));
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::Ignored
        );
        clip.set("  \n");
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::Ignored
        );
        clip.set("b");
        watcher.on_clipboard_changed(&mut store, &mut clip);
        clip.set("a");
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::Duplicate
        );
        // The duplicate still became the last seen text
        assert_eq!(watcher.last_text(), "a");
    }

    #[test]
    fn disabled_capture_is_ignored() {
        let (_dir, mut store) = enabled_store();
        store.disable_clipboard();
        let mut watcher = observing();
        let mut clip = MemoryClipboard::new();
        clip.set("a");
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::Disabled
        );
        assert_eq!(watcher.last_text(), "");
    }

    #[test]
    fn idle_watcher_ignores_notifications() {
        let (_dir, mut store) = enabled_store();
        let mut watcher = ClipboardWatcher::new();
        let mut clip = MemoryClipboard::new();
        clip.set("a");
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut clip),
            CaptureOutcome::NotObserving
        );
        watcher.start();
        assert_eq!(watcher.state(), WatcherState::Observing);
        watcher.stop();
        assert_eq!(watcher.state(), WatcherState::Idle);
        assert!(clipboard_texts(&store).is_empty());
    }

    #[test]
    fn read_failure_has_no_effect() {
        struct Broken;
        impl ClipboardSource for Broken {
            fn read_text(&mut self) -> Result<String, ClipboardError> {
                Err(ClipboardError::Unavailable("no display".into()))
            }
            fn write_text(&mut self, _: &str) -> Result<(), ClipboardError> {
                Err(ClipboardError::Unavailable("no display".into()))
            }
        }

        let (_dir, mut store) = enabled_store();
        let mut watcher = observing();
        assert_eq!(
            watcher.on_clipboard_changed(&mut store, &mut Broken),
            CaptureOutcome::Ignored
        );
        assert!(clipboard_texts(&store).is_empty());
    }

    #[test]
    fn capture_is_persisted_and_observers_notified() {
        let (_dir, mut store) = enabled_store();
        let mut watcher = observing();
        let rx = watcher.subscribe();
        let dropped = watcher.subscribe();
        drop(dropped);

        let mut clip = MemoryClipboard::new();
        clip.set("copied");
        let outcome = watcher.on_clipboard_changed(&mut store, &mut clip);
        let CaptureOutcome::Captured { item_id } = outcome else {
            panic!("expected capture, got {outcome:?}");
        };

        assert_eq!(
            rx.try_recv().unwrap(),
            ClipboardEvent::Captured {
                item_id: item_id.clone(),
                text: "copied".into(),
            }
        );
        assert_eq!(watcher.observers.len(), 1);

        let reloaded = Store::open(store.path());
        let clip_list = reloaded.get_list(CLIPBOARD_LIST_ID).unwrap();
        assert_eq!(clip_list.items[0].id, item_id);
    }

    #[test]
    fn shared_capture_keeps_edits_from_other_stores() {
        let (_dir, mut watching) = enabled_store();
        let mut watcher = observing();
        let mut clip = MemoryClipboard::new();

        let mut other = Store::open(watching.path());
        let work = other.add_list("Work", "#FF0000").id.clone();
        other.get_list_mut(&work).unwrap().add_item("milk");
        other.save();

        clip.set("copied");
        assert!(matches!(
            watcher.on_shared_clipboard_changed(&mut watching, &mut clip),
            CaptureOutcome::Captured { .. }
        ));

        let reloaded = Store::open(watching.path());
        assert_eq!(reloaded.get_list(&work).unwrap().items[0].text, "milk");
        assert_eq!(clipboard_texts(&reloaded), vec!["copied"]);
    }

    #[test]
    fn shared_capture_sees_capture_turned_off_elsewhere() {
        let (_dir, mut watching) = enabled_store();
        let mut watcher = observing();
        let mut clip = MemoryClipboard::new();

        let mut other = Store::open(watching.path());
        other.add_list("Work", "#FF0000");
        other.disable_clipboard();

        clip.set("copied");
        assert_eq!(
            watcher.on_shared_clipboard_changed(&mut watching, &mut clip),
            CaptureOutcome::Disabled
        );

        let reloaded = Store::open(watching.path());
        assert!(!reloaded.settings.clipboard_enabled);
        assert_eq!(reloaded.lists.len(), 1);
    }
}
