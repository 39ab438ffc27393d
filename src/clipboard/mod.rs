pub mod backend;
pub mod watcher;

pub use backend::{ChangeMonitor, ClipboardError, ClipboardSource, MemoryClipboard};
pub use watcher::{CaptureOutcome, ClipboardEvent, ClipboardWatcher};
