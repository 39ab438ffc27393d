use tracing::trace;

/// Error type for clipboard access
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard does not hold text")]
    NoText,
    #[error("clipboard support was not compiled in")]
    NotSupported,
}

/// Somewhere text can be read from and written to
pub trait ClipboardSource {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard
#[cfg(feature = "clipboard-support")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard-support")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

#[cfg(feature = "clipboard-support")]
impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::NoText),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Open the OS clipboard, if this build supports it
pub fn system_clipboard() -> Result<Box<dyn ClipboardSource>, ClipboardError> {
    #[cfg(feature = "clipboard-support")]
    {
        Ok(Box::new(SystemClipboard::new()?))
    }
    #[cfg(not(feature = "clipboard-support"))]
    {
        Err(ClipboardError::NotSupported)
    }
}

/// An in-process clipboard, for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn clear(&mut self) {
        self.text = None;
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.text.clone().ok_or(ClipboardError::NoText)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set(text);
        Ok(())
    }
}

/// Turns a clipboard that can only be read into change notifications by
/// comparing each read with the previous one.
///
/// Non-text content and read failures count as "empty", so copying an image
/// after some text and then the same text again is reported as a change.
#[derive(Debug, Default)]
pub struct ChangeMonitor {
    last_seen: Option<String>,
}

impl ChangeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current content without reporting it, so text already on
    /// the clipboard at startup is not treated as a fresh copy.
    pub fn prime(&mut self, source: &mut dyn ClipboardSource) {
        self.last_seen = source.read_text().ok();
    }

    /// Returns true when the content differs from the previous poll
    pub fn poll(&mut self, source: &mut dyn ClipboardSource) -> bool {
        let current = match source.read_text() {
            Ok(text) => Some(text),
            Err(e) => {
                trace!(error = %e, "clipboard read failed");
                None
            }
        };
        if current == self.last_seen {
            return false;
        }
        self.last_seen = current;
        true
    }
}
