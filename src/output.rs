//! Where a generated URL can go once it leaves the form.

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("{0}")]
    Browser(#[from] std::io::Error),
    #[error("{0}")]
    Clipboard(String),
}

pub trait Browser {
    fn open(&mut self, url: &str) -> Result<(), OutputError>;
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), OutputError>;
}

/// The operating system's default browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<(), OutputError> {
        open::that(url)?;
        Ok(())
    }
}

/// The operating system clipboard.
///
/// The handle is opened lazily so that a headless session only fails when a
/// copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SystemClipboard {{ open: {} }}", self.inner.is_some())
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), OutputError> {
        let mut clipboard = match self.inner.take() {
            Some(c) => c,
            None => arboard::Clipboard::new().map_err(clipboard_error)?,
        };
        let result = clipboard.set_text(text.to_string()).map_err(clipboard_error);
        self.inner = Some(clipboard);
        result
    }
}

fn clipboard_error(e: arboard::Error) -> OutputError {
    OutputError::Clipboard(e.to_string())
}
