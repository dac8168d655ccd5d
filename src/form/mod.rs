use crate::auth::{Error, Session, SessionFactory, SessionParams};
use crate::core::models::{AuthRequest, Field};
use crate::output::{Browser, Clipboard};

pub mod validate;

use tracing::{event, Level};

pub const STATUS_READY: &str = "Ready";
pub const STATUS_GENERATING: &str = "Generating authentication URL...";
pub const STATUS_GENERATED: &str = "Authentication URL generated successfully";
pub const STATUS_GENERATE_FAILED: &str = "Error generating authentication URL";
pub const STATUS_OPENED: &str = "URL opened in browser";
pub const STATUS_COPIED: &str = "URL copied to clipboard";
pub const STATUS_CLEARED: &str = "Fields cleared";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
}

/// A message the front end must show before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: "Warning",
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

/// Headless state of the credential form.
///
/// Every operation reports failure as a [`Notice`] and leaves the form usable.
#[derive(Debug)]
pub struct AuthForm<F, B, C> {
    request: AuthRequest,
    url: Option<String>,
    outputs_enabled: bool,
    status: String,
    factory: F,
    browser: B,
    clipboard: C,
}

impl<F, B, C> AuthForm<F, B, C>
where
    F: SessionFactory,
    B: Browser,
    C: Clipboard,
{
    pub fn new(factory: F, browser: B, clipboard: C) -> Self {
        Self {
            request: AuthRequest::default(),
            url: None,
            outputs_enabled: false,
            status: STATUS_READY.to_string(),
            factory,
            browser,
            clipboard,
        }
    }

    pub fn request(&self) -> &AuthRequest {
        &self.request
    }

    pub fn get(&self, field: Field) -> &str {
        self.request.get(field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.request.set(field, value.into());
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn can_open(&self) -> bool {
        self.outputs_enabled
    }

    pub fn can_copy(&self) -> bool {
        self.outputs_enabled
    }

    fn set_status(&mut self, status: &str) {
        event!(Level::INFO, status, "Status changed");
        self.status = status.to_string();
    }

    fn build_url(&self) -> Result<String, Error> {
        let params = SessionParams::from(&self.request);
        let session = self.factory.create_session(params)?;
        session.generate_authcode()
    }

    #[tracing::instrument(skip_all)]
    pub fn generate(&mut self) -> Option<Notice> {
        if let Err(e) = validate::validate(&self.request) {
            event!(Level::DEBUG, error = %e, "Rejected form input");
            return Some(Notice::error("Validation Error", e.to_string()));
        }

        self.set_status(STATUS_GENERATING);

        match self.build_url() {
            Ok(url) => {
                self.url = Some(url);
                self.outputs_enabled = true;
                self.set_status(STATUS_GENERATED);
                None
            }
            Err(e) => {
                event!(Level::ERROR, error = %e, "Session failed to generate URL");
                self.set_status(STATUS_GENERATE_FAILED);
                Some(Notice::error(
                    "Error",
                    format!("Failed to generate authentication URL: {}", e),
                ))
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn open_in_browser(&mut self) -> Option<Notice> {
        let url = match self.current_url() {
            Some(url) => url,
            None => {
                return Some(Notice::warning(
                    "No URL to open. Generate an authentication URL first.",
                ))
            }
        };

        match self.browser.open(&url) {
            Ok(()) => {
                self.set_status(STATUS_OPENED);
                None
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "Browser launch failed");
                Some(Notice::error(
                    "Error",
                    format!("Failed to open URL in browser: {}", e),
                ))
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn copy_url(&mut self) -> Option<Notice> {
        let url = match self.current_url() {
            Some(url) => url,
            None => {
                return Some(Notice::warning(
                    "No URL to copy. Generate an authentication URL first.",
                ))
            }
        };

        match self.clipboard.set_text(&url) {
            Ok(()) => {
                self.set_status(STATUS_COPIED);
                None
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "Clipboard write failed");
                Some(Notice::error(
                    "Error",
                    format!("Failed to copy URL to clipboard: {}", e),
                ))
            }
        }
    }

    pub fn clear(&mut self) {
        self.request.clear_fields();
        self.url = None;
        self.outputs_enabled = false;
        self.set_status(STATUS_CLEARED);
    }

    fn current_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(ToString::to_string)
    }
}
