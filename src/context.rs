//! Per-request page context.
//!
//! The host system's page globals are replaced by an explicit context object
//! constructed once per request and passed to whatever renders.

use crate::types::escape_html;

/// Context for rendering one page of the repository UI.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Target URL of the page.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Page heading.
    pub heading: String,
    /// Whether the page requires an authenticated session.
    pub requires_login: bool,
}

impl PageContext {
    /// Create a context for a public page.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        heading: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            heading: heading.into(),
            requires_login: false,
        }
    }

    /// Mark the page as requiring login.
    pub fn with_login_required(mut self) -> Self {
        self.requires_login = true;
        self
    }

    /// Wrap rendered body markup in the page shell.
    pub fn render(&self, body: &str) -> String {
        let title = escape_html(&self.title);
        let heading = escape_html(&self.heading);

        format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{heading}</h1>\n{body}\n</body>\n</html>\n"
        )
    }
}
