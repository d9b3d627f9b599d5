//! Outgoing response state filled in during dispatch.

use axum::http::StatusCode;

use crate::view::Page;

/// Status and rendered page of the response being built.
///
/// Starts at `200 OK`; the dispatcher only touches the status when no route
/// matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    page: Option<Page>,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            page: None,
        }
    }
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Hand a page to the view layer. A later call replaces an earlier one.
    pub fn render(&mut self, page: Page) {
        self.page = Some(page);
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn into_parts(self) -> (StatusCode, Option<Page>) {
        (self.status, self.page)
    }
}
