//! Reply to HTTP response conversion.
//!
//! # Responsibilities
//! - Carry the reply status onto the response
//! - Serialize the rendered page (view name + variables) as JSON
//!
//! # Design Decisions
//! - A reply without a page becomes an empty body with its status
//! - Dispatch failures never reach here; the server answers them with 500

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dispatch::Reply;

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let (status, page) = self.into_parts();
        match page {
            Some(page) => (status, Json(page)).into_response(),
            None => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::view::Page;

    #[test]
    fn test_status_is_kept() {
        let mut reply = Reply::new();
        reply.set_status(StatusCode::NOT_FOUND);
        reply.render(Page::new("error404"));
        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_empty_reply() {
        let response = Reply::new().into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("content-type").is_none());
    }
}
