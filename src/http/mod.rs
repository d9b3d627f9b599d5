//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one fallback handler for every path)
//!     → request.rs (request ID generation and propagation)
//!     → routing + dispatch (match, run handler action or 404 fallback)
//!     → response.rs (Reply → status + JSON page)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
