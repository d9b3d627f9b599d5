//! Front-controller web router library.
//!
//! Routes are declared as `[type:name]` patterns, matched against the
//! request method and path, dispatched to `Group#action` handlers and
//! reversed back into URLs by name.

pub mod config;
pub mod controllers;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::AppConfig;
pub use dispatch::{Dispatcher, HandlerRegistry, Reply};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Params, RouteMatch, RouteTable};
