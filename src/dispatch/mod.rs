//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Option<RouteMatch>
//!     → dispatcher.rs
//!         Some: target.rs ("Group#action") → registry.rs (group factory + action)
//!               → action(&routes, &params, &mut Reply)
//!         None: Reply status = 404 → configured not-found action, empty params
//!     → reply.rs (status + Page for the view layer)
//! ```
//!
//! # Design Decisions
//! - Handler groups live in an explicit registry, enumerable at startup
//! - Handlers receive the shared route table (reverse URLs inside views)
//! - Exactly one action runs per request

pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod reply;
pub mod target;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, HandlerError};
pub use registry::{Action, HandlerRegistry, HandlerResult};
pub use reply::Reply;
pub use target::Target;
