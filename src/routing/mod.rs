//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     RouteConfig[] / register() calls
//!     → pattern.rs (parse placeholders, compile regex)
//!     → router.rs (ordered table, unique names)
//!     → Freeze as immutable Arc<RouteTable>
//!
//! Incoming Request (method, path)
//!     → matcher.rs (strip base path, first match wins)
//!     → Return: RouteMatch { target, params, name } or None
//!
//! URL Generation:
//!     route name + Params
//!     → reverse.rs (substitute placeholders, prepend base path)
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, never at match time
//! - Unknown placeholder types fail fast
//! - Deterministic: same input always matches same route
//! - First match wins (registration order, no priorities)

pub mod error;
pub mod match_types;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod reverse;
pub mod router;

pub use error::{RoutingError, RoutingResult};
pub use match_types::{MatchType, MatchTypes, ParamKind};
pub use matcher::RouteMatch;
pub use params::{ParamValue, Params};
pub use router::{MethodFilter, Route, RouteTable};
