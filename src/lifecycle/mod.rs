//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     AppConfig → resolve base path → RouteTable → Dispatcher → verify targets
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listeners
//! - Any startup error is fatal; reload errors keep the running routes

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
