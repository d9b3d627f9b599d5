//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration, matching, dispatch:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never formatted strings, for route/target/status
//! - Request ID attached to every request span
//! - Metrics exporter is optional

pub mod logging;
pub mod metrics;
