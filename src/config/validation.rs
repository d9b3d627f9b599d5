//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route compiles and every target is well formed
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate route names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::dispatch::{DispatchError, Target};
use crate::routing::pattern::CompiledPattern;
use crate::routing::{MatchTypes, MethodFilter, RoutingError};

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("routing.not_found: {0}")]
    NotFoundTarget(#[source] DispatchError),

    #[error("routing.match_types: {0}")]
    MatchType(#[source] RoutingError),

    #[error("routes[{index}]: {source}")]
    Route {
        index: usize,
        #[source]
        source: RoutingError,
    },

    #[error("routes[{index}]: {source}")]
    Target {
        index: usize,
        #[source]
        source: DispatchError,
    },
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if let Err(e) = Target::parse(&config.routing.not_found) {
        errors.push(ValidationError::NotFoundTarget(e));
    }

    let mut types = MatchTypes::new();
    for (name, mt) in &config.routing.match_types {
        if let Err(e) = types.insert(name.clone(), mt.regex.clone(), mt.kind) {
            errors.push(ValidationError::MatchType(e));
        }
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if let Err(source) = MethodFilter::parse(&route.method) {
            errors.push(ValidationError::Route { index, source });
        }
        if let Err(source) = CompiledPattern::compile(&route.pattern, &types) {
            errors.push(ValidationError::Route { index, source });
        }
        if let Err(source) = Target::parse(&route.target) {
            errors.push(ValidationError::Target { index, source });
        }
        if let Some(name) = &route.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::Route {
                    index,
                    source: RoutingError::DuplicateRouteName(name.clone()),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
