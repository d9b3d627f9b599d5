//! Routing error definitions.

use thiserror::Error;

/// Errors raised while building the route table or generating URLs.
///
/// Registration errors are configuration mistakes and are expected to abort
/// startup. No-match is not an error: the matcher returns `None` for it.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A route with this name is already registered.
    #[error("route name '{0}' is already registered")]
    DuplicateRouteName(String),

    /// A placeholder refers to a match type that does not exist.
    #[error("unknown match type '{kind}' in pattern '{pattern}'")]
    UnknownMatchType { pattern: String, kind: String },

    /// The pattern has malformed placeholder syntax.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The method filter is empty or contains an empty alternative.
    #[error("invalid method filter '{0}'")]
    InvalidMethod(String),

    /// Match types cannot change once a route has been compiled against them.
    #[error("match types are frozen once routes are registered (tried to add '{0}')")]
    MatchTypesFrozen(String),

    /// A custom match type fragment is not a valid regex.
    #[error("match type '{name}' has an invalid regex: {source}")]
    InvalidMatchType {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// No route carries this name.
    #[error("route '{0}' does not exist")]
    UnknownRouteName(String),

    /// A required placeholder has no value.
    #[error("missing parameter '{param}' for route '{route}'")]
    MissingParameter { route: String, param: String },
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoutingError::DuplicateRouteName("home".into());
        assert_eq!(err.to_string(), "route name 'home' is already registered");

        let err = RoutingError::MissingParameter {
            route: "product".into(),
            param: "id".into(),
        };
        assert!(err.to_string().contains("'id'"));
        assert!(err.to_string().contains("'product'"));
    }
}
