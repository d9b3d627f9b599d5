//! Request matching.
//!
//! # Responsibilities
//! - Strip the base path (and any query string) from the request path
//! - Try routes in registration order, first match wins
//! - Extract typed parameters from the winning route
//!
//! # Design Decisions
//! - Method comparison is exact and case-sensitive
//! - Trailing slash is significant; an empty path is treated as `/`
//! - No match is `None`, never an error

use serde::Serialize;

use crate::routing::params::Params;
use crate::routing::router::RouteTable;

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub target: String,
    pub params: Params,
    pub name: Option<String>,
}

impl RouteTable {
    /// Find the first route accepting `method` whose pattern matches `path`.
    pub fn match_request(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let Some(relative) = self.strip_base_path(path) else {
            tracing::trace!(path = %path, base_path = %self.base_path(), "Path outside base path");
            return None;
        };
        let relative = if relative.is_empty() { "/" } else { relative };

        self.routes()
            .iter()
            .filter(|route| route.method.allows(method))
            .find_map(|route| {
                route.pattern.captures(relative).map(|params| RouteMatch {
                    target: route.target.clone(),
                    params,
                    name: route.name.clone(),
                })
            })
    }

    /// The part of `path` after the base path, if `path` lives under it.
    pub fn strip_base_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.base_path())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}
