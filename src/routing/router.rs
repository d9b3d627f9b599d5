//! Route table: registration and storage.
//!
//! # Responsibilities
//! - Compile route patterns at registration
//! - Enforce unique route names
//! - Hold the base path and the match-type set
//!
//! # Design Decisions
//! - Immutable once handed out behind `Arc` (thread-safe without locks)
//! - Registration is atomic: a failed call leaves the table untouched
//! - Match types are frozen by the first registration

use std::collections::HashMap;
use std::fmt;

use crate::config::RouteConfig;
use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::match_types::{MatchTypes, ParamKind};
use crate::routing::pattern::CompiledPattern;

/// Which request methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    /// The `*` sentinel.
    Any,
    /// One or more exact, case-sensitive verbs (`GET|POST`).
    Only(Vec<String>),
}

impl MethodFilter {
    pub fn parse(filter: &str) -> RoutingResult<Self> {
        if filter == "*" {
            return Ok(MethodFilter::Any);
        }
        let methods: Vec<String> = filter.split('|').map(str::to_string).collect();
        if methods.iter().any(|m| m.is_empty() || m.contains(char::is_whitespace)) {
            return Err(RoutingError::InvalidMethod(filter.to_string()));
        }
        Ok(MethodFilter::Only(methods))
    }

    pub fn allows(&self, method: &str) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Only(methods) => methods.iter().any(|m| m == method),
        }
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodFilter::Any => f.write_str("*"),
            MethodFilter::Only(methods) => f.write_str(&methods.join("|")),
        }
    }
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: MethodFilter,
    pub pattern: CompiledPattern,
    /// Opaque handler identifier, `Group#action` by convention.
    pub target: String,
    pub name: Option<String>,
}

/// Ordered collection of routes plus the context needed to match them.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    named: HashMap<String, usize>,
    match_types: MatchTypes,
    base_path: String,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(base_path: &str) -> Self {
        let mut table = Self::new();
        table.set_base_path(base_path);
        table
    }

    /// Set the prefix under which the application is mounted. Trailing
    /// slashes are dropped, so `/` and `` are equivalent, and a missing
    /// leading slash is added (`app` becomes `/app`).
    pub fn set_base_path(&mut self, base_path: &str) {
        let trimmed = base_path.trim_end_matches('/');
        self.base_path = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Add a custom placeholder type. Only allowed before the first route.
    pub fn add_match_type(
        &mut self,
        name: impl Into<String>,
        regex: impl Into<String>,
        kind: ParamKind,
    ) -> RoutingResult<()> {
        let name = name.into();
        if !self.routes.is_empty() {
            return Err(RoutingError::MatchTypesFrozen(name));
        }
        self.match_types.insert(name, regex, kind)
    }

    pub fn match_types(&self) -> &MatchTypes {
        &self.match_types
    }

    /// Register a route. Routes are tried in registration order.
    pub fn register(
        &mut self,
        method: &str,
        pattern: &str,
        target: &str,
        name: Option<&str>,
    ) -> RoutingResult<()> {
        let route = self.prepare(method, pattern, target, name)?;
        if let Some(name) = name {
            if self.named.contains_key(name) {
                return Err(RoutingError::DuplicateRouteName(name.to_string()));
            }
        }
        self.push(route);
        Ok(())
    }

    /// Register every route from configuration, or none of them.
    pub fn register_all<'a, I>(&mut self, routes: I) -> RoutingResult<()>
    where
        I: IntoIterator<Item = &'a RouteConfig>,
    {
        let mut batch = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for rc in routes {
            let route = self.prepare(&rc.method, &rc.pattern, &rc.target, rc.name.as_deref())?;
            if let Some(name) = &route.name {
                if self.named.contains_key(name) || !seen.insert(name.clone()) {
                    return Err(RoutingError::DuplicateRouteName(name.clone()));
                }
            }
            batch.push(route);
        }
        for route in batch {
            self.push(route);
        }
        Ok(())
    }

    fn prepare(
        &self,
        method: &str,
        pattern: &str,
        target: &str,
        name: Option<&str>,
    ) -> RoutingResult<Route> {
        Ok(Route {
            method: MethodFilter::parse(method)?,
            pattern: CompiledPattern::compile(pattern, &self.match_types)?,
            target: target.to_string(),
            name: name.map(str::to_string),
        })
    }

    fn push(&mut self, route: Route) {
        tracing::debug!(
            method = %route.method,
            pattern = %route.pattern.source(),
            route_target = %route.target,
            name = ?route.name,
            "Route registered"
        );
        if let Some(name) = &route.name {
            self.named.insert(name.clone(), self.routes.len());
        }
        self.routes.push(route);
    }

    /// All routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.named.get(name).map(|&i| &self.routes[i])
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Params;

    fn route_config(pattern: &str, name: Option<&str>) -> RouteConfig {
        RouteConfig {
            method: "GET".into(),
            pattern: pattern.into(),
            target: "MainController#home".into(),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_method_filter() {
        assert!(MethodFilter::parse("*").unwrap().allows("DELETE"));

        let filter = MethodFilter::parse("GET|POST").unwrap();
        assert!(filter.allows("GET"));
        assert!(filter.allows("POST"));
        assert!(!filter.allows("get")); // Case sensitive
        assert!(!filter.allows("PUT"));
        assert_eq!(filter.to_string(), "GET|POST");

        assert!(MethodFilter::parse("").is_err());
        assert!(MethodFilter::parse("GET|").is_err());
    }

    #[test]
    fn test_base_path_normalized() {
        let mut table = RouteTable::new();
        table.set_base_path("/site/public/");
        assert_eq!(table.base_path(), "/site/public");

        table.set_base_path("/");
        assert_eq!(table.base_path(), "");
    }

    #[test]
    fn test_base_path_gains_leading_slash() {
        let mut table = RouteTable::with_base_path("app/");
        assert_eq!(table.base_path(), "/app");
        table.register("GET", "/", "MainController#home", Some("home")).unwrap();

        assert_eq!(table.generate("home", &Params::new()).unwrap(), "/app/");
        let matched = table.match_request("GET", "/app/").unwrap();
        assert_eq!(matched.name.as_deref(), Some("home"));
        assert!(table.match_request("GET", "/app").is_some());
    }

    #[test]
    fn test_unrooted_pattern_fails_at_registration() {
        let mut table = RouteTable::new();
        for pattern in ["", "mentions-legales"] {
            let err = table
                .register("GET", pattern, "MainController#home", Some("e"))
                .unwrap_err();
            assert!(matches!(err, RoutingError::InvalidPattern { .. }));
        }
        assert!(table.is_empty());
        assert!(table.route("e").is_none());
    }

    #[test]
    fn test_duplicate_name_leaves_table_unchanged() {
        let mut table = RouteTable::new();
        table.register("GET", "/", "MainController#home", Some("home")).unwrap();

        let err = table
            .register("GET", "/accueil", "MainController#home", Some("home"))
            .unwrap_err();
        assert!(matches!(err, RoutingError::DuplicateRouteName(ref n) if n == "home"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.route("home").unwrap().pattern.source(), "/");
    }

    #[test]
    fn test_unnamed_routes_do_not_collide() {
        let mut table = RouteTable::new();
        table.register("GET", "/a", "A#a", None).unwrap();
        table.register("POST", "/a", "A#b", None).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_type_fails_at_registration() {
        let mut table = RouteTable::new();
        let err = table
            .register("GET", "/blog/[slug:post]", "Blog#show", None)
            .unwrap_err();
        assert!(matches!(err, RoutingError::UnknownMatchType { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_match_types_frozen_after_registration() {
        let mut table = RouteTable::new();
        table.add_match_type("slug", "[a-z0-9-]+", ParamKind::Str).unwrap();
        table.register("GET", "/blog/[slug:post]", "Blog#show", None).unwrap();

        let err = table.add_match_type("year", "[0-9]{4}", ParamKind::Int).unwrap_err();
        assert!(matches!(err, RoutingError::MatchTypesFrozen(_)));
    }

    #[test]
    fn test_register_all_is_atomic() {
        let mut table = RouteTable::new();
        let batch = vec![
            route_config("/", Some("home")),
            route_config("/a", Some("a")),
            route_config("/b", Some("a")),
        ];
        assert!(table.register_all(&batch).is_err());
        assert!(table.is_empty());

        let batch = vec![route_config("/", Some("home")), route_config("/a", None)];
        table.register_all(&batch).unwrap();
        assert_eq!(table.len(), 2);
    }
}
