//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the base path from configuration or the hosting environment
//! - Build the route table (custom match types first, then routes)
//! - Build the dispatcher and verify every route target resolves
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The same path is used for config reload, so a bad reload is rejected
//!   before it replaces anything

use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, RoutingConfig};
use crate::dispatch::{DispatchError, Dispatcher, HandlerRegistry};
use crate::observability::metrics;
use crate::routing::{RouteTable, RoutingError};

/// Errors that prevent the router from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Routing(#[from] RoutingError),

    #[error("dispatcher: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("unresolved route targets: {}", join(.0))]
    UnresolvedTargets(Vec<DispatchError>),
}

fn join(errors: &[DispatchError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The explicit base path, else the hosting environment's variable, else "".
pub fn resolve_base_path(config: &RoutingConfig) -> String {
    match &config.base_path {
        Some(path) => path.clone(),
        None => std::env::var(&config.base_path_env).unwrap_or_default(),
    }
}

/// Build the route table described by `config`.
pub fn build_route_table(config: &AppConfig, base_path: &str) -> Result<RouteTable, RoutingError> {
    let mut table = RouteTable::with_base_path(base_path);
    for (name, mt) in &config.routing.match_types {
        table.add_match_type(name.clone(), mt.regex.clone(), mt.kind)?;
    }
    table.register_all(&config.routes)?;
    Ok(table)
}

/// Build a ready-to-serve dispatcher.
pub fn build_dispatcher(
    config: &AppConfig,
    handlers: Arc<HandlerRegistry>,
) -> Result<Dispatcher, StartupError> {
    let base_path = resolve_base_path(&config.routing);
    let table = build_route_table(config, &base_path)?;
    let dispatcher = Dispatcher::new(Arc::new(table), handlers, &config.routing.not_found)?;

    let unresolved = dispatcher.check_targets();
    if !unresolved.is_empty() {
        return Err(StartupError::UnresolvedTargets(unresolved));
    }

    tracing::info!(
        routes = dispatcher.routes().len(),
        base_path = %dispatcher.routes().base_path(),
        not_found = %dispatcher.not_found(),
        "Route table ready"
    );
    metrics::record_route_count(dispatcher.routes().len());
    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchTypeConfig, RouteConfig};
    use crate::controllers;
    use crate::routing::{ParamKind, Params};

    #[test]
    fn test_explicit_base_path_wins() {
        let config = RoutingConfig {
            base_path: Some("/explicit".into()),
            base_path_env: "FRONT_ROUTER_TEST_UNSET_VAR".into(),
            ..Default::default()
        };
        assert_eq!(resolve_base_path(&config), "/explicit");
    }

    #[test]
    fn test_base_path_from_environment() {
        std::env::set_var("FRONT_ROUTER_TEST_BASE_URI", "/revisions/routing/public");
        let config = RoutingConfig {
            base_path_env: "FRONT_ROUTER_TEST_BASE_URI".into(),
            ..Default::default()
        };
        assert_eq!(resolve_base_path(&config), "/revisions/routing/public");
    }

    #[test]
    fn test_missing_environment_means_empty() {
        let config = RoutingConfig {
            base_path_env: "FRONT_ROUTER_TEST_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(resolve_base_path(&config), "");
    }

    #[test]
    fn test_build_default_dispatcher() {
        let mut config = AppConfig::default();
        config.routing.base_path = Some("/shop".into());
        let dispatcher = build_dispatcher(&config, Arc::new(controllers::registry())).unwrap();

        assert_eq!(dispatcher.routes().len(), 4);
        assert_eq!(
            dispatcher
                .routes()
                .generate("product", &Params::new().with("id", 9i64))
                .unwrap(),
            "/shop/catalogue/produit/9"
        );
    }

    #[test]
    fn test_relative_base_path_from_environment_is_rooted() {
        std::env::set_var("FRONT_ROUTER_TEST_RELATIVE_BASE", "shop/");
        let mut config = AppConfig::default();
        config.routing.base_path_env = "FRONT_ROUTER_TEST_RELATIVE_BASE".into();
        let dispatcher = build_dispatcher(&config, Arc::new(controllers::registry())).unwrap();

        assert_eq!(dispatcher.routes().base_path(), "/shop");
        let reply = dispatcher.handle("GET", "/shop/mentions-legales").unwrap();
        assert_eq!(reply.page().unwrap().view, "legal_mentions");
    }

    #[test]
    fn test_custom_match_types_registered_before_routes() {
        let mut config = AppConfig::default();
        config.routing.base_path = Some(String::new());
        config.routing.match_types.insert(
            "year".into(),
            MatchTypeConfig {
                regex: "[0-9]{4}".into(),
                kind: ParamKind::Int,
            },
        );
        config
            .routes
            .push(RouteConfig::get("/archive/[year:y]", "MainController#home", Some("archive")));

        let table = build_route_table(&config, "").unwrap();
        let m = table.match_request("GET", "/archive/2024").unwrap();
        assert_eq!(m.params.get_int("y"), Some(2024));
        assert!(table.match_request("GET", "/archive/24").is_none());
    }

    #[test]
    fn test_unresolved_targets_fail_startup() {
        let mut config = AppConfig::default();
        config.routing.base_path = Some(String::new());
        config
            .routes
            .push(RouteConfig::get("/panier", "CartController#show", None));

        let err = build_dispatcher(&config, Arc::new(controllers::registry())).unwrap_err();
        assert!(matches!(err, StartupError::UnresolvedTargets(ref e) if e.len() == 1));
        assert!(err.to_string().contains("CartController"));
    }

    #[test]
    fn test_unknown_not_found_target_fails_startup() {
        let mut config = AppConfig::default();
        config.routing.base_path = Some(String::new());
        config.routing.not_found = "MainController#missing".into();

        let err = build_dispatcher(&config, Arc::new(controllers::registry())).unwrap_err();
        assert!(matches!(err, StartupError::Dispatch(DispatchError::UnknownAction { .. })));
    }
}
