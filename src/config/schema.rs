//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::ParamKind;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, timeouts).
    pub listener: ListenerConfig,

    /// Base path, not-found target and custom match types.
    pub routing: RoutingConfig,

    /// Route definitions, tried in order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routing: RoutingConfig::default(),
            routes: default_routes(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The routes of the demo site.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::get("/", "MainController#home", Some("home")),
        RouteConfig::get(
            "/mentions-legales",
            "MainController#legalMentions",
            Some("legal-mentions"),
        ),
        RouteConfig::get("/catalogue/produit/[i:id]", "CatalogController#product", Some("product")),
        RouteConfig::get("/erreur-404", "MainController#error404", Some("error404")),
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Explicit base path. Takes precedence over `base_path_env`.
    pub base_path: Option<String>,

    /// Environment variable the hosting server uses to pass the base path.
    pub base_path_env: String,

    /// Target invoked (with status 404) when no route matches.
    pub not_found: String,

    /// Extra placeholder types, keyed by type name.
    pub match_types: BTreeMap<String, MatchTypeConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            base_path_env: "BASE_URI".to_string(),
            not_found: "MainController#error404".to_string(),
            match_types: BTreeMap::new(),
        }
    }
}

/// A custom placeholder type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchTypeConfig {
    /// Regex fragment matched by the placeholder.
    pub regex: String,

    /// Whether captures are integers or strings (default: string).
    #[serde(default)]
    pub kind: ParamKind,
}

/// A single route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Method filter: a verb, `GET|POST`, or `*`.
    #[serde(default = "default_method")]
    pub method: String,

    /// Pattern with `[type:name]` placeholders.
    pub pattern: String,

    /// Handler target, `Group#action`.
    pub target: String,

    /// Unique name for URL generation.
    #[serde(default)]
    pub name: Option<String>,
}

impl RouteConfig {
    pub fn get(pattern: &str, target: &str, name: Option<&str>) -> Self {
        Self {
            method: default_method(),
            pattern: pattern.to_string(),
            target: target.to_string(),
            name: name.map(str::to_string),
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
