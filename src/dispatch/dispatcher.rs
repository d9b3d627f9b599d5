//! Match-to-handler dispatch.
//!
//! # Responsibilities
//! - Resolve a route target to a handler action
//! - Run exactly one action per request
//! - Answer unmatched requests with 404 and the not-found action
//!
//! # Design Decisions
//! - The not-found target is resolved at construction (fail fast)
//! - Handler errors are propagated, never swallowed
//! - A failing not-found action is a distinct, loud error

use std::sync::Arc;

use axum::http::StatusCode;

use crate::dispatch::error::DispatchError;
use crate::dispatch::registry::HandlerRegistry;
use crate::dispatch::reply::Reply;
use crate::dispatch::target::Target;
use crate::routing::{Params, RouteMatch, RouteTable};

/// Dispatches match outcomes to registered handler groups.
#[derive(Debug)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    handlers: Arc<HandlerRegistry>,
    not_found: Target,
}

impl Dispatcher {
    /// Build a dispatcher. Fails if `not_found` does not name a registered
    /// action.
    pub fn new(
        routes: Arc<RouteTable>,
        handlers: Arc<HandlerRegistry>,
        not_found: &str,
    ) -> Result<Self, DispatchError> {
        let not_found = Target::parse(not_found)?;
        handlers.resolve(&not_found)?;
        Ok(Self {
            routes,
            handlers,
            not_found,
        })
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    pub fn not_found(&self) -> &Target {
        &self.not_found
    }

    /// Every route whose target would fail to resolve.
    pub fn check_targets(&self) -> Vec<DispatchError> {
        self.routes
            .routes()
            .iter()
            .filter_map(|route| {
                Target::parse(&route.target)
                    .and_then(|target| self.handlers.resolve(&target).map(|_| ()))
                    .err()
            })
            .collect()
    }

    /// Match `method` and `path`, then dispatch into a fresh reply.
    pub fn handle(&self, method: &str, path: &str) -> Result<Reply, DispatchError> {
        let outcome = self.routes.match_request(method, path);
        let mut reply = Reply::new();
        self.dispatch(outcome, &mut reply)?;
        Ok(reply)
    }

    pub fn dispatch(
        &self,
        outcome: Option<RouteMatch>,
        reply: &mut Reply,
    ) -> Result<(), DispatchError> {
        match outcome {
            Some(matched) => {
                tracing::debug!(
                    route_target = %matched.target,
                    route = ?matched.name,
                    "Dispatching matched route"
                );
                let target = Target::parse(&matched.target)?;
                self.invoke(&target, &matched.params, reply)
            }
            None => {
                reply.set_status(StatusCode::NOT_FOUND);
                self.invoke(&self.not_found, &Params::new(), reply)
                    .map_err(|e| {
                        tracing::error!(
                            route_target = %self.not_found,
                            error = %e,
                            "Not-found handler failed"
                        );
                        DispatchError::Fallback(Box::new(e))
                    })
            }
        }
    }

    fn invoke(
        &self,
        target: &Target,
        params: &Params,
        reply: &mut Reply,
    ) -> Result<(), DispatchError> {
        let action = self.handlers.resolve(target)?;
        action(&self.routes, params, reply).map_err(|source| DispatchError::Handler {
            target: target.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::registry::HandlerResult;
    use crate::view::Page;

    struct Pages;

    impl Pages {
        fn show(&self, params: &Params, reply: &mut Reply) -> HandlerResult {
            reply.render(Page::new("show").with("params", params));
            Ok(())
        }

        fn missing(&self, _params: &Params, reply: &mut Reply) -> HandlerResult {
            reply.render(Page::new("missing"));
            Ok(())
        }

        fn broken(&self, _params: &Params, _reply: &mut Reply) -> HandlerResult {
            Err("database unavailable".into())
        }
    }

    fn dispatcher(not_found: &str) -> Result<Dispatcher, DispatchError> {
        let mut table = RouteTable::new();
        table.register("GET", "/show/[i:id]", "Pages#show", Some("show")).unwrap();
        table.register("GET", "/broken", "Pages#broken", None).unwrap();
        table.register("GET", "/bad-target", "Pages", None).unwrap();

        let mut registry = HandlerRegistry::new();
        registry
            .group("Pages", |_| Pages)
            .action("show", Pages::show)
            .action("missing", Pages::missing)
            .action("broken", Pages::broken);

        Dispatcher::new(Arc::new(table), Arc::new(registry), not_found)
    }

    #[test]
    fn test_matched_keeps_default_status() {
        let d = dispatcher("Pages#missing").unwrap();
        let reply = d.handle("GET", "/show/5").unwrap();
        assert_eq!(reply.status(), StatusCode::OK);
        assert_eq!(reply.page().unwrap().view, "show");
        assert_eq!(reply.page().unwrap().var("params").unwrap()["id"], 5);
    }

    #[test]
    fn test_unmatched_sets_404_and_runs_fallback() {
        let d = dispatcher("Pages#missing").unwrap();
        let reply = d.handle("GET", "/nowhere").unwrap();
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert_eq!(reply.page().unwrap().view, "missing");
    }

    #[test]
    fn test_handler_error_propagates() {
        let d = dispatcher("Pages#missing").unwrap();
        let err = d.handle("GET", "/broken").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Handler { ref target, .. } if target == "Pages#broken"
        ));
        assert!(err.to_string().contains("database unavailable"));
    }

    #[test]
    fn test_malformed_target_at_dispatch() {
        let d = dispatcher("Pages#missing").unwrap();
        let err = d.handle("GET", "/bad-target").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedTarget(_)));
    }

    #[test]
    fn test_check_targets_reports_bad_routes() {
        let d = dispatcher("Pages#missing").unwrap();
        let errors = d.check_targets();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], DispatchError::MalformedTarget(_)));
    }

    #[test]
    fn test_unresolvable_fallback_rejected_at_construction() {
        let err = dispatcher("Pages#nothing").unwrap_err();
        assert!(matches!(err, DispatchError::UnknownAction { .. }));

        let err = dispatcher("Pages").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedTarget(_)));
    }

    #[test]
    fn test_failing_fallback_is_reported() {
        let d = dispatcher("Pages#broken").unwrap();
        let err = d.handle("GET", "/nowhere").unwrap_err();
        assert!(matches!(err, DispatchError::Fallback(_)));
    }
}
