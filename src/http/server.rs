//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router; every path goes to one fallback handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Match and dispatch each request through the active dispatcher
//! - Swap in a rebuilt dispatcher when the configuration changes
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::dispatch::{Dispatcher, HandlerRegistry, Reply};
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::lifecycle::shutdown;
use crate::lifecycle::startup::{build_dispatcher, StartupError};
use crate::observability::metrics;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    /// The active dispatcher; replaced whole on reload.
    pub dispatcher: Arc<ArcSwap<Dispatcher>>,
}

/// HTTP front controller.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
    handlers: Arc<HandlerRegistry>,
}

impl HttpServer {
    /// Build the route table and dispatcher for `config`.
    pub fn new(config: AppConfig, handlers: Arc<HandlerRegistry>) -> Result<Self, StartupError> {
        let dispatcher = build_dispatcher(&config, Arc::clone(&handlers))?;
        let state = AppState {
            dispatcher: Arc::new(ArcSwap::from_pointee(dispatcher)),
        };
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
            handlers,
        })
    }

    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    ))),
            )
    }

    /// Rebuild and swap the dispatcher for every config received.
    ///
    /// A config that fails to build is logged and dropped; the running
    /// routes stay in place.
    pub fn watch_config(
        &self,
        mut updates: mpsc::UnboundedReceiver<AppConfig>,
    ) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        let handlers = Arc::clone(&self.handlers);
        tokio::spawn(async move {
            while let Some(config) = updates.recv().await {
                match build_dispatcher(&config, Arc::clone(&handlers)) {
                    Ok(dispatcher) => {
                        state.dispatcher.store(Arc::new(dispatcher));
                        tracing::info!("Route table swapped");
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            "Rebuilt routes rejected, keeping current routes"
                        );
                    }
                }
            }
        })
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.dispatcher.load().routes().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Front controller: match, dispatch, render.
async fn dispatch_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();
    let dispatcher = state.dispatcher.load_full();

    let outcome = dispatcher.routes().match_request(method.as_str(), uri.path());
    let matched = outcome.is_some();
    let route = outcome.as_ref().and_then(|m| m.name.clone());
    if !matched {
        tracing::info!(method = %method, path = %uri.path(), "No route matched");
    }

    let mut reply = Reply::new();
    match dispatcher.dispatch(outcome, &mut reply) {
        Ok(()) => {
            metrics::record_request(route.as_deref(), matched, reply.status().as_u16(), start);
            reply.into_response()
        }
        Err(e) => {
            tracing::error!(method = %method, path = %uri.path(), error = %e, "Dispatch failed");
            metrics::record_dispatch_error(e.kind());
            metrics::record_request(
                route.as_deref(),
                matched,
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                start,
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
