//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use front_router::config::AppConfig;
use front_router::dispatch::HandlerRegistry;
use front_router::http::HttpServer;
use front_router::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A router serving on an ephemeral local port.
#[allow(dead_code)]
pub struct TestRouter {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<AppConfig>,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestRouter {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), self.task).await;
    }
}

/// Start a router for `config` with `handlers` on 127.0.0.1:0.
pub async fn spawn_router(config: AppConfig, handlers: HandlerRegistry) -> TestRouter {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, Arc::new(handlers)).unwrap();
    let (updates, rx) = mpsc::unbounded_channel();
    server.watch_config(rx);

    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestRouter {
        addr,
        shutdown,
        updates,
        task,
    }
}

/// Default demo config mounted at `base_path`.
#[allow(dead_code)]
pub fn demo_config(base_path: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.routing.base_path = Some(base_path.to_string());
    config
}
