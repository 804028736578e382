// Health-check HTTP server.
//
// Hosting platforms ping `/` to decide whether the process is alive. The
// server runs on its own OS thread with its own runtime so a busy gateway
// can never make it miss a ping.

use crate::core::status::BotName;
use axum::{extract::State, routing::get, Router};
use std::net::SocketAddr;
use std::thread::JoinHandle;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum HealthServerError {
    #[error("failed to bind health-check listener: {0}")]
    Bind(#[from] std::io::Error),
}

pub fn health_message(name: &str) -> String {
    format!("Bot {} is active", name)
}

pub fn router(name: BotName) -> Router {
    Router::new().route("/", get(home)).with_state(name)
}

async fn home(State(name): State<BotName>) -> String {
    health_message(&name.get())
}

/// Handle to the running server. Dropping it asks the server to stop without
/// waiting; `shutdown` also joins the thread.
pub struct HealthServer {
    addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl HealthServer {
    pub fn spawn(addr: SocketAddr, name: BotName) -> Result<Self, HealthServerError> {
        // Bind up front so the caller hears about a taken port.
        let listener = std::net::TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let thread = std::thread::Builder::new()
            .name("health-server".to_string())
            .spawn(move || serve(listener, name, stop_rx))?;

        tracing::debug!(%addr, "Health check server thread started");

        Ok(Self {
            addr,
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("Health check thread panicked during shutdown");
            }
        }
        tracing::info!("Health check server stopped");
    }
}

impl Drop for HealthServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

fn serve(listener: std::net::TcpListener, name: BotName, stop: oneshot::Receiver<()>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start health check runtime: {}", e);
            return;
        }
    };

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("Failed to register health check listener: {}", e);
                return;
            }
        };

        let shutdown = async move {
            let _ = stop.await;
        };

        if let Err(e) = axum::serve(listener, router(name))
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!("Health check server error: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_local(name: BotName) -> HealthServer {
        HealthServer::spawn(SocketAddr::from(([127, 0, 0, 1], 0)), name).unwrap()
    }

    #[test]
    fn test_health_message() {
        assert_eq!(health_message("None"), "Bot None is active");
    }

    #[tokio::test]
    async fn test_reports_placeholder_before_ready() {
        let server = spawn_local(BotName::new());
        let url = format!("http://{}/", server.local_addr());

        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(response.text().await.unwrap(), "Bot None is active");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_reports_name_once_connected() {
        let name = BotName::new();
        let server = spawn_local(name.clone());
        let url = format!("http://{}/", server.local_addr());

        name.set("Seemu#4821");

        let body = reqwest::get(&url).await.unwrap().text().await.unwrap();
        assert_eq!(body, "Bot Seemu#4821 is active");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_only_root_is_served() {
        let server = spawn_local(BotName::new());
        let url = format!("http://{}/status", server.local_addr());

        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[test]
    fn test_bind_conflict_is_reported() {
        let first = spawn_local(BotName::new());
        let taken = first.local_addr();

        let second = HealthServer::spawn(taken, BotName::new());
        assert!(matches!(second, Err(HealthServerError::Bind(_))));

        first.shutdown();
    }
}
