//! Listener bring-up and the blocking serve loop.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::settings::Settings;

/// Bind a TCP listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
  TcpListener::bind(addr)
    .await
    .with_context(|| format!("failed to bind HTTP listener on {addr}"))
}

/// Serve `router` on `listener` until the process ends.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
  axum::serve(listener, router).await.context("HTTP server error")
}

/// Bind the configured port and serve the to-do routes on it.
pub async fn run(settings: &Settings) -> Result<()> {
  let router = routes::init();
  let listener = bind(settings.listen_addr()).await?;

  let listen_addr = listener.local_addr().context("failed to read bound address")?;
  info!(%listen_addr, "HTTP server listening");

  serve(listener, router).await
}
