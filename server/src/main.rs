mod backend;
mod config;

use anyhow::Result;
use axum::serve;
use log::info;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::backend::{create_router, initialize_backend};
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load()?;
    let app_state = initialize_backend(&config).await?;
    let router = create_router(app_state, &config);

    let addr: SocketAddr = config.bind_addr.parse()?;
    info!("🌐 Starting Spendboard REST API server at {}", addr);
    let listener = TcpListener::bind(addr).await?;
    serve(listener, router).await?;

    Ok(())
}
