use std::sync::Arc;

use clap::Parser;
use log::info;
use poi_route_core::{PointRegistry, Result, ServerOptions, logging};
use tokio::net::TcpListener;

mod server;

use server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    let options = ServerOptions::parse();
    logging::init_logger(&options.log)?;
    let optimizer = options.optimizer();
    optimizer.validate()?;

    info!(
        "options: bind={} iterations={} restarts={} seed={:?}",
        options.bind, optimizer.iterations, optimizer.restarts, options.seed
    );

    let registry = PointRegistry::with_default_seeds();
    info!("registry: seeds={}", registry.list_seed_names().len());
    let state = Arc::new(AppState::new(registry, optimizer, options.seed));

    let listener = TcpListener::bind(options.bind).await?;
    info!("server: listening addr={}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server: stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("server: failed to install shutdown handler err={err}");
        std::future::pending::<()>().await;
    }
}
