//! Circuit Calculator Service (circuitsrv)
//!
//! Stateless HTTP service for basic electrical circuit calculations.

use std::sync::Arc;

use axum::serve;
use clap::Parser;
use tracing::{error, info};

use circuitsrv::{
    bootstrap::{self, Args, ServiceArgs},
    create_app, AppState,
};
use common::shutdown::wait_for_shutdown;
use errors::{CircuitError, CircuitResult};

fn main() -> CircuitResult<()> {
    let args = Args::parse();
    let service_args: ServiceArgs = args.into();

    // The environment must be complete before any worker thread exists
    common::service_bootstrap::load_development_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CircuitError::StartupFailed(format!("Failed to build runtime: {}", e)))?;

    runtime.block_on(run(service_args))
}

async fn run(service_args: ServiceArgs) -> CircuitResult<()> {
    // Configuration comes first so logging can honour logging.* settings
    let config = bootstrap::load_config(&service_args)?;
    let service_info = bootstrap::service_info(&config);

    bootstrap::initialize_logging(&service_args, &service_info, &config)?;
    if !service_args.no_color {
        common::service_bootstrap::print_startup_banner(&service_info);
    }

    // Validation mode: validate and exit
    if service_args.validate {
        info!("Validation completed successfully");
        return Ok(());
    }

    let bind_address = bootstrap::determine_bind_address(
        service_args.bind_address.clone(),
        &config.api.host,
        config.api.port,
    );
    let addr = bootstrap::parse_bind_address(&bind_address)?;

    let state = Arc::new(AppState::new(service_info, config));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CircuitError::StartupFailed(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("API server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    if let Err(e) = serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        error!("Server error: {}", e);
        return Err(CircuitError::Io(e));
    }

    info!("circuitsrv stopped");
    Ok(())
}
