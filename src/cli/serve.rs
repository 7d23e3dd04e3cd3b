use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::TalentConfig;
use crate::errors::TalentError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, config: TalentConfig) -> Result<(), TalentError> {
    let server = config.server();
    let host = args.host.unwrap_or(server.host);
    let port = args.port.unwrap_or(server.port);
    let db = args.db.unwrap_or(server.db);

    info!(host = %host, port, db = %db, "Starting API server");

    let state = api::create_app_state(&config, &db).await?;
    if state.api_token.is_some() {
        info!("Bearer token required on /api routes");
    }
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TalentError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
