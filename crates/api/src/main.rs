use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use stockroom_infra::{AppConfig, Database, Services, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Database::connect(&config)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    if config.seed_sample_data {
        seed::load_sample_data(&db, Utc::now())
            .await
            .context("failed to load sample data")?;
    }

    let app = stockroom_api::app::build_app(Arc::new(Services::new(db.clone())));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
