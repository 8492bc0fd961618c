//! AI Chat Gateway Server
//!
//! HTTP gateway that forwards prompts to third-party LLM providers

use aichat_gateway::config::{LoggingConfig, Settings};
use aichat_gateway::{create_router, version_info};
use anyhow::{Context, Result};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment and .env
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging);
    info!("{}", version_info());

    if settings.is_production() {
        info!("Running in production mode, /store-keys will refuse writes");
    }
    if settings.compat.legacy_vendor_errors {
        warn!("Legacy vendor errors enabled, provider failures are reported as normal responses");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Create router
    let app = create_router(settings).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 AI Chat API server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Generate endpoint: http://{}/generate", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging(config: &LoggingConfig) {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Tracing subscriber already set, keeping the existing one");
    }

    info!("Logging system initialized");
}
