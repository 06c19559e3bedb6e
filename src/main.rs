use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_picker::{
    app,
    config::{Config, LogFormat},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load().context("Failed to load configuration")?;

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting seat picker ({})", config.app.environment);

    let layout = config
        .room
        .load_layout()
        .context("Failed to load seat layout")?;
    info!(
        "Layout loaded: {} rows, {} seats",
        layout.row_count(),
        layout.seat_count()
    );

    let host: std::net::IpAddr = config
        .app
        .host
        .parse()
        .with_context(|| format!("HOST must be an IP address, got {}", config.app.host))?;
    let addr = SocketAddr::from((host, config.app.port));

    let app = app(AppState::new(config, layout));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
