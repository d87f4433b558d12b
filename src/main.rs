use anyhow::{Context, Result};
use clap::Parser;
use interview_coach::{create_router, AppState, Config};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Mock interview practice server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = "config/interview-coach")]
    config: String,

    /// Override the configured HTTP port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Capture source: {}", cfg.capture.source);
    match cfg.session.completion_threshold {
        Some(n) => info!("Sessions complete after {} answers", n),
        None => info!("Sessions complete once every question is answered"),
    }

    let state = AppState::from_config(&cfg)?;
    let app = create_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", cfg.service.http.bind, port)
        .parse()
        .context("Invalid HTTP bind address")?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
