use anyhow::Result;
use axum::Router;
use clap::Parser;
use recsys_core::{Backend, EngineConfig};
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Catalog CSV path
    #[arg(long, default_value = "./netflix_titles.csv")]
    catalog: String,
    /// Similarity backend: dense or inverted
    #[arg(long, default_value_t = Backend::Dense)]
    backend: Backend,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = EngineConfig { backend: args.backend, ..EngineConfig::default() };
    let app: Router = build_app(&args.catalog, &config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
