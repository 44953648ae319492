use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use butterfly_common::Config;
use butterfly_io::{load_ch_snapshot, load_network};
use butterfly_serve::{router, AppState};

#[derive(Parser)]
#[command(name = "butterfly-serve")]
#[command(about = "HTTP front end over the butterfly-osm transit routing engine", long_about = None)]
struct Args {
    /// Network JSON file (as produced by `butterfly-plan build`)
    #[arg(long)]
    network: PathBuf,
    /// Optional preprocessed CH snapshot; when omitted, /route falls back to bidirectional Dijkstra
    #[arg(long)]
    ch: Option<PathBuf>,
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    tracing::info!(path = %args.network.display(), "loading network");
    let net = load_network(&args.network).context("loading network")?;
    tracing::info!(nodes = net.len(), "network loaded");

    let ch = match &args.ch {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading CH snapshot");
            let ch = load_ch_snapshot(&net, path).context("loading CH snapshot")?;
            tracing::info!(shortcuts = ch.no_shortcuts(), "CH snapshot loaded");
            Some(ch)
        }
        None => {
            tracing::warn!("no CH snapshot given; /route falls back to bidirectional Dijkstra per query");
            None
        }
    };

    let state = AppState::new(net, ch, Config::default());
    let app = router(state).layer(tower_http::trace::TraceLayer::new_for_http()).layer(tower_http::cors::CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&args.bind).await.context("binding listener")?;
    tracing::info!(addr = %args.bind, "serving");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
