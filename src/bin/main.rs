use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ledger_service::{api, Ledger};

/// A cli interface to the ledger service
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The socket address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: std::net::SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let ledger = Arc::new(Ledger::new());
    let app = api::build_app(ledger);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
