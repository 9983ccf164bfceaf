use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use taskmine_server::state::AppState;

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 5001)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("⛏️  TaskMine server is initializing...");

    let state = Arc::new(AppState::new());
    let app = taskmine_server::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
