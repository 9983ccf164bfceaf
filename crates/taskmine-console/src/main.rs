use clap::{Parser, Subcommand};
use tracing::info;

mod cmd;

#[derive(Parser)]
#[command(name = "taskmine", about = "Terminal console for the TaskMine simulation service", version)]
struct Cli {
    /// Base URL of the simulation service.
    #[arg(long, global = true, default_value = "http://localhost:5001")]
    api: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation with the published defaults, optionally overridden.
    Run(cmd::run::RunArgs),
    /// Interactive shell: edit the form field by field, then run.
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    info!("🖥️ TaskMine console targeting {}", cli.api);

    match cli.command {
        Commands::Run(args) => cmd::run::execute(&cli.api, args).await,
        Commands::Shell => cmd::shell::execute(&cli.api).await,
    }
}
