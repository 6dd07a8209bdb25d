use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use charlie_bot::{TurnInterpreter, WeatherClient};
use charlie_core::config::{CharlieConfig, StateBackend, StateConfig};
use charlie_core::types::OutboundReply;
use charlie_protocol::Activity;
use charlie_state::{ConversationState, MemoryState, SqliteState};

mod app;
mod http;

#[derive(Parser)]
#[command(name = "charlie-gateway")]
#[command(about = "Charlie single-turn command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the activity endpoint (POST /api/messages) and /health. Default command.
    Serve {
        /// Config file path (default: CHARLIE_CONFIG or ~/.charlie/charlie.toml)
        #[arg(long, short, value_name = "PATH")]
        config: Option<String>,

        /// HTTP port (default from config or 3978)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Run a single message turn locally and print the reply.
    Say {
        /// Config file path (default: CHARLIE_CONFIG or ~/.charlie/charlie.toml)
        #[arg(long, short, value_name = "PATH")]
        config: Option<String>,

        /// Message text, e.g. `weather Boston`
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "charlie_gateway=info,charlie_bot=info,tower_http=debug".into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => serve(None, None).await,
        Some(Commands::Serve { config, port }) => serve(config, port).await,
        Some(Commands::Say { config, text }) => say(config, &text.join(" ")).await,
        Some(Commands::Version) => {
            println!(
                "charlie-gateway {} ({})",
                env!("CARGO_PKG_VERSION"),
                env!("CHARLIE_GIT_SHA")
            );
            Ok(())
        }
    }
}

/// Load config: explicit path > CHARLIE_CONFIG env > ~/.charlie/charlie.toml
fn load_config(explicit: Option<String>) -> CharlieConfig {
    let path = explicit.or_else(|| std::env::var("CHARLIE_CONFIG").ok());
    CharlieConfig::load(path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        CharlieConfig::default()
    })
}

async fn serve(config_path: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = load_config(config_path);

    let state = open_state(&config.state)?;
    info!(backend = state.name(), "conversation state ready");

    if config.weather.api_key.is_none() {
        tracing::warn!("weather.api_key not set; weather lookups will answer with an error");
    }
    let weather = Arc::new(WeatherClient::new(&config.weather));
    let interpreter = TurnInterpreter::new(state, weather);

    let app_state = Arc::new(app::AppState::new(interpreter));
    let router = app::build_router(app_state);

    let port = port.unwrap_or(config.gateway.port);
    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, port).parse()?;
    info!("Charlie gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Local transport: one activity from the command line, reply on stdout.
async fn say(config_path: Option<String>, text: &str) -> anyhow::Result<()> {
    let config = load_config(config_path);
    let reply = say_turn(&config, text).await?;
    print!("{}", reply);
    Ok(())
}

/// Run one message turn against a throwaway in-memory state store.
async fn say_turn(config: &CharlieConfig, text: &str) -> anyhow::Result<OutboundReply> {
    let weather = Arc::new(WeatherClient::new(&config.weather));
    let interpreter = TurnInterpreter::new(Arc::new(MemoryState::new()), weather);

    let event = Activity::message("console", text).to_event();
    Ok(interpreter.interpret(&event).await?)
}

fn open_state(config: &StateConfig) -> anyhow::Result<Arc<dyn ConversationState>> {
    match config.backend {
        StateBackend::Memory => Ok(Arc::new(MemoryState::new())),
        StateBackend::Sqlite => {
            ensure_parent_dir(&config.path);
            info!(path = %config.path, "opening SQLite state store");
            Ok(Arc::new(SqliteState::open(&config.path)?))
        }
    }
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
