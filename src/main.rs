use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phase_planner::config::{PlannerConfig, DEFAULT_PORT};
use phase_planner::planner::render::DEFAULT_CELL_WIDTH;
use phase_planner::planner::Planner;
use phase_planner::{api, mcp, share};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Phase-by-month planning board with flow arrows")]
struct Cli {
    /// Database file (overrides PHASE_PLANNER_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Start MCP server via stdio
    Mcp,
    /// Print the board as a text table
    Show {
        /// Characters per month column
        #[arg(short, long, default_value_t = DEFAULT_CELL_WIDTH)]
        width: usize,
    },
    /// Print every arrow's geometry as JSON
    Layout,
    /// Restore the built-in starting board
    Reset,
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "phase_planner=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // MCP mode: log to stderr so stdout is clean for protocol
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_planner(config: &PlannerConfig) -> anyhow::Result<Planner> {
    let db = config.open_database()?;
    let state = db.load_state();
    Ok(Planner::with_store(state, db))
}

async fn serve(config: &PlannerConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting planner server on port {}", port);

    let planner = share(open_planner(config)?);
    let app = api::create_router_with_config(planner, config);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Planner server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that print to stdout keep it free of log lines
    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let mut config = PlannerConfig::from_env();
    if cli.db.is_some() {
        config.db_path = cli.db;
    }

    match cli.command {
        Some(Commands::Serve { port }) => serve(&config, port).await?,
        Some(Commands::Mcp) => {
            let planner = share(open_planner(&config)?);
            mcp::run_stdio_server(planner).await?;
        }
        Some(Commands::Show { width }) => {
            let planner = open_planner(&config)?;
            print!("{}", planner.render(width));
        }
        Some(Commands::Layout) => {
            let planner = open_planner(&config)?;
            println!("{}", serde_json::to_string_pretty(&planner.arrow_layout())?);
        }
        Some(Commands::Reset) => {
            let mut planner = open_planner(&config)?;
            planner.reset();
            println!("Board reset to seed data");
        }
        None => serve(&config, DEFAULT_PORT).await?,
    }

    Ok(())
}
