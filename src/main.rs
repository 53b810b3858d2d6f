//! SEO Dashboard - Server and maintenance CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use seo_dashboard::catalog::{self, Category};
use seo_dashboard::{AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seo-dashboard")]
#[command(about = "SEO task dashboard backend")]
struct Cli {
    /// Path to the YAML config file (defaults to ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write the default of every document not stored yet
    Seed,

    /// Print completion per category and overall
    Status,

    /// Flip the completion flag of one task
    Toggle {
        /// Category key (e.g. technical, onPage)
        category: String,
        /// Task id within the category
        task_id: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seo_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            seo_dashboard::start_server(config).await
        }
        Commands::Seed => run_seed(config).await,
        Commands::Status => run_status(config).await,
        Commands::Toggle { category, task_id } => run_toggle(config, &category, task_id).await,
    }
}

async fn run_seed(config: Config) -> Result<()> {
    let state = AppState::new(config)?;
    let written = state.dashboard.seed_all().await?;
    state.event_bus.flush().await;

    if written.is_empty() {
        println!("nothing to seed, every document is stored");
    }
    for key in written {
        println!("seeded {}", key);
    }
    Ok(())
}

async fn run_status(config: Config) -> Result<()> {
    let state = AppState::new(config)?;
    let tasks = state.dashboard.tasks().get_tasks().await?;
    // A first read may have seeded the catalog
    state.event_bus.flush().await;
    let summary = catalog::summarize(&tasks);

    for line in &summary.categories {
        println!(
            "{:<12} {:>3}%  ({}/{})",
            line.label, line.percent, line.completed, line.total
        );
    }
    println!(
        "{:<12} {:>3}%  ({}/{})",
        "Overall", summary.overall, summary.completed, summary.total
    );
    Ok(())
}

async fn run_toggle(config: Config, category: &str, task_id: u32) -> Result<()> {
    let state = AppState::new(config)?;
    let tasks = state
        .dashboard
        .tasks()
        .toggle_task_completion(category, task_id)
        .await?;
    // Revalidation requests must finish before the runtime shuts down
    state.event_bus.flush().await;

    // Category parsed successfully inside the toggle
    let category: Category = category.parse()?;
    if let Some(task) = tasks.find(category, task_id) {
        let state_label = if task.completed { "completed" } else { "open" };
        println!("{} [{}]: {}", task.name, category, state_label);
    }
    println!(
        "{} completion: {}%",
        category.label(),
        catalog::calculate_completion_for(&tasks, category)
    );
    Ok(())
}
