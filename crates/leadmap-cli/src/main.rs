mod heatmap;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadmap")]
#[command(about = "Lead density heat map and unexplored-city recommendations")]
struct Cli {
    /// YAML file overriding the engine's tuning constants
    #[arg(long, global = true, env = "LEADMAP_ENGINE_CONFIG_PATH")]
    engine_config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute density points and nearby-city recommendations
    Recommend {
        /// JSON export of scraped records
        #[arg(long)]
        input: PathBuf,

        /// Restrict the run to a single record (by id)
        #[arg(long)]
        record: Option<String>,
    },
    /// Compute density points only, without contacting the lookup service
    Density {
        /// JSON export of scraped records
        #[arg(long)]
        input: PathBuf,

        /// Restrict the run to a single record (by id)
        #[arg(long)]
        record: Option<String>,
    },
}

/// Logs go to stderr; stdout carries the JSON report.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Recommend { input, record }) => {
            let app_config = leadmap_core::load_app_config_from_env()?;
            init_tracing(&app_config.log_level)?;
            tracing::debug!(config = ?app_config, "loaded app config");
            let engine_path = cli.engine_config.or(app_config.engine_config_path.clone());
            let engine = input::engine_config(engine_path.as_deref())?;
            let points = input::load_points(&input, record)?;
            heatmap::run_recommend(&app_config, &engine, points, cli.pretty).await?;
        }
        Some(Commands::Density { input, record }) => {
            // No lookup service involved, so the nearby-cities URL stays optional.
            init_tracing(&leadmap_core::log_level_from_env())?;
            let engine = input::engine_config(cli.engine_config.as_deref())?;
            let points = input::load_points(&input, record)?;
            heatmap::run_density(&engine, points, cli.pretty)?;
        }
        None => println!("leadmap: pass `recommend` or `density` (see --help)"),
    }

    Ok(())
}
