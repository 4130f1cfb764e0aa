use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use volunteer_roster::config::{load_config, RosterConfig};
use volunteer_roster::display::{print_roster, write_roster_to_file};
use volunteer_roster::web::{self, AppState};
use volunteer_roster::{generate_roster, CsvStore};

#[derive(Parser, Debug)]
#[command(name = "volunteer-roster")]
#[command(version)]
#[command(about = "Builds volunteer rosters for services and events")]
struct Args {
    /// Path to a roster.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a roster preview for one period
    Generate {
        /// Period identifier (as found in the data files)
        #[arg(long)]
        period: String,

        /// Directory holding slots.csv, volunteers.csv and availability.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Seed for a reproducible roster
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the text preview to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Serve roster previews over HTTP
    Serve {
        #[arg(long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        bind: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Generate {
            period,
            data_dir,
            seed,
            output,
            json,
        } => run_generate(&config, &period, data_dir, seed, output, json),
        Commands::Serve {
            data_dir,
            bind,
            port,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
            let bind = bind.unwrap_or_else(|| config.bind());
            let port = port.unwrap_or_else(|| config.port());

            println!("Starting web server on {}:{}...", bind, port);
            println!("Reading roster data from {}", data_dir.display());

            let state = AppState::new(Box::new(CsvStore::new(data_dir)));
            web::start_server(&bind, port, state)
                .await
                .context("web server failed")
        }
    }
}

fn run_generate(
    config: &RosterConfig,
    period: &str,
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
    let store = CsvStore::new(&data_dir);
    let mut rng = match seed.or(config.seed()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = generate_roster(&store, period, &mut rng)
        .with_context(|| format!("could not generate roster for period {}", period))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_roster(&format!("Roster {}", period), &result);
    }

    if let Some(path) = output {
        write_roster_to_file(&format!("Roster {}", period), &result, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nRoster saved to {}", path.display());
    }

    Ok(())
}
