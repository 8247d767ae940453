use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use intrapay_pix::services::{self, pix};
use intrapay_pix::settings::Settings;
use intrapay_pix::{GatewayCredentials, ItemParameters};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[arg(long, default_value = "log4rs.yaml")]
    log4rs: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a batch file and print one result record per item.
    Run {
        #[arg(short, long)]
        items: PathBuf,
    },
    /// Serve batches over HTTP.
    Serve {
        #[arg(short, long)]
        listen: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Items(Vec<ItemParameters>),
    Wrapped { items: Vec<ItemParameters> },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let mut settings = Settings::load(&args.config)
        .map_err(|e| anyhow!("Failed to load settings from {}: {}", args.config, e))?;

    init_logging(&args.log4rs)?;

    match args.command {
        Command::Run { items } => run_batch(&settings, &items).await,
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                settings.server.listen = listen;
            }

            log::info!("Starting IntraPay Pix host.");
            services::start_services(settings).await
        }
    }
}

async fn run_batch(settings: &Settings, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))?;
    let items = match serde_json::from_str::<BatchFile>(&content)
        .map_err(|e| anyhow!("Invalid batch file {}: {}", path.display(), e))?
    {
        BatchFile::Items(items) | BatchFile::Wrapped { items } => items,
    };

    let records = pix::execute_batch(
        GatewayCredentials::from(&settings.intrapay),
        Duration::from_secs(settings.intrapay.timeout_seconds),
        settings.batch.failure_policy(),
        &items,
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new("logs").exists() {
        fs::create_dir("logs")?;
    }

    match log4rs::init_file(path, Default::default()) {
        Ok(_) => {
            log::debug!("Logging initialized from {}.", path);
            Ok(())
        }
        Err(e) => {
            eprintln!("[ERROR] Failed to initialize logging: {}", e);
            Err(anyhow!("Could not initialize logging: {}", e))
        }
    }
}
