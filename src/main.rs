use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clean_snake::game::GameConfig;
use clean_snake::logging;
use clean_snake::modes::HumanMode;
use tracing::info;

#[derive(Parser)]
#[command(name = "clean_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between moves at the start of a game
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Starting length of the snake
    #[arg(long)]
    initial_length: Option<usize>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Defaults, then the config file, then command-line flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(length) = self.initial_length {
            config.initial_snake_length = length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    if cli.print_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(());
    }

    info!(?config, "starting");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
