use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging::init_logger;
use grid_snake::modes::HumanMode;
use log::{LevelFilter, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a small grid, in your terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Never end the game: the snake may leave the board and cross itself
    #[arg(long)]
    permissive: bool,

    /// Let food respawn underneath the snake
    #[arg(long)]
    allow_food_overlap: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Defaults, then the config file, then command-line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.permissive {
            config.collisions = false;
        }
        if self.allow_food_overlap {
            config.food_avoids_snake = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.log_file.as_deref(), cli.log_level)?;

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let mut human_mode = match cli.seed {
        Some(seed) => HumanMode::with_engine(GameEngine::with_seed(config, seed)),
        None => HumanMode::new(config),
    };
    human_mode.run().await?;

    Ok(())
}
