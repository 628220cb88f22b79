use anyhow::{Context, Result};
use clap::Parser;
use snake_grid::game::GameConfig;
use snake_grid::modes::HumanMode;
use snake_grid::store::JsonFileStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_grid")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON file with a full or partial game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Cell size in pixels; width and height must be multiples of it
    #[arg(long)]
    cell_size: Option<u32>,

    /// Tick interval at score 0, in milliseconds
    #[arg(long)]
    speed_init: Option<u64>,

    /// Fastest tick interval, in milliseconds
    #[arg(long)]
    speed_min: Option<u64>,

    /// Where the best score is kept
    #[arg(long, default_value = "snake_best.json")]
    best_file: PathBuf,

    /// Start from an empty best score if the best-score file is unreadable
    /// (it is overwritten on the next record)
    #[arg(long)]
    reset_best: bool,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// File config (or defaults) with command-line overrides on top
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed_init) = self.speed_init {
            config.speed.speed_init = speed_init;
        }
        if let Some(speed_min) = self.speed_min {
            config.speed.speed_min = speed_min;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    // Fails before the TUI takes the terminal, so the message reaches stderr
    let store = JsonFileStore::open_or_reset(&cli.best_file, cli.reset_best).with_context(|| {
        format!(
            "Failed to load best score from {:?}; pass --reset-best to start over",
            cli.best_file
        )
    })?;

    let mut human_mode = HumanMode::new(&config, store)?;
    human_mode.run().await?;

    Ok(())
}
