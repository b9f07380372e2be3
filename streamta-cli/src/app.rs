use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use streamta_config::{load_config, ReplayConfig};
use tracing::info;

use crate::data::read_candles_csv;
use crate::replay::{render_text, replay};
use crate::telemetry::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "streamta")]
#[command(author, version, about = "Replay candle data through streaming technical indicators")]
pub struct Cli {
    /// Log filter override (e.g. `debug`, `streamta_cli=trace`); defaults to the config's level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed a candle CSV through the configured indicators and print a summary
    Replay(ReplayArgs),
    /// Check that a configuration file builds every indicator it declares
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// CSV file with `timestamp,open,high,low,close[,volume]` rows
    #[arg(long)]
    pub candles: PathBuf,

    /// Indicator configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Indicator configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = match &cli.command {
        Commands::Replay(args) => &args.config,
        Commands::Validate(args) => &args.config,
    };
    let config = load_config(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let level = cli.log_level.as_deref().unwrap_or(config.log.level.as_str());
    init_tracing(level, cli.json_logs || config.log.json)?;
    info!(
        path = %config_path.display(),
        indicators = config.indicators.len(),
        "loaded replay configuration"
    );

    match cli.command {
        Commands::Replay(args) => run_replay(&config, args),
        Commands::Validate(_) => run_validate(&config),
    }
}

fn run_replay(config: &ReplayConfig, args: ReplayArgs) -> Result<()> {
    let mut board = config.build_board()?;
    let candles = read_candles_csv(&args.candles)?;
    info!(
        candles = candles.len(),
        indicators = board.len(),
        "starting replay"
    );
    let summary = replay(&candles, &mut board);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }
    Ok(())
}

fn run_validate(config: &ReplayConfig) -> Result<()> {
    let board = config.build_board()?;
    for entry in board.snapshot() {
        println!("{}: {} (window {})", entry.label, entry.indicator, entry.window);
    }
    println!("{} indicators ok", board.len());
    Ok(())
}
