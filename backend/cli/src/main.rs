mod bots;
mod config;
mod rest_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use bots::DemoBot;
use config::Settings;
use terminal_output::note_error;

#[derive(Parser)]
#[command(name = "switchcraft")]
#[command(about = "SwitchCraft API queries and chatbox bots")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.switchcraft/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show online and active player counts
    Players,
    /// Show server tick statistics
    Tps,
    /// Show the playtime leaderboard
    Playtime {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show supporter goal progress
    Supporter,
    /// Show the deaths leaderboard
    Deaths {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// List proxy IP ranges
    Proxies,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Connect to the chatbox and run a demo bot
    Bot {
        #[arg(value_enum)]
        bot: DemoBot,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets masked
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            note_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).await?;

    let logging = settings.config.logging();
    switchcraft_logging::init_logger(
        logging.dir.as_deref().map(Path::new),
        logging.level.as_deref().unwrap_or("info"),
        logging.json.unwrap_or(false),
    );
    settings.report.log();
    if let Some(err) = settings.report.errors.first() {
        bail!("Invalid config {}: {err}", settings.path.display());
    }

    match cli.command {
        Commands::Players => rest_cmd::players(&settings.api_client()?).await,
        Commands::Tps => rest_cmd::tps(&settings.api_client()?).await,
        Commands::Playtime { limit } => rest_cmd::playtime(&settings.api_client()?, limit).await,
        Commands::Supporter => rest_cmd::supporter(&settings.api_client()?).await,
        Commands::Deaths { limit } => rest_cmd::deaths(&settings.api_client()?, limit).await,
        Commands::Proxies => rest_cmd::proxies(&settings.api_client()?).await,
        Commands::Config { action: ConfigAction::Show } => show_config(&settings),
        Commands::Bot { bot } => bots::run(bot, &settings).await,
    }
}

fn show_config(settings: &Settings) -> Result<()> {
    let value = serde_json::to_value(&settings.config).context("Failed to serialize config")?;
    let yaml = serde_yaml::to_string(&switchcraft_config::redact(&value)).context("Failed to render config")?;
    println!("# {}", settings.path.display());
    print!("{yaml}");
    Ok(())
}
