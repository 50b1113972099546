use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

mod app;
mod ui;

use app::App;
use playground_tour::config::Config;
use playground_tour::{logging, StepKind, StepRegistry};

#[derive(Parser)]
#[command(name = "playground-tour")]
#[command(about = "Guided walkthrough of a visual page editor, in your terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the walkthrough steps
    Steps {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Also write it to .playground-tour/config.toml
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps { json }) => cmd_steps(json)?,
        Some(Commands::Config { save }) => cmd_config(&config, save)?,
        None => run_tui(config, logging_handle.log_file_path).await?,
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Point at the session log if anything was written
    if let Some(log_path) = log_file_path {
        if log_path.metadata().is_ok_and(|m| m.len() > 0) {
            eprintln!("Session log: {}", log_path.display());
        }
    }

    result
}

#[derive(Serialize)]
struct StepListing {
    id: u8,
    kind: StepKind,
    mnemonic: &'static str,
    label: &'static str,
    polled: bool,
}

fn cmd_steps(json: bool) -> Result<()> {
    let registry = StepRegistry::standard();
    let listing: Vec<StepListing> = registry
        .iter()
        .map(|step| StepListing {
            id: step.id,
            kind: step.kind,
            mnemonic: step.mnemonic(),
            label: step.label(),
            polled: step.kind.is_polled(),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&listing).context("Failed to serialize steps")?;
        println!("{out}");
        return Ok(());
    }

    println!("Walkthrough ({} steps)", listing.len());
    println!("{}", "─".repeat(40));
    for step in &listing {
        let watch = if step.polled { "  (watched)" } else { "" };
        println!("{:>2}  {:<7} {}{}", step.id, step.mnemonic, step.label, watch);
    }
    Ok(())
}

fn cmd_config(config: &Config, save: bool) -> Result<()> {
    print!("{}", config.to_toml()?);
    if save {
        let path = config.save()?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}
