use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ghdash_core::DashConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective config (file + environment overrides)
    Show,
    /// Write a config file populated with defaults
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_path() -> Result<()> {
    println!("{}", DashConfig::config_path().display());
    Ok(())
}

fn run_show() -> Result<()> {
    let config = DashConfig::load().context("Failed to load ghdash config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = DashConfig::config_path();

    if config_path.exists() && !args.force {
        bail!("Config already exists at {:?}\n\nUse --force to overwrite", config_path);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = DashConfig::default().to_toml()?;
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✓ Wrote {}", config_path.display());
    Ok(())
}
