//! ghdash CLI - browse public GitHub user activity from the terminal
//!
//! Subcommands:
//! - `user`: profile card for an account
//! - `list`: paginated activity, received activity, subscriptions or gists,
//!   with client-side search and event-type filtering
//! - `show`: open one item (event detail, or the external URL for
//!   received events, repositories and gists)
//! - `config`: inspect and initialise `~/.ghdash/config.toml`

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod render;
mod tracing_setup;
mod ui;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "ghdash",
    author,
    version,
    about = "Browse public GitHub activity, subscriptions and gists for any user",
    long_about = "Look up a GitHub user and page through their public activity feed, \
                  received events, watched repositories and gists. Filtering happens \
                  locally over the pages already loaded."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a user's profile
    User(commands::user::UserArgs),
    /// List a user's activity, received activity, subscriptions or gists
    List(commands::list::ListArgs),
    /// Show details (or the web URL) for one item of a list
    Show(commands::show::ShowArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
    /// Manage ghdash configuration (path, show, init)
    Config(commands::config::ConfigArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug }).ok();
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        Commands::User(args) => commands::run_user(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
        Commands::Show(args) => commands::run_show(args).await?,
        Commands::Completions(args) => run_completions(args),
        Commands::Config(args) => commands::run_config(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "ghdash", &mut std::io::stdout());
}
