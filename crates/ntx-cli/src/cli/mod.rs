//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use ntx_core::config::Config;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "ntx")]
#[command(version)]
#[command(about = "Terminal client for the notes service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the notes service base URL from config
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Register a new account and sign in
    Register {
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = "NTX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in and persist the session
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = "NTX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out (discard the persisted session)
    Logout,

    /// Show the signed-in account
    Whoami,

    /// List notes
    List,

    /// Create a note
    Add {
        /// Note title
        title: String,
        /// Note content
        #[arg(long)]
        content: Option<String>,
    },

    /// Show one note
    Show {
        /// Note ID
        id: i64,
    },

    /// Edit a note's title and/or content
    Edit {
        /// Note ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Rm {
        /// Note ID
        id: i64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // default to the interactive UI
    let Some(command) = cli.command else {
        return run_interactive(&config).await;
    };

    logging::init_stderr();

    match command {
        Commands::Register { email, password } => {
            commands::auth::register(&config, &email, &password).await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::List => commands::notes::list(&config).await,
        Commands::Add { title, content } => commands::notes::add(&config, &title, content).await,
        Commands::Show { id } => commands::notes::show(&config, id).await,
        Commands::Edit { id, title, content } => {
            commands::notes::edit(&config, id, title, content).await
        }
        Commands::Rm { id } => commands::notes::rm(&config, id).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

#[cfg(feature = "tui")]
async fn run_interactive(config: &Config) -> Result<()> {
    let _guard = logging::init_file().context("init file logging")?;
    ntx_tui::run(config).await
}

#[cfg(not(feature = "tui"))]
async fn run_interactive(_config: &Config) -> Result<()> {
    anyhow::bail!("This build has no interactive UI. Use `ntx list`, `ntx add`, etc.")
}
