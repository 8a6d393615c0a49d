//! readlist CLI - track books you plan to read, are reading, or have finished
//!
//! Running `readlist` with no subcommand opens the list screen. Subcommands
//! run a single operation against the same SQLite store:
//! - `add`, `edit`, `cycle`, `delete` mutate one book
//! - `list` and `stats` print the shelf
//! - `config` shows where configuration and data live

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use readlist_core::{BookStore, ReadlistConfig};
use tracing::debug;

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "readlist",
    author,
    version,
    about = "Track books you plan to read, are reading, or have finished",
    long_about = "A single-user reading list backed by a local SQLite file. \
                  Run without a subcommand to open the interactive list screen."
)]
struct Cli {
    /// SQLite database file (default: $READLIST_DB, config, ~/.readlist/readinglist.db)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Config file (default: $READLIST_CONFIG or ~/.readlist/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive list screen (default)
    Ui,
    /// Add a book to the list
    Add(commands::books::AddArgs),
    /// List books, newest first
    List(commands::books::ListArgs),
    /// Change a book's title, author or status
    Edit(commands::books::EditArgs),
    /// Advance a book's status: planning -> reading -> done -> planning
    Cycle(commands::books::IdArgs),
    /// Remove a book from the list
    Delete(commands::books::IdArgs),
    /// Count books per status
    Stats(commands::books::StatsArgs),
    /// Show configuration paths and values
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing default config file means defaults; a missing --config is an error
    let config = ReadlistConfig::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Ui);
    let tracing_config = TracingConfig {
        debug: cli.debug,
        level: config.log.level.clone(),
        log_file: matches!(command, Commands::Ui).then(|| config.log_path()),
    };
    tracing_setup::init(&tracing_config).ok();

    // Commands that never touch the database
    match command {
        Commands::Config(args) => {
            return commands::run_config(args, &config, cli.config.as_deref(), cli.db.as_deref())
        }
        Commands::Completions(args) => return run_completions(args),
        _ => {}
    }

    let store = open_store(cli.db.as_deref(), &config).await?;

    match command {
        Commands::Ui => readlist_tui::run(store).await?,
        Commands::Add(args) => commands::run_add(&store, args).await?,
        Commands::List(args) => commands::run_list(&store, args).await?,
        Commands::Edit(args) => commands::run_edit(&store, args).await?,
        Commands::Cycle(args) => commands::run_cycle(&store, args).await?,
        Commands::Delete(args) => commands::run_delete(&store, args).await?,
        Commands::Stats(args) => commands::run_stats(&store, args).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}

/// Open the process-wide store at the resolved database path
async fn open_store(db_flag: Option<&Path>, config: &ReadlistConfig) -> Result<BookStore> {
    let path = config.database_path(db_flag);
    debug!(path = %path.display(), "Opening book store");
    BookStore::open(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    let shell = match args.shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "readlist", &mut std::io::stdout());
    Ok(())
}
