use anyhow::Result;
use clap::{Parser, Subcommand};
use readlist_core::ReadlistConfig;
use std::path::Path;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective configuration, including the resolved database path
    Show,
}

pub fn run_config(
    args: ConfigArgs,
    config: &ReadlistConfig,
    config_flag: Option<&Path>,
    db_flag: Option<&Path>,
) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = config_flag
                .map(Path::to_path_buf)
                .unwrap_or_else(ReadlistConfig::config_path);
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            println!();
            println!("# effective database: {}", config.database_path(db_flag).display());
            println!("# list screen log:    {}", config.log_path().display());
        }
    }
    Ok(())
}
