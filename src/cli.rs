use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Small to-do list with a terminal UI.
/// Tasks are stored in <data-dir>/TodoApp.json (default ~/.todo).
#[derive(Parser)]
#[command(name = "todo", version, about = "Terminal to-do list")]
pub struct Cli {
    /// Directory holding the task list, config and log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep tasks in memory only; the task file is neither read nor written.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_is_global() {
        let cli = Cli::try_parse_from(["todo", "list", "--ephemeral"]).unwrap();
        assert!(cli.ephemeral);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn subcommand_is_optional() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.ephemeral);
    }
}
