use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;

/// Simple, file-backed to-do list manager.
/// Files live in the current directory or the one passed via --dir.
#[derive(Parser)]
#[command(name = "todo", version, about = "File-backed to-do list manager")]
pub struct Cli {
    /// Directory holding tasks.json, its backup, the history log and exports.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
