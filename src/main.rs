//! # todo - file-backed to-do list manager
//!
//! Keeps an ordered list of tasks in `tasks.json` and offers both an
//! interactive numbered menu and one-shot subcommands over it.
//!
//! ## Key Features
//!
//! - **Simple records**: name, category, due date, priority and status per task
//! - **Interactive menu**: the classic 16-choice loop, including single-step undo
//! - **Scriptable CLI**: every other operation as a subcommand
//! - **Local files**: JSON store, a separate backup copy, an append-only
//!   `history.log` and CSV export
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive menu (default)
//! todo
//!
//! # Add and list from the shell
//! todo add "Write report" --category work --due 2099-01-01 --priority high
//! todo list
//!
//! # Keep data somewhere other than the current directory
//! todo --dir ~/.todo stats
//! ```
//!
//! Tasks are addressed by their 1-based position in the list, which changes
//! after deletes and sorts.

use clap::Parser;
use tracing::Level;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod history;
pub mod menu;
pub mod ops;
pub mod session;
pub mod task;
pub mod theme;
pub mod undo;
pub mod view;

use cli::Cli;
use cmd::*;
use config::Paths;
use error::Result;
use session::Session;
use theme::Theme;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Menu);
    let open = || -> Result<Session> { Session::open(Paths::resolve(cli.dir.as_deref())?) };

    match command {
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Menu => cmd_menu(open()?, Theme::new(!cli.no_color))?,
        Commands::List => cmd_list(&open()?),
        Commands::Add { name, category, due, priority } => {
            cmd_add(&mut open()?, name, category, due, priority)?;
        }
        Commands::Delete { number } => cmd_delete(&mut open()?, number)?,
        Commands::Complete { number } => cmd_complete(&mut open()?, number)?,
        Commands::Edit { number, name, category, due, priority, status } => {
            cmd_edit(&mut open()?, number, name, category, due, priority, status)?;
        }
        Commands::Search { keyword } => cmd_search(&open()?, keyword),
        Commands::Filter { category } => cmd_filter(&open()?, category),
        Commands::Stats => cmd_stats(&open()?),
        Commands::Sort { key } => cmd_sort(&mut open()?, key)?,
        Commands::Export { output } => cmd_export(&open()?, output)?,
        Commands::Backup => cmd_backup(&open()?)?,
        Commands::Restore => cmd_restore(&mut open()?)?,
        Commands::History => cmd_history(&open()?)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if e.is_informational() {
            println!("{e}");
            return;
        }
        eprintln!("{e}");
        std::process::exit(1);
    }
}
