//! Command-line interface for hashlist
//!
//! This module defines the CLI structure using clap derive macros.
//! Each group of subcommands is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use url::Url;

use crate::board::TaskBoard;
use crate::codec;
use crate::config::Config;
use crate::error::Result;
use crate::output::{HumanOutput, OutputOptions};
use crate::progress::Progress;
use crate::task::TaskList;

mod edit;
mod show;
mod ui;

/// hashlist - a task list stored in a URL fragment
///
/// Every command takes the current fragment (bare, with `#`, or as a full
/// URL) and prints the updated one.
#[derive(Parser, Debug)]
#[command(name = "hashlist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to ./.hashlist.toml, then the user config dir)
    #[arg(long, global = true, env = "HASHLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a fragment and list its tasks
    Show {
        /// Fragment or URL
        fragment: String,
    },

    /// Append an unchecked task
    Add {
        /// Fragment or URL
        fragment: String,

        /// Task text
        text: String,
    },

    /// Flip a task's checked flag
    Toggle {
        /// Fragment or URL
        fragment: String,

        /// Zero-based task position
        index: usize,
    },

    /// Remove a task
    Remove {
        /// Fragment or URL
        fragment: String,

        /// Zero-based task position
        index: usize,
    },

    /// Move a task to another position
    Move {
        /// Fragment or URL
        fragment: String,

        /// Current zero-based position
        from: usize,

        /// New zero-based position
        to: usize,
    },

    /// Print the empty fragment (removes every task)
    Clear,

    /// Show completion progress
    Progress {
        /// Fragment or URL
        fragment: String,
    },

    /// Open the interactive list view
    Ui {
        /// Fragment or URL to start from
        fragment: Option<String>,
    },
}

/// Settings shared by every subcommand.
pub(crate) struct Session {
    pub config: Config,
    pub base_url: Option<Url>,
    pub output: OutputOptions,
}

impl Session {
    fn new(config: Config, json: bool, quiet: bool) -> Result<Self> {
        let base_url = config.output.base_url()?;
        Ok(Self {
            config,
            base_url,
            output: OutputOptions { json, quiet },
        })
    }

    /// Where the fragment should be pasted: a full URL when a base URL is
    /// configured, otherwise `#<fragment>`.
    pub(crate) fn address(&self, fragment: &str) -> String {
        match &self.base_url {
            Some(base) => codec::with_fragment(base, fragment).to_string(),
            None if fragment.is_empty() => String::new(),
            None => format!("#{fragment}"),
        }
    }

    pub(crate) fn report<'a>(&self, board: &'a TaskBoard) -> BoardReport<'a> {
        BoardReport {
            fragment: board.fragment(),
            address: self.address(board.fragment()),
            tasks: board.tasks(),
            progress: board.progress(),
        }
    }
}

/// JSON payload describing a board after a command.
#[derive(Serialize)]
pub(crate) struct BoardReport<'a> {
    pub fragment: &'a str,
    pub address: String,
    pub tasks: &'a TaskList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

/// Strictly decode a CLI fragment argument.
pub(crate) fn load_board(input: &str) -> Result<TaskBoard> {
    TaskBoard::try_from_fragment(&codec::fragment_from_input(input))
}

/// Summary lines common to every board report.
pub(crate) fn push_board_summary(human: &mut HumanOutput, report: &BoardReport<'_>) {
    human.push_summary("fragment", report.fragment);
    if !report.address.is_empty() {
        human.push_summary("address", report.address.clone());
    }
    match report.progress {
        Some(progress) => human.push_summary("progress", progress.to_string()),
        None => human.push_summary("progress", "no tasks"),
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = Config::discover(self.config.as_deref())?;
        let session = Session::new(config, self.json, self.quiet)?;

        match self.command {
            Commands::Show { fragment } => show::run_show(&session, &fragment),
            Commands::Progress { fragment } => show::run_progress(&session, &fragment),
            Commands::Add { fragment, text } => edit::run_add(&session, &fragment, &text),
            Commands::Toggle { fragment, index } => {
                edit::run_toggle(&session, &fragment, index)
            }
            Commands::Remove { fragment, index } => {
                edit::run_remove(&session, &fragment, index)
            }
            Commands::Move { fragment, from, to } => {
                edit::run_move(&session, &fragment, from, to)
            }
            Commands::Clear => edit::run_clear(&session),
            Commands::Ui { fragment } => ui::run(&session, fragment.as_deref()),
        }
    }
}
