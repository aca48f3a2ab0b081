use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prompttree")]
#[command(about = "Browse and edit prompt trees served by a prompttree API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml [default: $PROMPTTREE_PATH or the XDG data dir]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// API base URL, overriding PROMPTTREE_API_URL and the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The TUI owns the terminal while it runs
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Tui)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file to the data directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Check that the API answers
    Health,

    /// Print the prompt tree with each prompt's node strip
    Tree {
        /// Strip width in terminal cells [default: terminal width]
        #[arg(long)]
        width: Option<u16>,

        /// Show prompts without their node strips
        #[arg(long)]
        collapsed: bool,

        /// Advance a prompt's strip by one page (repeatable)
        #[arg(long = "page", value_name = "PROMPT_ID")]
        pages: Vec<i64>,
    },

    /// Interactive tree view
    Tui,

    /// Export the tree as JSON
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the tree with a JSON document
    Import { file: PathBuf },

    /// Save the current tree under a name
    Save { name: String },

    /// List saved trees
    Saves,

    /// Replace the tree with a saved one
    Load { name: String },

    /// Delete a saved tree
    DeleteSave { name: String },

    Prompt {
        #[command(subcommand)]
        command: PromptCommand,
    },

    Node {
        #[command(subcommand)]
        command: NodeCommand,
    },

    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
}

#[derive(Subcommand)]
pub enum PromptCommand {
    Show {
        id: i64,
    },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    Update {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum NodeCommand {
    List {
        prompt: i64,
    },

    Create {
        prompt: i64,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        action: String,
    },

    Update {
        prompt: i64,
        node: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        action: Option<String>,
    },

    Delete {
        prompt: i64,
        node: i64,
    },
}

#[derive(Subcommand)]
pub enum NoteCommand {
    List {
        prompt: i64,
    },

    Add {
        prompt: i64,
        content: String,
    },

    Update {
        prompt: i64,
        note: i64,
        content: String,
    },

    Delete {
        prompt: i64,
        note: i64,
    },
}
