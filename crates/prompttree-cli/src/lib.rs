mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, NodeCommand, NoteCommand, PromptCommand};
pub use commands::run;
pub use logging::init_logging;
