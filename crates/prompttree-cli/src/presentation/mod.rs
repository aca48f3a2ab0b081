//! # Presentation Layer
//!
//! Console output flows one way:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> serde_json --> stdout
//!                                                                  ==(Text)==> [ View ] --> stdout
//! ```
//!
//! * `view_models/` holds raw, serializable data. `--format json` dumps it as is.
//! * `presenters/` turns runtime records into view models and decides which tips to show.
//! * `views/` lays text out and applies colour through `formatters/`.
//! * `renderers/` picks JSON or text.
//! * `tui/` is the interactive surface. It reads the engine's render model
//!   directly and keeps only cursor and input state of its own.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod tui;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
