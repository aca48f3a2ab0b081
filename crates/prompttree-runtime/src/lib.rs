pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod mutation;
pub mod notes;
pub mod store;
mod workspace;

pub use client::{HttpStore, parse_base_url};
pub use config::{ApiConfig, Config, ConsistencyPolicy, NoteCreateStrategy};
pub use coordinator::MutationCoordinator;
pub use error::{Error, Result};
pub use mutation::{
    MutationKind, MutationLog, MutationPhase, MutationRecord, MutationTicket, Notification,
};
pub use notes::NotesState;
pub use store::RemoteStore;
pub use workspace::{InitOutcome, PromptTree};
