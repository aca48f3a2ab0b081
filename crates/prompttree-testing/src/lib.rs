//! Testing infrastructure for prompttree integration tests.
//!
//! - `MemoryStore`: in-memory server with call recording and fault injection
//! - `fixtures`: sample trees, notes and import documents
//! - `StubServer`: canned HTTP responses over a real socket
//! - `world`: isolated data directory and CLI command runner
//! - `assertions`: checks over `--format json` output

pub mod assertions;
pub mod fixtures;
pub mod server;
pub mod store;
pub mod world;

pub use server::{RecordedRequest, StubServer};
pub use store::{Call, MemoryStore};
pub use world::{CliResult, TestWorld};
