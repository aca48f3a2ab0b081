use serde::Serialize;
use std::fmt;

use crate::presentation::views::{HealthView, InitView, MutationView};

#[derive(Debug, Serialize)]
pub struct InitViewModel {
    pub config_path: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub note_create: String,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthViewModel {
    pub api_url: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a mutation that returns no record worth showing
#[derive(Debug, Serialize)]
pub struct MutationViewModel {
    pub mutation: String,
    pub target: String,
    /// Prompt count of the refetched tree, when one was applied
    pub prompt_count: Option<usize>,
}

impl fmt::Display for InitViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", InitView::new(self))
    }
}

impl fmt::Display for HealthViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HealthView::new(self))
    }
}

impl fmt::Display for MutationViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", MutationView::new(self))
    }
}
