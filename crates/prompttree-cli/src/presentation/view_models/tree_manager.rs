use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::presentation::views::{ExportView, ImportView, SaveListView};

#[derive(Debug, Serialize)]
pub struct SaveEntryViewModel {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SaveListViewModel {
    pub saves: Vec<SaveEntryViewModel>,
}

#[derive(Debug, Serialize)]
pub struct TreeSummaryViewModel {
    pub project: String,
    pub prompt_count: usize,
    pub node_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportViewModel {
    pub source: String,
    #[serde(flatten)]
    pub summary: TreeSummaryViewModel,
}

#[derive(Debug, Serialize)]
pub struct ExportViewModel {
    pub output: String,
    #[serde(flatten)]
    pub summary: TreeSummaryViewModel,
}

impl fmt::Display for SaveListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", SaveListView::new(self))
    }
}

impl fmt::Display for ImportViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", ImportView::new(self))
    }
}

impl fmt::Display for ExportViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", ExportView::new(self))
    }
}
