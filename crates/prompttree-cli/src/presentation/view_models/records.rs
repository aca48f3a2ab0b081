use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::presentation::views::{NodeListView, NodeView, NoteListView, PromptDetailView};

// --------------------------------------------------------
// Prompts
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PromptDetailViewModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub project_name: String,
    pub nodes: Vec<NodeEntryViewModel>,
}

// --------------------------------------------------------
// Nodes
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NodeEntryViewModel {
    pub id: i64,
    pub name: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct NodeListViewModel {
    pub prompt_id: i64,
    pub nodes: Vec<NodeEntryViewModel>,
}

#[derive(Debug, Serialize)]
pub struct NodeViewModel {
    pub prompt_id: i64,
    #[serde(flatten)]
    pub node: NodeEntryViewModel,
}

// --------------------------------------------------------
// Notes
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NoteEntryViewModel {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NoteListViewModel {
    pub prompt_id: i64,
    pub notes: Vec<NoteEntryViewModel>,
}

// --------------------------------------------------------
// Display
// --------------------------------------------------------

impl fmt::Display for PromptDetailViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PromptDetailView::new(self))
    }
}

impl fmt::Display for NodeListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", NodeListView::new(self))
    }
}

impl fmt::Display for NodeViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", NodeView::new(self))
    }
}

impl fmt::Display for NoteListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", NoteListView::new(self))
    }
}
