use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, NoteId, PromptId};

/// Full project snapshot as returned by `GET /tree`.
///
/// A snapshot is always replaced wholesale by the next fetch; nothing in the
/// client patches one in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub project: String,
    #[serde(rename = "mainRequest", default)]
    pub main_request: String,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

impl Tree {
    pub fn prompt(&self, id: PromptId) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn contains_prompt(&self, id: PromptId) -> bool {
        self.prompt(id).is_some()
    }

    pub fn prompt_ids(&self) -> impl Iterator<Item = PromptId> + '_ {
        self.prompts.iter().map(|p| p.id)
    }

    /// Position of the prompt in step order
    pub fn position_of(&self, id: PromptId) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.prompts.iter().map(|p| p.nodes.len()).sum()
    }
}

/// A titled unit of work; its position in [`Tree::prompts`] is its step number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Prompt {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// One action step of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub action: String,
}

/// Free-text annotation attached to a prompt. Not part of [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Prompt record returned by `GET /prompts/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptDetail {
    pub id: PromptId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_name: String,
}

/// Entry of `GET /tree/saves`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTree {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}
