//! Request and response bodies of the remote API that are not records
//! themselves.

use serde::{Deserialize, Serialize};

use crate::tree::{SavedTree, Tree};

/// Body of `POST /prompts/0`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Body of `PUT /prompts/{id}`; absent fields are left unchanged by the server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /prompts/{id}/nodes`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
}

/// Body of `PUT /prompts/{id}/nodes/{nodeId}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Body of note create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteBody {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTreeRequest {
    pub tree: Tree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTreeRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedTreeList {
    #[serde(default)]
    pub trees: Vec<SavedTree>,
}

/// Error body produced by the server on 4xx/5xx responses.
///
/// Either a `detail` string or an `errors` list is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub errors: Vec<ServerErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServerErrorItem {
    Detailed { message: String },
    Plain(String),
}

impl ServerErrorItem {
    pub fn message(&self) -> &str {
        match self {
            ServerErrorItem::Detailed { message } => message,
            ServerErrorItem::Plain(message) => message,
        }
    }
}

/// Best human-readable message for a failed response body: `detail`, then
/// the joined `errors` list, then the raw text.
pub fn server_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ServerErrorBody>(body) {
        if let Some(detail) = parsed.detail.filter(|d| !d.is_empty()) {
            return detail;
        }
        if !parsed.errors.is_empty() {
            return parsed
                .errors
                .iter()
                .map(ServerErrorItem::message)
                .collect::<Vec<_>>()
                .join(", ");
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = PromptPatch {
            title: Some("New".into()),
            description: None,
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":"New"}"#);
    }

    #[test]
    fn test_server_error_prefers_detail() {
        let body = r#"{"detail":"Prompt not found","errors":[{"message":"x"}]}"#;
        assert_eq!(server_error_message(body), "Prompt not found");
    }

    #[test]
    fn test_server_error_joins_error_list() {
        let body = r#"{"errors":[{"message":"title required"},"bad id"]}"#;
        assert_eq!(server_error_message(body), "title required, bad id");
    }

    #[test]
    fn test_server_error_falls_back_to_raw_text() {
        assert_eq!(server_error_message("gateway timeout\n"), "gateway timeout");
    }
}
