//! Normalization of user-supplied tree JSON before it is sent to
//! `POST /tree/import`.
//!
//! Documents written by older versions name the node list `subprompts`;
//! both spellings are accepted. Missing scalars default to `""` and `0`.

use serde_json::{Map, Value};

use crate::error::ImportError;
use crate::ids::{NodeId, PromptId};
use crate::tree::{Node, Prompt, Tree};

const SHAPE_HINT: &str = "expected { project, mainRequest, prompts: [...] }";

/// Parse and normalize an import document.
///
/// Parse failures and shape failures are reported as distinct
/// [`ImportError`] variants; no partial tree is ever returned.
pub fn parse_import(text: &str) -> Result<Tree, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    normalize_import(&value)
}

/// Normalize an already-parsed import document
pub fn normalize_import(value: &Value) -> Result<Tree, ImportError> {
    let root = value
        .as_object()
        .ok_or_else(|| ImportError::Shape(format!("document is not an object; {SHAPE_HINT}")))?;

    let project = match root.get("project") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => {
            return Err(ImportError::Shape(format!(
                "missing `project`; {SHAPE_HINT}"
            )));
        }
    };

    let prompts = match root.get("prompts") {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(ImportError::Shape(format!(
                "`prompts` must be an array; {SHAPE_HINT}"
            )));
        }
    };

    let prompts = prompts
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_prompt(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Tree {
        project,
        main_request: string_field(root, "mainRequest", "tree")?,
        prompts,
    })
}

fn normalize_prompt(index: usize, value: &Value) -> Result<Prompt, ImportError> {
    let location = format!("prompts[{index}]");
    let obj = value
        .as_object()
        .ok_or_else(|| ImportError::Shape(format!("{location} is not an object")))?;

    // `nodes` wins when both are present, including an explicit empty list.
    let raw_nodes = match (obj.get("nodes"), obj.get("subprompts")) {
        (Some(v), _) if !v.is_null() => Some(v),
        (_, Some(v)) if !v.is_null() => Some(v),
        _ => None,
    };

    let nodes = match raw_nodes {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(node_index, item)| {
                normalize_node(&format!("{location}.nodes[{node_index}]"), item)
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(ImportError::Shape(format!(
                "{location}.nodes must be an array"
            )));
        }
    };

    Ok(Prompt {
        id: PromptId::new(int_field(obj, "id", &location)?),
        title: string_field(obj, "title", &location)?,
        description: string_field(obj, "description", &location)?,
        nodes,
    })
}

fn normalize_node(location: &str, value: &Value) -> Result<Node, ImportError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ImportError::Shape(format!("{location} is not an object")))?;

    Ok(Node {
        id: NodeId::new(int_field(obj, "id", location)?),
        name: string_field(obj, "name", location)?,
        action: string_field(obj, "action", location)?,
    })
}

fn string_field(obj: &Map<String, Value>, key: &str, location: &str) -> Result<String, ImportError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(ImportError::Shape(format!(
            "{location}.{key} must be a string"
        ))),
    }
}

fn int_field(obj: &Map<String, Value>, key: &str, location: &str) -> Result<i64, ImportError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
            ImportError::Shape(format!("{location}.{key} must be an integer"))
        }),
        Some(_) => Err(ImportError::Shape(format!(
            "{location}.{key} must be an integer"
        ))),
    }
}
