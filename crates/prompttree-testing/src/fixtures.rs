//! Sample data shared by runtime and CLI tests.

use chrono::{DateTime, TimeZone, Utc};
use prompttree_types::{Node, NodeId, Note, NoteId, Prompt, PromptId, Tree};

/// The import document from the `subprompts` compatibility scenario
pub const SUBPROMPTS_IMPORT: &str = r#"{"project":"P","prompts":[{"id":1,"title":"T","subprompts":[{"id":1,"name":"N","action":"A"}]}]}"#;

/// Valid JSON whose `prompts` is not an array
pub const WRONG_SHAPE_IMPORT: &str = r#"{"project":"P","prompts":{"id":1}}"#;

pub const MALFORMED_IMPORT: &str = r#"{"project":"P","prompts":["#;

/// A prompt whose nodes are numbered `base + 1 ..= base + count`
pub fn prompt(id: i64, title: &str, count: usize) -> Prompt {
    let base = id * 100;
    Prompt {
        id: PromptId::new(id),
        title: title.to_string(),
        description: format!("{} description", title),
        nodes: (1..=count as i64)
            .map(|n| Node {
                id: NodeId::new(base + n),
                name: format!("step {}", n),
                action: format!("run step {}", n),
            })
            .collect(),
    }
}

pub fn tree(project: &str, prompts: Vec<Prompt>) -> Tree {
    Tree {
        project: project.to_string(),
        main_request: format!("Build {}", project),
        prompts,
    }
}

/// Three prompts: 1 "Setup" (12 nodes), 2 "Levels" (0 nodes), 3 "Polish" (3 nodes)
pub fn sample_tree() -> Tree {
    tree(
        "Platformer",
        vec![
            prompt(1, "Setup", 12),
            prompt(2, "Levels", 0),
            prompt(3, "Polish", 3),
        ],
    )
}

pub fn timestamp(seconds: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, seconds % 60)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn note(id: i64, content: &str) -> Note {
    Note {
        id: NoteId::new(id),
        content: content.to_string(),
        created_at: timestamp(id as u32),
    }
}
