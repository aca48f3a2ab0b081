//! Assertions over `--format json` command output.
//!
//! Every command prints `{ "badge"?, "content", "suggestions"? }`.

use anyhow::{Context, Result};
use serde_json::Value;

pub fn assert_badge_level(json: &Value, expected: &str) -> Result<()> {
    let level = json["badge"]["level"]
        .as_str()
        .context("Expected 'badge.level' in JSON")?;

    if level != expected {
        anyhow::bail!("Expected badge level {}, got {}", expected, level);
    }

    Ok(())
}

/// Assert the rendered tree has the given prompt titles, in order
pub fn assert_prompt_titles(json: &Value, expected: &[&str]) -> Result<()> {
    let prompts = json["content"]["prompts"]
        .as_array()
        .context("Expected 'content.prompts' array in JSON")?;

    let titles: Vec<&str> = prompts
        .iter()
        .filter_map(|p| p["title"].as_str())
        .collect();

    if titles != expected {
        anyhow::bail!("Expected prompts {:?}, got {:?}", expected, titles);
    }

    Ok(())
}

/// Assert no branch strip shows more slots than the budget allows
pub fn assert_slot_budget(json: &Value) -> Result<()> {
    let max_visible = json["content"]["max_visible"]
        .as_u64()
        .context("Expected 'content.max_visible' in JSON")?;
    let prompts = json["content"]["prompts"]
        .as_array()
        .context("Expected 'content.prompts' array in JSON")?;

    for prompt in prompts {
        let Some(slots) = prompt["branch"]["slots"].as_array() else {
            continue;
        };
        if slots.len() as u64 > max_visible {
            anyhow::bail!(
                "Prompt {} renders {} slots, budget is {}",
                prompt["id"],
                slots.len(),
                max_visible
            );
        }
    }

    Ok(())
}
