use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

use super::traits::Renderer;
use crate::presentation::formatters::color::color_enabled;
use crate::presentation::view_models::{CommandResultViewModel, StatusBadge, StatusLevel};

/// Prints command results to stdout, as pretty JSON or as text.
pub struct ConsoleRenderer {
    json_mode: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool) -> Self {
        Self { json_mode }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        let mut out = io::stdout().lock();
        if self.json_mode {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        } else {
            write_text(&mut out, &result, color_enabled())?;
        }
        out.flush()?;
        Ok(())
    }
}

fn write_badge(out: &mut impl Write, badge: &StatusBadge, colored: bool) -> io::Result<()> {
    let icon = badge.level.icon();
    if !colored {
        return writeln!(out, "{} {}", icon, badge.label);
    }
    let label = badge.label.bold();
    match badge.level {
        StatusLevel::Success => writeln!(out, "{} {}", icon.green(), label),
        StatusLevel::Info => writeln!(out, "{} {}", icon.blue(), label),
        StatusLevel::Warning => writeln!(out, "{} {}", icon.yellow(), label),
    }
}

fn write_text<T>(out: &mut impl Write, result: &CommandResultViewModel<T>, colored: bool) -> io::Result<()>
where
    T: Serialize + Display,
{
    if let Some(badge) = &result.badge {
        write_badge(out, badge, colored)?;
        writeln!(out)?;
    }

    write!(out, "{}", result.content)?;

    if result.suggestions.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    if colored {
        writeln!(out, "{}", "Next:".yellow().bold())?;
    } else {
        writeln!(out, "Next:")?;
    }
    for tip in &result.suggestions {
        match &tip.command {
            Some(cmd) if colored => writeln!(out, "  - {}: {}", tip.description, cmd.cyan())?,
            Some(cmd) => writeln!(out, "  - {}: {}", tip.description, cmd)?,
            None => writeln!(out, "  - {}", tip.description)?,
        }
    }
    Ok(())
}
