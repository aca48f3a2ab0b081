use std::fmt;

use crate::presentation::formatters::time::format_timestamp;
use crate::presentation::view_models::{ExportViewModel, ImportViewModel, SaveListViewModel};

pub struct SaveListView<'a> {
    data: &'a SaveListViewModel,
}

impl<'a> SaveListView<'a> {
    pub fn new(data: &'a SaveListViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for SaveListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.saves.is_empty() {
            writeln!(f, "No saved trees.")?;
            return Ok(());
        }

        writeln!(f, "{:<32} UPDATED", "NAME")?;
        writeln!(f, "{}", "-".repeat(52))?;
        for save in &self.data.saves {
            writeln!(f, "{:<32} {}", save.name, format_timestamp(save.updated_at))?;
        }
        Ok(())
    }
}

pub struct ImportView<'a> {
    data: &'a ImportViewModel,
}

impl<'a> ImportView<'a> {
    pub fn new(data: &'a ImportViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for ImportView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Source:  {}", self.data.source)?;
        writeln!(f, "Project: {}", self.data.summary.project)?;
        writeln!(
            f,
            "Loaded {} prompts with {} nodes.",
            self.data.summary.prompt_count, self.data.summary.node_count
        )
    }
}

pub struct ExportView<'a> {
    data: &'a ExportViewModel,
}

impl<'a> ExportView<'a> {
    pub fn new(data: &'a ExportViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for ExportView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Output:  {}", self.data.output)?;
        writeln!(f, "Project: {}", self.data.summary.project)?;
        writeln!(
            f,
            "Wrote {} prompts with {} nodes.",
            self.data.summary.prompt_count, self.data.summary.node_count
        )
    }
}
