use std::fmt;

use crate::presentation::formatters::text::{single_line, truncate};
use crate::presentation::formatters::time::format_timestamp;
use crate::presentation::view_models::{
    NodeEntryViewModel, NodeListViewModel, NodeViewModel, NoteListViewModel,
    PromptDetailViewModel,
};

fn write_node_table(f: &mut fmt::Formatter, nodes: &[NodeEntryViewModel]) -> fmt::Result {
    writeln!(f, "{:<8} {:<24} ACTION", "ID", "NAME")?;
    writeln!(f, "{}", "-".repeat(80))?;
    for node in nodes {
        writeln!(
            f,
            "{:<8} {:<24} {}",
            node.id,
            truncate(&single_line(&node.name), 24),
            truncate(&single_line(&node.action), 46)
        )?;
    }
    Ok(())
}

// --------------------------------------------------------
// Prompt Detail View
// --------------------------------------------------------

pub struct PromptDetailView<'a> {
    data: &'a PromptDetailViewModel,
}

impl<'a> PromptDetailView<'a> {
    pub fn new(data: &'a PromptDetailViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for PromptDetailView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Prompt #{}: {}", self.data.id, self.data.title)?;
        if !self.data.project_name.is_empty() {
            writeln!(f, "Project: {}", self.data.project_name)?;
        }
        if !self.data.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.data.description)?;
        }
        writeln!(f)?;

        if self.data.nodes.is_empty() {
            writeln!(f, "No nodes.")?;
            return Ok(());
        }
        write_node_table(f, &self.data.nodes)
    }
}

// --------------------------------------------------------
// Node Views
// --------------------------------------------------------

pub struct NodeListView<'a> {
    data: &'a NodeListViewModel,
}

impl<'a> NodeListView<'a> {
    pub fn new(data: &'a NodeListViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for NodeListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.nodes.is_empty() {
            writeln!(f, "Prompt #{} has no nodes.", self.data.prompt_id)?;
            return Ok(());
        }
        write_node_table(f, &self.data.nodes)
    }
}

pub struct NodeView<'a> {
    data: &'a NodeViewModel,
}

impl<'a> NodeView<'a> {
    pub fn new(data: &'a NodeViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for NodeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Node #{} of prompt #{}: {}",
            self.data.node.id, self.data.prompt_id, self.data.node.name
        )?;
        if !self.data.node.action.is_empty() {
            writeln!(f, "Action: {}", self.data.node.action)?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Note List View
// --------------------------------------------------------

pub struct NoteListView<'a> {
    data: &'a NoteListViewModel,
}

impl<'a> NoteListView<'a> {
    pub fn new(data: &'a NoteListViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for NoteListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.notes.is_empty() {
            writeln!(f, "No notes for prompt #{}.", self.data.prompt_id)?;
            return Ok(());
        }

        for note in &self.data.notes {
            writeln!(
                f,
                "#{:<6} {}  {}",
                note.id,
                format_timestamp(note.created_at),
                single_line(&note.content)
            )?;
        }
        Ok(())
    }
}
