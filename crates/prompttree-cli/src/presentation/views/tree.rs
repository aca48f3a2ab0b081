use owo_colors::OwoColorize;
use prompttree_engine::{BranchStrip, PromptRow, Slot};
use std::fmt;

use crate::presentation::formatters::color::{color_enabled, palette_color};
use crate::presentation::formatters::text::fit;
use crate::presentation::view_models::TreeViewModel;

/// Characters per slot label; one more cell separates neighbours, matching
/// the terminal slot pitch.
const SLOT_LABEL_WIDTH: usize = 8;

pub struct TreeView<'a> {
    data: &'a TreeViewModel,
    colored: bool,
}

impl<'a> TreeView<'a> {
    pub fn new(data: &'a TreeViewModel) -> Self {
        Self {
            data,
            colored: color_enabled(),
        }
    }

    pub fn plain(data: &'a TreeViewModel) -> Self {
        Self {
            data,
            colored: false,
        }
    }

    fn write_row(&self, f: &mut fmt::Formatter, row: &PromptRow) -> fmt::Result {
        let cursor = if row.selected { '>' } else { ' ' };
        let marker = if row.expanded { '▾' } else { '▸' };
        let heading = format!("{}. {}", row.step, row.title);

        write!(f, "{} {} ", cursor, marker)?;
        if self.colored {
            let colored = heading.color(palette_color(row.color));
            if row.selected {
                write!(f, "{}", colored.bold())?;
            } else {
                write!(f, "{}", colored)?;
            }
        } else {
            write!(f, "{}", heading)?;
        }
        writeln!(f, " ({})", node_count_label(row.node_count))?;

        if let Some(branch) = &row.branch {
            self.write_strip(f, branch, row.node_count)?;
        }
        Ok(())
    }

    fn write_strip(&self, f: &mut fmt::Formatter, branch: &BranchStrip, count: usize) -> fmt::Result {
        let labels: Vec<String> = branch
            .slots
            .iter()
            .map(|slot| fit(&slot_label(slot), SLOT_LABEL_WIDTH))
            .collect();
        let strip = labels.join(" ");
        let range = format!(
            "({}-{} of {})",
            branch.window.start + 1,
            branch.window.end,
            count
        );

        write!(f, "      {}  ", strip.trim_end())?;
        if self.colored {
            writeln!(f, "{}", range.dimmed())
        } else {
            writeln!(f, "{}", range)
        }
    }
}

pub fn slot_label(slot: &Slot) -> String {
    match slot {
        Slot::Back => "‹".to_string(),
        Slot::Next => "›".to_string(),
        Slot::Node { id, name } if name.trim().is_empty() => format!("#{}", id),
        Slot::Node { name, .. } => name.clone(),
    }
}

fn node_count_label(count: usize) -> String {
    match count {
        0 => "no nodes".to_string(),
        1 => "1 node".to_string(),
        n => format!("{} nodes", n),
    }
}

impl<'a> fmt::Display for TreeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let model = &self.data.model;

        if model.prompts.is_empty() && model.project.is_empty() {
            writeln!(f, "No prompt tree loaded.")?;
            return Ok(());
        }

        if self.colored {
            writeln!(f, "{}", model.project.bold())?;
        } else {
            writeln!(f, "{}", model.project)?;
        }
        if !model.main_request.is_empty() {
            writeln!(f, "{}", model.main_request)?;
        }
        writeln!(f)?;

        if model.prompts.is_empty() {
            writeln!(f, "No prompts yet.")?;
            return Ok(());
        }

        for row in &model.prompts {
            self.write_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompttree_engine::{FixedWidth, SlotGeometry, TreeViewState};
    use prompttree_types::{Node, NodeId, Prompt, PromptId, Tree};
    use std::sync::Arc;

    fn prompt(id: i64, title: &str, nodes: usize) -> Prompt {
        Prompt {
            id: PromptId::new(id),
            title: title.to_string(),
            description: String::new(),
            nodes: (1..=nodes as i64)
                .map(|n| Node {
                    id: NodeId::new(id * 100 + n),
                    name: format!("step {}", n),
                    action: String::new(),
                })
                .collect(),
        }
    }

    fn view_model(view: &TreeViewState) -> TreeViewModel {
        TreeViewModel {
            model: view.render(),
            width: Some(46),
        }
    }

    fn state() -> TreeViewState {
        let mut view = TreeViewState::new(SlotGeometry::TERMINAL);
        view.remeasure(&FixedWidth(46.0));
        view.apply_snapshot(Arc::new(Tree {
            project: "Platformer".into(),
            main_request: "Build a platformer".into(),
            prompts: vec![
                prompt(1, "Setup", 12),
                prompt(2, "Levels", 0),
                prompt(3, "Polish", 3),
            ],
        }));
        view
    }

    #[test]
    fn test_tree_view_first_page() {
        let mut view = state();
        view.select(PromptId::new(2));
        view.toggle(PromptId::new(3));

        let vm = view_model(&view);
        insta::assert_snapshot!(TreeView::plain(&vm).to_string(), @r"
        Platformer
        Build a platformer

          ▾ 1. Setup (12 nodes)
              step 1   step 2   step 3   step 4   ›  (1-4 of 12)
        > ▾ 2. Levels (no nodes)
          ▸ 3. Polish (3 nodes)
        ");
    }

    #[test]
    fn test_tree_view_middle_page_shows_both_arrows() {
        let mut view = state();
        view.page_next(PromptId::new(1));
        view.toggle(PromptId::new(3));

        let vm = view_model(&view);
        let text = TreeView::plain(&vm).to_string();
        let strip = text.lines().nth(4).unwrap();
        assert_eq!(
            strip,
            "      ‹        step 5   step 6   step 7   ›  (5-7 of 12)"
        );
    }

    #[test]
    fn test_unnamed_nodes_fall_back_to_id() {
        let slot = Slot::Node {
            id: NodeId::new(7),
            name: "  ".into(),
        };
        assert_eq!(slot_label(&slot), "#7");
    }

    #[test]
    fn test_empty_model() {
        let vm = view_model(&TreeViewState::default());
        assert_eq!(TreeView::plain(&vm).to_string(), "No prompt tree loaded.\n");
    }
}
