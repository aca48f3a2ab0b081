use anyhow::Result;
use prompttree_engine::FixedWidth;
use prompttree_runtime::PromptTree;
use prompttree_types::PromptId;
use terminal_size::{Width, terminal_size};

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

/// Cells of a strip line that are not slots: indent and range suffix
const STRIP_CHROME: u16 = 22;

fn terminal_strip_width() -> Option<u16> {
    terminal_size().map(|(Width(cols), _)| cols.saturating_sub(STRIP_CHROME))
}

pub async fn handle(
    workspace: &PromptTree,
    width: Option<u16>,
    collapsed: bool,
    pages: &[i64],
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let coordinator = workspace.coordinator();
    coordinator.refresh().await?;

    let measured = width.or_else(terminal_strip_width);
    let unknown = coordinator.with_view_mut(|view| {
        match width {
            Some(cells) => view.remeasure(&FixedWidth(f64::from(cells))),
            // unknown terminal width measures as zero and falls back
            None => view.remeasure(&|| f64::from(terminal_strip_width().unwrap_or(0))),
        };

        if collapsed {
            view.collapse_all();
        }
        let mut unknown = None;
        for &id in pages {
            if view.page_next(PromptId::new(id)).is_none() {
                unknown.get_or_insert(id);
            }
        }
        unknown
    });

    if let Some(id) = unknown {
        anyhow::bail!("Prompt {} not found in tree", id);
    }

    renderer.render(presenters::present_tree(coordinator.render(), measured))
}
