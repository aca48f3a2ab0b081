use anyhow::Result;
use prompttree_runtime::PromptTree;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};

pub fn handle(
    data_dir: &Path,
    api_url: Option<&str>,
    force: bool,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let outcome = PromptTree::init(data_dir, api_url, force)?;
    renderer.render(presenters::present_init(&outcome))
}
