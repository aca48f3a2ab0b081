use anyhow::Result;
use prompttree_engine::SlotGeometry;
use prompttree_runtime::PromptTree;
use prompttree_runtime::config::resolve_data_dir;

use super::args::{Cli, Commands};
use super::handlers;
use crate::presentation::ConsoleRenderer;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let renderer = ConsoleRenderer::new(cli.format.is_json());
    let api_url = cli.api_url.as_deref();

    // init must work before a usable config exists
    let open = || PromptTree::open(data_dir.clone(), api_url, SlotGeometry::TERMINAL);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Init { force } => handlers::init::handle(&data_dir, api_url, force, &renderer),

        Commands::Tui => handlers::tui::handle(&open()?, &runtime),

        Commands::Health => runtime.block_on(handlers::health::handle(&open()?, &renderer)),

        Commands::Tree {
            width,
            collapsed,
            pages,
        } => runtime.block_on(handlers::tree::handle(
            &open()?, width, collapsed, &pages, &renderer,
        )),

        Commands::Export { output } => {
            runtime.block_on(handlers::export::handle(&open()?, output, &renderer))
        }

        Commands::Import { file } => {
            runtime.block_on(handlers::import::handle(&open()?, &file, &renderer))
        }

        Commands::Save { name } => {
            runtime.block_on(handlers::saves::handle_save(&open()?, &name, &renderer))
        }

        Commands::Saves => runtime.block_on(handlers::saves::handle_list(&open()?, &renderer)),

        Commands::Load { name } => {
            runtime.block_on(handlers::saves::handle_load(&open()?, &name, &renderer))
        }

        Commands::DeleteSave { name } => {
            runtime.block_on(handlers::saves::handle_delete(&open()?, &name, &renderer))
        }

        Commands::Prompt { command } => {
            runtime.block_on(handlers::prompt::handle(&open()?, command, &renderer))
        }

        Commands::Node { command } => {
            runtime.block_on(handlers::node::handle(&open()?, command, &renderer))
        }

        Commands::Note { command } => {
            runtime.block_on(handlers::note::handle(&open()?, command, &renderer))
        }
    }
}
