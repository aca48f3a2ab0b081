//! Interactive tree view.
//!
//! The loop is synchronous: every domain action blocks on the runtime until
//! the coordinator has applied it, then the next frame is drawn from a fresh
//! render model.

mod app;
mod tui_event;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use prompttree_engine::FixedWidth;
use prompttree_runtime::{MutationCoordinator, RemoteStore};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::runtime::Runtime;

use app::AppState;
use tui_event::TuiEvent;

const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run<S: RemoteStore>(coordinator: &MutationCoordinator<S>, runtime: &Runtime) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(0);
    })?;

    let result = event_loop(&mut terminal, coordinator, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<S: RemoteStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    coordinator: &MutationCoordinator<S>,
    runtime: &Runtime,
) -> Result<()> {
    let mut app = AppState::new();

    if let Err(err) = runtime.block_on(coordinator.refresh()) {
        app.message = Some(format!("Could not load the tree: {}", err));
    }

    while !app.should_quit {
        let (cols, _) = terminal::size()?;
        let strip = ui::strip_width(cols);
        if app.strip_width != Some(strip) {
            let max_visible =
                coordinator.with_view_mut(|view| view.remeasure(&FixedWidth(f64::from(strip))));
            tracing::debug!(strip, max_visible, "strip remeasured");
            app.strip_width = Some(strip);
        }

        let model = coordinator.render();
        let notes = coordinator.notes();
        let notification = coordinator.notification();
        terminal.draw(|f| ui::draw(f, &app, &model, &notes, notification.as_ref()))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = app.handle_key(key, model.selected) {
                    dispatch(action, &mut app, coordinator, runtime);
                }
            }
            Event::Resize(..) => app.strip_width = None,
            _ => {}
        }
    }

    Ok(())
}

fn dispatch<S: RemoteStore>(
    action: TuiEvent,
    app: &mut AppState,
    coordinator: &MutationCoordinator<S>,
    runtime: &Runtime,
) {
    app.message = None;
    let selected = coordinator.selected();

    let outcome = match action {
        TuiEvent::Quit => {
            app.should_quit = true;
            Ok(())
        }
        TuiEvent::MoveDown => move_selection(coordinator, runtime, true),
        TuiEvent::MoveUp => move_selection(coordinator, runtime, false),
        TuiEvent::Activate => match selected {
            Some(id) => runtime.block_on(coordinator.activate(id)).map(|_| ()),
            None => move_selection(coordinator, runtime, true),
        },
        TuiEvent::ExpandAll => {
            coordinator.with_view_mut(|view| view.expand_all());
            Ok(())
        }
        TuiEvent::CollapseAll => {
            coordinator.with_view_mut(|view| view.collapse_all());
            Ok(())
        }
        TuiEvent::PageBack => {
            if let Some(id) = selected {
                coordinator.with_view_mut(|view| view.page_back(id));
            }
            Ok(())
        }
        TuiEvent::PageNext => {
            if let Some(id) = selected {
                coordinator.with_view_mut(|view| view.page_next(id));
            }
            Ok(())
        }
        TuiEvent::Refresh => runtime.block_on(async {
            coordinator.refresh().await?;
            match coordinator.selected() {
                Some(id) => coordinator.load_notes(id).await,
                None => Ok(()),
            }
        }),
        TuiEvent::SubmitNote(content) => {
            if let Some(id) = selected
                && !runtime.block_on(coordinator.create_note(id, &content))
            {
                app.message = Some("Note was not saved".to_string());
            }
            Ok(())
        }
        TuiEvent::DeletePrompt(id) => runtime.block_on(coordinator.delete_prompt(id)),
        TuiEvent::DismissNotification => {
            coordinator.take_notification();
            Ok(())
        }
    };

    // Mutation failures already surface as a notification
    if let Err(err) = outcome {
        tracing::debug!(error = %err, "tui action failed");
        if coordinator.notification().is_none() {
            app.message = Some(err.to_string());
        }
    }
}

fn move_selection<S: RemoteStore>(
    coordinator: &MutationCoordinator<S>,
    runtime: &Runtime,
    forward: bool,
) -> prompttree_runtime::Result<()> {
    let next = coordinator.with_view_mut(|view| {
        if forward {
            view.select_next()
        } else {
            view.select_previous()
        }
    });
    match next {
        Some(id) => runtime.block_on(coordinator.select_prompt(id)),
        None => Ok(()),
    }
}
