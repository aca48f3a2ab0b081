use prompttree_engine::{BranchStrip, PALETTE_SIZE, PromptRow, TreeRenderModel};
use prompttree_runtime::{NotesState, Notification};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{AppState, InputMode};
use crate::presentation::formatters::text::{fit, single_line};
use crate::presentation::formatters::time::format_age;
use crate::presentation::views::tree::slot_label;

const PALETTE: [Color; PALETTE_SIZE] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::LightRed,
];

const STRIP_INDENT: u16 = 6;
const SLOT_LABEL_WIDTH: usize = 8;
const NOTES_HEIGHT: u16 = 8;

const HELP: &str =
    "↑↓ select  ⏎ expand  E/C all  ←→ page  n note  d delete  r refresh  x dismiss  q quit";

/// Cells available to a strip in a terminal `cols` wide
pub(crate) fn strip_width(cols: u16) -> u16 {
    // two border cells
    cols.saturating_sub(2 + STRIP_INDENT)
}

pub(crate) fn draw(
    f: &mut Frame,
    app: &AppState,
    model: &TreeRenderModel,
    notes: &NotesState,
    notification: Option<&Notification>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(NOTES_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], model);
    render_tree(f, chunks[1], model);
    render_notes(f, chunks[2], app, notes);
    render_status(f, chunks[3], app, notification);
}

fn render_header(f: &mut Frame, area: Rect, model: &TreeRenderModel) {
    let project = if model.project.is_empty() {
        "(no project)".to_string()
    } else {
        model.project.clone()
    };
    let lines = vec![
        Line::from(Span::styled(
            project,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            single_line(&model.main_request),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn row_line(row: &PromptRow) -> Line<'static> {
    let cursor = if row.selected { ">" } else { " " };
    let marker = if row.expanded { "▾" } else { "▸" };
    let mut style = Style::default().fg(PALETTE[row.color % PALETTE_SIZE]);
    if row.selected {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    Line::from(vec![
        Span::raw(format!("{} {} ", cursor, marker)),
        Span::styled(format!("{}. {}", row.step, single_line(&row.title)), style),
        Span::styled(
            format!("  {}", row.node_count),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn strip_line(branch: &BranchStrip, count: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(STRIP_INDENT as usize))];
    for slot in &branch.slots {
        spans.push(Span::raw(format!(
            "{} ",
            fit(&slot_label(slot), SLOT_LABEL_WIDTH)
        )));
    }
    spans.push(Span::styled(
        format!(
            " ({}-{} of {})",
            branch.window.start + 1,
            branch.window.end,
            count
        ),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn render_tree(f: &mut Frame, area: Rect, model: &TreeRenderModel) {
    let mut lines = Vec::new();
    let mut selected_line = 0usize;

    if model.prompts.is_empty() {
        lines.push(Line::from("No prompts yet."));
    }
    for row in &model.prompts {
        if row.selected {
            selected_line = lines.len();
        }
        lines.push(row_line(row));
        if let Some(branch) = &row.branch {
            lines.push(strip_line(branch, row.node_count));
        }
    }

    // Keep the selected row (and its strip) on screen
    let height = area.height.saturating_sub(2) as usize;
    let scroll = (selected_line + 2).saturating_sub(height);

    let tree = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Prompts").borders(Borders::ALL))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(tree, area);
}

fn render_notes(f: &mut Frame, area: Rect, app: &AppState, notes: &NotesState) {
    let title = match notes.prompt() {
        Some(id) => format!("Notes for prompt {}", id),
        None => "Notes".to_string(),
    };

    let mut lines = Vec::new();
    if let InputMode::Note(buffer) = &app.mode {
        lines.push(Line::from(vec![
            Span::styled("New note: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}_", buffer)),
        ]));
    }

    if let Some(error) = notes.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else if notes.prompt().is_none() {
        lines.push(Line::from("Select a prompt to see its notes."));
    } else if notes.is_empty() {
        lines.push(Line::from("No notes."));
    } else {
        let now = chrono::Utc::now();
        for note in notes.notes() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>8}  ", format_age(note.created_at, now)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(single_line(&note.content)),
            ]));
        }
    }

    let panel = Paragraph::new(Text::from(lines))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &AppState, notification: Option<&Notification>) {
    let line = if let InputMode::ConfirmDelete(id) = &app.mode {
        Line::from(Span::styled(
            format!("Delete prompt {}? (y/n)", id),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(notification) = notification {
        Line::from(Span::styled(
            notification.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(message) = &app.message {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray)))
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_width_leaves_room_for_border_and_indent() {
        assert_eq!(strip_width(80), 72);
        assert_eq!(strip_width(4), 0);
    }
}
