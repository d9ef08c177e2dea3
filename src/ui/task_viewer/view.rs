use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::task::Task;

use super::app::{AppState, StatusKind, CHECKBOX_WIDTH, REMOVE_WIDTH};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_BG_LIFTED: Color = Color::Rgb(38, 70, 86);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

const KEY_HINT: &str =
    "enter add  tab toggle  del remove  alt+up/down move  drag reorder  ctrl+x clear  esc quit";

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let show_progress = app.config.show_progress && app.board.progress().is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(if show_progress { 1 } else { 0 }),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_title(frame, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
    if show_progress {
        render_progress(frame, app, chunks[3]);
    }
    render_footer(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "hashlist",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(KEY_HINT, Style::default().fg(COLOR_MUTED_DARK)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("New task")
        .border_style(Style::default().fg(COLOR_BORDER_LIST));
    let inner = block.inner(area);
    let widget = Paragraph::new(Span::styled(
        app.input.clone(),
        Style::default().fg(COLOR_TEXT),
    ))
    .block(block);
    frame.render_widget(widget, area);

    if inner.width > 0 && inner.height > 0 {
        let typed = app.input.chars().count() as u16;
        let x = inner.x + typed.min(inner.width - 1);
        frame.set_cursor(x, inner.y);
    }
}

fn render_list(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Tasks ({})", app.board.tasks().len()))
        .border_style(Style::default().fg(COLOR_BORDER_LIST));
    let inner = block.inner(area);
    app.update_geometry(inner);

    let mut lines: Vec<Line<'static>> = Vec::new();
    if app.board.tasks().is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks yet. Type one above and press enter.",
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let geometry = app.geometry;
        let width = usize::from(inner.width);
        let end = (geometry.scroll + geometry.visible_rows()).min(app.board.tasks().len());
        for index in geometry.scroll..end {
            if let Some(task) = app.board.tasks().get(index) {
                lines.extend(render_row(app, index, task, width));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_row(app: &AppState, index: usize, task: &Task, width: usize) -> Vec<Line<'static>> {
    let lifted = app.board.lifted() == Some(index);
    let hovered = app.config.hover_highlight && app.hovered == Some(index);
    let focused = app.cursor == Some(index);
    let show_remove = app.shows_remove(index);

    let row_style = if lifted {
        Style::default()
            .bg(COLOR_BG_LIFTED)
            .add_modifier(Modifier::BOLD)
    } else if hovered {
        Style::default().bg(COLOR_BG_MUTED)
    } else {
        Style::default()
    };

    let checkbox = if task.checked { "[x] " } else { "[ ] " };
    let checkbox_style = if task.checked {
        row_style.fg(COLOR_SUCCESS)
    } else {
        row_style.fg(COLOR_MUTED)
    };

    let text_width = width.saturating_sub(usize::from(CHECKBOX_WIDTH + REMOVE_WIDTH));
    let text = pad_text(&truncate_text(&task.text, text_width), text_width);
    let mut text_style = row_style.fg(if focused { COLOR_ACCENT } else { COLOR_TEXT });
    if task.checked {
        text_style = text_style
            .fg(COLOR_MUTED_DARK)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    let remove = if show_remove { " ✕" } else { "  " };

    let mut lines = vec![Line::from(vec![
        Span::styled(checkbox, checkbox_style),
        Span::styled(text, text_style),
        Span::styled(remove, row_style.fg(COLOR_ERROR)),
    ])];
    for _ in 1..app.geometry.row_height {
        lines.push(Line::from(Span::styled(" ".repeat(width), row_style)));
    }
    lines
}

fn render_progress(frame: &mut Frame, app: &AppState, area: Rect) {
    let Some(progress) = app.board.progress() else {
        return;
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(COLOR_SUCCESS).bg(COLOR_BG_MUTED))
        .ratio(progress.ratio())
        .label(progress.to_string());
    frame.render_widget(gauge, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            Span::styled(fragment_label(app), Style::default().fg(COLOR_INFO)),
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(Span::styled(
            fragment_label(app),
            Style::default().fg(COLOR_INFO),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn fragment_label(app: &AppState) -> String {
    let fragment = app.board.fragment();
    if fragment.is_empty() {
        "# (empty)".to_string()
    } else {
        format!("#{fragment}")
    }
}

fn pad_text(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    format!("{value}{}", " ".repeat(width - len))
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}
