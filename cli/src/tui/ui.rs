use fishball_core::time::format_display;
use fishball_core::{TaskKind, TaskRepository};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::tui::app::{App, Speaker};

pub fn draw<R: TaskRepository>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("FISHBALL")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(main_chunks[1]);

    draw_transcript(f, app, content_chunks[0]);
    draw_task_list(f, app, content_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let footer = Paragraph::new("Enter: Send | Up/Down: Browse tasks | Esc: Quit | try 'help'")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_transcript<R: TaskRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let mut lines = Vec::new();
    for entry in &app.transcript {
        let (name, style) = match entry.speaker {
            Speaker::User => ("you", Style::default().fg(Color::Green)),
            Speaker::Fishball => ("fishball", Style::default().fg(Color::Cyan)),
            Speaker::Problem => ("fishball", Style::default().fg(Color::Red)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
            Span::styled(name, style.add_modifier(Modifier::BOLD)),
        ]));
        for text in entry.text.lines() {
            lines.push(Line::from(Span::styled(format!("  {}", text), style)));
        }
        lines.push(Line::from(""));
    }

    // keep the newest lines in view; wrapping can push a few more below
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let transcript = Paragraph::new(lines)
        .block(Block::default().title(" Chat ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(transcript, area);
}

fn draw_task_list<R: TaskRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let rows: Vec<Row> = app.service.tasks().iter().enumerate().map(|(i, task)| {
        let status_icon = if task.is_completed() { "✔" } else { "☐" };

        let kind_style = match task.kind() {
            TaskKind::Todo => Style::default().fg(Color::Green),
            TaskKind::Deadline { .. } => Style::default().fg(Color::Red),
            TaskKind::Event { .. } => Style::default().fg(Color::Yellow),
        };

        let when = match task.kind() {
            TaskKind::Todo => "-".to_string(),
            TaskKind::Deadline { due } => format!("by {}", format_display(due)),
            TaskKind::Event { start, end } => {
                format!("{} - {}", format_display(start), format_display(end))
            }
        };

        Row::new(vec![
            Span::raw(format!("{}", i + 1)),
            Span::styled(task.kind().icon().to_string(), kind_style),
            Span::raw(status_icon),
            Span::styled(task.description().to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(when),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Number
            Constraint::Length(2),  // Kind
            Constraint::Length(2),  // Status
            Constraint::Min(10),    // Description
            Constraint::Length(20), // When
        ]
    )
    .header(Row::new(vec!["#", "K", "St", "Task", "When"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input<R: TaskRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().title(" Command ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    f.set_cursor_position((cursor_column(area, app.cursor_position), area.y + 1));
}

/// Screen column of the input cursor, pinned inside the box borders.
fn cursor_column(area: Rect, cursor_position: usize) -> u16 {
    let offset = u16::try_from(cursor_position).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}
