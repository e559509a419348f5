use super::*;
use crate::app::DayEditor;
use crate::types::format_updated_at;
use time::macros::format_description;

pub fn render_day_panel(frame: &mut Frame, area: Rect, app: &App) {
    let editor = &app.editor;
    let focused = app.focus == Focus::Editor;
    let border_color = match (focused, editor.mode()) {
        (true, EditorMode::Editing) => Color::Green,
        (true, _) => Color::Yellow,
        (false, _) => Color::DarkGray,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", long_date(editor)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // completion + last update
            Constraint::Min(0),    // notes
            Constraint::Length(if editor.error.is_some() { 2 } else { 0 }),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_lines(editor)), chunks[0]);

    let notes = match editor.mode() {
        EditorMode::Loading => Paragraph::new(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        )),
        EditorMode::Editing | EditorMode::Saving => {
            let (line, _) = editor.content.cursor_line_col();
            let height = chunks[1].height.saturating_sub(2) as usize;
            let scroll = line.saturating_sub(height.saturating_sub(1)) as u16;
            Paragraph::new(editing_text(editor))
                .style(Style::default().fg(Color::White))
                .scroll((scroll, 0))
        }
        EditorMode::Viewing if editor.content.value.is_empty() => Paragraph::new(Span::styled(
            "No notes yet. Press e to write some.",
            Style::default().fg(Color::DarkGray),
        )),
        EditorMode::Viewing => Paragraph::new(markdown_lines(&editor.content.value))
            .wrap(Wrap { trim: false })
            .scroll((editor.scroll, 0)),
    };
    let notes_title = match editor.mode() {
        EditorMode::Editing if editor.is_dirty() => " Notes (editing, unsaved) ",
        EditorMode::Editing => " Notes (editing) ",
        EditorMode::Saving => " Notes (saving…) ",
        _ => " Notes ",
    };
    frame.render_widget(
        notes.block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(notes_title, Style::default().fg(Color::DarkGray))),
        ),
        chunks[1],
    );

    if let Some(error) = &editor.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }
}

fn long_date(editor: &DayEditor) -> String {
    let date = editor.date();
    date.as_date()
        .format(format_description!(
            "[weekday], [day padding:none] [month repr:long] [year]"
        ))
        .unwrap_or_else(|_| date.to_string())
}

fn status_lines(editor: &DayEditor) -> Vec<Line<'static>> {
    let completion = if editor.mode() == EditorMode::Loading {
        Span::styled("[ ] …", Style::default().fg(Color::DarkGray))
    } else if editor.completed() {
        Span::styled(
            "[✓] Completed",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ ] Not completed", Style::default().fg(Color::Gray))
    };

    let updated = editor
        .updated_at()
        .and_then(format_updated_at)
        .map(|ts| format!("Last updated {}", ts))
        .unwrap_or_else(|| "Never saved".to_string());

    vec![
        Line::from(completion),
        Line::from(Span::styled(updated, Style::default().fg(Color::DarkGray))),
    ]
}

/// Content with a block cursor at the insertion point.
fn editing_text(editor: &DayEditor) -> Vec<Line<'static>> {
    let content = &editor.content;
    let (before, after) = content.value.split_at(content.cursor);
    let with_cursor = format!("{}█{}", before, after);
    with_cursor
        .split('\n')
        .map(|line| Line::from(line.to_string()))
        .collect()
}

/// Light markdown styling: headings, list items and code fences.
fn markdown_lines(content: &str) -> Vec<Line<'static>> {
    let mut in_code = false;
    content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") {
                in_code = !in_code;
                return Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let style = if in_code {
                Style::default().fg(Color::LightYellow)
            } else if trimmed.starts_with('#') {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if trimmed.starts_with("- [x]") || trimmed.starts_with("- [X]") {
                Style::default().fg(Color::Green)
            } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect()
}
