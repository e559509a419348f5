use crate::app::{App, EditorMode, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

mod calendar_view;
mod day_panel;
pub(super) mod utils;

const DAY_PANEL_WIDTH: u16 = 46;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(DAY_PANEL_WIDTH)])
        .split(root[1]);

    calendar_view::render_calendar(frame, body[0], app);
    day_panel::render_day_panel(frame, body[1], app);

    render_controls(frame, root[2], app);

    // Alert overlay renders on top of everything
    if app.alert.is_some() {
        render_alert_overlay(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    const LABEL: &str = " Daylog";

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1 + 1 + LABEL.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            LABEL,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    let mut spans = vec![
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(status) = &app.status_message {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let hints: Vec<[Span; 2]> = match (app.focus, app.editor.mode()) {
        (Focus::Editor, EditorMode::Editing) => vec![
            key_hint("Ctrl+S", ": Save  "),
            key_hint("Ctrl+T", ": Toggle done  "),
            key_hint("Ctrl+X", ": Clear  "),
            key_hint("Esc", ": Cancel"),
        ],
        (Focus::Editor, _) => vec![
            key_hint("e", ": Edit  "),
            key_hint("Space", ": Toggle done  "),
            key_hint("j/k PgUp/PgDn", ": Scroll  "),
            key_hint("Tab/Esc", ": Calendar"),
        ],
        (Focus::Calendar, _) => vec![
            key_hint("←↓↑→/hjkl", ": Day  "),
            key_hint("{ }", ": Month  "),
            key_hint("[ ]", ": Year  "),
            key_hint("t", ": Today  "),
            key_hint("Space", ": Toggle done  "),
            key_hint("e", ": Edit  "),
            key_hint("r", ": Reload  "),
            key_hint("q", ": Quit"),
        ],
    };

    let spans: Vec<Span> = std::iter::once(Span::raw(" "))
        .chain(hints.into_iter().flatten())
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_alert_overlay(frame: &mut Frame, app: &App) {
    let message = match &app.alert {
        Some(m) => m,
        None => return,
    };

    let area = utils::centered_rect(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::White),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(" Error ", Style::default().fg(Color::Red)))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
