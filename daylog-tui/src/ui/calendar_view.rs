use super::*;
use crate::calendar::{
    reconcile, year_grid, CalendarCell, DayCell, DayIndex, GridSlot, MonthGrid, ReconcileContext,
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_HEADER: &str = " S  M  T  W  T  F  S";

pub fn render_calendar(frame: &mut Frame, area: Rect, app: &App) {
    let grids = match year_grid(app.current_year) {
        Ok(grids) => grids,
        Err(e) => {
            frame.render_widget(
                Paragraph::new(Span::styled(e.to_string(), Style::default().fg(Color::Red)))
                    .block(Block::default().borders(Borders::ALL)),
                area,
            );
            return;
        }
    };

    let index: DayIndex = app.day_index();
    let ctx = ReconcileContext {
        today: app.today,
        selected: Some(app.selected_date),
        index: &index,
    };
    let months: Vec<Vec<CalendarCell>> = grids.iter().map(|grid| reconcile(grid, &ctx)).collect();

    let total: usize = grids.iter().map(|grid| grid.day_count()).sum();
    let completed = months
        .iter()
        .flatten()
        .filter_map(CalendarCell::day)
        .filter(|cell| cell.is_completed)
        .count();

    let border_color = if app.focus == Focus::Calendar {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", app.current_year),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}/{} days done ", completed, total),
                Style::default().fg(Color::Green),
            ),
        ]));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(inner);

    for (row_index, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(*row);
        for (col_index, col) in cols.iter().enumerate() {
            let month = row_index * 3 + col_index;
            render_month(frame, *col, &grids[month], &months[month]);
        }
    }
}

/// `cells` is `reconcile(grid, ..)`, one cell per grid slot.
fn render_month(frame: &mut Frame, area: Rect, grid: &MonthGrid, cells: &[CalendarCell]) {
    let mut lines = vec![Line::from(Span::styled(
        WEEKDAY_HEADER,
        Style::default().fg(Color::DarkGray),
    ))];
    for (row, week) in grid.week_rows().enumerate() {
        let row_cells = cells.get(row * 7..).unwrap_or_default();
        let spans: Vec<Span> = week
            .iter()
            .zip(row_cells)
            .map(|(slot, cell)| match (slot, cell) {
                (GridSlot::Day(_), CalendarCell::Day(day)) => {
                    Span::styled(format!("{:>2} ", day.day_number), cell_style(day))
                }
                _ => Span::raw("   "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let name = MONTH_NAMES[usize::from(grid.month as u8 - 1)];
    let block = Block::default().title(Span::styled(
        format!(" {} ", name),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn cell_style(cell: &DayCell) -> Style {
    let mut style = Style::default();
    if cell.is_completed {
        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
    }
    if cell.is_today {
        style = style.fg(Color::Magenta).add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        if cell.is_completed {
            style = style.bg(Color::Green).fg(Color::Black);
        }
    }
    if !cell.is_current_month {
        style = style.fg(Color::DarkGray);
    }
    if cell.is_selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> DayCell {
        DayCell {
            date: "2024-03-15".parse().unwrap(),
            day_number: 15,
            is_today: false,
            is_selected: false,
            is_current_month: true,
            is_completed: false,
        }
    }

    #[test]
    fn completed_days_are_green() {
        let style = cell_style(&DayCell {
            is_completed: true,
            ..cell()
        });
        assert_eq!(style.fg, Some(Color::Green));
    }

    #[test]
    fn foreign_days_are_dimmed() {
        let style = cell_style(&DayCell {
            is_current_month: false,
            is_completed: true,
            ..cell()
        });
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn selection_is_reversed() {
        let style = cell_style(&DayCell {
            is_selected: true,
            ..cell()
        });
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }
}
