use std::collections::HashMap;

use super::date::CalendarDate;
use super::grid::{GridSlot, MonthGrid};
use crate::types::DayRecord;

/// Completion flags keyed by date, built once per render.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    completed: HashMap<CalendarDate, bool>,
}

impl DayIndex {
    pub fn from_records(records: &[DayRecord]) -> Self {
        Self {
            completed: records
                .iter()
                .map(|record| (record.date, record.completed))
                .collect(),
        }
    }

    /// Layer tentative completion values over the fetched ones.
    pub fn with_pending(mut self, pending: impl IntoIterator<Item = (CalendarDate, bool)>) -> Self {
        self.completed.extend(pending);
        self
    }

    /// Absent dates count as not completed.
    pub fn is_completed(&self, date: CalendarDate) -> bool {
        self.completed.get(&date).copied().unwrap_or(false)
    }
}

pub struct ReconcileContext<'a> {
    pub today: CalendarDate,
    pub selected: Option<CalendarDate>,
    pub index: &'a DayIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub day_number: u8,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_current_month: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Padding,
    Day(DayCell),
}

impl CalendarCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::Padding => None,
            CalendarCell::Day(cell) => Some(cell),
        }
    }
}

/// Annotate each day of `grid` with today/selected/current-month/completed
/// flags. Padding stays padding.
pub fn reconcile(grid: &MonthGrid, ctx: &ReconcileContext<'_>) -> Vec<CalendarCell> {
    grid.slots
        .iter()
        .map(|slot| match *slot {
            GridSlot::Padding => CalendarCell::Padding,
            GridSlot::Day(date) => CalendarCell::Day(DayCell {
                date,
                day_number: date.day(),
                is_today: date == ctx.today,
                is_selected: ctx.selected == Some(date),
                // Always true for grids built by `month_grid`; kept so foreign
                // dates in a grid would render dimmed.
                is_current_month: grid.contains(date),
                is_completed: ctx.index.is_completed(date),
            }),
        })
        .collect()
}
