//! Calendar arithmetic for the year view: validated dates, month grids and
//! the reconciliation of grid days against fetched day records.

mod date;
mod grid;
mod reconcile;

pub use date::{CalendarDate, CalendarError, MAX_YEAR, MIN_YEAR};
pub use grid::{month_grid, month_grid_by_index, year_grid, GridSlot, MonthGrid};
pub use reconcile::{reconcile, CalendarCell, DayCell, DayIndex, ReconcileContext};
