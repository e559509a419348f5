use time::{Date, Month};

use super::date::{check_year, CalendarDate, CalendarError};

/// One position in a 7-column month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSlot {
    /// Empty cell before day 1 so that day 1 lands under its weekday.
    Padding,
    Day(CalendarDate),
}

impl GridSlot {
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            GridSlot::Padding => None,
            GridSlot::Day(date) => Some(date),
        }
    }
}

/// Layout of one month: leading padding then every day of the month.
/// Rows are Sunday-first and there is no trailing padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: Month,
    pub slots: Vec<GridSlot>,
}

impl MonthGrid {
    pub fn leading_padding(&self) -> usize {
        self.slots
            .iter()
            .take_while(|slot| slot.date().is_none())
            .count()
    }

    pub fn day_count(&self) -> usize {
        self.slots.len() - self.leading_padding()
    }

    /// Slots split into Sunday-first weeks; the last week may be short.
    pub fn week_rows(&self) -> std::slice::Chunks<'_, GridSlot> {
        self.slots.chunks(7)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.same_month(self.year, self.month)
    }
}

pub fn month_grid(year: i32, month: Month) -> Result<MonthGrid, CalendarError> {
    check_year(year)?;
    let first = Date::from_calendar_date(year, month, 1).map_err(|_| {
        CalendarError::InvalidDate {
            year,
            month: month as u8,
            day: 1,
        }
    })?;
    let first = CalendarDate::from_date(first)?;

    // Same as taking day zero of the following month.
    let last_day = time::util::days_in_year_month(year, month);
    let padding = usize::from(first.weekday_from_sunday());

    let mut slots = Vec::with_capacity(padding + usize::from(last_day));
    slots.extend(std::iter::repeat(GridSlot::Padding).take(padding));
    for day in 1..=last_day {
        slots.push(GridSlot::Day(CalendarDate::from_ymd(year, month as u8, day)?));
    }

    Ok(MonthGrid { year, month, slots })
}

/// Grid for a zero-based month index (January = 0).
pub fn month_grid_by_index(year: i32, index: u8) -> Result<MonthGrid, CalendarError> {
    if index > 11 {
        return Err(CalendarError::MonthIndex(index));
    }
    let month = Month::try_from(index + 1).map_err(|_| CalendarError::MonthIndex(index))?;
    month_grid(year, month)
}

pub fn year_grid(year: i32) -> Result<Vec<MonthGrid>, CalendarError> {
    (0..12).map(|index| month_grid_by_index(year, index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_leap(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    #[test]
    fn february_2024_starts_thursday_with_29_days() {
        let grid = month_grid_by_index(2024, 1).unwrap();
        assert_eq!(grid.month, Month::February);
        assert_eq!(grid.leading_padding(), 4);
        assert_eq!(grid.day_count(), 29);
        assert_eq!(grid.slots.len(), 33);
        assert_eq!(
            grid.slots[4],
            GridSlot::Day(CalendarDate::from_ymd(2024, 2, 1).unwrap())
        );
        assert_eq!(
            grid.slots.last().copied(),
            Some(GridSlot::Day(CalendarDate::from_ymd(2024, 2, 29).unwrap()))
        );
    }

    #[test]
    fn february_length_follows_leap_rule() {
        for year in [1900, 1996, 2000, 2023, 2024, 2100, 2400] {
            let expected = if is_leap(year) { 29 } else { 28 };
            let grid = month_grid(year, Month::February).unwrap();
            assert_eq!(grid.day_count(), expected, "February {year}");
        }
        for year in 1890..2110 {
            let expected = if is_leap(year) { 29 } else { 28 };
            assert_eq!(month_grid(year, Month::February).unwrap().day_count(), expected);
        }
    }

    #[test]
    fn padding_matches_weekday_of_first_day() {
        for year in [1970, 1999, 2000, 2023, 2024, 2025, 2038] {
            for grid in year_grid(year).unwrap() {
                let first = CalendarDate::from_ymd(year, grid.month as u8, 1).unwrap();
                assert_eq!(
                    grid.leading_padding(),
                    usize::from(first.weekday_from_sunday()),
                    "{year}-{:?}",
                    grid.month
                );
            }
        }
    }

    #[test]
    fn days_are_consecutive_and_stay_in_month() {
        for grid in year_grid(2024).unwrap() {
            let days: Vec<_> = grid.slots.iter().filter_map(|slot| slot.date()).collect();
            assert_eq!(days[0].day(), 1);
            for pair in days.windows(2) {
                assert_eq!(pair[0].add_days(1), Some(pair[1]));
            }
            assert!(days.iter().all(|d| grid.contains(*d)));
            // Next day after the last one belongs to the following month
            let after = days.last().unwrap().add_days(1).unwrap();
            assert!(!grid.contains(after));
        }
    }

    #[test]
    fn week_rows_split_by_seven() {
        // September 2024 starts on a Sunday: 30 days over five rows
        let grid = month_grid(2024, Month::September).unwrap();
        let rows: Vec<_> = grid.week_rows().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][0], GridSlot::Day(CalendarDate::from_ymd(2024, 9, 1).unwrap()));
        assert_eq!(rows[4].len(), 2);

        // March 2024 starts on a Friday: 5 padding + 31 days over six rows
        let grid = month_grid(2024, Month::March).unwrap();
        let rows: Vec<_> = grid.week_rows().collect();
        assert_eq!(rows.len(), 6);
        assert!(rows[0][..5].iter().all(|slot| *slot == GridSlot::Padding));
        assert_eq!(rows[5].len(), 1);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let grid = month_grid(2023, Month::December).unwrap();
        assert_eq!(grid.day_count(), 31);
        // 2023-12-01 was a Friday
        assert_eq!(grid.leading_padding(), 5);
    }

    #[test]
    fn building_twice_is_identical() {
        assert_eq!(
            month_grid(2031, Month::July).unwrap(),
            month_grid(2031, Month::July).unwrap()
        );
        assert_eq!(year_grid(1988).unwrap(), year_grid(1988).unwrap());
    }

    #[test]
    fn year_has_twelve_months_and_all_days() {
        let months = year_grid(2024).unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months.iter().map(MonthGrid::day_count).sum::<usize>(), 366);
        assert_eq!(
            year_grid(2023).unwrap().iter().map(MonthGrid::day_count).sum::<usize>(),
            365
        );
    }

    #[test]
    fn rejects_bad_month_index_and_year() {
        assert_eq!(
            month_grid_by_index(2024, 12),
            Err(CalendarError::MonthIndex(12))
        );
        assert_eq!(
            month_grid(10_000, Month::January),
            Err(CalendarError::YearOutOfRange(10_000))
        );
        assert!(month_grid(9999, Month::December).is_ok());
    }
}
