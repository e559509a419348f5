use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },
    #[error("expected a YYYY-MM-DD date, got {0:?}")]
    Parse(String),
    #[error("month index {0} is outside 0..=11")]
    MonthIndex(u8),
    #[error("year {0} is outside {}..={}", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange(i32),
}

/// A validated calendar day, the key of every day record.
///
/// Serializes as `YYYY-MM-DD`, which is also the path segment used by the
/// REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        check_year(year)?;
        let invalid = || CalendarError::InvalidDate { year, month, day };
        let month_value = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month_value, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub(crate) fn from_date(date: Date) -> Result<Self, CalendarError> {
        check_year(date.year())?;
        Ok(Self(date))
    }

    /// Today's date in the local timezone, falling back to UTC when the
    /// offset cannot be determined.
    pub fn today() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self(OffsetDateTime::now_utc().to_offset(offset).date())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    /// Zero-based month, January = 0.
    pub fn month_index(self) -> u8 {
        self.0.month() as u8 - 1
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    /// Weekday index with Sunday = 0.
    pub fn weekday_from_sunday(self) -> u8 {
        self.0.weekday().number_days_from_sunday()
    }

    /// Shift by a number of days. Returns `None` past the supported year range.
    pub fn add_days(self, days: i64) -> Option<Self> {
        self.0
            .checked_add(Duration::days(days))
            .and_then(|date| Self::from_date(date).ok())
    }

    /// Same day-of-month in a month `months` away, clamped to that month's
    /// last day (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(self, months: i32) -> Option<Self> {
        let zero_based = self.year() * 12 + i32::from(self.month_index()) + months;
        let year = zero_based.div_euclid(12);
        let month = Month::try_from(zero_based.rem_euclid(12) as u8 + 1).ok()?;
        check_year(year).ok()?;
        let day = self.day().min(time::util::days_in_year_month(year, month));
        Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// True when both dates fall in the same year and month.
    pub fn same_month(self, year: i32, month: Month) -> bool {
        self.year() == year && self.month() == month
    }

    pub fn as_date(self) -> Date {
        self.0
    }
}

pub(crate) fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month() as u8,
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || CalendarError::Parse(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(parse_error());
        }
        let digits = |range: std::ops::Range<usize>| -> Result<u32, CalendarError> {
            let part = &s[range];
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(parse_error());
            }
            part.parse().map_err(|_| parse_error())
        };
        let year = digits(0..4)? as i32;
        let month = digits(5..7)? as u8;
        let day = digits(8..10)? as u8;
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.to_string()
    }
}
