//! Game calendar
//!
//! The weekly ticker lives outside the core. It hands us `(year, month, week)`
//! triples; everything here is the arithmetic on those triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weeks in one month
pub const WEEKS_PER_MONTH: u32 = 4;

/// Months in one year (13 x 4 = 52 weeks)
pub const MONTHS_PER_YEAR: u32 = 13;

/// Weeks in one year
pub const WEEKS_PER_YEAR: u32 = WEEKS_PER_MONTH * MONTHS_PER_YEAR;

/// A point on the game calendar. All fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameDate {
    pub year: u32,
    pub month: u32,
    pub week: u32,
}

impl GameDate {
    pub fn new(year: u32, month: u32, week: u32) -> Self {
        Self { year, month, week }
    }

    /// First week of the first year
    pub fn start() -> Self {
        Self::new(1, 1, 1)
    }

    /// Weeks elapsed since `start()`
    ///
    /// `(year-1)*52 + (month-1)*4 + (week-1)`. Zero components are treated
    /// as 1 so a malformed tick never underflows; huge dates saturate.
    pub fn cumulative_week(&self) -> u32 {
        self.year
            .saturating_sub(1)
            .saturating_mul(WEEKS_PER_YEAR)
            .saturating_add(self.month.saturating_sub(1).saturating_mul(WEEKS_PER_MONTH))
            .saturating_add(self.week.saturating_sub(1))
    }

    /// Inverse of `cumulative_week`
    pub fn from_cumulative_week(weeks: u32) -> Self {
        Self {
            year: weeks / WEEKS_PER_YEAR + 1,
            month: (weeks % WEEKS_PER_YEAR) / WEEKS_PER_MONTH + 1,
            week: weeks % WEEKS_PER_MONTH + 1,
        }
    }

    /// The following week, rolling over months and years
    pub fn next_week(&self) -> Self {
        Self::from_cumulative_week(self.cumulative_week().saturating_add(1))
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{} M{} W{}", self.year, self.month, self.week)
    }
}

/// Discrete week counter with a pause latch.
///
/// Stands in for the external clock in headless runs. A paused clock refuses
/// to advance until `resume()` is called.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekClock {
    date: GameDate,
    paused: bool,
}

impl WeekClock {
    pub fn new(date: GameDate) -> Self {
        Self { date, paused: false }
    }

    pub fn date(&self) -> GameDate {
        self.date
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance one week. Returns the new date, or `None` while paused.
    pub fn advance(&mut self) -> Option<GameDate> {
        if self.paused {
            return None;
        }
        self.date = self.date.next_week();
        Some(self.date)
    }
}
