use crate::error::{ConfigError, EngineError, EngineResult};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The working pattern of a week: which weekdays count as working days.
///
/// Everything that is not a working day is a weekend for the day status
/// resolver, regardless of which weekdays those are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkWeekConfig", into = "WorkWeekConfig")]
pub struct WorkWeek {
    non_working_days: HashSet<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWeekConfig {
    working_days: Vec<Weekday>,
}

impl Default for WorkWeek {
    fn default() -> Self {
        Self {
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }
}

impl WorkWeek {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn custom<I>(working_days: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Weekday>,
    {
        let config = WorkWeekConfig::new(working_days);
        Self::from_config(&config)
    }

    pub fn from_config(config: &WorkWeekConfig) -> Result<Self, ConfigError> {
        if config.working_days.is_empty() {
            return Err(ConfigError::EmptyWorkWeek);
        }
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();
        Ok(Self { non_working_days })
    }

    pub fn to_config(&self) -> WorkWeekConfig {
        WorkWeekConfig::from(self)
    }

    /// Check if a date falls on one of the designated non-working weekdays
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.non_working_days.contains(&date.weekday())
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date)
    }

    /// Count working days between two dates (inclusive). Inverted bounds count as zero.
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        if start > end {
            return 0;
        }
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.is_working_day(*day))
            .count() as i64
    }

    pub fn working_days_in(&self, range: &DateRange) -> i64 {
        self.count_working_days(range.start(), range.end())
    }

    /// Get all working days in a range
    pub fn working_days_in_range(&self, range: &DateRange) -> Vec<NaiveDate> {
        range.days().filter(|day| self.is_working_day(*day)).collect()
    }
}

impl WorkWeekConfig {
    pub fn new<I>(working_days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut working: Vec<Weekday> = working_days.into_iter().collect();
        working.sort_by_key(|wd| wd.num_days_from_monday());
        working.dedup_by(|a, b| a.num_days_from_monday() == b.num_days_from_monday());
        Self {
            working_days: working,
        }
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }
}

impl Default for WorkWeekConfig {
    fn default() -> Self {
        WorkWeekConfig::from(&WorkWeek::default())
    }
}

impl From<&WorkWeek> for WorkWeekConfig {
    fn from(week: &WorkWeek) -> Self {
        let working = WorkWeek::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !week.non_working_days.contains(day));
        WorkWeekConfig::new(working)
    }
}

impl From<WorkWeek> for WorkWeekConfig {
    fn from(week: WorkWeek) -> Self {
        WorkWeekConfig::from(&week)
    }
}

impl TryFrom<WorkWeekConfig> for WorkWeek {
    type Error = ConfigError;

    fn try_from(config: WorkWeekConfig) -> Result<Self, Self::Error> {
        WorkWeek::from_config(&WorkWeekConfig::new(config.working_days))
    }
}

/// An inclusive, non-empty range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Intersect with another inclusive span; `None` when they do not overlap.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<DateRange> {
        let clipped_start = start.max(self.start);
        let clipped_end = end.min(self.end);
        (clipped_start <= clipped_end).then_some(DateRange {
            start: clipped_start,
            end: clipped_end,
        })
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}
