use crate::calendar::DateRange;
use crate::people::{User, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single personal day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// An inclusive range of absence. `start_date <= end_date` is checked by
/// snapshot validation, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TimeOff {
    pub const LEAVE_TYPES: [&'static str; 5] = [
        "Sick Leave",
        "Vacation",
        "Personal Leave",
        "Maternity/Paternity",
        "Unpaid Leave",
    ];

    pub fn new(start_date: NaiveDate, end_date: NaiveDate, leave_type: impl Into<String>) -> Self {
        Self {
            start_date,
            end_date,
            leave_type: leave_type.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether `leave_type` is one of [`TimeOff::LEAVE_TYPES`].
    pub fn has_known_leave_type(&self) -> bool {
        Self::LEAVE_TYPES.contains(&self.leave_type.as_str())
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Calendar length of the record, both ends included.
    pub fn days_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(self.start_date, self.end_date)
    }
}

/// A non-working day for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalHoliday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GlobalHoliday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Lookups the day status resolver needs. Implementations are expected to
/// answer from memory; the resolver calls them once per (user, day).
pub trait CalendarFacts {
    fn global_holiday(&self, date: NaiveDate) -> Option<&GlobalHoliday>;

    fn personal_holiday(&self, user: UserId, date: NaiveDate) -> Option<&Holiday>;

    /// First time-off record (in start-date order) covering `date`.
    fn time_off(&self, user: UserId, date: NaiveDate) -> Option<&TimeOff>;

    /// Every time-off record of the user known to this provider.
    fn time_offs(&self, user: UserId) -> &[&TimeOff];
}

/// Pre-fetched calendar facts for a set of users, keyed for O(1) day lookups.
#[derive(Debug, Default)]
pub struct AbsenceIndex<'a> {
    global: HashMap<NaiveDate, &'a GlobalHoliday>,
    holidays: HashMap<(UserId, NaiveDate), &'a Holiday>,
    time_offs: HashMap<UserId, Vec<&'a TimeOff>>,
}

impl<'a> AbsenceIndex<'a> {
    pub fn build<I>(users: I, global_holidays: &'a [GlobalHoliday]) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        Self::collect(users, global_holidays, None)
    }

    /// Like [`AbsenceIndex::build`], keeping only records that touch `range`.
    pub fn build_in_range<I>(users: I, global_holidays: &'a [GlobalHoliday], range: DateRange) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        Self::collect(users, global_holidays, Some(range))
    }

    fn collect<I>(users: I, global_holidays: &'a [GlobalHoliday], range: Option<DateRange>) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        let in_range = |date: NaiveDate| range.is_none_or(|r| r.contains(date));

        let mut index = Self::default();
        for holiday in global_holidays.iter().filter(|gh| in_range(gh.date)) {
            index.global.entry(holiday.date).or_insert(holiday);
        }

        let mut user_count = 0usize;
        for user in users {
            user_count += 1;
            for holiday in user.holidays.iter().filter(|h| in_range(h.date)) {
                index.holidays.entry((user.id, holiday.date)).or_insert(holiday);
            }
            let mut ranges: Vec<&TimeOff> = user
                .time_offs
                .iter()
                .filter(|t| range.is_none_or(|r| t.overlaps(&r)))
                .collect();
            ranges.sort_by_key(|t| t.start_date);
            index.time_offs.entry(user.id).or_default().extend(ranges);
        }

        tracing::debug!(
            users = user_count,
            global_holidays = index.global.len(),
            personal_holidays = index.holidays.len(),
            "built absence index"
        );
        index
    }
}

impl CalendarFacts for AbsenceIndex<'_> {
    fn global_holiday(&self, date: NaiveDate) -> Option<&GlobalHoliday> {
        self.global.get(&date).copied()
    }

    fn personal_holiday(&self, user: UserId, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&(user, date)).copied()
    }

    fn time_off(&self, user: UserId, date: NaiveDate) -> Option<&TimeOff> {
        self.time_offs
            .get(&user)?
            .iter()
            .copied()
            .find(|time_off| time_off.covers(date))
    }

    fn time_offs(&self, user: UserId) -> &[&TimeOff] {
        self.time_offs
            .get(&user)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
