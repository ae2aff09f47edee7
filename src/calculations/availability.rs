use super::day_status::{DayStatus, DayStatusResolver};
use crate::absence::CalendarFacts;
use crate::calendar::{DateRange, WorkWeek};
use crate::error::EngineResult;
use crate::people::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of a personal availability calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability<'a> {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub has_time_off: bool,
    pub status: DayStatus<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub total_days: i64,
    pub working_days: i64,
    pub global_holiday_days: i64,
    pub user_holiday_days: i64,
    pub holiday_days: i64,
    pub time_off_days: i64,
    pub available_days: i64,
    pub unavailable_days: i64,
}

/// Per-day availability of one user over an inclusive range.
pub struct AvailabilityCalculator<'a, F: ?Sized> {
    user: &'a User,
    range: DateRange,
    resolver: DayStatusResolver<'a, F>,
}

impl<'a, F> AvailabilityCalculator<'a, F>
where
    F: CalendarFacts + ?Sized,
{
    pub fn new(
        user: &'a User,
        start: NaiveDate,
        end: NaiveDate,
        facts: &'a F,
        work_week: &'a WorkWeek,
    ) -> EngineResult<Self> {
        let range = DateRange::new(start, end)?;
        Ok(Self::for_range(user, range, DayStatusResolver::new(facts, work_week)))
    }

    pub fn for_range(user: &'a User, range: DateRange, resolver: DayStatusResolver<'a, F>) -> Self {
        Self {
            user,
            range,
            resolver,
        }
    }

    pub fn user(&self) -> &'a User {
        self.user
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn status_on(&self, date: NaiveDate) -> DayStatus<'a> {
        self.resolver.resolve(self.user, date)
    }

    /// Every day of the range keyed by date, in chronological order.
    pub fn days(&self) -> BTreeMap<NaiveDate, DayAvailability<'a>> {
        let facts = self.resolver.facts();
        let work_week = self.resolver.work_week();
        self.range
            .days()
            .map(|date| {
                let entry = DayAvailability {
                    date,
                    is_weekend: work_week.is_weekend(date),
                    is_holiday: facts.personal_holiday(self.user.id, date).is_some(),
                    has_time_off: facts.time_off(self.user.id, date).is_some(),
                    status: self.status_on(date),
                };
                (date, entry)
            })
            .collect()
    }

    /// Period rollup. Only working days can be holiday or time-off days; a
    /// personal holiday on a global holiday counts once, as global.
    pub fn summary(&self) -> AvailabilitySummary {
        let facts = self.resolver.facts();
        let work_week = self.resolver.work_week();

        let mut summary = AvailabilitySummary {
            total_days: self.range.len_days(),
            ..Default::default()
        };
        for date in self.range.days().filter(|date| work_week.is_working_day(*date)) {
            summary.working_days += 1;
            let global = facts.global_holiday(date).is_some();
            if global {
                summary.global_holiday_days += 1;
            } else if facts.personal_holiday(self.user.id, date).is_some() {
                summary.user_holiday_days += 1;
            }
            if facts.time_off(self.user.id, date).is_some() {
                summary.time_off_days += 1;
            }
        }
        summary.holiday_days = summary.global_holiday_days + summary.user_holiday_days;
        summary.available_days = summary.working_days - summary.holiday_days - summary.time_off_days;
        summary.unavailable_days = summary.holiday_days + summary.time_off_days;

        tracing::debug!(
            user = self.user.id,
            start = %self.range.start(),
            end = %self.range.end(),
            available = summary.available_days,
            "computed availability summary"
        );
        summary
    }
}
