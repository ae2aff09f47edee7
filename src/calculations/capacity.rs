use super::round_to;
use crate::absence::CalendarFacts;
use crate::calendar::DateRange;
use crate::config::{EngineConfig, TimeOffOverlap};
use crate::error::EngineResult;
use crate::people::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display record of one user's capacity over a period. Hours and points are
/// rounded to two decimals; do not feed them back into arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityBreakdown {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_calendar_days: i64,
    pub working_days: i64,
    pub global_holiday_days: i64,
    pub user_holiday_days: i64,
    pub holiday_days: i64,
    pub time_off_days: i64,
    pub available_days: i64,
    pub weekly_capacity: f64,
    pub available_hours: f64,
    pub available_story_points: f64,
}

pub struct CapacityCalculator<'a, F: ?Sized> {
    user: &'a User,
    range: DateRange,
    facts: &'a F,
    config: &'a EngineConfig,
}

impl<'a, F> CapacityCalculator<'a, F>
where
    F: CalendarFacts + ?Sized,
{
    pub fn new(
        user: &'a User,
        start: NaiveDate,
        end: NaiveDate,
        facts: &'a F,
        config: &'a EngineConfig,
    ) -> EngineResult<Self> {
        let range = DateRange::new(start, end)?;
        Ok(Self::for_range(user, range, facts, config))
    }

    pub fn for_range(
        user: &'a User,
        range: DateRange,
        facts: &'a F,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            user,
            range,
            facts,
            config,
        }
    }

    fn working_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let work_week = &self.config.work_week;
        self.range.days().filter(move |date| work_week.is_working_day(*date))
    }

    pub fn working_days_count(&self) -> i64 {
        self.config.work_week.working_days_in(&self.range)
    }

    pub fn global_holiday_days_count(&self) -> i64 {
        self.working_dates()
            .filter(|date| self.facts.global_holiday(*date).is_some())
            .count() as i64
    }

    /// Personal holidays on working days that are not also global holidays.
    pub fn user_holiday_days_count(&self) -> i64 {
        self.working_dates()
            .filter(|date| {
                self.facts.global_holiday(*date).is_none()
                    && self.facts.personal_holiday(self.user.id, *date).is_some()
            })
            .count() as i64
    }

    /// Working days lost to a holiday of either kind, each date counted once.
    pub fn holiday_days_count(&self) -> i64 {
        self.working_dates()
            .filter(|date| {
                self.facts.global_holiday(*date).is_some()
                    || self.facts.personal_holiday(self.user.id, *date).is_some()
            })
            .count() as i64
    }

    /// Working days of the user's time off clipped to the period.
    ///
    /// Under [`TimeOffOverlap::Sum`] overlapping records are counted once per
    /// record; [`TimeOffOverlap::Merge`] unions them first.
    pub fn time_off_days_count(&self) -> i64 {
        let mut clipped: Vec<DateRange> = self
            .facts
            .time_offs(self.user.id)
            .iter()
            .filter_map(|time_off| self.range.clip(time_off.start_date, time_off.end_date))
            .collect();

        let work_week = &self.config.work_week;
        match self.config.time_off_overlap {
            TimeOffOverlap::Sum => clipped
                .iter()
                .map(|range| work_week.working_days_in(range))
                .sum(),
            TimeOffOverlap::Merge => {
                clipped.sort_by_key(|range| range.start());
                merge_ranges(&clipped)
                    .iter()
                    .map(|range| work_week.working_days_in(range))
                    .sum()
            }
        }
    }

    /// May go negative for degenerate input; never clamped.
    pub fn available_days(&self) -> i64 {
        self.working_days_count() - self.holiday_days_count() - self.time_off_days_count()
    }

    pub fn weekly_capacity(&self) -> f64 {
        self.user
            .weekly_capacity_or(self.config.default_weekly_capacity_hours)
    }

    pub fn available_hours(&self) -> f64 {
        self.available_days() as f64 * self.weekly_capacity() / self.config.capacity_days_per_week
    }

    /// Story points this period can absorb, rounded to two decimals.
    pub fn available_story_points(&self, conversion_rate: f64) -> f64 {
        round_to(self.available_hours() / conversion_rate, 2)
    }

    pub fn breakdown(&self) -> CapacityBreakdown {
        self.breakdown_with_rate(self.config.default_points_to_hours)
    }

    pub fn breakdown_with_rate(&self, conversion_rate: f64) -> CapacityBreakdown {
        let working_days = self.working_days_count();
        let holiday_days = self.holiday_days_count();
        let time_off_days = self.time_off_days_count();
        let available_days = working_days - holiday_days - time_off_days;
        let weekly_capacity = self.weekly_capacity();
        if self.user.weekly_capacity_hours.is_none() {
            tracing::debug!(
                user = self.user.id,
                default = weekly_capacity,
                "user has no weekly capacity, using default"
            );
        }
        let available_hours =
            available_days as f64 * weekly_capacity / self.config.capacity_days_per_week;

        let breakdown = CapacityBreakdown {
            period_start: self.range.start(),
            period_end: self.range.end(),
            total_calendar_days: self.range.len_days(),
            working_days,
            global_holiday_days: self.global_holiday_days_count(),
            user_holiday_days: self.user_holiday_days_count(),
            holiday_days,
            time_off_days,
            available_days,
            weekly_capacity,
            available_hours: round_to(available_hours, 2),
            available_story_points: round_to(available_hours / conversion_rate, 2),
        };
        tracing::debug!(
            user = self.user.id,
            working_days,
            available_days,
            available_hours = breakdown.available_hours,
            "computed capacity breakdown"
        );
        breakdown
    }
}

/// Merge sorted inclusive ranges that overlap or touch.
fn merge_ranges(sorted: &[DateRange]) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last)
                if last
                    .end()
                    .succ_opt()
                    .is_none_or(|next| range.start() <= next) =>
            {
                if range.end() > last.end() {
                    if let Ok(joined) = DateRange::new(last.start(), range.end()) {
                        *last = joined;
                    }
                }
            }
            _ => merged.push(*range),
        }
    }
    merged
}
