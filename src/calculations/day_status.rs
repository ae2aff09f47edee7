use crate::absence::{CalendarFacts, GlobalHoliday, Holiday, TimeOff};
use crate::calendar::WorkWeek;
use crate::people::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatusKind {
    Weekend,
    GlobalHoliday,
    Holiday,
    TimeOff,
    Available,
}

impl DayStatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatusKind::Weekend => "weekend",
            DayStatusKind::GlobalHoliday => "global_holiday",
            DayStatusKind::Holiday => "holiday",
            DayStatusKind::TimeOff => "time_off",
            DayStatusKind::Available => "available",
        }
    }

    /// Holidays of either kind and time off; weekends are not absences.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            DayStatusKind::GlobalHoliday | DayStatusKind::Holiday | DayStatusKind::TimeOff
        )
    }
}

impl fmt::Display for DayStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record that decided a day's status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum MatchedRecord<'a> {
    GlobalHoliday(&'a GlobalHoliday),
    Holiday(&'a Holiday),
    TimeOff(&'a TimeOff),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatus<'a> {
    pub kind: DayStatusKind,
    pub reason: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<MatchedRecord<'a>>,
}

impl DayStatus<'_> {
    fn plain(kind: DayStatusKind, reason: &str) -> Self {
        Self {
            kind,
            reason: reason.to_string(),
            details: String::new(),
            record: None,
        }
    }
}

/// Classifies one (user, date) pair. First match wins:
/// weekend, global holiday, personal holiday, time off, available.
#[derive(Debug)]
pub struct DayStatusResolver<'a, F: ?Sized> {
    facts: &'a F,
    work_week: &'a WorkWeek,
}

impl<F: ?Sized> Clone for DayStatusResolver<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for DayStatusResolver<'_, F> {}

impl<'a, F> DayStatusResolver<'a, F>
where
    F: CalendarFacts + ?Sized,
{
    pub fn new(facts: &'a F, work_week: &'a WorkWeek) -> Self {
        Self { facts, work_week }
    }

    pub fn facts(&self) -> &'a F {
        self.facts
    }

    pub fn work_week(&self) -> &'a WorkWeek {
        self.work_week
    }

    pub fn resolve(&self, user: &User, date: NaiveDate) -> DayStatus<'a> {
        let status = self.classify(user, date);
        tracing::trace!(user = user.id, %date, status = %status.kind, "resolved day status");
        status
    }

    fn classify(&self, user: &User, date: NaiveDate) -> DayStatus<'a> {
        let facts: &'a F = self.facts;
        if self.work_week.is_weekend(date) {
            return DayStatus::plain(DayStatusKind::Weekend, "Weekend");
        }

        if let Some(holiday) = facts.global_holiday(date) {
            return DayStatus {
                kind: DayStatusKind::GlobalHoliday,
                reason: format!("Global Holiday: {}", holiday.name),
                details: holiday
                    .description
                    .clone()
                    .unwrap_or_else(|| holiday.name.clone()),
                record: Some(MatchedRecord::GlobalHoliday(holiday)),
            };
        }

        if let Some(holiday) = facts.personal_holiday(user.id, date) {
            return DayStatus {
                kind: DayStatusKind::Holiday,
                reason: format!("Personal Holiday: {}", holiday.name),
                details: holiday.name.clone(),
                record: Some(MatchedRecord::Holiday(holiday)),
            };
        }

        if let Some(time_off) = facts.time_off(user.id, date) {
            return DayStatus {
                kind: DayStatusKind::TimeOff,
                reason: format!("Time Off: {}", time_off.leave_type),
                details: time_off
                    .reason
                    .clone()
                    .unwrap_or_else(|| time_off.leave_type.clone()),
                record: Some(MatchedRecord::TimeOff(time_off)),
            };
        }

        DayStatus::plain(DayStatusKind::Available, "Available")
    }
}
