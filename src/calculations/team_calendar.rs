use super::availability::{AvailabilityCalculator, AvailabilitySummary, DayAvailability};
use super::day_status::{DayStatus, DayStatusKind, DayStatusResolver};
use super::round_to;
use crate::absence::{CalendarFacts, GlobalHoliday};
use crate::calendar::{DateRange, WorkWeek};
use crate::error::EngineResult;
use crate::people::{User, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStatus<'a> {
    pub user_id: UserId,
    pub name: &'a str,
    pub status: DayStatus<'a>,
}

/// Consolidated view of one day across the team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDay<'a> {
    pub date: NaiveDate,
    pub is_weekend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_holiday: Option<&'a GlobalHoliday>,
    pub members_available: Vec<MemberStatus<'a>>,
    pub members_on_holiday: Vec<MemberStatus<'a>>,
    pub members_on_time_off: Vec<MemberStatus<'a>>,
    pub members_on_global_holiday: Vec<MemberStatus<'a>>,
    pub total_members: usize,
    /// Members working that day. Weekend entries sit in `members_available`
    /// but are excluded from both counters.
    pub available_count: usize,
    pub unavailable_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveEntry<'a> {
    pub user_id: UserId,
    pub name: &'a str,
    pub status: DayStatusKind,
    pub reason: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCalendar<'a> {
    pub user_id: UserId,
    pub name: &'a str,
    pub days: BTreeMap<NaiveDate, DayAvailability<'a>>,
    pub summary: AvailabilitySummary,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamSummary {
    pub total_members: usize,
    pub total_working_days: i64,
    pub total_member_days: i64,
    pub available_member_days: i64,
    pub unavailable_member_days: i64,
    /// Percent with one decimal; zero when there are no member days.
    pub availability_percentage: f64,
}

/// Runs the day status resolver for every team member over a range.
pub struct TeamCalendar<'a, F: ?Sized> {
    members: Vec<&'a User>,
    range: DateRange,
    resolver: DayStatusResolver<'a, F>,
}

impl<'a, F> TeamCalendar<'a, F>
where
    F: CalendarFacts + ?Sized,
{
    /// Members are listed by name, as the calendar shows them.
    pub fn new<I>(
        members: I,
        start: NaiveDate,
        end: NaiveDate,
        facts: &'a F,
        work_week: &'a WorkWeek,
    ) -> EngineResult<Self>
    where
        I: IntoIterator<Item = &'a User>,
    {
        let range = DateRange::new(start, end)?;
        let mut members: Vec<&'a User> = members.into_iter().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self {
            members,
            range,
            resolver: DayStatusResolver::new(facts, work_week),
        })
    }

    pub fn members(&self) -> &[&'a User] {
        &self.members
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn consolidated(&self) -> BTreeMap<NaiveDate, TeamDay<'a>> {
        self.range.days().map(|date| (date, self.day(date))).collect()
    }

    pub fn day(&self, date: NaiveDate) -> TeamDay<'a> {
        let mut day = TeamDay {
            date,
            is_weekend: self.resolver.work_week().is_weekend(date),
            global_holiday: self.resolver.facts().global_holiday(date),
            members_available: Vec::new(),
            members_on_holiday: Vec::new(),
            members_on_time_off: Vec::new(),
            members_on_global_holiday: Vec::new(),
            total_members: self.members.len(),
            available_count: 0,
            unavailable_count: 0,
        };

        for user in self.members.iter().copied() {
            let status = self.resolver.resolve(user, date);
            let kind = status.kind;
            let entry = MemberStatus {
                user_id: user.id,
                name: user.name.as_str(),
                status,
            };
            match kind {
                DayStatusKind::Available => {
                    day.members_available.push(entry);
                    day.available_count += 1;
                }
                DayStatusKind::Holiday => {
                    day.members_on_holiday.push(entry);
                    day.unavailable_count += 1;
                }
                DayStatusKind::TimeOff => {
                    day.members_on_time_off.push(entry);
                    day.unavailable_count += 1;
                }
                DayStatusKind::GlobalHoliday => {
                    day.members_on_global_holiday.push(entry);
                    day.unavailable_count += 1;
                }
                DayStatusKind::Weekend => day.members_available.push(entry),
            }
        }
        day
    }

    pub fn individual_calendars(&self) -> Vec<MemberCalendar<'a>> {
        self.members
            .iter()
            .map(|&user| {
                let calculator = AvailabilityCalculator::for_range(user, self.range, self.resolver);
                MemberCalendar {
                    user_id: user.id,
                    name: user.name.as_str(),
                    days: calculator.days(),
                    summary: calculator.summary(),
                }
            })
            .collect()
    }

    /// Members absent on `today`. Empty unless `today` is a working day inside the range.
    pub fn on_leave(&self, today: NaiveDate) -> Vec<LeaveEntry<'a>> {
        if !self.range.contains(today) || self.resolver.work_week().is_weekend(today) {
            return Vec::new();
        }
        self.members
            .iter()
            .filter_map(|&user| {
                let status = self.resolver.resolve(user, today);
                status.kind.is_absence().then(|| LeaveEntry {
                    user_id: user.id,
                    name: user.name.as_str(),
                    status: status.kind,
                    reason: status.reason,
                    details: status.details,
                })
            })
            .collect()
    }

    /// Member-day rollup over working days only.
    pub fn summary(&self) -> TeamSummary {
        let work_week = self.resolver.work_week();
        let total_working_days = work_week.working_days_in(&self.range);
        let total_member_days = total_working_days * self.members.len() as i64;

        let mut available = 0i64;
        let mut unavailable = 0i64;
        for date in self.range.days().filter(|date| work_week.is_working_day(*date)) {
            for user in &self.members {
                if self.resolver.resolve(user, date).kind.is_absence() {
                    unavailable += 1;
                } else {
                    available += 1;
                }
            }
        }

        let availability_percentage = if total_member_days > 0 {
            round_to(available as f64 / total_member_days as f64 * 100.0, 1)
        } else {
            0.0
        };
        tracing::debug!(
            members = self.members.len(),
            total_member_days,
            availability_percentage,
            "computed team summary"
        );

        TeamSummary {
            total_members: self.members.len(),
            total_working_days,
            total_member_days,
            available_member_days: available,
            unavailable_member_days: unavailable,
            availability_percentage,
        }
    }
}
