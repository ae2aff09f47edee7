mod common;

use capacity_engine::absence::{GlobalHoliday, Holiday, TimeOff};
use capacity_engine::calculations::day_status::DayStatusKind;
use capacity_engine::calculations::team_calendar::{TeamCalendar, TeamSummary};
use capacity_engine::calendar::WorkWeek;
use capacity_engine::people::User;
use common::{d, index};
use pretty_assertions::assert_eq;

fn team() -> Vec<User> {
    vec![
        User::new(1, "Zoe"),
        User::new(2, "Adam").with_holiday(Holiday::new(d(2025, 3, 4), "Moving day")),
        User::new(3, "Mia").with_time_off(
            TimeOff::new(d(2025, 3, 6), d(2025, 3, 7), "Vacation").with_reason("Ski trip"),
        ),
    ]
}

fn globals() -> Vec<GlobalHoliday> {
    vec![GlobalHoliday::new(d(2025, 3, 5), "Founders Day")]
}

fn names(calendar_members: &[&User]) -> Vec<String> {
    calendar_members.iter().map(|user| user.name.clone()).collect()
}

#[test]
fn members_are_sorted_by_name() {
    let users = team();
    let globals = globals();
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();
    assert_eq!(names(calendar.members()), vec!["Adam", "Mia", "Zoe"]);
}

#[test]
fn consolidated_days_bucket_members() {
    let users = team();
    let globals = globals();
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();
    let days = calendar.consolidated();
    assert_eq!(days.len(), 7);

    let holiday = &days[&d(2025, 3, 5)];
    assert_eq!(holiday.global_holiday.map(|gh| gh.name.as_str()), Some("Founders Day"));
    assert_eq!(holiday.members_on_global_holiday.len(), 3);
    assert_eq!(holiday.unavailable_count, 3);
    assert_eq!(holiday.available_count, 0);

    let tuesday = &days[&d(2025, 3, 4)];
    assert_eq!(tuesday.members_on_holiday.len(), 1);
    assert_eq!(tuesday.members_on_holiday[0].name, "Adam");
    assert_eq!(tuesday.available_count, 2);
    assert_eq!(tuesday.total_members, 3);

    let thursday = &days[&d(2025, 3, 6)];
    assert_eq!(thursday.members_on_time_off.len(), 1);
    assert_eq!(thursday.members_on_time_off[0].status.details, "Ski trip");
}

#[test]
fn weekend_members_sit_in_available_bucket_without_counting() {
    let users = team();
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();
    let saturday = calendar.day(d(2025, 3, 8));

    assert!(saturday.is_weekend);
    assert_eq!(saturday.members_available.len(), 3);
    assert!(saturday
        .members_available
        .iter()
        .all(|member| member.status.kind == DayStatusKind::Weekend));
    assert_eq!(saturday.available_count, 0);
    assert_eq!(saturday.unavailable_count, 0);
}

#[test]
fn on_leave_lists_absent_members() {
    let users = team();
    let globals = globals();
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();

    let on_leave = calendar.on_leave(d(2025, 3, 6));
    assert_eq!(on_leave.len(), 1);
    assert_eq!(on_leave[0].name, "Mia");
    assert_eq!(on_leave[0].status, DayStatusKind::TimeOff);
    assert_eq!(on_leave[0].reason, "Time Off: Vacation");

    let everyone = calendar.on_leave(d(2025, 3, 5));
    assert_eq!(everyone.len(), 3);
    assert!(everyone.iter().all(|entry| entry.status == DayStatusKind::GlobalHoliday));
}

#[test]
fn on_leave_is_empty_outside_range_or_on_weekend() {
    let users = team();
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();

    assert!(calendar.on_leave(d(2025, 3, 8)).is_empty());
    assert!(calendar.on_leave(d(2025, 3, 12)).is_empty());
}

#[test]
fn summary_counts_member_days_on_working_days() {
    let users = team();
    let globals = globals();
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();

    // 15 member days: global holiday 3, Adam 1, Mia 2 unavailable.
    assert_eq!(
        calendar.summary(),
        TeamSummary {
            total_members: 3,
            total_working_days: 5,
            total_member_days: 15,
            available_member_days: 9,
            unavailable_member_days: 6,
            availability_percentage: 60.0,
        }
    );
}

#[test]
fn summary_rounds_to_one_decimal() {
    let users = vec![
        User::new(1, "Ana").with_holiday(Holiday::new(d(2025, 3, 3), "Day off")),
        User::new(2, "Ben"),
        User::new(3, "Cy"),
    ];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 3), &facts, &work_week).unwrap();
    assert_eq!(calendar.summary().availability_percentage, 66.7);
}

#[test]
fn empty_team_has_zero_percentage() {
    let users: Vec<User> = Vec::new();
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();
    let summary = calendar.summary();
    assert_eq!(summary.total_members, 0);
    assert_eq!(summary.total_member_days, 0);
    assert_eq!(summary.availability_percentage, 0.0);
}

#[test]
fn individual_calendars_follow_member_order() {
    let users = team();
    let globals = globals();
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let calendar =
        TeamCalendar::new(&users, d(2025, 3, 3), d(2025, 3, 9), &facts, &work_week).unwrap();
    let calendars = calendar.individual_calendars();

    let order: Vec<&str> = calendars.iter().map(|c| c.name).collect();
    assert_eq!(order, vec!["Adam", "Mia", "Zoe"]);
    assert_eq!(calendars[1].summary.time_off_days, 2);
    assert_eq!(calendars[1].summary.available_days, 2);
    assert_eq!(calendars[0].days.len(), 7);
}
