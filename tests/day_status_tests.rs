mod common;

use capacity_engine::absence::{GlobalHoliday, Holiday, TimeOff};
use capacity_engine::calculations::day_status::{DayStatusKind, DayStatusResolver, MatchedRecord};
use capacity_engine::calendar::WorkWeek;
use capacity_engine::people::User;
use chrono::Weekday;
use common::{d, index};

#[test]
fn weekend_beats_global_holiday() {
    let users = vec![User::new(1, "Ana")];
    // 2025-03-08 is a Saturday
    let globals = vec![GlobalHoliday::new(d(2025, 3, 8), "Spring Fair")];
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let resolver = DayStatusResolver::new(&facts, &work_week);

    let status = resolver.resolve(&users[0], d(2025, 3, 8));
    assert_eq!(status.kind, DayStatusKind::Weekend);
    assert_eq!(status.reason, "Weekend");
    assert!(status.record.is_none());
}

#[test]
fn global_holiday_beats_personal_holiday() {
    let users = vec![User::new(1, "Ana").with_holiday(Holiday::new(d(2025, 3, 5), "Birthday"))];
    let globals =
        vec![GlobalHoliday::new(d(2025, 3, 5), "Founders Day").with_description("Office closed")];
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let resolver = DayStatusResolver::new(&facts, &work_week);

    let status = resolver.resolve(&users[0], d(2025, 3, 5));
    assert_eq!(status.kind, DayStatusKind::GlobalHoliday);
    assert_eq!(status.reason, "Global Holiday: Founders Day");
    assert_eq!(status.details, "Office closed");
    assert_eq!(status.record, Some(MatchedRecord::GlobalHoliday(&globals[0])));
}

#[test]
fn global_holiday_details_fall_back_to_name() {
    let users = vec![User::new(1, "Ana")];
    let globals = vec![GlobalHoliday::new(d(2025, 3, 5), "Founders Day")];
    let facts = index(&users, &globals);
    let work_week = WorkWeek::default();
    let status = DayStatusResolver::new(&facts, &work_week).resolve(&users[0], d(2025, 3, 5));
    assert_eq!(status.details, "Founders Day");
}

#[test]
fn personal_holiday_beats_time_off() {
    let users = vec![
        User::new(1, "Ana")
            .with_holiday(Holiday::new(d(2025, 3, 4), "Moving day"))
            .with_time_off(
                TimeOff::new(d(2025, 3, 3), d(2025, 3, 7), "Vacation").with_reason("Lisbon trip"),
            ),
    ];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let resolver = DayStatusResolver::new(&facts, &work_week);

    let holiday = resolver.resolve(&users[0], d(2025, 3, 4));
    assert_eq!(holiday.kind, DayStatusKind::Holiday);
    assert_eq!(holiday.reason, "Personal Holiday: Moving day");
    assert_eq!(holiday.details, "Moving day");

    let time_off = resolver.resolve(&users[0], d(2025, 3, 3));
    assert_eq!(time_off.kind, DayStatusKind::TimeOff);
    assert_eq!(time_off.reason, "Time Off: Vacation");
    assert_eq!(time_off.details, "Lisbon trip");
}

#[test]
fn time_off_details_fall_back_to_leave_type() {
    let users = vec![
        User::new(1, "Ana").with_time_off(TimeOff::new(d(2025, 3, 3), d(2025, 3, 3), "Sick Leave")),
    ];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let status = DayStatusResolver::new(&facts, &work_week).resolve(&users[0], d(2025, 3, 3));
    assert_eq!(status.details, "Sick Leave");
}

#[test]
fn earliest_starting_time_off_is_reported() {
    let users = vec![
        User::new(1, "Ana")
            .with_time_off(TimeOff::new(d(2025, 3, 5), d(2025, 3, 6), "Sick Leave"))
            .with_time_off(TimeOff::new(d(2025, 3, 3), d(2025, 3, 7), "Vacation")),
    ];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let status = DayStatusResolver::new(&facts, &work_week).resolve(&users[0], d(2025, 3, 5));
    assert_eq!(status.reason, "Time Off: Vacation");
    assert_eq!(status.record, Some(MatchedRecord::TimeOff(&users[0].time_offs[1])));
}

#[test]
fn plain_weekday_is_available() {
    let users = vec![User::new(1, "Ana")];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let status = DayStatusResolver::new(&facts, &work_week).resolve(&users[0], d(2025, 3, 4));
    assert_eq!(status.kind, DayStatusKind::Available);
    assert_eq!(status.reason, "Available");
    assert!(!status.kind.is_absence());
}

#[test]
fn custom_work_week_moves_the_weekend() {
    let users = vec![User::new(1, "Ana")];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::custom([
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
    ])
    .unwrap();
    let resolver = DayStatusResolver::new(&facts, &work_week);

    // 2025-03-07 is a Friday, 2025-03-09 a Sunday
    assert_eq!(resolver.resolve(&users[0], d(2025, 3, 7)).kind, DayStatusKind::Weekend);
    assert_eq!(resolver.resolve(&users[0], d(2025, 3, 9)).kind, DayStatusKind::Available);
}

#[test]
fn other_users_records_do_not_leak() {
    let users = vec![
        User::new(1, "Ana").with_holiday(Holiday::new(d(2025, 3, 4), "Moving day")),
        User::new(2, "Ben"),
    ];
    let facts = index(&users, &[]);
    let work_week = WorkWeek::default();
    let status = DayStatusResolver::new(&facts, &work_week).resolve(&users[1], d(2025, 3, 4));
    assert_eq!(status.kind, DayStatusKind::Available);
}
