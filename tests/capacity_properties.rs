mod common;

use capacity_engine::absence::{GlobalHoliday, Holiday, TimeOff};
use capacity_engine::calculations::availability::AvailabilityCalculator;
use capacity_engine::calculations::capacity::CapacityCalculator;
use capacity_engine::calculations::day_status::{DayStatusKind, DayStatusResolver};
use capacity_engine::calendar::DateRange;
use capacity_engine::config::{EngineConfig, TimeOffOverlap};
use capacity_engine::people::User;
use chrono::{Duration, NaiveDate};
use common::{d, index};
use proptest::prelude::*;

fn base() -> NaiveDate {
    d(2025, 1, 1)
}

fn at(offset: i64) -> NaiveDate {
    base() + Duration::days(offset)
}

fn user_with(time_offs: &[(i64, i64)], holidays: &[i64]) -> User {
    let mut user = User::new(1, "Ana");
    for &(start, len) in time_offs {
        user = user.with_time_off(TimeOff::new(at(start), at(start + len), "Vacation"));
    }
    for &offset in holidays {
        user = user.with_holiday(Holiday::new(at(offset), "Day off"));
    }
    user
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn merged_time_off_matches_per_day_status(
        start in 0..60i64,
        len in 0..45i64,
        time_offs in proptest::collection::vec((0..120i64, 0..10i64), 0..5),
    ) {
        let users = vec![user_with(&time_offs, &[])];
        let facts = index(&users, &[]);
        let config = EngineConfig { time_off_overlap: TimeOffOverlap::Merge, ..EngineConfig::default() };
        let range = DateRange::new(at(start), at(start + len)).unwrap();

        let capacity = CapacityCalculator::for_range(&users[0], range, &facts, &config);
        let resolver = DayStatusResolver::new(&facts, &config.work_week);
        let available = range
            .days()
            .filter(|date| resolver.resolve(&users[0], *date).kind == DayStatusKind::Available)
            .count() as i64;

        prop_assert_eq!(capacity.available_days(), available);
    }

    #[test]
    fn capacity_identity_holds(
        start in 0..60i64,
        len in 0..45i64,
        time_off in proptest::option::of((0..120i64, 0..10i64)),
        holidays in proptest::collection::vec(0..120i64, 0..6),
        global_offsets in proptest::collection::btree_set(0..120i64, 0..4),
    ) {
        let time_offs: Vec<(i64, i64)> = time_off.into_iter().collect();
        let users = vec![user_with(&time_offs, &holidays)];
        let globals: Vec<GlobalHoliday> = global_offsets
            .iter()
            .map(|offset| GlobalHoliday::new(at(*offset), "Company day"))
            .collect();
        let facts = index(&users, &globals);
        let config = EngineConfig::default();
        let range = DateRange::new(at(start), at(start + len)).unwrap();
        let capacity = CapacityCalculator::for_range(&users[0], range, &facts, &config);

        prop_assert_eq!(
            capacity.available_days(),
            capacity.working_days_count() - capacity.holiday_days_count() - capacity.time_off_days_count()
        );
        prop_assert_eq!(
            capacity.holiday_days_count(),
            capacity.global_holiday_days_count() + capacity.user_holiday_days_count()
        );
        prop_assert!(capacity.working_days_count() <= range.len_days());

        let breakdown = capacity.breakdown();
        prop_assert_eq!(breakdown.total_calendar_days, len + 1);
        prop_assert_eq!(breakdown.available_days, capacity.available_days());
    }

    #[test]
    fn available_hours_grow_with_capacity(
        start in 0..60i64,
        len in 0..45i64,
        low in 0.0..60.0f64,
        extra in 0.0..40.0f64,
    ) {
        let users = vec![
            User::new(1, "Low").with_capacity(low),
            User::new(2, "High").with_capacity(low + extra),
        ];
        let facts = index(&users, &[]);
        let config = EngineConfig::default();
        let range = DateRange::new(at(start), at(start + len)).unwrap();

        let low_hours = CapacityCalculator::for_range(&users[0], range, &facts, &config).available_hours();
        let high_hours = CapacityCalculator::for_range(&users[1], range, &facts, &config).available_hours();
        prop_assert!(low_hours <= high_hours);
    }

    #[test]
    fn extra_time_off_never_adds_hours(
        start in 0..60i64,
        len in 0..45i64,
        time_off in (0..120i64, 0..10i64),
    ) {
        let users = vec![
            User::new(1, "Ana").with_capacity(40.0),
            user_with(&[time_off], &[]),
        ];
        let facts = index(&users, &[]);
        let config = EngineConfig::default();
        let range = DateRange::new(at(start), at(start + len)).unwrap();

        let free = CapacityCalculator::for_range(&users[0], range, &facts, &config).available_hours();
        let away = CapacityCalculator::for_range(&users[1], range, &facts, &config).available_hours();
        prop_assert!(away <= free);
    }

    #[test]
    fn availability_summary_partitions_working_days(
        start in 0..60i64,
        len in 0..45i64,
        time_off in proptest::option::of((0..120i64, 0..10i64)),
        holidays in proptest::collection::vec(0..120i64, 0..6),
    ) {
        let time_offs: Vec<(i64, i64)> = time_off.into_iter().collect();
        let users = vec![user_with(&time_offs, &holidays)];
        let facts = index(&users, &[]);
        let config = EngineConfig::default();
        let summary = AvailabilityCalculator::new(&users[0], at(start), at(start + len), &facts, &config.work_week)
            .unwrap()
            .summary();

        prop_assert_eq!(summary.available_days + summary.unavailable_days, summary.working_days);
        prop_assert_eq!(summary.holiday_days, summary.global_holiday_days + summary.user_holiday_days);
        prop_assert_eq!(summary.total_days, len + 1);
    }
}
