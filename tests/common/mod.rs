#![allow(dead_code)]

use capacity_engine::absence::{AbsenceIndex, GlobalHoliday};
use capacity_engine::people::User;
use chrono::NaiveDate;

pub fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday 2025-03-03.
pub fn monday() -> NaiveDate {
    d(2025, 3, 3)
}

/// Friday 2025-03-07.
pub fn friday() -> NaiveDate {
    d(2025, 3, 7)
}

pub fn index<'a>(users: &'a [User], globals: &'a [GlobalHoliday]) -> AbsenceIndex<'a> {
    AbsenceIndex::build(users, globals)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
