pub mod assignment;
pub mod availability;
pub mod capacity;
pub mod day_status;
pub mod estimation;
pub mod scoping;
pub mod team_calendar;

/// Round half away from zero to `places` decimals, for display records only.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
