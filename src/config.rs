use crate::calendar::WorkWeek;
use crate::error::ConfigError;
use crate::scope::TshirtSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_WEEKLY_CAPACITY_HOURS: f64 = 40.0;
pub const DEFAULT_POINTS_TO_HOURS: f64 = 8.0;
pub const FIBONACCI_POINTS: [u32; 7] = [1, 2, 3, 5, 8, 13, 21];

/// How overlapping time-off records of the same user are counted by the
/// capacity calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffOverlap {
    /// Clip each record to the period and add up the working days of each,
    /// so a day covered by two records is counted twice.
    #[default]
    Sum,
    /// Union the clipped records first; every working day counts once.
    Merge,
}

/// Denominator used to express a user's workload as a percentage when the
/// user has no weekly capacity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadBasis {
    /// Use `default_weekly_capacity_hours`, keeping every score in percent.
    #[default]
    DefaultCapacity,
    /// Leave the workload as raw assigned hours.
    RawHours,
}

/// Rough hours per t-shirt size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TshirtHours {
    #[serde(rename = "S")]
    pub small: f64,
    #[serde(rename = "M")]
    pub medium: f64,
    #[serde(rename = "L")]
    pub large: f64,
    #[serde(rename = "XL")]
    pub extra_large: f64,
}

impl Default for TshirtHours {
    fn default() -> Self {
        Self {
            small: 8.0,
            medium: 24.0,
            large: 80.0,
            extra_large: 200.0,
        }
    }
}

impl TshirtHours {
    pub fn hours_for(&self, size: TshirtSize) -> f64 {
        match size {
            TshirtSize::S => self.small,
            TshirtSize::M => self.medium,
            TshirtSize::L => self.large,
            TshirtSize::XL => self.extra_large,
        }
    }
}

/// Engine-wide settings consumed (never owned) by the calculators.
///
/// Every field has a default, so an empty TOML document is a valid config:
///
/// ```toml
/// default_weekly_capacity_hours = 40.0
/// time_off_overlap = "merge"
///
/// [work_week]
/// working_days = ["Sun", "Mon", "Tue", "Wed", "Thu"]
///
/// [tshirt_hours]
/// S = 8.0
/// M = 24.0
/// L = 80.0
/// XL = 200.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub work_week: WorkWeek,
    /// Weekly hours assumed for users without a capacity of their own.
    pub default_weekly_capacity_hours: f64,
    /// Divisor turning weekly capacity into hours per working day.
    pub capacity_days_per_week: f64,
    /// Points-to-hours rate used when the caller does not supply one.
    pub default_points_to_hours: f64,
    pub hours_per_day: f64,
    pub days_per_week: f64,
    pub scoping_hours_per_week: f64,
    pub tshirt_hours: TshirtHours,
    pub fibonacci_points: Vec<u32>,
    pub time_off_overlap: TimeOffOverlap,
    pub workload_basis: WorkloadBasis,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_week: WorkWeek::default(),
            default_weekly_capacity_hours: DEFAULT_WEEKLY_CAPACITY_HOURS,
            capacity_days_per_week: 5.0,
            default_points_to_hours: DEFAULT_POINTS_TO_HOURS,
            hours_per_day: 8.0,
            days_per_week: 5.0,
            scoping_hours_per_week: 40.0,
            tshirt_hours: TshirtHours::default(),
            fibonacci_points: FIBONACCI_POINTS.to_vec(),
            time_off_overlap: TimeOffOverlap::default(),
            workload_basis: WorkloadBasis::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (
                "default_weekly_capacity_hours",
                self.default_weekly_capacity_hours,
            ),
            ("capacity_days_per_week", self.capacity_days_per_week),
            ("default_points_to_hours", self.default_points_to_hours),
            ("hours_per_day", self.hours_per_day),
            ("days_per_week", self.days_per_week),
            ("scoping_hours_per_week", self.scoping_hours_per_week),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.fibonacci_points.is_empty() {
            return Err(ConfigError::EmptyPointScale);
        }
        Ok(())
    }

    pub fn is_valid_points(&self, points: u32) -> bool {
        self.fibonacci_points.contains(&points)
    }
}
