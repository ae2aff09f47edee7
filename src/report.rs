use crate::absence::CalendarFacts;
use crate::calculations::capacity::{CapacityBreakdown, CapacityCalculator};
use crate::calendar::DateRange;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::people::{User, UserId};
use chrono::{Datelike, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Days from 0001-01-01 to 1970-01-01, for polars' `Date` representation.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReportRow {
    pub user_id: UserId,
    pub name: String,
    pub breakdown: CapacityBreakdown,
}

/// Capacity of several users over one period, one row per user in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub rows: Vec<CapacityReportRow>,
}

impl CapacityReport {
    pub fn build<F>(
        users: &[&User],
        start: NaiveDate,
        end: NaiveDate,
        facts: &F,
        config: &EngineConfig,
    ) -> EngineResult<Self>
    where
        F: CalendarFacts + Sync + ?Sized,
    {
        let range = DateRange::new(start, end)?;
        let rows: Vec<CapacityReportRow> = users
            .par_iter()
            .map(|user| CapacityReportRow {
                user_id: user.id,
                name: user.name.clone(),
                breakdown: CapacityCalculator::for_range(user, range, facts, config).breakdown(),
            })
            .collect();
        tracing::info!(users = rows.len(), %start, %end, "built capacity report");
        Ok(Self {
            period_start: start,
            period_end: end,
            rows,
        })
    }

    pub fn total_available_hours(&self) -> f64 {
        self.rows.iter().map(|row| row.breakdown.available_hours).sum()
    }

    pub fn total_available_days(&self) -> i64 {
        self.rows.iter().map(|row| row.breakdown.available_days).sum()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = &self.rows;
        let mut columns: Vec<Column> = Vec::with_capacity(12);

        let ids: Vec<i32> = rows.iter().map(|row| row.user_id).collect();
        columns.push(Series::new(PlSmallStr::from_static("user_id"), ids).into_column());

        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        columns.push(Series::new(PlSmallStr::from_static("name"), names).into_column());

        let starts: Vec<i32> = rows.iter().map(|row| date_to_i32(row.breakdown.period_start)).collect();
        columns.push(
            Series::new(PlSmallStr::from_static("period_start"), starts)
                .cast(&DataType::Date)?
                .into_column(),
        );
        let ends: Vec<i32> = rows.iter().map(|row| date_to_i32(row.breakdown.period_end)).collect();
        columns.push(
            Series::new(PlSmallStr::from_static("period_end"), ends)
                .cast(&DataType::Date)?
                .into_column(),
        );

        let day_columns: [(&'static str, fn(&CapacityBreakdown) -> i64); 6] = [
            ("working_days", |b| b.working_days),
            ("global_holiday_days", |b| b.global_holiday_days),
            ("user_holiday_days", |b| b.user_holiday_days),
            ("holiday_days", |b| b.holiday_days),
            ("time_off_days", |b| b.time_off_days),
            ("available_days", |b| b.available_days),
        ];
        for (name, field) in day_columns {
            let values: Vec<i64> = rows.iter().map(|row| field(&row.breakdown)).collect();
            columns.push(Series::new(PlSmallStr::from_static(name), values).into_column());
        }

        let weekly: Vec<f64> = rows.iter().map(|row| row.breakdown.weekly_capacity).collect();
        columns.push(Series::new(PlSmallStr::from_static("weekly_capacity"), weekly).into_column());

        let hours: Vec<f64> = rows.iter().map(|row| row.breakdown.available_hours).collect();
        columns.push(Series::new(PlSmallStr::from_static("available_hours"), hours).into_column());

        let points: Vec<f64> = rows
            .iter()
            .map(|row| row.breakdown.available_story_points)
            .collect();
        columns.push(
            Series::new(PlSmallStr::from_static("available_story_points"), points).into_column(),
        );

        DataFrame::new(columns)
    }
}

fn date_to_i32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
