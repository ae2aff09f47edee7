use super::PersistenceResult;
use crate::config::EngineConfig;
use crate::report::{CapacityReport, CapacityReportRow};
use crate::snapshot::PlanningSnapshot;
use crate::validation::validate_snapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Read a snapshot and check it against the input contract before returning it.
pub fn load_snapshot_from_json<P: AsRef<Path>>(
    path: P,
    config: &EngineConfig,
) -> PersistenceResult<PlanningSnapshot> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let snapshot: PlanningSnapshot = serde_json::from_reader(file)?;
    validate_snapshot(&snapshot, config)?;
    tracing::debug!(
        path = %path.display(),
        users = snapshot.users.len(),
        projects = snapshot.projects.len(),
        "loaded planning snapshot"
    );
    Ok(snapshot)
}

pub fn save_snapshot_to_json<P: AsRef<Path>>(
    snapshot: &PlanningSnapshot,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, snapshot)?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct CapacityCsvRecord {
    user_id: i32,
    name: String,
    period_start: String,
    period_end: String,
    total_calendar_days: i64,
    working_days: i64,
    global_holiday_days: i64,
    user_holiday_days: i64,
    holiday_days: i64,
    time_off_days: i64,
    available_days: i64,
    weekly_capacity: f64,
    available_hours: f64,
    available_story_points: f64,
}

impl From<&CapacityReportRow> for CapacityCsvRecord {
    fn from(row: &CapacityReportRow) -> Self {
        let b = &row.breakdown;
        Self {
            user_id: row.user_id,
            name: row.name.clone(),
            period_start: b.period_start.format("%Y-%m-%d").to_string(),
            period_end: b.period_end.format("%Y-%m-%d").to_string(),
            total_calendar_days: b.total_calendar_days,
            working_days: b.working_days,
            global_holiday_days: b.global_holiday_days,
            user_holiday_days: b.user_holiday_days,
            holiday_days: b.holiday_days,
            time_off_days: b.time_off_days,
            available_days: b.available_days,
            weekly_capacity: b.weekly_capacity,
            available_hours: b.available_hours,
            available_story_points: b.available_story_points,
        }
    }
}

pub fn write_capacity_report_csv<W: Write>(
    report: &CapacityReport,
    writer: W,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in &report.rows {
        writer.serialize(CapacityCsvRecord::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_capacity_report_to_csv<P: AsRef<Path>>(
    report: &CapacityReport,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    write_capacity_report_csv(report, file)
}
