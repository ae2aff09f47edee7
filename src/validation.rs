use crate::config::EngineConfig;
use crate::snapshot::PlanningSnapshot;
use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

const EPSILON: f64 = 1e-6;

/// A snapshot that breaks one of the inbound data contracts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i32 },

    #[error("duplicate global holiday on {0}")]
    DuplicateGlobalHoliday(NaiveDate),

    #[error("user {user} has time off ending {end} before it starts {start}")]
    InvertedTimeOff {
        user: i32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("story {story} has {points} points, expected one of {allowed:?}")]
    InvalidPoints {
        story: i32,
        points: u32,
        allowed: Vec<u32>,
    },

    #[error("subtask {subtask} has invalid estimated_hours {hours} (must be positive)")]
    InvalidSubtaskHours { subtask: i32, hours: f64 },

    #[error("project {project} has invalid {field} {value}")]
    InvalidProjectParameter {
        project: i32,
        field: &'static str,
        value: f64,
    },

    #[error("user {user} has invalid weekly capacity {hours}")]
    InvalidCapacity { user: i32, hours: f64 },
}

fn check_unique<I>(kind: &'static str, ids: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = i32>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

pub fn validate_snapshot(
    snapshot: &PlanningSnapshot,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    check_unique("user", snapshot.users.iter().map(|user| user.id))?;
    check_unique("team", snapshot.teams.iter().map(|team| team.id))?;
    check_unique("project", snapshot.projects.iter().map(|project| project.id))?;

    let mut holiday_dates = HashSet::with_capacity(snapshot.global_holidays.len());
    for holiday in &snapshot.global_holidays {
        if !holiday_dates.insert(holiday.date) {
            return Err(ValidationError::DuplicateGlobalHoliday(holiday.date));
        }
    }

    for user in &snapshot.users {
        if let Some(hours) = user.weekly_capacity_hours {
            if !hours.is_finite() || hours < -EPSILON {
                return Err(ValidationError::InvalidCapacity {
                    user: user.id,
                    hours,
                });
            }
        }
        for time_off in &user.time_offs {
            if time_off.start_date > time_off.end_date {
                return Err(ValidationError::InvertedTimeOff {
                    user: user.id,
                    start: time_off.start_date,
                    end: time_off.end_date,
                });
            }
            if !time_off.has_known_leave_type() {
                tracing::warn!(
                    user = user.id,
                    leave_type = %time_off.leave_type,
                    "time off uses an unknown leave type"
                );
            }
        }
    }

    for project in &snapshot.projects {
        let percentages = [
            ("pr_review_time_percentage", project.pr_review_time_percentage),
            (
                "product_testing_time_percentage",
                project.product_testing_time_percentage,
            ),
            (
                "business_testing_time_percentage",
                project.business_testing_time_percentage,
            ),
        ];
        for (field, value) in percentages {
            if !value.is_finite() || value < -EPSILON {
                return Err(ValidationError::InvalidProjectParameter {
                    project: project.id,
                    field,
                    value,
                });
            }
        }
        let conversion = project.points_to_hours_conversion;
        if !conversion.is_finite() || conversion <= 0.0 {
            return Err(ValidationError::InvalidProjectParameter {
                project: project.id,
                field: "points_to_hours_conversion",
                value: conversion,
            });
        }

        check_unique("epic", project.epics.iter().map(|epic| epic.id))?;
        check_unique("story", project.stories().map(|story| story.id))?;
        check_unique("subtask", project.subtasks().map(|subtask| subtask.id))?;
        check_unique("scope item", project.scope_items.iter().map(|item| item.id))?;

        for story in project.stories() {
            if let Some(points) = story.points {
                if !config.is_valid_points(points) {
                    return Err(ValidationError::InvalidPoints {
                        story: story.id,
                        points,
                        allowed: config.fibonacci_points.clone(),
                    });
                }
            }
        }
        for subtask in project.subtasks() {
            if let Some(hours) = subtask.estimated_hours {
                if !hours.is_finite() || hours <= 0.0 {
                    return Err(ValidationError::InvalidSubtaskHours {
                        subtask: subtask.id,
                        hours,
                    });
                }
            }
        }
    }

    Ok(())
}
