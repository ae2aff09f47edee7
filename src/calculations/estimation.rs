use super::round_to;
use crate::config::EngineConfig;
use crate::people::{User, UserId};
use crate::project::{EpicId, Project};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub story_points: u32,
    pub story_hours: f64,
    pub pr_review_hours: f64,
    pub product_testing_hours: f64,
    pub business_testing_hours: f64,
    pub total_hours: f64,
    pub estimated_days: u32,
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicEstimate {
    pub epic_id: EpicId,
    pub name: String,
    pub points: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEstimate {
    pub user_id: UserId,
    pub name: String,
    pub story_points: u32,
    pub story_hours: f64,
    pub subtask_hours: f64,
    pub total_hours: f64,
}

/// Rolls a project's stories and subtasks up into effort, with the project's
/// overhead percentages applied on top of story hours.
pub struct EstimationCalculator<'a> {
    project: &'a Project,
    config: &'a EngineConfig,
}

impl<'a> EstimationCalculator<'a> {
    pub fn new(project: &'a Project, config: &'a EngineConfig) -> Self {
        Self { project, config }
    }

    pub fn total_story_points(&self) -> u32 {
        self.project.stories().filter_map(|story| story.points).sum()
    }

    pub fn total_story_hours(&self) -> f64 {
        self.total_story_points() as f64 * self.project.points_to_hours_conversion
    }

    pub fn pr_review_hours(&self) -> f64 {
        self.total_story_hours() * self.project.pr_review_time_percentage
    }

    pub fn product_testing_hours(&self) -> f64 {
        self.total_story_hours() * self.project.product_testing_time_percentage
    }

    pub fn business_testing_hours(&self) -> f64 {
        self.total_story_hours() * self.project.business_testing_time_percentage
    }

    pub fn total_hours(&self) -> f64 {
        self.total_story_hours()
            + self.pr_review_hours()
            + self.product_testing_hours()
            + self.business_testing_hours()
    }

    pub fn estimated_days(&self) -> u32 {
        (self.total_hours() / self.config.hours_per_day).ceil() as u32
    }

    pub fn estimated_weeks(&self) -> u32 {
        (self.estimated_days() as f64 / self.config.days_per_week).ceil() as u32
    }

    pub fn breakdown(&self) -> EstimateBreakdown {
        let breakdown = EstimateBreakdown {
            story_points: self.total_story_points(),
            story_hours: round_to(self.total_story_hours(), 2),
            pr_review_hours: round_to(self.pr_review_hours(), 2),
            product_testing_hours: round_to(self.product_testing_hours(), 2),
            business_testing_hours: round_to(self.business_testing_hours(), 2),
            total_hours: round_to(self.total_hours(), 2),
            estimated_days: self.estimated_days(),
            estimated_weeks: self.estimated_weeks(),
        };
        tracing::debug!(
            project = self.project.id,
            points = breakdown.story_points,
            total_hours = breakdown.total_hours,
            "computed estimate"
        );
        breakdown
    }

    /// Story hours per epic. Overheads are a project-level multiplier and are
    /// not spread over epics.
    pub fn by_epic(&self) -> Vec<EpicEstimate> {
        self.project
            .epics
            .iter()
            .map(|epic| {
                let points = epic.story_points();
                EpicEstimate {
                    epic_id: epic.id,
                    name: epic.name.clone(),
                    points,
                    hours: round_to(points as f64 * self.project.points_to_hours_conversion, 2),
                }
            })
            .collect()
    }

    /// Assigned effort per member. Subtask hours are taken as entered, not
    /// derived from points.
    pub fn by_team_member(&self, members: &[&User]) -> Vec<MemberEstimate> {
        members
            .iter()
            .map(|user| {
                let story_points = self.project.assigned_story_points(user.id);
                let story_hours = story_points as f64 * self.project.points_to_hours_conversion;
                let subtask_hours = self.project.assigned_subtask_hours(user.id);
                MemberEstimate {
                    user_id: user.id,
                    name: user.name.clone(),
                    story_points,
                    story_hours: round_to(story_hours, 2),
                    subtask_hours: round_to(subtask_hours, 2),
                    total_hours: round_to(story_hours + subtask_hours, 2),
                }
            })
            .collect()
    }
}
