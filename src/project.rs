use crate::config::DEFAULT_POINTS_TO_HOURS;
use crate::error::{EngineError, EngineResult};
use crate::people::{TeamId, UserId};
use crate::scope::{Assumption, Risk, ScopeItem, ScopeItemId, ScopeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProjectId = i32;
pub type EpicId = i32;
pub type StoryId = i32;
pub type SubtaskId = i32;

pub const DEFAULT_PR_REVIEW_PERCENTAGE: f64 = 0.15;
pub const DEFAULT_PRODUCT_TESTING_PERCENTAGE: f64 = 0.20;
pub const DEFAULT_BUSINESS_TESTING_PERCENTAGE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "UI")]
    Ui,
    Backend,
    Infra,
    Test,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Ui => "UI",
            TaskType::Backend => "Backend",
            TaskType::Infra => "Infra",
            TaskType::Test => "Test",
        }
    }
}

/// Something an assignee can be suggested for.
pub trait Assignable {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn task_type(&self) -> Option<TaskType>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
}

impl Subtask {
    pub fn new(id: SubtaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            estimated_hours: None,
            assigned_user_id: None,
            task_type: None,
        }
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn assigned_to(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    pub fn of_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Story {
    pub fn new(id: StoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            points: None,
            assigned_user_id: None,
            task_type: None,
            subtasks: Vec::new(),
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn assigned_to(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    pub fn of_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    pub fn with_subtask(mut self, subtask: Subtask) -> Self {
        self.subtasks.push(subtask);
        self
    }
}

impl Assignable for Story {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn task_type(&self) -> Option<TaskType> {
        self.task_type
    }
}

impl Assignable for Subtask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn task_type(&self) -> Option<TaskType> {
        self.task_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    pub id: EpicId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub stories: Vec<Story>,
}

impl Epic {
    pub fn new(id: EpicId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            position: 0,
            stories: Vec::new(),
        }
    }

    pub fn with_story(mut self, story: Story) -> Self {
        self.stories.push(story);
        self
    }

    /// Sum of story points, missing points counting as zero.
    pub fn story_points(&self) -> u32 {
        self.stories.iter().filter_map(|story| story.points).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPhase {
    #[default]
    Scoping,
    Estimation,
}

fn default_pr_review() -> f64 {
    DEFAULT_PR_REVIEW_PERCENTAGE
}

fn default_product_testing() -> f64 {
    DEFAULT_PRODUCT_TESTING_PERCENTAGE
}

fn default_business_testing() -> f64 {
    DEFAULT_BUSINESS_TESTING_PERCENTAGE
}

fn default_points_to_hours() -> f64 {
    DEFAULT_POINTS_TO_HOURS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default = "default_pr_review")]
    pub pr_review_time_percentage: f64,
    #[serde(default = "default_product_testing")]
    pub product_testing_time_percentage: f64,
    #[serde(default = "default_business_testing")]
    pub business_testing_time_percentage: f64,
    /// Hours per story point.
    #[serde(default = "default_points_to_hours")]
    pub points_to_hours_conversion: f64,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
    #[serde(default)]
    pub team_ids: Vec<TeamId>,
    #[serde(default)]
    pub epics: Vec<Epic>,
    #[serde(default)]
    pub scope_items: Vec<ScopeItem>,
    #[serde(default)]
    pub assumptions: Vec<Assumption>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub phase: ProjectPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoping_completed_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pr_review_time_percentage: DEFAULT_PR_REVIEW_PERCENTAGE,
            product_testing_time_percentage: DEFAULT_PRODUCT_TESTING_PERCENTAGE,
            business_testing_time_percentage: DEFAULT_BUSINESS_TESTING_PERCENTAGE,
            points_to_hours_conversion: DEFAULT_POINTS_TO_HOURS,
            member_ids: Vec::new(),
            team_ids: Vec::new(),
            epics: Vec::new(),
            scope_items: Vec::new(),
            assumptions: Vec::new(),
            risks: Vec::new(),
            phase: ProjectPhase::Scoping,
            scoping_completed_at: None,
        }
    }

    pub fn with_members<I>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        self.member_ids.extend(members);
        self
    }

    pub fn with_epic(mut self, epic: Epic) -> Self {
        self.epics.push(epic);
        self
    }

    pub fn with_scope_item(mut self, item: ScopeItem) -> Self {
        self.scope_items.push(item);
        self
    }

    pub fn with_assumption(mut self, assumption: Assumption) -> Self {
        self.assumptions.push(assumption);
        self
    }

    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.epics.iter().flat_map(|epic| epic.stories.iter())
    }

    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.stories().flat_map(|story| story.subtasks.iter())
    }

    pub fn find_story(&self, id: StoryId) -> Option<&Story> {
        self.stories().find(|story| story.id == id)
    }

    pub fn find_subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks().find(|subtask| subtask.id == id)
    }

    pub fn assigned_story_points(&self, user: UserId) -> u32 {
        self.stories()
            .filter(|story| story.assigned_user_id == Some(user))
            .filter_map(|story| story.points)
            .sum()
    }

    pub fn assigned_subtask_hours(&self, user: UserId) -> f64 {
        self.subtasks()
            .filter(|subtask| subtask.assigned_user_id == Some(user))
            .filter_map(|subtask| subtask.estimated_hours)
            .sum()
    }

    /// Story hours (points converted at the project rate) plus subtask hours as entered.
    pub fn assigned_hours(&self, user: UserId) -> f64 {
        self.assigned_story_points(user) as f64 * self.points_to_hours_conversion
            + self.assigned_subtask_hours(user)
    }

    /// Scoping may close once something is approved and nothing is left open.
    pub fn can_advance_to_estimation(&self) -> bool {
        self.scope_items.iter().any(ScopeItem::is_approved)
            && !self.assumptions.iter().any(Assumption::is_open)
    }

    pub fn advance_to_estimation(&mut self, at: DateTime<Utc>) -> EngineResult<()> {
        if !self.can_advance_to_estimation() {
            return Err(EngineError::ScopingIncomplete);
        }
        self.phase = ProjectPhase::Estimation;
        self.scoping_completed_at = Some(at);
        tracing::info!(project = self.id, "scoping completed");
        Ok(())
    }

    pub fn reopen_scoping(&mut self) {
        self.phase = ProjectPhase::Scoping;
        self.scoping_completed_at = None;
    }

    /// Turn an approved scope item into a new epic.
    ///
    /// Preconditions are checked before anything is touched, so a failed
    /// conversion leaves the project unchanged. On success the new epic is
    /// appended and the item is marked converted, pointing at it.
    pub fn convert_scope_item(&mut self, scope_item_id: ScopeItemId) -> EngineResult<EpicId> {
        let item = self
            .scope_items
            .iter()
            .find(|item| item.id == scope_item_id)
            .ok_or(EngineError::UnknownScopeItem(scope_item_id))?;
        if item.status != ScopeStatus::Approved {
            return Err(EngineError::ScopeItemNotApproved {
                id: item.id,
                status: item.status,
            });
        }
        if item.is_converted() {
            return Err(EngineError::ScopeItemAlreadyConverted(item.id));
        }

        let epic_id = self.epics.iter().map(|epic| epic.id).max().unwrap_or(0) + 1;
        let position = self.epics.iter().map(|epic| epic.position).max().unwrap_or(0) + 1;
        let epic = Epic {
            id: epic_id,
            name: item.name.clone(),
            description: Some(converted_epic_description(item)),
            position,
            stories: Vec::new(),
        };

        self.epics.push(epic);
        if let Some(item) = self
            .scope_items
            .iter_mut()
            .find(|item| item.id == scope_item_id)
        {
            item.status = ScopeStatus::Converted;
            item.converted_to_epic_id = Some(epic_id);
        }
        tracing::info!(
            project = self.id,
            scope_item = scope_item_id,
            epic = epic_id,
            "converted scope item to epic"
        );
        Ok(epic_id)
    }
}

fn converted_epic_description(item: &ScopeItem) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        parts.push(description.to_string());
    }
    parts.push("\n\n---\nConverted from scope item".to_string());
    if let Some(size) = item.tshirt_size {
        parts.push(format!("T-shirt size: {size}"));
    }
    if let Some(category) = item.category {
        parts.push(format!("Category: {}", category.as_str()));
    }
    if let Some(priority) = item.priority {
        parts.push(format!("Priority: {}", priority.as_str()));
    }
    parts.join("\n")
}
