use super::round_to;
use crate::config::{EngineConfig, WorkloadBasis};
use crate::people::{User, UserId};
use crate::project::{Assignable, Project, TaskType};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Frontend,
    Backend,
    DevOps,
    #[serde(rename = "QA")]
    Qa,
    #[serde(rename = "Full-stack")]
    FullStack,
}

impl Skill {
    /// Keyword groups in match order; the index lines up with [`SKILL_KEYWORDS`].
    const BY_PRIORITY: [Skill; 5] = [
        Skill::Frontend,
        Skill::Backend,
        Skill::DevOps,
        Skill::Qa,
        Skill::FullStack,
    ];

    /// The tag compared against a user's strengths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Frontend => "Frontend",
            Skill::Backend => "Backend",
            Skill::DevOps => "DevOps",
            Skill::Qa => "QA",
            Skill::FullStack => "Full-stack",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskType> for Skill {
    fn from(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Ui => Skill::Frontend,
            TaskType::Backend => Skill::Backend,
            TaskType::Infra => Skill::DevOps,
            TaskType::Test => Skill::Qa,
        }
    }
}

static SKILL_KEYWORDS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"frontend|ui|ux|design|react|vue|angular|css|html",
        r"backend|api|server|database|rails|python|java",
        r"devops|deploy|infrastructure|docker|kubernetes",
        r"test|qa|quality|testing",
        r"full.?stack|fullstack",
    ])
    .expect("valid skill keyword patterns")
});

/// Skill an item calls for: its explicit task type, else the first keyword
/// group found anywhere in the lowercased name and description.
pub fn infer_required_skill<A>(item: &A) -> Option<Skill>
where
    A: Assignable + ?Sized,
{
    if let Some(task_type) = item.task_type() {
        return Some(task_type.into());
    }
    let text = format!("{} {}", item.name(), item.description().unwrap_or_default()).to_lowercase();
    SKILL_KEYWORDS
        .matches(&text)
        .iter()
        .next()
        .map(|index| Skill::BY_PRIORITY[index])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    #[serde(skip)]
    pub user: &'a User,
    pub user_id: UserId,
    pub name: &'a str,
    pub score: f64,
    pub workload: f64,
}

/// Ranks project members for one story or subtask.
pub struct AssignmentSuggester<'a, A: ?Sized> {
    project: &'a Project,
    members: Vec<&'a User>,
    item: &'a A,
    required_skill: Option<Skill>,
    config: &'a EngineConfig,
}

impl<'a, A> AssignmentSuggester<'a, A>
where
    A: Assignable + ?Sized,
{
    pub fn new<I>(project: &'a Project, members: I, item: &'a A, config: &'a EngineConfig) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        let required_skill = infer_required_skill(item);
        tracing::debug!(
            project = project.id,
            item = item.name(),
            skill = required_skill.map(|skill| skill.as_str()),
            "inferred required skill"
        );
        Self {
            project,
            members: members.into_iter().collect(),
            item,
            required_skill,
            config,
        }
    }

    pub fn item(&self) -> &'a A {
        self.item
    }

    pub fn required_skill(&self) -> Option<Skill> {
        self.required_skill
    }

    /// Hours assigned to `user` in this project, as a percentage of their
    /// weekly capacity (two decimals).
    pub fn current_workload(&self, user: &User) -> f64 {
        let hours = self.project.assigned_hours(user.id);
        match (user.positive_capacity(), self.config.workload_basis) {
            (Some(capacity), _) => round_to(hours / capacity * 100.0, 2),
            (None, WorkloadBasis::DefaultCapacity) => {
                round_to(hours / self.config.default_weekly_capacity_hours * 100.0, 2)
            }
            (None, WorkloadBasis::RawHours) => hours,
        }
    }

    pub fn score(&self, user: &User) -> f64 {
        let workload = self.current_workload(user);
        self.score_with_workload(user, workload)
    }

    fn score_with_workload(&self, user: &User, workload: f64) -> f64 {
        let mut score = 0.0;
        match self.required_skill {
            Some(skill) => {
                if user.primary_strength.as_deref() == Some(skill.as_str()) {
                    score += 100.0;
                } else if user.secondary_strength.as_deref() == Some(skill.as_str()) {
                    score += 50.0;
                }
            }
            None => score += 100.0 - workload.min(100.0),
        }
        score -= workload * 0.5;
        if user.positive_capacity().is_some() {
            score += 10.0;
        }
        score
    }

    /// Every member, best first. Equal scores keep member order.
    pub fn suggest(&self) -> Vec<Suggestion<'a>> {
        let mut suggestions: Vec<Suggestion<'a>> = self
            .members
            .iter()
            .copied()
            .map(|user| {
                let workload = self.current_workload(user);
                Suggestion {
                    user,
                    user_id: user.id,
                    name: user.name.as_str(),
                    score: self.score_with_workload(user, workload),
                    workload,
                }
            })
            .collect();
        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions
    }

    pub fn best_match(&self) -> Option<&'a User> {
        self.suggest().first().map(|suggestion| suggestion.user)
    }
}
