use crate::absence::{AbsenceIndex, GlobalHoliday};
use crate::calendar::DateRange;
use crate::error::{EngineError, EngineResult};
use crate::people::{Team, TeamId, User, UserId};
use crate::project::{Project, ProjectId};
use serde::{Deserialize, Serialize};

/// Read snapshot of everything the engine computes over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub global_holidays: Vec<GlobalHoliday>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl PlanningSnapshot {
    pub fn user(&self, id: UserId) -> EngineResult<&User> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .ok_or(EngineError::UnknownUser(id))
    }

    pub fn team(&self, id: TeamId) -> EngineResult<&Team> {
        self.teams
            .iter()
            .find(|team| team.id == id)
            .ok_or(EngineError::UnknownTeam(id))
    }

    pub fn project(&self, id: ProjectId) -> EngineResult<&Project> {
        self.projects
            .iter()
            .find(|project| project.id == id)
            .ok_or(EngineError::UnknownProject(id))
    }

    pub fn project_mut(&mut self, id: ProjectId) -> EngineResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(EngineError::UnknownProject(id))
    }

    /// Members in the team's declared order; ids without a user are skipped.
    pub fn team_members(&self, team: &Team) -> Vec<&User> {
        self.resolve_users(&team.member_ids)
    }

    pub fn project_members(&self, project: &Project) -> Vec<&User> {
        self.resolve_users(&project.member_ids)
    }

    fn resolve_users(&self, ids: &[UserId]) -> Vec<&User> {
        ids.iter()
            .filter_map(|id| {
                let user = self.users.iter().find(|user| user.id == *id);
                if user.is_none() {
                    tracing::warn!(user = id, "member id has no matching user");
                }
                user
            })
            .collect()
    }

    pub fn absence_index(&self) -> AbsenceIndex<'_> {
        AbsenceIndex::build(&self.users, &self.global_holidays)
    }

    pub fn absence_index_in_range(&self, range: DateRange) -> AbsenceIndex<'_> {
        AbsenceIndex::build_in_range(&self.users, &self.global_holidays, range)
    }
}
