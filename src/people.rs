use crate::absence::{Holiday, TimeOff};
use serde::{Deserialize, Serialize};

pub type UserId = i32;
pub type TeamId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    TeamMember,
    Manager,
    TeamMemberManager,
}

/// A person whose days are classified and whose effort is rolled up.
///
/// Holidays and time off are owned by the user and travel with it in the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Weekly hours this person can work. `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_capacity_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_strength: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub time_offs: Vec<TimeOff>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            weekly_capacity_hours: None,
            primary_strength: None,
            secondary_strength: None,
            role: Role::default(),
            holidays: Vec::new(),
            time_offs: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, weekly_hours: f64) -> Self {
        self.weekly_capacity_hours = Some(weekly_hours);
        self
    }

    pub fn with_strengths(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_strength = Some(primary.into());
        self.secondary_strength = Some(secondary.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_holiday(mut self, holiday: Holiday) -> Self {
        self.holidays.push(holiday);
        self
    }

    pub fn with_time_off(mut self, time_off: TimeOff) -> Self {
        self.time_offs.push(time_off);
        self
    }

    pub fn weekly_capacity_or(&self, default_hours: f64) -> f64 {
        self.weekly_capacity_hours.unwrap_or(default_hours)
    }

    /// Capacity explicitly set and greater than zero.
    pub fn positive_capacity(&self) -> Option<f64> {
        self.weekly_capacity_hours.filter(|hours| *hours > 0.0)
    }

    pub fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager | Role::TeamMemberManager)
    }

    pub fn is_team_member(&self) -> bool {
        matches!(self.role, Role::TeamMember | Role::TeamMemberManager)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            member_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_predicates() {
        let member = User::new(1, "Ana");
        assert!(member.is_team_member());
        assert!(!member.is_manager());

        let manager = User::new(2, "Ben").with_role(Role::Manager);
        assert!(manager.is_manager());
        assert!(!manager.is_team_member());

        let both = User::new(3, "Cy").with_role(Role::TeamMemberManager);
        assert!(both.is_manager());
        assert!(both.is_team_member());
    }
}
