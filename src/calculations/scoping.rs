use crate::config::EngineConfig;
use crate::project::Project;
use crate::scope::{ScopeCategory, ScopeItem, TshirtSize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRollup {
    pub size: TshirtSize,
    pub count: usize,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRollup {
    pub category: ScopeCategory,
    pub count: usize,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScopingStatus {
    pub total_scope_items: usize,
    pub approved: usize,
    pub converted: usize,
    pub open_assumptions: usize,
    pub active_risks: usize,
    pub high_risks: usize,
}

/// Rough sizing of a project's approved scope.
pub struct ScopingCalculator<'a> {
    project: &'a Project,
    config: &'a EngineConfig,
}

impl<'a> ScopingCalculator<'a> {
    pub fn new(project: &'a Project, config: &'a EngineConfig) -> Self {
        Self { project, config }
    }

    fn approved(&self) -> impl Iterator<Item = &'a ScopeItem> + use<'a> {
        let project: &'a Project = self.project;
        project.scope_items.iter().filter(|item| item.is_approved())
    }

    /// Unsized items contribute nothing.
    pub fn rough_hours(&self, item: &ScopeItem) -> f64 {
        item.tshirt_size
            .map(|size| self.config.tshirt_hours.hours_for(size))
            .unwrap_or(0.0)
    }

    pub fn total_rough_hours(&self) -> f64 {
        self.approved().map(|item| self.rough_hours(item)).sum()
    }

    /// One row per size, zero rows included.
    pub fn hours_by_size(&self) -> Vec<SizeRollup> {
        TshirtSize::ALL
            .iter()
            .map(|&size| {
                let (count, hours) = self
                    .approved()
                    .filter(|item| item.tshirt_size == Some(size))
                    .fold((0, 0.0), |(count, hours), item| (count + 1, hours + self.rough_hours(item)));
                SizeRollup { size, count, hours }
            })
            .collect()
    }

    /// Categories with at least one approved item.
    pub fn hours_by_category(&self) -> Vec<CategoryRollup> {
        ScopeCategory::ALL
            .iter()
            .filter_map(|&category| {
                let (count, hours) = self
                    .approved()
                    .filter(|item| item.category == Some(category))
                    .fold((0, 0.0), |(count, hours), item| (count + 1, hours + self.rough_hours(item)));
                (count > 0).then_some(CategoryRollup {
                    category,
                    count,
                    hours,
                })
            })
            .collect()
    }

    pub fn rough_weeks(&self, hours_per_week: f64) -> u32 {
        let total = self.total_rough_hours();
        if total <= 0.0 {
            return 0;
        }
        (total / hours_per_week).ceil() as u32
    }

    pub fn rough_weeks_default(&self) -> u32 {
        self.rough_weeks(self.config.scoping_hours_per_week)
    }

    pub fn completion_status(&self) -> ScopingStatus {
        let project = self.project;
        ScopingStatus {
            total_scope_items: project.scope_items.len(),
            approved: self.approved().count(),
            converted: project.scope_items.iter().filter(|item| item.is_converted()).count(),
            open_assumptions: project.assumptions.iter().filter(|a| a.is_open()).count(),
            active_risks: project.risks.iter().filter(|risk| risk.is_active()).count(),
            high_risks: project
                .risks
                .iter()
                .filter(|risk| risk.is_high_priority())
                .count(),
        }
    }

    pub fn ready_to_complete(&self) -> bool {
        self.project.can_advance_to_estimation()
    }
}
