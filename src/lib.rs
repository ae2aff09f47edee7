pub mod absence;
pub mod calculations;
pub mod calendar;
pub mod config;
pub mod error;
pub mod people;
pub mod persistence;
pub mod project;
pub mod report;
pub mod scope;
pub mod snapshot;
pub mod validation;

pub use absence::{AbsenceIndex, CalendarFacts, GlobalHoliday, Holiday, TimeOff};
pub use calculations::assignment::{AssignmentSuggester, Skill, Suggestion};
pub use calculations::availability::AvailabilityCalculator;
pub use calculations::capacity::{CapacityBreakdown, CapacityCalculator};
pub use calculations::day_status::{DayStatus, DayStatusKind, DayStatusResolver};
pub use calculations::estimation::EstimationCalculator;
pub use calculations::scoping::ScopingCalculator;
pub use calculations::team_calendar::TeamCalendar;
pub use calendar::{DateRange, WorkWeek};
pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, EngineResult};
pub use people::{Team, User};
pub use project::{Epic, Project, Story, Subtask};
pub use report::CapacityReport;
pub use snapshot::PlanningSnapshot;
