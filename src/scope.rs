use serde::{Deserialize, Serialize};
use std::fmt;

pub type ScopeItemId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TshirtSize {
    S,
    M,
    L,
    XL,
}

impl TshirtSize {
    pub const ALL: [TshirtSize; 4] = [TshirtSize::S, TshirtSize::M, TshirtSize::L, TshirtSize::XL];

    pub fn as_str(&self) -> &'static str {
        match self {
            TshirtSize::S => "S",
            TshirtSize::M => "M",
            TshirtSize::L => "L",
            TshirtSize::XL => "XL",
        }
    }
}

impl fmt::Display for TshirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeCategory {
    Feature,
    Integration,
    Infrastructure,
    Security,
    Performance,
}

impl ScopeCategory {
    pub const ALL: [ScopeCategory; 5] = [
        ScopeCategory::Feature,
        ScopeCategory::Integration,
        ScopeCategory::Infrastructure,
        ScopeCategory::Security,
        ScopeCategory::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeCategory::Feature => "feature",
            ScopeCategory::Integration => "integration",
            ScopeCategory::Infrastructure => "infrastructure",
            ScopeCategory::Security => "security",
            ScopeCategory::Performance => "performance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeStatus {
    #[default]
    Draft,
    Approved,
    Converted,
    Rejected,
}

impl ScopeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeStatus::Draft => "draft",
            ScopeStatus::Approved => "approved",
            ScopeStatus::Converted => "converted",
            ScopeStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ScopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-estimation unit of scope, sized by t-shirt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeItem {
    pub id: ScopeItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tshirt_size: Option<TshirtSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ScopeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Level>,
    #[serde(default)]
    pub status: ScopeStatus,
    #[serde(default)]
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_to_epic_id: Option<i32>,
}

impl ScopeItem {
    pub fn new(id: ScopeItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            tshirt_size: None,
            category: None,
            priority: None,
            status: ScopeStatus::Draft,
            position: 0,
            converted_to_epic_id: None,
        }
    }

    pub fn sized(mut self, size: TshirtSize) -> Self {
        self.tshirt_size = Some(size);
        self
    }

    pub fn in_category(mut self, category: ScopeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: ScopeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == ScopeStatus::Approved
    }

    pub fn is_converted(&self) -> bool {
        self.converted_to_epic_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionStatus {
    #[default]
    Open,
    Validated,
    Invalidated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub id: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_item_id: Option<ScopeItemId>,
    #[serde(default)]
    pub status: AssumptionStatus,
}

impl Assumption {
    pub fn new(id: i32, title: impl Into<String>, status: AssumptionStatus) -> Self {
        Self {
            id,
            title: title.into(),
            scope_item_id: None,
            status,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == AssumptionStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    #[default]
    Identified,
    Mitigating,
    Mitigated,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_item_id: Option<ScopeItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Level>,
    #[serde(default)]
    pub status: RiskStatus,
}

impl Risk {
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            scope_item_id: None,
            likelihood: None,
            impact: None,
            status: RiskStatus::Identified,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != RiskStatus::Mitigated
    }

    pub fn is_high_priority(&self) -> bool {
        self.likelihood == Some(Level::High) || self.impact == Some(Level::High)
    }
}
