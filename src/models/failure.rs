use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a recorded failure in the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    /// Unique identifier
    pub id: u32,

    /// Human-readable title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Ordered tag list, duplicates disallowed
    pub tags: Vec<String>,

    /// Current status
    pub status: FailureStatus,

    /// Priority level
    pub priority: Priority,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Who reported the failure
    pub author: Author,

    /// What should have happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_behavior: Option<String>,

    /// What actually happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_behavior: Option<String>,

    /// Captured stack trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    /// Deployment environment where the failure was observed
    pub context: DeploymentContext,

    /// Attached files (name + size label)
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Number of associated solutions
    pub solution_count: u32,
}

impl Failure {
    /// Check if the failure is still open for work
    pub fn is_open(&self) -> bool {
        matches!(self.status, FailureStatus::Open | FailureStatus::InAnalysis)
    }

    /// Check if the failure has been dealt with
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, FailureStatus::Resolved | FailureStatus::Closed)
    }

    /// Check if the failure is critical
    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }

    /// Case-insensitive free-text match against title, description, or any tag
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Case-insensitive substring match of a requested tag against record tags
    pub fn has_tag_matching(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
pub enum FailureStatus {
    Open,
    #[serde(rename = "In Analysis")]
    #[strum(serialize = "In Analysis")]
    InAnalysis,
    Resolved,
    Closed,
}

impl FailureStatus {
    /// UI label, also the key for lexicographic status sorting
    pub fn label(&self) -> &'static str {
        match self {
            FailureStatus::Open => "Open",
            FailureStatus::InAnalysis => "In Analysis",
            FailureStatus::Resolved => "Resolved",
            FailureStatus::Closed => "Closed",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank (higher is more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display,
)]
pub enum DeploymentContext {
    Development,
    Testing,
    Staging,
    Production,
}

/// Record author reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Attached file metadata (size is a display label, e.g. "245 KB")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub size: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_failure() -> Failure {
        Failure {
            id: 1,
            title: "Login Authentication Error".to_string(),
            description: "JWT token validation fails intermittently".to_string(),
            tags: vec!["React".to_string(), "Authentication".to_string()],
            status: FailureStatus::Open,
            priority: Priority::High,
            created_at: Utc::now(),
            author: Author {
                name: "João Silva".to_string(),
                role: "Senior Developer".to_string(),
                avatar: None,
            },
            expected_behavior: None,
            observed_behavior: None,
            stack_trace: None,
            context: DeploymentContext::Production,
            attachments: Vec::new(),
            solution_count: 3,
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(FailureStatus::InAnalysis.label(), "In Analysis");
        assert_eq!(FailureStatus::Open.label(), "Open");
        assert_eq!(
            FailureStatus::from_str("In Analysis").unwrap(),
            FailureStatus::InAnalysis
        );
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&FailureStatus::InAnalysis).unwrap();
        assert_eq!(json, "\"In Analysis\"");
        let back: FailureStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FailureStatus::InAnalysis);
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::Critical.rank() > Priority::High.rank());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_text_matching_is_case_insensitive() {
        let failure = sample_failure();
        assert!(failure.matches_text("LOGIN"));
        assert!(failure.matches_text("jwt"));
        assert!(failure.matches_text("react"));
        assert!(!failure.matches_text("postgres"));
    }

    #[test]
    fn test_tag_matching_is_substring() {
        let failure = sample_failure();
        assert!(failure.has_tag_matching("auth"));
        assert!(failure.has_tag_matching("React"));
        assert!(!failure.has_tag_matching("database"));
    }

    #[test]
    fn test_open_and_resolved_predicates() {
        let mut failure = sample_failure();
        assert!(failure.is_open());
        assert!(!failure.is_resolved());

        failure.status = FailureStatus::Resolved;
        assert!(failure.is_resolved());
        assert!(!failure.is_open());
    }
}
