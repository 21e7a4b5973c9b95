use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Author;

/// Star scale every effectiveness value is rendered against
pub const MAX_EFFECTIVENESS: f64 = 5.0;

/// A proposed remedy linked to exactly one failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Unique identifier
    pub id: u32,

    /// Human-readable title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Ordered tag list
    pub tags: Vec<String>,

    /// Continuous 0–5 rating of how well this resolved its failure
    pub effectiveness: f64,

    /// Identifier of the related failure
    pub related_failure_id: u32,

    /// Title of the related failure, denormalized for card rendering
    pub related_failure: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Who contributed the solution
    pub author: Author,

    /// Like count
    pub likes: u32,

    /// How many times the solution was applied
    pub uses: u32,

    /// Optional code snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// External references
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Solution {
    /// Effectiveness clamped to the 0–5 star scale
    pub fn stars(&self) -> f64 {
        self.effectiveness.clamp(0.0, MAX_EFFECTIVENESS)
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

/// External reference attached to a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_solution() -> Solution {
        Solution {
            id: 1,
            title: "JWT Token Refresh Implementation".to_string(),
            description: "Automatic retry logic with proper error handling".to_string(),
            tags: vec!["React".to_string(), "JWT".to_string()],
            effectiveness: 4.8,
            related_failure_id: 1,
            related_failure: "Login Authentication Error".to_string(),
            created_at: Utc::now(),
            author: Author {
                name: "João Silva".to_string(),
                role: "Senior Developer".to_string(),
                avatar: None,
            },
            likes: 24,
            uses: 45,
            code: None,
            references: Vec::new(),
        }
    }

    #[test]
    fn test_stars_clamping() {
        let mut solution = sample_solution();
        assert_eq!(solution.stars(), 4.8);

        solution.effectiveness = 7.2;
        assert_eq!(solution.stars(), 5.0);

        solution.effectiveness = -1.0;
        assert_eq!(solution.stars(), 0.0);
    }

    #[test]
    fn test_text_matching() {
        let solution = sample_solution();
        assert!(solution.matches_text("refresh"));
        assert!(solution.matches_text("jwt"));
        assert!(!solution.matches_text("postgres"));
        // empty query matches everything
        assert!(solution.matches_text(""));
    }

    #[test]
    fn test_tag_matching() {
        let solution = sample_solution();
        assert!(solution.has_tag_matching("react"));
        assert!(!solution.has_tag_matching("backend"));
    }
}
