//! Milestone records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated achievement ("first steps", "first word") with free-form tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Milestone {
    /// Tag line for list cards: up to `max` tags, then a "+n" overflow marker.
    pub fn tag_summary(&self, max: usize) -> String {
        let mut parts: Vec<String> = self
            .tags
            .iter()
            .take(max)
            .map(|t| format!("#{}", t))
            .collect();
        if self.tags.len() > max {
            parts.push(format!("+{}", self.tags.len() - max));
        }
        parts.join(" ")
    }
}

/// Payload for `POST /api/milestones`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub baby_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone_with_tags(tags: &[&str]) -> Milestone {
        Milestone {
            id: "m1".to_string(),
            baby_id: "c1".to_string(),
            title: "First steps".to_string(),
            description: None,
            date: Utc::now(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_tag_summary_under_limit() {
        let m = milestone_with_tags(&["walking", "outdoors"]);
        assert_eq!(m.tag_summary(3), "#walking #outdoors");
    }

    #[test]
    fn test_tag_summary_overflow() {
        let m = milestone_with_tags(&["a", "b", "c", "d", "e"]);
        assert_eq!(m.tag_summary(3), "#a #b #c +2");
    }

    #[test]
    fn test_tag_summary_empty() {
        let m = milestone_with_tags(&[]);
        assert_eq!(m.tag_summary(3), "");
    }
}
