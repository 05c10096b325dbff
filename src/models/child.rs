//! Domain model for the tracked child.
//!
//! The single-child endpoint embeds related-record counts (`_count`), which
//! the dashboard uses for its photo/milestone tally cards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
}

/// The tracked child, as returned by `GET /api/baby`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub birth_date: DateTime<Utc>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub birth_weight: Option<f64>,
    #[serde(default)]
    pub birth_height: Option<f64>,
    #[serde(default)]
    pub birth_head_circumference: Option<f64>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "_count")]
    pub counts: Option<RecordCounts>,
}

/// Counts of records attached to the child.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCounts {
    pub growth_records: i64,
    pub milestones: i64,
    pub media_items: i64,
}

impl Child {
    /// Age at `on`, formatted for the dashboard header.
    ///
    /// Under a month the age is counted in days, under a year in months and
    /// days, after that in years and months.
    pub fn age_on(&self, on: NaiveDate) -> String {
        let days = (on - self.birth_date.date_naive()).num_days().max(0);
        if days <= 30 {
            format!("{}d", days)
        } else if days < 365 {
            format!("{}m {}d", days / 30, days % 30)
        } else {
            format!("{}y {}m", days / 365, (days % 365) / 30)
        }
    }

    /// Age as of today.
    pub fn age_display(&self) -> String {
        self.age_on(Utc::now().date_naive())
    }
}

/// Fields accepted when creating or updating the child.
///
/// Only the populated fields are sent; the update endpoint leaves the rest
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_head_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_born(date: &str) -> Child {
        Child {
            id: "c1".to_string(),
            name: "Mei".to_string(),
            gender: Gender::Girl,
            birth_date: DateTime::parse_from_rfc3339(&format!("{}T08:30:00Z", date))
                .unwrap()
                .with_timezone(&Utc),
            birth_time: None,
            avatar: None,
            birth_weight: None,
            birth_height: None,
            birth_head_circumference: None,
            blood_type: None,
            allergies: None,
            notes: None,
            counts: None,
        }
    }

    #[test]
    fn test_age_in_days() {
        let child = child_born("2025-06-01");
        let on = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(child.age_on(on), "14d");
    }

    #[test]
    fn test_age_in_months_and_days() {
        let child = child_born("2025-01-01");
        let on = NaiveDate::from_ymd_opt(2025, 4, 16).unwrap();
        // 105 days = 3 months 15 days on the 30-day-month scale
        assert_eq!(child.age_on(on), "3m 15d");
    }

    #[test]
    fn test_age_in_years() {
        let child = child_born("2024-01-01");
        let on = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(child.age_on(on), "1y 2m");
    }

    #[test]
    fn test_age_never_negative() {
        let child = child_born("2025-06-01");
        let on = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(child.age_on(on), "0d");
    }

    #[test]
    fn test_child_deserializes_count_field() {
        let json = r#"{
            "id": "c1",
            "name": "Mei",
            "gender": "girl",
            "birthDate": "2025-06-01T08:30:00Z",
            "_count": {"growthRecords": 4, "milestones": 2, "mediaItems": 9}
        }"#;
        let child: Child = serde_json::from_str(json).unwrap();
        assert_eq!(child.counts.unwrap().media_items, 9);
    }
}
