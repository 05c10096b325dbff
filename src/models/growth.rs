//! Growth measurement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One dated measurement. Weight is in kilograms, lengths in centimeters.
/// The listing endpoint returns records newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    pub id: String,
    pub baby_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub head_circumference: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for `POST /api/growth-records`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrowthRecord {
    pub baby_id: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
