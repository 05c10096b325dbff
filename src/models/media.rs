//! Photo listings, grouped chronologically by the child's age.
//!
//! The album view shows photos bucketed by how old the child was when the
//! photo was taken, which is why the photos fetch carries the birth date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One uploaded photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub baby_id: String,
    pub url: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Age ranges the album groups photos into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeBucket {
    Newborn,
    OneToThreeMonths,
    ThreeToSixMonths,
    SixToTwelveMonths,
    OneToTwoYears,
    TwoYearsPlus,
}

impl AgeBucket {
    /// Bucket for a photo taken at `taken`, given the child's birth date.
    /// Photos dated before birth land in the newborn bucket.
    pub fn for_dates(birth: DateTime<Utc>, taken: DateTime<Utc>) -> Self {
        let days = (taken - birth).num_days().max(0);
        match days {
            0..=30 => AgeBucket::Newborn,
            31..=90 => AgeBucket::OneToThreeMonths,
            91..=180 => AgeBucket::ThreeToSixMonths,
            181..=364 => AgeBucket::SixToTwelveMonths,
            365..=729 => AgeBucket::OneToTwoYears,
            _ => AgeBucket::TwoYearsPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Newborn => "Newborn",
            AgeBucket::OneToThreeMonths => "1-3 months",
            AgeBucket::ThreeToSixMonths => "3-6 months",
            AgeBucket::SixToTwelveMonths => "6-12 months",
            AgeBucket::OneToTwoYears => "1-2 years",
            AgeBucket::TwoYearsPlus => "2 years +",
        }
    }
}

/// A run of photos from the same age range, newest first.
#[derive(Debug, Clone)]
pub struct PhotoGroup {
    pub bucket: AgeBucket,
    pub items: Vec<MediaItem>,
}

/// Sort photos newest-first and group them into age buckets.
///
/// The bucket is monotone in the photo date, so one bucket never appears
/// twice in the result.
pub fn group_by_age(mut items: Vec<MediaItem>, birth: DateTime<Utc>) -> Vec<PhotoGroup> {
    items.sort_by(|a, b| b.date.cmp(&a.date));

    let mut groups: Vec<PhotoGroup> = Vec::new();
    for item in items {
        let bucket = AgeBucket::for_dates(birth, item.date);
        match groups.last_mut() {
            Some(group) if group.bucket == bucket => group.items.push(item),
            _ => groups.push(PhotoGroup {
                bucket,
                items: vec![item],
            }),
        }
    }
    groups
}
