//! Data models for Sproutbook entities.
//!
//! This module contains all the data structures used to represent
//! the tracked child's data:
//!
//! - `Child`: the tracked child with birth details and record counts
//! - `GrowthRecord`: weight/height/head circumference measurements
//! - `Milestone`: dated achievements with free-form tags
//! - `MediaItem`: photo listings, grouped chronologically by age

pub mod child;
pub mod growth;
pub mod media;
pub mod milestone;

pub use child::{Child, ChildDraft, Gender, RecordCounts};
pub use growth::{GrowthRecord, NewGrowthRecord};
pub use media::{group_by_age, AgeBucket, MediaItem, PhotoGroup};
pub use milestone::{Milestone, NewMilestone};
