//! In-memory store for fetched data.
//!
//! This module provides the `DataStore` the view layer reads and the data
//! source adapters populate. Data is considered stale after 60 minutes.
//!
//! Stored data types:
//! - Growth records
//! - Milestones
//! - Photo groups (bucketed by age)

pub mod store;

pub use store::{CachedData, DataStore, StoreAges};
