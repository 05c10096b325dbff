//! REST API client module for the Sproutbook server.
//!
//! This module provides the `ApiClient` for communicating with the
//! dashboard's JSON API to fetch the child profile, growth records,
//! milestones, and photo listings.
//!
//! The API itself is unauthenticated; the access-password gate lives in the
//! server's middleware and applies only to page routes.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
