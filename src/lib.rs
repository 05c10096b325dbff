//! Client core for the Sproutbook baby tracker.
//!
//! Sproutbook is a single-user dashboard for logging a child's growth
//! metrics, milestones, and photos. This crate is the client side of that
//! application: domain models, the REST API client, an in-memory store the
//! view layer reads, and the adaptive prefetch scheduler that warms
//! secondary data before the user navigates to the tabs that need it.
//!
//! The usual wiring looks like this:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sproutbook::{ApiClient, ApiSources, DataStore, PreloadSettings, Preloader};
//!
//! # async fn wire() -> anyhow::Result<()> {
//! let api = ApiClient::new("http://localhost:3000")?;
//! let store = Arc::new(DataStore::new());
//! let sources = Arc::new(ApiSources::new(api.clone(), Arc::clone(&store)));
//!
//! let mut preloader = Preloader::new(sources, PreloadSettings::dashboard());
//! preloader.set_child(api.fetch_child().await?);
//! # Ok(())
//! # }
//! ```
//!
//! Once a child is set, the preloader arms a background pass according to
//! its settings; `on_navigate` warms the next likely tab on tab changes.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod prefetch;
pub mod sources;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use cache::{CachedData, DataStore};
pub use config::Config;
pub use prefetch::{
    FeatureArea, IdleSignal, PreloadSettings, Preloader, Priority, TaskOutcome,
};
pub use sources::{ApiSources, DataSources};
