//! # hjrs-client
//!
//! A Rust client for the HEC Journal Recognition System catalog API.
//!
//! Provides:
//! - **Library**: async API client for journal lookup, filtered search,
//!   reference lists, distribution analysis, and performance prediction
//! - **Screen model**: the advanced-search filter/pagination state machine
//!   ([`session::reduce`]) and an async driver for it ([`SearchScreen`])
//! - **CLI**: `hjrs` binary for terminal use (feature `cli`)
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> hjrs_client::error::Result<()> {
//! use hjrs_client::{CatalogClient, FilterDimension, SearchScreen};
//!
//! let client = CatalogClient::from_env()?;
//! let mut screen = SearchScreen::open(client).await;
//!
//! screen.toggle(FilterDimension::Category, "1");
//! screen.search();
//! screen.settle().await;
//!
//! for journal in &screen.state().result.items {
//!     println!("{}", journal.title().unwrap_or("-"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod parse;
pub mod prediction;
pub mod query;
pub mod reference;
pub mod screen;
pub mod search;
pub mod session;
pub mod types;

// Re-export key types at the crate root.
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::HjrsError;
pub use filters::{FilterDimension, FilterState, ScalarBound};
pub use pagination::{Layout, PageSlot};
pub use query::SearchRequest;
pub use reference::ReferenceCache;
pub use screen::SearchScreen;
pub use session::{reduce, Command, Event, Phase, ScreenError, SearchState, View};
pub use types::*;
