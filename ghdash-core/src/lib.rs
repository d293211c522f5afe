//! ghdash-core - incremental list controller for a public activity API
//!
//! This crate provides:
//! - The record model (events, repositories, gists, profiles)
//! - `EntityKind`, the per-kind dispatch table (endpoint, search predicate,
//!   category classifier, activation policy)
//! - A pure filter engine over loaded items
//! - `ListState`, the fetch/merge/error/exhaustion state machine, and
//!   `ListController`, its async wrapper over a `CollectionSource`
//! - `Dashboard`, the navigation session owning profile, tab and list
//!
//! ## Architecture
//!
//! ```text
//! Shell intents ──▶ ListController ──▶ CollectionSource::fetch_page
//!   (load_more,        │  begin ▲ finish(ticket)         (ghdash-github)
//!    search, filter)   ▼        │
//!                    ListState ── generation check drops stale pages
//!                      │
//!                      ▼
//!                   ListView { items: visible(..), is_loading, has_more, .. }
//! ```

pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod kind;
pub mod links;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

pub use config::DashConfig;
pub use controller::{Activation, ListController};
pub use dashboard::{Dashboard, Screen};
pub use error::{ConfigError, ErrorKind, FetchError, FetchResult};
pub use filter::{visible, CategoryFilter, FilterState, Placeholder, ALL_CATEGORIES};
pub use kind::{ActivationPolicy, EntityKind};
pub use links::{LinkResolver, WebLinks};
pub use model::{Event, Gist, Item, Repo, User};
pub use source::{CollectionSource, ProfileSource};
pub use state::{Completion, ListState, PageTicket};
pub use view::ListView;
