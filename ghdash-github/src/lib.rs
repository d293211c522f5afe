//! HTTP data source for ghdash
//!
//! [`GitHubClient`] implements both [`ghdash_core::CollectionSource`] and
//! [`ghdash_core::ProfileSource`] against the public REST API. Failures
//! are mapped onto [`ghdash_core::FetchError`]:
//!
//! | Response                     | Error         |
//! |------------------------------|---------------|
//! | 404                          | `NotFound`    |
//! | any other 4xx (403, 429, ..) | `RateLimited` |
//! | 5xx, connect, timeout        | `Transport`   |
//! | 2xx with an unexpected body  | `Decode`      |

pub mod client;
mod status;

pub use client::GitHubClient;
