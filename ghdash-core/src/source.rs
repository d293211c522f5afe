//! Seams to the remote API
//!
//! The controller only knows these traits; `ghdash-github` provides the HTTP
//! implementation and tests provide scripted ones.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::kind::EntityKind;
use crate::model::{Item, User};

/// Paginated remote collection, already adapted per entity kind.
///
/// Pages are 1-based. An empty successful page signals exhaustion; it is not
/// an error.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn fetch_page(&self, kind: EntityKind, subject: &str, page: u32) -> FetchResult<Vec<Item>>;
}

/// Profile lookup used by the top-level search action
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_user(&self, username: &str) -> FetchResult<User>;
}

#[async_trait]
impl<T: CollectionSource + ?Sized> CollectionSource for std::sync::Arc<T> {
    async fn fetch_page(&self, kind: EntityKind, subject: &str, page: u32) -> FetchResult<Vec<Item>> {
        (**self).fetch_page(kind, subject, page).await
    }
}

#[async_trait]
impl<T: ProfileSource + ?Sized> ProfileSource for std::sync::Arc<T> {
    async fn fetch_user(&self, username: &str) -> FetchResult<User> {
        (**self).fetch_user(username).await
    }
}
