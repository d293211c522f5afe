//! Async paginated list controller
//!
//! Wraps [`ListState`] behind a shared lock and drives a
//! [`CollectionSource`]. The lock is never held across the fetch, so
//! `rebind`, filter changes and snapshots stay responsive while a page is
//! in flight; a completion that arrives after a rebind carries an old
//! generation and is dropped by the state machine.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::filter::CategoryFilter;
use crate::kind::{ActivationPolicy, EntityKind};
use crate::links::LinkResolver;
use crate::model::Item;
use crate::source::CollectionSource;
use crate::state::{Completion, ListState, PageTicket};
use crate::view::ListView;

/// What the shell should do for an activated item
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Open the in-app detail view for this item
    ShowDetail(Item),
    /// Open this URL outside the app
    OpenExternal(String),
}

/// Cloneable handle to one list's state and its source
pub struct ListController<S: ?Sized> {
    source: Arc<S>,
    state: Arc<RwLock<ListState>>,
}

impl<S: ?Sized> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> ListController<S>
where
    S: CollectionSource + ?Sized,
{
    /// Create a controller bound to `(subject, kind)` without fetching
    pub fn new(source: Arc<S>, subject: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(ListState::new(subject, kind))),
        }
    }

    /// Create a controller and load the first page
    pub async fn initialize(source: Arc<S>, subject: impl Into<String>, kind: EntityKind) -> Self {
        let controller = Self::new(source, subject, kind);
        controller.load_page(1).await;
        controller
    }

    /// Discard everything and start over for a new binding.
    ///
    /// Any fetch still in flight for the previous binding is invalidated
    /// before the first page of the new one is requested.
    #[instrument(skip_all, fields(subject = tracing::field::Empty, kind = %kind))]
    pub async fn rebind(&self, subject: impl Into<String>, kind: EntityKind) -> Option<Completion> {
        let subject = subject.into();
        tracing::Span::current().record("subject", subject.as_str());
        let ticket = {
            let mut state = self.state.write().await;
            state.reset(subject, kind);
            state.begin(1)
        }?;
        Some(self.run(ticket).await)
    }

    /// Fetch page `page`. Returns `None` when another fetch is in flight.
    pub async fn load_page(&self, page: u32) -> Option<Completion> {
        let ticket = self.state.write().await.begin(page)?;
        Some(self.run(ticket).await)
    }

    /// Fetch the next page. No-op while loading or once exhausted.
    pub async fn load_more(&self) -> Option<Completion> {
        let ticket = self.state.write().await.begin_next()?;
        Some(self.run(ticket).await)
    }

    /// Re-request the page whose last fetch failed
    pub async fn retry(&self) -> Option<Completion> {
        let ticket = self.state.write().await.begin_retry()?;
        Some(self.run(ticket).await)
    }

    async fn run(&self, ticket: PageTicket) -> Completion {
        debug!(subject = %ticket.subject, kind = %ticket.kind, page = ticket.page, "Fetching page");
        let result = self
            .source
            .fetch_page(ticket.kind, &ticket.subject, ticket.page)
            .await;
        let completion = self.state.write().await.finish(&ticket, result);
        debug!(page = ticket.page, ?completion, "Page settled");
        completion
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.set_query(query);
    }

    pub async fn set_category(&self, category: impl Into<CategoryFilter>) {
        self.state.write().await.set_category(category.into());
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.dismiss_error();
    }

    /// Snapshot for rendering
    pub async fn view(&self) -> ListView {
        ListView::from(&*self.state.read().await)
    }

    pub async fn binding(&self) -> (String, EntityKind) {
        let state = self.state.read().await;
        (state.subject().to_string(), state.kind())
    }

    /// Resolve what activating the visible item with `key` should do.
    ///
    /// Returns `None` when no visible item has that key or an external link
    /// cannot be resolved.
    pub async fn activate(&self, key: &str, resolver: &dyn LinkResolver) -> Option<Activation> {
        let state = self.state.read().await;
        let item = state.visible().into_iter().find(|item| item.key() == key)?;
        match state.kind().activation() {
            ActivationPolicy::Detail => Some(Activation::ShowDetail(item.clone())),
            ActivationPolicy::External => resolver.resolve(item).map(Activation::OpenExternal),
        }
    }
}
