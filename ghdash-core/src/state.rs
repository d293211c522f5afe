//! Fetch/merge/error/exhaustion state machine for one list
//!
//! `ListState` is synchronous. A fetch is split into [`ListState::begin`],
//! which hands out a [`PageTicket`], and [`ListState::finish`], which applies
//! the outcome only if the ticket still belongs to the current binding.
//! The async wrapper lives in `controller.rs`.

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::filter::{self, CategoryFilter, FilterState, Placeholder};
use crate::kind::EntityKind;
use crate::model::Item;

/// Proof that a fetch was started under a particular binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub subject: String,
    pub kind: EntityKind,
    pub page: u32,
}

/// Result of applying a finished fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Page 1 replaced the list
    Replaced { count: usize },
    /// A later page was appended
    Appended { count: usize },
    /// Empty page: the collection is exhausted
    Exhausted,
    /// Fetch failed; pagination did not advance
    Failed,
    /// The binding changed while the fetch was in flight; nothing applied
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListState {
    subject: String,
    kind: EntityKind,
    generation: u64,
    items: Vec<Item>,
    current_page: u32,
    has_more: bool,
    is_loading: bool,
    last_error: Option<FetchError>,
    failed_page: Option<u32>,
    filter: FilterState,
}

impl ListState {
    pub fn new(subject: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
            generation: 0,
            items: Vec::new(),
            current_page: 1,
            has_more: true,
            is_loading: false,
            last_error: None,
            failed_page: None,
            filter: FilterState::default(),
        }
    }

    /// Bind to a new (subject, kind) pair and discard everything loaded.
    ///
    /// Bumps the generation so any ticket issued before the reset is stale.
    /// Filters survive a subject change on the same kind and are cleared
    /// when the kind changes.
    pub fn reset(&mut self, subject: impl Into<String>, kind: EntityKind) {
        if kind != self.kind {
            self.filter = FilterState::default();
        }
        self.subject = subject.into();
        self.kind = kind;
        self.generation += 1;
        self.items.clear();
        self.current_page = 1;
        self.has_more = true;
        self.is_loading = false;
        self.last_error = None;
        self.failed_page = None;
        debug!(subject = %self.subject, kind = %self.kind, generation = self.generation, "List rebound");
    }

    /// Start fetching `page`. Returns `None` while another fetch is in flight.
    pub fn begin(&mut self, page: u32) -> Option<PageTicket> {
        if self.is_loading {
            debug!(page, "Fetch already in flight, ignoring");
            return None;
        }
        let page = page.max(1);
        self.is_loading = true;
        self.last_error = None;
        Some(PageTicket {
            generation: self.generation,
            subject: self.subject.clone(),
            kind: self.kind,
            page,
        })
    }

    /// Start fetching the page after the last one applied.
    ///
    /// No-op while loading or once the collection is exhausted.
    pub fn begin_next(&mut self) -> Option<PageTicket> {
        if !self.has_more || self.is_loading {
            return None;
        }
        self.begin(self.current_page + 1)
    }

    /// Start re-fetching the page whose last attempt failed, if any
    pub fn begin_retry(&mut self) -> Option<PageTicket> {
        let page = self.failed_page?;
        self.begin(page)
    }

    /// Apply the outcome of a fetch started with `ticket`
    pub fn finish(&mut self, ticket: &PageTicket, result: Result<Vec<Item>, FetchError>) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                page = ticket.page,
                subject = %ticket.subject,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding stale page"
            );
            return Completion::Stale;
        }

        self.is_loading = false;
        match result {
            Ok(page_items) if page_items.is_empty() => {
                self.has_more = false;
                self.failed_page = None;
                debug!(page = ticket.page, "Collection exhausted");
                Completion::Exhausted
            }
            Ok(page_items) => {
                let count = page_items.len();
                self.failed_page = None;
                self.current_page = ticket.page;
                if ticket.page == 1 {
                    self.items = page_items;
                    Completion::Replaced { count }
                } else {
                    self.items.extend(page_items);
                    Completion::Appended { count }
                }
            }
            Err(err) => {
                warn!(page = ticket.page, subject = %ticket.subject, error = %err, "Page fetch failed");
                self.last_error = Some(err);
                self.failed_page = Some(ticket.page);
                Completion::Failed
            }
        }
    }

    /// Hide the inline error without touching pagination
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Everything loaded so far, in server order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn failed_page(&self) -> Option<u32> {
        self.failed_page
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible(&self) -> Vec<&Item> {
        filter::visible(self.kind, &self.items, &self.filter)
    }

    /// Nothing loaded for this binding
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items are loaded but every one is filtered out
    pub fn no_matches(&self) -> bool {
        !self.items.is_empty() && !self.items.iter().any(|item| self.filter.admits(self.kind, item))
    }

    /// Placeholder to show instead of the list, if any.
    ///
    /// Suppressed while loading or while an error is displayed.
    pub fn placeholder(&self) -> Option<Placeholder> {
        if self.is_loading || self.last_error.is_some() {
            return None;
        }
        if self.is_empty() {
            Some(Placeholder::EmptyCollection(self.kind.empty_message().to_string()))
        } else if self.no_matches() {
            Some(Placeholder::NoMatches)
        } else {
            None
        }
    }

    /// Whether a "load more" affordance should be offered
    pub fn can_load_more(&self) -> bool {
        !self.is_loading && self.has_more && !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{event, events};

    #[test]
    fn first_page_replaces_later_pages_append() {
        let mut state = ListState::new("octocat", EntityKind::Activity);

        let ticket = state.begin(1).unwrap();
        assert!(state.is_loading());
        assert_eq!(state.finish(&ticket, Ok(events(0..3))), Completion::Replaced { count: 3 });

        let ticket = state.begin_next().unwrap();
        assert_eq!(ticket.page, 2);
        assert_eq!(state.finish(&ticket, Ok(events(3..5))), Completion::Appended { count: 2 });
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.current_page(), 2);

        let ticket = state.begin(1).unwrap();
        state.finish(&ticket, Ok(events(10..11)));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn begin_is_guarded_while_loading() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let _ticket = state.begin(1).unwrap();
        assert!(state.begin(1).is_none());
        assert!(state.begin_next().is_none());
    }

    #[test]
    fn empty_page_exhausts_without_touching_items() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let ticket = state.begin(1).unwrap();
        state.finish(&ticket, Ok(events(0..2)));

        let ticket = state.begin_next().unwrap();
        assert_eq!(state.finish(&ticket, Ok(vec![])), Completion::Exhausted);
        assert!(!state.has_more());
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.current_page(), 1);
        assert!(state.begin_next().is_none());

        // A later non-empty page never revives has_more
        let ticket = state.begin(2).unwrap();
        state.finish(&ticket, Ok(events(2..3)));
        assert!(!state.has_more());
    }

    #[test]
    fn failure_preserves_pagination_and_retry_clears_error() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let ticket = state.begin(1).unwrap();
        state.finish(&ticket, Ok(events(0..2)));

        let ticket = state.begin_next().unwrap();
        let completion = state.finish(&ticket, Err(FetchError::rate_limited(403, "limit")));
        assert_eq!(completion, Completion::Failed);
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.current_page(), 1);
        assert!(state.has_more());
        assert_eq!(state.failed_page(), Some(2));
        assert!(state.placeholder().is_none());

        let ticket = state.begin_retry().unwrap();
        assert_eq!(ticket.page, 2);
        assert!(state.last_error().is_none());
        state.finish(&ticket, Ok(events(2..4)));
        assert_eq!(state.items().len(), 4);
        assert_eq!(state.failed_page(), None);
    }

    #[test]
    fn stale_ticket_is_discarded_after_reset() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let stale = state.begin(1).unwrap();

        state.reset("hubot", EntityKind::Activity);
        assert!(!state.is_loading());

        let fresh = state.begin(1).unwrap();
        assert_eq!(state.finish(&stale, Ok(events(0..5))), Completion::Stale);
        assert!(state.is_loading());
        assert!(state.items().is_empty());

        state.finish(&fresh, Ok(vec![event("h1", "PushEvent", "hubot", "hubot/x")]));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.subject(), "hubot");
    }

    #[test]
    fn reset_keeps_filters_for_subject_change_only() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        state.set_query("push");
        state.set_category(CategoryFilter::new("PushEvent"));

        state.reset("hubot", EntityKind::Activity);
        assert_eq!(state.filter().query, "push");
        assert_eq!(state.filter().category, CategoryFilter::new("PushEvent"));

        state.reset("hubot", EntityKind::Subscription);
        assert!(state.filter().is_identity());
    }

    #[test]
    fn placeholder_distinguishes_empty_from_no_matches() {
        let mut state = ListState::new("octocat", EntityKind::Activity);
        let ticket = state.begin(1).unwrap();
        assert!(state.placeholder().is_none());
        state.finish(&ticket, Ok(vec![]));
        assert_eq!(
            state.placeholder(),
            Some(Placeholder::EmptyCollection("No items found.".into()))
        );

        let mut state = ListState::new("octocat", EntityKind::Activity);
        let ticket = state.begin(1).unwrap();
        state.finish(&ticket, Ok(events(0..3)));
        state.set_query("zzz-nothing");
        assert!(state.no_matches());
        assert_eq!(state.placeholder(), Some(Placeholder::NoMatches));
        assert!(state.can_load_more());
    }
}
