//! Navigation session: current profile, active tab and its list
//!
//! Owns the controller explicitly so rebinding on a subject or tab change
//! is a method call rather than a side effect of rendering.

use std::sync::Arc;

use tracing::info;

use crate::controller::ListController;
use crate::error::{FetchError, FetchResult};
use crate::kind::EntityKind;
use crate::model::User;
use crate::source::{CollectionSource, ProfileSource};
use crate::state::Completion;

/// Which screen the shell should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    List,
}

pub struct Dashboard<P: ?Sized, S: ?Sized> {
    profiles: Arc<P>,
    source: Arc<S>,
    tab: EntityKind,
    user: Option<User>,
    list: Option<ListController<S>>,
}

impl<P, S> Dashboard<P, S>
where
    P: ProfileSource + ?Sized,
    S: CollectionSource + ?Sized,
{
    pub fn new(profiles: Arc<P>, source: Arc<S>, default_tab: EntityKind) -> Self {
        Self {
            profiles,
            source,
            tab: default_tab,
            user: None,
            list: None,
        }
    }

    /// Look up `username` and open its list on the active tab.
    ///
    /// On failure the previous profile and list are left untouched, so the
    /// caller stays on whatever screen it was showing.
    pub async fn search(&mut self, username: &str) -> FetchResult<&User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::invalid_subject("username is empty"));
        }

        let user = self.profiles.fetch_user(username).await?;
        info!(login = %user.login, tab = %self.tab, "Opening dashboard");

        match &self.list {
            Some(list) => {
                list.rebind(user.login.clone(), self.tab).await;
            }
            None => {
                let list = ListController::initialize(Arc::clone(&self.source), user.login.clone(), self.tab).await;
                self.list = Some(list);
            }
        }

        let user = self.user.insert(user);
        Ok(&*user)
    }

    /// Switch tabs. Re-selecting the active tab does nothing.
    pub async fn select_tab(&mut self, kind: EntityKind) -> Option<Completion> {
        if kind == self.tab {
            return None;
        }
        self.tab = kind;
        let (list, user) = (self.list.as_ref()?, self.user.as_ref()?);
        list.rebind(user.login.clone(), kind).await
    }

    /// Back to the search screen; all list state is dropped
    pub fn go_home(&mut self) {
        self.user = None;
        self.list = None;
    }

    pub fn screen(&self) -> Screen {
        if self.user.is_some() {
            Screen::List
        } else {
            Screen::Search
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tab(&self) -> EntityKind {
        self.tab
    }

    pub fn list(&self) -> Option<&ListController<S>> {
        self.list.as_ref()
    }
}
