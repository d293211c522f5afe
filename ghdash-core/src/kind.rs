//! Entity kinds and their per-kind behaviour
//!
//! Each kind selects a remote endpoint, a search predicate, a category
//! classifier and an activation policy. Nothing here touches the network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Item;

const ACTIVITY_CATEGORIES: &[&str] = &[
    "PushEvent",
    "WatchEvent",
    "ForkEvent",
    "CreateEvent",
    "PullRequestEvent",
    "IssuesEvent",
    "IssueCommentEvent",
];

const RECEIVED_CATEGORIES: &[&str] = &[
    "PushEvent",
    "WatchEvent",
    "ForkEvent",
    "CreateEvent",
    "PullRequestEvent",
];

/// Which remote collection a list controller paginates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Public events triggered by the subject
    Activity,
    /// Events broadcast to the subject from accounts they follow
    ReceivedActivity,
    /// Repositories the subject watches
    Subscription,
    /// Public code snippets (gists)
    Snippet,
}

/// What the presentation layer should do when an item is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// Navigate to an in-app detail view
    Detail,
    /// Hand the item's resolved link to the platform opener
    External,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Activity,
        EntityKind::ReceivedActivity,
        EntityKind::Subscription,
        EntityKind::Snippet,
    ];

    /// Path segment under `/users/{subject}/`
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::Activity => "events/public",
            EntityKind::ReceivedActivity => "received_events",
            EntityKind::Subscription => "subscriptions",
            EntityKind::Snippet => "gists",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Activity => "Recent Activity",
            EntityKind::ReceivedActivity => "Received Events",
            EntityKind::Subscription => "Subscriptions",
            EntityKind::Snippet => "Public Gists",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EntityKind::Activity => "Public events triggered by this user.",
            EntityKind::ReceivedActivity => {
                "Events broadcast to this user (activity from people they follow)."
            }
            EntityKind::Subscription => "Repositories watched by this user.",
            EntityKind::Snippet => "Code snippets and random files shared publicly.",
        }
    }

    /// Message shown when the collection itself has no records
    pub fn empty_message(self) -> &'static str {
        "No items found."
    }

    /// Filter options offered next to the search box. Empty means the kind
    /// has no category dimension.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            EntityKind::Activity => ACTIVITY_CATEGORIES,
            EntityKind::ReceivedActivity => RECEIVED_CATEGORIES,
            EntityKind::Subscription | EntityKind::Snippet => &[],
        }
    }

    pub fn activation(self) -> ActivationPolicy {
        match self {
            EntityKind::Activity => ActivationPolicy::Detail,
            _ => ActivationPolicy::External,
        }
    }

    /// Kind-specific search predicate. An empty query matches everything.
    ///
    /// `query` is compared case-insensitively as a substring.
    pub fn matches(self, item: &Item, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);

        match (self, item) {
            (EntityKind::Activity, Item::Event(event)) => hit(&event.kind) || hit(&event.repo.name),
            (EntityKind::ReceivedActivity, Item::Event(event)) => {
                hit(&event.actor.login) || hit(&event.kind) || hit(&event.repo.name)
            }
            (EntityKind::Subscription, Item::Repo(repo)) => {
                hit(&repo.name) || repo.description.as_deref().is_some_and(hit)
            }
            (EntityKind::Snippet, Item::Gist(gist)) => {
                gist.filenames().any(hit) || gist.description.as_deref().is_some_and(hit)
            }
            _ => false,
        }
    }

    /// Category of an item, or `None` when the kind has no filter dimension
    pub fn category_of(self, item: &Item) -> Option<&str> {
        match (self, item) {
            (EntityKind::Activity | EntityKind::ReceivedActivity, Item::Event(event)) => {
                Some(event.kind.as_str())
            }
            _ => None,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            EntityKind::Activity => "activity",
            EntityKind::ReceivedActivity => "received",
            EntityKind::Subscription => "subscriptions",
            EntityKind::Snippet => "gists",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "activity" | "events" => Ok(EntityKind::Activity),
            "received" | "received_activity" | "received-events" => Ok(EntityKind::ReceivedActivity),
            "subscriptions" | "subscription" | "watched" => Ok(EntityKind::Subscription),
            "gists" | "gist" | "snippets" | "snippet" => Ok(EntityKind::Snippet),
            other => Err(format!(
                "unknown entity kind '{}' (expected activity, received, subscriptions or gists)",
                other
            )),
        }
    }
}
