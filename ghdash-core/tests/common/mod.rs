//! Shared fixtures for ghdash-core integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ghdash_core::model::{Actor, EventRepo, Payload};
use ghdash_core::{CollectionSource, EntityKind, Event, FetchResult, Item, Repo};
use tokio::sync::{oneshot, Notify};

pub fn event(id: &str, kind: &str, repo: &str) -> Item {
    Item::Event(Event {
        id: id.to_string(),
        kind: kind.to_string(),
        actor: Actor {
            id: 583231,
            login: "octocat".to_string(),
            display_login: None,
            avatar_url: String::new(),
            url: String::new(),
        },
        repo: EventRepo {
            id: 1296269,
            name: repo.to_string(),
            url: String::new(),
        },
        payload: Payload::default(),
        public: true,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    })
}

pub fn repo(id: u64, name: &str) -> Item {
    Item::Repo(Repo {
        id,
        name: name.to_string(),
        full_name: format!("octocat/{}", name),
        html_url: format!("https://github.com/octocat/{}", name),
        description: None,
        language: None,
        stargazers_count: 0,
        watchers_count: 0,
        forks_count: 0,
        size: 0,
        archived: false,
        updated_at: None,
    })
}

/// `count` push events with ids `{prefix}-{n}`
pub fn page_of(prefix: &str, count: usize) -> Vec<Item> {
    (0..count)
        .map(|n| event(&format!("{}-{}", prefix, n), "PushEvent", "octocat/Hello-World"))
        .collect()
}

pub fn keys(items: &[Item]) -> Vec<String> {
    items.iter().map(Item::key).collect()
}

/// Source answering from queued responses keyed by (subject, page).
///
/// Unscripted pages come back empty. One (subject, page) pair can be gated
/// so the fetch parks until the test releases it.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<HashMap<(String, u32), VecDeque<FetchResult<Vec<Item>>>>>,
    calls: Mutex<Vec<(String, EntityKind, u32)>>,
    gate: Mutex<Option<(String, u32, oneshot::Receiver<()>)>>,
    pub entered: Notify,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, subject: &str, page: u32, result: FetchResult<Vec<Item>>) {
        self.responses
            .lock()
            .unwrap()
            .entry((subject.to_string(), page))
            .or_default()
            .push_back(result);
    }

    /// Park the next fetch of (subject, page) until the returned sender fires
    pub fn gate(&self, subject: &str, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some((subject.to_string(), page, rx));
        tx
    }

    pub fn calls(&self) -> Vec<(String, EntityKind, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.calls().into_iter().map(|(_, _, page)| page).collect()
    }

    fn take_gate(&self, subject: &str, page: u32) -> Option<oneshot::Receiver<()>> {
        let mut gate = self.gate.lock().unwrap();
        match gate.as_ref() {
            Some((s, p, _)) if s == subject && *p == page => gate.take().map(|(_, _, rx)| rx),
            _ => None,
        }
    }
}

#[async_trait]
impl CollectionSource for ScriptedSource {
    async fn fetch_page(&self, kind: EntityKind, subject: &str, page: u32) -> FetchResult<Vec<Item>> {
        self.calls
            .lock()
            .unwrap()
            .push((subject.to_string(), kind, page));

        if let Some(release) = self.take_gate(subject, page) {
            self.entered.notify_one();
            let _ = release.await;
        }

        self.responses
            .lock()
            .unwrap()
            .get_mut(&(subject.to_string(), page))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
