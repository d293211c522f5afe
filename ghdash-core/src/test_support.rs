//! Builders shared by unit tests

use std::collections::BTreeMap;
use std::ops::Range;

use chrono::{TimeZone, Utc};

use crate::model::{Actor, Event, EventRepo, Gist, GistFile, Item, Payload, Repo};

pub fn event(id: &str, kind: &str, actor: &str, repo_name: &str) -> Item {
    Item::Event(Event {
        id: id.to_string(),
        kind: kind.to_string(),
        actor: Actor {
            id: 1,
            login: actor.to_string(),
            display_login: None,
            avatar_url: String::new(),
            url: String::new(),
        },
        repo: EventRepo {
            id: 1,
            name: repo_name.to_string(),
            url: String::new(),
        },
        payload: Payload::default(),
        public: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    })
}

/// Push events with ids taken from `ids`
pub fn events(ids: Range<usize>) -> Vec<Item> {
    ids.map(|i| event(&i.to_string(), "PushEvent", "octocat", "octocat/Hello-World"))
        .collect()
}

pub fn repo(id: u64, name: &str, description: Option<&str>) -> Item {
    Item::Repo(Repo {
        id,
        name: name.to_string(),
        full_name: format!("octocat/{}", name),
        html_url: format!("https://github.com/octocat/{}", name),
        description: description.map(String::from),
        language: None,
        stargazers_count: 0,
        watchers_count: 0,
        forks_count: 0,
        size: 0,
        archived: false,
        updated_at: None,
    })
}

pub fn gist(id: &str, files: &[&str], description: Option<&str>) -> Item {
    let files: BTreeMap<String, GistFile> = files
        .iter()
        .map(|name| {
            (
                name.to_string(),
                GistFile {
                    filename: name.to_string(),
                    language: None,
                    raw_url: String::new(),
                    size: 0,
                },
            )
        })
        .collect();
    Item::Gist(Gist {
        id: id.to_string(),
        html_url: format!("https://gist.github.com/{}", id),
        description: description.map(String::from),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        files,
        comments: 0,
    })
}
