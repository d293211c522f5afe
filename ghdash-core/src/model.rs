//! Records returned by the public activity API
//!
//! Field names follow the upstream JSON. Optional and count fields default
//! when absent so a partially populated record still deserializes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account profile shown before any list is opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account that triggered an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub display_login: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub url: String,
}

/// Short repository reference embedded in events (`owner/name`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forkee {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRef {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRef {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRef {
    #[serde(default)]
    pub html_url: String,
}

/// Event payload. Only the fields used for links and summaries are typed;
/// everything else is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<Commit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forkee: Option<Forkee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<IssueRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseRef>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Payload {
    /// Commits carried by a push, empty for other events
    pub fn commits(&self) -> &[Commit] {
        self.commits.as_deref().unwrap_or_default()
    }

    /// Branch name with the `refs/heads/` prefix removed
    pub fn branch(&self) -> Option<&str> {
        self.git_ref
            .as_deref()
            .map(|r| r.strip_prefix("refs/heads/").unwrap_or(r))
    }
}

/// Entry of an activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: Actor,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: Payload,
    #[serde(default)]
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

/// Repository as listed in subscriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    /// Size in kilobytes
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub raw_url: String,
    #[serde(default)]
    pub size: u64,
}

/// Code snippet collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    #[serde(default)]
    pub comments: u64,
}

impl Gist {
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// One record held by a list controller.
///
/// A controller only ever holds records of a single variant; the enum exists
/// so one controller type can be rebound across entity kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "record", rename_all = "snake_case")]
pub enum Item {
    Event(Event),
    Repo(Repo),
    Gist(Gist),
}

impl Item {
    /// Stable identity of the record within its collection
    pub fn key(&self) -> String {
        match self {
            Item::Event(event) => event.id.clone(),
            Item::Repo(repo) => repo.id.to_string(),
            Item::Gist(gist) => gist.id.clone(),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Item::Event(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_repo(&self) -> Option<&Repo> {
        match self {
            Item::Repo(repo) => Some(repo),
            _ => None,
        }
    }

    pub fn as_gist(&self) -> Option<&Gist> {
        match self {
            Item::Gist(gist) => Some(gist),
            _ => None,
        }
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        Item::Event(event)
    }
}

impl From<Repo> for Item {
    fn from(repo: Repo) -> Self {
        Item::Repo(repo)
    }
}

impl From<Gist> for Item {
    fn from(gist: Gist) -> Self {
        Item::Gist(gist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_push_event() {
        let raw = json!({
            "id": "2489651045",
            "type": "PushEvent",
            "actor": {"id": 583231, "login": "octocat", "gravatar_id": "", "url": "https://api.github.com/users/octocat", "avatar_url": "https://avatars.githubusercontent.com/u/583231"},
            "repo": {"id": 1296269, "name": "octocat/Hello-World", "url": "https://api.github.com/repos/octocat/Hello-World"},
            "payload": {
                "push_id": 10115855396_u64,
                "ref": "refs/heads/main",
                "commits": [{"sha": "7638417db6d59f3c431d3e1f261cc637155684cd", "message": "Update README", "author": {"name": "Mona", "email": "mona@example.com"}, "distinct": true, "url": "https://api.github.com/repos/octocat/Hello-World/commits/7638417"}]
            },
            "public": true,
            "created_at": "2022-06-09T12:47:28Z"
        });

        let event: Event = serde_json::from_value(raw).unwrap();
        assert_eq!(event.kind, "PushEvent");
        assert_eq!(event.payload.branch(), Some("main"));
        assert_eq!(event.payload.commits().len(), 1);
        assert!(event.payload.extra.contains_key("push_id"));
    }

    #[test]
    fn repo_defaults_missing_counts() {
        let raw = json!({
            "id": 1,
            "name": "linguist",
            "full_name": "github/linguist",
            "html_url": "https://github.com/github/linguist"
        });
        let repo: Repo = serde_json::from_value(raw).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.description.is_none());
        assert!(!repo.archived);
    }

    #[test]
    fn item_keys() {
        let raw = json!({
            "id": "aa5a315d61ae9438b18d",
            "html_url": "https://gist.github.com/aa5a315d61ae9438b18d",
            "description": null,
            "created_at": "2010-04-14T02:15:15Z",
            "updated_at": "2011-06-20T11:34:15Z",
            "files": {"hello_world.rb": {"filename": "hello_world.rb", "language": "Ruby", "raw_url": "https://gist.githubusercontent.com/raw/hello_world.rb", "size": 167}}
        });
        let gist: Gist = serde_json::from_value(raw).unwrap();
        let item = Item::from(gist);
        assert_eq!(item.key(), "aa5a315d61ae9438b18d");
        assert!(item.as_event().is_none());
        assert_eq!(item.as_gist().unwrap().filenames().collect::<Vec<_>>(), vec!["hello_world.rb"]);
    }
}
