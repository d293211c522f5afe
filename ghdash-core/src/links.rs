//! Link resolution for item activation
//!
//! The controller does not decide where an item points; it asks a
//! [`LinkResolver`]. [`WebLinks`] is the resolver for the public web UI.

use crate::model::{Event, Item};

/// Maps an item to the external URL it should open
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, item: &Item) -> Option<String>;
}

impl<F> LinkResolver for F
where
    F: Fn(&Item) -> Option<String> + Send + Sync,
{
    fn resolve(&self, item: &Item) -> Option<String> {
        self(item)
    }
}

/// Resolver producing links into the public web UI
#[derive(Debug, Clone)]
pub struct WebLinks {
    web_base: String,
}

impl Default for WebLinks {
    fn default() -> Self {
        Self::new("https://github.com")
    }
}

impl WebLinks {
    pub fn new(web_base: impl Into<String>) -> Self {
        let web_base = web_base.into();
        Self {
            web_base: web_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn repo_url(&self, full_name: &str) -> String {
        format!("{}/{}", self.web_base, full_name)
    }

    pub fn actor_url(&self, login: &str) -> String {
        format!("{}/{}", self.web_base, login)
    }

    /// Most specific page for an event, falling back to its repository
    pub fn event_url(&self, event: &Event) -> String {
        let repo_url = self.repo_url(&event.repo.name);
        let payload = &event.payload;
        let non_empty = |url: &str| (!url.is_empty()).then(|| url.to_string());

        let specific = match event.kind.as_str() {
            "PushEvent" => payload
                .commits()
                .first()
                .map(|commit| format!("{}/commit/{}", repo_url, commit.sha)),
            "PullRequestEvent" => payload.pull_request.as_ref().and_then(|pr| non_empty(&pr.html_url)),
            "IssuesEvent" => payload.issue.as_ref().and_then(|issue| non_empty(&issue.html_url)),
            "IssueCommentEvent" => payload
                .comment
                .as_ref()
                .and_then(|comment| comment.html_url.as_deref())
                .and_then(non_empty)
                .or_else(|| payload.issue.as_ref().and_then(|issue| non_empty(&issue.html_url))),
            "ForkEvent" => payload.forkee.as_ref().and_then(|forkee| non_empty(&forkee.html_url)),
            "ReleaseEvent" => payload.release.as_ref().and_then(|release| non_empty(&release.html_url)),
            _ => None,
        };

        specific.unwrap_or(repo_url)
    }
}

impl LinkResolver for WebLinks {
    fn resolve(&self, item: &Item) -> Option<String> {
        match item {
            Item::Event(event) => Some(self.event_url(event)),
            Item::Repo(repo) if !repo.html_url.is_empty() => Some(repo.html_url.clone()),
            Item::Repo(repo) => Some(self.repo_url(&repo.full_name)),
            Item::Gist(gist) if !gist.html_url.is_empty() => Some(gist.html_url.clone()),
            Item::Gist(_) => None,
        }
    }
}
