//! Plain-text rendering of profiles, list rows and event details

use chrono::{DateTime, Utc};
use ghdash_core::model::{Event, Gist, Repo, User};
use ghdash_core::{EntityKind, Item, WebLinks};
use serde_json::Value;

/// One-line description of an event, prefixed with the actor for received feeds
pub fn describe_event(event: &Event, received: bool) -> String {
    let repo = &event.repo.name;
    let action = event.payload.action.as_deref().unwrap_or("updated");

    let body = match event.kind.as_str() {
        "PushEvent" => format!("pushed to {} in {}", event.payload.branch().unwrap_or("?"), repo),
        "ForkEvent" => format!("forked {}", repo),
        "WatchEvent" => format!("starred {}", repo),
        "CreateEvent" => format!("created repository {}", repo),
        "PullRequestEvent" => format!("{} a pull request in {}", action, repo),
        "IssuesEvent" => format!("{} issue in {}", action, repo),
        "IssueCommentEvent" => format!("commented on issue in {}", repo),
        other => format!("{} on {}", other.trim_end_matches("Event"), repo),
    };

    if received {
        format!("{} {}", event.actor.login, body)
    } else {
        body
    }
}

/// Repository size, stored upstream in kilobytes
pub fn format_size(size_kb: u64) -> String {
    if size_kb > 1024 {
        format!("{:.1} MB", size_kb as f64 / 1024.0)
    } else {
        format!("{} KB", size_kb)
    }
}

/// Coarse "3 days ago" style age of `then` relative to `now`
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }

    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    match secs {
        s if s < 45 => "a few seconds ago".to_string(),
        s if s < 90 => "a minute ago".to_string(),
        s if s < 45 * 60 => format!("{} minutes ago", minutes.max(2)),
        s if s < 90 * 60 => "an hour ago".to_string(),
        s if s < 22 * 3600 => format!("{} hours ago", hours.max(2)),
        s if s < 36 * 3600 => "a day ago".to_string(),
        _ if days < 26 => format!("{} days ago", days.max(2)),
        _ if days < 45 => "a month ago".to_string(),
        _ if days < 320 => format!("{} months ago", (days / 30).max(2)),
        _ if days < 548 => "a year ago".to_string(),
        _ => format!("{} years ago", (days / 365).max(2)),
    }
}

fn repo_line(repo: &Repo, now: DateTime<Utc>) -> String {
    let mut parts = vec![
        format!("★ {}", repo.stargazers_count),
        format_size(repo.size),
    ];
    if let Some(language) = &repo.language {
        parts.push(language.clone());
    }
    if let Some(updated) = repo.updated_at {
        parts.push(format!("updated {}", relative_time(updated, now)));
    }
    if repo.archived {
        parts.push("archived".to_string());
    }

    format!(
        "{}  {}\n    {}",
        repo.full_name,
        parts.join(" · "),
        repo.description.as_deref().unwrap_or("No description provided.")
    )
}

fn gist_line(gist: &Gist, now: DateTime<Utc>) -> String {
    let files: Vec<&str> = gist.filenames().collect();
    let title = files.first().copied().unwrap_or("Untitled Gist");
    let mut line = format!("{}  ({} files, updated {})", title, files.len(), relative_time(gist.updated_at, now));
    if let Some(description) = gist.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!("\n    {}", description));
    }
    if files.len() > 1 {
        line.push_str(&format!("\n    {}", files.join(", ")));
    }
    line
}

/// List row for one item of `kind`
pub fn summary(kind: EntityKind, item: &Item, now: DateTime<Utc>) -> String {
    match item {
        Item::Event(event) => {
            let mut line = format!(
                "[{}] {}  ({})",
                event.id,
                describe_event(event, kind == EntityKind::ReceivedActivity),
                relative_time(event.created_at, now)
            );
            if let Some(commit) = event.payload.commits().first() {
                if event.kind == "PushEvent" {
                    line.push_str(&format!("\n    {}", first_line(&commit.message)));
                }
            }
            line
        }
        Item::Repo(repo) => repo_line(repo, now),
        Item::Gist(gist) => gist_line(gist, now),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

pub fn profile_card(user: &User) -> String {
    let mut lines = vec![format!("{} (#{})", user.login, user.id)];
    if let Some(name) = &user.name {
        lines.push(format!("  Name:     {}", name));
    }
    if let Some(bio) = user.bio.as_deref().filter(|bio| !bio.is_empty()) {
        lines.push(format!("  Bio:      {}", bio));
    }
    lines.push(format!("  Repos:    {}", user.public_repos));
    lines.push(format!("  Gists:    {}", user.public_gists));
    lines.push(format!("  Joined:   {}", user.created_at.format("%Y-%m-%d")));
    lines.push(format!("  Updated:  {}", user.updated_at.format("%Y-%m-%d")));
    if !user.html_url.is_empty() {
        lines.push(format!("  Profile:  {}", user.html_url));
    }
    lines.join("\n")
}

/// Top-level payload fields that are neither objects, arrays nor null
pub fn payload_scalars(event: &Event) -> Vec<(String, String)> {
    let Ok(Value::Object(fields)) = serde_json::to_value(&event.payload) else {
        return Vec::new();
    };

    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.replace('_', " "), rendered))
        })
        .collect()
}

/// Full detail view: general info, payload overview, commits, raw payload, actor
pub fn event_detail(event: &Event, links: &WebLinks) -> String {
    let mut out = Vec::new();
    out.push(format!("Details for {} #{}", event.kind, event.id));
    out.push(format!(
        "Triggered by user '{}' on repository '{}'",
        event.actor.login, event.repo.name
    ));

    out.push(String::new());
    out.push("General Information".to_string());
    out.push(format!("  Event ID:    {}", event.id));
    out.push(format!("  Event Type:  {}", event.kind));
    out.push(format!("  Created At:  {}", event.created_at.to_rfc3339()));
    out.push(format!("  Repository:  {} ({})", event.repo.name, links.repo_url(&event.repo.name)));

    out.push(String::new());
    out.push("Overview".to_string());
    let scalars = payload_scalars(event);
    if scalars.is_empty() {
        out.push("  No simple payload properties to display.".to_string());
    }
    for (key, value) in scalars {
        out.push(format!("  {}: {}", key, value));
    }

    let commits = event.payload.commits();
    out.push(String::new());
    out.push(format!("Commits ({})", commits.len()));
    if commits.is_empty() {
        out.push("  No commits found in payload.".to_string());
    }
    for commit in commits {
        let short = commit.sha.get(..7).unwrap_or(&commit.sha);
        let author = commit.author.as_ref().map(|a| a.name.as_str()).unwrap_or("unknown");
        out.push(format!("  {}  {}  {}", short, author, first_line(&commit.message)));
    }

    out.push(String::new());
    out.push("Raw Data".to_string());
    out.push(serde_json::to_string_pretty(&event.payload).unwrap_or_else(|err| format!("<unrenderable: {}>", err)));

    out.push(String::new());
    out.push("Actor".to_string());
    out.push(format!(
        "  {} (ID: {})",
        event.actor.display_login.as_deref().unwrap_or(&event.actor.login),
        event.actor.id
    ));
    out.push(format!("  {}", links.actor_url(&event.actor.login)));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn push_event() -> Event {
        serde_json::from_value(json!({
            "id": "42",
            "type": "PushEvent",
            "actor": {"id": 1, "login": "octocat"},
            "repo": {"id": 2, "name": "octocat/Hello-World"},
            "payload": {
                "push_id": 7,
                "ref": "refs/heads/main",
                "commits": [{"sha": "7638417db6d59f3c431d3e1f261cc637155684cd", "message": "Fix typo\n\nlong body", "author": {"name": "Mona", "email": "m@example.com"}}]
            },
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn describes_events() {
        let event = push_event();
        assert_eq!(describe_event(&event, false), "pushed to main in octocat/Hello-World");
        assert_eq!(describe_event(&event, true), "octocat pushed to main in octocat/Hello-World");

        let mut member = event.clone();
        member.kind = "MemberEvent".to_string();
        assert_eq!(describe_event(&member, false), "Member on octocat/Hello-World");
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 KB");
        assert_eq!(format_size(1024), "1024 KB");
        assert_eq!(format_size(1536), "1.5 MB");
    }

    #[test]
    fn relative_times() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now - Duration::seconds(5), now), "a few seconds ago");
        assert_eq!(relative_time(now - Duration::minutes(10), now), "10 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative_time(now - Duration::days(100), now), "3 months ago");
        assert_eq!(relative_time(now - Duration::days(800), now), "2 years ago");
    }

    #[test]
    fn detail_lists_scalars_and_commits() {
        let event = push_event();
        let scalars = payload_scalars(&event);
        assert!(scalars.contains(&("push id".to_string(), "7".to_string())));
        assert!(scalars.contains(&("ref".to_string(), "refs/heads/main".to_string())));
        assert!(!scalars.iter().any(|(key, _)| key == "commits"));

        let detail = event_detail(&event, &WebLinks::default());
        assert!(detail.contains("Commits (1)"));
        assert!(detail.contains("7638417  Mona  Fix typo"));
        assert!(detail.contains("https://github.com/octocat"));
    }
}
