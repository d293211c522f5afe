//! `ghdash list <name>`: paginated, filterable collection listing

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use ghdash_core::{CategoryFilter, EntityKind, ListView};

use super::{load_pages, require_username, Session};
use crate::render;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// GitHub username whose collection to list
    pub username: String,

    /// Collection to list: activity, received, subscriptions or gists
    /// (defaults to display.default_tab)
    #[arg(long, short = 'k')]
    pub kind: Option<EntityKind>,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value_t = 1)]
    pub pages: u32,

    /// Case-insensitive text filter over loaded items
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Event type to keep (e.g. PushEvent); "All" disables the filter
    #[arg(long, short = 'c')]
    pub category: Option<CategoryFilter>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn run_list(args: ListArgs) -> Result<()> {
    let username = require_username(&args.username)?;
    let session = Session::open()?;
    let kind = args.kind.unwrap_or(session.config.display.default_tab);

    let controller = load_pages(session.client.clone(), username, kind, args.pages).await;
    if let Some(query) = args.search {
        controller.set_search_query(query).await;
    }
    if let Some(category) = args.category {
        controller.set_category(category).await;
    }

    let view = controller.view().await;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print_text(&view),
    }

    // Nothing to show at all is a failure for scripts; a failed later page is not
    if let Some(message) = view.error_message() {
        if view.total_loaded == 0 {
            bail!(message);
        }
    }
    Ok(())
}

fn print_text(view: &ListView) {
    let now = Utc::now();
    println!(
        "{} for {}: {} shown, {} loaded, page {}",
        view.kind.title(),
        view.subject,
        view.items.len(),
        view.total_loaded,
        view.current_page
    );
    if !view.filter.is_identity() {
        println!("Filter: query '{}', category {}", view.filter.query, view.filter.category);
    }
    println!();

    for item in &view.items {
        println!("{}", render::summary(view.kind, item, now));
    }

    if let Some(placeholder) = &view.placeholder {
        println!("{}", placeholder.message());
    }

    if let Some(message) = view.error_message() {
        eprintln!("✗ {}", message);
    } else if view.has_more && view.total_loaded > 0 {
        println!();
        println!("More available: rerun with --pages {}", view.current_page + 1);
    } else if !view.has_more && view.total_loaded > 0 {
        println!();
        println!("End of list.");
    }
}
