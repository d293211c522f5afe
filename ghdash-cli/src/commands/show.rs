//! `ghdash show <name> <id>`: activate one loaded item

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use ghdash_core::{Activation, EntityKind, WebLinks};

use super::{load_pages, require_username, Session};
use crate::render;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// GitHub username whose collection holds the item
    pub username: String,

    /// Item id (event id, repository id or gist id)
    pub id: String,

    /// Collection to search (defaults to display.default_tab)
    #[arg(long, short = 'k')]
    pub kind: Option<EntityKind>,

    /// How many pages to scan for the item
    #[arg(long, short = 'p', default_value_t = 3)]
    pub pages: u32,
}

pub async fn run_show(args: ShowArgs) -> Result<()> {
    let username = require_username(&args.username)?;
    let session = Session::open()?;
    let kind = args.kind.unwrap_or(session.config.display.default_tab);
    let links = WebLinks::new(session.config.api.web_url.clone());

    let controller = load_pages(session.client.clone(), username, kind, args.pages).await;

    match controller.activate(args.id.trim(), &links).await {
        Some(Activation::ShowDetail(item)) => {
            let event = item
                .as_event()
                .ok_or_else(|| anyhow!("Item {} has no detail view", args.id))?;
            println!("{}", render::event_detail(event, &links));
        }
        Some(Activation::OpenExternal(url)) => println!("{}", url),
        None => {
            let view = controller.view().await;
            if let Some(message) = view.error_message() {
                bail!(message);
            }
            bail!(
                "No {} item with id '{}' in the first {} page(s) for {}",
                kind,
                args.id,
                view.current_page,
                username
            );
        }
    }
    Ok(())
}
