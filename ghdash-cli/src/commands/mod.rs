//! Command implementations for the ghdash CLI

pub mod config;
pub mod list;
pub mod show;
pub mod user;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ghdash_core::{DashConfig, EntityKind, ListController};
use ghdash_github::GitHubClient;
use tracing::debug;

use crate::ui;

pub use config::run_config;
pub use list::run_list;
pub use show::run_show;
pub use user::run_user;

/// Loaded configuration plus a client built from it
pub(crate) struct Session {
    pub config: DashConfig,
    pub client: Arc<GitHubClient>,
}

impl Session {
    pub fn open() -> Result<Self> {
        let config = DashConfig::load().context("Failed to load ghdash config")?;
        debug!(base_url = %config.api.base_url, per_page = config.api.per_page, "Loaded config");
        let client = GitHubClient::new(&config.api).context("Failed to create API client")?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }
}

pub(crate) fn require_username(raw: &str) -> Result<&str> {
    let username = raw.trim();
    if username.is_empty() {
        bail!("Username must not be empty");
    }
    Ok(username)
}

/// Load page 1 and then up to `pages - 1` more, stopping early on
/// exhaustion or a failed page
pub(crate) async fn load_pages(
    client: Arc<GitHubClient>,
    username: &str,
    kind: EntityKind,
    pages: u32,
) -> ListController<GitHubClient> {
    let progress = ui::FetchProgress::start(kind.title(), username);
    progress.page(1);
    let controller = ListController::initialize(client, username, kind).await;

    for page in 2..=pages.max(1) {
        let view = controller.view().await;
        if !view.can_load_more || view.last_error.is_some() {
            break;
        }
        progress.page(page);
        controller.load_more().await;
    }

    controller
}
