//! `ghdash user <name>`: profile lookup

use anyhow::{anyhow, Result};
use clap::Parser;
use ghdash_core::ProfileSource;

use super::{require_username, Session};
use crate::{render, ui};

#[derive(Parser, Debug)]
pub struct UserArgs {
    /// GitHub username to look up
    pub username: String,

    /// Print the raw profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_user(args: UserArgs) -> Result<()> {
    let username = require_username(&args.username)?;
    let session = Session::open()?;

    let result = {
        let _progress = ui::FetchProgress::start("Profile", username);
        session.client.fetch_user(username).await
    };

    let user = result.map_err(|err| anyhow!(err.user_message()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("{}", render::profile_card(&user));
    }
    Ok(())
}
