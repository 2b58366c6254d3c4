//! Seed the watchlist with sample movies

use std::io::Write;

use crate::config::Config;
use crate::constants::seed::{FORGE_DISPLAY_NAME, FORGE_MOVIES};
use crate::db::Store;

pub async fn cmd_forge(config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;

    store.set_owner_name(FORGE_DISPLAY_NAME).await?;
    let inserted = store.add_movies(FORGE_MOVIES).await?;
    tracing::info!("Seeded {} movies", inserted);

    writeln!(out, "Done.")?;
    Ok(())
}
