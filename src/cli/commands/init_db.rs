//! Create (or recreate) the database schema

use std::io::Write;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_init_db(config: &Config, drop: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = Store::connect(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    if drop {
        tracing::warn!("Dropping all tables before initialization");
        store.reset().await?;
    } else {
        store.migrate().await?;
    }

    writeln!(out, "Initialized database.")?;
    Ok(())
}
