//! Create the owner account or reset its credentials

use std::io::Write;

use crate::config::Config;
use crate::constants::seed::ADMIN_DISPLAY_NAME;
use crate::db::{CredentialsOutcome, Store};

pub async fn cmd_admin(
    config: &Config,
    username: &str,
    password: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password cannot be empty");
    }

    let store = Store::from_config(config).await?;

    let outcome = store
        .upsert_owner_credentials(username, password, ADMIN_DISPLAY_NAME, &config.security)
        .await?;

    match outcome {
        CredentialsOutcome::Created => writeln!(out, "Creating user...")?,
        CredentialsOutcome::Updated => writeln!(out, "Updating user...")?,
    }

    writeln!(out, "Done.")?;
    Ok(())
}
