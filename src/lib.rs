pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use std::io::Write;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config);

    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,

        Commands::InitDb { drop } => cli::cmd_init_db(&config, drop, &mut stdout).await,

        Commands::Admin { username, password } => {
            let username = match username {
                Some(username) => username,
                None => prompt("Username")?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt_password(|label| {
                    Ok(rpassword::prompt_password(format!("{label}: "))?)
                })?,
            };
            cli::cmd_admin(&config, &username, &password, &mut stdout).await
        }

        Commands::Forge => cli::cmd_forge(&config, &mut stdout).await,

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Watchlist v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = config.server_address();
    let state = api::create_app_state_from_config(config).await?;

    if state.store().count_users().await? == 0 {
        warn!("No user account found. Create one with `watchlist admin` to log in.");
    }

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask twice through `read` (which must not echo) and require both answers to match
fn prompt_password(
    mut read: impl FnMut(&str) -> anyhow::Result<String>,
) -> anyhow::Result<String> {
    let password = read("Password")?;
    let confirmation = read("Repeat for confirmation")?;

    if password != confirmation {
        anyhow::bail!("The two entered values do not match");
    }

    Ok(password)
}
