//! CLI module - Command-line interface for Watchlist
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watchlist - a personal movie list
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Initialize the database
    InitDb {
        /// Drop all tables before creating them
        #[arg(long)]
        drop: bool,
    },

    /// Create the login user, or update its username and password
    Admin {
        /// The username used to login
        #[arg(long)]
        username: Option<String>,
        /// The password used to login
        #[arg(long)]
        password: Option<String>,
    },

    /// Generate fake data
    Forge,

    /// Create default config file
    Init,
}

pub use commands::*;
