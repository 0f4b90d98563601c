//! cognito-auth CLI library

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cognito_auth::config::CognitoAuthConfig;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "cognito-auth")]
#[command(version)]
#[command(about = "Amazon Cognito hosted UI sign-in from the command line", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./cognito-auth.toml and the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the hosted UI login URL and its state
    LoginUrl {
        /// State to embed instead of a random one
        #[arg(long)]
        state: Option<String>,
    },

    /// Print the hosted UI logout URL
    LogoutUrl,

    /// Exchange an authorization code and record the sign-in
    Exchange {
        /// Authorization code from the callback
        #[arg(long)]
        code: String,

        /// Client IP to record in the sign-in history
        #[arg(long)]
        ip: Option<IpAddr>,
    },

    /// Show the attributes behind an access token
    Userinfo {
        /// Access token
        #[arg(long)]
        access_token: String,
    },

    /// Refresh a user's stored tokens
    Refresh {
        /// User ID
        #[arg(long)]
        user_id: i64,

        /// Refresh token
        #[arg(long)]
        refresh_token: String,
    },

    /// List recent sign-ins for a user
    History {
        /// User ID
        #[arg(long)]
        user_id: i64,

        /// Limit number of results
        #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },

    /// Delete sign-in history older than a number of days
    PruneHistory {
        /// Keep entries newer than this many days
        #[arg(long)]
        days: u32,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Apply pending database migrations
    Migrate,
}

impl Cli {
    /// Load configuration from `--config` or the default locations
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is incomplete
    pub fn load_config(&self) -> Result<CognitoAuthConfig> {
        let config = match &self.config {
            Some(path) => CognitoAuthConfig::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => CognitoAuthConfig::load().context("Failed to load configuration")?,
        };
        Ok(config)
    }
}

impl Commands {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cognito rejects the request
    /// - The database cannot be reached
    pub async fn execute(&self, config: &CognitoAuthConfig) -> Result<()> {
        match self {
            Self::LoginUrl { state } => commands::urls::login_url(config, state.as_deref()),
            Self::LogoutUrl => commands::urls::logout_url(config),
            Self::Exchange { code, ip } => commands::session::exchange(config, code, *ip).await,
            Self::Userinfo { access_token } => {
                commands::session::userinfo(config, access_token).await
            }
            Self::Refresh {
                user_id,
                refresh_token,
            } => commands::session::refresh(config, *user_id, refresh_token).await,
            Self::History { user_id, limit } => {
                commands::history::list(config, *user_id, *limit).await
            }
            Self::PruneHistory { days, force } => {
                commands::history::prune(config, *days, *force).await
            }
            Self::Migrate => commands::db::migrate(config).await,
        }
    }
}
