use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use crate::config::{self, Config};

const TWITCH_AUTHORIZE_URL: &str = "https://api.twitch.tv/kraken/oauth2/authorize/";
const TWITCH_CLIENT_ID: &str = "e0fm2z7ufk73k2jnkm21y0gp1h9q2o";
const TWITCH_REDIRECT_URI: &str = "https://butt4cak3.github.io/twitch-cli/oauth.html";

#[derive(Debug, Args)]
#[command(about = "Authenticate with Twitch")]
pub struct AuthArgs {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    AlreadyAuthenticated,
    Authenticated,
    Cancelled,
}

pub fn run(_args: AuthArgs, config: &mut Config, config_path: &Path) -> Result<()> {
    let outcome = run_with(config, config_path, authenticate)?;
    let message = match outcome {
        AuthOutcome::Authenticated => outcome.message().green(),
        AuthOutcome::AlreadyAuthenticated | AuthOutcome::Cancelled => outcome.message().yellow(),
    };
    println!("{message}");
    Ok(())
}

impl AuthOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::AlreadyAuthenticated => "You are already authenticated.",
            Self::Authenticated => "Authentication complete.",
            Self::Cancelled => "Authentication cancelled.",
        }
    }
}

/// Stores the token produced by `authenticator` unless a token is already
/// present. The config file is only written on success.
pub fn run_with<F>(config: &mut Config, config_path: &Path, authenticator: F) -> Result<AuthOutcome>
where
    F: FnOnce() -> Result<String>,
{
    if config.is_authenticated() {
        return Ok(AuthOutcome::AlreadyAuthenticated);
    }

    let token = authenticator()?;
    if token.is_empty() {
        return Ok(AuthOutcome::Cancelled);
    }

    config.oauth = token;
    config::save_config(config_path, config)?;
    debug!(path = %config_path.display(), "stored OAuth token");
    Ok(AuthOutcome::Authenticated)
}

pub fn authorize_url() -> Result<reqwest::Url> {
    let mut url =
        reqwest::Url::parse(TWITCH_AUTHORIZE_URL).context("failed to build Twitch authorize URL")?;
    url.query_pairs_mut()
        .append_pair("client_id", TWITCH_CLIENT_ID)
        .append_pair("redirect_uri", TWITCH_REDIRECT_URI)
        .append_pair("response_type", "token")
        .append_pair("scope", "");
    Ok(url)
}

/// Opens the authorize page and reads the token the redirect page shows.
pub fn authenticate() -> Result<String> {
    let url = authorize_url()?;
    if let Err(err) = open::that(url.as_str()) {
        debug!(%err, "failed to open browser");
        println!("Couldn't open a browser. Open this URL in your browser to continue:");
        println!("{url}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    read_token(&mut stdin.lock(), &mut stdout)
}

fn read_token<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "OAuth token: ").context("failed to write output")?;
    out.flush().ok();

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}
