use std::io::ErrorKind;
use std::process::Stdio;

use anyhow::{Result, bail};
use tokio::process::Command;
use tracing::{debug, info};

const STREAMLINK: &str = "streamlink";
const STREAM_QUALITY: &str = "best";

pub trait Player {
    fn play(&self, channel: &str) -> impl Future<Output = Result<()>>;
}

/// Launches `streamlink` and waits for it; its exit status is not our concern.
pub struct Streamlink;

impl Player for Streamlink {
    async fn play(&self, channel: &str) -> Result<()> {
        let args = stream_args(channel);
        info!(channel, "starting {STREAMLINK}");

        let status = Command::new(STREAMLINK)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) => {
                debug!(%status, "{STREAMLINK} exited");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                bail!("`{STREAMLINK}` not found on PATH. Please install it.")
            }
            Err(err) => bail!("Failed to execute `{STREAMLINK}`: {err}"),
        }
    }
}

pub fn stream_args(channel: &str) -> [String; 2] {
    [format!("twitch.tv/{channel}"), STREAM_QUALITY.to_string()]
}
