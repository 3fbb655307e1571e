use anyhow::Result;
use clap::Args;

use crate::streamlink::Player;

#[derive(Debug, Args)]
#[command(about = "Play a stream")]
pub struct PlayArgs {
    #[arg(value_name = "CHANNEL", help = "Channel name")]
    pub channel: String,
}

/// Plays the channel as given; no lookup against the API happens first.
pub async fn run<P: Player>(args: PlayArgs, player: &P) -> Result<()> {
    player.play(&args.channel).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingPlayer(RefCell<Vec<String>>);

    impl Player for RecordingPlayer {
        async fn play(&self, channel: &str) -> Result<()> {
            self.0.borrow_mut().push(channel.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn plays_the_given_channel() {
        let player = RecordingPlayer::default();
        run(
            PlayArgs {
                channel: "doesnotexist".to_string(),
            },
            &player,
        )
        .await
        .unwrap();
        assert_eq!(*player.0.borrow(), vec!["doesnotexist".to_string()]);
    }
}
