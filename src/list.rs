use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::streamlink::{Player, Streamlink};
use crate::twitch::{KrakenClient, Stream, StreamSource};

#[derive(Debug, Args, Default)]
#[command(about = "List followed channels")]
pub struct ListArgs {
    #[arg(short, long, help = "Print only channel names, one per line, without prompting")]
    pub flat: bool,
}

pub async fn run(args: ListArgs, config: &Config, config_path: &Path) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    list_followed(
        args,
        config,
        config_path,
        &KrakenClient::new()?,
        &Streamlink,
        &mut input,
        &mut out,
    )
    .await?;
    Ok(())
}

/// Lists followed streams and, outside flat mode, plays the one picked.
/// Returns the channel that was played, if any.
pub async fn list_followed<S, P, R, W>(
    args: ListArgs,
    config: &Config,
    config_path: &Path,
    source: &S,
    player: &P,
    input: &mut R,
    out: &mut W,
) -> Result<Option<String>>
where
    S: StreamSource,
    P: Player,
    R: BufRead,
    W: Write,
{
    if !config.is_authenticated() {
        bail!(
            "You have to provide a Twitch OAuth token to list followed streams.\n\
             Run `twitch-cli auth` or look at the configuration file at {}",
            config_path.display()
        );
    }

    let streams = source.followed_streams(&config.oauth).await?;
    debug!(count = streams.len(), "fetched followed streams");

    for line in render(&streams, args.flat) {
        writeln!(out, "{line}").context("failed to write output")?;
    }

    if args.flat {
        return Ok(None);
    }

    write!(out, "Stream ID: ").context("failed to write output")?;
    out.flush().ok();

    let mut raw = Vec::new();
    input
        .read_until(b'\n', &mut raw)
        .context("failed to read input")?;
    let line = String::from_utf8_lossy(&raw);

    let Some(index) = parse_selection(&line, streams.len()) else {
        debug!(input = line.trim(), "no stream selected");
        return Ok(None);
    };

    let channel = streams[index].channel.name.clone();
    player.play(&channel).await?;
    Ok(Some(channel))
}

/// Detailed mode numbers each stream from 1 and aligns the detail line under
/// the display name. Flat mode is just the channel names.
pub fn render(streams: &[Stream], flat: bool) -> Vec<String> {
    if flat {
        return streams
            .iter()
            .map(|stream| stream.channel.name.clone())
            .collect();
    }

    let index_width = streams.len().to_string().len() + 2;
    let indent = " ".repeat(index_width + 1);

    let mut lines = vec!["Streams online now:".to_string(), String::new()];
    for (idx, stream) in streams.iter().enumerate() {
        let channel = &stream.channel;
        lines.push(format!(
            "{:>index_width$} {}: {}",
            format!("[{}]", idx + 1),
            channel.display_name,
            channel.status
        ));
        lines.push(format!(
            "{indent}{} playing {} for {} viewers",
            channel.name, channel.game, stream.viewers
        ));
        lines.push(String::new());
    }
    lines
}

/// Maps a 1-based answer to an index; anything else means no selection.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(value) if (1..=count).contains(&value) => Some(value - 1),
        _ => None,
    }
}
