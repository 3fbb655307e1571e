use anyhow::{Context, Result, bail};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

const KRAKEN_API_ENDPOINT: &str = "https://api.twitch.tv/kraken";
const KRAKEN_ACCEPT: &str = "application/vnd.twitchtv.v5+json";

pub const API_FAILURE: &str = "Something went wrong while trying to fetch data from the Twitch API";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub name: String,
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub game: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stream {
    pub channel: Channel,
    pub viewers: u64,
}

#[derive(Debug, Deserialize)]
struct FollowedResponse {
    streams: Option<Vec<Stream>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that can produce the streams a token's user follows.
pub trait StreamSource {
    fn followed_streams(&self, token: &str) -> impl Future<Output = Result<Vec<Stream>>>;
}

pub struct KrakenClient {
    http: reqwest::Client,
}

impl KrakenClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build Twitch API client")?;
        Ok(Self { http })
    }
}

impl StreamSource for KrakenClient {
    async fn followed_streams(&self, token: &str) -> Result<Vec<Stream>> {
        let url = followed_streams_url();
        debug!(%url, "requesting followed streams");

        let res = self
            .http
            .get(&url)
            .header(ACCEPT, KRAKEN_ACCEPT)
            .header(AUTHORIZATION, format!("OAuth {token}"))
            .send()
            .await
            .context("failed to send Twitch request")?;

        let status = res.status();
        debug!(%status, "Twitch responded");

        let body = res
            .text()
            .await
            .context("failed to read Twitch response")?;
        parse_followed_streams(&body)
    }
}

fn followed_streams_url() -> String {
    format!("{KRAKEN_API_ENDPOINT}/streams/followed")
}

/// A body without a `streams` array is a failure, whatever the cause was.
pub fn parse_followed_streams(body: &str) -> Result<Vec<Stream>> {
    let response: FollowedResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(err) => {
            debug!(%err, "unexpected Twitch response body");
            bail!(API_FAILURE);
        }
    };

    match response.streams {
        Some(streams) => Ok(streams),
        None => bail!(API_FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn followed_streams_endpoint() {
        assert_eq!(
            followed_streams_url(),
            "https://api.twitch.tv/kraken/streams/followed"
        );
    }

    #[test]
    fn parses_followed_streams() {
        let body = r#"{"_total": 1, "streams": [{"channel": {"name": "foo", "display_name": "Foo", "status": "Playing", "game": "Game"}, "viewers": 10}]}"#;
        let streams = parse_followed_streams(body).unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].channel.name, "foo");
        assert_eq!(streams[0].channel.display_name, "Foo");
        assert_eq!(streams[0].viewers, 10);
    }

    #[test]
    fn null_status_and_game_become_empty() {
        let body = r#"{"streams": [{"channel": {"name": "foo", "display_name": "Foo", "status": null, "game": null}, "viewers": 0}]}"#;
        let streams = parse_followed_streams(body).unwrap();
        assert_eq!(streams[0].channel.status, "");
        assert_eq!(streams[0].channel.game, "");
    }

    #[test]
    fn missing_streams_key_is_a_failure() {
        let body = r#"{"error": "Unauthorized", "status": 401, "message": "invalid oauth token"}"#;
        let err = parse_followed_streams(body).unwrap_err();
        assert_eq!(err.to_string(), API_FAILURE);
    }

    #[test]
    fn non_json_body_is_a_failure() {
        let err = parse_followed_streams("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), API_FAILURE);
    }

    #[test]
    fn empty_stream_list_is_fine() {
        assert!(parse_followed_streams(r#"{"streams": []}"#).unwrap().is_empty());
    }
}
