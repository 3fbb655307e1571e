use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod auth;
mod config;
mod fs_utils;
mod list;
mod paths;
mod play;
mod streamlink;
mod twitch;

#[derive(Debug, Parser)]
#[command(
    name = "twitch-cli",
    version,
    about = "List or play Twitch streams.",
    long_about = "twitch-cli lists the live streams you follow on Twitch and plays the one you pick with streamlink. Without a command it behaves like `list`."
)]
struct Cli {
    #[arg(short, long, global = true, help = "Print debug logs to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    List(list::ListArgs),
    Play(play::PlayArgs),
    Auth(auth::AuthArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = config::config_path()?;
    let mut config = config::load_config(&config_path)?;

    match cli.command.unwrap_or(Commands::List(list::ListArgs::default())) {
        Commands::List(args) => list::run(args, &config, &config_path).await,
        Commands::Play(args) => play::run(args, &streamlink::Streamlink).await,
        Commands::Auth(args) => auth::run(args, &mut config, &config_path),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("twitch_cli=debug")
    } else {
        EnvFilter::try_from_env("TWITCH_CLI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
