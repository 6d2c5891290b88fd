/// Spindle - play a streaming-service playlist from the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use spindle_cli::{console::HELP, parse_line, ClockEngine, ConsoleCommand, Display, PlayerConfig};
use spindle_client::{CacheServerClient, CatalogClient};
use spindle_playback::{PlaybackSession, SessionEnd, SessionSettings, SessionSources};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spindle")]
#[command(about = "Play streaming-service playlists with a local song cache", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the current user's playlists
    Playlists {
        /// API access token
        #[arg(short, long, env = "SPINDLE_TOKEN")]
        token: String,
    },
    /// Open a playlist and control playback from stdin
    Play {
        /// Playlist id
        playlist_id: String,

        /// API access token
        #[arg(short, long, env = "SPINDLE_TOKEN")]
        token: String,

        /// Name shown while nothing is playing
        #[arg(short, long)]
        name: Option<String>,

        /// Refuse to play songs whose audio file is missing
        #[arg(long)]
        check_files: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spindle=info,spindle_cli=info,spindle_playback=info,spindle_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Playlists { token } => list_playlists(&config, &token).await,
        Commands::Play {
            playlist_id,
            token,
            name,
            check_files,
        } => {
            let name = name.unwrap_or_else(|| playlist_id.clone());
            play(&config, &playlist_id, &token, &name, check_files).await
        }
    }
}

async fn list_playlists(config: &PlayerConfig, token: &str) -> anyhow::Result<()> {
    let catalog = CatalogClient::new(&config.catalog, token)?;
    let playlists = catalog
        .user_playlists()
        .await
        .context("failed to fetch playlists")?;

    for playlist in playlists {
        let tracks = playlist
            .track_count
            .map(|count| format!(" ({count} tracks)"))
            .unwrap_or_default();
        println!("{}  {}{}", playlist.id, playlist.name, tracks);
    }

    Ok(())
}

async fn play(
    config: &PlayerConfig,
    playlist_id: &str,
    token: &str,
    name: &str,
    check_files: bool,
) -> anyhow::Result<()> {
    let catalog = Arc::new(CatalogClient::new(&config.catalog, token)?);
    let cache = Arc::new(CacheServerClient::new(&config.cache)?);
    let sources = SessionSources {
        catalog,
        cached_ids: cache.clone(),
        fetcher: cache,
    };

    let settings = SessionSettings::new(playlist_id)
        .with_playback(config.playback.clone())
        .with_redirect_target(config.navigation.redirect_target.clone());

    let (session, handle, mut updates) =
        PlaybackSession::new(ClockEngine::new(check_files), sources, settings);
    let mut session_task = tokio::spawn(session.run());

    tracing::info!(playlist_id, "Opening playlist");
    println!("{HELP}");

    let mut display = Display::new(name);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let end = loop {
        tokio::select! {
            end = &mut session_task => break end?,
            Some(update) = updates.recv() => {
                for line in display.apply(&update) {
                    println!("{line}");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                handle.navigate_away();
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    handle.navigate_away();
                    continue;
                };

                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(ConsoleCommand::Session(command))) => {
                        handle.send(command);
                    }
                    Ok(Some(ConsoleCommand::List)) => {
                        for line in display.song_list() {
                            println!("{line}");
                        }
                    }
                    Ok(Some(ConsoleCommand::Status)) => println!("{}", display.status()),
                    Ok(Some(ConsoleCommand::Help)) => println!("{HELP}"),
                    Ok(Some(ConsoleCommand::Quit)) => {
                        handle.navigate_away();
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
    };

    // Print whatever the session emitted on its way out
    while let Ok(update) = updates.try_recv() {
        for line in display.apply(&update) {
            println!("{line}");
        }
    }

    tracing::info!(?end, "Session closed");
    match end {
        SessionEnd::CatalogFailed => anyhow::bail!("playlist {playlist_id} could not be loaded"),
        SessionEnd::NavigatedAway | SessionEnd::HandleDropped => Ok(()),
    }
}
