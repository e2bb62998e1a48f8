/// Tune Stream - command-line client
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tune_cli::{CliConfig, PlaySource, SimulatedBackend};
use tune_core::{Identity, MusicGateway, Track, TrackId, TuneError, User};
use tune_playback::{EngineEvent, MusicPlayer, PlayerNotice, TransportStatus};
use tune_server_client::TuneServerClient;

/// Simulated seconds advanced per tick of `tune play`
const TICK_SECONDS: f64 = 1.0;

#[derive(Parser)]
#[command(name = "tune")]
#[command(about = "Tune Stream command-line client", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./tune.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL
    #[arg(long, env = "TUNE_SERVER_URL", global = true)]
    server_url: Option<String>,

    /// Bearer token for the signed-in user
    #[arg(long, env = "TUNE_ACCESS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most played tracks
    Top {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List suggested tracks
    Suggested {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the signed-in user
    Whoami,
    /// List liked tracks
    Likes,
    /// Like a track
    Like { id: i64 },
    /// Remove a like
    Unlike { id: i64 },
    /// List your playlists
    Playlists,
    /// Play a queue on a simulated device
    Play {
        /// top, suggested, or playlist:<id>
        #[arg(short, long, default_value = "top")]
        source: PlaySource,

        /// Stop after this many tracks have finished
        #[arg(short, long, default_value_t = 3)]
        tracks: usize,

        /// Simulated seconds per real second
        #[arg(long, default_value_t = 60.0)]
        speed: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tune=info,tune_cli=info,tune_playback=info,tune_server_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server_url {
        config.server.url = url;
    }
    if let Some(token) = cli.token {
        config.server.access_token = Some(token);
    }
    config.validate()?;

    tracing::debug!(url = %config.server.url, "Using server");
    let client = Arc::new(TuneServerClient::new(config.server_config())?);

    match cli.command {
        Commands::Top { limit } => {
            let tracks = client.fetch_top(limit.unwrap_or(config.player.top_limit)).await?;
            print_tracks(&tracks);
        }
        Commands::Suggested { limit } => {
            let identity = resolve_identity(&client).await;
            let tracks = client
                .fetch_suggested(
                    identity.user_id(),
                    limit.unwrap_or(config.player.suggested_limit),
                )
                .await?;
            print_tracks(&tracks);
        }
        Commands::Whoami => {
            let user = require_user(&client).await?;
            println!("{} ({})", user.display_name(), user.id);
        }
        Commands::Likes => {
            let user = require_user(&client).await?;
            let liked = client.fetch_user_likes(&user.id).await?;
            let tracks: Vec<Track> = client
                .fetch_tracks()
                .await?
                .into_iter()
                .filter(|t| liked.contains(&t.id))
                .collect();
            print_tracks(&tracks);
        }
        Commands::Like { id } => {
            require_user(&client).await?;
            match client.like(TrackId::new(id)).await {
                Ok(_) => println!("{}", notice_line(&PlayerNotice::Liked { track_id: TrackId::new(id) })),
                Err(TuneError::LikeConflict(track_id)) => {
                    println!("{}", notice_line(&PlayerNotice::AlreadyLiked { track_id }));
                }
                Err(e) => return Err(e).context("Failed to like song"),
            }
        }
        Commands::Unlike { id } => {
            require_user(&client).await?;
            client
                .unlike(TrackId::new(id))
                .await
                .context("Failed to unlike song")?;
            println!("{}", notice_line(&PlayerNotice::Unliked { track_id: TrackId::new(id) }));
        }
        Commands::Playlists => {
            let user = require_user(&client).await?;
            for playlist in client.fetch_playlists(&user.id).await? {
                println!("{:>5}  {}", playlist.id.get(), playlist.name);
            }
        }
        Commands::Play {
            source,
            tracks,
            speed,
        } => {
            if !(speed.is_finite() && speed > 0.0) {
                anyhow::bail!("--speed must be a positive number");
            }
            play(client, &config, source, tracks, speed).await?;
        }
    }

    Ok(())
}

async fn resolve_identity(client: &TuneServerClient) -> Identity {
    if !client.is_authenticated().await {
        return Identity::Anonymous;
    }

    match client.current_user().await {
        Ok(user) => Identity::authenticated(user.id),
        Err(e) => {
            tracing::warn!(error = %e, "Token rejected, continuing anonymously");
            Identity::Anonymous
        }
    }
}

async fn require_user(client: &TuneServerClient) -> anyhow::Result<User> {
    if !client.is_authenticated().await {
        anyhow::bail!("Sign in required (set TUNE_ACCESS_TOKEN or pass --token)");
    }
    Ok(client.current_user().await?)
}

async fn play(
    client: Arc<TuneServerClient>,
    config: &CliConfig,
    source: PlaySource,
    tracks: usize,
    speed: f64,
) -> anyhow::Result<()> {
    let identity = resolve_identity(&client).await;
    let authenticated = identity.is_authenticated();

    let gateway: Arc<dyn MusicGateway> = client;
    let mut player = MusicPlayer::new(SimulatedBackend::new(), gateway, config.player.clone());
    player.set_identity(identity);
    if authenticated {
        if let Err(e) = player.refresh_likes().await {
            tracing::warn!(error = %e, "Could not load liked songs");
        }
    }

    let events = player.subscribe();

    let started = match source {
        PlaySource::Top => {
            let queue = player.top().await?;
            start_queue(&mut player, queue)
        }
        PlaySource::Suggested => {
            let queue = player.suggested().await?;
            start_queue(&mut player, queue)
        }
        PlaySource::Playlist(id) => player.play_playlist(id, None).await?,
    };
    if !started {
        println!("Nothing to play from {source}");
        return Ok(());
    }

    let interval = Duration::from_secs_f64(TICK_SECONDS / speed);
    let mut finished = 0;

    loop {
        for event in events.try_iter() {
            match event {
                EngineEvent::Loaded { .. } => {
                    if let Some(track) = player.current_track() {
                        let liked = if player.is_liked() { " ♥" } else { "" };
                        println!(
                            "▶ [{}/{}] {} - {} ({}){liked}",
                            player.current_index() + 1,
                            player.queue().len(),
                            track.artist,
                            track.title,
                            format_duration(track.duration)
                        );
                    }
                }
                EngineEvent::Ended { token } => {
                    finished += 1;
                    tracing::debug!(track_id = %token.track_id, finished, "Finished track");
                }
                _ => {}
            }
        }

        for notice in player.drain_notices() {
            println!("{}", notice_line(&notice));
        }

        if finished >= tracks {
            break;
        }
        if player.status() != TransportStatus::Playing {
            tracing::info!("Playback stopped");
            break;
        }

        tokio::time::sleep(interval).await;

        let duration = player.current_track().map_or(0.0, Track::duration_secs);
        let media_events = player.backend().tick(TICK_SECONDS, duration);
        for event in media_events {
            player.handle_media_event(event);
        }
    }

    println!("Played {finished} track(s)");
    Ok(())
}

/// Play the first track with the whole list as queue
fn start_queue(player: &mut MusicPlayer<SimulatedBackend>, tracks: Vec<Track>) -> bool {
    let Some(first) = tracks.first().cloned() else {
        return false;
    };
    player.play_track(first, Some(tracks));
    true
}

fn notice_line(notice: &PlayerNotice) -> String {
    let marker = if notice.is_error() { "✗" } else { "•" };
    format!("{marker} {}: {}", notice.title(), notice.description())
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks");
        return;
    }

    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:>3}. [{:>4}] {} - {} ({}, {} plays)",
            i + 1,
            track.id.get(),
            track.artist,
            track.title,
            format_duration(track.duration),
            track.play_count()
        );
    }
}

fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
