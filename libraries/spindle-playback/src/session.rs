//! Playback session event loop
//!
//! One task owns the controller and the download coordinator. Every input
//! (user commands, engine notifications, ticks, download outcomes, catalog
//! results) arrives over a channel and is handled to completion before the
//! next one, so no state is ever shared or locked.
//!
//! Helper tasks (catalog load, download pass, ticker) are held in
//! [`ScopedTask`] guards that abort the task when dropped; every way out of
//! [`PlaybackSession::run`] drops them and stops the engine.

use crate::{
    controller::PlaybackController,
    downloads::{download_all, DownloadCoordinator, DownloadOutcome},
    engine::{AudioEngine, EngineNotification},
    events::PlaybackEvent,
    transport::{dispatch, TransportAction},
    types::PlaybackConfig,
    view::PlayerView,
};
use spindle_core::{normalize, CachedIdsSource, CatalogSource, Song, SongFetcher, SongId};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

/// Redirect target used when none is configured
pub const DEFAULT_REDIRECT_TARGET: &str = "/";

/// User-side input to a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Select a song from the list
    Select(SongId),
    Transport(TransportAction),
    Seek(Duration),
    SetVolume(u8),
    /// Fetch the playlist again
    Reload,
    /// The view is about to be left
    NavigateAway,
}

/// Where to send the user after a fatal catalog failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub auth_timed_out: bool,
}

/// Output of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// The song list arrived or a song became playable
    SongsChanged(Vec<Song>),
    Playback(PlaybackEvent),
    /// Display snapshot, sent only when it differs from the previous one
    View(PlayerView),
    /// A command could not be carried out
    Rejected { reason: String },
    Redirect(Redirect),
}

/// Why [`PlaybackSession::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    NavigatedAway,
    CatalogFailed,
    /// Every [`SessionHandle`] was dropped
    HandleDropped,
}

/// External collaborators of a session
#[derive(Clone)]
pub struct SessionSources {
    pub catalog: Arc<dyn CatalogSource>,
    pub cached_ids: Arc<dyn CachedIdsSource>,
    pub fetcher: Arc<dyn SongFetcher>,
}

/// Per-session settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub playlist_id: String,
    pub playback: PlaybackConfig,
    pub redirect_target: String,
}

impl SessionSettings {
    pub fn new(playlist_id: impl Into<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            playback: PlaybackConfig::default(),
            redirect_target: DEFAULT_REDIRECT_TARGET.to_string(),
        }
    }

    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_redirect_target(mut self, target: impl Into<String>) -> Self {
        self.redirect_target = target.into();
        self
    }
}

/// Cloneable command side of a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Send a command; returns `false` once the session has ended
    pub fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn select(&self, id: impl Into<SongId>) -> bool {
        self.send(SessionCommand::Select(id.into()))
    }

    pub fn transport(&self, action: TransportAction) -> bool {
        self.send(SessionCommand::Transport(action))
    }

    pub fn seek(&self, position: Duration) -> bool {
        self.send(SessionCommand::Seek(position))
    }

    pub fn set_volume(&self, level: u8) -> bool {
        self.send(SessionCommand::SetVolume(level))
    }

    pub fn reload(&self) -> bool {
        self.send(SessionCommand::Reload)
    }

    pub fn navigate_away(&self) -> bool {
        self.send(SessionCommand::NavigateAway)
    }
}

/// Spawned task that is aborted when the guard is dropped
#[derive(Debug)]
struct ScopedTask(AbortHandle);

impl ScopedTask {
    fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future).abort_handle())
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Messages from the session's own helper tasks
#[derive(Debug)]
enum Internal {
    CatalogLoaded {
        generation: u64,
        result: spindle_core::Result<Vec<Song>>,
    },
    DownloadAttempted {
        generation: u64,
        outcome: DownloadOutcome,
    },
    DownloadsFinished {
        generation: u64,
    },
    Tick {
        epoch: u64,
    },
}

enum Input {
    Command(Option<SessionCommand>),
    Engine(EngineNotification),
    Internal(Internal),
}

/// Fetch a playlist and the cached-id set, and build the song list
pub async fn load_catalog(
    catalog: &dyn CatalogSource,
    cached_ids: &dyn CachedIdsSource,
    playlist_id: &str,
) -> spindle_core::Result<Vec<Song>> {
    let (tracks, cached) =
        tokio::try_join!(catalog.fetch_playlist(playlist_id), cached_ids.cached_ids())?;
    Ok(normalize(&tracks, &cached))
}

/// One open playlist view
pub struct PlaybackSession<E: AudioEngine> {
    controller: PlaybackController<E>,
    downloads: DownloadCoordinator,
    sources: SessionSources,
    settings: SessionSettings,

    commands: mpsc::UnboundedReceiver<SessionCommand>,
    engine_events: mpsc::UnboundedReceiver<EngineNotification>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    internal_rx: mpsc::UnboundedReceiver<Internal>,
    updates: mpsc::UnboundedSender<SessionUpdate>,

    catalog_generation: u64,
    catalog_task: Option<ScopedTask>,
    download_task: Option<ScopedTask>,
    ticker: Option<(u64, ScopedTask)>,
    last_view: Option<PlayerView>,
}

impl<E: AudioEngine> PlaybackSession<E> {
    /// Create a session together with its command handle and update stream
    pub fn new(
        engine: E,
        sources: SessionSources,
        settings: SessionSettings,
    ) -> (Self, SessionHandle, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (engine_tx, engine_events) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (updates, updates_rx) = mpsc::unbounded_channel();

        let controller = PlaybackController::new(engine, settings.playback.clone(), engine_tx);

        let session = Self {
            controller,
            downloads: DownloadCoordinator::new(),
            sources,
            settings,
            commands,
            engine_events,
            internal_tx,
            internal_rx,
            updates,
            catalog_generation: 0,
            catalog_task: None,
            download_task: None,
            ticker: None,
            last_view: None,
        };

        (session, SessionHandle { tx: command_tx }, updates_rx)
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    /// Run until navigated away, the catalog fails, or all handles are gone
    ///
    /// The engine is stopped and every helper task aborted before returning.
    pub async fn run(mut self) -> SessionEnd {
        info!(playlist_id = %self.settings.playlist_id, "Playback session started");
        self.start_catalog_load();
        self.flush();

        let end = loop {
            let input = tokio::select! {
                command = self.commands.recv() => Input::Command(command),
                Some(notification) = self.engine_events.recv() => Input::Engine(notification),
                Some(message) = self.internal_rx.recv() => Input::Internal(message),
            };

            if let Some(end) = self.handle(input) {
                break end;
            }

            self.sync_ticker();
            self.flush();
        };

        self.shutdown();
        info!(playlist_id = %self.settings.playlist_id, ?end, "Playback session ended");
        end
    }

    fn handle(&mut self, input: Input) -> Option<SessionEnd> {
        match input {
            Input::Command(None) => Some(SessionEnd::HandleDropped),
            Input::Command(Some(command)) => self.handle_command(command),
            Input::Engine(notification) => {
                let result = self.controller.on_engine_event(notification);
                self.report(result);
                None
            }
            Input::Internal(message) => self.handle_internal(message),
        }
    }

    fn handle_command(&mut self, command: SessionCommand) -> Option<SessionEnd> {
        debug!(?command, "Session command");

        match command {
            SessionCommand::Select(id) => {
                let result = self.controller.select_song(&id);
                self.report(result);
            }
            SessionCommand::Transport(action) => {
                let result = dispatch(&mut self.controller, action);
                self.report(result);
            }
            SessionCommand::Seek(position) => self.controller.seek(position),
            SessionCommand::SetVolume(level) => self.controller.set_volume(level),
            SessionCommand::Reload => self.start_catalog_load(),
            SessionCommand::NavigateAway => {
                info!("Navigating away, stopping playback");
                return Some(SessionEnd::NavigatedAway);
            }
        }

        None
    }

    fn handle_internal(&mut self, message: Internal) -> Option<SessionEnd> {
        match message {
            Internal::CatalogLoaded { generation, result } => {
                if generation != self.catalog_generation {
                    debug!(generation, "Ignoring superseded catalog load");
                    return None;
                }
                self.catalog_task = None;

                match result {
                    Ok(songs) => {
                        info!(
                            playlist_id = %self.settings.playlist_id,
                            count = songs.len(),
                            "Playlist loaded"
                        );
                        self.controller.replace_songs(songs);
                        self.downloads.catalog_arrived();
                        self.songs_changed();
                    }
                    Err(e) => {
                        error!(
                            playlist_id = %self.settings.playlist_id,
                            error = %e,
                            "Playlist fetch failed"
                        );
                        self.emit(SessionUpdate::Redirect(Redirect {
                            target: self.settings.redirect_target.clone(),
                            auth_timed_out: true,
                        }));
                        return Some(SessionEnd::CatalogFailed);
                    }
                }
            }
            Internal::DownloadAttempted {
                generation,
                outcome,
            } => {
                if self.downloads.record_attempt(generation, &outcome)
                    && self.controller.mark_cached(&outcome.song_id)
                {
                    self.songs_changed();
                }
            }
            Internal::DownloadsFinished { generation } => {
                if generation == self.downloads.generation() {
                    info!(generation, "Download pass finished");
                    self.download_task = None;
                }
            }
            Internal::Tick { epoch } => {
                if !self.controller.on_tick(epoch) {
                    debug!(epoch, "Dropped tick from a closed epoch");
                }
            }
        }

        None
    }

    /// Publish the list and offer it to the download coordinator
    ///
    /// Only a catalog arrival arms the coordinator, so lists produced by
    /// marking songs cached never start a second pass.
    fn songs_changed(&mut self) {
        self.emit(SessionUpdate::SongsChanged(self.controller.songs().to_vec()));

        let Some(plan) = self.downloads.take_plan(self.controller.songs()) else {
            return;
        };
        if plan.is_empty() {
            self.download_task = None;
            return;
        }

        let fetcher = Arc::clone(&self.sources.fetcher);
        let tx = self.internal_tx.clone();
        let generation = plan.generation;

        self.download_task = Some(ScopedTask::spawn(async move {
            download_all(fetcher.as_ref(), &plan.songs, |outcome| {
                let _ = tx.send(Internal::DownloadAttempted {
                    generation,
                    outcome: outcome.clone(),
                });
            })
            .await;
            let _ = tx.send(Internal::DownloadsFinished { generation });
        }));
    }

    fn start_catalog_load(&mut self) {
        self.catalog_generation += 1;
        let generation = self.catalog_generation;

        let catalog = Arc::clone(&self.sources.catalog);
        let cached_ids = Arc::clone(&self.sources.cached_ids);
        let playlist_id = self.settings.playlist_id.clone();
        let tx = self.internal_tx.clone();

        debug!(%playlist_id, generation, "Loading playlist");
        self.catalog_task = Some(ScopedTask::spawn(async move {
            let result = load_catalog(catalog.as_ref(), cached_ids.as_ref(), &playlist_id).await;
            let _ = tx.send(Internal::CatalogLoaded { generation, result });
        }));
    }

    /// Keep the ticker task in step with the controller's open epoch
    fn sync_ticker(&mut self) {
        let wanted = self.controller.ticker_epoch();
        let running = self.ticker.as_ref().map(|(epoch, _)| *epoch);
        if wanted == running {
            return;
        }

        self.ticker = wanted.map(|epoch| (epoch, self.spawn_ticker(epoch)));
    }

    fn spawn_ticker(&self, epoch: u64) -> ScopedTask {
        let period = self.controller.config().tick_interval();
        let tx = self.internal_tx.clone();

        ScopedTask::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(Internal::Tick { epoch }).is_err() {
                    break;
                }
            }
        })
    }

    fn report(&mut self, result: crate::error::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "Command rejected");
            self.emit(SessionUpdate::Rejected {
                reason: e.to_string(),
            });
        }
    }

    fn flush(&mut self) {
        for event in self.controller.drain_events() {
            self.emit(SessionUpdate::Playback(event));
        }

        let view = PlayerView::project(&self.controller);
        if self.last_view.as_ref() != Some(&view) {
            self.last_view = Some(view.clone());
            self.emit(SessionUpdate::View(view));
        }
    }

    fn emit(&self, update: SessionUpdate) {
        // The receiver may be gone during shutdown
        let _ = self.updates.send(update);
    }

    fn shutdown(&mut self) {
        self.controller.teardown();
        self.ticker = None;
        self.download_task = None;
        self.catalog_task = None;
        self.flush();
    }
}
