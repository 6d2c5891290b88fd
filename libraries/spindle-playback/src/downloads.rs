//! Background download coordination
//!
//! Downloads run one at a time in playlist order and never more than once per
//! song per playlist load. Scheduling is driven by a one-shot flag armed only
//! when a fresh list arrives from the catalog: list updates produced by
//! marking songs cached do not re-arm it, so they cannot start another pass.

use spindle_core::{Song, SongFetcher, SongId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result of one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    Fetched,
    Failed(String),
}

/// One attempted song and how it went
///
/// Either way the song counts as attempted and is marked cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub song_id: SongId,
    pub result: DownloadResult,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        self.result == DownloadResult::Fetched
    }
}

/// Songs to download for one catalog arrival
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadPlan {
    /// Coordinator generation the plan belongs to
    pub generation: u64,

    /// Uncached, unattempted songs in playlist order
    pub songs: Vec<Song>,
}

impl DownloadPlan {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Download scheduling state for one playback session
#[derive(Debug, Default)]
pub struct DownloadCoordinator {
    newly_available: bool,
    generation: u64,
    attempted: HashSet<SongId>,
}

impl DownloadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh song list arrived from the catalog
    ///
    /// Arms the one-shot flag and starts a new generation; outcomes of any
    /// earlier plan are ignored from now on. Songs attempted earlier in the
    /// session are never planned again.
    pub fn catalog_arrived(&mut self) {
        self.newly_available = true;
        self.generation += 1;
        debug!(generation = self.generation, "Download pass armed");
    }

    /// Consume the flag and plan the pass
    ///
    /// Returns `None` unless a catalog list arrived since the last call.
    pub fn take_plan(&mut self, songs: &[Song]) -> Option<DownloadPlan> {
        if !std::mem::take(&mut self.newly_available) {
            return None;
        }

        let songs: Vec<Song> = songs
            .iter()
            .filter(|song| !song.is_cached() && !self.attempted.contains(&song.id))
            .cloned()
            .collect();

        info!(
            generation = self.generation,
            pending = songs.len(),
            "Download pass planned"
        );

        Some(DownloadPlan {
            generation: self.generation,
            songs,
        })
    }

    /// Record an attempt; returns `false` for a superseded generation
    pub fn record_attempt(&mut self, generation: u64, outcome: &DownloadOutcome) -> bool {
        if generation != self.generation {
            debug!(
                song_id = %outcome.song_id,
                generation,
                current = self.generation,
                "Ignoring download outcome from an earlier pass"
            );
            return false;
        }

        self.attempted.insert(outcome.song_id.clone());
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.newly_available
    }

    pub fn was_attempted(&self, id: &SongId) -> bool {
        self.attempted.contains(id)
    }
}

/// Download every uncached song, strictly one after another
///
/// `on_attempt` runs after each attempt, success or failure.
pub async fn download_all<F>(
    fetcher: &dyn SongFetcher,
    songs: &[Song],
    mut on_attempt: F,
) -> Vec<DownloadOutcome>
where
    F: FnMut(&DownloadOutcome),
{
    let mut outcomes = Vec::new();

    for song in songs.iter().filter(|song| !song.is_cached()) {
        let result = match fetcher.fetch_song(&song.id).await {
            Ok(()) => {
                info!(song_id = %song.id, title = %song.title, "Song downloaded");
                DownloadResult::Fetched
            }
            Err(e) => {
                warn!(song_id = %song.id, error = %e, "Song download failed");
                DownloadResult::Failed(e.to_string())
            }
        };

        let outcome = DownloadOutcome {
            song_id: song.id.clone(),
            result,
        };
        on_attempt(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}
