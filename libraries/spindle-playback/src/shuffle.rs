//! Shuffle pick for the next song
//!
//! Uniform choice among playable songs, avoiding the one that just finished
//! whenever there is anything else to choose.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use spindle_core::SongId;

/// Pick the next song using the thread-local RNG
pub fn pick_next(playable: &[SongId], just_finished: Option<&SongId>) -> Option<SongId> {
    pick_next_with(&mut thread_rng(), playable, just_finished)
}

/// Pick the next song with a caller-supplied RNG
///
/// Returns `None` only when nothing is playable. With a single playable song
/// that song is returned even if it just finished.
pub fn pick_next_with<R: Rng + ?Sized>(
    rng: &mut R,
    playable: &[SongId],
    just_finished: Option<&SongId>,
) -> Option<SongId> {
    let candidates: Vec<&SongId> = playable
        .iter()
        .filter(|id| Some(*id) != just_finished)
        .collect();

    if candidates.is_empty() {
        return playable.first().cloned();
    }

    candidates.choose(rng).map(|id| (*id).clone())
}
