//! Voice-break song location
//!
//! Given a resolved slot sequence and a checkpoint position, finds the
//! nearest preceding and following song slots. Either may be absent (a
//! checkpoint at the top of the hour has no preceding song); the prompt
//! builder degrades to a generic, song-agnostic break.

use crate::types::{ResolvedSlot, SongRef};

/// Songs bracketing one voice-break checkpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocatedSongs {
    pub previous: Option<SongRef>,
    pub next: Option<SongRef>,
}

/// Scan backward from `position - 1` for the nearest resolved song and
/// forward from `position + 1` for the next one.
///
/// Scans run over template positions, not vec indices: clock patterns may
/// have position gaps.
pub fn locate_songs(slots: &[ResolvedSlot], position: i64) -> LocatedSongs {
    let previous = slots
        .iter()
        .rev()
        .filter(|rs| rs.slot.position < position)
        .find_map(|rs| rs.song.clone());

    let next = slots
        .iter()
        .filter(|rs| rs.slot.position > position)
        .find_map(|rs| rs.song.clone());

    LocatedSongs { previous, next }
}
