//! Candidate pool building
//!
//! Loads the station's active catalog and the playback-history window the
//! cooldown rules need, then indexes everything for per-slot filtering.
//! Loading has no side effects and degrades to an empty pool (the hour
//! resolves with unfilled music slots) rather than failing.

use crate::config::ProgramConfig;
use crate::error::EngineResult;
use crate::store::LibraryStore;
use crate::types::{RotationCategory, Song};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Candidate songs for one hour resolution, indexed by rotation category
#[derive(Debug, Default)]
pub struct CandidatePool {
    by_category: HashMap<RotationCategory, Vec<Song>>,
    /// Most recent qualifying play per song within the history window
    last_played: HashMap<Uuid, DateTime<Utc>>,
    /// Pool-wide maximum play count, denominator of the freshness term
    max_play_count: i64,
    total_songs: usize,
}

impl CandidatePool {
    /// Load the pool for one station/DJ/hour.
    ///
    /// History is bounded by the widest configured cooldown window ending at
    /// `hour_start`; plays older than that can never disqualify a candidate.
    pub async fn load(
        store: &dyn LibraryStore,
        station_id: Uuid,
        dj_id: Uuid,
        hour_start: DateTime<Utc>,
        config: &ProgramConfig,
    ) -> EngineResult<Self> {
        let songs = store.list_active_songs(station_id).await?;

        let since = hour_start - Duration::hours(config.max_cooldown_hours());
        let playbacks = store.list_recent_playbacks(dj_id, since).await?;

        let mut last_played: HashMap<Uuid, DateTime<Utc>> = HashMap::new();
        for record in playbacks {
            last_played
                .entry(record.song_id)
                .and_modify(|ts| {
                    if record.played_at > *ts {
                        *ts = record.played_at;
                    }
                })
                .or_insert(record.played_at);
        }

        // The song row's own last_played_at may be fresher than the DJ's
        // history window (another DJ on the same station may have played it).
        for song in &songs {
            if let Some(ts) = song.last_played_at {
                last_played
                    .entry(song.id)
                    .and_modify(|existing| {
                        if ts > *existing {
                            *existing = ts;
                        }
                    })
                    .or_insert(ts);
            }
        }

        let max_play_count = songs.iter().map(|s| s.play_count).max().unwrap_or(0);
        let total_songs = songs.len();

        let mut by_category: HashMap<RotationCategory, Vec<Song>> = HashMap::new();
        for song in songs {
            by_category
                .entry(song.rotation_category)
                .or_default()
                .push(song);
        }

        debug!(
            station_id = %station_id,
            songs = total_songs,
            recent_plays = last_played.len(),
            "Built candidate pool"
        );

        Ok(Self {
            by_category,
            last_played,
            max_play_count,
            total_songs,
        })
    }

    /// Candidates in one rotation category, in stable catalog order
    pub fn candidates(&self, category: RotationCategory) -> &[Song] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Most recent qualifying play for a song, if any
    pub fn last_played(&self, song_id: Uuid) -> Option<DateTime<Utc>> {
        self.last_played.get(&song_id).copied()
    }

    pub fn max_play_count(&self) -> i64 {
        self.max_play_count
    }

    pub fn is_empty(&self) -> bool {
        self.total_songs == 0
    }

    pub fn len(&self) -> usize {
        self.total_songs
    }

    #[cfg(test)]
    pub(crate) fn from_songs(songs: Vec<Song>) -> Self {
        let max_play_count = songs.iter().map(|s| s.play_count).max().unwrap_or(0);
        let total_songs = songs.len();
        let mut last_played = HashMap::new();
        for song in &songs {
            if let Some(ts) = song.last_played_at {
                last_played.insert(song.id, ts);
            }
        }
        let mut by_category: HashMap<RotationCategory, Vec<Song>> = HashMap::new();
        for song in songs {
            by_category
                .entry(song.rotation_category)
                .or_default()
                .push(song);
        }
        Self {
            by_category,
            last_played,
            max_play_count,
            total_songs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TempoCategory, VocalGender};

    fn song(category: RotationCategory, play_count: i64) -> Song {
        Song {
            id: Uuid::new_v4(),
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            rotation_category: category,
            vocal_gender: VocalGender::Female,
            tempo_category: TempoCategory::Medium,
            play_count,
            last_played_at: None,
        }
    }

    #[test]
    fn test_empty_pool() {
        let pool = CandidatePool::from_songs(vec![]);
        assert!(pool.is_empty());
        assert!(pool.candidates(RotationCategory::A).is_empty());
        assert_eq!(pool.max_play_count(), 0);
    }

    #[test]
    fn test_category_indexing() {
        let pool = CandidatePool::from_songs(vec![
            song(RotationCategory::A, 10),
            song(RotationCategory::A, 20),
            song(RotationCategory::C, 5),
        ]);
        assert_eq!(pool.candidates(RotationCategory::A).len(), 2);
        assert_eq!(pool.candidates(RotationCategory::C).len(), 1);
        assert!(pool.candidates(RotationCategory::E).is_empty());
        assert_eq!(pool.max_play_count(), 20);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_last_played_from_song_row() {
        let mut s = song(RotationCategory::B, 3);
        let ts = Utc::now();
        s.last_played_at = Some(ts);
        let id = s.id;
        let pool = CandidatePool::from_songs(vec![s]);
        assert_eq!(pool.last_played(id), Some(ts));
    }
}
