//! Hour playlist assembly
//!
//! The assembler drives everything for playlist resolution: it loads the
//! clock pattern, builds the candidate pool, walks the skeleton slot by
//! slot, and upserts the finished hour playlist. Non-music slots pass
//! through untouched as placeholders for downstream collaborators (ad
//! insertion, imaging playback, feature content).

use crate::clock::ClockPattern;
use crate::config::ProgramConfig;
use crate::error::EngineResult;
use crate::pool::CandidatePool;
use crate::selector::{select_song, HourState};
use crate::store::{LibraryStore, PlaylistStore, TextGenerator};
use crate::types::{HourPlaylistKey, ResolvedSlot, SongRef};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Result of one hour playlist resolution
#[derive(Debug, Clone)]
pub struct HourPlaylistSummary {
    pub hour_playlist_id: Uuid,
    pub slots: Vec<ResolvedSlot>,
    /// Music slots successfully filled with a song. Callers surface this
    /// against the template's music slot count as operator diagnostics.
    pub songs_assigned: u32,
}

/// The program director: resolves hour playlists and scripts voice breaks.
///
/// Holds the collaborator seams and the scheduling configuration. Each
/// resolution is an independent unit of work; directors are cheap to clone
/// and safe to share across concurrently resolved hours.
#[derive(Clone)]
pub struct ProgramDirector {
    pub(crate) library: Arc<dyn LibraryStore>,
    pub(crate) playlists: Arc<dyn PlaylistStore>,
    pub(crate) generator: Arc<dyn TextGenerator>,
    pub(crate) config: ProgramConfig,
}

impl ProgramDirector {
    pub fn new(
        library: Arc<dyn LibraryStore>,
        playlists: Arc<dyn PlaylistStore>,
        generator: Arc<dyn TextGenerator>,
        config: ProgramConfig,
    ) -> Self {
        Self {
            library,
            playlists,
            generator,
            config,
        }
    }

    /// Resolve one broadcast hour into a concrete, conflict-free playlist.
    ///
    /// Fails only structurally (missing template, empty pattern); an
    /// exhausted candidate pool degrades to unresolved music slots. The
    /// stored playlist is keyed by (station, DJ, date, hour) and fully
    /// replaces any prior resolution for that key.
    pub async fn build_hour_playlist(
        &self,
        station_id: Uuid,
        dj_id: Uuid,
        template_id: Uuid,
        air_date: NaiveDate,
        hour_of_day: u8,
    ) -> EngineResult<HourPlaylistSummary> {
        let pattern = ClockPattern::load(self.library.as_ref(), template_id).await?;
        let hour_start = onair_common::time::hour_start(air_date, hour_of_day);

        let pool = CandidatePool::load(
            self.library.as_ref(),
            station_id,
            dj_id,
            hour_start,
            &self.config,
        )
        .await?;

        if pool.is_empty() {
            warn!(
                station_id = %station_id,
                "Candidate pool is empty; resolving hour with no songs placed"
            );
        }

        let mut state = HourState::new();
        // StdRng (not thread_rng) keeps the resolution future Send, so
        // independent hours can be spawned onto a multithreaded runtime
        let mut rng = StdRng::from_entropy();
        let mut slots = Vec::with_capacity(pattern.slots().len());

        for slot in pattern.slots() {
            let song = if slot.category.is_music() {
                let chosen =
                    select_song(slot, &pool, &state, &self.config, hour_start, &mut rng);
                if let Some(song) = chosen {
                    state.record_placement(song, &self.config);
                    Some(SongRef::from_song(song))
                } else {
                    None
                }
            } else {
                None
            };

            slots.push(ResolvedSlot {
                slot: slot.clone(),
                song,
            });
        }

        let songs_assigned = state.songs_placed();
        let key = HourPlaylistKey {
            station_id,
            dj_id,
            air_date,
            hour_of_day,
        };

        let hour_playlist_id = self
            .playlists
            .upsert_hour_playlist(&key, template_id, &slots, songs_assigned)
            .await?;

        info!(
            hour_playlist_id = %hour_playlist_id,
            songs_assigned,
            music_slots = pattern.music_slot_count(),
            hour = hour_of_day,
            "Resolved hour playlist"
        );

        Ok(HourPlaylistSummary {
            hour_playlist_id,
            slots,
            songs_assigned,
        })
    }
}
