//! Collaborator interfaces consumed by the engine
//!
//! Persistent storage of templates, songs, playlists, and voice tracks is
//! external to the engine; these traits are the seams it consumes them
//! through. SQLite-backed implementations live in [`crate::db`], and tests
//! substitute in-memory fakes.

use crate::error::EngineResult;
use crate::types::{
    ClockSlot, DjPersona, HourPlaylist, HourPlaylistKey, PlaybackRecord, ResolvedSlot, Song,
    VoiceTrack,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Read access to the station's clock templates, song library, playback
/// history, and DJ personas
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Ordered slot descriptors for one template.
    ///
    /// Fails with `EngineError::TemplateNotFound` when the id does not
    /// resolve; an existing template with zero slots returns an empty vec
    /// (the clock parser turns that into `EmptyPattern`).
    async fn get_template(&self, template_id: Uuid) -> EngineResult<Vec<ClockSlot>>;

    /// All active songs in the station's catalog
    async fn list_active_songs(&self, station_id: Uuid) -> EngineResult<Vec<Song>>;

    /// Playback records for one DJ with `played_at >= since`
    async fn list_recent_playbacks(
        &self,
        dj_id: Uuid,
        since: DateTime<Utc>,
    ) -> EngineResult<Vec<PlaybackRecord>>;

    /// Persona configuration for one DJ
    async fn get_dj_persona(&self, dj_id: Uuid) -> EngineResult<DjPersona>;
}

/// Write access to resolved playlists and voice tracks.
///
/// Both upserts are idempotent on their keys: re-running resolution for the
/// same hour replaces prior output instead of duplicating it.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create or fully replace the hour playlist for `key`, returning its id
    async fn upsert_hour_playlist(
        &self,
        key: &HourPlaylistKey,
        template_id: Uuid,
        slots: &[ResolvedSlot],
        songs_assigned: u32,
    ) -> EngineResult<Uuid>;

    /// Load one hour playlist by id
    async fn get_hour_playlist(&self, playlist_id: Uuid) -> EngineResult<Option<HourPlaylist>>;

    /// Create or update the voice track for (playlist, checkpoint position),
    /// returning its id
    async fn upsert_voice_track(
        &self,
        playlist_id: Uuid,
        track: &VoiceTrack,
    ) -> EngineResult<Uuid>;
}

/// External text-generation capability used for voice-break scripts.
///
/// Failures surface as `EngineError::Generation`; the voice-track upserter
/// catches them per checkpoint rather than aborting the batch.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> EngineResult<String>;
}
