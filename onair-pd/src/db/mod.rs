//! SQLite-backed store implementations
//!
//! Free query functions per entity plus thin wrapper structs that
//! implement the collaborator traits over a shared `SqlitePool`.

pub mod personas;
pub mod playback;
pub mod playlists;
pub mod songs;
pub mod templates;
pub mod voicetracks;

use crate::error::{EngineError, EngineResult};
use crate::store::{LibraryStore, PlaylistStore};
use crate::types::{
    ClockSlot, DjPersona, HourPlaylist, HourPlaylistKey, PlaybackRecord, ResolvedSlot, Song,
    VoiceTrack,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Library/template store over the station SQLite database
#[derive(Clone)]
pub struct SqliteLibraryStore {
    pool: SqlitePool,
}

impl SqliteLibraryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryStore for SqliteLibraryStore {
    async fn get_template(&self, template_id: Uuid) -> EngineResult<Vec<ClockSlot>> {
        templates::load_template_slots(&self.pool, template_id)
            .await?
            .ok_or(EngineError::TemplateNotFound(template_id))
    }

    async fn list_active_songs(&self, station_id: Uuid) -> EngineResult<Vec<Song>> {
        Ok(songs::list_active_songs(&self.pool, station_id).await?)
    }

    async fn list_recent_playbacks(
        &self,
        dj_id: Uuid,
        since: DateTime<Utc>,
    ) -> EngineResult<Vec<PlaybackRecord>> {
        Ok(playback::list_recent_playbacks(&self.pool, dj_id, since).await?)
    }

    async fn get_dj_persona(&self, dj_id: Uuid) -> EngineResult<DjPersona> {
        personas::load_dj_persona(&self.pool, dj_id)
            .await?
            .ok_or(EngineError::PersonaNotFound(dj_id))
    }
}

/// Playlist/voice-track store over the station SQLite database
#[derive(Clone)]
pub struct SqlitePlaylistStore {
    pool: SqlitePool,
}

impl SqlitePlaylistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistStore for SqlitePlaylistStore {
    async fn upsert_hour_playlist(
        &self,
        key: &HourPlaylistKey,
        template_id: Uuid,
        slots: &[ResolvedSlot],
        songs_assigned: u32,
    ) -> EngineResult<Uuid> {
        Ok(playlists::upsert_hour_playlist(&self.pool, key, template_id, slots, songs_assigned)
            .await?)
    }

    async fn get_hour_playlist(&self, playlist_id: Uuid) -> EngineResult<Option<HourPlaylist>> {
        Ok(playlists::load_hour_playlist(&self.pool, playlist_id).await?)
    }

    async fn upsert_voice_track(
        &self,
        playlist_id: Uuid,
        track: &VoiceTrack,
    ) -> EngineResult<Uuid> {
        Ok(voicetracks::upsert_voice_track(&self.pool, playlist_id, track).await?)
    }
}
