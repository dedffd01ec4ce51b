//! Voice track database operations
//!
//! One row per (playlist, checkpoint position); regenerating scripts for an
//! hour updates rows in place instead of duplicating them.

use crate::types::{SongRef, VoiceTrack, VoiceTrackStatus, VoiceTrackType};
use anyhow::{anyhow, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Create or update the voice track for (playlist, position), returning its id
pub async fn upsert_voice_track(
    pool: &SqlitePool,
    playlist_id: Uuid,
    track: &VoiceTrack,
) -> Result<Uuid> {
    let previous_json = track
        .previous_song
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let next_json = track
        .next_song
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    sqlx::query(
        r#"
        INSERT INTO voice_tracks (
            guid, playlist_guid, position, track_type,
            previous_song, next_song, script_text, status,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(playlist_guid, position) DO UPDATE SET
            track_type = excluded.track_type,
            previous_song = excluded.previous_song,
            next_song = excluded.next_song,
            script_text = excluded.script_text,
            status = excluded.status,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(playlist_id.to_string())
    .bind(track.position)
    .bind(track.track_type.as_str())
    .bind(previous_json)
    .bind(next_json)
    .bind(&track.script_text)
    .bind(track.status.as_str())
    .execute(pool)
    .await?;

    let guid_str: String = sqlx::query_scalar(
        "SELECT guid FROM voice_tracks WHERE playlist_guid = ? AND position = ?",
    )
    .bind(playlist_id.to_string())
    .bind(track.position)
    .fetch_one(pool)
    .await?;

    Ok(Uuid::parse_str(&guid_str)?)
}

/// All voice tracks for one playlist, in checkpoint order
pub async fn list_voice_tracks(pool: &SqlitePool, playlist_id: Uuid) -> Result<Vec<VoiceTrack>> {
    let rows = sqlx::query(
        r#"
        SELECT position, track_type, previous_song, next_song, script_text, status
        FROM voice_tracks
        WHERE playlist_guid = ?
        ORDER BY position ASC
        "#,
    )
    .bind(playlist_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut tracks = Vec::with_capacity(rows.len());
    for row in rows {
        let track_type_str: String = row.get("track_type");
        let previous_json: Option<String> = row.get("previous_song");
        let next_json: Option<String> = row.get("next_song");
        let status_str: String = row.get("status");

        tracks.push(VoiceTrack {
            position: row.get("position"),
            track_type: VoiceTrackType::parse(&track_type_str)
                .ok_or_else(|| anyhow!("Unknown voice track type: {track_type_str}"))?,
            previous_song: previous_json
                .map(|json| serde_json::from_str::<SongRef>(&json))
                .transpose()?,
            next_song: next_json
                .map(|json| serde_json::from_str::<SongRef>(&json))
                .transpose()?,
            script_text: row.get("script_text"),
            status: match status_str.as_str() {
                "script_ready" => VoiceTrackStatus::ScriptReady,
                other => return Err(anyhow!("Unknown voice track status: {other}")),
            },
        });
    }

    Ok(tracks)
}
