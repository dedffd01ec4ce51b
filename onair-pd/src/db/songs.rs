//! Song catalog database operations

use crate::types::{RotationCategory, Song, TempoCategory, VocalGender};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// List all active songs for one station, in stable catalog order
pub async fn list_active_songs(pool: &SqlitePool, station_id: Uuid) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, title, artist, rotation_category, vocal_gender,
               tempo_category, play_count, last_played_at
        FROM songs
        WHERE station_guid = ? AND active = 1
        ORDER BY guid ASC
        "#,
    )
    .bind(station_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut songs = Vec::with_capacity(rows.len());
    for row in rows {
        let guid_str: String = row.get("guid");
        let category_str: String = row.get("rotation_category");
        let gender_str: String = row.get("vocal_gender");
        let tempo_str: String = row.get("tempo_category");
        let last_played_str: Option<String> = row.get("last_played_at");

        songs.push(Song {
            id: Uuid::parse_str(&guid_str)?,
            title: row.get("title"),
            artist: row.get("artist"),
            rotation_category: RotationCategory::parse(&category_str)
                .ok_or_else(|| anyhow!("Unknown rotation category: {category_str}"))?,
            vocal_gender: VocalGender::parse(&gender_str)
                .ok_or_else(|| anyhow!("Unknown vocal gender: {gender_str}"))?,
            tempo_category: TempoCategory::parse(&tempo_str)
                .ok_or_else(|| anyhow!("Unknown tempo category: {tempo_str}"))?,
            play_count: row.get("play_count"),
            last_played_at: last_played_str
                .map(|s| {
                    DateTime::parse_from_rfc3339(&s)
                        .map(|ts| ts.with_timezone(&Utc))
                        .map_err(|e| anyhow!("Invalid last_played_at timestamp: {e}"))
                })
                .transpose()?,
        });
    }

    Ok(songs)
}

/// Save a song to the station catalog (upsert on song id)
pub async fn save_song(pool: &SqlitePool, station_id: Uuid, song: &Song) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO songs (
            guid, station_guid, title, artist, rotation_category, vocal_gender,
            tempo_category, play_count, last_played_at, active,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(guid) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            rotation_category = excluded.rotation_category,
            vocal_gender = excluded.vocal_gender,
            tempo_category = excluded.tempo_category,
            play_count = excluded.play_count,
            last_played_at = excluded.last_played_at,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(song.id.to_string())
    .bind(station_id.to_string())
    .bind(&song.title)
    .bind(&song.artist)
    .bind(song.rotation_category.as_str())
    .bind(song.vocal_gender.as_str())
    .bind(song.tempo_category.as_str())
    .bind(song.play_count)
    .bind(song.last_played_at.map(|ts| ts.to_rfc3339()))
    .execute(pool)
    .await?;

    Ok(())
}
