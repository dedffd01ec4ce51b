//! Playback history database operations
//!
//! History rows are append-only facts written by playback reporting, which
//! is external to this engine; the engine only reads a bounded trailing
//! window for cooldown lookups.

use crate::types::PlaybackRecord;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Playback records for one DJ with `played_at >= since`, oldest first
pub async fn list_recent_playbacks(
    pool: &SqlitePool,
    dj_id: Uuid,
    since: DateTime<Utc>,
) -> Result<Vec<PlaybackRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT song_guid, dj_guid, played_at
        FROM playback_history
        WHERE dj_guid = ? AND played_at >= ?
        ORDER BY played_at ASC
        "#,
    )
    .bind(dj_id.to_string())
    .bind(since.to_rfc3339())
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let song_str: String = row.get("song_guid");
        let dj_str: String = row.get("dj_guid");
        let played_str: String = row.get("played_at");

        records.push(PlaybackRecord {
            song_id: Uuid::parse_str(&song_str)?,
            dj_id: Uuid::parse_str(&dj_str)?,
            played_at: DateTime::parse_from_rfc3339(&played_str)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| anyhow!("Invalid played_at timestamp: {e}"))?,
        });
    }

    Ok(records)
}

/// Append one playback record (test/seed helper; production writes come
/// from playback reporting outside this engine)
pub async fn record_playback(pool: &SqlitePool, record: &PlaybackRecord) -> Result<()> {
    sqlx::query(
        "INSERT INTO playback_history (song_guid, dj_guid, played_at) VALUES (?, ?, ?)",
    )
    .bind(record.song_id.to_string())
    .bind(record.dj_id.to_string())
    .bind(record.played_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
