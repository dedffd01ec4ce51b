//! Hour playlist database operations
//!
//! One row per (station, DJ, date, hour); a re-resolution for the same key
//! fully replaces the stored slot sequence, it never merges.

use crate::types::{HourPlaylist, HourPlaylistKey, PlaylistStatus, ResolvedSlot};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Create or fully replace the hour playlist for `key`, returning its id.
///
/// The row keeps its original guid across replacements so voice tracks
/// keyed to the playlist survive a re-resolution.
pub async fn upsert_hour_playlist(
    pool: &SqlitePool,
    key: &HourPlaylistKey,
    template_id: Uuid,
    slots: &[ResolvedSlot],
    songs_assigned: u32,
) -> Result<Uuid> {
    let slots_json = serde_json::to_string(slots)?;

    sqlx::query(
        r#"
        INSERT INTO hour_playlists (
            guid, station_guid, dj_guid, air_date, hour_of_day,
            template_guid, slots, songs_assigned, status,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'draft', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(station_guid, dj_guid, air_date, hour_of_day) DO UPDATE SET
            template_guid = excluded.template_guid,
            slots = excluded.slots,
            songs_assigned = excluded.songs_assigned,
            status = 'draft',
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(key.station_id.to_string())
    .bind(key.dj_id.to_string())
    .bind(key.air_date.to_string())
    .bind(i64::from(key.hour_of_day))
    .bind(template_id.to_string())
    .bind(slots_json)
    .bind(i64::from(songs_assigned))
    .execute(pool)
    .await?;

    let guid_str: String = sqlx::query_scalar(
        r#"
        SELECT guid FROM hour_playlists
        WHERE station_guid = ? AND dj_guid = ? AND air_date = ? AND hour_of_day = ?
        "#,
    )
    .bind(key.station_id.to_string())
    .bind(key.dj_id.to_string())
    .bind(key.air_date.to_string())
    .bind(i64::from(key.hour_of_day))
    .fetch_one(pool)
    .await?;

    Ok(Uuid::parse_str(&guid_str)?)
}

/// Load one hour playlist by id
pub async fn load_hour_playlist(
    pool: &SqlitePool,
    playlist_id: Uuid,
) -> Result<Option<HourPlaylist>> {
    let row = sqlx::query(
        r#"
        SELECT station_guid, dj_guid, air_date, hour_of_day, template_guid,
               slots, songs_assigned, status
        FROM hour_playlists
        WHERE guid = ?
        "#,
    )
    .bind(playlist_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let station_str: String = row.get("station_guid");
            let dj_str: String = row.get("dj_guid");
            let air_date_str: String = row.get("air_date");
            let hour_of_day: i64 = row.get("hour_of_day");
            let template_str: String = row.get("template_guid");
            let slots_json: String = row.get("slots");
            let songs_assigned: i64 = row.get("songs_assigned");
            let status_str: String = row.get("status");

            Ok(Some(HourPlaylist {
                id: playlist_id,
                key: HourPlaylistKey {
                    station_id: Uuid::parse_str(&station_str)?,
                    dj_id: Uuid::parse_str(&dj_str)?,
                    air_date: air_date_str
                        .parse::<NaiveDate>()
                        .map_err(|e| anyhow!("Invalid air_date: {e}"))?,
                    hour_of_day: u8::try_from(hour_of_day)
                        .map_err(|_| anyhow!("Invalid hour_of_day: {hour_of_day}"))?,
                },
                template_id: Uuid::parse_str(&template_str)?,
                slots: serde_json::from_str(&slots_json)?,
                songs_assigned: u32::try_from(songs_assigned)
                    .map_err(|_| anyhow!("Invalid songs_assigned: {songs_assigned}"))?,
                status: PlaylistStatus::parse(&status_str)
                    .ok_or_else(|| anyhow!("Unknown playlist status: {status_str}"))?,
            }))
        }
        None => Ok(None),
    }
}
