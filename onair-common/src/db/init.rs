//! Database initialization
//!
//! Creates the station database on first run and brings the schema up to
//! date. All DDL is idempotent (`CREATE TABLE IF NOT EXISTS`), so calling
//! init on an existing database is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer, which matters when
    // several hour resolutions run against the same station database.
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the full schema (test helper)
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_clock_templates_table(pool).await?;
    create_clock_slots_table(pool).await?;
    create_songs_table(pool).await?;
    create_playback_history_table(pool).await?;
    create_dj_personas_table(pool).await?;
    create_hour_playlists_table(pool).await?;
    create_voice_tracks_table(pool).await?;
    Ok(())
}

async fn create_clock_templates_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clock_templates (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_clock_slots_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clock_slots (
            template_guid TEXT NOT NULL REFERENCES clock_templates(guid) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            minute_offset INTEGER NOT NULL,
            duration_seconds INTEGER NOT NULL,
            category TEXT NOT NULL,
            slot_type TEXT NOT NULL,
            tempo_preference TEXT,
            feature_name TEXT,
            PRIMARY KEY (template_guid, position)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            guid TEXT PRIMARY KEY,
            station_guid TEXT NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            rotation_category TEXT NOT NULL,
            vocal_gender TEXT NOT NULL,
            tempo_category TEXT NOT NULL,
            play_count INTEGER NOT NULL DEFAULT 0,
            last_played_at TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_songs_station ON songs(station_guid, active)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_playback_history_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playback_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_guid TEXT NOT NULL,
            dj_guid TEXT NOT NULL,
            played_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_playback_dj_time ON playback_history(dj_guid, played_at)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_dj_personas_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dj_personas (
            dj_guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            catchphrases TEXT,
            lore TEXT,
            temperature REAL NOT NULL DEFAULT 0.8,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_hour_playlists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hour_playlists (
            guid TEXT PRIMARY KEY,
            station_guid TEXT NOT NULL,
            dj_guid TEXT NOT NULL,
            air_date TEXT NOT NULL,
            hour_of_day INTEGER NOT NULL,
            template_guid TEXT NOT NULL,
            slots TEXT NOT NULL,
            songs_assigned INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'draft',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (station_guid, dj_guid, air_date, hour_of_day)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_voice_tracks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS voice_tracks (
            guid TEXT PRIMARY KEY,
            playlist_guid TEXT NOT NULL REFERENCES hour_playlists(guid) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            track_type TEXT NOT NULL,
            previous_song TEXT,
            next_song TEXT,
            script_text TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'script_ready',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (playlist_guid, position)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
