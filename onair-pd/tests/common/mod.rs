//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use onair_pd::db::{SqliteLibraryStore, SqlitePlaylistStore};
use onair_pd::error::{EngineError, EngineResult};
use onair_pd::store::TextGenerator;
use onair_pd::types::{
    ClockSlot, DjPersona, RotationCategory, SlotType, Song, TempoCategory, VocalGender,
};
use onair_pd::{ProgramConfig, ProgramDirector, ScoringWeights};
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Text generator double: echoes the user prompt back (so tests can assert
/// on prompt content) and fails on configured call indices.
pub struct ScriptedGenerator {
    failures: HashSet<u32>,
    calls: AtomicU32,
}

impl ScriptedGenerator {
    pub fn ok() -> Self {
        Self {
            failures: HashSet::new(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing_on(failures: impl IntoIterator<Item = u32>) -> Self {
        Self {
            failures: failures.into_iter().collect(),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> EngineResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(&call) {
            return Err(EngineError::Generation("simulated outage".to_string()));
        }
        // Leading/trailing whitespace exercises the upserter's trim
        Ok(format!("  {user_prompt}  "))
    }
}

/// Config with the random scoring term zeroed so tests are deterministic
pub fn deterministic_config() -> ProgramConfig {
    ProgramConfig {
        weights: ScoringWeights {
            random: 0.0,
            freshness: 0.6,
            tempo: 0.25,
            gender: 0.15,
        },
        ..ProgramConfig::default()
    }
}

/// Director over SQLite stores and the given generator
pub fn director(
    pool: &SqlitePool,
    generator: Arc<dyn TextGenerator>,
    config: ProgramConfig,
) -> ProgramDirector {
    ProgramDirector::new(
        Arc::new(SqliteLibraryStore::new(pool.clone())),
        Arc::new(SqlitePlaylistStore::new(pool.clone())),
        generator,
        config,
    )
}

pub fn air_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

pub fn music_slot(position: i64, category: RotationCategory) -> ClockSlot {
    ClockSlot {
        position,
        minute_offset: position * 4,
        duration_seconds: 210,
        category,
        slot_type: SlotType::Song,
        tempo_preference: None,
        feature_name: None,
    }
}

pub fn break_slot(position: i64) -> ClockSlot {
    ClockSlot {
        position,
        minute_offset: position * 4,
        duration_seconds: 30,
        category: RotationCategory::Dj,
        slot_type: SlotType::VoiceBreak,
        tempo_preference: None,
        feature_name: None,
    }
}

pub fn station_id_slot(position: i64) -> ClockSlot {
    ClockSlot {
        position,
        minute_offset: 0,
        duration_seconds: 10,
        category: RotationCategory::Toh,
        slot_type: SlotType::StationId,
        tempo_preference: None,
        feature_name: None,
    }
}

pub fn song(title: &str, artist: &str, category: RotationCategory) -> Song {
    Song {
        id: Uuid::new_v4(),
        title: title.to_string(),
        artist: artist.to_string(),
        rotation_category: category,
        vocal_gender: VocalGender::Female,
        tempo_category: TempoCategory::Medium,
        play_count: 0,
        last_played_at: None,
    }
}

pub fn persona(dj_id: Uuid) -> DjPersona {
    DjPersona {
        dj_id,
        name: "Ricky Rivers".to_string(),
        description: "A warm, fast-talking veteran of late-night radio.".to_string(),
        catchphrases: vec!["keep it locked".to_string()],
        lore: None,
        temperature: 0.8,
    }
}
