//! Clock template database operations

use crate::types::{ClockSlot, RotationCategory, SlotType, TempoCategory};
use anyhow::{anyhow, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Load the ordered slot descriptors for one template.
///
/// Returns `None` when the template id does not resolve; a template with no
/// slots returns `Some(vec![])` (the clock parser distinguishes the two).
pub async fn load_template_slots(
    pool: &SqlitePool,
    template_id: Uuid,
) -> Result<Option<Vec<ClockSlot>>> {
    let exists = sqlx::query("SELECT guid FROM clock_templates WHERE guid = ?")
        .bind(template_id.to_string())
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        return Ok(None);
    }

    let rows = sqlx::query(
        r#"
        SELECT position, minute_offset, duration_seconds, category, slot_type,
               tempo_preference, feature_name
        FROM clock_slots
        WHERE template_guid = ?
        ORDER BY position ASC
        "#,
    )
    .bind(template_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        let category_str: String = row.get("category");
        let slot_type_str: String = row.get("slot_type");
        let tempo_str: Option<String> = row.get("tempo_preference");

        slots.push(ClockSlot {
            position: row.get("position"),
            minute_offset: row.get("minute_offset"),
            duration_seconds: row.get("duration_seconds"),
            category: RotationCategory::parse(&category_str)
                .ok_or_else(|| anyhow!("Unknown rotation category: {category_str}"))?,
            slot_type: SlotType::parse(&slot_type_str)
                .ok_or_else(|| anyhow!("Unknown slot type: {slot_type_str}"))?,
            tempo_preference: tempo_str
                .map(|s| {
                    TempoCategory::parse(&s).ok_or_else(|| anyhow!("Unknown tempo category: {s}"))
                })
                .transpose()?,
            feature_name: row.get("feature_name"),
        });
    }

    Ok(Some(slots))
}

/// Save a template and its slots (replaces any existing slot rows)
pub async fn save_template(
    pool: &SqlitePool,
    template_id: Uuid,
    name: &str,
    slots: &[ClockSlot],
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO clock_templates (guid, name, created_at, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(guid) DO UPDATE SET
            name = excluded.name,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(template_id.to_string())
    .bind(name)
    .execute(pool)
    .await?;

    sqlx::query("DELETE FROM clock_slots WHERE template_guid = ?")
        .bind(template_id.to_string())
        .execute(pool)
        .await?;

    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO clock_slots (
                template_guid, position, minute_offset, duration_seconds,
                category, slot_type, tempo_preference, feature_name
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(template_id.to_string())
        .bind(slot.position)
        .bind(slot.minute_offset)
        .bind(slot.duration_seconds)
        .bind(slot.category.as_str())
        .bind(slot.slot_type.as_str())
        .bind(slot.tempo_preference.map(|t| t.as_str()))
        .bind(&slot.feature_name)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use onair_common::db::init_memory_database;

    fn slot(position: i64, category: RotationCategory, slot_type: SlotType) -> ClockSlot {
        ClockSlot {
            position,
            minute_offset: position * 4,
            duration_seconds: 210,
            category,
            slot_type,
            tempo_preference: Some(TempoCategory::Medium),
            feature_name: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_template() {
        let pool = init_memory_database().await.unwrap();
        let template_id = Uuid::new_v4();

        let slots = vec![
            slot(0, RotationCategory::Toh, SlotType::StationId),
            slot(1, RotationCategory::A, SlotType::Song),
            slot(2, RotationCategory::Dj, SlotType::VoiceBreak),
        ];
        save_template(&pool, template_id, "Weekday Hot Clock", &slots)
            .await
            .unwrap();

        let loaded = load_template_slots(&pool, template_id)
            .await
            .unwrap()
            .expect("template should exist");
        assert_eq!(loaded, slots);
    }

    #[tokio::test]
    async fn test_missing_template_returns_none() {
        let pool = init_memory_database().await.unwrap();
        let loaded = load_template_slots(&pool, Uuid::new_v4()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_resaving_template_replaces_slots() {
        let pool = init_memory_database().await.unwrap();
        let template_id = Uuid::new_v4();

        save_template(
            &pool,
            template_id,
            "Clock",
            &[slot(0, RotationCategory::A, SlotType::Song)],
        )
        .await
        .unwrap();
        save_template(
            &pool,
            template_id,
            "Clock",
            &[
                slot(0, RotationCategory::B, SlotType::Song),
                slot(1, RotationCategory::C, SlotType::Song),
            ],
        )
        .await
        .unwrap();

        let loaded = load_template_slots(&pool, template_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].category, RotationCategory::B);
    }
}
