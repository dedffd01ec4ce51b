//! DJ persona database operations

use crate::types::DjPersona;
use anyhow::Result;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Load the persona configuration for one DJ
pub async fn load_dj_persona(pool: &SqlitePool, dj_id: Uuid) -> Result<Option<DjPersona>> {
    let row = sqlx::query(
        r#"
        SELECT name, description, catchphrases, lore, temperature
        FROM dj_personas
        WHERE dj_guid = ?
        "#,
    )
    .bind(dj_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let catchphrases_json: Option<String> = row.get("catchphrases");
            let catchphrases = match catchphrases_json {
                Some(json) => serde_json::from_str(&json)?,
                None => Vec::new(),
            };
            let temperature: f64 = row.get("temperature");

            Ok(Some(DjPersona {
                dj_id,
                name: row.get("name"),
                description: row.get("description"),
                catchphrases,
                lore: row.get("lore"),
                temperature: temperature as f32,
            }))
        }
        None => Ok(None),
    }
}

/// Save a DJ persona (upsert on DJ id)
pub async fn save_dj_persona(pool: &SqlitePool, persona: &DjPersona) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO dj_personas (
            dj_guid, name, description, catchphrases, lore, temperature,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(dj_guid) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            catchphrases = excluded.catchphrases,
            lore = excluded.lore,
            temperature = excluded.temperature,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(persona.dj_id.to_string())
    .bind(&persona.name)
    .bind(&persona.description)
    .bind(serde_json::to_string(&persona.catchphrases)?)
    .bind(&persona.lore)
    .bind(f64::from(persona.temperature))
    .execute(pool)
    .await?;

    Ok(())
}
