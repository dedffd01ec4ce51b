//! Voice track script generation and upserting
//!
//! Each checkpoint is processed independently: a generation or persistence
//! failure on one checkpoint is recorded and processing continues to the
//! next. The batch result is a fold of per-checkpoint outcomes, never an
//! atomic all-or-nothing operation.

use crate::assembler::ProgramDirector;
use crate::error::{EngineError, EngineResult};
use crate::types::{VoiceTrack, VoiceTrackStatus};
use crate::voicetrack::locator::locate_songs;
use crate::voicetrack::prompt::{build_system_prompt, build_user_prompt};
use tracing::{info, warn};
use uuid::Uuid;

/// One failed checkpoint in a script batch
#[derive(Debug, Clone)]
pub struct CheckpointError {
    pub position: i64,
    pub message: String,
}

/// Outcome of one `generate_voice_track_scripts` call
#[derive(Debug, Clone, Default)]
pub struct ScriptBatch {
    /// Checkpoints whose script was generated and persisted
    pub generated: u32,
    /// Per-checkpoint failures, in checkpoint order
    pub errors: Vec<CheckpointError>,
}

impl ProgramDirector {
    /// Generate and persist one voice track per configured checkpoint for an
    /// already-resolved hour playlist.
    ///
    /// Fails outright only when the playlist or the DJ persona cannot be
    /// loaded; per-checkpoint generation or persistence failures are
    /// collected into the returned batch. Re-running for the same playlist
    /// updates existing voice tracks in place (upsert keyed by position).
    pub async fn generate_voice_track_scripts(
        &self,
        hour_playlist_id: Uuid,
    ) -> EngineResult<ScriptBatch> {
        let playlist = self
            .playlists
            .get_hour_playlist(hour_playlist_id)
            .await?
            .ok_or(EngineError::PlaylistNotFound(hour_playlist_id))?;

        let persona = self.library.get_dj_persona(playlist.key.dj_id).await?;
        let system_prompt = build_system_prompt(&persona);

        let mut batch = ScriptBatch::default();

        for checkpoint in &self.config.checkpoints {
            let located = locate_songs(&playlist.slots, checkpoint.position);
            let user_prompt = build_user_prompt(
                checkpoint.track_type,
                &located,
                playlist.key.hour_of_day,
            );

            let outcome = async {
                let text = self
                    .generator
                    .generate(
                        &system_prompt,
                        &user_prompt,
                        persona.temperature,
                        self.config.script_max_tokens,
                    )
                    .await?;

                let track = VoiceTrack {
                    position: checkpoint.position,
                    track_type: checkpoint.track_type,
                    previous_song: located.previous.clone(),
                    next_song: located.next.clone(),
                    script_text: text.trim().to_string(),
                    status: VoiceTrackStatus::ScriptReady,
                };

                self.playlists
                    .upsert_voice_track(hour_playlist_id, &track)
                    .await
            }
            .await;

            match outcome {
                Ok(_) => batch.generated += 1,
                Err(err) => {
                    warn!(
                        position = checkpoint.position,
                        error = %err,
                        "Voice track checkpoint failed; continuing"
                    );
                    batch.errors.push(CheckpointError {
                        position: checkpoint.position,
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            hour_playlist_id = %hour_playlist_id,
            generated = batch.generated,
            failed = batch.errors.len(),
            "Voice track batch complete"
        );

        Ok(batch)
    }
}
