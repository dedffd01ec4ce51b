//! Program director scheduling parameters
//!
//! All tunables for one hour resolution live in a single `ProgramConfig`
//! value passed into the engine per call. Unlike station-wide settings this
//! is deliberately not a process-wide singleton: concurrent resolutions for
//! different stations/DJs must not share mutable configuration.

use crate::types::{RotationCategory, VocalGender, VoiceTrackType};

/// Scoring weights for the candidate scorer.
///
/// Each term is normalized to [0.0, 1.0] before weighting, so the weights
/// express relative influence directly.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Random term, introduces run-to-run rotation variety
    pub random: f64,
    /// Freshness term, favors less-played songs
    pub freshness: f64,
    /// Tempo-match term against the slot's tempo preference
    pub tempo: f64,
    /// Gender-variety term toward under-represented vocal genders
    pub gender: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            random: 0.25,
            freshness: 0.35,
            tempo: 0.25,
            gender: 0.15,
        }
    }
}

/// One fixed voice-break checkpoint in the hour
#[derive(Debug, Clone, Copy)]
pub struct VoiceBreakCheckpoint {
    /// Slot position the break is anchored at
    pub position: i64,
    pub track_type: VoiceTrackType,
}

/// Scheduling parameters for hour playlist resolution
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Cooldown hours per music rotation category. Heavier rotation uses a
    /// shorter cooldown (A recurs every few hours, E rests for days).
    pub cooldown_hours_a: i64,
    pub cooldown_hours_b: i64,
    pub cooldown_hours_c: i64,
    pub cooldown_hours_d: i64,
    pub cooldown_hours_e: i64,

    /// How many consecutive placements an artist is blocked for
    pub artist_separation: usize,

    pub weights: ScoringWeights,

    /// Tempo-match score when the song matches the slot preference
    pub tempo_match_bonus: f64,
    /// Neutral tempo baseline when there is no match (or no preference)
    pub tempo_baseline: f64,

    /// Target share of placements per vocal gender for the hour.
    /// A candidate whose gender is under its target receives the full
    /// gender-variety bonus.
    pub gender_targets: Vec<(VocalGender, f64)>,

    /// Fixed voice-break checkpoints, in hour order
    pub checkpoints: Vec<VoiceBreakCheckpoint>,

    /// Token budget for each generated script
    pub script_max_tokens: u32,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            cooldown_hours_a: 3,
            cooldown_hours_b: 6,
            cooldown_hours_c: 12,
            cooldown_hours_d: 24,
            cooldown_hours_e: 48,
            artist_separation: 3,
            weights: ScoringWeights::default(),
            tempo_match_bonus: 1.0,
            tempo_baseline: 0.25,
            gender_targets: vec![
                (VocalGender::Male, 0.45),
                (VocalGender::Female, 0.45),
                (VocalGender::Mixed, 0.10),
            ],
            checkpoints: vec![
                VoiceBreakCheckpoint {
                    position: 1,
                    track_type: VoiceTrackType::Intro,
                },
                VoiceBreakCheckpoint {
                    position: 7,
                    track_type: VoiceTrackType::BackAnnounceIntro,
                },
                VoiceBreakCheckpoint {
                    position: 12,
                    track_type: VoiceTrackType::BackAnnounce,
                },
            ],
            script_max_tokens: 200,
        }
    }
}

impl ProgramConfig {
    /// Cooldown hours for a music category; non-music categories have none
    pub fn cooldown_hours(&self, category: RotationCategory) -> i64 {
        match category {
            RotationCategory::A => self.cooldown_hours_a,
            RotationCategory::B => self.cooldown_hours_b,
            RotationCategory::C => self.cooldown_hours_c,
            RotationCategory::D => self.cooldown_hours_d,
            RotationCategory::E => self.cooldown_hours_e,
            _ => 0,
        }
    }

    /// Widest configured cooldown, used to bound the playback-history window
    pub fn max_cooldown_hours(&self) -> i64 {
        [
            self.cooldown_hours_a,
            self.cooldown_hours_b,
            self.cooldown_hours_c,
            self.cooldown_hours_d,
            self.cooldown_hours_e,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Target share for a vocal gender (0.0 when not configured)
    pub fn gender_target(&self, gender: VocalGender) -> f64 {
        self.gender_targets
            .iter()
            .find(|(g, _)| *g == gender)
            .map(|(_, target)| *target)
            .unwrap_or(0.0)
    }
}
