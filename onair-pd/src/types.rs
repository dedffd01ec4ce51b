//! Domain types for hour playlist resolution and voice-break scripting
//!
//! Clock templates, songs, and playback history are long-lived station data
//! owned by collaborators; everything here is read-only to the engine except
//! `HourPlaylist` and `VoiceTrack`, which the engine creates and replaces.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rotation category of a clock slot.
///
/// A through E are music categories, heaviest-to-lightest airplay. The
/// remaining categories mark non-music slots (top-of-hour station ID,
/// DJ voice breaks, sponsor ads, features, imaging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationCategory {
    Toh,
    A,
    B,
    C,
    D,
    E,
    Dj,
    Sponsor,
    Feature,
    Imaging,
}

impl RotationCategory {
    /// True for the music rotation categories A through E
    pub fn is_music(&self) -> bool {
        matches!(self, Self::A | Self::B | Self::C | Self::D | Self::E)
    }

    /// Ordered fallback categories tried when the declared category has no
    /// eligible candidate. Each music category maps to its two adjacent
    /// rotations; non-music categories never fall back.
    pub fn fallback_categories(&self) -> &'static [RotationCategory] {
        match self {
            Self::A => &[Self::B, Self::C],
            Self::B => &[Self::A, Self::C],
            Self::C => &[Self::B, Self::D],
            Self::D => &[Self::C, Self::E],
            Self::E => &[Self::D, Self::C],
            _ => &[],
        }
    }

    /// Database/text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toh => "TOH",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::Dj => "DJ",
            Self::Sponsor => "Sponsor",
            Self::Feature => "Feature",
            Self::Imaging => "Imaging",
        }
    }

    /// Parse from database/text representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TOH" => Some(Self::Toh),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "DJ" => Some(Self::Dj),
            "Sponsor" => Some(Self::Sponsor),
            "Feature" => Some(Self::Feature),
            "Imaging" => Some(Self::Imaging),
            _ => None,
        }
    }
}

/// What kind of content fills a clock slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    StationId,
    Song,
    VoiceBreak,
    Ad,
    Feature,
    Sweeper,
}

impl SlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StationId => "station_id",
            Self::Song => "song",
            Self::VoiceBreak => "voice_break",
            Self::Ad => "ad",
            Self::Feature => "feature",
            Self::Sweeper => "sweeper",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "station_id" => Some(Self::StationId),
            "song" => Some(Self::Song),
            "voice_break" => Some(Self::VoiceBreak),
            "ad" => Some(Self::Ad),
            "feature" => Some(Self::Feature),
            "sweeper" => Some(Self::Sweeper),
            _ => None,
        }
    }
}

/// Coarse tempo bucket used for slot tempo-fit scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoCategory {
    Slow,
    Medium,
    Fast,
}

impl TempoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "slow" => Some(Self::Slow),
            "medium" => Some(Self::Medium),
            "fast" => Some(Self::Fast),
            _ => None,
        }
    }
}

/// Vocal gender classification used for the hour's variety balancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocalGender {
    Male,
    Female,
    Mixed,
}

impl VocalGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Mixed => "mixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

/// One abstract slot of a clock template.
///
/// Positions within one template are unique and monotonically increasing;
/// `ClockPattern::load` enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSlot {
    pub position: i64,
    pub minute_offset: i64,
    pub duration_seconds: i64,
    pub category: RotationCategory,
    pub slot_type: SlotType,
    /// Tempo the template prefers at this point of the hour, if any
    pub tempo_preference: Option<TempoCategory>,
    /// Feature metadata (e.g. a named syndicated segment), if any
    pub feature_name: Option<String>,
}

/// Library song (station catalog entity, read-only to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub rotation_category: RotationCategory,
    pub vocal_gender: VocalGender,
    pub tempo_category: TempoCategory,
    /// Cumulative plays, maintained by playback reporting (external)
    pub play_count: i64,
    pub last_played_at: Option<DateTime<Utc>>,
}

/// One historical play (append-only fact, owned externally)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackRecord {
    pub song_id: Uuid,
    pub dj_id: Uuid,
    pub played_at: DateTime<Utc>,
}

/// Minimal reference to a chosen song carried inside resolved slots and
/// voice tracks. Never owns the song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRef {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
}

impl SongRef {
    pub fn from_song(song: &Song) -> Self {
        Self {
            id: song.id,
            title: song.title.clone(),
            artist: song.artist.clone(),
        }
    }
}

/// A clock slot after resolution: music slots carry the chosen song (if one
/// could be placed), all other slot types pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSlot {
    pub slot: ClockSlot,
    pub song: Option<SongRef>,
}

/// Unique key of one hour playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HourPlaylistKey {
    pub station_id: Uuid,
    pub dj_id: Uuid,
    pub air_date: NaiveDate,
    pub hour_of_day: u8,
}

/// Lifecycle status of an hour playlist.
///
/// The engine only ever writes `Draft`; scheduling and air tracking belong
/// to collaborators downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistStatus {
    Draft,
    Scheduled,
    Aired,
}

impl PlaylistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Aired => "aired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "scheduled" => Some(Self::Scheduled),
            "aired" => Some(Self::Aired),
            _ => None,
        }
    }
}

/// Fully resolved hour playlist, replaced wholesale on re-resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourPlaylist {
    pub id: Uuid,
    pub key: HourPlaylistKey,
    pub template_id: Uuid,
    pub slots: Vec<ResolvedSlot>,
    pub songs_assigned: u32,
    pub status: PlaylistStatus,
}

/// Semantic type of a voice-break checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceTrackType {
    /// Early break: references only the next song
    Intro,
    /// Midpoint break: references both the previous and the next song
    BackAnnounceIntro,
    /// Late break: references only the previous song
    BackAnnounce,
}

impl VoiceTrackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::BackAnnounceIntro => "back_announce_intro",
            Self::BackAnnounce => "back_announce",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intro" => Some(Self::Intro),
            "back_announce_intro" => Some(Self::BackAnnounceIntro),
            "back_announce" => Some(Self::BackAnnounce),
            _ => None,
        }
    }
}

/// Status of a voice track record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceTrackStatus {
    ScriptReady,
}

impl VoiceTrackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScriptReady => "script_ready",
        }
    }
}

/// One generated voice-break script, keyed by (playlist, checkpoint position)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceTrack {
    pub position: i64,
    pub track_type: VoiceTrackType,
    pub previous_song: Option<SongRef>,
    pub next_song: Option<SongRef>,
    pub script_text: String,
    pub status: VoiceTrackStatus,
}

/// DJ persona configuration used for script prompts.
///
/// Loaded per call and passed into the prompt builder explicitly, so
/// resolving hours for different DJs stays trivially parallel-safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DjPersona {
    pub dj_id: Uuid,
    pub name: String,
    pub description: String,
    pub catchphrases: Vec<String>,
    pub lore: Option<String>,
    /// Randomness parameter handed to the text-generation collaborator
    pub temperature: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_categories() {
        assert!(RotationCategory::A.is_music());
        assert!(RotationCategory::E.is_music());
        assert!(!RotationCategory::Toh.is_music());
        assert!(!RotationCategory::Sponsor.is_music());
    }

    #[test]
    fn test_fallback_chains_are_adjacent_pairs() {
        assert_eq!(
            RotationCategory::A.fallback_categories(),
            &[RotationCategory::B, RotationCategory::C]
        );
        assert_eq!(
            RotationCategory::C.fallback_categories(),
            &[RotationCategory::B, RotationCategory::D]
        );
        assert!(RotationCategory::Dj.fallback_categories().is_empty());

        for cat in [
            RotationCategory::A,
            RotationCategory::B,
            RotationCategory::C,
            RotationCategory::D,
            RotationCategory::E,
        ] {
            let chain = cat.fallback_categories();
            assert_eq!(chain.len(), 2);
            assert!(chain.iter().all(|c| c.is_music() && *c != cat));
        }
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [
            RotationCategory::Toh,
            RotationCategory::A,
            RotationCategory::Dj,
            RotationCategory::Imaging,
        ] {
            assert_eq!(RotationCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(RotationCategory::parse("F"), None);
    }

    #[test]
    fn test_slot_type_round_trip() {
        for st in [
            SlotType::StationId,
            SlotType::Song,
            SlotType::VoiceBreak,
            SlotType::Ad,
            SlotType::Feature,
            SlotType::Sweeper,
        ] {
            assert_eq!(SlotType::parse(st.as_str()), Some(st));
        }
    }

    #[test]
    fn test_voice_track_type_strings() {
        assert_eq!(VoiceTrackType::Intro.as_str(), "intro");
        assert_eq!(
            VoiceTrackType::parse("back_announce_intro"),
            Some(VoiceTrackType::BackAnnounceIntro)
        );
    }
}
