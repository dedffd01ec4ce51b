//! Script prompt building
//!
//! Deterministic assembly of the instruction handed to the external text
//! generator: a persona system prompt built once per DJ, and a user
//! instruction selected by checkpoint type and time-of-day bucket with the
//! located song names filled in. When a located song is absent the prompt
//! degrades to a generic, song-agnostic break.

use crate::types::{DjPersona, VoiceTrackType};
use crate::voicetrack::locator::LocatedSongs;

/// Tokens recognized by [`fill_template`]
pub const RECOGNIZED_TOKENS: &[&str] = &[
    "dj_name",
    "daypart",
    "prev_title",
    "prev_artist",
    "next_title",
    "next_artist",
];

/// Time-of-day bucket used to flavor the instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daypart {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl Daypart {
    /// Bucket an hour of day (0-23)
    pub fn from_hour(hour_of_day: u8) -> Self {
        match hour_of_day {
            5..=9 => Self::Morning,
            10..=13 => Self::Midday,
            14..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// Substitute `{token}` placeholders from `context`.
///
/// Pure function over an enumerated token set; unknown tokens pass through
/// unchanged rather than erroring, matching the best-effort philosophy of
/// the rest of the engine.
pub fn fill_template(template: &str, context: &[(&str, &str)]) -> String {
    let mut filled = template.to_string();
    for (token, value) in context {
        if RECOGNIZED_TOKENS.contains(token) {
            filled = filled.replace(&format!("{{{token}}}"), value);
        }
    }
    filled
}

/// System-level persona prompt, assembled once per DJ.
///
/// The persona is an explicitly loaded, read-only value; nothing here is
/// process-global, so prompts for different DJs can be built concurrently.
pub fn build_system_prompt(persona: &DjPersona) -> String {
    let mut prompt = format!(
        "You are {}, an on-air radio DJ. {}",
        persona.name, persona.description
    );

    if !persona.catchphrases.is_empty() {
        prompt.push_str("\nCatchphrases you sometimes work in naturally: ");
        prompt.push_str(&persona.catchphrases.join("; "));
        prompt.push('.');
    }

    if let Some(lore) = &persona.lore {
        prompt.push('\n');
        prompt.push_str(lore);
    }

    prompt.push_str(
        "\nYou write short spoken voice breaks between songs. \
         Always stay fully in character.",
    );

    prompt
}

/// User-level instruction for one checkpoint.
///
/// Selected by checkpoint type and daypart; embeds the located song and
/// artist names when available and always carries explicit length and tone
/// rules.
pub fn build_user_prompt(
    track_type: VoiceTrackType,
    located: &LocatedSongs,
    hour_of_day: u8,
) -> String {
    let daypart = Daypart::from_hour(hour_of_day);

    let body = match track_type {
        VoiceTrackType::Intro => intro_body(located),
        VoiceTrackType::BackAnnounceIntro => back_announce_intro_body(located),
        VoiceTrackType::BackAnnounce => back_announce_body(located),
    };

    let template = format!(
        "It is {{daypart}} at the station. {body} \
         Write 2 to 4 sentences, in character. \
         Spoken word only: no stage directions, no sound effects, no brackets."
    );

    let mut context: Vec<(&str, &str)> = vec![("daypart", daypart.as_str())];
    if let Some(prev) = &located.previous {
        context.push(("prev_title", &prev.title));
        context.push(("prev_artist", &prev.artist));
    }
    if let Some(next) = &located.next {
        context.push(("next_title", &next.title));
        context.push(("next_artist", &next.artist));
    }

    fill_template(&template, &context)
}

fn intro_body(located: &LocatedSongs) -> &'static str {
    if located.next.is_some() {
        "Welcome listeners to the hour and introduce the next song, \
         \"{next_title}\" by {next_artist}."
    } else {
        "Welcome listeners to the hour and tease the music coming up, \
         without naming any specific song."
    }
}

fn back_announce_intro_body(located: &LocatedSongs) -> &'static str {
    match (&located.previous, &located.next) {
        (Some(_), Some(_)) => {
            "Back-announce the song that just finished, \"{prev_title}\" by \
             {prev_artist}, then introduce the next one, \"{next_title}\" by \
             {next_artist}."
        }
        (Some(_), None) => {
            "Back-announce the song that just finished, \"{prev_title}\" by \
             {prev_artist}, then keep the energy moving into the rest of the hour."
        }
        (None, Some(_)) => {
            "Introduce the next song, \"{next_title}\" by {next_artist}."
        }
        (None, None) => {
            "Deliver a short mid-hour break keeping listeners tuned in, \
             without naming any specific song."
        }
    }
}

fn back_announce_body(located: &LocatedSongs) -> &'static str {
    if located.previous.is_some() {
        "Back-announce the song that just finished, \"{prev_title}\" by \
         {prev_artist}, and thank listeners for staying with the show."
    } else {
        "Thank listeners for staying with the show and wrap up this stretch \
         of music, without naming any specific song."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SongRef;
    use uuid::Uuid;

    fn persona() -> DjPersona {
        DjPersona {
            dj_id: Uuid::new_v4(),
            name: "Ricky Rivers".to_string(),
            description: "A warm, fast-talking veteran of late-night radio.".to_string(),
            catchphrases: vec!["keep it locked".to_string(), "smooth sailing".to_string()],
            lore: Some("Ricky claims to have interviewed every bassist in town.".to_string()),
            temperature: 0.8,
        }
    }

    fn song_ref(title: &str, artist: &str) -> SongRef {
        SongRef {
            id: Uuid::new_v4(),
            title: title.to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn test_fill_template_substitutes_known_tokens() {
        let out = fill_template(
            "Now playing {next_title} by {next_artist}",
            &[("next_title", "Golden Hour"), ("next_artist", "The Larks")],
        );
        assert_eq!(out, "Now playing Golden Hour by The Larks");
    }

    #[test]
    fn test_fill_template_passes_unknown_tokens_through() {
        let out = fill_template("Hello {mystery_token}", &[("mystery_token", "value")]);
        assert_eq!(out, "Hello {mystery_token}");
    }

    #[test]
    fn test_daypart_buckets() {
        assert_eq!(Daypart::from_hour(6), Daypart::Morning);
        assert_eq!(Daypart::from_hour(11), Daypart::Midday);
        assert_eq!(Daypart::from_hour(15), Daypart::Afternoon);
        assert_eq!(Daypart::from_hour(20), Daypart::Evening);
        assert_eq!(Daypart::from_hour(2), Daypart::Evening);
    }

    #[test]
    fn test_system_prompt_includes_persona_parts() {
        let prompt = build_system_prompt(&persona());
        assert!(prompt.contains("Ricky Rivers"));
        assert!(prompt.contains("fast-talking veteran"));
        assert!(prompt.contains("keep it locked"));
        assert!(prompt.contains("every bassist in town"));
    }

    #[test]
    fn test_system_prompt_without_optional_parts() {
        let bare = DjPersona {
            catchphrases: vec![],
            lore: None,
            ..persona()
        };
        let prompt = build_system_prompt(&bare);
        assert!(!prompt.contains("Catchphrases"));
        assert!(prompt.contains("stay fully in character"));
    }

    #[test]
    fn test_intro_prompt_names_next_song() {
        let located = LocatedSongs {
            previous: None,
            next: Some(song_ref("Golden Hour", "The Larks")),
        };
        let prompt = build_user_prompt(VoiceTrackType::Intro, &located, 7);
        assert!(prompt.contains("morning"));
        assert!(prompt.contains("\"Golden Hour\" by The Larks"));
        assert!(prompt.contains("2 to 4 sentences"));
        assert!(prompt.contains("no stage directions"));
    }

    #[test]
    fn test_intro_prompt_degrades_without_next_song() {
        let prompt = build_user_prompt(VoiceTrackType::Intro, &LocatedSongs::default(), 7);
        assert!(prompt.contains("without naming any specific song"));
        assert!(!prompt.contains('{'), "no unfilled tokens in degraded prompt");
    }

    #[test]
    fn test_back_announce_intro_names_both_songs() {
        let located = LocatedSongs {
            previous: Some(song_ref("Last Call", "Neon Drive")),
            next: Some(song_ref("Golden Hour", "The Larks")),
        };
        let prompt = build_user_prompt(VoiceTrackType::BackAnnounceIntro, &located, 12);
        assert!(prompt.contains("midday"));
        assert!(prompt.contains("\"Last Call\" by Neon Drive"));
        assert!(prompt.contains("\"Golden Hour\" by The Larks"));
    }

    #[test]
    fn test_back_announce_prompt_names_previous_song() {
        let located = LocatedSongs {
            previous: Some(song_ref("Last Call", "Neon Drive")),
            next: None,
        };
        let prompt = build_user_prompt(VoiceTrackType::BackAnnounce, &located, 16);
        assert!(prompt.contains("afternoon"));
        assert!(prompt.contains("\"Last Call\" by Neon Drive"));
    }
}
