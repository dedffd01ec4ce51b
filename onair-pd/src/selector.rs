//! Constraint filtering and candidate scoring
//!
//! For each music slot the selector walks the slot's category fallback
//! chain, filters each category's candidates against the hour's running
//! constraints, scores the survivors, and takes the top score. Greedy and
//! single-pass: an early sub-optimal placement is never revisited. An hour
//! has tens of slots and must resolve fast enough for interactive admin
//! tooling, so no backtracking search is attempted.

use crate::config::ProgramConfig;
use crate::pool::CandidatePool;
use crate::types::{ClockSlot, RotationCategory, Song, VocalGender};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};
use uuid::Uuid;

/// Per-hour scheduling state, updated as songs are placed.
///
/// Purely in-memory and scoped to one resolution call; later slots'
/// eligibility depends on it (used-song exclusion, artist separation,
/// running gender balance), which is why slot processing is sequential.
#[derive(Debug, Default)]
pub struct HourState {
    used_songs: HashSet<Uuid>,
    recent_artists: VecDeque<String>,
    gender_counts: HashMap<VocalGender, u32>,
    placed: u32,
}

impl HourState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placement: mark the song used, push its artist onto the
    /// trailing separation window, bump the running gender counts.
    pub fn record_placement(&mut self, song: &Song, config: &ProgramConfig) {
        self.used_songs.insert(song.id);
        self.recent_artists.push_back(song.artist.to_lowercase());
        while self.recent_artists.len() > config.artist_separation {
            self.recent_artists.pop_front();
        }
        *self.gender_counts.entry(song.vocal_gender).or_insert(0) += 1;
        self.placed += 1;
    }

    pub fn songs_placed(&self) -> u32 {
        self.placed
    }

    fn is_used(&self, song_id: Uuid) -> bool {
        self.used_songs.contains(&song_id)
    }

    fn artist_blocked(&self, artist: &str) -> bool {
        let artist = artist.to_lowercase();
        self.recent_artists.iter().any(|a| *a == artist)
    }

    /// Share of placements so far by one vocal gender (0.0 before any
    /// placement, which leaves every targeted gender under its target)
    fn gender_share(&self, gender: VocalGender) -> f64 {
        if self.placed == 0 {
            return 0.0;
        }
        let count = self.gender_counts.get(&gender).copied().unwrap_or(0);
        f64::from(count) / f64::from(self.placed)
    }
}

/// Pick the best eligible song for one music slot, or `None` when the
/// declared category and both fallbacks are exhausted (a best-effort
/// scheduling outcome, not an error).
pub fn select_song<'a>(
    slot: &ClockSlot,
    pool: &'a CandidatePool,
    state: &HourState,
    config: &ProgramConfig,
    hour_start: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Option<&'a Song> {
    if !slot.category.is_music() {
        return None;
    }

    for category in category_chain(slot.category) {
        if let Some(song) = select_from_category(slot, category, pool, state, config, hour_start, rng)
        {
            if category != slot.category {
                debug!(
                    position = slot.position,
                    declared = slot.category.as_str(),
                    fallback = category.as_str(),
                    "Filled slot from fallback category"
                );
            }
            return Some(song);
        }
    }

    debug!(
        position = slot.position,
        category = slot.category.as_str(),
        "No eligible candidate in category chain; slot left unresolved"
    );
    None
}

/// Declared category first, then its ordered fallbacks
fn category_chain(category: RotationCategory) -> impl Iterator<Item = RotationCategory> {
    std::iter::once(category).chain(category.fallback_categories().iter().copied())
}

fn select_from_category<'a>(
    slot: &ClockSlot,
    category: RotationCategory,
    pool: &'a CandidatePool,
    state: &HourState,
    config: &ProgramConfig,
    hour_start: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Option<&'a Song> {
    let cooldown_cutoff = hour_start - Duration::hours(config.cooldown_hours(category));

    let mut best: Option<(&Song, f64)> = None;
    for song in pool.candidates(category) {
        if !is_eligible(song, pool, state, cooldown_cutoff) {
            continue;
        }
        let score = score_song(song, slot, pool, state, config, rng);
        trace!(song_id = %song.id, score, "Scored candidate");
        // Strictly-greater keeps the earlier candidate on ties (pool
        // iteration order is the tiebreak)
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((song, score)),
        }
    }

    best.map(|(song, _)| song)
}

/// Eligibility filter: not already used this hour, artist outside the
/// trailing separation window, last qualifying play outside the tried
/// category's cooldown window.
fn is_eligible(
    song: &Song,
    pool: &CandidatePool,
    state: &HourState,
    cooldown_cutoff: DateTime<Utc>,
) -> bool {
    if state.is_used(song.id) {
        return false;
    }
    if state.artist_blocked(&song.artist) {
        return false;
    }
    match pool.last_played(song.id) {
        Some(last) => last < cooldown_cutoff,
        None => true,
    }
}

/// Weighted score of one surviving candidate.
///
/// Terms: a random term (run-to-run rotation variety), freshness (inverse
/// of play count relative to the pool maximum), tempo fit against the
/// slot's preference, and a gender-variety bonus toward whichever vocal
/// gender is under its target share for the hour so far.
fn score_song(
    song: &Song,
    slot: &ClockSlot,
    pool: &CandidatePool,
    state: &HourState,
    config: &ProgramConfig,
    rng: &mut impl Rng,
) -> f64 {
    let weights = &config.weights;

    let random = rng.gen::<f64>();

    let freshness = if pool.max_play_count() <= 0 {
        1.0
    } else {
        1.0 - (song.play_count as f64 / pool.max_play_count() as f64)
    };

    let tempo = match slot.tempo_preference {
        Some(pref) if pref == song.tempo_category => config.tempo_match_bonus,
        _ => config.tempo_baseline,
    };

    let gender = if state.gender_share(song.vocal_gender) < config.gender_target(song.vocal_gender)
    {
        1.0
    } else {
        0.0
    };

    weights.random * random
        + weights.freshness * freshness
        + weights.tempo * tempo
        + weights.gender * gender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringWeights;
    use crate::types::{SlotType, TempoCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn song(title: &str, artist: &str, category: RotationCategory, play_count: i64) -> Song {
        Song {
            id: Uuid::new_v4(),
            title: title.to_string(),
            artist: artist.to_string(),
            rotation_category: category,
            vocal_gender: VocalGender::Female,
            tempo_category: TempoCategory::Medium,
            play_count,
            last_played_at: None,
        }
    }

    fn music_slot(position: i64, category: RotationCategory) -> ClockSlot {
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

    /// Config with the random term zeroed so selections are deterministic
    fn deterministic_config() -> ProgramConfig {
        ProgramConfig {
            weights: ScoringWeights {
                random: 0.0,
                freshness: 1.0,
                tempo: 0.25,
                gender: 0.15,
            },
            ..ProgramConfig::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_prefers_less_played_song() {
        let fresh = song("Fresh", "Artist One", RotationCategory::A, 2);
        let stale = song("Stale", "Artist Two", RotationCategory::A, 100);
        let fresh_id = fresh.id;
        let pool = CandidatePool::from_songs(vec![stale, fresh]);

        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(
            &music_slot(0, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        )
        .expect("a song should be selected");
        assert_eq!(chosen.id, fresh_id);
    }

    #[test]
    fn test_excludes_songs_used_this_hour() {
        let only = song("Only", "Artist", RotationCategory::A, 0);
        let pool = CandidatePool::from_songs(vec![only.clone()]);
        let config = deterministic_config();

        let mut state = HourState::new();
        state.record_placement(&only, &config);

        let chosen = select_song(
            &music_slot(1, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        );
        assert!(chosen.is_none());
    }

    #[test]
    fn test_artist_separation_blocks_recent_artists() {
        let first = song("First", "Shared Artist", RotationCategory::A, 0);
        let second = song("Second", "shared artist", RotationCategory::A, 0);
        let other = song("Other", "Different Artist", RotationCategory::A, 0);
        let other_id = other.id;
        let pool = CandidatePool::from_songs(vec![second, other]);
        let config = deterministic_config();

        let mut state = HourState::new();
        state.record_placement(&first, &config);

        let chosen = select_song(
            &music_slot(1, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        )
        .expect("the non-blocked artist should be selected");
        assert_eq!(chosen.id, other_id);
    }

    #[test]
    fn test_artist_window_slides_after_three_placements() {
        let config = deterministic_config();
        let mut state = HourState::new();

        let a = song("A", "Artist A", RotationCategory::A, 0);
        state.record_placement(&a, &config);
        state.record_placement(&song("B", "Artist B", RotationCategory::A, 0), &config);
        state.record_placement(&song("C", "Artist C", RotationCategory::A, 0), &config);
        assert!(state.artist_blocked("Artist A"));

        state.record_placement(&song("D", "Artist D", RotationCategory::A, 0), &config);
        // Artist A has aged out of the trailing-3 window
        assert!(!state.artist_blocked("Artist A"));
        assert!(state.artist_blocked("Artist D"));
    }

    #[test]
    fn test_cooldown_excludes_recent_play() {
        let hour_start = Utc::now();
        let mut recent = song("Recent", "Artist One", RotationCategory::A, 0);
        recent.last_played_at = Some(hour_start - Duration::hours(1));
        let mut rested = song("Rested", "Artist Two", RotationCategory::A, 0);
        rested.last_played_at = Some(hour_start - Duration::hours(10));
        let rested_id = rested.id;
        let pool = CandidatePool::from_songs(vec![recent, rested]);

        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(
            &music_slot(0, RotationCategory::A),
            &pool,
            &state,
            &config,
            hour_start,
            &mut rng(),
        )
        .expect("the rested song should be selected");
        assert_eq!(chosen.id, rested_id);
    }

    #[test]
    fn test_falls_back_to_adjacent_category() {
        let hour_start = Utc::now();
        let mut cooling = song("Cooling", "Artist One", RotationCategory::A, 0);
        cooling.last_played_at = Some(hour_start - Duration::hours(1));
        let fallback = song("Fallback", "Artist Two", RotationCategory::B, 0);
        let fallback_id = fallback.id;
        let pool = CandidatePool::from_songs(vec![cooling, fallback]);

        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(
            &music_slot(0, RotationCategory::A),
            &pool,
            &state,
            &config,
            hour_start,
            &mut rng(),
        )
        .expect("fallback category should fill the slot");
        assert_eq!(chosen.id, fallback_id);
    }

    #[test]
    fn test_exhausted_chain_leaves_slot_unresolved() {
        // Pool only has category E songs; an A slot's chain is A, B, C
        let pool = CandidatePool::from_songs(vec![song("E", "Artist", RotationCategory::E, 0)]);
        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(
            &music_slot(0, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        );
        assert!(chosen.is_none());
    }

    #[test]
    fn test_tempo_preference_breaks_freshness_tie() {
        let mut fast = song("Fast", "Artist One", RotationCategory::A, 0);
        fast.tempo_category = TempoCategory::Fast;
        let mut slow = song("Slow", "Artist Two", RotationCategory::A, 0);
        slow.tempo_category = TempoCategory::Slow;
        let fast_id = fast.id;
        let pool = CandidatePool::from_songs(vec![slow, fast]);

        let mut slot = music_slot(0, RotationCategory::A);
        slot.tempo_preference = Some(TempoCategory::Fast);

        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(&slot, &pool, &state, &config, Utc::now(), &mut rng())
            .expect("a song should be selected");
        assert_eq!(chosen.id, fast_id);
    }

    #[test]
    fn test_gender_variety_bonus_favors_under_target_gender() {
        let config = ProgramConfig {
            weights: ScoringWeights {
                random: 0.0,
                freshness: 0.0,
                tempo: 0.0,
                gender: 1.0,
            },
            ..ProgramConfig::default()
        };

        let mut state = HourState::new();
        let mut placed = song("Placed", "Artist X", RotationCategory::A, 0);
        placed.vocal_gender = VocalGender::Female;
        state.record_placement(&placed, &config);
        // Female share is now 1.0, over its 0.45 target

        let mut male = song("Male", "Artist One", RotationCategory::A, 0);
        male.vocal_gender = VocalGender::Male;
        let mut female = song("Female", "Artist Two", RotationCategory::A, 0);
        female.vocal_gender = VocalGender::Female;
        let male_id = male.id;
        let pool = CandidatePool::from_songs(vec![female, male]);

        let chosen = select_song(
            &music_slot(1, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        )
        .expect("a song should be selected");
        assert_eq!(chosen.id, male_id);
    }

    #[test]
    fn test_tie_breaks_by_pool_order() {
        let first = song("First", "Artist One", RotationCategory::A, 0);
        let second = song("Second", "Artist Two", RotationCategory::A, 0);
        let first_id = first.id;
        let pool = CandidatePool::from_songs(vec![first, second]);

        let state = HourState::new();
        let config = deterministic_config();
        let chosen = select_song(
            &music_slot(0, RotationCategory::A),
            &pool,
            &state,
            &config,
            Utc::now(),
            &mut rng(),
        )
        .expect("a song should be selected");
        assert_eq!(chosen.id, first_id);
    }
}
