//! Game settings and their creation-time validation.

use serde::{Deserialize, Serialize};

use crate::entities::games::GamePrivacy;

// Stable violation codes reported to clients. Every failed rule is
// reported in one pass; callers branch on codes, not messages.
pub const MAX_WORDS_SMALLER_THAN_MIN_WORDS: &str = "max_words_smaller_than_min_words";
pub const MAX_WORDS_INVALID: &str = "max_words_invalid";
pub const MIN_WORDS_INVALID: &str = "min_words_invalid";
pub const ROUNDS_PER_USER_INVALID: &str = "rounds_per_user_invalid";
pub const WORDS_VISIBLE_INVALID: &str = "words_visible_invalid";
pub const MAX_PARTICIPANTS_INVALID: &str = "max_participants_invalid";
pub const LANGUAGE_MUST_BE_SELECTED: &str = "language_must_be_selected";
pub const TITLE_MUST_BE_SET: &str = "title_must_be_set";

/// Settings as proposed by the client at game creation. Everything is
/// optional here; `validate` decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDraft {
    pub locale: Option<String>,
    pub privacy: Option<GamePrivacy>,
    #[serde(rename = "minWords")]
    pub min_words: Option<i64>,
    #[serde(rename = "maxWords")]
    pub max_words: Option<i64>,
    #[serde(rename = "roundsPerUser")]
    pub rounds_per_user: Option<i64>,
    #[serde(rename = "wordsVisible")]
    pub words_visible: Option<i64>,
    #[serde(rename = "maxParticipants")]
    pub max_participants: Option<i64>,
}

/// Validated, immutable settings of a created game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSettings {
    pub locale: String,
    pub privacy: GamePrivacy,
    pub min_words: u32,
    pub max_words: u32,
    pub rounds_per_user: u32,
    /// 0 means "show the full story history" to the next writer; otherwise
    /// only the trailing N words of the most recent segment are shown.
    pub words_visible: u32,
    /// 0 means unlimited.
    pub max_participants: u32,
}

impl SettingsDraft {
    /// Check every rule independently and collect all violations.
    ///
    /// Runs once, at game creation; settings are immutable afterwards and
    /// never re-validated.
    pub fn validate(&self, title: &str) -> Result<GameSettings, Vec<&'static str>> {
        // Accepted settings narrow to u32; anything beyond that range is
        // invalid, never silently truncated.
        const RANGE_MAX: i64 = u32::MAX as i64;

        let mut violations: Vec<&'static str> = Vec::new();

        if let (Some(min), Some(max)) = (self.min_words, self.max_words) {
            if max < min {
                violations.push(MAX_WORDS_SMALLER_THAN_MIN_WORDS);
            }
        }
        if !matches!(self.max_words, Some(v) if (1..=RANGE_MAX).contains(&v)) {
            violations.push(MAX_WORDS_INVALID);
        }
        if !matches!(self.min_words, Some(v) if (1..=RANGE_MAX).contains(&v)) {
            violations.push(MIN_WORDS_INVALID);
        }
        if !matches!(self.rounds_per_user, Some(v) if (1..=RANGE_MAX).contains(&v)) {
            violations.push(ROUNDS_PER_USER_INVALID);
        }
        if matches!(self.words_visible, Some(v) if !(0..=RANGE_MAX).contains(&v)) {
            violations.push(WORDS_VISIBLE_INVALID);
        }
        if matches!(self.max_participants, Some(v) if v != 0 && !(2..=RANGE_MAX).contains(&v)) {
            violations.push(MAX_PARTICIPANTS_INVALID);
        }
        if self.locale.as_deref().map_or(true, str::is_empty) {
            violations.push(LANGUAGE_MUST_BE_SELECTED);
        }
        if title.is_empty() {
            violations.push(TITLE_MUST_BE_SET);
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(GameSettings {
            locale: self.locale.clone().unwrap_or_default(),
            privacy: self.privacy.unwrap_or(GamePrivacy::Private),
            min_words: self.min_words.unwrap_or_default() as u32,
            max_words: self.max_words.unwrap_or_default() as u32,
            rounds_per_user: self.rounds_per_user.unwrap_or_default() as u32,
            words_visible: self.words_visible.unwrap_or(0) as u32,
            max_participants: self.max_participants.unwrap_or(0) as u32,
        })
    }
}
