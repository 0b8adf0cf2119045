use super::settings::{
    SettingsDraft, LANGUAGE_MUST_BE_SELECTED, MAX_PARTICIPANTS_INVALID, MAX_WORDS_INVALID,
    MAX_WORDS_SMALLER_THAN_MIN_WORDS, MIN_WORDS_INVALID, ROUNDS_PER_USER_INVALID,
    TITLE_MUST_BE_SET, WORDS_VISIBLE_INVALID,
};
use crate::entities::games::GamePrivacy;

fn valid_draft() -> SettingsDraft {
    SettingsDraft {
        locale: Some("en".to_string()),
        privacy: None,
        min_words: Some(1),
        max_words: Some(100),
        rounds_per_user: Some(2),
        words_visible: Some(0),
        max_participants: None,
    }
}

#[test]
fn accepts_a_well_formed_draft() {
    let settings = valid_draft().validate("My story").expect("should be valid");
    assert_eq!(settings.locale, "en");
    assert_eq!(settings.min_words, 1);
    assert_eq!(settings.max_words, 100);
    assert_eq!(settings.rounds_per_user, 2);
    assert_eq!(settings.max_participants, 0); // unset means unlimited
    assert_eq!(settings.privacy, GamePrivacy::Private); // default
}

#[test]
fn rejects_max_words_below_min_words() {
    let mut draft = valid_draft();
    draft.min_words = Some(10);
    draft.max_words = Some(5);
    let codes = draft.validate("My story").unwrap_err();
    assert!(codes.contains(&MAX_WORDS_SMALLER_THAN_MIN_WORDS));
}

#[test]
fn reports_every_violation_in_one_pass() {
    let draft = SettingsDraft {
        locale: None,
        privacy: None,
        min_words: Some(0),
        max_words: Some(50),
        rounds_per_user: None,
        words_visible: Some(-1),
        max_participants: Some(1),
    };
    let codes = draft.validate("").unwrap_err();
    assert!(codes.contains(&MIN_WORDS_INVALID));
    assert!(codes.contains(&ROUNDS_PER_USER_INVALID));
    assert!(codes.contains(&WORDS_VISIBLE_INVALID));
    assert!(codes.contains(&MAX_PARTICIPANTS_INVALID));
    assert!(codes.contains(&LANGUAGE_MUST_BE_SELECTED));
    assert!(codes.contains(&TITLE_MUST_BE_SET));
    assert_eq!(codes.len(), 6);
}

#[test]
fn max_participants_zero_means_unlimited_and_is_allowed() {
    let mut draft = valid_draft();
    draft.max_participants = Some(0);
    assert!(draft.validate("My story").is_ok());
}

#[test]
fn max_participants_one_is_rejected() {
    let mut draft = valid_draft();
    draft.max_participants = Some(1);
    let codes = draft.validate("My story").unwrap_err();
    assert_eq!(codes, vec![MAX_PARTICIPANTS_INVALID]);
}

#[test]
fn values_beyond_the_stored_range_are_rejected_not_truncated() {
    // 2^32 + 1 would wrap to 1 if narrowed blindly.
    let mut draft = valid_draft();
    draft.min_words = Some((u32::MAX as i64) + 2);
    draft.max_words = Some((u32::MAX as i64) + 10);
    let codes = draft.validate("My story").unwrap_err();
    assert!(codes.contains(&MIN_WORDS_INVALID));
    assert!(codes.contains(&MAX_WORDS_INVALID));

    let mut draft = valid_draft();
    draft.words_visible = Some((u32::MAX as i64) + 1);
    draft.max_participants = Some((u32::MAX as i64) + 1);
    draft.rounds_per_user = Some(i64::MAX);
    let codes = draft.validate("My story").unwrap_err();
    assert!(codes.contains(&WORDS_VISIBLE_INVALID));
    assert!(codes.contains(&MAX_PARTICIPANTS_INVALID));
    assert!(codes.contains(&ROUNDS_PER_USER_INVALID));
}

#[test]
fn empty_title_is_rejected() {
    let codes = valid_draft().validate("").unwrap_err();
    assert_eq!(codes, vec![TITLE_MUST_BE_SET]);
}
