use proptest::prelude::*;

use super::turn::{is_finished, next_writer_pos, trailing_words, visible_text, word_count};

#[test]
fn empty_story_puts_the_owner_first() {
    // Position 0 is always the owner (implicit join at creation).
    assert_eq!(next_writer_pos(2, 0).unwrap(), 0);
    assert_eq!(next_writer_pos(5, 0).unwrap(), 0);
}

#[test]
fn rotation_is_round_robin_over_join_order() {
    assert_eq!(next_writer_pos(2, 1).unwrap(), 1);
    assert_eq!(next_writer_pos(2, 2).unwrap(), 0);
    assert_eq!(next_writer_pos(3, 4).unwrap(), 1);
    assert_eq!(next_writer_pos(3, 5).unwrap(), 2);
    assert_eq!(next_writer_pos(3, 6).unwrap(), 0);
}

#[test]
fn zero_participants_is_a_precondition_failure() {
    assert!(next_writer_pos(0, 0).is_err());
    assert!(next_writer_pos(0, 3).is_err());
}

#[test]
fn finish_threshold_is_participants_times_rounds() {
    // 2 participants, 1 round each: done at 2 segments, not at 1.
    assert!(!is_finished(2, 1, 1));
    assert!(is_finished(2, 2, 1));
    assert!(is_finished(2, 3, 1));

    // 3 participants, 2 rounds each: done at 6.
    assert!(!is_finished(3, 5, 2));
    assert!(is_finished(3, 6, 2));
}

#[test]
fn word_count_splits_on_single_spaces() {
    assert_eq!(word_count("one"), 1);
    assert_eq!(word_count("the quick brown fox"), 4);
    // Double spaces produce empty words that count, by rule.
    assert_eq!(word_count("a  b"), 3);
}

#[test]
fn trailing_words_returns_the_last_n() {
    assert_eq!(
        trailing_words("the quick brown fox jumps", 3),
        "brown fox jumps"
    );
    assert_eq!(trailing_words("one two", 5), "one two");
    assert_eq!(trailing_words("solo", 1), "solo");
}

#[test]
fn visible_text_shows_trailing_words_of_the_last_segment() {
    let bodies = vec![
        "once upon a time".to_string(),
        "the quick brown fox jumps".to_string(),
    ];
    assert_eq!(visible_text(&bodies, 3), "brown fox jumps");
}

#[test]
fn visible_text_zero_shows_the_full_history() {
    let bodies = vec!["first line".to_string(), "second line".to_string()];
    assert_eq!(visible_text(&bodies, 0), "first line\nsecond line");
}

#[test]
fn visible_text_of_an_empty_story_is_empty() {
    assert_eq!(visible_text(&[], 3), "");
    assert_eq!(visible_text(&[], 0), "");
}

proptest! {
    #[test]
    fn rotation_assigns_segment_i_to_position_i_mod_n(
        n in 1usize..8,
        i in 0usize..64,
    ) {
        prop_assert_eq!(next_writer_pos(n, i).unwrap(), i % n);
    }

    #[test]
    fn game_finishes_exactly_at_the_threshold(
        n in 1usize..8,
        rounds in 1u32..5,
        count in 0usize..64,
    ) {
        let finished = is_finished(n, count, rounds);
        prop_assert_eq!(finished, count >= n * rounds as usize);
    }
}
