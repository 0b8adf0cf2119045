//! Turn rotation and story-progression facts.
//!
//! The rotation is a pure function of (participant count, contribution
//! count): segment `i` belongs to the participant at position
//! `i mod participant_count`. No "whose turn" cursor is stored anywhere;
//! the append-only segment sequence is the single source of truth, and the
//! modulo recovers the rotation deterministically because submissions are
//! only ever accepted in rotation order.

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Position of the writer who holds the turn for the next segment.
///
/// With an empty story this is position 0, the owner, who always joins
/// first and bootstraps the round.
///
/// Zero participants violates the game invariant (the owner is always a
/// participant); it is reported as a precondition failure, never a panic.
pub fn next_writer_pos(
    participant_count: usize,
    contribution_count: usize,
) -> Result<usize, DomainError> {
    if participant_count == 0 {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            "game has no participants",
        ));
    }
    Ok(contribution_count % participant_count)
}

/// Whether the story is complete: every participant has written
/// `rounds_per_user` segments. Evaluated only after an append.
pub fn is_finished(
    participant_count: usize,
    contribution_count: usize,
    rounds_per_user: u32,
) -> bool {
    if participant_count == 0 {
        return false;
    }
    contribution_count >= participant_count * rounds_per_user as usize
}

/// Word count as the game rules define it: split on single spaces.
///
/// This is deliberately not `split_whitespace`; runs of spaces produce
/// empty "words" and count, matching how segment lengths have always been
/// judged.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// The trailing `n` words of `text`, space-joined.
pub fn trailing_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    let start = words.len().saturating_sub(n);
    words[start..].join(" ")
}

/// What the next writer is allowed to see of the story so far.
///
/// `words_visible == 0` means the full newline-joined history; otherwise
/// only the trailing `words_visible` words of the most recent segment.
pub fn visible_text(bodies: &[String], words_visible: u32) -> String {
    match bodies.last() {
        None => String::new(),
        Some(last) if words_visible > 0 => trailing_words(last, words_visible as usize),
        Some(_) => bodies.join("\n"),
    }
}
