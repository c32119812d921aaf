//! Game replay over SAN token streams.
//!
//! The contract surface with the PGN layer: it hands the core an ordered
//! list of already-cleaned SAN tokens (move numbers and result markers
//! stripped) and receives the full board history back — the initial
//! position plus one successor per token.

use crate::board::board_state::BoardState;
use crate::errors::PositionError;

/// Replay `tokens` from the standard starting position.
pub fn replay_san_tokens(tokens: &[&str]) -> Result<Vec<BoardState>, PositionError> {
    replay_san_tokens_from(BoardState::new_game(), tokens)
}

/// Replay `tokens` from an explicit starting position. Returns one board
/// per token in addition to the initial one; the first failing token
/// aborts the whole replay.
pub fn replay_san_tokens_from(
    initial: BoardState,
    tokens: &[&str],
) -> Result<Vec<BoardState>, PositionError> {
    let mut history = Vec::with_capacity(tokens.len() + 1);
    let mut current = initial;

    for token in tokens {
        let next = current.apply_san(token)?;
        history.push(current);
        current = next;
    }
    history.push(current);

    Ok(history)
}
