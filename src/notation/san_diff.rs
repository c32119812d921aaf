//! SAN reconstruction from consecutive positions.
//!
//! Given two boards known to be one legal move apart, rebuilds the SAN
//! token that connects them. Candidate enumeration is shared with the
//! executor so emitted disambiguation always matches what the executor
//! would accept, and the check marker comes from the check detector (mate
//! is never inferred, so `#` is never emitted).

use crate::board::board_state::BoardState;
use crate::board::chess_rules::{castle_geometry, promotion_rank};
use crate::board::chess_types::*;
use crate::errors::PositionError;
use crate::notation::algebraic::{file_to_char, rank_to_char, square_to_algebraic};
use crate::notation::san_apply::{candidate_origins, en_passant_victim};
use crate::notation::san_parser::StandardMove;
use crate::rules::check_detection::is_king_in_check;

/// Reconstruct the SAN token that transformed `before` into `after`.
pub fn diff_san(before: &BoardState, after: &BoardState) -> Result<String, PositionError> {
    if after.side_to_move != before.side_to_move.opposite() {
        return Err(inconsistent("the side to move did not alternate"));
    }

    let changed: Vec<Square> = (0..64u8)
        .filter(|&square| before.placement[square as usize] != after.placement[square as usize])
        .collect();

    let mut token = match detect_castle(before, after, &changed) {
        Some(castle) => castle.to_owned(),
        None => build_standard_token(before, after, &changed)?,
    };

    if is_king_in_check(after, after.side_to_move) {
        token.push('+');
    }

    Ok(token)
}

fn detect_castle(before: &BoardState, after: &BoardState, changed: &[Square]) -> Option<&'static str> {
    if changed.len() != 4 {
        return None;
    }

    let color = before.side_to_move;
    let king = Some(Piece::new(color, PieceKind::King));
    let rook = Some(Piece::new(color, PieceKind::Rook));

    for (kingside, notation) in [(true, "O-O"), (false, "O-O-O")] {
        let geometry = castle_geometry(color, kingside);
        let mut squares = [
            geometry.king_from,
            geometry.king_to,
            geometry.rook_from,
            geometry.rook_to,
        ];
        squares.sort_unstable();

        let mut sorted_changed = [0u8; 4];
        sorted_changed.copy_from_slice(changed);
        sorted_changed.sort_unstable();

        if squares != sorted_changed {
            continue;
        }
        if before.placement[geometry.king_from as usize] == king
            && before.placement[geometry.rook_from as usize] == rook
            && after.placement[geometry.king_to as usize] == king
            && after.placement[geometry.rook_to as usize] == rook
            && after.placement[geometry.king_from as usize].is_none()
            && after.placement[geometry.rook_from as usize].is_none()
        {
            return Some(notation);
        }
    }

    None
}

fn build_standard_token(
    before: &BoardState,
    after: &BoardState,
    changed: &[Square],
) -> Result<String, PositionError> {
    let color = before.side_to_move;

    let mut origins: Vec<(Square, Piece)> = Vec::new();
    let mut destinations: Vec<(Square, Piece)> = Vec::new();
    let mut removed_enemies: Vec<(Square, Piece)> = Vec::new();

    for &square in changed {
        let cell_before = before.placement[square as usize];
        let cell_after = after.placement[square as usize];
        match (cell_before, cell_after) {
            (Some(piece), None) if piece.color == color => origins.push((square, piece)),
            (Some(piece), None) => removed_enemies.push((square, piece)),
            (_, Some(piece)) if piece.color == color => destinations.push((square, piece)),
            _ => {
                return Err(inconsistent(&format!(
                    "square {} changed in a way no single move explains",
                    square_name(square)
                )))
            }
        }
    }

    let (&(origin, moved), &(destination, landed)) = match (origins.as_slice(), destinations.as_slice())
    {
        ([origin], [destination]) => (origin, destination),
        _ => return Err(inconsistent("the boards do not show exactly one moved piece")),
    };

    // A third changed square is only coherent as an en-passant victim.
    let en_passant_capture = match removed_enemies.as_slice() {
        [] => false,
        [(victim_square, victim)] => {
            let coherent = moved.kind == PieceKind::Pawn
                && victim.kind == PieceKind::Pawn
                && before.en_passant_square == Some(destination)
                && before.placement[destination as usize].is_none()
                && *victim_square == en_passant_victim(destination, color);
            if !coherent {
                return Err(inconsistent("a removed piece is not an en-passant victim"));
            }
            true
        }
        _ => return Err(inconsistent("more than one enemy piece disappeared")),
    };

    let promotion = if landed.kind != moved.kind {
        let valid = moved.kind == PieceKind::Pawn
            && square_rank(destination) == promotion_rank(color)
            && !matches!(landed.kind, PieceKind::Pawn | PieceKind::King);
        if !valid {
            return Err(inconsistent("the moved piece changed identity without a promotion"));
        }
        Some(landed.kind)
    } else {
        None
    };

    let is_capture = before.placement[destination as usize].is_some() || en_passant_capture;

    // The executor's candidate rule, replayed against the pre-move board.
    let probe = StandardMove {
        piece: moved.kind,
        origin_file: None,
        origin_rank: None,
        is_capture,
        destination,
        promotion: None,
    };
    let candidates = candidate_origins(before, color, &probe);
    if !candidates.contains(&origin) {
        return Err(inconsistent("the moved piece cannot reach the destination"));
    }

    let mut token = String::new();
    match moved.kind {
        PieceKind::Pawn => {
            if is_capture {
                token.push(file_to_char(square_file(origin)));
            }
        }
        kind => {
            token.push(kind.san_letter());
            token.push_str(&minimal_disambiguation(&candidates, origin));
        }
    }
    if is_capture {
        token.push('x');
    }
    token.push_str(&square_name(destination));
    if let Some(promoted) = promotion {
        token.push('=');
        token.push(promoted.san_letter());
    }

    Ok(token)
}

/// The shortest origin hint that singles `origin` out of `candidates`:
/// file alone, else rank alone, else both.
fn minimal_disambiguation(candidates: &[Square], origin: Square) -> String {
    if candidates.len() <= 1 {
        return String::new();
    }

    let file = square_file(origin);
    let rank = square_rank(origin);

    let same_file = candidates.iter().filter(|&&sq| square_file(sq) == file).count();
    if same_file == 1 {
        return file_to_char(file).to_string();
    }

    let same_rank = candidates.iter().filter(|&&sq| square_rank(sq) == rank).count();
    if same_rank == 1 {
        return rank_to_char(rank).to_string();
    }

    format!("{}{}", file_to_char(file), rank_to_char(rank))
}

fn square_name(square: Square) -> String {
    square_to_algebraic(square).unwrap_or_else(|_| "??".to_owned())
}

fn inconsistent(reason: &str) -> PositionError {
    PositionError::InconsistentDiff(reason.to_owned())
}
