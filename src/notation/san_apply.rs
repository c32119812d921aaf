//! SAN execution against a board value.
//!
//! Resolves a parsed SAN intent to the unique origin square it names and
//! produces the successor position: castling, captures (including the
//! en-passant victim one rank behind the destination), promotion, and all
//! metadata bookkeeping happen in one transition. On failure the input
//! board is untouched and no partial state escapes.

use crate::board::board_state::BoardState;
use crate::board::chess_rules::{castle_geometry, promotion_rank};
use crate::board::chess_types::*;
use crate::errors::PositionError;
use crate::moves::bishop_moves::bishop_reaches;
use crate::moves::king_moves::king_reaches;
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::{pawn_advances, pawn_attacks_square};
use crate::moves::queen_moves::queen_reaches;
use crate::moves::rook_moves::rook_reaches;
use crate::notation::san_parser::{parse_san, CastleSide, SanMove, StandardMove};

/// Apply one SAN token and return the successor position.
pub fn apply_san(board: &BoardState, token: &str) -> Result<BoardState, PositionError> {
    match parse_san(token)? {
        SanMove::Castle(side) => apply_castle(board, side, token),
        SanMove::Standard(mv) => apply_standard(board, &mv, token),
    }
}

/// Enumerate every piece of `color` matching the intent's kind that could
/// geometrically reach its destination, narrowed by any origin hints the
/// token carries. Shared with the differencer so disambiguation agrees in
/// both directions.
pub fn candidate_origins(board: &BoardState, color: Color, mv: &StandardMove) -> Vec<Square> {
    let mut candidates = Vec::new();

    for from in 0..64u8 {
        let Some(piece) = board.placement[from as usize] else {
            continue;
        };
        if piece.color != color || piece.kind != mv.piece {
            continue;
        }

        let reaches = match mv.piece {
            PieceKind::Pawn => pawn_candidate_reaches(board, color, from, mv),
            PieceKind::Knight => knight_reaches(from, mv.destination),
            PieceKind::Bishop => bishop_reaches(&board.placement, from, mv.destination),
            PieceKind::Rook => rook_reaches(&board.placement, from, mv.destination),
            PieceKind::Queen => queen_reaches(&board.placement, from, mv.destination),
            PieceKind::King => king_reaches(from, mv.destination),
        };
        if !reaches {
            continue;
        }

        if let Some(file) = mv.origin_file {
            if square_file(from) != file {
                continue;
            }
        }
        if let Some(rank) = mv.origin_rank {
            if square_rank(from) != rank {
                continue;
            }
        }

        candidates.push(from);
    }

    candidates
}

/// Pawn geometry splits on the capture marker: a capture move needs a
/// diagonal step onto an enemy occupant or the en-passant target, a quiet
/// move needs an open advance.
fn pawn_candidate_reaches(board: &BoardState, color: Color, from: Square, mv: &StandardMove) -> bool {
    if mv.is_capture {
        let target_is_enemy =
            matches!(board.placement[mv.destination as usize], Some(piece) if piece.color != color);
        let target_is_en_passant = board.en_passant_square == Some(mv.destination)
            && board.placement[mv.destination as usize].is_none();
        (target_is_enemy || target_is_en_passant)
            && pawn_attacks_square(color, from, mv.destination)
    } else {
        pawn_advances(&board.placement, color, from, mv.destination)
    }
}

fn apply_castle(
    board: &BoardState,
    side: CastleSide,
    token: &str,
) -> Result<BoardState, PositionError> {
    let color = board.side_to_move;
    let kingside = side == CastleSide::Kingside;

    let required = match (color, kingside) {
        (Color::Light, true) => CASTLE_LIGHT_KINGSIDE,
        (Color::Light, false) => CASTLE_LIGHT_QUEENSIDE,
        (Color::Dark, true) => CASTLE_DARK_KINGSIDE,
        (Color::Dark, false) => CASTLE_DARK_QUEENSIDE,
    };
    if (board.castling_rights & required) == 0 {
        return Err(illegal(token, "castling rights for that side are gone"));
    }

    let geometry = castle_geometry(color, kingside);

    let king_home = board.placement[geometry.king_from as usize];
    if king_home != Some(Piece::new(color, PieceKind::King)) {
        return Err(illegal(token, "king is not on its home square"));
    }
    let rook_home = board.placement[geometry.rook_from as usize];
    if rook_home != Some(Piece::new(color, PieceKind::Rook)) {
        return Err(illegal(token, "rook is not on its home square"));
    }

    let (low, high) = if geometry.rook_from < geometry.king_from {
        (geometry.rook_from, geometry.king_from)
    } else {
        (geometry.king_from, geometry.rook_from)
    };
    for square in low + 1..high {
        if board.placement[square as usize].is_some() {
            return Err(illegal(token, "squares between king and rook are occupied"));
        }
    }

    let mut next = board.clone();
    next.placement[geometry.king_from as usize] = None;
    next.placement[geometry.rook_from as usize] = None;
    next.placement[geometry.king_to as usize] = Some(Piece::new(color, PieceKind::King));
    next.placement[geometry.rook_to as usize] = Some(Piece::new(color, PieceKind::Rook));

    next.castling_rights &= match color {
        Color::Light => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
    };
    next.en_passant_square = None;
    next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    finish_turn(&mut next, color);

    Ok(next)
}

fn apply_standard(
    board: &BoardState,
    mv: &StandardMove,
    token: &str,
) -> Result<BoardState, PositionError> {
    let color = board.side_to_move;
    let destination = mv.destination;

    if matches!(board.placement[destination as usize], Some(piece) if piece.color == color) {
        return Err(illegal(token, "destination holds a piece of the moving color"));
    }

    let origin = match candidate_origins(board, color, mv).as_slice() {
        [origin] => *origin,
        [] => return Err(illegal(token, "no piece of that kind can reach the destination")),
        _ => return Err(illegal(token, "more than one piece can reach the destination")),
    };

    let destination_rank = square_rank(destination);
    if mv.piece == PieceKind::Pawn
        && destination_rank == promotion_rank(color)
        && mv.promotion.is_none()
    {
        return Err(illegal(token, "pawn reaches the last rank without a promotion piece"));
    }
    if mv.promotion.is_some() && destination_rank != promotion_rank(color) {
        return Err(illegal(token, "promotion is only valid on the last rank"));
    }

    let capture_square = if board.placement[destination as usize].is_some() {
        Some(destination)
    } else if mv.piece == PieceKind::Pawn
        && board.en_passant_square == Some(destination)
        && square_file(origin) != square_file(destination)
    {
        // The captured pawn sits one rank behind the destination.
        Some(en_passant_victim(destination, color))
    } else {
        None
    };

    let mut next = board.clone();
    next.placement[origin as usize] = None;
    if let Some(victim) = capture_square {
        next.placement[victim as usize] = None;
    }
    next.placement[destination as usize] =
        Some(Piece::new(color, mv.promotion.unwrap_or(mv.piece)));

    update_castling_rights(&mut next, color, origin, destination, mv.piece);

    // The target only survives the double push that creates it.
    let origin_rank = square_rank(origin);
    next.en_passant_square = if mv.piece == PieceKind::Pawn
        && (origin_rank as i8 - destination_rank as i8).abs() == 2
    {
        Some((origin + destination) / 2)
    } else {
        None
    };

    if mv.piece == PieceKind::Pawn || capture_square.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    finish_turn(&mut next, color);

    Ok(next)
}

/// Square of the pawn removed by an en-passant capture onto `destination`.
#[inline]
pub fn en_passant_victim(destination: Square, capturing_color: Color) -> Square {
    match capturing_color {
        Color::Light => destination - 8,
        Color::Dark => destination + 8,
    }
}

fn finish_turn(next: &mut BoardState, moved_color: Color) {
    if moved_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = moved_color.opposite();
}

fn update_castling_rights(
    board: &mut BoardState,
    moving_color: Color,
    from: Square,
    to: Square,
    moved_piece: PieceKind,
) {
    if moved_piece == PieceKind::King {
        if moving_color == Color::Light {
            board.castling_rights &= !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE);
        } else {
            board.castling_rights &= !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        }
    }

    if moved_piece == PieceKind::Rook {
        match from {
            0 => board.castling_rights &= !CASTLE_LIGHT_QUEENSIDE,
            7 => board.castling_rights &= !CASTLE_LIGHT_KINGSIDE,
            56 => board.castling_rights &= !CASTLE_DARK_QUEENSIDE,
            63 => board.castling_rights &= !CASTLE_DARK_KINGSIDE,
            _ => {}
        }
    }

    // Capturing a rook on its original square also removes that right.
    match to {
        0 => board.castling_rights &= !CASTLE_LIGHT_QUEENSIDE,
        7 => board.castling_rights &= !CASTLE_LIGHT_KINGSIDE,
        56 => board.castling_rights &= !CASTLE_DARK_QUEENSIDE,
        63 => board.castling_rights &= !CASTLE_DARK_KINGSIDE,
        _ => {}
    }
}

fn illegal(token: &str, reason: &str) -> PositionError {
    PositionError::IllegalMove(format!("cannot apply '{token}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::apply_san;
    use crate::board::board_state::BoardState;
    use crate::errors::PositionError;

    fn applied_fen(fen: &str, token: &str) -> String {
        let board = BoardState::from_fen(fen).expect("FEN should parse");
        let next = board.apply_san(token).expect("move should apply");
        next.get_fen()
    }

    #[test]
    fn castling_moves_both_pieces_and_clears_rights() {
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/8/RNBQK2R w KQkq - 0 1", "O-O"),
            "rnbqkbnr/pppppppp/8/8/8/8/8/RNBQ1RK1 b kq - 1 1"
        );
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R3KBNR w KQkq - 0 1", "O-O-O"),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/2KR1BNR b kq - 1 1"
        );
        assert_eq!(
            applied_fen("rnbqk2r/8/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", "O-O"),
            "rnbq1rk1/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 1 2"
        );
        assert_eq!(
            applied_fen("r3kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", "O-O-O"),
            "2kr1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 1 2"
        );
    }

    #[test]
    fn castling_without_rights_is_rejected() {
        let board = BoardState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/8/RNBQK2R w kq - 0 1")
            .expect("FEN should parse");
        assert!(matches!(
            board.apply_san("O-O"),
            Err(PositionError::IllegalMove(_))
        ));
    }

    #[test]
    fn castling_through_occupied_squares_is_rejected() {
        let board = BoardState::new_game();
        assert!(matches!(
            board.apply_san("O-O"),
            Err(PositionError::IllegalMove(_))
        ));
    }

    #[test]
    fn pawn_pushes_set_the_en_passant_target_only_on_double_moves() {
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "e3"),
            "rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "e4"),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", "e6"),
            "rnbqkbnr/pppp1ppp/4p3/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 2"
        );
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", "e5"),
            "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn pawn_capture_removes_the_destination_occupant() {
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/P7/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 1", "axb7"),
            "rnbqkbnr/pPpppppp/8/8/8/8/1PPPPPPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let board = BoardState::from_fen("rnbqkbnr/pppppppp/8/P7/8/8/1PPPPPPP/RNBQKBNR b KQkq - 0 1")
            .expect("FEN should parse");
        let after_push = board.apply_san("b5").expect("b5 should apply");
        let after_capture = after_push.apply_san("axb6").expect("axb6 should apply");
        assert_eq!(
            after_capture.get_fen(),
            "rnbqkbnr/p1pppppp/1P6/8/8/8/1PPPPPPP/RNBQKBNR b KQkq - 0 2"
        );

        let board = BoardState::from_fen("rnbqkbnr/1ppppppp/8/8/p7/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("FEN should parse");
        let after_push = board.apply_san("b4").expect("b4 should apply");
        let after_capture = after_push.apply_san("axb3").expect("axb3 should apply");
        assert_eq!(
            after_capture.get_fen(),
            "rnbqkbnr/1ppppppp/8/8/8/1p6/P1PPPPPP/RNBQKBNR w KQkq - 0 2"
        );
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        assert_eq!(
            applied_fen("7k/P7/8/8/8/8/8/7K w - - 0 1", "a8=Q"),
            "Q6k/8/8/8/8/8/8/7K b - - 0 1"
        );
        assert_eq!(
            applied_fen("7k/8/8/8/8/8/p7/7K b - - 0 1", "a1=Q"),
            "7k/8/8/8/8/8/8/q6K w - - 0 2"
        );
    }

    #[test]
    fn promotion_capture_handles_both_in_one_move() {
        assert_eq!(
            applied_fen("1n5k/P7/8/8/8/8/8/7K w - - 0 1", "axb8=Q"),
            "1Q5k/8/8/8/8/8/8/7K b - - 0 1"
        );
        assert_eq!(
            applied_fen("7k/8/8/8/8/8/p7/1N5K b - - 0 1", "axb1=Q"),
            "7k/8/8/8/8/8/8/1q5K w - - 0 2"
        );
    }

    #[test]
    fn promotion_must_be_stated_on_the_last_rank() {
        let board = BoardState::from_fen("7k/P7/8/8/8/8/8/7K w - - 0 1").expect("FEN should parse");
        assert!(matches!(
            board.apply_san("a8"),
            Err(PositionError::IllegalMove(_))
        ));

        let board = BoardState::from_fen("7k/8/P7/8/8/8/8/7K w - - 0 1").expect("FEN should parse");
        assert!(matches!(
            board.apply_san("a7=Q"),
            Err(PositionError::IllegalMove(_))
        ));
    }

    #[test]
    fn king_moves_and_captures_update_the_clock() {
        assert_eq!(
            applied_fen("7k/8/8/8/8/8/8/7K w - - 0 1", "Kg1"),
            "7k/8/8/8/8/8/8/6K1 b - - 1 1"
        );
        assert_eq!(
            applied_fen("7k/8/8/8/8/8/8/7K b - - 0 1", "Kg8"),
            "6k1/8/8/8/8/8/8/7K w - - 1 2"
        );
        assert_eq!(
            applied_fen("7k/8/8/8/8/8/8/6nK w - - 0 1", "Kxg1"),
            "7k/8/8/8/8/8/8/6K1 b - - 0 1"
        );
        assert_eq!(
            applied_fen("6Nk/8/8/8/8/8/8/7K b - - 0 1", "Kxg8"),
            "6k1/8/8/8/8/8/8/7K w - - 0 2"
        );
    }

    #[test]
    fn knight_moves_resolve_the_unique_origin() {
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "Nf3"),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1"
        );
        assert_eq!(
            applied_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", "Nf6"),
            "rnbqkb1r/pppppppp/5n2/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 1 2"
        );
    }

    #[test]
    fn a_rook_move_from_the_corner_drops_that_castling_right() {
        assert_eq!(
            applied_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "Ra2"),
            "r3k2r/8/8/8/8/8/R7/4K2R b Kkq - 1 1"
        );
        assert_eq!(
            applied_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "Rxh1"),
            "r3k3/8/8/8/8/8/8/R3K2r w Qq - 0 2"
        );
    }

    #[test]
    fn ambiguous_and_impossible_moves_are_rejected() {
        // Two knights reach d2; a bare Nd2 cannot pick one.
        let board = BoardState::from_fen("7k/8/8/8/8/5N2/8/1N5K w - - 0 1")
            .expect("FEN should parse");
        assert!(matches!(
            board.apply_san("Nd2"),
            Err(PositionError::IllegalMove(_))
        ));
        assert!(board.apply_san("Nbd2").is_ok());
        assert!(board.apply_san("Nfd2").is_ok());

        // No knight reaches d5.
        assert!(matches!(
            board.apply_san("Nd5"),
            Err(PositionError::IllegalMove(_))
        ));

        // Destination occupied by the moving side.
        let start = BoardState::new_game();
        assert!(matches!(
            start.apply_san("Ke2"),
            Err(PositionError::IllegalMove(_))
        ));

        // Disambiguation naming a rank with no candidate on it.
        assert!(matches!(
            board.apply_san("N2d2"),
            Err(PositionError::IllegalMove(_))
        ));
    }

    #[test]
    fn disambiguation_by_file_picks_one_rook() {
        let board = BoardState::from_fen("7k/8/8/8/8/8/7K/R6R w - - 0 1")
            .expect("FEN should parse");
        // Both rooks see b1 along the open first rank.
        assert!(matches!(
            board.apply_san("Rb1"),
            Err(PositionError::IllegalMove(_))
        ));
        let after = board.apply_san("Rab1").expect("Rab1 should apply");
        assert_eq!(after.get_fen(), "7k/8/8/8/8/8/7K/1R5R b - - 1 1");
    }
}
