use crate::board::board_state::BoardState;
use crate::board::chess_types::{Color, PieceKind, Square};
use crate::moves::bishop_moves::bishop_reaches;
use crate::moves::king_moves::king_reaches;
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::pawn_attacks_square;
use crate::moves::queen_moves::queen_reaches;
use crate::moves::rook_moves::rook_reaches;

/// True when the king of `color` is attacked by any opposing piece.
/// Castling and en passant never attack squares and are ignored here.
#[inline]
pub fn is_king_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_square) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_square, color.opposite())
}

pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    for from in 0..64u8 {
        let Some(piece) = board.placement[from as usize] else {
            continue;
        };
        if piece.color != attacker_color {
            continue;
        }

        let reaches = match piece.kind {
            PieceKind::Pawn => pawn_attacks_square(attacker_color, from, square),
            PieceKind::Knight => knight_reaches(from, square),
            PieceKind::Bishop => bishop_reaches(&board.placement, from, square),
            PieceKind::Rook => rook_reaches(&board.placement, from, square),
            PieceKind::Queen => queen_reaches(&board.placement, from, square),
            PieceKind::King => king_reaches(from, square),
        };

        if reaches {
            return true;
        }
    }

    false
}
