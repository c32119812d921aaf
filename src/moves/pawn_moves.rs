use crate::board::chess_rules::pawn_home_rank;
use crate::board::chess_types::{square_file, square_rank, Color, Placement, Square};

#[inline]
const fn forward(color: Color) -> i8 {
    match color {
        Color::Light => 1,
        Color::Dark => -1,
    }
}

/// True when a pawn of `color` on `from` attacks `to` — capture geometry
/// only, one square diagonally forward. Whether the capture is admissible
/// (enemy occupant or en-passant target) is the caller's concern.
#[inline]
pub fn pawn_attacks_square(color: Color, from: Square, to: Square) -> bool {
    let file_delta = (square_file(to) as i8 - square_file(from) as i8).abs();
    let rank_delta = square_rank(to) as i8 - square_rank(from) as i8;
    file_delta == 1 && rank_delta == forward(color)
}

/// True when a pawn of `color` on `from` may advance to `to`: straight
/// forward onto an empty square, or two squares from the home rank with
/// the skipped square also empty.
pub fn pawn_advances(placement: &Placement, color: Color, from: Square, to: Square) -> bool {
    if square_file(from) != square_file(to) {
        return false;
    }
    if placement[to as usize].is_some() {
        return false;
    }

    let step = forward(color);
    let rank_delta = square_rank(to) as i8 - square_rank(from) as i8;

    if rank_delta == step {
        return true;
    }

    if rank_delta == 2 * step && square_rank(from) == pawn_home_rank(color) {
        let skipped = (from as i8 + 8 * step) as usize;
        return placement[skipped].is_none();
    }

    false
}
