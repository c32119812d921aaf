use crate::board::chess_types::{square_file, square_rank, Square};

/// True when a king on `from` attacks `to` (one step in any direction;
/// castling is handled at the notation layer, not here).
#[inline]
pub fn king_reaches(from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let file_delta = (square_file(from) as i8 - square_file(to) as i8).abs();
    let rank_delta = (square_rank(from) as i8 - square_rank(to) as i8).abs();
    file_delta <= 1 && rank_delta <= 1
}
