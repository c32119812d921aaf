use crate::board::chess_types::{square_file, square_rank, Square};

/// True when a knight on `from` attacks `to`. Knights jump, so occupancy
/// never matters.
#[inline]
pub fn knight_reaches(from: Square, to: Square) -> bool {
    let file_delta = (square_file(from) as i8 - square_file(to) as i8).abs();
    let rank_delta = (square_rank(from) as i8 - square_rank(to) as i8).abs();
    (file_delta == 1 && rank_delta == 2) || (file_delta == 2 && rank_delta == 1)
}
