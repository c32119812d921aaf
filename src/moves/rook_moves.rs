use crate::board::chess_types::{square_file, square_rank, Placement, Square};

/// True when a rook on `from` attacks `to` across the given placement.
/// Every square strictly between the two must be empty.
pub fn rook_reaches(placement: &Placement, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    if square_file(from) != square_file(to) && square_rank(from) != square_rank(to) {
        return false;
    }

    let file_step = (square_file(to) as i8 - square_file(from) as i8).signum();
    let rank_step = (square_rank(to) as i8 - square_rank(from) as i8).signum();

    let mut file = square_file(from) as i8 + file_step;
    let mut rank = square_rank(from) as i8 + rank_step;
    while (file, rank) != (square_file(to) as i8, square_rank(to) as i8) {
        if placement[(rank * 8 + file) as usize].is_some() {
            return false;
        }
        file += file_step;
        rank += rank_step;
    }

    true
}
