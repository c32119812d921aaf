use crate::board::chess_types::{Placement, Square};
use crate::moves::bishop_moves::bishop_reaches;
use crate::moves::rook_moves::rook_reaches;

/// True when a queen on `from` attacks `to` across the given placement.
#[inline]
pub fn queen_reaches(placement: &Placement, from: Square, to: Square) -> bool {
    rook_reaches(placement, from, to) || bishop_reaches(placement, from, to)
}
