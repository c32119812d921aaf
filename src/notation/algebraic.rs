//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices, reused by the FEN codec, the SAN grammar, and the
//! differencer. Errors here are plain strings; callers attach the error
//! kind appropriate to their layer.

use crate::board::chess_types::{square_file, square_rank, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = file_from_char(bytes[0] as char)
        .ok_or_else(|| format!("Invalid algebraic file: {}", bytes[0] as char))?;
    let rank = rank_from_char(bytes[1] as char)
        .ok_or_else(|| format!("Invalid algebraic rank: {}", bytes[1] as char))?;

    Ok(rank * 8 + file)
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    Ok(format!(
        "{}{}",
        file_to_char(square_file(square)),
        rank_to_char(square_rank(square))
    ))
}

#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    if ('a'..='h').contains(&ch) {
        Some(ch as u8 - b'a')
    } else {
        None
    }
}

#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    if ('1'..='8').contains(&ch) {
        Some(ch as u8 - b'1')
    } else {
        None
    }
}

#[inline]
pub fn file_to_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_to_char(rank: u8) -> char {
    char::from(b'1' + rank)
}
