//! SAN token grammar.
//!
//! Parses one Standard Algebraic Notation token into a structured move
//! intent before any board interaction, so "is this syntactically a move"
//! is settled separately from "which move does it resolve to". Trailing
//! `+`, `#`, `!`, and `?` annotations are accepted and ignored.

use crate::board::chess_types::{PieceKind, Square};
use crate::errors::PositionError;
use crate::notation::algebraic::{algebraic_to_square, file_from_char, rank_from_char};

/// Castling side named by an `O-O` / `O-O-O` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// A non-castling SAN move before origin resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardMove {
    pub piece: PieceKind,
    pub origin_file: Option<u8>,
    pub origin_rank: Option<u8>,
    pub is_capture: bool,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

/// Structured intent parsed from one SAN token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanMove {
    Castle(CastleSide),
    Standard(StandardMove),
}

pub fn parse_san(token: &str) -> Result<SanMove, PositionError> {
    let bare = token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    if bare.is_empty() {
        return Err(syntax_error(token, "empty token"));
    }
    if !bare.is_ascii() {
        return Err(syntax_error(token, "token is not ASCII"));
    }

    if bare == "O-O" {
        return Ok(SanMove::Castle(CastleSide::Kingside));
    }
    if bare == "O-O-O" {
        return Ok(SanMove::Castle(CastleSide::Queenside));
    }

    let (body, promotion) = split_promotion(bare, token)?;

    let (piece, mover_part) = match body.chars().next() {
        Some(letter) if letter.is_ascii_uppercase() => {
            let kind = PieceKind::from_san_letter(letter)
                .ok_or_else(|| syntax_error(token, "unknown piece letter"))?;
            (kind, &body[1..])
        }
        _ => (PieceKind::Pawn, body),
    };

    if mover_part.len() < 2 {
        return Err(syntax_error(token, "missing destination square"));
    }
    let (head, destination_part) = mover_part.split_at(mover_part.len() - 2);
    let destination =
        algebraic_to_square(destination_part).map_err(|_| syntax_error(token, "bad destination square"))?;

    let (head, is_capture) = match head.strip_suffix('x') {
        Some(rest) => (rest, true),
        None => (head, false),
    };

    let (origin_file, origin_rank) = parse_disambiguation(head, token)?;

    if piece == PieceKind::Pawn && origin_rank.is_some() {
        return Err(syntax_error(token, "pawn moves may not carry a rank disambiguation"));
    }
    if promotion.is_some() && piece != PieceKind::Pawn {
        return Err(syntax_error(token, "only pawns promote"));
    }

    Ok(SanMove::Standard(StandardMove {
        piece,
        origin_file,
        origin_rank,
        is_capture,
        destination,
        promotion,
    }))
}

fn split_promotion<'a>(
    bare: &'a str,
    token: &str,
) -> Result<(&'a str, Option<PieceKind>), PositionError> {
    let Some(eq_index) = bare.find('=') else {
        return Ok((bare, None));
    };

    let suffix = &bare[eq_index + 1..];
    let mut chars = suffix.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return Err(syntax_error(token, "promotion must name exactly one piece"));
    };

    let kind = match PieceKind::from_san_letter(letter) {
        Some(kind) if kind != PieceKind::King => kind,
        _ => return Err(syntax_error(token, "invalid promotion piece")),
    };

    Ok((&bare[..eq_index], Some(kind)))
}

fn parse_disambiguation(head: &str, token: &str) -> Result<(Option<u8>, Option<u8>), PositionError> {
    let chars: Vec<char> = head.chars().collect();
    match chars.as_slice() {
        [] => Ok((None, None)),
        [single] => {
            if let Some(file) = file_from_char(*single) {
                Ok((Some(file), None))
            } else if let Some(rank) = rank_from_char(*single) {
                Ok((None, Some(rank)))
            } else {
                Err(syntax_error(token, "bad disambiguation character"))
            }
        }
        [first, second] => {
            let file = file_from_char(*first)
                .ok_or_else(|| syntax_error(token, "bad disambiguation file"))?;
            let rank = rank_from_char(*second)
                .ok_or_else(|| syntax_error(token, "bad disambiguation rank"))?;
            Ok((Some(file), Some(rank)))
        }
        _ => Err(syntax_error(token, "disambiguation is too long")),
    }
}

fn syntax_error(token: &str, reason: &str) -> PositionError {
    PositionError::IllegalMove(format!("unrecognized SAN token '{token}': {reason}"))
}
