//! Core position value for the import pipeline.
//!
//! `BoardState` is the central model: the 64-cell piece placement plus the
//! side to move, castling rights, en-passant target, and both move
//! counters. Every transition produces a new value; nothing is mutated in
//! place across the public API, so game histories are plain sequences of
//! independent boards.

use crate::board::chess_rules::STARTING_POSITION_FEN;
use crate::board::chess_types::*;
use crate::codecs::compact_id::{decode_compact_id, encode_compact_id};
use crate::codecs::fen_generator::generate_fen;
use crate::codecs::fen_parser::parse_fen;
use crate::errors::PositionError;
use crate::notation::san_apply::apply_san;
use crate::notation::san_diff::diff_san;
use crate::rules::check_detection::is_king_in_check;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub placement: Placement,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            placement: [None; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn from_compact_id(id: &str) -> Result<Self, PositionError> {
        decode_compact_id(id)
    }

    #[inline]
    pub fn get_compact_id(&self) -> String {
        encode_compact_id(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.placement[square as usize]
    }

    /// Apply one SAN token and return the successor position.
    #[inline]
    pub fn apply_san(&self, token: &str) -> Result<Self, PositionError> {
        apply_san(self, token)
    }

    /// Reconstruct the SAN token connecting `self` to `after`.
    #[inline]
    pub fn diff_san(&self, after: &Self) -> Result<String, PositionError> {
        diff_san(self, after)
    }

    /// True when the side to move has its king under attack.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    /// Locate the king of `color`, if present.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.placement
            .iter()
            .position(|cell| {
                matches!(cell, Some(piece) if piece.color == color && piece.kind == PieceKind::King)
            })
            .map(|index| index as Square)
    }
}
