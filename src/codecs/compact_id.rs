//! Compact lossless position identifier.
//!
//! Encodes a full `BoardState` into a fixed 38-byte layout rendered as
//! unpadded base64url. The alphabet (`A-Z a-z 0-9 - _`) is safe for
//! directory and file names, and the upstream position store uses the
//! first two characters of the identifier as its shard prefix.
//!
//! Layout: 32 bytes of placement (4 bits per square, square order
//! `0..=63`), one flags byte (bit 0 side to move, bits 1-4 castling
//! rights), one en-passant byte (square index, 64 for none), then the
//! halfmove clock and fullmove number as big-endian `u16` each.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::board::board_state::BoardState;
use crate::board::chess_types::*;
use crate::errors::PositionError;

const PLACEMENT_BYTES: usize = 32;
const PAYLOAD_BYTES: usize = PLACEMENT_BYTES + 1 + 1 + 2 + 2;
const NO_EN_PASSANT: u8 = 64;
const FLAG_DARK_TO_MOVE: u8 = 1 << 0;
const FLAG_CASTLE_LIGHT_KINGSIDE: u8 = 1 << 1;
const FLAG_CASTLE_LIGHT_QUEENSIDE: u8 = 1 << 2;
const FLAG_CASTLE_DARK_KINGSIDE: u8 = 1 << 3;
const FLAG_CASTLE_DARK_QUEENSIDE: u8 = 1 << 4;

pub fn encode_compact_id(board: &BoardState) -> String {
    let mut bytes = [0u8; PAYLOAD_BYTES];

    for square in 0..64usize {
        let nibble = piece_nibble(board.placement[square]);
        if square % 2 == 0 {
            bytes[square / 2] |= nibble << 4;
        } else {
            bytes[square / 2] |= nibble;
        }
    }

    let mut flags = 0u8;
    if board.side_to_move == Color::Dark {
        flags |= FLAG_DARK_TO_MOVE;
    }
    if (board.castling_rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        flags |= FLAG_CASTLE_LIGHT_KINGSIDE;
    }
    if (board.castling_rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        flags |= FLAG_CASTLE_LIGHT_QUEENSIDE;
    }
    if (board.castling_rights & CASTLE_DARK_KINGSIDE) != 0 {
        flags |= FLAG_CASTLE_DARK_KINGSIDE;
    }
    if (board.castling_rights & CASTLE_DARK_QUEENSIDE) != 0 {
        flags |= FLAG_CASTLE_DARK_QUEENSIDE;
    }
    bytes[PLACEMENT_BYTES] = flags;

    bytes[PLACEMENT_BYTES + 1] = board.en_passant_square.unwrap_or(NO_EN_PASSANT);
    bytes[PLACEMENT_BYTES + 2..PLACEMENT_BYTES + 4]
        .copy_from_slice(&board.halfmove_clock.to_be_bytes());
    bytes[PLACEMENT_BYTES + 4..PLACEMENT_BYTES + 6]
        .copy_from_slice(&board.fullmove_number.to_be_bytes());

    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_compact_id(id: &str) -> Result<BoardState, PositionError> {
    let bytes = URL_SAFE_NO_PAD.decode(id).map_err(|err| {
        PositionError::Format(format!("compact identifier is not valid base64url: {err}"))
    })?;

    if bytes.len() != PAYLOAD_BYTES {
        return Err(PositionError::Format(format!(
            "compact identifier must decode to {PAYLOAD_BYTES} bytes, got {}",
            bytes.len()
        )));
    }

    let mut board = BoardState::new_empty();

    for square in 0..64usize {
        let byte = bytes[square / 2];
        let nibble = if square % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        board.placement[square] = piece_from_nibble(nibble)?;
    }

    let flags = bytes[PLACEMENT_BYTES];
    if (flags & !0b0001_1111) != 0 {
        return Err(PositionError::Format(format!(
            "compact identifier has unknown flag bits: {flags:#010b}"
        )));
    }
    board.side_to_move = if (flags & FLAG_DARK_TO_MOVE) != 0 {
        Color::Dark
    } else {
        Color::Light
    };
    if (flags & FLAG_CASTLE_LIGHT_KINGSIDE) != 0 {
        board.castling_rights |= CASTLE_LIGHT_KINGSIDE;
    }
    if (flags & FLAG_CASTLE_LIGHT_QUEENSIDE) != 0 {
        board.castling_rights |= CASTLE_LIGHT_QUEENSIDE;
    }
    if (flags & FLAG_CASTLE_DARK_KINGSIDE) != 0 {
        board.castling_rights |= CASTLE_DARK_KINGSIDE;
    }
    if (flags & FLAG_CASTLE_DARK_QUEENSIDE) != 0 {
        board.castling_rights |= CASTLE_DARK_QUEENSIDE;
    }

    board.en_passant_square = match bytes[PLACEMENT_BYTES + 1] {
        NO_EN_PASSANT => None,
        square if square < 64 => Some(square),
        other => {
            return Err(PositionError::Format(format!(
                "compact identifier has invalid en-passant byte: {other}"
            )))
        }
    };

    board.halfmove_clock = u16::from_be_bytes([bytes[PLACEMENT_BYTES + 2], bytes[PLACEMENT_BYTES + 3]]);
    board.fullmove_number = u16::from_be_bytes([bytes[PLACEMENT_BYTES + 4], bytes[PLACEMENT_BYTES + 5]]);

    Ok(board)
}

fn piece_nibble(cell: Option<Piece>) -> u8 {
    match cell {
        None => 0,
        Some(piece) => 1 + piece.kind.index() as u8 + 6 * piece.color.index() as u8,
    }
}

fn piece_from_nibble(nibble: u8) -> Result<Option<Piece>, PositionError> {
    if nibble == 0 {
        return Ok(None);
    }
    if nibble > 12 {
        return Err(PositionError::Format(format!(
            "compact identifier has invalid piece code: {nibble}"
        )));
    }

    let (color, kind_index) = if nibble <= 6 {
        (Color::Light, nibble - 1)
    } else {
        (Color::Dark, nibble - 7)
    };
    let kind = PieceKind::from_index(kind_index as usize)
        .ok_or_else(|| PositionError::Format(format!("compact identifier has invalid piece code: {nibble}")))?;

    Ok(Some(Piece::new(color, kind)))
}
