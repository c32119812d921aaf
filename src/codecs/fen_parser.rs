//! FEN-to-BoardState parser.
//!
//! Builds a fully-populated board value from a Forsyth-Edwards Notation
//! string: piece placement, side to move, castling rights, en-passant
//! target, and both move counters.

use crate::board::board_state::BoardState;
use crate::board::chess_types::*;
use crate::errors::PositionError;
use crate::notation::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<BoardState, PositionError> {
    let mut parts = fen.split_whitespace();

    let placement_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing board layout in FEN".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing side-to-move in FEN".to_owned()))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing castling rights in FEN".to_owned()))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing en-passant square in FEN".to_owned()))?;
    let halfmove_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing halfmove clock in FEN".to_owned()))?;
    let fullmove_part = parts
        .next()
        .ok_or_else(|| PositionError::Format("missing fullmove number in FEN".to_owned()))?;

    if parts.next().is_some() {
        return Err(PositionError::Format("FEN has extra trailing fields".to_owned()));
    }

    let mut board = BoardState::new_empty();

    parse_placement(placement_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| PositionError::Format(format!("invalid halfmove clock: {halfmove_part}")))?;
    board.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| PositionError::Format(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(board)
}

fn parse_placement(placement_part: &str, board: &mut BoardState) -> Result<(), PositionError> {
    let ranks: Vec<&str> = placement_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::Format("board layout must contain 8 ranks".to_owned()));
    }

    for (fen_rank_index, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_index as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(PositionError::Format(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or_else(|| {
                PositionError::Format(format!("invalid piece character '{ch}' in board layout"))
            })?;

            if file >= 8 {
                return Err(PositionError::Format("board rank has too many files".to_owned()));
            }

            board.placement[square_at(file, board_rank) as usize] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(PositionError::Format("board rank does not sum to 8 files".to_owned()));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, PositionError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(PositionError::Format(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, PositionError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => {
                return Err(PositionError::Format(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, PositionError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(PositionError::Format)
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::board::chess_rules::STARTING_POSITION_FEN;
    use crate::board::chess_types::{
        Color, PieceKind, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE,
        CASTLE_LIGHT_QUEENSIDE,
    };
    use crate::errors::PositionError;
    use crate::utils::render_board::render_board;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let board = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_board(&board));

        assert_eq!(board.side_to_move, Color::Light);
        assert_eq!(
            board.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE
                | CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(board.en_passant_square, None);
        assert_eq!(board.fullmove_number, 1);
        assert_eq!(board.halfmove_clock, 0);

        let e1 = board.piece_at(4).expect("e1 should be occupied");
        assert_eq!(e1.kind, PieceKind::King);
        assert_eq!(e1.color, Color::Light);
    }

    #[test]
    fn parse_en_passant_target_square() {
        let board = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN with en-passant target should parse");
        assert_eq!(board.en_passant_square, Some(20));
        assert_eq!(board.side_to_move, Color::Dark);
    }

    #[test]
    fn reject_wrong_field_counts() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(PositionError::Format(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra"),
            Err(PositionError::Format(_))
        ));
    }

    #[test]
    fn reject_malformed_placement() {
        // Seven ranks.
        assert!(parse_fen("pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        // Rank sums to nine files.
        assert!(parse_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        // Rank sums to seven files.
        assert!(parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        // Unknown piece letter.
        assert!(parse_fen("rnbqkbnr/ppppXppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        // Zero-length empty run.
        assert!(parse_fen("rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn reject_malformed_metadata_fields() {
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 x").is_err());
    }

    #[test]
    fn parse_partial_castling_rights() {
        let board = parse_fen("1r2kr2/pp1p1pp1/2p4p/7P/P1PP4/1P6/5PP1/R3K2R b KQ - 0 1")
            .expect("FEN with partial rights should parse");
        assert_eq!(
            board.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE
        );
    }
}
