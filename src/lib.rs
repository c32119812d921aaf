//! Crate root module declarations for the chess_core position engine.
//!
//! This file exposes the board model, the FEN and compact-identifier
//! codecs, SAN parsing/execution, check detection, and position diffing so
//! the surrounding import pipeline, tests, and tooling can import stable
//! module paths.

pub mod errors;

pub mod board {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod codecs {
    pub mod compact_id;
    pub mod fen_generator;
    pub mod fen_parser;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod rules {
    pub mod check_detection;
}

pub mod notation {
    pub mod algebraic;
    pub mod san_apply;
    pub mod san_diff;
    pub mod san_parser;
}

pub mod game {
    pub mod replay;
}

pub mod utils {
    pub mod render_board;
}
