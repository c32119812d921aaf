use thiserror::Error;

/// Represents all error kinds surfaced by the position engine.
/// Every fallible operation reports exactly one of these; there are no
/// retries and no partial state left behind on failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// A FEN string or compact identifier is malformed (wrong field count,
    /// bad rank sum, unrecognized character or alphabet).
    #[error("format error: {0}")]
    Format(String),
    /// A SAN token does not match the grammar, or does not resolve to
    /// exactly one admissible origin square on the given board.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The two boards handed to the differencer are not connected by
    /// exactly one legal move.
    #[error("inconsistent diff: {0}")]
    InconsistentDiff(String),
}
