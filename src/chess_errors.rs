//! Errors returned by the text-facing parts of the engine.
//!
//! Only the position loader and the coordinate move codec can fail on input.
//! Illegal move application is not an error (`make_move` returns `None`),
//! and neither is a node with no legal moves.

use thiserror::Error;

use crate::game_state::chess_types::Color;

/// Errors raised while loading a FEN position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: u8 },

    #[error("invalid empty-square count '{0}'")]
    EmptyRun(char),

    /// A board character that names no piece. Never read as an empty square.
    #[error("unrecognized piece character '{0}' in board layout")]
    UnrecognizedPiece(char),

    #[error("invalid side-to-move field: {0}")]
    SideToMove(String),

    #[error("invalid castling rights character: {0}")]
    CastlingRights(char),

    #[error("invalid en-passant square: {0}")]
    EnPassant(String),

    #[error("invalid {field}: {value}")]
    Counter { field: &'static str, value: String },

    #[error("expected exactly one {color:?} king, found {found}")]
    KingCount { color: Color, found: u32 },
}

/// Errors raised while converting coordinate move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveNotationError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("malformed coordinate move: {0}")]
    Malformed(String),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(char),

    #[error("move {0} is not legal in this position")]
    NotLegal(String),
}
