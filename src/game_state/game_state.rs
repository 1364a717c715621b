//! Bitboard board model.
//!
//! `GameState` is a plain `Copy` value: search and move application work by
//! copy-make, so there is no undo stack. Occupancy caches always equal the
//! union of the piece bitboards once a mutation completes, and `zobrist_key`
//! always equals `ZobristKeys::compute` for the state.

use crate::chess_errors::FenError;
use crate::game_state::chess_context::ChessContext;
use crate::game_state::chess_types::*;
use crate::moves::bit_primitives::square_bb;
use crate::search::zobrist::ZobristKeys;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
        }
    }
}

impl GameState {
    /// Empty board, White to move. The hash is left at zero until the caller
    /// finishes placing pieces and calls `refresh_zobrist`.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game(ctx: &ChessContext) -> Self {
        let mut game_state = Self::new_empty();

        for (file, piece) in BACK_RANK.iter().enumerate() {
            let file = file as Square;
            game_state.pieces[Color::White.index()][piece.index()] |= square_bb(file);
            game_state.pieces[Color::Black.index()][piece.index()] |= square_bb(56 + file);
            game_state.pieces[Color::White.index()][PieceKind::Pawn.index()] |= square_bb(8 + file);
            game_state.pieces[Color::Black.index()][PieceKind::Pawn.index()] |= square_bb(48 + file);
        }
        game_state.castling_rights = CASTLE_ALL;

        game_state.recalc_occupancy();
        game_state.refresh_zobrist(&ctx.zobrist);
        game_state
    }

    #[inline]
    pub fn from_fen(ctx: &ChessContext, fen: &str) -> Result<Self, FenError> {
        parse_fen(ctx, fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Rebuild the three occupancy caches from the piece bitboards.
    pub fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, &bb| acc | bb);
        }
        self.occupancy_all =
            self.occupancy_by_color[Color::White.index()] | self.occupancy_by_color[Color::Black.index()];
    }

    #[inline]
    pub fn refresh_zobrist(&mut self, keys: &ZobristKeys) {
        self.zobrist_key = keys.compute(self);
    }

    /// Whole-board lookup; scans up to twelve bitboards.
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = square_bb(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }

        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };

        self.piece_kind_on(color, square).map(|piece| (color, piece))
    }

    /// Piece kind of `color` on `square`, scanning that side's six bitboards.
    #[inline]
    pub fn piece_kind_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bb(square);
        ALL_PIECE_KINDS
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        (kings != 0).then(|| kings.trailing_zeros() as Square)
    }

    /// XOR a piece in or out of its bitboard and the hash. Occupancy caches are
    /// not touched; callers recompute them once the move is complete.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, keys: &ZobristKeys, color: Color, piece: PieceKind, square: Square) {
        self.pieces[color.index()][piece.index()] ^= square_bb(square);
        self.zobrist_key ^= keys.piece_square(color, piece, square);
    }
}
