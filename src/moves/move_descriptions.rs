//! Packed move encoding.
//!
//! Layout of the 32-bit word:
//!
//! | bits  | field                         |
//! |-------|-------------------------------|
//! | 0-5   | origin square                 |
//! | 6-11  | destination square            |
//! | 12-14 | moving piece kind             |
//! | 15-17 | captured piece kind, 7 = none |
//! | 18-20 | promotion piece kind, 7 = none|
//! | 21    | en passant                    |
//! | 22    | castling                      |
//! | 23    | double pawn push              |

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_PIECE_SHIFT: u32 = 12;
const CAPTURED_PIECE_SHIFT: u32 = 15;
const PROMOTION_PIECE_SHIFT: u32 = 18;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
pub const NO_PIECE_CODE: u32 = 0x7;

pub const FLAG_EN_PASSANT: u32 = 1 << 21;
pub const FLAG_CASTLING: u32 = 1 << 22;
pub const FLAG_DOUBLE_PAWN_PUSH: u32 = 1 << 23;

const FLAGS_MASK: u32 = FLAG_EN_PASSANT | FLAG_CASTLING | FLAG_DOUBLE_PAWN_PUSH;

/// An immutable packed move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

impl Move {
    /// Sentinel for "no move" (a1a1, never produced by the generator).
    pub const NULL: Move = Move(0);

    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u32,
    ) -> Self {
        let mut out = 0u32;
        out |= (from as u32 & SQUARE_MASK) << FROM_SHIFT;
        out |= (to as u32 & SQUARE_MASK) << TO_SHIFT;
        out |= piece_kind_to_code(moved_piece) << MOVED_PIECE_SHIFT;
        out |= captured_piece
            .map(piece_kind_to_code)
            .unwrap_or(NO_PIECE_CODE)
            << CAPTURED_PIECE_SHIFT;
        out |= promotion_piece
            .map(piece_kind_to_code)
            .unwrap_or(NO_PIECE_CODE)
            << PROMOTION_PIECE_SHIFT;
        out |= flags & FLAGS_MASK;
        Move(out)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn moved_piece(self) -> PieceKind {
        // Only Move::new writes this field, and it always stores a valid code.
        piece_kind_from_code((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK).unwrap_or(PieceKind::Pawn)
    }

    #[inline]
    pub fn captured_piece(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn promotion_piece(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK != NO_PIECE_CODE
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK != NO_PIECE_CODE
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`. The null move prints `0000`.
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_owned();
        }

        let mut out = String::with_capacity(5);
        out.push_str(&square_to_algebraic(self.from()));
        out.push_str(&square_to_algebraic(self.to()));
        if let Some(promotion) = self.promotion_piece() {
            out.push(promotion.to_char());
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?}", self.to_uci(), self.moved_piece())?;
        if let Some(captured) = self.captured_piece() {
            write!(f, " x{captured:?}")?;
        }
        if self.is_en_passant() {
            f.write_str(" ep")?;
        }
        if self.is_castling() {
            f.write_str(" castle")?;
        }
        if self.is_double_pawn_push() {
            f.write_str(" double")?;
        }
        f.write_str(")")
    }
}

#[inline]
pub fn piece_kind_to_code(piece_kind: PieceKind) -> u32 {
    piece_kind.index() as u32
}

#[inline]
pub fn piece_kind_from_code(code: u32) -> Option<PieceKind> {
    PieceKind::from_index(code as usize)
}
