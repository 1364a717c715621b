//! Square conversions for coordinate notation (`e4` <-> 28).

use crate::chess_errors::MoveNotationError;
use crate::game_state::chess_types::{file_of, rank_of, Square};

/// Convert a coordinate such as `"e4"` to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, MoveNotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(MoveNotationError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(MoveNotationError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index to its coordinate, e.g. 28 -> `"e4"`.
///
/// Only the low six bits are used, so every `Square` maps to a real square.
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let square = square & 63;
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));

    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");

        for square in 0..64u8 {
            let text = square_to_algebraic(square);
            assert_eq!(algebraic_to_square(&text).expect("generated text should parse"), square);
        }
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(algebraic_to_square("e44").is_err());
    }
}
