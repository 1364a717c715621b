//! Coordinate move text (`e2e4`, `e7e8q`) to and from packed moves.
//!
//! Parsing resolves text against the generated moves of the position, so the
//! returned `Move` carries the exact flags and captured piece the generator
//! would have produced, and is known to be legal.

use crate::chess_errors::MoveNotationError;
use crate::game_state::chess_context::ChessContext;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::move_list::MoveList;
use crate::move_generation::pseudo_legal::generate_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_uci()
}

/// Resolve coordinate text to the legal move it names in `game_state`.
pub fn parse_move(ctx: &ChessContext, game_state: &GameState, text: &str) -> Result<Move, MoveNotationError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(MoveNotationError::Malformed(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        Some(&ch) => Some(char_to_promotion(ch as char)?),
        None => None,
    };

    let mut moves = MoveList::new();
    generate_moves(ctx, game_state, &mut moves);

    moves
        .iter()
        .copied()
        .find(|mv| {
            mv.from() == from
                && mv.to() == to
                && mv.promotion_piece() == promotion
                && make_move(ctx, game_state, *mv).is_some()
        })
        .ok_or_else(|| MoveNotationError::NotLegal(text.to_owned()))
}

/// Replay a sequence of coordinate moves from `game_state`.
pub fn apply_move_sequence<'a, I>(
    ctx: &ChessContext,
    game_state: &GameState,
    moves: I,
) -> Result<GameState, MoveNotationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut current = *game_state;
    for text in moves {
        let mv = parse_move(ctx, &current, text)?;
        current = make_move(ctx, &current, mv).ok_or_else(|| MoveNotationError::NotLegal(text.to_owned()))?;
    }
    Ok(current)
}

fn char_to_promotion(ch: char) -> Result<PieceKind, MoveNotationError> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(MoveNotationError::InvalidPromotion(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move_sequence, move_to_long_algebraic, parse_move};
    use crate::chess_errors::MoveNotationError;
    use crate::game_state::chess_context::ChessContext;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;

    #[test]
    fn parses_flags_from_the_position() {
        let ctx = ChessContext::shared();
        let start = GameState::new_game(ctx);
        let push = parse_move(ctx, &start, "e2e4").expect("e2e4 should parse");

        assert!(push.is_double_pawn_push());
        assert_eq!(move_to_long_algebraic(push), "e2e4");

        let castle_ready = GameState::from_fen(ctx, "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("FEN should parse");
        let castle = parse_move(ctx, &castle_ready, "e8c8").expect("e8c8 should parse");
        assert!(castle.is_castling());
    }

    #[test]
    fn promotion_suffix_selects_piece() {
        let ctx = ChessContext::shared();
        let game_state = GameState::from_fen(ctx, "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");

        let knight = parse_move(ctx, &game_state, "b7b8n").expect("under-promotion should parse");
        assert_eq!(knight.promotion_piece(), Some(PieceKind::Knight));
        assert_eq!(knight.to_uci(), "b7b8n");

        assert!(matches!(
            parse_move(ctx, &game_state, "b7b8"),
            Err(MoveNotationError::NotLegal(_))
        ));
        assert_eq!(
            parse_move(ctx, &game_state, "b7b8x"),
            Err(MoveNotationError::InvalidPromotion('x'))
        );
    }

    #[test]
    fn rejects_malformed_and_illegal_text() {
        let ctx = ChessContext::shared();
        let start = GameState::new_game(ctx);

        assert!(matches!(parse_move(ctx, &start, "e2"), Err(MoveNotationError::Malformed(_))));
        assert!(matches!(parse_move(ctx, &start, "z2e4"), Err(MoveNotationError::InvalidSquare(_))));
        assert!(matches!(parse_move(ctx, &start, "e2e5"), Err(MoveNotationError::NotLegal(_))));
        assert!(matches!(parse_move(ctx, &start, "e7e5"), Err(MoveNotationError::NotLegal(_))));
    }

    #[test]
    fn sequence_replay_reaches_expected_fen() {
        let ctx = ChessContext::shared();
        let start = GameState::new_game(ctx);
        let played = apply_move_sequence(ctx, &start, ["e2e4", "c7c5", "g1f3"]).expect("moves should replay");

        assert_eq!(
            played.to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }
}
