//! Crate root module declarations for the Magic Chess engine.
//!
//! This file exposes the subsystems (board state, attack tables, move
//! generation, search, UCI protocol handling, and notation helpers) so the
//! binary, benches, and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_context;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod bishop_moves;
    pub mod bit_primitives;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod magic;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_list;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod threading;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod logger;
    pub mod long_algebraic;
    pub mod render_game_state;
}
