//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, keeps the current position and engine options, runs
//! searches and perft on request, and emits protocol-compliant output. Bad
//! input is reported as `info string` and never ends the loop.

use std::io::{self, BufRead, Write};
use std::mem::size_of;

use crate::game_state::chess_context::ChessContext;
use crate::game_state::game_state::GameState;
use crate::move_generation::perft::perft_divide;
use crate::search::iterative_deepening::{format_pv, search_with_progress, SearchConfig, SearchLimits, SearchResult};
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::threading::{SharedTranspositionTable, DEFAULT_TT_SHARDS};
use crate::search::transposition_table::TTEntry;
use crate::utils::long_algebraic::apply_move_sequence;
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = "Magic Chess";
const UCI_ENGINE_AUTHOR: &str = "magic_chess developers";
const DEFAULT_GO_DEPTH: u8 = 6;
const DEFAULT_HASH_MB: usize = 64;
const MAX_THREADS: usize = 128;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new(ChessContext::shared());

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciState {
    ctx: &'static ChessContext,
    game_state: GameState,
    tt: SharedTranspositionTable,
    config: SearchConfig,
    hash_mb: usize,
    threads: usize,
}

impl UciState {
    pub fn new(ctx: &'static ChessContext) -> Self {
        Self {
            ctx,
            game_state: GameState::new_game(ctx),
            tt: SharedTranspositionTable::new(entries_for_hash_mb(DEFAULT_HASH_MB), DEFAULT_TT_SHARDS),
            config: SearchConfig::default(),
            hash_mb: DEFAULT_HASH_MB,
            threads: 1,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Handle one input line. Returns `true` on `quit`.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Hash type spin default {} min 1 max 4096",
                    DEFAULT_HASH_MB
                )?;
                writeln!(out, "option name Threads type spin default 1 min 1 max {}", MAX_THREADS)?;
                writeln!(out, "option name Quiescence type check default true")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game(self.ctx);
                self.tt.clear();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => match parse_go_limits(trimmed) {
                Ok(mut limits) => {
                    limits.threads = self.threads;
                    self.handle_go(limits, out)?;
                }
                Err(err) => {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            },
            "perft" => match parts.next().map(str::parse::<u8>) {
                Some(Ok(depth)) => self.handle_perft(depth, out)?,
                _ => writeln!(out, "info string perft error: expected 'perft <depth>'")?,
            },
            "d" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
                writeln!(out, "Fen: {}", self.game_state.to_fen())?;
                writeln!(out, "Key: {:016x}", self.game_state.zobrist_key)?;
            }
            "stop" | "ponderhit" | "debug" | "register" => {
                // Every accepted `go` is bounded and has already answered.
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                writeln!(out, "info string unknown command: {}", cmd)?;
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Hash") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| format!("invalid Hash value '{}'", value))?;
            self.hash_mb = parsed.clamp(1, 4096);
            let entries = entries_for_hash_mb(self.hash_mb);
            self.tt = SharedTranspositionTable::new(entries, DEFAULT_TT_SHARDS);
            log::info!("hash resized to {} MB ({} entries)", self.hash_mb, entries);
        } else if name.eq_ignore_ascii_case("Threads") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| format!("invalid Threads value '{}'", value))?;
            self.threads = parsed.clamp(1, MAX_THREADS);
        } else if name.eq_ignore_ascii_case("Quiescence") {
            self.config.use_quiescence = parse_check(&value)?;
        } else {
            return Err(format!("unknown option '{}'", name));
        }

        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(self.ctx),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                GameState::from_fen(self.ctx, &fen_parts.join(" ")).map_err(|err| err.to_string())?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        let game_state = if tokens.peek().copied() == Some("moves") {
            tokens.next();
            apply_move_sequence(self.ctx, &base_state, tokens).map_err(|err| err.to_string())?
        } else {
            base_state
        };

        // Only commit a fully valid position.
        self.game_state = game_state;
        Ok(())
    }

    fn handle_go(&self, limits: SearchLimits, out: &mut impl Write) -> io::Result<()> {
        let mut write_error = None;
        let result = search_with_progress(
            self.ctx,
            &self.tt,
            &self.game_state,
            limits,
            self.config,
            &PieceSquareScorer,
            |progress| {
                if write_error.is_none() {
                    if let Err(err) = writeln!(out, "{}", info_line(progress)) {
                        write_error = Some(err);
                    }
                }
            },
        );
        if let Some(err) = write_error {
            return Err(err);
        }

        match result.best_move {
            Some(best_move) => writeln!(out, "bestmove {}", best_move.to_uci()),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    fn handle_perft(&self, depth: u8, out: &mut impl Write) -> io::Result<()> {
        let divided = perft_divide(self.ctx, &self.game_state, depth);
        let total: u64 = divided.iter().map(|(_, nodes)| nodes).sum();
        for (mv, nodes) in &divided {
            writeln!(out, "{}: {}", mv.to_uci(), nodes)?;
        }
        writeln!(out)?;
        writeln!(out, "Nodes searched: {}", if depth == 0 { 1 } else { total })
    }
}

/// `info` line for one completed iteration.
pub fn info_line(result: &SearchResult) -> String {
    let score = match result.mate_in() {
        Some(moves) => format!("mate {}", moves),
        None => format!("cp {}", result.score),
    };
    let millis = result.elapsed.as_millis();
    let nps = (result.nodes as u128 * 1000) / millis.max(1);

    let mut line = format!(
        "info depth {} score {} nodes {} nps {} time {}",
        result.depth, score, result.nodes, nps, millis
    );
    if !result.pv.is_empty() {
        line.push_str(" pv ");
        line.push_str(&format_pv(&result.pv));
    }
    line
}

fn parse_go_limits(line: &str) -> Result<SearchLimits, String> {
    let mut limits = SearchLimits {
        max_depth: DEFAULT_GO_DEPTH,
        ..SearchLimits::default()
    };
    let mut depth_given = false;
    let mut tokens = line.split_whitespace().skip(1);

    while let Some(tok) = tokens.next() {
        match tok {
            "depth" => {
                let value = tokens.next().unwrap_or_default();
                // Depth 0 would only evaluate the root and never pick a move.
                limits.max_depth = value
                    .parse::<u8>()
                    .map_err(|_| format!("invalid depth '{}'", value))?
                    .max(1);
                depth_given = true;
            }
            "movetime" => {
                let value = tokens.next().unwrap_or_default();
                limits.movetime_ms = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid movetime '{}'", value))?,
                );
            }
            "infinite" | "ponder" => {
                // The loop blocks while searching, so `stop` could never arrive.
                return Err(format!("'go {}' is not supported, use depth or movetime", tok));
            }
            _ => {}
        }
    }

    // A bare time limit deepens until the clock runs out.
    if limits.movetime_ms.is_some() && !depth_given {
        limits.max_depth = u8::MAX;
    }
    Ok(limits)
}

fn parse_check(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid check value '{}'", value)),
    }
}

fn entries_for_hash_mb(hash_mb: usize) -> usize {
    (hash_mb * 1024 * 1024 / size_of::<Option<TTEntry>>()).max(1)
}
