//! gambit — a bitboard chess engine core.
//!
//! The `engine` module holds the board: position representation, FEN,
//! Zobrist hashing, magic-bitboard attack tables, pseudo-legal move
//! generation, reversible make/undo, and perft. The `ai` module holds the
//! tapered evaluation and the alpha-beta search with its transposition
//! table, killer moves, history heuristic, late move reductions and
//! quiescence. The `harness` module drives the EPD benchmark and strength
//! suites that keep the engine honest.
//!
//! The engine performs no I/O; front-ends (a game server, a UCI shell)
//! consume `Position`, `Searcher` and the PCN move strings.

pub mod ai;
pub mod config;
pub mod engine;
pub mod harness;

pub use ai::{MoveEval, SearchReport, Searcher};
pub use config::EngineConfig;
pub use engine::board::Position;
pub use engine::movegen::{legal_moves, legal_moves_from};
pub use engine::perft::perft;
pub use engine::types::*;

/// Build every global table (Zobrist keys, attack tables, piece-square
/// tables, evaluation masks). Idempotent; call once before searching.
/// Skipping it only costs the first lookup the initialisation time.
pub fn init() {
    engine::zobrist::keys();
    engine::attacks::tables();
    ai::pst::tables();
    ai::masks::tables();
}
