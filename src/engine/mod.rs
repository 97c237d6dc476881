pub mod attacks;
pub mod board;
pub mod movegen;
pub mod perft;
pub mod san;
pub mod types;
pub mod zobrist;

pub use board::{Position, UndoInfo};
pub use movegen::{legal_moves, legal_moves_from};
pub use perft::perft;
pub use types::*;
