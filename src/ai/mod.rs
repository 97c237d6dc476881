pub mod evaluation;
pub mod masks;
pub mod ordering;
pub mod pst;
pub mod search;
pub mod tt;

pub use evaluation::{evaluate, evaluate_relative};
pub use search::{MoveEval, SearchReport, Searcher};
pub use tt::TranspositionTable;
