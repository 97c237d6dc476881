pub mod epd;
pub mod strength;

pub use epd::{BenchmarkReport, EpdCase, parse_epd, run_benchmark};
pub use strength::{REFERENCE_POSITIONS, StrengthReport, run_strength};
