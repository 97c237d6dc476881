//! Strength regression suite.
//!
//! A fixed set of middlegame and endgame positions with a strong reference
//! engine's evaluation and preferred move. Searching them at a fixed depth
//! and eyeballing the eval deltas (and the node rate) shows whether an
//! engine change helped or hurt. Several FENs carry padded castling fields
//! (`KQ--`, `----`) as emitted by the tooling that produced them.

use serde::Serialize;

use crate::ai::Searcher;
use crate::engine::board::Position;
use crate::engine::types::{Color, Score};

// =========================================================================
// Reference positions
// =========================================================================

/// One strength-test position with reference data.
#[derive(Clone, Copy, Debug)]
pub struct StrengthCase {
    pub fen: &'static str,
    /// Reference engine evaluation, centipawns from White's perspective.
    pub reference_eval: Score,
    /// Reference engine move (display only, SAN-ish).
    pub reference_move: &'static str,
    pub depth: u8,
    /// Timing rounds; the TT is cleared before each.
    pub rounds: u32,
}

/// The built-in suite.
pub const REFERENCE_POSITIONS: &[StrengthCase] = &[
    StrengthCase {
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        reference_eval: 20,
        reference_move: "c4",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "r1b1k2r/pp1n2pp/1qn1pp2/3pP3/1b1P1P2/3B1N2/PP1B2PP/R2QK1NR w KQkq - 4 11",
        reference_eval: 169,
        reference_move: "Ne2",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "r1b3k1/pp1nb1pp/1q2p3/3pP3/3n4/P2B1P2/1PQBN2P/R3K2R w KQ-- - 0 16",
        reference_eval: 0,
        reference_move: "Nxd4",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "r1b4k/pp4pB/4pB2/3p4/2n2P1q/P7/1PQ4P/1K1R3R b ---- - 0 22",
        reference_eval: 176,
        reference_move: "Qxh7",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "r3k2r/1b3ppp/pq2p3/1pb5/P5n1/3B1N2/1PP1QPPP/R1B2RK1 b --kq - 6 16",
        reference_eval: -38,
        reference_move: "b4",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "2rr4/1b2kppp/p3p3/P1n1N3/1pB5/1P2P2P/2P3P1/R2R2K1 b ---- - 0 27",
        reference_eval: -53,
        reference_move: "Be4",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "8/2k4p/B1b1p1p1/5pP1/7R/1P2P2P/2r5/4K3 w ---- - 0 40",
        reference_eval: 7,
        reference_move: "Rxh7",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "rnbqkb1r/pp2pp1p/5np1/3P4/8/2N5/PP1P1PPP/R1BQKBNR w KQkq - 0 6",
        reference_eval: 118,
        reference_move: "Bc4",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "r2q1rk1/1p2ppb1/6pp/p1nP1b2/P1PN4/1QN1B3/1P3PPP/R3R1K1 w ---- - 1 16",
        reference_eval: 332,
        reference_move: "Qb5",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "2rqr1k1/p4p2/1p2p1p1/4Nn2/3PR3/P1PQ4/5PP1/2R3K1 b ---- - 0 23",
        reference_eval: -93,
        reference_move: "Kg7",
        depth: 7,
        rounds: 3,
    },
    StrengthCase {
        fen: "2rr4/p4pk1/1p2p1pn/4N3/3P4/P1PR4/5PP1/3R1K2 b ---- - 2 30",
        reference_eval: -92,
        reference_move: "g5",
        depth: 7,
        rounds: 3,
    },
];

// =========================================================================
// Results
// =========================================================================

/// Result of searching one strength position.
#[derive(Clone, Debug, Serialize)]
pub struct StrengthResult {
    pub fen: String,
    pub reference_move: String,
    /// Reference eval, White's perspective.
    pub reference_eval: Score,
    pub engine_move: String,
    /// Engine eval, White's perspective.
    pub engine_eval: Score,
    pub nodes: u64,
    /// Search time averaged over the rounds.
    pub avg_ms: u64,
    pub mega_nps: f64,
}

/// Aggregate over the whole suite.
#[derive(Clone, Debug, Serialize)]
pub struct StrengthReport {
    pub results: Vec<StrengthResult>,
    /// Mean absolute difference from the reference evals, centipawns.
    pub avg_eval_delta: f64,
    pub total_nodes: u64,
    pub total_ms: u64,
}

// =========================================================================
// Runner
// =========================================================================

/// Run the built-in suite; `depth_override` replaces each case's depth.
pub fn run_strength(depth_override: Option<u8>, searcher: &mut Searcher) -> StrengthReport {
    run_cases(REFERENCE_POSITIONS, depth_override, searcher)
}

/// Run an arbitrary set of cases.
pub fn run_cases(
    cases: &[StrengthCase],
    depth_override: Option<u8>,
    searcher: &mut Searcher,
) -> StrengthReport {
    let mut results = Vec::with_capacity(cases.len());
    let mut total_nodes = 0u64;
    let mut total_ms = 0u64;
    let mut delta_sum = 0f64;

    for case in cases {
        let depth = depth_override.unwrap_or(case.depth);
        let rounds = case.rounds.max(1);

        let mut agg_ms = 0u64;
        let mut nodes = 0u64;
        let mut engine_move = String::new();
        let mut engine_eval: Score = 0;

        for _ in 0..rounds {
            // A warm table would make the later rounds trivial.
            searcher.clear_tt();

            let mut pos = Position::from_fen(case.fen)
                .expect("reference FENs are fixed and valid");
            let report = searcher.search(&mut pos, depth);
            agg_ms += report.elapsed_ms;
            nodes = report.nodes;

            let best = report.best().expect("reference positions have moves");
            engine_move = best.mv.to_pcn();
            engine_eval = match pos.side_to_move {
                Color::White => best.score,
                Color::Black => -best.score,
            };
        }

        let avg_ms = agg_ms / rounds as u64;
        let mega_nps = if avg_ms > 0 {
            nodes as f64 / (avg_ms as f64 / 1000.0) / 1_000_000.0
        } else {
            0.0
        };

        tracing::info!(
            fen = case.fen,
            engine_move = %engine_move,
            engine_eval,
            reference_move = case.reference_move,
            reference_eval = case.reference_eval,
            nodes,
            avg_ms,
            "strength case finished"
        );

        delta_sum += (engine_eval - case.reference_eval).abs() as f64;
        total_nodes += nodes;
        total_ms += avg_ms;

        results.push(StrengthResult {
            fen: case.fen.to_string(),
            reference_move: case.reference_move.to_string(),
            reference_eval: case.reference_eval,
            engine_move,
            engine_eval,
            nodes,
            avg_ms,
            mega_nps,
        });
    }

    let n = results.len().max(1) as f64;
    StrengthReport {
        avg_eval_delta: delta_sum / n,
        total_nodes,
        total_ms,
        results,
    }
}

// =========================================================================
// Tests
// =========================================================================
