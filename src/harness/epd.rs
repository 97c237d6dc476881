//! EPD benchmark suites.
//!
//! Each suite line is a four-field FEN fragment plus semicolon-separated
//! opcodes, of which we use `id "name"` and `c0 "san=points,…"`:
//!
//! ```text
//! 2qr2k1/… b - -; id "STS1.001"; c0 "f5=10, Ne5=3, h6=2"; c1 "…"
//! ```
//!
//! Candidate moves are SAN, so each is resolved against the parsed
//! position and compared in PCN. A searched best move matching a candidate
//! earns that candidate's points; 10 marks the suite's best move.

use serde::Serialize;

use crate::ai::Searcher;
use crate::engine::board::Position;
use crate::engine::san;
use crate::engine::types::{Color, EngineError, Score};

// =========================================================================
// Records
// =========================================================================

/// One candidate move with its point value, already converted to PCN.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Candidate {
    pub pcn: String,
    pub points: i32,
}

/// One parsed EPD test position.
#[derive(Clone, Debug, Serialize)]
pub struct EpdCase {
    pub id: String,
    pub fen: String,
    pub candidates: Vec<Candidate>,
}

/// Result of searching one EPD position.
#[derive(Clone, Debug, Serialize)]
pub struct CaseResult {
    pub id: String,
    pub best_move: String,
    /// Score from White's perspective, centipawns.
    pub score: Score,
    pub points: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

/// Aggregate over a whole benchmark run.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub cases: Vec<CaseResult>,
    pub avg_points: f64,
    /// Fraction of positions where the engine picked any listed candidate.
    pub candidate_rate: f64,
    /// Fraction of positions where the engine picked the 10-point move.
    pub best_rate: f64,
    pub total_nodes: u64,
    pub total_ms: u64,
    pub mega_nps: f64,
}

// =========================================================================
// Parsing
// =========================================================================

/// Parse a whole EPD file. Blank lines are skipped.
pub fn parse_epd(contents: &str) -> Result<Vec<EpdCase>, EngineError> {
    contents
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(parse_epd_line)
        .collect()
}

/// Parse a single EPD line.
///
/// Fields after the FEN fragment are located by opcode, so suites with the
/// `id` and `c0` fields swapped parse the same.
pub fn parse_epd_line(line: &str) -> Result<EpdCase, EngineError> {
    let mut parts = line.split(';');
    let almost_fen = parts
        .next()
        .ok_or_else(|| EngineError::InvalidEpd(line.to_string()))?
        .trim();

    // The fragment carries no move counters; complete it.
    let fen_fields: Vec<&str> = almost_fen.split_whitespace().collect();
    if fen_fields.len() < 4 {
        return Err(EngineError::InvalidEpd(format!(
            "expected 4 FEN fields, got {}: {line}",
            fen_fields.len()
        )));
    }
    let fen = format!("{} 0 1", fen_fields[..4].join(" "));
    let pos = Position::from_fen(&fen)?;

    let mut id = String::new();
    let mut candidate_str = String::new();
    for field in parts {
        let field = field.trim();
        if let Some(rest) = field.strip_prefix("id ") {
            id = unquote(rest).to_string();
        } else if let Some(rest) = field.strip_prefix("c0 ") {
            candidate_str = unquote(rest).to_string();
        }
    }
    if id.is_empty() || candidate_str.is_empty() {
        return Err(EngineError::InvalidEpd(format!(
            "missing id or c0 field: {line}"
        )));
    }

    let mut candidates = Vec::new();
    for candidate in candidate_str.split(',') {
        let Some((san_str, points_str)) = candidate.split_once('=') else {
            continue;
        };
        let points: i32 = points_str
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidEpd(format!("bad points in: {candidate}")))?;
        let mv = san::parse_san(&pos, san_str.trim())?;
        candidates.push(Candidate {
            pcn: mv.to_pcn(),
            points,
        });
    }
    if candidates.is_empty() {
        return Err(EngineError::InvalidEpd(format!(
            "no candidates parsed from: {candidate_str}"
        )));
    }

    Ok(EpdCase {
        id,
        fen,
        candidates,
    })
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"')
}

// =========================================================================
// Benchmark runner
// =========================================================================

/// Search every case at `depth` and score the chosen moves.
///
/// The TT is cleared before each case so earlier positions cannot leak
/// into later results.
pub fn run_benchmark(cases: &[EpdCase], depth: u8, searcher: &mut Searcher) -> BenchmarkReport {
    let mut results = Vec::with_capacity(cases.len());
    let mut total_nodes = 0u64;
    let mut total_ms = 0u64;
    let mut total_points = 0i64;
    let mut found_candidate = 0usize;
    let mut found_best = 0usize;

    for case in cases {
        searcher.clear_tt();

        let mut pos = Position::from_fen(&case.fen)
            .expect("EpdCase always carries a FEN it already parsed");
        let report = searcher.search(&mut pos, depth);

        let Some(best) = report.best() else {
            // Mate or stalemate on the board; suites do not contain these,
            // but skip defensively rather than panic mid-run.
            tracing::warn!(id = %case.id, "EPD position has no legal moves");
            continue;
        };

        // Report scores from White's perspective.
        let score = match pos.side_to_move {
            Color::White => best.score,
            Color::Black => -best.score,
        };

        let best_pcn = best.mv.to_pcn();
        let mut points = 0;
        for candidate in &case.candidates {
            if candidate.pcn == best_pcn {
                points = candidate.points;
                found_candidate += 1;
                if points == 10 {
                    found_best += 1;
                }
            }
        }

        total_points += points as i64;
        total_nodes += report.nodes;
        total_ms += report.elapsed_ms;

        tracing::info!(
            id = %case.id,
            best = %best_pcn,
            points,
            nodes = report.nodes,
            ms = report.elapsed_ms,
            "benchmark case finished"
        );

        results.push(CaseResult {
            id: case.id.clone(),
            best_move: best_pcn,
            score,
            points,
            nodes: report.nodes,
            elapsed_ms: report.elapsed_ms,
        });
    }

    let n = results.len().max(1) as f64;
    BenchmarkReport {
        avg_points: total_points as f64 / n,
        candidate_rate: found_candidate as f64 / n,
        best_rate: found_best as f64 / n,
        total_nodes,
        total_ms,
        mega_nps: if total_ms > 0 {
            total_nodes as f64 / (total_ms as f64 / 1000.0) / 1_000_000.0
        } else {
            0.0
        },
        cases: results,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -; id "OPEN.001"; c0 "e4=10, d4=7, Nf3=4, c4=3""#;

    #[test]
    fn parse_line_basic() {
        let case = parse_epd_line(LINE).unwrap();
        assert_eq!(case.id, "OPEN.001");
        assert_eq!(case.candidates.len(), 4);
        assert_eq!(
            case.candidates[0],
            Candidate {
                pcn: "e2e4".into(),
                points: 10
            }
        );
        assert_eq!(case.candidates[2].pcn, "g1f3");
        // Counters are filled in.
        assert!(case.fen.ends_with(" 0 1"));
    }

    #[test]
    fn parse_line_with_swapped_fields() {
        let swapped = r#"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -; c0 "d4=10"; id "SWAP.001""#;
        let case = parse_epd_line(swapped).unwrap();
        assert_eq!(case.id, "SWAP.001");
        assert_eq!(case.candidates[0].pcn, "d2d4");
    }

    #[test]
    fn parse_file_skips_blank_lines() {
        let contents = format!("{LINE}\n\n{LINE}\n");
        let cases = parse_epd(&contents).unwrap();
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn parse_rejects_bad_fen() {
        assert!(parse_epd_line(r#"garbage; id "X"; c0 "e4=10""#).is_err());
    }

    #[test]
    fn parse_rejects_missing_fields() {
        assert!(parse_epd_line(r#"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -; id "X""#).is_err());
        assert!(parse_epd_line(r#"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -; c0 "e4=10""#).is_err());
    }

    #[test]
    fn parse_rejects_unparseable_candidate() {
        // Qh5 is not legal in the start position.
        let bad = r#"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -; id "X"; c0 "Qh5=10""#;
        assert!(parse_epd_line(bad).is_err());
    }

    #[test]
    fn benchmark_scores_an_obvious_recapture() {
        // White queen takes a hanging rook; candidate list rewards it.
        let line = r#"4k3/8/8/3r4/8/8/3Q4/4K3 w - -; id "CAP.001"; c0 "Qxd5=10, Qd4=3""#;
        let cases = parse_epd(line).unwrap();
        let mut searcher = Searcher::with_tt_entries(1 << 12);
        let report = run_benchmark(&cases, 3, &mut searcher);

        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.cases[0].best_move, "d2d5");
        assert_eq!(report.cases[0].points, 10);
        assert_eq!(report.avg_points, 10.0);
        assert_eq!(report.best_rate, 1.0);
        assert!(report.total_nodes > 0);
    }
}
