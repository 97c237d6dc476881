//! Command-line driver for the engine harnesses.
//!
//! ```text
//! gambit perft [depth]            run the perft reference suite
//! gambit strength [depth]         run the built-in strength suite
//! gambit benchmark [--json] FILE...   run EPD benchmark files
//! ```

use std::time::Instant;

use gambit::engine::perft::perft;
use gambit::engine::types::MAX_PLY;
use gambit::{EngineConfig, Position, Searcher, harness};

/// Perft reference positions with known node counts per depth
/// (index 0 = depth 1).
const PERFT_CASES: &[(&str, &str, &[u64])] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8_902, 197_281, 4_865_609, 119_060_324],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862, 4_085_603, 193_690_690],
    ),
    (
        "endgame",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2_812, 43_238, 674_624, 11_030_083, 178_633_661],
    ),
    (
        "position5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379, 2_103_487, 89_941_194],
    ),
    (
        "position6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2_079, 89_890, 3_894_594, 164_075_551],
    ),
];

fn main() {
    // Structured logging; RUST_LOG overrides the default filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gambit=info".into()),
        )
        .init();

    gambit::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = args.first().map(String::as_str).unwrap_or("perft");

    match action {
        "perft" => run_perft(parse_depth(args.get(1))),
        "strength" => run_strength(parse_depth(args.get(1))),
        "benchmark" => run_benchmark(&args[1..]),
        other => {
            eprintln!("unsupported action: {other}");
            eprintln!("usage: gambit <perft [depth] | strength [depth] | benchmark [--json] FILE...>");
            std::process::exit(2);
        }
    }
}

fn parse_depth(arg: Option<&String>) -> Option<u8> {
    arg.map(|v| {
        v.parse::<u8>().unwrap_or_else(|_| {
            eprintln!("invalid depth: {v}");
            std::process::exit(2);
        })
    })
}

// =========================================================================
// perft
// =========================================================================

fn run_perft(depth_cap: Option<u8>) {
    println!("running perft reference suite");
    let mut failures = 0usize;

    for (name, fen, expected) in PERFT_CASES {
        let mut pos = Position::from_fen(fen).expect("reference FEN");
        println!("{name}: {fen}");

        for (idx, &want) in expected.iter().enumerate() {
            let depth = (idx + 1) as u32;
            if let Some(cap) = depth_cap
                && depth > cap as u32
            {
                break;
            }

            let start = Instant::now();
            let nodes = perft(&mut pos, depth);
            let elapsed = start.elapsed();
            let mnps = nodes as f64 / elapsed.as_secs_f64().max(1e-9) / 1_000_000.0;

            let ok = nodes == want;
            if !ok {
                failures += 1;
            }
            println!(
                "  depth {depth}: {nodes} nodes ({:.1} Mn/s) {}",
                mnps,
                if ok { "ok" } else { "MISMATCH" }
            );
            if !ok {
                println!("    expected {want}");
            }
        }
        println!();
    }

    if failures > 0 {
        eprintln!("{failures} perft mismatches");
        std::process::exit(1);
    }
    println!("all perft counts match");
}

// =========================================================================
// strength
// =========================================================================

fn run_strength(depth_override: Option<u8>) {
    let config = EngineConfig::from_env();
    let mut searcher = Searcher::new(&config);

    println!("running strength suite");
    let report = harness::run_strength(depth_override, &mut searcher);

    for result in &report.results {
        println!(
            "{}\n  reference {} ({:+.2})  engine {} ({:+.2})  {} nodes, {} ms, {:.2} Mn/s",
            result.fen,
            result.reference_move,
            result.reference_eval as f64 / 100.0,
            result.engine_move,
            result.engine_eval as f64 / 100.0,
            result.nodes,
            result.avg_ms,
            result.mega_nps,
        );
    }
    println!(
        "\navg eval delta: {:.1} cp over {} positions ({} nodes, {} ms)",
        report.avg_eval_delta,
        report.results.len(),
        report.total_nodes,
        report.total_ms,
    );
}

// =========================================================================
// benchmark
// =========================================================================

fn run_benchmark(args: &[String]) {
    let json = args.iter().any(|a| a == "--json");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if files.is_empty() {
        eprintln!("benchmark needs at least one EPD file");
        std::process::exit(2);
    }

    let config = EngineConfig::from_env();
    let depth = config.search_depth.min((MAX_PLY - 1) as u8);
    let mut searcher = Searcher::new(&config);

    let mut cases = Vec::new();
    for path in files {
        let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("cannot read {path}: {e}");
            std::process::exit(2);
        });
        match harness::parse_epd(&contents) {
            Ok(mut parsed) => {
                tracing::info!(file = %path, cases = parsed.len(), "loaded EPD suite");
                cases.append(&mut parsed);
            }
            Err(e) => {
                eprintln!("cannot parse {path}: {e}");
                std::process::exit(2);
            }
        }
    }

    let report = harness::run_benchmark(&cases, depth, &mut searcher);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serialises")
        );
        return;
    }

    println!("---------------------");
    println!("benchmark results");
    println!("---------------------");
    println!("positions:              {}", report.cases.len());
    println!("average points:         {:.2}", report.avg_points);
    println!("found a candidate:      {:.1}%", report.candidate_rate * 100.0);
    println!("found the best move:    {:.1}%", report.best_rate * 100.0);
    println!("total nodes:            {}", report.total_nodes);
    println!("total time:             {} ms", report.total_ms);
    println!("speed:                  {:.2} Mn/s", report.mega_nps);
}
