//! Perft — exhaustive legal-move leaf counting.
//!
//! Counts the leaves of the legal-move tree to a fixed depth using
//! make/undo on a single mutable position. Node counts for the standard
//! reference positions pin down move generation, make/undo and legality
//! filtering; any divergence is a bug in one of those three.

use crate::engine::board::Position;
use crate::engine::movegen;
use crate::engine::types::MoveList;

/// Count leaf nodes of the legal-move tree at `depth`.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    movegen::pseudo_legal(pos, &mut moves);

    let mut nodes = 0u64;
    for i in 0..moves.len() {
        let mv = moves.get(i);
        let (undo, legal) = pos.make_move(mv);
        if legal {
            nodes += perft(pos, depth - 1);
        }
        pos.undo_move(&undo);
    }
    nodes
}

/// Per-root-move breakdown ("divide"), for pinpointing generator bugs.
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let mut moves = MoveList::new();
    movegen::pseudo_legal(pos, &mut moves);

    let mut result = Vec::new();
    for i in 0..moves.len() {
        let mv = moves.get(i);
        let (undo, legal) = pos.make_move(mv);
        if legal {
            let nodes = if depth == 0 { 1 } else { perft(pos, depth - 1) };
            result.push((mv.to_pcn(), nodes));
        }
        pos.undo_move(&undo);
    }
    result
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn perft_depth_zero_is_one() {
        let mut p = Position::starting();
        assert_eq!(perft(&mut p, 0), 1);
    }

    #[test]
    fn perft_start_shallow() {
        let mut p = Position::starting();
        assert_eq!(perft(&mut p, 1), 20);
        assert_eq!(perft(&mut p, 2), 400);
        assert_eq!(perft(&mut p, 3), 8_902);
    }

    #[test]
    fn perft_leaves_position_untouched() {
        let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = p.clone();
        let _ = perft(&mut p, 3);
        assert_eq!(p, before);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let total = perft(&mut p, 2);
        let divided: u64 = perft_divide(&mut p, 1).iter().map(|(_, n)| n).sum();
        assert_eq!(total, divided);
    }
}
