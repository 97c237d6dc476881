//! Move ordering.
//!
//! Applied once per node after pseudo-legal generation. Moves sort by a
//! descending score with fixed bands:
//!
//!   1_000_000            the TT-suggested move
//!     900_000 + value    promotions (push or capture)
//!     800_000 + MVV-LVA  captures: 10·victim − aggressor
//!     800_705 / 800_704  killer moves at this ply
//!     800_703 / 800_702  killer moves from two plies earlier (same side)
//!     0..=700_000        quiet moves by history counter (+ castle bonus)
//!
//! The history cap keeps every capture (≥ 800 100) above every quiet move.

use crate::engine::board::Position;
use crate::engine::types::{Move, MoveKind, MoveList, PieceType};

/// Score for the transposition-table move.
pub const TT_MOVE_SCORE: i32 = 1_000_000;
/// Base score for promotions; the promotion piece's value is added.
pub const PROMOTION_SCORE: i32 = 900_000;
/// Base score for captures; MVV-LVA is added.
pub const CAPTURE_SCORE: i32 = 800_000;
/// Scores for the two killer slots at the current ply.
pub const KILLER_SCORES: [i32; 2] = [800_705, 800_704];
/// Scores for the killer slots from two plies earlier.
pub const PRIOR_KILLER_SCORES: [i32; 2] = [800_703, 800_702];
/// Ceiling for a quiet move's history counter.
pub const HISTORY_MAX: i32 = 700_000;
/// Castling ranks just above plain quiet moves.
pub const CASTLE_BONUS: i32 = 2_000;

/// Per-(side, from, to) counters bumped by depth² on quiet beta cutoffs.
pub type HistoryTable = [[[i32; 64]; 64]; 2];

/// Score a single move for ordering. Higher is searched first.
pub fn score_move(
    pos: &Position,
    mv: Move,
    tt_move: Move,
    killers: &[Move; 2],
    prior_killers: &[Move; 2],
    history: &HistoryTable,
) -> i32 {
    if mv == tt_move {
        return TT_MOVE_SCORE;
    }

    if let Some(promo) = mv.promotion {
        return PROMOTION_SCORE + promo.value();
    }

    if mv.kind.is_capture() {
        let victim = if mv.kind == MoveKind::EnPassant {
            PieceType::Pawn
        } else {
            pos.piece_type_at(mv.to).unwrap_or(PieceType::Pawn)
        };
        let aggressor = pos.piece_type_at(mv.from).unwrap_or(PieceType::Pawn);
        return CAPTURE_SCORE + 10 * victim.value() - aggressor.value();
    }

    for (slot, &k) in killers.iter().enumerate() {
        if mv == k {
            return KILLER_SCORES[slot];
        }
    }
    for (slot, &k) in prior_killers.iter().enumerate() {
        if mv == k {
            return PRIOR_KILLER_SCORES[slot];
        }
    }

    let side = pos.side_to_move.index();
    let mut score = history[side][mv.from.0 as usize][mv.to.0 as usize].min(HISTORY_MAX);
    if mv.kind == MoveKind::Castle {
        score += CASTLE_BONUS;
    }
    score
}

/// Sort the whole buffer best-first.
pub fn order_moves(
    list: &mut MoveList,
    pos: &Position,
    tt_move: Move,
    killers: &[Move; 2],
    prior_killers: &[Move; 2],
    history: &HistoryTable,
) {
    list.as_mut_slice().sort_unstable_by_key(|&mv| {
        std::cmp::Reverse(score_move(pos, mv, tt_move, killers, prior_killers, history))
    });
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::movegen;
    use crate::engine::types::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    const NO_KILLERS: [Move; 2] = [Move::NULL; 2];

    fn empty_history() -> Box<HistoryTable> {
        Box::new([[[0; 64]; 64]; 2])
    }

    fn plain_score(p: &Position, mv: Move) -> i32 {
        score_move(p, mv, Move::NULL, &NO_KILLERS, &NO_KILLERS, &empty_history())
    }

    #[test]
    fn tt_move_outranks_everything() {
        let p = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let quiet = Move::quiet(sq("b1"), sq("c3"));
        let capture = Move::new(sq("e4"), sq("d5"), MoveKind::Capture);

        let tt_score = score_move(
            &p,
            quiet,
            quiet,
            &NO_KILLERS,
            &NO_KILLERS,
            &empty_history(),
        );
        assert_eq!(tt_score, TT_MOVE_SCORE);
        assert!(tt_score > plain_score(&p, capture));
    }

    #[test]
    fn promotions_outrank_captures() {
        let p = pos("1n5k/2P5/8/8/8/8/8/4K3 w - - 0 1");
        let push_promo =
            Move::with_promotion(sq("c7"), sq("c8"), PieceType::Queen, MoveKind::Promotion);
        let cap_promo =
            Move::with_promotion(sq("c7"), sq("b8"), PieceType::Queen, MoveKind::Capture);
        let plain_cap = Move::new(sq("c7"), sq("b8"), MoveKind::Capture);

        assert_eq!(plain_score(&p, push_promo), PROMOTION_SCORE + 900);
        assert_eq!(plain_score(&p, cap_promo), PROMOTION_SCORE + 900);
        assert!(plain_score(&p, push_promo) > plain_score(&p, plain_cap));
    }

    #[test]
    fn mvv_lva_prefers_big_victims_and_small_aggressors() {
        // White pawn (e4) and queen (d1) can both capture the d5 queen.
        let p = pos("3qk3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1");
        let pawn_takes_queen = Move::new(sq("e4"), sq("d5"), MoveKind::Capture);
        let queen_takes_queen = Move::new(sq("d1"), sq("d5"), MoveKind::Capture);

        assert_eq!(plain_score(&p, pawn_takes_queen), CAPTURE_SCORE + 9000 - 100);
        assert_eq!(plain_score(&p, queen_takes_queen), CAPTURE_SCORE + 9000 - 900);
        assert!(plain_score(&p, pawn_takes_queen) > plain_score(&p, queen_takes_queen));
    }

    #[test]
    fn en_passant_scores_as_equal_pawn_trade() {
        let p = pos("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let ep = Move::new(sq("e5"), sq("f6"), MoveKind::EnPassant);
        assert_eq!(plain_score(&p, ep), CAPTURE_SCORE + 10 * 100 - 100);
        assert_eq!(plain_score(&p, ep), 800_900);
    }

    #[test]
    fn killers_sit_between_captures_and_quiets() {
        let p = Position::starting();
        let killer = Move::quiet(sq("b1"), sq("c3"));
        let killers = [killer, Move::NULL];
        let other_quiet = Move::quiet(sq("g1"), sq("f3"));

        let killer_score = score_move(
            &p,
            killer,
            Move::NULL,
            &killers,
            &NO_KILLERS,
            &empty_history(),
        );
        assert_eq!(killer_score, KILLER_SCORES[0]);
        // Below the cheapest equal capture (pawn takes pawn = 800 900)…
        assert!(killer_score < 800_900);
        // …above any quiet move.
        assert!(killer_score > plain_score(&p, other_quiet) + HISTORY_MAX);
    }

    #[test]
    fn prior_killers_rank_below_current_killers() {
        let p = Position::starting();
        let mv = Move::quiet(sq("b1"), sq("c3"));
        let as_current = score_move(
            &p,
            mv,
            Move::NULL,
            &[mv, Move::NULL],
            &NO_KILLERS,
            &empty_history(),
        );
        let as_prior = score_move(
            &p,
            mv,
            Move::NULL,
            &NO_KILLERS,
            &[mv, Move::NULL],
            &empty_history(),
        );
        assert!(as_current > as_prior);
        assert_eq!(as_prior, PRIOR_KILLER_SCORES[0]);
    }

    #[test]
    fn history_orders_quiet_moves() {
        let p = Position::starting();
        let mut history = empty_history();
        let hot = Move::quiet(sq("b1"), sq("c3"));
        history[0][hot.from.0 as usize][hot.to.0 as usize] = 500;

        let cold = Move::quiet(sq("g1"), sq("f3"));
        let hot_score = score_move(&p, hot, Move::NULL, &NO_KILLERS, &NO_KILLERS, &history);
        let cold_score = score_move(&p, cold, Move::NULL, &NO_KILLERS, &NO_KILLERS, &history);
        assert!(hot_score > cold_score);
    }

    #[test]
    fn history_is_capped_below_the_killer_band() {
        let p = Position::starting();
        let mut history = empty_history();
        let hot = Move::quiet(sq("b1"), sq("c3"));
        history[0][hot.from.0 as usize][hot.to.0 as usize] = i32::MAX / 2;

        let score = score_move(&p, hot, Move::NULL, &NO_KILLERS, &NO_KILLERS, &history);
        assert_eq!(score, HISTORY_MAX);
        assert!(score < PRIOR_KILLER_SCORES[1]);
    }

    #[test]
    fn castling_gets_a_nudge_over_plain_quiets() {
        let p = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let castle = Move::new(sq("e1"), sq("g1"), MoveKind::Castle);
        let quiet = Move::quiet(sq("a1"), sq("b1"));
        assert_eq!(
            plain_score(&p, castle) - plain_score(&p, quiet),
            CASTLE_BONUS
        );
    }

    #[test]
    fn order_moves_puts_captures_first_without_hints() {
        let p = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let mut list = crate::engine::types::MoveList::new();
        movegen::pseudo_legal(&p, &mut list);
        order_moves(
            &mut list,
            &p,
            Move::NULL,
            &NO_KILLERS,
            &NO_KILLERS,
            &empty_history(),
        );
        assert!(
            list.get(0).kind.is_capture(),
            "expected a capture first, got {}",
            list.get(0)
        );
    }
}
