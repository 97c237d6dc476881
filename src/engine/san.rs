//! Standard Algebraic Notation (SAN) parsing.
//!
//! Benchmark suites name their candidate moves in SAN (`e4`, `Nf3`, `Bxe5`,
//! `O-O`, `e8=Q+`, `Raxd1#`), which is only meaningful against a concrete
//! position. `parse_san` resolves a SAN string to the matching legal move;
//! `Move::to_pcn` then gives the engine-facing coordinate form.

use crate::engine::board::Position;
use crate::engine::movegen;
use crate::engine::types::{EngineError, Move, MoveKind, PieceType, Square};

/// Parse a SAN string and return the corresponding legal move.
///
/// Accepts standard SAN with optional check/mate/annotation suffixes
/// (`+`, `#`, `!`, `?`), castling as `O-O`/`O-O-O` or `0-0`/`0-0-0`, and
/// promotions as `=Q` (any case).
pub fn parse_san(pos: &Position, san: &str) -> Result<Move, EngineError> {
    let legal = movegen::legal_moves(pos);
    let trimmed = san.trim().trim_end_matches(['+', '#', '!', '?']);

    // Castling.
    if trimmed == "O-O" || trimmed == "0-0" {
        return find_castling(pos, &legal, san, true);
    }
    if trimmed == "O-O-O" || trimmed == "0-0-0" {
        return find_castling(pos, &legal, san, false);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.is_empty() {
        return Err(invalid(san, "empty SAN string"));
    }

    // Detect promotion.
    let (chars, promotion) = if chars.len() >= 2 && chars[chars.len() - 2] == '=' {
        let promo_char = chars[chars.len() - 1];
        let promo = match promo_char {
            'Q' | 'q' => PieceType::Queen,
            'R' | 'r' => PieceType::Rook,
            'B' | 'b' => PieceType::Bishop,
            'N' | 'n' => PieceType::Knight,
            _ => return Err(invalid(san, "unknown promotion piece")),
        };
        (&chars[..chars.len() - 2], Some(promo))
    } else {
        (&chars[..], None)
    };

    // Determine piece type.
    let (piece, rest) = if chars[0].is_uppercase() && "NBRQK".contains(chars[0]) {
        let pt = match chars[0] {
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'Q' => PieceType::Queen,
            'K' => PieceType::King,
            _ => unreachable!(),
        };
        (pt, &chars[1..])
    } else {
        (PieceType::Pawn, chars)
    };

    // Strip capture marker 'x'.
    let rest: Vec<char> = rest.iter().copied().filter(|&c| c != 'x').collect();

    // The last two characters are the destination square.
    if rest.len() < 2 {
        return Err(invalid(san, "SAN too short"));
    }

    let dest_str: String = rest[rest.len() - 2..].iter().collect();
    let dest = Square::from_algebraic(&dest_str)
        .ok_or_else(|| EngineError::InvalidSquare(dest_str.clone()))?;

    // Disambiguation characters (0, 1, or 2 chars before the destination).
    let disambig = &rest[..rest.len() - 2];
    let disambig_file: Option<u8> = disambig
        .iter()
        .find(|c| c.is_ascii_lowercase())
        .map(|&c| c as u8 - b'a');
    let disambig_rank: Option<u8> = disambig
        .iter()
        .find(|c| c.is_ascii_digit())
        .map(|&c| c as u8 - b'1');

    // Find the matching legal move.
    let us = pos.side_to_move;
    let candidates: Vec<&Move> = legal
        .iter()
        .filter(|m| {
            if m.to != dest || m.kind == MoveKind::Castle {
                return false;
            }
            match pos.piece_at(m.from) {
                Some((color, pt)) if color == us && pt == piece => {}
                _ => return false,
            }
            if let Some(f) = disambig_file
                && m.from.file() != f
            {
                return false;
            }
            if let Some(r) = disambig_rank
                && m.from.rank() != r
            {
                return false;
            }
            if let Some(promo) = promotion {
                if m.promotion != Some(promo) {
                    return false;
                }
            } else if m.promotion.is_some() {
                return false;
            }
            true
        })
        .collect();

    match candidates.len() {
        0 => Err(invalid(san, "no legal move matches")),
        1 => Ok(*candidates[0]),
        n => Err(invalid(san, &format!("ambiguous: {n} candidates"))),
    }
}

fn invalid(san: &str, reason: &str) -> EngineError {
    EngineError::InvalidSan {
        san: san.to_string(),
        reason: reason.to_string(),
    }
}

fn find_castling(
    pos: &Position,
    legal: &[Move],
    san: &str,
    kingside: bool,
) -> Result<Move, EngineError> {
    let king_sq = pos.king_sq(pos.side_to_move);
    let target_file = if kingside { 6 } else { 2 };

    legal
        .iter()
        .find(|m| m.kind == MoveKind::Castle && m.from == king_sq && m.to.file() == target_file)
        .copied()
        .ok_or_else(|| invalid(san, "castling not legal here"))
}

// =========================================================================
// Tests
// =========================================================================
