//! Tapered piece-square tables.
//!
//! One opening and one endgame table per piece type, material value folded
//! in (a pawn cell reads ~100, a queen cell ~900). White tables are written
//! out; Black tables are built once at startup by flipping White's
//! vertically. The evaluator interpolates the two stages by game phase.
//!
//! Index 0 = a1, 7 = h1, 56 = a8 (LERF) — the first source row below is
//! rank 1.

use crate::engine::types::{Color, PieceType, Score, Square};
use std::sync::OnceLock;

/// Stage index: opening tables.
pub const OPENING: usize = 0;
/// Stage index: endgame tables.
pub const ENDGAME: usize = 1;

// =========================================================================
// Pawns
// =========================================================================

/// Favour queenside and central advancement.
#[rustfmt::skip]
const PAWN_OPENING: [Score; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
    100, 100,  95,  90,  90, 105, 100, 100,
     95,  95, 100, 100, 100,  80,  95,  95,
     95, 100, 105, 110, 110,  85,  90,  90,
     95, 100, 110, 115, 115,  90,  90,  90,
    100, 105, 115, 120, 120, 100,  95,  95,
    105, 110, 120, 125, 125, 110, 100, 100,
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// Every advanced pawn counts; edges run slightly ahead.
#[rustfmt::skip]
const PAWN_ENDGAME: [Score; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     85,  85,  85,  85,  85,  85,  85,  85,
     95,  95,  95,  95,  95,  95,  95,  95,
    100, 100, 100, 100, 100, 100, 100, 100,
    105, 105, 105, 105, 105, 105, 105, 105,
    115, 115, 115, 115, 115, 115, 115, 115,
    135, 125, 125, 125, 125, 125, 130, 135,
      0,   0,   0,   0,   0,   0,   0,   0,
];

// =========================================================================
// Knights
// =========================================================================

/// Development toward the centre, away from the rim.
#[rustfmt::skip]
const KNIGHT_OPENING: [Score; 64] = [
    280, 285, 285, 290, 290, 285, 285, 280,
    290, 290, 295, 300, 300, 295, 290, 290,
    295, 305, 310, 310, 310, 310, 305, 295,
    295, 310, 315, 315, 315, 315, 310, 295,
    295, 315, 315, 315, 315, 315, 315, 295,
    290, 305, 305, 305, 305, 305, 305, 290,
    285, 295, 300, 300, 300, 300, 295, 285,
    280, 285, 295, 295, 295, 295, 285, 280,
];

/// Centrality above all else.
#[rustfmt::skip]
const KNIGHT_ENDGAME: [Score; 64] = [
    270, 280, 290, 300, 300, 290, 280, 270,
    280, 290, 300, 310, 310, 300, 290, 280,
    290, 300, 310, 315, 315, 310, 300, 290,
    300, 310, 315, 320, 320, 315, 310, 300,
    300, 310, 315, 320, 320, 315, 310, 300,
    290, 300, 310, 315, 315, 310, 300, 290,
    280, 290, 300, 310, 310, 300, 290, 280,
    270, 280, 290, 300, 300, 290, 280, 270,
];

// =========================================================================
// Bishops
// =========================================================================

/// Development to the long-diagonal and outpost squares.
#[rustfmt::skip]
const BISHOP_OPENING: [Score; 64] = [
    275, 285, 290, 290, 290, 290, 285, 275,
    285, 310, 285, 295, 295, 285, 310, 285,
    295, 295, 300, 305, 305, 300, 295, 295,
    300, 300, 305, 310, 310, 305, 300, 300,
    305, 305, 315, 315, 315, 315, 305, 305,
    305, 315, 315, 315, 315, 315, 315, 305,
    300, 310, 315, 315, 315, 315, 310, 300,
    295, 300, 305, 305, 305, 305, 300, 295,
];

/// Centrality; the bishop gains value as the board opens.
#[rustfmt::skip]
const BISHOP_ENDGAME: [Score; 64] = [
    275, 285, 295, 305, 305, 295, 285, 275,
    285, 295, 305, 315, 315, 305, 295, 285,
    295, 305, 315, 320, 320, 315, 305, 295,
    305, 315, 320, 325, 325, 320, 315, 305,
    305, 315, 320, 325, 325, 320, 315, 305,
    295, 305, 315, 320, 320, 315, 305, 295,
    285, 295, 305, 315, 315, 305, 295, 285,
    275, 285, 295, 305, 305, 295, 285, 275,
];

// =========================================================================
// Rooks
// =========================================================================

/// Central files; the 7th rank earns its classical bonus.
#[rustfmt::skip]
const ROOK_OPENING: [Score; 64] = [
    490, 495, 500, 505, 505, 500, 495, 490,
    495, 500, 505, 510, 510, 505, 500, 495,
    500, 505, 505, 510, 510, 505, 505, 500,
    500, 505, 510, 515, 515, 510, 505, 500,
    500, 505, 510, 515, 515, 510, 505, 500,
    505, 510, 515, 520, 520, 515, 510, 505,
    520, 525, 530, 535, 535, 530, 525, 520,
    510, 515, 520, 525, 525, 520, 515, 510,
];

/// Rook value rises with open ranks and files.
#[rustfmt::skip]
const ROOK_ENDGAME: [Score; 64] = [
    500, 505, 510, 515, 515, 510, 505, 500,
    510, 520, 525, 530, 530, 525, 520, 510,
    515, 525, 535, 540, 540, 535, 525, 515,
    520, 530, 540, 550, 550, 540, 530, 520,
    520, 530, 540, 550, 550, 540, 530, 520,
    515, 525, 535, 540, 540, 535, 525, 515,
    530, 540, 550, 560, 560, 550, 540, 530,
    510, 520, 530, 540, 540, 530, 520, 510,
];

// =========================================================================
// Queens
// =========================================================================

/// Centrality without rewarding premature development.
#[rustfmt::skip]
const QUEEN_OPENING: [Score; 64] = [
    840, 860, 870, 880, 880, 870, 860, 840,
    860, 880, 890, 895, 895, 890, 880, 860,
    870, 890, 900, 905, 905, 900, 890, 870,
    875, 895, 905, 910, 910, 905, 895, 875,
    875, 895, 905, 910, 910, 905, 895, 875,
    870, 890, 900, 905, 905, 900, 890, 870,
    860, 880, 890, 895, 895, 890, 880, 860,
    840, 860, 870, 880, 880, 870, 860, 840,
];

#[rustfmt::skip]
const QUEEN_ENDGAME: [Score; 64] = [
    860, 880, 900, 915, 915, 900, 880, 860,
    880, 905, 920, 930, 930, 920, 905, 880,
    900, 920, 935, 945, 945, 935, 920, 900,
    915, 930, 945, 955, 955, 945, 930, 915,
    915, 930, 945, 955, 955, 945, 930, 915,
    900, 920, 935, 945, 945, 935, 920, 900,
    880, 905, 920, 930, 930, 920, 905, 880,
    860, 880, 900, 915, 915, 900, 880, 860,
];

// =========================================================================
// Kings
// =========================================================================

/// Shelter on the back rank; the centre is a liability.
#[rustfmt::skip]
const KING_OPENING: [Score; 64] = [
    500, 515, 500, 460, 460, 480, 515, 500,
    485, 490, 470, 445, 445, 455, 470, 485,
    460, 455, 440, 425, 425, 435, 455, 460,
    440, 435, 420, 405, 405, 415, 435, 440,
    420, 415, 400, 385, 385, 395, 415, 420,
    400, 395, 380, 365, 365, 375, 395, 400,
    380, 375, 360, 350, 350, 360, 375, 380,
    370, 370, 360, 350, 350, 360, 370, 370,
];

/// The king becomes a fighting piece: walk it to the centre.
#[rustfmt::skip]
const KING_ENDGAME: [Score; 64] = [
    340, 370, 400, 420, 420, 400, 370, 340,
    370, 400, 430, 450, 450, 430, 400, 370,
    400, 430, 460, 480, 480, 460, 430, 400,
    420, 450, 480, 500, 500, 480, 450, 420,
    420, 450, 480, 500, 500, 480, 450, 420,
    400, 430, 460, 480, 480, 460, 430, 400,
    370, 400, 430, 450, 450, 430, 400, 370,
    340, 370, 400, 420, 420, 400, 370, 340,
];

// =========================================================================
// Master table
// =========================================================================

/// All piece-square tables, indexed `[stage][color][piece][square]`.
pub struct PstTables {
    table: [[[[Score; 64]; PieceType::COUNT]; 2]; 2],
}

/// Get a reference to the global PST tables.
pub fn tables() -> &'static PstTables {
    static TABLES: OnceLock<PstTables> = OnceLock::new();
    TABLES.get_or_init(PstTables::init)
}

impl PstTables {
    fn init() -> Self {
        let white: [[[Score; 64]; PieceType::COUNT]; 2] = [
            [
                PAWN_OPENING,
                KNIGHT_OPENING,
                BISHOP_OPENING,
                ROOK_OPENING,
                QUEEN_OPENING,
                KING_OPENING,
            ],
            [
                PAWN_ENDGAME,
                KNIGHT_ENDGAME,
                BISHOP_ENDGAME,
                ROOK_ENDGAME,
                QUEEN_ENDGAME,
                KING_ENDGAME,
            ],
        ];

        let mut table = [[[[0; 64]; PieceType::COUNT]; 2]; 2];
        for stage in [OPENING, ENDGAME] {
            for piece in 0..PieceType::COUNT {
                table[stage][Color::White.index()][piece] = white[stage][piece];
                table[stage][Color::Black.index()][piece] = flip(white[stage][piece]);
            }
        }
        PstTables { table }
    }

    /// Table value for a piece of `color` on `sq` at the given stage.
    #[inline]
    pub fn get(&self, stage: usize, color: Color, piece: PieceType, sq: Square) -> Score {
        self.table[stage][color.index()][piece.index()][sq.0 as usize]
    }
}

/// Flip a White table vertically to produce the Black equivalent.
/// XOR 56 mirrors the rank: a1 ↔ a8, e2 ↔ e7, and so on.
fn flip(table: [Score; 64]) -> [Score; 64] {
    let mut flipped = [0; 64];
    for (i, &v) in table.iter().enumerate() {
        flipped[i ^ 56] = v;
    }
    flipped
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn pawn_rows_are_zero_on_back_ranks() {
        let t = tables();
        for file in 0..8 {
            let first = Square::from_file_rank(file, 0);
            let last = Square::from_file_rank(file, 7);
            assert_eq!(t.get(OPENING, Color::White, PieceType::Pawn, first), 0);
            assert_eq!(t.get(OPENING, Color::White, PieceType::Pawn, last), 0);
        }
    }

    #[test]
    fn black_tables_mirror_white() {
        let t = tables();
        for stage in [OPENING, ENDGAME] {
            for piece in PieceType::ALL {
                for i in 0..64u8 {
                    assert_eq!(
                        t.get(stage, Color::White, piece, Square(i)),
                        t.get(stage, Color::Black, piece, Square(i ^ 56)),
                        "mirror mismatch: {piece:?} stage {stage} square {i}",
                    );
                }
            }
        }
    }

    #[test]
    fn white_king_prefers_back_rank_in_opening() {
        let t = tables();
        let home = t.get(OPENING, Color::White, PieceType::King, sq("e1"));
        let center = t.get(OPENING, Color::White, PieceType::King, sq("e5"));
        assert!(home > center, "opening king should sit home: {home} vs {center}");
    }

    #[test]
    fn white_king_prefers_center_in_endgame() {
        let t = tables();
        let home = t.get(ENDGAME, Color::White, PieceType::King, sq("e1"));
        let center = t.get(ENDGAME, Color::White, PieceType::King, sq("e5"));
        assert!(center > home, "endgame king should centralise: {center} vs {home}");
    }

    #[test]
    fn advanced_pawn_outscores_home_pawn() {
        let t = tables();
        let home = t.get(OPENING, Color::White, PieceType::Pawn, sq("d2"));
        let advanced = t.get(OPENING, Color::White, PieceType::Pawn, sq("d6"));
        assert!(advanced > home);
        // And the same holds for Black, mirrored.
        let b_home = t.get(OPENING, Color::Black, PieceType::Pawn, sq("d7"));
        let b_advanced = t.get(OPENING, Color::Black, PieceType::Pawn, sq("d3"));
        assert_eq!(home, b_home);
        assert_eq!(advanced, b_advanced);
    }

    #[test]
    fn material_is_folded_into_tables() {
        let t = tables();
        // A queen cell dwarfs a pawn cell: tables are absolute, not deltas.
        let q = t.get(OPENING, Color::White, PieceType::Queen, sq("d4"));
        let p = t.get(OPENING, Color::White, PieceType::Pawn, sq("d4"));
        assert!(q > 800 && p < 150);
    }
}
