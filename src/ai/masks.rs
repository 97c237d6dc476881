//! Pre-computed masks for the pawn-structure and king-safety terms.
//!
//! Built once at startup next to the attack tables: per-file masks,
//! adjacent-file masks, per-square passed-pawn masks for each colour, and
//! the two-square king ring.

use crate::engine::types::{Bitboard, Color, Square};
use std::sync::OnceLock;

/// Evaluation masks, initialised once.
pub struct Masks {
    /// One full file per entry, a-file first.
    pub file: [Bitboard; 8],
    /// Files adjacent to the indexed file (the file itself excluded).
    pub adjacent_files: [Bitboard; 8],
    /// `passed[color][square]`: same and adjacent files, ranks strictly
    /// ahead of the square from `color`'s point of view. A pawn is passed
    /// when this mask holds no enemy pawn.
    pub passed: [[Bitboard; 64]; 2],
    /// Up to 24 squares within two king steps, the king square excluded.
    pub king_ring: [Bitboard; 64],
}

/// Get a reference to the global evaluation masks.
pub fn tables() -> &'static Masks {
    static TABLES: OnceLock<Masks> = OnceLock::new();
    TABLES.get_or_init(Masks::init)
}

impl Masks {
    fn init() -> Self {
        let mut file = [Bitboard::EMPTY; 8];
        for f in 0..8u8 {
            for r in 0..8u8 {
                file[f as usize].set(Square::from_file_rank(f, r));
            }
        }

        let mut adjacent_files = [Bitboard::EMPTY; 8];
        for f in 0..8usize {
            if f > 0 {
                adjacent_files[f] |= file[f - 1];
            }
            if f < 7 {
                adjacent_files[f] |= file[f + 1];
            }
        }

        let mut passed = [[Bitboard::EMPTY; 64]; 2];
        for sq in 0..64u8 {
            let f = (sq & 7) as i8;
            let r = (sq >> 3) as i8;
            for df in -1..=1i8 {
                let nf = f + df;
                if !(0..8).contains(&nf) {
                    continue;
                }
                // White pawns march toward rank 8, Black toward rank 1.
                for nr in (r + 1)..8 {
                    passed[Color::White.index()][sq as usize]
                        .set(Square::from_file_rank(nf as u8, nr as u8));
                }
                for nr in 0..r {
                    passed[Color::Black.index()][sq as usize]
                        .set(Square::from_file_rank(nf as u8, nr as u8));
                }
            }
        }

        let mut king_ring = [Bitboard::EMPTY; 64];
        for sq in 0..64u8 {
            let f = (sq & 7) as i8;
            let r = (sq >> 3) as i8;
            for df in -2..=2i8 {
                for dr in -2..=2i8 {
                    if df == 0 && dr == 0 {
                        continue;
                    }
                    let nf = f + df;
                    let nr = r + dr;
                    if (0..8).contains(&nf) && (0..8).contains(&nr) {
                        king_ring[sq as usize].set(Square::from_file_rank(nf as u8, nr as u8));
                    }
                }
            }
        }

        Masks {
            file,
            adjacent_files,
            passed,
            king_ring,
        }
    }
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
    fn file_masks() {
        let m = tables();
        assert_eq!(m.file[0].0, 0x0101_0101_0101_0101);
        assert_eq!(m.file[7].0, 0x8080_8080_8080_8080);
        for f in 0..8 {
            assert_eq!(m.file[f].pop_count(), 8);
        }
    }

    #[test]
    fn adjacent_file_masks() {
        let m = tables();
        // a-file is only adjacent to b.
        assert_eq!(m.adjacent_files[0], m.file[1]);
        // d-file is adjacent to c and e.
        assert_eq!(m.adjacent_files[3], m.file[2] | m.file[4]);
        assert_eq!(m.adjacent_files[3].pop_count(), 16);
    }

    #[test]
    fn passed_mask_white_center() {
        let m = tables();
        let mask = m.passed[Color::White.index()][sq("d4").0 as usize];
        // Files c, d, e on ranks 5..8: 3 files x 4 ranks.
        assert_eq!(mask.pop_count(), 12);
        assert!(mask.is_set(sq("c5")));
        assert!(mask.is_set(sq("e8")));
        assert!(!mask.is_set(sq("d4")));
        assert!(!mask.is_set(sq("d3")));
    }

    #[test]
    fn passed_mask_black_mirrors_white() {
        let m = tables();
        let white = m.passed[Color::White.index()][sq("d4").0 as usize];
        let black = m.passed[Color::Black.index()][sq("d5").0 as usize];
        assert_eq!(white.pop_count(), black.pop_count());
        assert!(black.is_set(sq("c4")));
        assert!(black.is_set(sq("e1")));
    }

    #[test]
    fn passed_mask_edge_file() {
        let m = tables();
        let mask = m.passed[Color::White.index()][sq("a2").0 as usize];
        // Files a, b on ranks 3..8: 2 files x 6 ranks.
        assert_eq!(mask.pop_count(), 12);
    }

    #[test]
    fn king_ring_interior_has_24_squares() {
        let m = tables();
        assert_eq!(m.king_ring[sq("e4").0 as usize].pop_count(), 24);
        assert!(!m.king_ring[sq("e4").0 as usize].is_set(sq("e4")));
    }

    #[test]
    fn king_ring_corner_is_clipped() {
        let m = tables();
        // a1: 3x3 square minus the corner itself.
        assert_eq!(m.king_ring[sq("a1").0 as usize].pop_count(), 8);
        assert!(m.king_ring[sq("a1").0 as usize].is_set(sq("c3")));
    }
}
