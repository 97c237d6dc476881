//! Zobrist hashing for incremental position identification.
//!
//! Every hashable facet of a position — a piece on a square, Black to move,
//! a castling-rights mask, an en-passant file — owns one slot in a single
//! flat key table. The position hash is the XOR of the applicable slots,
//! which make/undo can maintain in O(1) per facet.
//!
//! The table is filled by a splitmix64 stream from a fixed master seed, so
//! hashes are reproducible across runs and match whatever the collaborating
//! front-end recorded.

use crate::engine::types::{Color, PieceType, Square};
use std::sync::OnceLock;

/// Fixed master seed for the key stream.
const MASTER_SEED: u64 = 20_240_928;

// ---------------------------------------------------------------------------
// Flat table layout
// ---------------------------------------------------------------------------
//
// [0, 768)    piece keys: ((color * 6 + piece) * 64) + square
// [768]       black to move
// [769, 785)  castling keys, one per 4-bit rights mask
// [785, 793)  en-passant keys, one per file

const PIECE_KEYS: usize = 2 * PieceType::COUNT * Square::NUM;
const SIDE_OFFSET: usize = PIECE_KEYS;
const CASTLING_OFFSET: usize = SIDE_OFFSET + 1;
const EP_OFFSET: usize = CASTLING_OFFSET + 16;
const KEY_COUNT: usize = EP_OFFSET + 8;

// ---------------------------------------------------------------------------
// ZobristKeys — immutable singleton
// ---------------------------------------------------------------------------

/// The key table, generated once at startup.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

/// Get a reference to the global Zobrist keys.
pub fn keys() -> &'static ZobristKeys {
    static ZOBRIST: OnceLock<ZobristKeys> = OnceLock::new();
    ZOBRIST.get_or_init(ZobristKeys::init)
}

impl ZobristKeys {
    fn init() -> Self {
        let mut state = MASTER_SEED;
        let mut keys = [0u64; KEY_COUNT];
        for key in &mut keys {
            *key = splitmix64(&mut state);
        }
        ZobristKeys { keys }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Key for a specific piece on a specific square.
    #[inline]
    pub fn piece_key(&self, color: Color, piece: PieceType, sq: Square) -> u64 {
        let slot = (color.index() * PieceType::COUNT + piece.index()) * Square::NUM
            + sq.0 as usize;
        self.keys[slot]
    }

    /// Key XORed in whenever it is Black's turn to move.
    #[inline]
    pub fn side_key(&self) -> u64 {
        self.keys[SIDE_OFFSET]
    }

    /// Key for a castling-rights bitmask (0..16).
    #[inline]
    pub fn castling_key(&self, rights: u8) -> u64 {
        debug_assert!(rights < 16);
        self.keys[CASTLING_OFFSET + rights as usize]
    }

    /// Key for an en-passant file (0..8).
    #[inline]
    pub fn ep_key(&self, file: u8) -> u64 {
        debug_assert!(file < 8);
        self.keys[EP_OFFSET + file as usize]
    }
}

// ---------------------------------------------------------------------------
// Key stream (splitmix64)
// ---------------------------------------------------------------------------

/// One splitmix64 step: advance the state by the Weyl constant and return
/// the mixed output. Deterministic and well distributed even from a small
/// seed, which the master constant is.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
