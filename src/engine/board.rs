//! Bitboard-based chess position representation.
//!
//! `Position` stores piece placement as 12 bitboards (2 colours × 6 piece
//! types), redundant occupancy bitboards and a mailbox array, side to move,
//! castling rights, en-passant square, move counters, an incremental Zobrist
//! hash, the repetition-history stack, and cached king squares.
//!
//! Moves are applied in place: `make_move` returns the undo record plus a
//! legality verdict, and `undo_move` restores the position bit for bit.

use crate::engine::attacks;
use crate::engine::types::{
    Bitboard, CastlingRights, Color, EngineError, Move, MoveKind, PieceType, Square,
    STARTING_HISTORY_LEN,
};
use crate::engine::zobrist;

// ---------------------------------------------------------------------------
// UndoInfo — saved state for reversing a move
// ---------------------------------------------------------------------------

/// State that must be saved before making a move so it can be restored on
/// undo. The Zobrist hash is not here: it comes back from the history stack.
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    pub mv: Move,
    pub captured: Option<PieceType>,
    pub promotion: bool,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A complete chess position using bitboard representation.
///
/// Board layout follows LERF (Little-Endian Rank-File) mapping:
/// a1 = 0, b1 = 1, … h1 = 7, a2 = 8, … h8 = 63.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece bitboards: `pieces[color][piece_type]`.
    pub pieces: [[Bitboard; PieceType::COUNT]; 2],

    /// Per-colour occupancy (union of all piece bitboards for that colour).
    pub occupied: [Bitboard; 2],

    /// Total occupancy (union of both colours).
    pub all_occupied: Bitboard,

    /// Piece-at-square array, kept coherent with the bitboards.
    pub mailbox: [Option<PieceType>; 64],

    /// Whose turn it is.
    pub side_to_move: Color,

    /// Castling availability (K/Q/k/q).
    pub castling_rights: CastlingRights,

    /// En-passant target square (the square *behind* the double-pushed pawn).
    pub en_passant: Option<Square>,

    /// Half-move clock for the 50-move rule (reset on pawn move or capture).
    pub halfmove_clock: u16,

    /// Full-move number (starts at 1, incremented after Black moves).
    pub fullmove_number: u16,

    /// Incremental Zobrist hash of the position.
    pub zobrist: u64,

    /// Zobrist hashes of ancestor positions, pushed by `make_move` and popped
    /// by `undo_move`. Seed it with prior game hashes to detect repetitions
    /// across the whole game, not just the current search.
    pub history: Vec<u64>,

    /// Cached king squares, one per colour.
    pub king_square: [Square; 2],
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

impl Position {
    /// Create an empty board with no pieces.
    pub fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; PieceType::COUNT]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            mailbox: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist: 0,
            history: Vec::with_capacity(STARTING_HISTORY_LEN),
            king_square: [Square(0); 2],
        }
    }

    /// Standard starting position.
    pub fn starting() -> Self {
        Self::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("starting FEN is always valid")
    }

    // -----------------------------------------------------------------------
    // Piece manipulation (low-level)
    // -----------------------------------------------------------------------

    /// Place a piece on a square. Does NOT update the Zobrist hash.
    #[inline]
    pub fn put_piece(&mut self, sq: Square, color: Color, piece: PieceType) {
        let bb = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bb;
        self.occupied[color.index()] |= bb;
        self.all_occupied |= bb;
        self.mailbox[sq.0 as usize] = Some(piece);
        if piece == PieceType::King {
            self.king_square[color.index()] = sq;
        }
    }

    /// Remove a piece from a square. Does NOT update the Zobrist hash.
    #[inline]
    pub fn remove_piece(&mut self, sq: Square, color: Color, piece: PieceType) {
        let bb = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= !bb;
        self.occupied[color.index()] &= !bb;
        self.all_occupied &= !bb;
        self.mailbox[sq.0 as usize] = None;
    }

    /// Place a piece and update the Zobrist hash.
    #[inline]
    pub fn put_piece_hash(&mut self, sq: Square, color: Color, piece: PieceType) {
        self.put_piece(sq, color, piece);
        self.zobrist ^= zobrist::keys().piece_key(color, piece, sq);
    }

    /// Remove a piece and update the Zobrist hash.
    #[inline]
    pub fn remove_piece_hash(&mut self, sq: Square, color: Color, piece: PieceType) {
        self.remove_piece(sq, color, piece);
        self.zobrist ^= zobrist::keys().piece_key(color, piece, sq);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square?
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, PieceType)> {
        let piece = self.mailbox[sq.0 as usize]?;
        let color = if self.occupied[Color::White.index()].is_set(sq) {
            Color::White
        } else {
            Color::Black
        };
        Some((color, piece))
    }

    /// Piece type on a square, colour-agnostic (mailbox lookup).
    #[inline]
    pub fn piece_type_at(&self, sq: Square) -> Option<PieceType> {
        self.mailbox[sq.0 as usize]
    }

    /// Bitboard of all pieces of a given colour and type.
    #[inline]
    pub fn bb(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Bitboard of friendly (side-to-move) pieces.
    #[inline]
    pub fn friendly(&self) -> Bitboard {
        self.occupied[self.side_to_move.index()]
    }

    /// Bitboard of enemy pieces.
    #[inline]
    pub fn enemy(&self) -> Bitboard {
        self.occupied[(!self.side_to_move).index()]
    }

    /// The king square for the given colour (cached).
    #[inline]
    pub fn king_sq(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    // -----------------------------------------------------------------------
    // Zobrist hash computation (full recompute)
    // -----------------------------------------------------------------------

    /// Compute the Zobrist hash from scratch (FEN loading / verification).
    pub fn compute_zobrist(&self) -> u64 {
        let zk = zobrist::keys();
        let mut hash = 0u64;

        // Pieces.
        for color in [Color::White, Color::Black] {
            for pt in PieceType::ALL {
                for sq in self.bb(color, pt).iter() {
                    hash ^= zk.piece_key(color, pt, sq);
                }
            }
        }

        // Side to move.
        if self.side_to_move == Color::Black {
            hash ^= zk.side_key();
        }

        // Castling rights.
        hash ^= zk.castling_key(self.castling_rights.0);

        // En passant file.
        if let Some(ep_sq) = self.en_passant {
            hash ^= zk.ep_key(ep_sq.file());
        }

        hash
    }

    // -----------------------------------------------------------------------
    // Repetition detection
    // -----------------------------------------------------------------------

    /// Has the current position already occurred with the same side to move?
    ///
    /// Only every second history entry can match: the Zobrist key folds in
    /// the side to move (plus castling rights and the en-passant file), so
    /// one ancestor hit is a genuine repetition.
    #[inline]
    pub fn is_repetition(&self) -> bool {
        self.history
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .any(|&h| h == self.zobrist)
    }

    // -----------------------------------------------------------------------
    // Consistency check (debug and test builds)
    // -----------------------------------------------------------------------

    /// Verify the redundant representations against each other: occupancy
    /// vs piece bitboards, mailbox vs bitboards, king cache, and the
    /// incrementally maintained Zobrist hash.
    #[cfg(any(debug_assertions, test))]
    pub fn assert_consistent(&self) {
        for color in [Color::White, Color::Black] {
            let mut expected = Bitboard::EMPTY;
            for pt in PieceType::ALL {
                expected |= self.pieces[color.index()][pt.index()];
            }
            assert_eq!(
                self.occupied[color.index()],
                expected,
                "occupancy mismatch for {color:?}",
            );

            let kings = self.bb(color, PieceType::King);
            assert_eq!(kings.pop_count(), 1, "{color:?} must have one king");
            assert_eq!(
                kings.lsb(),
                Some(self.king_square[color.index()]),
                "king cache stale for {color:?}",
            );
        }
        assert_eq!(
            self.all_occupied,
            self.occupied[0] | self.occupied[1],
            "all_occupied mismatch",
        );
        assert!(
            (self.occupied[0] & self.occupied[1]).is_empty(),
            "colours overlap",
        );

        for sq in 0..64u8 {
            let sq = Square(sq);
            match self.mailbox[sq.0 as usize] {
                None => assert!(!self.all_occupied.is_set(sq), "mailbox empty, bit set at {sq}"),
                Some(pt) => {
                    let color = if self.occupied[0].is_set(sq) {
                        Color::White
                    } else {
                        Color::Black
                    };
                    assert!(
                        self.bb(color, pt).is_set(sq),
                        "mailbox says {pt:?} at {sq}, bitboard disagrees",
                    );
                }
            }
        }

        if let Some(ep) = self.en_passant {
            assert!(
                ep.rank() == 2 || ep.rank() == 5,
                "en passant target {ep} off rank 3/6",
            );
        }

        assert_eq!(self.zobrist, self.compute_zobrist(), "zobrist drifted");
    }

    // -----------------------------------------------------------------------
    // Attack detection
    // -----------------------------------------------------------------------

    /// Is `sq` attacked by any piece of colour `by`?
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let t = attacks::tables();
        let occ = self.all_occupied;

        // Pawn attacks, reversed: squares from which a `by` pawn attacks `sq`.
        let pawn_atk = t.pawn_attacks(!by, sq);
        if (pawn_atk & self.bb(by, PieceType::Pawn)).is_not_empty() {
            return true;
        }

        // Knight attacks.
        if (t.knight_attacks(sq) & self.bb(by, PieceType::Knight)).is_not_empty() {
            return true;
        }

        // King attacks.
        if (t.king_attacks(sq) & self.bb(by, PieceType::King)).is_not_empty() {
            return true;
        }

        // Rook / Queen (straight lines).
        let rook_queen = self.bb(by, PieceType::Rook) | self.bb(by, PieceType::Queen);
        if (t.rook_attacks(sq, occ) & rook_queen).is_not_empty() {
            return true;
        }

        // Bishop / Queen (diagonals).
        let bishop_queen = self.bb(by, PieceType::Bishop) | self.bb(by, PieceType::Queen);
        if (t.bishop_attacks(sq, occ) & bishop_queen).is_not_empty() {
            return true;
        }

        false
    }

    /// Is the side-to-move's king currently in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_square_attacked(self.king_sq(self.side_to_move), !self.side_to_move)
    }

    // -----------------------------------------------------------------------
    // Make / Undo move
    // -----------------------------------------------------------------------

    /// Apply a pseudo-legal move to the position.
    ///
    /// Returns the undo record and whether the move was legal (the mover's
    /// king not left attacked). On `false` the caller must `undo_move` and
    /// discard the move — the position is otherwise fully updated either way.
    pub fn make_move(&mut self, mv: Move) -> (UndoInfo, bool) {
        let zk = zobrist::keys();
        let us = self.side_to_move;
        let them = !us;

        let undo = UndoInfo {
            mv,
            captured: None, // filled in below
            promotion: mv.promotion.is_some(),
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        };

        // The pre-move hash feeds repetition detection; undo pops it back.
        self.history.push(self.zobrist);

        self.halfmove_clock += 1;
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        // ---- Clear en passant (hash out the old file first) ----
        if let Some(ep) = self.en_passant {
            self.zobrist ^= zk.ep_key(ep.file());
        }
        self.en_passant = None;

        let moving_piece = match self.mailbox[mv.from.0 as usize] {
            Some(pt) => pt,
            None => panic!("no piece on {} (board:\n{})", mv.from, self.board_string()),
        };

        // ---- Captures ----
        let mut captured = None;
        if mv.kind == MoveKind::EnPassant {
            // The captured pawn sits one rank behind the destination.
            let cap_sq = match us {
                Color::White => Square(mv.to.0 - 8),
                Color::Black => Square(mv.to.0 + 8),
            };
            self.remove_piece_hash(cap_sq, them, PieceType::Pawn);
            captured = Some(PieceType::Pawn);
            self.halfmove_clock = 0;
        } else if mv.kind == MoveKind::Capture {
            let cap_piece = match self.mailbox[mv.to.0 as usize] {
                Some(pt) => pt,
                None => panic!(
                    "capture with empty target {} (board:\n{})",
                    mv.to,
                    self.board_string()
                ),
            };
            self.remove_piece_hash(mv.to, them, cap_piece);
            captured = Some(cap_piece);
            self.halfmove_clock = 0;
        }

        // ---- Move the piece (promotions land as the promoted piece) ----
        self.remove_piece_hash(mv.from, us, moving_piece);
        let landing_piece = mv.promotion.unwrap_or(moving_piece);
        self.put_piece_hash(mv.to, us, landing_piece);

        // ---- Pawn specifics ----
        if moving_piece == PieceType::Pawn {
            self.halfmove_clock = 0;
            if mv.kind == MoveKind::DoublePush {
                let ep_sq = match us {
                    Color::White => Square(mv.from.0 + 8),
                    Color::Black => Square(mv.from.0 - 8),
                };
                self.en_passant = Some(ep_sq);
                self.zobrist ^= zk.ep_key(ep_sq.file());
            }
        }

        // ---- Castling: slide the rook as well ----
        if mv.kind == MoveKind::Castle {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            self.remove_piece_hash(rook_from, us, PieceType::Rook);
            self.put_piece_hash(rook_to, us, PieceType::Rook);
        }

        // ---- Castling rights ----
        // Any move touching a king or rook home square strips the right,
        // covering king moves, rook moves and rook captures alike.
        self.zobrist ^= zk.castling_key(self.castling_rights.0);
        self.castling_rights.0 &= CASTLING_MASK[mv.from.0 as usize];
        self.castling_rights.0 &= CASTLING_MASK[mv.to.0 as usize];
        self.zobrist ^= zk.castling_key(self.castling_rights.0);

        // ---- Switch side ----
        self.side_to_move = them;
        self.zobrist ^= zk.side_key();

        // ---- Legality: the mover's king must not be left attacked ----
        let legal = !self.is_square_attacked(self.king_square[us.index()], them);

        (UndoInfo { captured, ..undo }, legal)
    }

    /// Reverse a move previously applied with `make_move`.
    ///
    /// Restores every field of the position; the Zobrist hash comes back
    /// from the history stack.
    pub fn undo_move(&mut self, undo: &UndoInfo) {
        let them = self.side_to_move; // side that did NOT make the move
        let us = !them;
        let mv = undo.mv;

        self.side_to_move = us;

        let landing_piece = match self.mailbox[mv.to.0 as usize] {
            Some(pt) => pt,
            None => panic!(
                "undo with empty landing square {} (board:\n{})",
                mv.to,
                self.board_string()
            ),
        };
        let original_piece = if undo.promotion {
            PieceType::Pawn
        } else {
            landing_piece
        };

        self.remove_piece(mv.to, us, landing_piece);
        self.put_piece(mv.from, us, original_piece);

        // ---- Restore the captured piece ----
        if mv.kind == MoveKind::EnPassant {
            let cap_sq = match us {
                Color::White => Square(mv.to.0 - 8),
                Color::Black => Square(mv.to.0 + 8),
            };
            self.put_piece(cap_sq, them, PieceType::Pawn);
        } else if let Some(cap_piece) = undo.captured {
            self.put_piece(mv.to, them, cap_piece);
        }

        // ---- Slide the rook back ----
        if mv.kind == MoveKind::Castle {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            self.remove_piece(rook_to, us, PieceType::Rook);
            self.put_piece(rook_from, us, PieceType::Rook);
        }

        // ---- Restore saved state ----
        self.castling_rights = undo.castling_rights;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.zobrist = self.history.pop().expect("undo without matching make");

        if us == Color::Black {
            self.fullmove_number -= 1;
        }
    }

    // -----------------------------------------------------------------------
    // Board display (8×8 text grid)
    // -----------------------------------------------------------------------

    /// Render the board as an 8-line string (rank 8 at top) for debugging.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (0..8).rev() {
            s.push((b'1' + rank) as char);
            s.push(' ');
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                let ch = match self.piece_at(sq) {
                    Some((c, p)) => p.to_char(c),
                    None => '.',
                };
                s.push(ch);
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

// ---------------------------------------------------------------------------
// Castling helpers (free functions)
// ---------------------------------------------------------------------------

/// For a king-destination square (after castling), return (rook_from, rook_to).
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to.0 {
        // White kingside: king e1→g1, rook h1→f1.
        6 => (Square(7), Square(5)),
        // White queenside: king e1→c1, rook a1→d1.
        2 => (Square(0), Square(3)),
        // Black kingside: king e8→g8, rook h8→f8.
        62 => (Square(63), Square(61)),
        // Black queenside: king e8→c8, rook a8→d8.
        58 => (Square(56), Square(59)),
        _ => panic!("invalid castling king destination: {king_to}"),
    }
}

/// Mask table indexed by square index. When a move touches a square, AND the
/// castling rights with this mask. E.g. if a rook on a1 moves (or is captured),
/// remove White-queenside. The king's home square removes both that side's rights.
#[rustfmt::skip]
const CASTLING_MASK: [u8; 64] = {
    let mut mask = [0b1111u8; 64];
    // a1 (0): remove white-queenside
    mask[0]  = 0b1111 & !CastlingRights::WHITE_QUEENSIDE;
    // e1 (4): remove both white rights
    mask[4]  = 0b1111 & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    // h1 (7): remove white-kingside
    mask[7]  = 0b1111 & !CastlingRights::WHITE_KINGSIDE;
    // a8 (56): remove black-queenside
    mask[56] = 0b1111 & !CastlingRights::BLACK_QUEENSIDE;
    // e8 (60): remove both black rights
    mask[60] = 0b1111 & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    // h8 (63): remove black-kingside
    mask[63] = 0b1111 & !CastlingRights::BLACK_KINGSIDE;
    mask
};

// ---------------------------------------------------------------------------
// FEN parsing & generation
// ---------------------------------------------------------------------------

impl Position {
    /// Parse a FEN string into a `Position`.
    ///
    /// Validates all 6 fields (piece placement, side to move, castling,
    /// en passant, halfmove clock, fullmove number) and ensures exactly one
    /// king per side.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(EngineError::InvalidFen(format!(
                "expected 6 fields, got {}",
                fields.len()
            )));
        }

        let mut pos = Position::empty();

        // ----- Field 1: Piece placement -----
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidFen(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN starts from rank 8
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if file > 7 {
                    return Err(EngineError::InvalidFen(format!(
                        "too many squares in rank {}",
                        rank + 1
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(EngineError::InvalidFen(format!(
                            "invalid empty count '{ch}' in rank {}",
                            rank + 1
                        )));
                    }
                    file += digit as u8;
                } else if let Some((color, piece)) = PieceType::from_char(ch) {
                    let sq = Square::from_file_rank(file, rank);
                    pos.put_piece(sq, color, piece);
                    file += 1;
                } else {
                    return Err(EngineError::InvalidFen(format!(
                        "invalid character '{ch}' in piece placement"
                    )));
                }
            }
            if file != 8 {
                return Err(EngineError::InvalidFen(format!(
                    "rank {} has {} squares instead of 8",
                    rank + 1,
                    file
                )));
            }
        }

        // Validate exactly one king per side.
        for color in [Color::White, Color::Black] {
            let king_count = pos.pieces[color.index()][PieceType::King.index()].pop_count();
            if king_count != 1 {
                return Err(EngineError::InvalidFen(format!(
                    "{color} has {king_count} kings (expected 1)"
                )));
            }
        }

        // ----- Field 2: Side to move -----
        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(EngineError::InvalidFen(format!(
                    "invalid side to move: '{other}'"
                )));
            }
        };

        // ----- Field 3: Castling availability -----
        pos.castling_rights = CastlingRights::from_fen(fields[2]).ok_or_else(|| {
            EngineError::InvalidFen(format!("invalid castling string: '{}'", fields[2]))
        })?;

        // ----- Field 4: En passant target square -----
        if fields[3] != "-" {
            let ep_sq = Square::from_algebraic(fields[3]).ok_or_else(|| {
                EngineError::InvalidFen(format!("invalid en passant square: '{}'", fields[3]))
            })?;
            // En passant target must be on rank 3 (for Black) or rank 6 (for White).
            let rank = ep_sq.rank();
            if rank != 2 && rank != 5 {
                return Err(EngineError::InvalidFen(format!(
                    "en passant square {} is not on rank 3 or 6",
                    fields[3]
                )));
            }
            pos.en_passant = Some(ep_sq);
        }

        // ----- Field 5: Halfmove clock -----
        pos.halfmove_clock = fields[4].parse::<u16>().map_err(|_| {
            EngineError::InvalidFen(format!("invalid halfmove clock: '{}'", fields[4]))
        })?;

        // ----- Field 6: Fullmove number -----
        pos.fullmove_number = fields[5].parse::<u16>().map_err(|_| {
            EngineError::InvalidFen(format!("invalid fullmove number: '{}'", fields[5]))
        })?;
        if pos.fullmove_number == 0 {
            return Err(EngineError::InvalidFen(
                "fullmove number must be >= 1".to_string(),
            ));
        }

        // Compute the Zobrist hash from scratch.
        pos.zobrist = pos.compute_zobrist();

        #[cfg(debug_assertions)]
        pos.assert_consistent();

        Ok(pos)
    }

    /// Export the position as a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(80);

        // ----- Field 1: Piece placement -----
        for rank in (0..8).rev() {
            let mut empty_count = 0u8;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_count > 0 {
                            fen.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        fen.push(piece.to_char(color));
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push((b'0' + empty_count) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // ----- Field 2: Side to move -----
        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // ----- Field 3: Castling -----
        fen.push(' ');
        fen.push_str(&self.castling_rights.to_fen());

        // ----- Field 4: En passant -----
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        // ----- Field 5: Halfmove clock -----
        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());

        // ----- Field 6: Fullmove number -----
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
