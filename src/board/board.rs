//! Board structure with per-color and king bitboards

use std::fmt;

use thiserror::Error;

use super::bitboard::Bitboard;
use super::{Color, Piece, Pos, Rank, BOARD_SIZE};

/// Number of rows each side fills at the start of a game
const START_ROWS: u8 = 4;

/// A layout that no sequence of moves can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("piece on light square {0}")]
    LightSquare(Pos),

    #[error("black and white pieces share square {0}")]
    Overlap(Pos),

    #[error("king flag on empty square {0}")]
    KingWithoutPiece(Pos),
}

/// Game board.
///
/// Light squares are never occupied; `black` and `white` are disjoint and
/// `kings` is a subset of their union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    /// Promoted pieces of either color
    kings: Bitboard,
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            kings: Bitboard::new(),
        }
    }

    /// Starting position: Black men on rows 0-3, White men on rows 6-9
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let pos = Pos::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if row < START_ROWS {
                    board.place(pos, Piece::man(Color::Black));
                } else if row >= BOARD_SIZE as u8 - START_ROWS {
                    board.place(pos, Piece::man(Color::White));
                }
            }
        }
        board
    }

    /// Get piece at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        let color = if self.black.get(pos) {
            Color::Black
        } else if self.white.get(pos) {
            Color::White
        } else {
            return None;
        };
        let rank = if self.kings.get(pos) { Rank::King } else { Rank::Man };
        Some(Piece { color, rank })
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Put a piece on a dark square, replacing whatever was there
    #[inline]
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        debug_assert!(pos.is_dark(), "piece placed on light square {pos}");
        self.remove(pos);
        match piece.color {
            Color::Black => self.black.set(pos),
            Color::White => self.white.set(pos),
        }
        if piece.is_king() {
            self.kings.set(pos);
        }
    }

    /// Remove and return the piece at position
    #[inline]
    pub fn remove(&mut self, pos: Pos) -> Option<Piece> {
        let piece = self.get(pos);
        self.black.clear(pos);
        self.white.clear(pos);
        self.kings.clear(pos);
        piece
    }

    /// Promote the piece at position (no-op on empty squares and kings)
    #[inline]
    pub fn crown(&mut self, pos: Pos) {
        if !self.is_empty(pos) {
            self.kings.set(pos);
        }
    }

    /// Get bitboard for a color
    #[inline]
    pub fn pieces(&self, color: Color) -> &Bitboard {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    /// Number of pieces of a color
    #[inline]
    pub fn count(&self, color: Color) -> u32 {
        self.pieces(color).count()
    }

    /// Number of kings of a color
    #[inline]
    pub fn king_count(&self, color: Color) -> u32 {
        self.pieces(color).intersect(&self.kings).count()
    }

    /// Promoted pieces of either color
    #[inline]
    pub fn kings(&self) -> &Bitboard {
        &self.kings
    }

    /// Check the layout invariants. `place` keeps them in debug builds only.
    pub fn validate(&self) -> Result<(), BoardError> {
        if let Some(pos) = self.black.intersect(&self.white).iter_ones().next() {
            return Err(BoardError::Overlap(pos));
        }
        let occupied = self.black.union(&self.white);
        if let Some(pos) = occupied.iter_ones().find(|pos| !pos.is_dark()) {
            return Err(BoardError::LightSquare(pos));
        }
        if let Some(pos) = self.kings.iter_ones().find(|&pos| !occupied.get(pos)) {
            return Err(BoardError::KingWithoutPiece(pos));
        }
        Ok(())
    }

    /// Raw constructor for building layouts `place` refuses
    #[cfg(test)]
    pub(crate) fn from_bitboards(black: Bitboard, white: Bitboard, kings: Bitboard) -> Self {
        Self { black, white, kings }
    }

    /// Iterate over (position, piece) for every occupied square, row-major
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        (0..super::TOTAL_CELLS)
            .map(Pos::from_index)
            .filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// `b`/`w` for men, `B`/`W` for kings, `.` for empty dark squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE as u8 {
            write!(f, "{row:>2}")?;
            for col in 0..BOARD_SIZE as u8 {
                let pos = Pos::new(row, col);
                let c = match self.get(pos) {
                    Some(Piece { color: Color::Black, rank: Rank::Man }) => 'b',
                    Some(Piece { color: Color::Black, rank: Rank::King }) => 'B',
                    Some(Piece { color: Color::White, rank: Rank::Man }) => 'w',
                    Some(Piece { color: Color::White, rank: Rank::King }) => 'W',
                    None if pos.is_dark() => '.',
                    None => ' ',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
