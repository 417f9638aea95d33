//! Board representation for 10x10 draughts

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, BoardError};

use serde::{Deserialize, Serialize};

/// Board size (10x10)
pub const BOARD_SIZE: usize = 10;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 100

/// The four diagonal directions as (row delta, col delta)
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Piece colors. Black starts on rows 0-3 and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row direction a man of this color moves in
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Row on which a man of this color is promoted
    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::Black => (BOARD_SIZE - 1) as u8,
            Color::White => 0,
        }
    }

    /// Number of rows a man on `row` still has to travel before promotion
    #[inline]
    pub fn rows_to_promotion(self, row: u8) -> u8 {
        self.promotion_row().abs_diff(row)
    }
}

/// Piece rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    #[inline]
    pub const fn man(color: Color) -> Self {
        Self { color, rank: Rank::Man }
    }

    #[inline]
    pub const fn king(color: Color) -> Self {
        Self { color, rank: Rank::King }
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor for untrusted coordinates
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Playable (dark) square: row + col is odd
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Step by (dr, dc), None when leaving the board
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Pos> {
        Self::try_new(
            i32::from(self.row) + i32::from(dr),
            i32::from(self.col) + i32::from(dc),
        )
    }

    /// Column distance to the board's center line, doubled to stay integral
    #[inline]
    pub fn center_col_distance2(self) -> u8 {
        (2 * self.col).abs_diff(BOARD_SIZE as u8 - 1)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
