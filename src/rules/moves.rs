//! Move generation for men and flying kings
//!
//! Men step one square diagonally forward and capture by jumping an adjacent
//! enemy piece in any of the four diagonal directions. Kings slide along open
//! diagonals and capture the first enemy piece on a ray, landing on any empty
//! square beyond it up to the next obstruction.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Piece, Pos, DIAGONALS};

/// A single-step transition of one piece.
///
/// A capture removes exactly one piece, the one on `captured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub captured: Option<Pos>,
}

impl Move {
    #[inline]
    pub fn simple(from: Pos, to: Pos) -> Self {
        Self { from, to, captured: None }
    }

    #[inline]
    pub fn capture(from: Pos, to: Pos, captured: Pos) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.captured {
            Some(cap) => write!(f, "{} x{} -> {}", self.from, cap, self.to),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}

/// Moves available to one piece, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceMoves {
    pub simple: Vec<Move>,
    pub capture: Vec<Move>,
}

impl PieceMoves {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.capture.is_empty()
    }

    /// Captures first, then simple moves
    pub fn into_all(self) -> Vec<Move> {
        let mut all = self.capture;
        all.extend(self.simple);
        all
    }
}

/// Generate the simple and capture moves of the piece on `from`.
///
/// Returns empty lists for an empty square. No rule options are applied
/// here; filtering for mandatory capture happens in [`all_moves`].
pub fn moves_for(board: &Board, from: Pos) -> PieceMoves {
    let mut moves = PieceMoves::default();
    let Some(piece) = board.get(from) else {
        return moves;
    };

    if piece.is_king() {
        king_moves(board, from, piece, &mut moves);
    } else {
        man_moves(board, from, piece, &mut moves);
    }
    moves
}

fn man_moves(board: &Board, from: Pos, piece: Piece, out: &mut PieceMoves) {
    let forward = piece.color.forward();

    for (dr, dc) in DIAGONALS {
        if dr == forward {
            if let Some(to) = from.offset(dr, dc) {
                if board.is_empty(to) {
                    out.simple.push(Move::simple(from, to));
                }
            }
        }

        // Captures are allowed backwards as well
        let (Some(over), Some(land)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) else {
            continue;
        };
        let is_enemy = board.get(over).is_some_and(|p| p.color != piece.color);
        if is_enemy && board.is_empty(land) {
            out.capture.push(Move::capture(from, land, over));
        }
    }
}

fn king_moves(board: &Board, from: Pos, piece: Piece, out: &mut PieceMoves) {
    for (dr, dc) in DIAGONALS {
        let mut enemy: Option<Pos> = None;
        let mut cur = from.offset(dr, dc);

        while let Some(pos) = cur {
            match board.get(pos) {
                Some(other) => {
                    // Own piece, or a second piece behind the enemy, ends the ray
                    if other.color == piece.color || enemy.is_some() {
                        break;
                    }
                    enemy = Some(pos);
                }
                None => match enemy {
                    Some(cap) => out.capture.push(Move::capture(from, pos, cap)),
                    None => out.simple.push(Move::simple(from, pos)),
                },
            }
            cur = pos.offset(dr, dc);
        }
    }
}

/// All legal moves for a side, in board-scan order with each piece's
/// captures listed before its simple moves.
///
/// With `mandatory_capture` set and at least one capture available, only the
/// captures are returned.
pub fn all_moves(board: &Board, color: Color, mandatory_capture: bool) -> Vec<Move> {
    let mut all = Vec::with_capacity(32);
    let mut has_capture = false;

    for from in board.pieces(color).iter_ones() {
        let moves = moves_for(board, from);
        has_capture |= !moves.capture.is_empty();
        all.extend(moves.into_all());
    }

    if mandatory_capture && has_capture {
        all.retain(Move::is_capture);
    }
    all
}

/// Every capture available to a side, in board-scan order.
pub fn mandatory_captures(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces(color)
        .iter_ones()
        .flat_map(|from| moves_for(board, from).capture)
        .collect()
}

/// Distinct source squares of `captures`, keeping first-seen order
pub fn capture_sources(captures: &[Move]) -> Vec<Pos> {
    let mut sources: Vec<Pos> = Vec::new();
    for mv in captures {
        if !sources.contains(&mv.from) {
            sources.push(mv.from);
        }
    }
    sources
}

/// Whether any piece of `color` has at least one move or capture
pub fn has_any_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .iter_ones()
        .any(|from| !moves_for(board, from).is_empty())
}

/// Mobility count: destinations plus captures weighted double
pub fn mobility(board: &Board, color: Color) -> i32 {
    board
        .pieces(color)
        .iter_ones()
        .map(|from| {
            let moves = moves_for(board, from);
            (moves.simple.len() + 2 * moves.capture.len()) as i32
        })
        .sum()
}
