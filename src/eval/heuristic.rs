//! Heuristic evaluation function for draughts positions
//!
//! This module provides the static evaluation used at the leaves of the
//! minimax search. It scores:
//! - Material (men and kings)
//! - Progress of men toward promotion
//! - Center and edge placement
//! - Structure and mobility (expert weights only)

use crate::board::{Board, Color, Piece, Pos, DIAGONALS};
use crate::rules::mobility;

use super::weights::EvalWeights;

/// Evaluate the board. Positive values favor White, negative favor Black.
///
/// The score is independent of the side to move.
#[must_use]
pub fn evaluate(board: &Board, weights: &EvalWeights) -> i32 {
    let mut score = 0;

    for (pos, piece) in board.iter_pieces() {
        let value = piece_value(board, pos, piece, weights);
        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }

    // Whole-board differentials, added once
    let material = board.count(Color::White) as i32 - board.count(Color::Black) as i32;
    let kings = board.king_count(Color::White) as i32 - board.king_count(Color::Black) as i32;
    score += material * weights.material_diff + kings * weights.king_diff;

    if weights.uses_mobility() {
        score += (mobility(board, Color::White) - mobility(board, Color::Black)) * weights.mobility;
    }

    score
}

/// Value of a single piece from its owner's point of view
fn piece_value(board: &Board, pos: Pos, piece: Piece, w: &EvalWeights) -> i32 {
    let mut value = if piece.is_king() { w.king } else { w.man };

    if !piece.is_king() {
        let to_go = i32::from(piece.color.rows_to_promotion(pos.row));
        let advanced = 9 - to_go;
        value += advanced * w.advance;
        if to_go <= 2 {
            value += w.near_promotion;
        }
        if to_go == 1 {
            value += w.one_from_promotion;
        }
        if !has_friendly_neighbor(board, pos, piece.color) {
            value -= w.isolation;
        }
    }

    value += (5 - center_distance(pos)) * w.center;

    if pos.col == 0 || pos.col == 9 {
        value += w.edge;
    }

    // Back row is the promotion row of the opponent
    if pos.row == piece.color.opponent().promotion_row() {
        value += w.back_row;
    }

    value
}

/// Manhattan distance from the board center (4.5, 4.5).
///
/// Integral on dark squares since row + col is odd there.
#[inline]
fn center_distance(pos: Pos) -> i32 {
    let doubled = i32::from(pos.center_col_distance2()) + (2 * i32::from(pos.row) - 9).abs();
    doubled / 2
}

fn has_friendly_neighbor(board: &Board, pos: Pos, color: Color) -> bool {
    DIAGONALS.iter().any(|&(dr, dc)| {
        pos.offset(dr, dc)
            .and_then(|n| board.get(n))
            .is_some_and(|p| p.color == color)
    })
}
