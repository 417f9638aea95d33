//! Move ordering for better alpha-beta pruning
//!
//! Ordering never changes which score the search returns, only how many
//! nodes it has to visit to prove it.

use crate::board::Color;
use crate::rules::Move;

/// Sort key: captures first, then closest to promotion, then closest to the
/// center columns.
#[inline]
fn move_priority(mv: &Move, color: Color) -> (u8, u8, u8) {
    (
        u8::from(!mv.is_capture()),
        color.rows_to_promotion(mv.to.row),
        mv.to.center_col_distance2(),
    )
}

/// Reorder `moves` for `color` in place. Stable, so ties keep scan order.
pub fn order_moves(moves: &mut [Move], color: Color) {
    moves.sort_by_key(|mv| move_priority(mv, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_captures_sorted_first() {
        let mut moves = vec![
            Move::simple(Pos::new(3, 2), Pos::new(4, 3)),
            Move::capture(Pos::new(1, 0), Pos::new(3, 2), Pos::new(2, 1)),
        ];
        order_moves(&mut moves, Color::Black);
        assert!(moves[0].is_capture());
    }

    #[test]
    fn test_promotion_progress_depends_on_color() {
        let low = Move::simple(Pos::new(3, 2), Pos::new(2, 3));
        let high = Move::simple(Pos::new(6, 5), Pos::new(7, 4));

        let mut black = vec![low, high];
        order_moves(&mut black, Color::Black);
        assert_eq!(black[0], high);

        let mut white = vec![high, low];
        order_moves(&mut white, Color::White);
        assert_eq!(white[0], low);
    }

    #[test]
    fn test_center_breaks_ties() {
        let edge = Move::simple(Pos::new(3, 0), Pos::new(4, 1));
        let center = Move::simple(Pos::new(3, 4), Pos::new(4, 5));
        let mut moves = vec![edge, center];
        order_moves(&mut moves, Color::Black);
        assert_eq!(moves, vec![center, edge]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let a = Move::simple(Pos::new(3, 4), Pos::new(4, 5));
        let b = Move::simple(Pos::new(3, 6), Pos::new(4, 5));
        let mut moves = vec![a, b];
        order_moves(&mut moves, Color::Black);
        assert_eq!(moves, vec![a, b]);
    }
}
