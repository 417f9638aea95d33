//! Applying and reverting single moves
//!
//! Both the turn state machine and the search use [`make_move`]. The search
//! reverts with [`unmake_move`], which restores the exact prior board: the
//! pre-promotion rank of the mover and the captured piece.

use crate::board::{Board, Piece, Pos, Rank};

use super::moves::Move;

/// Everything needed to revert one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    /// The mover as it stood on `mv.from`
    pub moved: Piece,
    /// The piece removed from `mv.captured`
    pub captured: Option<Piece>,
    /// Whether this move promoted the mover
    pub promoted: bool,
}

/// Apply a move: relocate the mover, remove the captured piece, promote a man
/// landing on its promotion row.
///
/// # Panics
/// If there is no piece on `mv.from`, the destination is occupied, or the
/// captured square is empty. These indicate a move that was not produced by
/// the move generator for this board.
pub fn make_move(board: &mut Board, mv: Move) -> Undo {
    let Some(moved) = board.remove(mv.from) else {
        panic!("make_move: no piece on {}", mv.from);
    };
    assert!(board.is_empty(mv.to), "make_move: destination {} occupied", mv.to);

    let captured = mv.captured.map(|cap| {
        let Some(piece) = board.remove(cap) else {
            panic!("make_move: nothing to capture on {cap}");
        };
        piece
    });

    board.place(mv.to, moved);
    let promoted = promote_if_needed(board, mv.to, moved);

    Undo {
        mv,
        moved,
        captured,
        promoted,
    }
}

/// Revert a move made by [`make_move`].
///
/// # Panics
/// If the board does not hold the mover on `mv.to` (the move was not the
/// last one applied).
pub fn unmake_move(board: &mut Board, undo: &Undo) {
    let Some(landed) = board.remove(undo.mv.to) else {
        panic!("unmake_move: no piece on {}", undo.mv.to);
    };
    assert_eq!(
        landed.color, undo.moved.color,
        "unmake_move: wrong piece on {}",
        undo.mv.to
    );
    assert!(
        board.is_empty(undo.mv.from),
        "unmake_move: source {} not empty",
        undo.mv.from
    );

    board.place(undo.mv.from, undo.moved);
    if let (Some(cap), Some(piece)) = (undo.mv.captured, undo.captured) {
        board.place(cap, piece);
    }
}

/// Crown a man standing on its promotion row. Returns true if promoted.
pub fn promote_if_needed(board: &mut Board, pos: Pos, piece: Piece) -> bool {
    if piece.rank == Rank::Man && pos.row == piece.color.promotion_row() {
        board.crown(pos);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::rules::moves::{all_moves, moves_for};

    #[test]
    fn test_simple_move_relocates_piece() {
        let mut board = Board::new();
        let mv = Move::simple(Pos::new(3, 2), Pos::new(4, 3));
        let undo = make_move(&mut board, mv);
        assert!(board.is_empty(Pos::new(3, 2)));
        assert_eq!(board.get(Pos::new(4, 3)), Some(Piece::man(Color::Black)));
        assert!(!undo.promoted);
        assert_eq!(undo.captured, None);
    }

    #[test]
    fn test_capture_removes_piece() {
        let mut board = Board::empty();
        board.place(Pos::new(3, 4), Piece::man(Color::Black));
        board.place(Pos::new(4, 5), Piece::man(Color::White));
        let mv = moves_for(&board, Pos::new(3, 4)).capture[0];
        let undo = make_move(&mut board, mv);
        assert_eq!(board.count(Color::White), 0);
        assert_eq!(undo.captured, Some(Piece::man(Color::White)));
        assert_eq!(board.get(Pos::new(5, 6)), Some(Piece::man(Color::Black)));
    }

    #[test]
    fn test_promotion_on_last_row() {
        let mut board = Board::empty();
        board.place(Pos::new(8, 1), Piece::man(Color::Black));
        let undo = make_move(&mut board, Move::simple(Pos::new(8, 1), Pos::new(9, 2)));
        assert!(undo.promoted);
        assert_eq!(board.get(Pos::new(9, 2)), Some(Piece::king(Color::Black)));

        let mut board = Board::empty();
        board.place(Pos::new(1, 2), Piece::man(Color::White));
        make_move(&mut board, Move::simple(Pos::new(1, 2), Pos::new(0, 1)));
        assert_eq!(board.get(Pos::new(0, 1)), Some(Piece::king(Color::White)));
    }

    #[test]
    fn test_king_never_unpromotes() {
        let mut board = Board::empty();
        board.place(Pos::new(9, 2), Piece::king(Color::Black));
        let undo = make_move(&mut board, Move::simple(Pos::new(9, 2), Pos::new(5, 6)));
        assert!(!undo.promoted);
        assert_eq!(board.get(Pos::new(5, 6)), Some(Piece::king(Color::Black)));
    }

    #[test]
    fn test_unmake_restores_promotion_and_capture() {
        let mut board = Board::empty();
        board.place(Pos::new(7, 2), Piece::man(Color::Black));
        board.place(Pos::new(8, 3), Piece::king(Color::White));
        let before = board;

        let mv = Move::capture(Pos::new(7, 2), Pos::new(9, 4), Pos::new(8, 3));
        let undo = make_move(&mut board, mv);
        assert!(undo.promoted);
        assert_eq!(board.get(Pos::new(9, 4)), Some(Piece::king(Color::Black)));

        unmake_move(&mut board, &undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_make_unmake_every_move_restores_board() {
        let mut board = Board::new();
        // Open the position up a bit
        make_move(&mut board, Move::simple(Pos::new(3, 4), Pos::new(4, 5)));
        make_move(&mut board, Move::simple(Pos::new(6, 7), Pos::new(5, 6)));
        let before = board;

        for color in [Color::Black, Color::White] {
            for mv in all_moves(&board, color, false) {
                let undo = make_move(&mut board, mv);
                unmake_move(&mut board, &undo);
                assert_eq!(board, before, "board changed after {mv}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "no piece")]
    fn test_make_move_from_empty_square_panics() {
        let mut board = Board::empty();
        make_move(&mut board, Move::simple(Pos::new(3, 2), Pos::new(4, 3)));
    }

    #[test]
    #[should_panic(expected = "unmake_move")]
    fn test_unmake_mismatch_panics() {
        let mut board = Board::new();
        let undo = make_move(&mut board, Move::simple(Pos::new(3, 2), Pos::new(4, 3)));
        board.remove(Pos::new(4, 3));
        unmake_move(&mut board, &undo);
    }
}
