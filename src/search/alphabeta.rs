//! Depth-limited minimax with alpha-beta pruning
//!
//! White is the maximizing side and Black the minimizing side, matching the
//! sign convention of [`crate::eval::evaluate`]. The searcher explores a
//! private copy of the board with incremental make/unmake, so the caller's
//! board is never touched.
//!
//! # Example
//!
//! ```
//! use draughts::board::{Board, Color};
//! use draughts::eval::EvalWeights;
//! use draughts::search::{SearchParams, Searcher};
//!
//! let params = SearchParams {
//!     depth: 3,
//!     order_moves: true,
//!     weights: EvalWeights::BASIC,
//!     mandatory_capture: true,
//! };
//! let mut searcher = Searcher::new(params);
//! let result = searcher.search(&Board::new(), Color::White);
//! assert!(result.best_move.is_some());
//! ```

use tracing::debug;

use crate::board::{Board, Color};
use crate::eval::{evaluate, EvalWeights, WIN_SCORE};
use crate::rules::{all_moves, make_move, unmake_move, Move};

use super::ordering::order_moves;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE * 10;

/// Parameters for one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Plies to search (at least 1)
    pub depth: u8,
    /// Sort moves at every node
    pub order_moves: bool,
    /// Evaluator weights for leaf nodes
    pub weights: EvalWeights,
    /// Restrict each side to captures when one is available
    pub mandatory_capture: bool,
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total alpha-beta cutoffs
    pub cutoffs: u64,
    /// Cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, None when the side has no legal move
    pub best_move: Option<Move>,
    /// Minimax score of the best move (positive favors White)
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Alpha-beta searcher. Holds no position state between calls.
pub struct Searcher {
    params: SearchParams,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Search every legal move of `color`.
    #[must_use]
    pub fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        let moves = all_moves(board, color, self.params.mandatory_capture);
        self.search_moves(board, color, moves)
    }

    /// Search only the given root moves of `color`.
    ///
    /// Used when the legal set is narrower than [`all_moves`], such as the
    /// continuation captures of a capture chain.
    #[must_use]
    pub fn search_moves(&mut self, board: &Board, color: Color, mut moves: Vec<Move>) -> SearchResult {
        self.nodes = 0;
        self.stats = SearchStats::default();

        let depth = self.params.depth.max(1);
        let maximizing = color == Color::White;
        let mut best_move = None;
        let mut best_score = if maximizing { -INF } else { INF };

        if self.params.order_moves {
            order_moves(&mut moves, color);
        }

        let mut work_board = *board;
        let mut alpha = -INF;
        let mut beta = INF;

        for mv in moves {
            let undo = make_move(&mut work_board, mv);
            let score = self.minimax(&mut work_board, color.opponent(), depth - 1, alpha, beta);
            unmake_move(&mut work_board, &undo);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
        }

        debug_assert_eq!(&work_board, board, "search left the board modified");

        if best_move.is_none() {
            best_score = if maximizing { -WIN_SCORE } else { WIN_SCORE };
        }

        debug!(
            ?color,
            depth,
            nodes = self.nodes,
            score = best_score,
            cutoffs = self.stats.cutoffs,
            first_move_rate = self.stats.first_move_rate(),
            "search complete"
        );

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Recursive minimax with alpha-beta pruning. `side` is to move.
    fn minimax(&mut self, board: &mut Board, side: Color, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board, &self.params.weights);
        }

        let mut moves = all_moves(board, side, self.params.mandatory_capture);
        let maximizing = side == Color::White;

        if moves.is_empty() {
            return if maximizing { -WIN_SCORE } else { WIN_SCORE };
        }

        if self.params.order_moves {
            order_moves(&mut moves, side);
        }

        let mut best = if maximizing { -INF } else { INF };

        for (i, mv) in moves.into_iter().enumerate() {
            let undo = make_move(board, mv);
            let score = self.minimax(board, side.opponent(), depth - 1, alpha, beta);
            unmake_move(board, &undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Pos};

    fn params(depth: u8, order_moves: bool, weights: EvalWeights) -> SearchParams {
        SearchParams {
            depth,
            order_moves,
            weights,
            mandatory_capture: true,
        }
    }

    /// Plain minimax without pruning, used as the reference score
    fn reference_minimax(board: &mut Board, side: Color, depth: u8, p: &SearchParams) -> i32 {
        if depth == 0 {
            return evaluate(board, &p.weights);
        }
        let moves = all_moves(board, side, p.mandatory_capture);
        let maximizing = side == Color::White;
        if moves.is_empty() {
            return if maximizing { -WIN_SCORE } else { WIN_SCORE };
        }
        let scores = moves.into_iter().map(|mv| {
            let undo = make_move(board, mv);
            let s = reference_minimax(board, side.opponent(), depth - 1, p);
            unmake_move(board, &undo);
            s
        });
        let scores: Vec<i32> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn midgame_board() -> Board {
        let mut board = Board::new();
        for (from, to) in [
            ((3, 4), (4, 5)),
            ((6, 7), (5, 6)),
            ((3, 2), (4, 3)),
            ((6, 1), (5, 2)),
        ] {
            let mv = Move::simple(Pos::new(from.0, from.1), Pos::new(to.0, to.1));
            make_move(&mut board, mv);
        }
        board
    }

    fn sparse_board() -> Board {
        let mut board = Board::empty();
        board.place(Pos::new(2, 3), Piece::king(Color::White));
        board.place(Pos::new(6, 1), Piece::man(Color::White));
        board.place(Pos::new(7, 4), Piece::man(Color::White));
        board.place(Pos::new(3, 6), Piece::man(Color::Black));
        board.place(Pos::new(4, 1), Piece::man(Color::Black));
        board.place(Pos::new(5, 8), Piece::king(Color::Black));
        board
    }

    #[test]
    fn test_search_initial_position_finds_move() {
        let mut searcher = Searcher::new(params(3, true, EvalWeights::BASIC));
        let result = searcher.search(&Board::new(), Color::Black);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_does_not_modify_board() {
        let board = midgame_board();
        let copy = board;
        let mut searcher = Searcher::new(params(4, true, EvalWeights::EXPERT));
        let _ = searcher.search(&board, Color::White);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        for board in [Board::new(), midgame_board(), sparse_board()] {
            for color in [Color::White, Color::Black] {
                for depth in 1..=4 {
                    for (order, weights) in [
                        (false, EvalWeights::BASIC),
                        (true, EvalWeights::BASIC),
                        (true, EvalWeights::EXPERT),
                    ] {
                        let p = params(depth, order, weights);
                        let mut searcher = Searcher::new(p);
                        let result = searcher.search(&board, color);

                        let mut work = board;
                        let moves = all_moves(&work, color, true);
                        let expected: Vec<i32> = moves
                            .iter()
                            .map(|&mv| {
                                let undo = make_move(&mut work, mv);
                                let s = reference_minimax(&mut work, color.opponent(), depth - 1, &p);
                                unmake_move(&mut work, &undo);
                                s
                            })
                            .collect();
                        let expected = if color == Color::White {
                            expected.into_iter().max()
                        } else {
                            expected.into_iter().min()
                        };

                        assert_eq!(
                            Some(result.score),
                            expected,
                            "depth {depth} color {color:?} order {order}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_moves_returns_none() {
        // White man boxed in on (1,0) by a black man on (0,1)
        let mut board = Board::empty();
        board.place(Pos::new(1, 0), Piece::man(Color::White));
        board.place(Pos::new(0, 1), Piece::man(Color::Black));

        let mut searcher = Searcher::new(params(3, true, EvalWeights::BASIC));
        let result = searcher.search(&board, Color::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -WIN_SCORE);
    }

    #[test]
    fn test_prefers_capture_that_ends_game() {
        let mut board = Board::empty();
        board.place(Pos::new(6, 3), Piece::man(Color::White));
        board.place(Pos::new(5, 4), Piece::king(Color::Black));

        let p = SearchParams {
            mandatory_capture: false,
            ..params(2, true, EvalWeights::BASIC)
        };
        let mut searcher = Searcher::new(p);
        let result = searcher.search(&board, Color::White);
        assert_eq!(
            result.best_move,
            Some(Move::capture(Pos::new(6, 3), Pos::new(4, 5), Pos::new(5, 4)))
        );
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_blocking_win_is_found() {
        // Black man on (8,3) is stuck once both (9,2) and (9,4) are occupied
        let mut board = Board::empty();
        board.place(Pos::new(8, 3), Piece::man(Color::Black));
        board.place(Pos::new(9, 2), Piece::man(Color::White));
        board.place(Pos::new(7, 6), Piece::king(Color::White));

        let p = SearchParams {
            mandatory_capture: false,
            ..params(2, true, EvalWeights::BASIC)
        };
        let mut searcher = Searcher::new(p);
        let result = searcher.search(&board, Color::White);
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_search_moves_restricts_root() {
        let board = midgame_board();
        let only = all_moves(&board, Color::White, true)[0];
        let mut searcher = Searcher::new(params(3, true, EvalWeights::BASIC));
        let result = searcher.search_moves(&board, Color::White, vec![only]);
        assert_eq!(result.best_move, Some(only));
    }

    #[test]
    fn test_ordering_keeps_score() {
        let board = midgame_board();
        let mut plain = Searcher::new(params(4, false, EvalWeights::BASIC));
        let mut ordered = Searcher::new(params(4, true, EvalWeights::BASIC));
        let a = plain.search(&board, Color::White);
        let b = ordered.search(&board, Color::White);
        assert_eq!(a.score, b.score);
        assert!(b.stats.cutoffs > 0);
        assert!(b.stats.first_move_rate() <= 100.0);
    }

    #[test]
    fn test_first_move_rate() {
        assert_eq!(SearchStats::default().first_move_rate(), 0.0);
        let stats = SearchStats {
            cutoffs: 8,
            first_move_cutoffs: 6,
        };
        assert_eq!(stats.first_move_rate(), 75.0);
    }
}
