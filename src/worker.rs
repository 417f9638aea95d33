//! Off-thread move search
//!
//! A search request carries a copy of the position and the rules; the
//! worker thread owns it outright and sends back a single move (or none)
//! over a channel. Nothing mutable is shared between the two sides.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Board, Color};
use crate::config::{Difficulty, RuleConfig};
use crate::engine::{AIEngine, MoveResult};
use crate::rules::Move;

/// Immutable snapshot handed to the search thread.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub board: Board,
    pub side: Color,
    pub rules: RuleConfig,
    pub difficulty: Difficulty,
    /// Restrict the root to these moves (capture chain continuation)
    pub candidates: Option<Vec<Move>>,
    /// Fixed seed for the easy tier's random choice
    pub seed: Option<u64>,
}

impl SearchRequest {
    pub fn new(board: Board, side: Color, rules: RuleConfig, difficulty: Difficulty) -> Self {
        Self {
            board,
            side,
            rules,
            difficulty,
            candidates: None,
            seed: None,
        }
    }
}

/// Reply from the search thread.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// The chosen move, None when the side has no legal move
    pub mv: Option<Move>,
    pub result: MoveResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("search thread exited without a reply")]
    Disconnected,
}

/// Run a request on the calling thread
pub fn run_search(request: SearchRequest) -> SearchResponse {
    let mut engine = match request.seed {
        Some(seed) => AIEngine::with_seed(request.difficulty, request.rules, seed),
        None => AIEngine::new(request.difficulty, request.rules),
    };
    let result = match request.candidates {
        Some(moves) => engine.choose_from(&request.board, request.side, moves),
        None => engine.choose_move_with_stats(&request.board, request.side),
    };
    debug!(
        side = ?request.side,
        search_type = ?result.search_type,
        nodes = result.nodes,
        time_ms = result.time_ms,
        "search finished"
    );
    SearchResponse {
        mv: result.best_move,
        result,
    }
}

/// Start a search on a dedicated thread
pub fn spawn_search(request: SearchRequest) -> PendingSearch {
    let (tx, rx) = channel();

    thread::spawn(move || {
        let response = run_search(request);
        // Receiver gone means the game was dropped or restarted
        let _ = tx.send(response);
    });

    PendingSearch { receiver: rx }
}

/// Handle to a search running on another thread.
pub struct PendingSearch {
    receiver: Receiver<SearchResponse>,
}

impl PendingSearch {
    /// Non-blocking check for the reply
    pub fn try_recv(&self) -> Result<Option<SearchResponse>, WorkerError> {
        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                warn!("search thread disconnected");
                Err(WorkerError::Disconnected)
            }
        }
    }

    /// Block until the reply arrives
    pub fn wait(self) -> Result<SearchResponse, WorkerError> {
        self.receiver.recv().map_err(|_| {
            warn!("search thread disconnected");
            WorkerError::Disconnected
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::board::{Piece, Pos};
    use crate::engine::SearchType;
    use crate::rules::all_moves;

    #[test]
    fn test_spawned_search_returns_legal_move() {
        let board = Board::new();
        let request = SearchRequest::new(board, Color::White, RuleConfig::default(), Difficulty::Medium);
        let response = spawn_search(request).wait().expect("worker reply");
        let legal = all_moves(&board, Color::White, true);
        assert!(response.mv.is_some_and(|m| legal.contains(&m)));
        assert_eq!(response.mv, response.result.best_move);
    }

    #[test]
    fn test_no_move_reply_is_none() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 1), Piece::man(Color::Black));
        let request = SearchRequest::new(board, Color::White, RuleConfig::default(), Difficulty::Hard);
        let response = spawn_search(request).wait().expect("worker reply");
        assert_eq!(response.mv, None);
        assert_eq!(response.result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_try_recv_eventually_replies() {
        let mut request =
            SearchRequest::new(Board::new(), Color::Black, RuleConfig::default(), Difficulty::Easy);
        request.seed = Some(5);
        let pending = spawn_search(request);
        let response = loop {
            if let Some(response) = pending.try_recv().expect("worker alive") {
                break response;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert!(response.mv.is_some());
    }

    #[test]
    fn test_candidates_restrict_choice() {
        let board = Board::new();
        let only = Move::simple(Pos::new(6, 9), Pos::new(5, 8));
        let mut request = SearchRequest::new(board, Color::White, RuleConfig::default(), Difficulty::Hard);
        request.candidates = Some(vec![only]);
        assert_eq!(run_search(request).mv, Some(only));
    }

    #[test]
    fn test_seeded_requests_agree() {
        let mut request =
            SearchRequest::new(Board::new(), Color::White, RuleConfig::default(), Difficulty::Easy);
        request.seed = Some(11);
        assert_eq!(run_search(request.clone()).mv, run_search(request).mv);
    }

    #[test]
    fn test_dropped_sender_reports_disconnect() {
        let (tx, rx) = channel::<SearchResponse>();
        drop(tx);
        let pending = PendingSearch { receiver: rx };
        assert_eq!(pending.try_recv(), Err(WorkerError::Disconnected));
        assert_eq!(pending.wait(), Err(WorkerError::Disconnected));
    }
}
