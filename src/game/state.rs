//! Game state and turn transitions

use std::time::Instant;

use serde::Serialize;
use tracing::{info, trace, warn};

use crate::board::{Board, Color, Pos};
use crate::config::{ConfigError, GameConfig, GameMode};
use crate::rules::{capture_sources, has_any_move, make_move, mandatory_captures, moves_for, Move};
use crate::worker::{spawn_search, PendingSearch, SearchRequest, SearchResponse, WorkerError};

use super::error::Rejection;
use super::events::{BlowReason, GameEvent, GameOverReason};
use super::snapshot::GameSnapshot;
use super::timer::SouffleeTimer;

/// Where the side to move is within its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    AwaitingSelection,
    /// A piece is selected and its destinations are known
    AwaitingDestination,
    /// The selected piece just captured and must capture again
    CaptureChain,
    GameOver { winner: Color, reason: GameOverReason },
}

/// Pieces of each color that have left the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapturedCounts {
    pub black: u32,
    pub white: u32,
}

impl CapturedCounts {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn record(&mut self, color: Color) {
        match color {
            Color::Black => self.black += 1,
            Color::White => self.white += 1,
        }
    }
}

/// One game from setup to game over.
pub struct GameState {
    config: GameConfig,
    board: Board,
    current: Color,
    phase: Phase,
    selected: Option<Pos>,
    /// Moves of the selected piece
    destinations: Vec<Move>,
    /// Every capture the side to move had when its turn started
    turn_captures: Vec<Move>,
    captured: CapturedCounts,
    timer: SouffleeTimer,
    pending: Option<PendingSearch>,
    events: Vec<GameEvent>,
    seed: Option<u64>,
    plies: u32,
}

impl GameState {
    /// Standard opening position, Black to move
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::from_position(Board::new(), Color::Black, config)
    }

    /// Start from an arbitrary position. The game may already be over.
    ///
    /// The board must satisfy [`Board::validate`].
    pub fn from_position(board: Board, current: Color, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        board.validate()?;
        Ok(Self::setup(board, current, config))
    }

    fn setup(board: Board, current: Color, config: GameConfig) -> Self {
        let mut state = Self {
            config,
            board,
            current,
            phase: Phase::AwaitingSelection,
            selected: None,
            destinations: Vec::new(),
            turn_captures: Vec::new(),
            captured: CapturedCounts::default(),
            timer: SouffleeTimer::new(),
            pending: None,
            events: Vec::new(),
            seed: None,
            plies: 0,
        };
        state.start_turn();
        state
    }

    /// Fresh game with the same configuration
    pub fn restart(&self) -> Self {
        let mut fresh = Self::setup(Board::new(), Color::Black, self.config);
        fresh.seed = self.seed;
        fresh
    }

    /// Make the computer's random choices reproducible
    pub fn set_computer_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn is_computer(&self, color: Color) -> bool {
        self.config.mode == GameMode::HumanVsComputer && color == Color::White
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.is_computer(self.current)
    }

    pub fn is_computer_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn soufflee_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Select the piece on (row, col) for the side to move.
    pub fn select_square(&mut self, row: i32, col: i32) -> Result<GameSnapshot, Rejection> {
        self.check_human_input()?;

        let pos = Pos::try_new(row, col).ok_or(Rejection::NotYourPiece)?;

        if self.phase == Phase::CaptureChain {
            return if self.selected == Some(pos) {
                Ok(self.snapshot())
            } else {
                Err(Rejection::CaptureChainInProgress)
            };
        }

        match self.board.get(pos) {
            Some(piece) if piece.color == self.current => {}
            _ => return Err(Rejection::NotYourPiece),
        }

        let must_capture = !self.turn_captures.is_empty();
        if self.config.rules.restricts_to_captures()
            && must_capture
            && !self.turn_captures.iter().any(|mv| mv.from == pos)
        {
            return Err(Rejection::MustCapture);
        }

        let moves = moves_for(&self.board, pos);
        // Captures and simple moves together unless captures are enforced
        self.destinations = if self.config.rules.mandatory_capture && !self.config.rules.soufflee && must_capture {
            moves.capture
        } else {
            moves.into_all()
        };
        self.selected = Some(pos);
        self.phase = Phase::AwaitingDestination;
        self.events.clear();
        trace!(%pos, destinations = self.destinations.len(), "selected");

        Ok(self.snapshot())
    }

    /// Move the selected piece to (row, col).
    pub fn choose_destination(&mut self, row: i32, col: i32) -> Result<GameSnapshot, Rejection> {
        self.check_human_input()?;

        if !matches!(self.phase, Phase::AwaitingDestination | Phase::CaptureChain) {
            return Err(Rejection::IllegalDestination);
        }
        let to = Pos::try_new(row, col).ok_or(Rejection::IllegalDestination)?;
        let mv = self
            .destinations
            .iter()
            .copied()
            .find(|mv| mv.to == to)
            .ok_or(Rejection::IllegalDestination)?;

        self.events.clear();
        self.timer.cancel();
        self.play(mv);
        Ok(self.snapshot())
    }

    /// Start the computer's search for the side to move.
    ///
    /// Mid-chain, only the chained piece's continuation captures are
    /// searched.
    pub fn request_computer_move(&mut self) -> Result<GameSnapshot, Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.pending.is_some() {
            return Err(Rejection::ComputerThinking);
        }
        if !self.is_computer(self.current) {
            return Err(Rejection::NotYourTurn);
        }

        let mut request = SearchRequest::new(
            self.board,
            self.current,
            self.config.rules,
            self.config.difficulty,
        );
        if self.phase == Phase::CaptureChain {
            request.candidates = Some(self.destinations.clone());
        }
        request.seed = self.seed.map(|s| s.wrapping_add(u64::from(self.plies)));

        self.events.clear();
        self.pending = Some(spawn_search(request));
        trace!(color = ?self.current, "computer thinking");
        Ok(self.snapshot())
    }

    /// Apply the computer's move if the search has finished.
    ///
    /// Returns Ok(true) once the move was applied.
    pub fn poll_computer_move(&mut self) -> Result<bool, WorkerError> {
        let Some(pending) = &self.pending else {
            return Ok(false);
        };
        match pending.try_recv() {
            Ok(Some(response)) => {
                self.pending = None;
                self.apply_response(response);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                self.pending = None;
                Err(e)
            }
        }
    }

    /// Block until the pending computer move is applied
    pub fn wait_computer_move(&mut self) -> Result<GameSnapshot, WorkerError> {
        if let Some(pending) = self.pending.take() {
            let response = pending.wait()?;
            self.apply_response(response);
        }
        Ok(self.snapshot())
    }

    /// Check the soufflée deadline against the current time
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Blow the chained piece if its deadline passed at `now`.
    ///
    /// Returns true if the timeout fired.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.phase != Phase::CaptureChain || !self.timer.expired(now) {
            return false;
        }
        self.timer.cancel();
        self.events.clear();

        if let Some(pos) = self.selected {
            self.blow(pos, BlowReason::Timeout);
        }
        self.end_turn();
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let cells = (0..crate::board::TOTAL_CELLS)
            .map(|idx| self.board.get(Pos::from_index(idx)))
            .collect();

        let chain_active = self.phase == Phase::CaptureChain;
        let must_capture = match (self.phase, self.selected) {
            (Phase::GameOver { .. }, _) => Vec::new(),
            (Phase::CaptureChain, Some(pos)) => vec![pos],
            _ => capture_sources(&self.turn_captures),
        };
        let highlight_must_capture = self.config.rules.restricts_to_captures()
            && self.selected.is_none()
            && !must_capture.is_empty();

        GameSnapshot {
            cells,
            current: self.current,
            phase: self.phase,
            selected: self.selected,
            destinations: self.destinations.iter().map(|mv| mv.to).collect(),
            must_capture,
            highlight_must_capture,
            chain_active,
            computer_thinking: self.pending.is_some(),
            captured: self.captured,
            events: self.events.clone(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn check_human_input(&self) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.pending.is_some() {
            return Err(Rejection::ComputerThinking);
        }
        if self.is_computer(self.current) {
            return Err(Rejection::NotYourTurn);
        }
        Ok(())
    }

    fn apply_response(&mut self, response: SearchResponse) {
        self.events.clear();
        if self.is_over() {
            return;
        }
        match response.mv {
            Some(mv) => {
                info!(color = ?self.current, %mv, time_ms = response.result.time_ms, "computer move");
                self.events.push(GameEvent::ComputerMoved { mv });
                self.play(mv);
            }
            None => {
                // Unreachable while start_turn detects blocked sides
                warn!(color = ?self.current, "computer found no move");
                self.finish(self.current.opponent(), GameOverReason::Blocked);
            }
        }
    }

    /// Apply a legal move for the side to move and resolve its consequences
    fn play(&mut self, mv: Move) {
        let color = self.current;
        let undo = make_move(&mut self.board, mv);
        self.plies += 1;
        trace!(?color, %mv, "move");

        self.events.push(GameEvent::Moved {
            mv,
            piece: undo.moved,
        });
        if let (Some(pos), Some(piece)) = (mv.captured, undo.captured) {
            self.captured.record(piece.color);
            self.events.push(GameEvent::Captured { pos, piece });
        }
        if undo.promoted {
            info!(?color, pos = %mv.to, "promoted");
            self.events.push(GameEvent::Promoted { pos: mv.to, color });
        }

        if mv.is_capture() {
            let continuation = moves_for(&self.board, mv.to).capture;
            if !continuation.is_empty() {
                self.selected = Some(mv.to);
                self.destinations = continuation;
                self.phase = Phase::CaptureChain;
                self.events.push(GameEvent::ChainContinues { pos: mv.to });
                if self.config.rules.soufflee && !self.is_computer(color) {
                    self.timer.arm(Instant::now());
                }
                return;
            }
        } else if self.config.rules.soufflee {
            self.resolve_soufflee(mv);
        }

        self.end_turn();
    }

    /// Penalize a simple move played while a capture was available
    fn resolve_soufflee(&mut self, mv: Move) {
        let sources = capture_sources(&self.turn_captures);
        if sources.is_empty() {
            return;
        }
        self.events.push(GameEvent::SouffleePending { color: self.current });

        // First capturer in scan order other than the moved piece, else the
        // moved piece on its new square
        let target = sources.iter().copied().find(|&pos| pos != mv.from).unwrap_or(mv.to);

        // Other capturers have not moved and `mv.to` holds the moved piece
        debug_assert!(
            self.board.get(target).is_some_and(|piece| piece.color == self.current),
            "soufflee target {target} not held by the mover"
        );
        self.blow(target, BlowReason::ForfeitedCapture);
    }

    fn blow(&mut self, pos: Pos, reason: BlowReason) {
        if let Some(piece) = self.board.remove(pos) {
            info!(%pos, color = ?piece.color, ?reason, "piece blown");
            self.captured.record(piece.color);
            self.events.push(GameEvent::Blown { pos, piece, reason });
        }
    }

    fn end_turn(&mut self) {
        self.current = self.current.opponent();
        self.events.push(GameEvent::TurnChanged { color: self.current });
        self.start_turn();
    }

    fn start_turn(&mut self) {
        self.selected = None;
        self.destinations.clear();
        self.timer.cancel();
        self.phase = Phase::AwaitingSelection;
        self.turn_captures = mandatory_captures(&self.board, self.current);

        let side = self.current;
        let other = side.opponent();
        if self.board.count(side) == 0 {
            self.finish(other, GameOverReason::NoPieces);
        } else if self.board.count(other) == 0 {
            self.finish(side, GameOverReason::NoPieces);
        } else if !has_any_move(&self.board, side) {
            self.finish(other, GameOverReason::Blocked);
        }
    }

    fn finish(&mut self, winner: Color, reason: GameOverReason) {
        info!(?winner, ?reason, plies = self.plies, "game over");
        self.phase = Phase::GameOver { winner, reason };
        self.selected = None;
        self.destinations.clear();
        self.turn_captures.clear();
        self.timer.cancel();
        self.pending = None;
        self.events.push(GameEvent::GameOver { winner, reason });
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("selected", &self.selected)
            .field("captured", &self.captured)
            .field("computer_thinking", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
