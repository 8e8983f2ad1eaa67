//! Game state module - the engine that owns a single game
//!
//! This module ties together all core components: board, pieces, RNG, scoring
//! and persistence. It has no clock of its own: a host calls
//! [`GameEngine::move_down`] every [`GameEngine::drop_interval_ms`] while the
//! game is running and forwards player input to the other operations.
//!
//! Rejected input (a blocked move, a rotation with no legal kick, a second hold)
//! leaves the state untouched and is reported only through the `bool` return
//! value. The one detectable failure is a missing or malformed saved game.

use log::{debug, info, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::persist::{MemoryStorage, PersistedSnapshot, SnapshotError, Storage};
use crate::pieces::{try_rotate, Shape};
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GamePhase, PieceKind, Position};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current orientation
    pub shape: Shape,
    /// Board coordinate of the shape's top-left
    pub position: Position,
}

impl ActivePiece {
    /// Create a piece in spawn orientation at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
            position: Position::spawn(),
        }
    }

    /// Board coordinates of the filled cells
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let Position { x, y } = self.position;
        self.shape.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Summary of the most recent lock (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Hard drop points awarded just before the lock (0 for a natural landing)
    pub drop_score: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine<S: Storage = MemoryStorage> {
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    lines: u32,
    phase: GamePhase,
    pieces: PieceGenerator,
    last_event: Option<LockEvent>,
    config: EngineConfig,
    storage: S,
}

impl GameEngine<MemoryStorage> {
    /// Engine backed by in-memory storage
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(config, MemoryStorage::new())
    }
}

impl Default for GameEngine<MemoryStorage> {
    fn default() -> Self {
        Self::in_memory(EngineConfig::seeded(1))
    }
}

impl<S: Storage> GameEngine<S> {
    /// Create an engine that has not started a game yet
    pub fn new(config: EngineConfig, storage: S) -> Self {
        let mut pieces = PieceGenerator::from_seed(config.seed);
        let next = pieces.next_piece();

        Self {
            board: Board::new(),
            active: None,
            next,
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            phase: GamePhase::NotStarted,
            pieces,
            last_event: None,
            config,
            storage,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_rows(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.next = Some(self.next);
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.phase = self.phase;
    }

    /// Fresh render snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new game
    ///
    /// Empties the board, zeroes the stats, clears the hold slot, spawns a random
    /// piece and queues a fresh next piece.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.held = None;
        self.can_hold = true;
        self.last_event = None;

        let kind = self.pieces.next_piece();
        self.spawn(kind);
        self.next = self.pieces.next_piece();
        self.phase = GamePhase::Running;

        info!("new game: {} with {} queued", kind.as_str(), self.next.as_str());
        self.autosave();
    }

    /// Place a new active piece of `kind` at the spawn position
    ///
    /// Legality is not checked here; the game-over check after a lock or hold
    /// catches a blocked spawn.
    pub fn spawn(&mut self, kind: PieceKind) {
        self.active = Some(ActivePiece::spawn(kind));
    }

    /// Whether `shape` at `position` would leave the board or overlap filled cells
    pub fn check_collision(&self, shape: &Shape, position: Position) -> bool {
        self.board.collides(shape, position.x, position.y)
    }

    /// Lowest position the active piece can fall to from where it is
    pub fn ghost_position(&self) -> Option<Position> {
        let active = self.active?;
        Some(self.drop_target(&active))
    }

    fn drop_target(&self, piece: &ActivePiece) -> Position {
        let mut pos = piece.position;
        while !self.check_collision(&piece.shape, pos.offset(0, 1)) {
            pos = pos.offset(0, 1);
        }
        pos
    }

    /// Active piece, if the game accepts moves right now
    fn movable(&self) -> Option<ActivePiece> {
        if !self.phase.is_running() {
            return None;
        }
        self.active
    }

    /// Try to shift the active piece
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.movable() else {
            return false;
        };

        let target = active.position.offset(dx, dy);
        if self.check_collision(&active.shape, target) {
            return false;
        }

        self.active = Some(ActivePiece {
            position: target,
            ..active
        });
        self.autosave();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Rotate the active piece clockwise, trying wall kicks if blocked in place
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.movable() else {
            return false;
        };

        let Position { x, y } = active.position;
        let Some((shape, (dx, dy))) =
            try_rotate(&active.shape, x, y, |s, x, y| self.board.collides(s, x, y))
        else {
            return false;
        };

        self.active = Some(ActivePiece {
            shape,
            position: active.position.offset(dx, dy),
            ..active
        });
        self.autosave();
        true
    }

    /// Move the active piece one row down, locking it when it cannot fall
    ///
    /// Returns `true` only when the piece moved. A lock returns `false`; see
    /// [`GameEngine::take_last_event`] for what it did.
    pub fn move_down(&mut self) -> bool {
        if self.try_shift(0, 1) {
            return true;
        }
        if self.movable().is_some() {
            self.lock_active(0);
            self.autosave();
        }
        false
    }

    /// Drop the active piece as far as it goes and lock it
    ///
    /// Awards 2 points per row travelled.
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.movable() else {
            return false;
        };

        let target = self.drop_target(&active);
        let distance = (target.y - active.position.y) as u32;
        let drop_score = hard_drop_score(distance);

        self.active = Some(ActivePiece {
            position: target,
            ..active
        });
        self.score = self.score.saturating_add(drop_score);

        self.lock_active(drop_score);
        self.autosave();
        true
    }

    /// Swap the active piece into the hold slot
    ///
    /// Only once per lock. With an empty slot the next piece comes in and a new
    /// next piece is drawn.
    pub fn hold_piece(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.movable() else {
            return false;
        };

        match self.held {
            Some(held) => self.spawn(held),
            None => {
                let next = self.next;
                self.next = self.pieces.next_piece();
                self.spawn(next);
            }
        }
        self.held = Some(active.kind);
        self.can_hold = false;

        self.check_game_over();
        self.autosave();
        true
    }

    /// Running ⇄ Paused. Other phases ignore it.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            _ => return false,
        };
        debug!("phase -> {}", self.phase.as_str());
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold_piece(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Lock the active piece onto the board, clear lines, bring in the next piece
    fn lock_active(&mut self, drop_score: u32) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let Position { x, y } = piece.position;
        self.board.lock_shape(&piece.shape, x, y, piece.kind.code());

        let cleared = self.board.clear_full_rows().len();
        let level_before = self.level();
        let line_score = line_clear_score(cleared, level_before);
        self.score = self.score.saturating_add(line_score);
        self.lines = self.lines.saturating_add(cleared as u32);

        if cleared > 0 {
            debug!(
                "cleared {} line(s) at level {} for {} points",
                cleared, level_before, line_score
            );
        }

        let next = self.next;
        self.next = self.pieces.next_piece();
        self.spawn(next);
        self.can_hold = true;

        let game_over = self.check_game_over();

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            line_clear_score: line_score,
            drop_score,
            game_over,
        });
    }

    /// End the game if the freshly spawned piece has no room
    ///
    /// Blocked when the top row holds anything, or the piece overlaps filled cells.
    fn check_game_over(&mut self) -> bool {
        let blocked = self.board.is_row_occupied(0)
            || self
                .active
                .is_some_and(|p| self.check_collision(&p.shape, p.position));

        if blocked {
            self.phase = GamePhase::GameOver;
            info!(
                "game over: score {}, lines {}, level {}",
                self.score,
                self.lines,
                self.level()
            );
        }
        blocked
    }

    fn persisted(&self) -> PersistedSnapshot {
        PersistedSnapshot::new(
            &self.board,
            self.score,
            self.lines,
            self.next,
            self.held,
            self.can_hold,
        )
    }

    /// Write the saved game, replacing any previous one
    pub fn save_snapshot(&mut self) -> Result<(), SnapshotError> {
        let snapshot = self.persisted();
        snapshot.store(&mut self.storage)?;
        debug!("saved game (score {}, lines {})", self.score, self.lines);
        Ok(())
    }

    /// Persist after a committed mutation
    ///
    /// Mutations only start while running, so a game-over phase here means this
    /// very operation ended the game, and its final board is written too.
    fn autosave(&mut self) {
        let active_game = matches!(self.phase, GamePhase::Running | GamePhase::GameOver);
        if !self.config.autosave || !active_game || self.active.is_none() {
            return;
        }
        if let Err(err) = self.save_snapshot() {
            warn!("autosave failed: {err}");
        }
    }

    /// Restore the saved game, spawning a fresh random piece
    ///
    /// On error nothing changes.
    pub fn try_load_snapshot(&mut self) -> Result<(), SnapshotError> {
        let snapshot = PersistedSnapshot::load(&self.storage)?;

        self.board = snapshot.board();
        self.score = snapshot.score;
        self.lines = snapshot.lines_cleared;
        self.next = snapshot.next_piece;
        self.held = snapshot.held_piece;
        self.can_hold = snapshot.can_hold;
        self.last_event = None;
        self.phase = GamePhase::Running;

        let kind = self.pieces.next_piece();
        self.spawn(kind);

        info!(
            "loaded game: score {}, lines {}, level {}",
            self.score,
            self.lines,
            self.level()
        );
        self.check_game_over();
        Ok(())
    }

    /// Restore the saved game. Returns `false`, with state untouched, if there
    /// is no usable save.
    pub fn load_snapshot(&mut self) -> bool {
        match self.try_load_snapshot() {
            Ok(()) => true,
            Err(SnapshotError::Missing) => {
                info!("no saved game to load");
                false
            }
            Err(err) => {
                warn!("could not load saved game: {err}");
                false
            }
        }
    }
}
