//! Deterministic Towers of Hanoi rules and data types shared across hosts.
//!
//! `hanoi-core` defines the canonical rules (board, transitions, engine,
//! solver, progress evaluation) and exposes pure APIs that carry no clock,
//! logger, or storage. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod progress;
pub mod solver;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, Env, MoveAction, MoveError, MoveResult, MoveSource,
    SelectAction, SelectError, SelectOutcome, UndoAction, UndoError,
};
pub use config::{ConfigError, GameConfig};
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorSeverity, GameError};
pub use progress::{
    AchievementId, AchievementStore, CumulativeStats, ProgressEvaluator, Trigger, WinSummary,
    efficiency_percent, score, score_state,
};
pub use solver::{SolutionPlan, SolverMove, generate_solution, min_moves, solve_from};
pub use state::{
    Board, Disk, GameMode, GameState, IntegrityError, InvalidTower, MoveRecord, PlayerId,
    PlayerStats, Players, SaveSlot, Selection, SessionStatus, Timestamp, Tower, TowerId,
};
