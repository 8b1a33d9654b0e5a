//! Player-facing transitions and the shared transition trait.
//!
//! Every state change is expressed as a small value type implementing
//! [`ActionTransition`], executed by [`crate::GameEngine`]. The pipeline is
//! `pre_validate -> apply -> post_validate`; hooks see host facts through
//! [`Env`] and never read a clock themselves.
mod error;
mod select;
mod transfer;
mod undo;

pub use error::{MoveError, SelectError, UndoError};
pub use select::{SelectAction, SelectOutcome};
pub use transfer::{MoveAction, MoveResult, MoveSource};
pub use undo::UndoAction;

use crate::state::{GameState, MoveRecord, Timestamp};

/// Host-supplied facts available to every transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Env {
    pub now: Timestamp,
}

impl Env {
    pub const fn at(now: Timestamp) -> Self {
        Self { now }
    }
}

/// Defines how a concrete action mutates puzzle state.
///
/// Implementors override the validation hooks to surface the pre- and
/// post-conditions that must hold around the mutation. Hooks receive read-only
/// state and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(&self, state: &mut GameState, env: &Env) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Any action the engine can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Select(SelectAction),
    Move(MoveAction),
    Undo(UndoAction),
}

impl From<SelectAction> for Action {
    fn from(action: SelectAction) -> Self {
        Self::Select(action)
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<UndoAction> for Action {
    fn from(action: UndoAction) -> Self {
        Self::Undo(action)
    }
}

/// Action-specific execution result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Select(SelectOutcome),
    Move(MoveResult),
    /// The record that was popped and reversed.
    Undo(MoveRecord),
}
