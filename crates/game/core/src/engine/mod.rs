//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! orchestrates the transition phases and surfaces rich error information
//! for the runtime. Every execution either commits completely or leaves the
//! state exactly as it was.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult, ActionTransition, Env};
use crate::state::GameState;

/// Game engine that validates and applies actions against a borrowed state.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// A failure in any phase restores the state captured before execution,
    /// so rejected actions never leave partial mutations behind.
    pub fn execute(&mut self, env: Env, action: &Action) -> Result<ActionResult, ExecuteError> {
        let before = self.state.clone();

        match transition::execute_transition(action, self.state, &env) {
            Ok(result) => Ok(result),
            Err(error) => {
                *self.state = before;
                Err(error)
            }
        }
    }

    /// Runs a single transition with the same all-or-nothing guarantee as
    /// [`GameEngine::execute`], returning its typed result.
    pub fn run<T>(
        &mut self,
        env: Env,
        transition: &T,
    ) -> Result<T::Result, TransitionPhaseError<T::Error>>
    where
        T: ActionTransition,
    {
        let before = self.state.clone();

        transition::drive_transition(transition, self.state, &env).inspect_err(|_| {
            *self.state = before;
        })
    }

    pub fn state(&self) -> &GameState {
        self.state
    }
}
