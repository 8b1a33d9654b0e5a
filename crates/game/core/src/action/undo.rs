use crate::action::{ActionTransition, Env, UndoError};
use crate::state::{GameMode, GameState, MoveRecord};

/// Pops the latest history record and reverses its transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndoAction;

impl ActionTransition for UndoAction {
    type Error = UndoError;
    type Result = MoveRecord;

    fn pre_validate(&self, state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        if state.is_completed() {
            return Err(UndoError::GameCompleted);
        }

        let record = state.last_move().ok_or(UndoError::EmptyHistory)?;
        if state.board().top(record.to) != Some(record.disk) {
            return Err(UndoError::HistoryDesync {
                tower: record.to,
                expected: record.disk,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &Env) -> Result<Self::Result, Self::Error> {
        let record = state.history.pop().ok_or(UndoError::EmptyHistory)?;

        state
            .board
            .transfer(record.to, record.from)
            .ok_or(UndoError::HistoryDesync {
                tower: record.to,
                expected: record.disk,
            })?;

        let stats = &mut state.players[record.player];
        stats.moves = stats.moves.saturating_sub(1);

        if state.mode == GameMode::Multiplayer {
            state.current_player = record.player;
        }
        state.selection = None;

        Ok(record)
    }
}
