use crate::action::{ActionTransition, Env, MoveError};
use crate::state::{Disk, GameState, MoveRecord, SessionStatus, TowerId};

/// Where a move request came from.
///
/// All sources go through the same executor path; the origin only matters to
/// progress tracking (gesture moves feed an achievement).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveSource {
    #[default]
    Manual,
    Gesture,
    Solver,
}

/// An executed transfer and whether it solved the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResult {
    pub record: MoveRecord,
    pub won: bool,
}

/// Transfers the top disk of `from` onto `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub from: TowerId,
    pub to: TowerId,
    pub source: MoveSource,
    /// Disk the caller expects to move, taken from a human selection.
    pub expected: Option<Disk>,
}

impl MoveAction {
    pub fn new(from: TowerId, to: TowerId) -> Self {
        Self {
            from,
            to,
            source: MoveSource::Manual,
            expected: None,
        }
    }

    pub fn with_source(mut self, source: MoveSource) -> Self {
        self.source = source;
        self
    }

    pub fn expecting(mut self, disk: Disk) -> Self {
        self.expected = Some(disk);
        self
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveResult;

    fn pre_validate(&self, state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        if state.is_completed() {
            return Err(MoveError::GameCompleted);
        }

        let disk = state.board().check_move(self.from, self.to)?;

        match self.expected {
            Some(expected) if expected != disk => Err(MoveError::StaleSelection {
                from: self.from,
                expected,
            }),
            _ => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState, env: &Env) -> Result<Self::Result, Self::Error> {
        let disk = state
            .board
            .transfer(self.from, self.to)
            .ok_or(MoveError::EmptyTower { tower: self.from })?;

        let player = state.current_player;
        let record = MoveRecord {
            from: self.from,
            to: self.to,
            disk,
            player,
        };

        state.history.push(record);
        state.selection = None;
        state.players[player].moves += 1;

        if state.status == SessionStatus::NotStarted {
            state.status = SessionStatus::InProgress;
            state.started_at = Some(env.now);
        }

        state.current_player = state.player_after_move(player);

        let won = state.board.is_solved();
        if won {
            state.status = SessionStatus::Completed;
            state.finished_at = Some(env.now);
        }

        Ok(MoveResult { record, won })
    }

    fn post_validate(&self, state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        for tower in [self.from, self.to] {
            if !state.board().tower(tower).is_well_ordered() {
                return Err(MoveError::OrderingViolated { tower });
            }
        }
        Ok(())
    }
}
