use crate::action::{ActionTransition, Env, SelectError};
use crate::state::{Disk, GameState, Selection, TowerId};

/// Picks up (or puts back) the top disk of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectAction {
    pub tower: TowerId,
    pub disk: Disk,
}

impl SelectAction {
    pub fn new(tower: TowerId, disk: Disk) -> Self {
        Self { tower, disk }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectOutcome {
    Selected(Selection),
    /// The disk was already selected; the selection is now empty.
    Cleared,
}

impl ActionTransition for SelectAction {
    type Error = SelectError;
    type Result = SelectOutcome;

    fn pre_validate(&self, state: &GameState, _env: &Env) -> Result<(), Self::Error> {
        if state.is_completed() {
            return Err(SelectError::GameCompleted);
        }

        let top = state
            .board()
            .top(self.tower)
            .ok_or(SelectError::EmptyTower { tower: self.tower })?;

        if top != self.disk {
            return Err(SelectError::NotTopDisk {
                tower: self.tower,
                disk: self.disk,
                top,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &Env) -> Result<Self::Result, Self::Error> {
        let selection = Selection {
            tower: self.tower,
            disk: self.disk,
        };

        if state.selection == Some(selection) {
            state.selection = None;
            Ok(SelectOutcome::Cleared)
        } else {
            state.selection = Some(selection);
            Ok(SelectOutcome::Selected(selection))
        }
    }
}
