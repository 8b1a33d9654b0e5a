//! Named snapshots that fully restore a session.

use crate::action::{Env, MoveAction};
use crate::engine::GameEngine;
use crate::state::{
    Board, GameMode, GameState, IntegrityError, MoveRecord, PlayerId, Players, SessionStatus,
    Timestamp,
};

/// Everything needed to resume a session later.
///
/// Slots are plain data owned by whichever store holds them; restoring one
/// builds a brand-new [`GameState`] and never keeps a reference into the slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveSlot {
    pub name: String,
    pub saved_at: Timestamp,
    pub disk_count: u8,
    /// Tower contents bottom to top.
    pub towers: [Vec<u8>; 3],
    pub history: Vec<MoveRecord>,
    pub mode: GameMode,
    pub current_player: PlayerId,
    pub players: Players,
    pub started_at: Option<Timestamp>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub finished_at: Option<Timestamp>,
}

impl SaveSlot {
    /// Captures `state` under `name`.
    pub fn capture(name: impl Into<String>, state: &GameState, saved_at: Timestamp) -> Self {
        Self {
            name: name.into(),
            saved_at,
            disk_count: state.disk_count(),
            towers: state.board().to_raw(),
            history: state.history().to_vec(),
            mode: state.mode(),
            current_player: state.current_player(),
            players: *state.players(),
            started_at: state.started_at(),
            finished_at: state.finished_at(),
        }
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Validates the slot and rebuilds a live state from it.
    ///
    /// The saved towers must hold every disk `1..=disk_count` exactly once in
    /// decreasing order, the history must replay legally from the starting
    /// board to those towers, and player counters and turn must agree with
    /// the replayed history. A slot with moves must carry its start time.
    pub fn restore(&self) -> Result<GameState, IntegrityError> {
        let saved_board = Board::from_towers(self.disk_count, &self.towers)?;

        let recorded = self.players.total_moves();
        if recorded as usize != self.history.len() {
            return Err(IntegrityError::MoveCountMismatch {
                recorded,
                history: self.history.len(),
            });
        }
        if self.started_at.is_none() && !self.history.is_empty() {
            return Err(IntegrityError::MissingStartTime {
                moves: self.history.len(),
            });
        }

        let mut state = GameState::new(self.disk_count, self.mode)?;
        let env = Env::at(self.started_at.unwrap_or_default());
        {
            let mut engine = GameEngine::new(&mut state);
            for (index, record) in self.history.iter().enumerate() {
                if engine.state().current_player() != record.player {
                    return Err(IntegrityError::HistoryMismatch { index });
                }
                match engine.run(env, &MoveAction::new(record.from, record.to)) {
                    Ok(replayed) if replayed.record == *record => {}
                    _ => return Err(IntegrityError::HistoryMismatch { index }),
                }
            }
        }

        if state.board != saved_board {
            return Err(IntegrityError::HistoryDiverges);
        }
        if state.current_player != self.current_player {
            return Err(IntegrityError::CurrentPlayerMismatch);
        }
        if state.players.iter().any(|(id, replayed)| replayed.moves != self.players[id].moves) {
            return Err(IntegrityError::MoveCountMismatch {
                recorded,
                history: self.history.len(),
            });
        }

        state.players = self.players;
        state.started_at = self.started_at;
        state.status = if state.board.is_solved() {
            SessionStatus::Completed
        } else if self.started_at.is_some() {
            SessionStatus::InProgress
        } else {
            SessionStatus::NotStarted
        };
        state.finished_at = match state.status {
            SessionStatus::Completed => self.finished_at.or(self.started_at),
            _ => None,
        };

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{MoveAction, UndoAction};
    use crate::state::{Disk, TowerId};

    fn play(state: &mut GameState, moves: &[(TowerId, TowerId)]) {
        let mut engine = GameEngine::new(state);
        for &(from, to) in moves {
            engine
                .execute(Env::at(Timestamp(100)), &MoveAction::new(from, to).into())
                .unwrap();
        }
    }

    fn mid_game_slot() -> (GameState, SaveSlot) {
        let mut state = GameState::new(4, GameMode::Multiplayer).unwrap();
        play(
            &mut state,
            &[
                (TowerId::A, TowerId::B),
                (TowerId::A, TowerId::C),
                (TowerId::B, TowerId::C),
                (TowerId::A, TowerId::B),
                (TowerId::C, TowerId::A),
            ],
        );
        let slot = SaveSlot::capture("mid", &state, Timestamp(9_000));
        (state, slot)
    }

    #[test]
    fn restore_round_trips_a_mid_game_session() {
        let (original, slot) = mid_game_slot();
        let restored = slot.restore().unwrap();

        assert_eq!(restored.move_count(), 5);
        assert_eq!(restored.history().len(), original.history().len());
        assert_eq!(restored.current_player(), PlayerId::Two);
        assert_eq!(restored.board(), original.board());
        assert_eq!(restored.status(), SessionStatus::InProgress);
        assert_eq!(restored.started_at(), Some(Timestamp(100)));
    }

    #[test]
    fn undo_after_restore_reverses_the_last_saved_move() {
        let (_, slot) = mid_game_slot();
        let mut restored = slot.restore().unwrap();
        let last = *slot.history.last().unwrap();

        let result = GameEngine::new(&mut restored)
            .execute(Env::default(), &UndoAction.into())
            .unwrap();

        assert_eq!(result, crate::ActionResult::Undo(last));
        assert_eq!(restored.board().top(last.from), Some(last.disk));
        assert_eq!(restored.current_player(), last.player);
        assert_eq!(restored.move_count(), 4);
    }

    #[test]
    fn restore_rejects_non_conserving_towers() {
        let (_, mut slot) = mid_game_slot();
        slot.towers[0].push(2);
        assert!(matches!(
            slot.restore(),
            Err(IntegrityError::DuplicateDisk { .. }) | Err(IntegrityError::TowerOutOfOrder { .. })
        ));

        let (_, mut slot) = mid_game_slot();
        slot.towers = [vec![4, 3, 2], vec![], vec![]];
        assert_eq!(slot.restore(), Err(IntegrityError::MissingDisk { disk: 1 }));
    }

    #[test]
    fn restore_rejects_history_that_does_not_reach_the_towers() {
        let (_, mut slot) = mid_game_slot();
        slot.towers = [vec![4, 3, 2, 1], vec![], vec![]];
        assert_eq!(slot.restore(), Err(IntegrityError::HistoryDiverges));

        let (_, mut slot) = mid_game_slot();
        slot.history[1].disk = Disk(3);
        assert_eq!(
            slot.restore(),
            Err(IntegrityError::HistoryMismatch { index: 1 })
        );
    }

    #[test]
    fn restore_rejects_counters_that_disagree_with_history() {
        let (_, mut slot) = mid_game_slot();
        slot.players[PlayerId::One].moves += 1;
        assert!(matches!(
            slot.restore(),
            Err(IntegrityError::MoveCountMismatch { .. })
        ));
    }

    #[test]
    fn restore_rejects_moves_without_a_start_time() {
        let (_, mut slot) = mid_game_slot();
        slot.started_at = None;
        assert_eq!(
            slot.restore(),
            Err(IntegrityError::MissingStartTime { moves: 5 })
        );
    }

    #[test]
    fn untouched_slot_restores_as_not_started() {
        let state = GameState::new(3, GameMode::Single).unwrap();
        let restored = SaveSlot::capture("fresh", &state, Timestamp(50))
            .restore()
            .unwrap();
        assert_eq!(restored.status(), SessionStatus::NotStarted);
        assert_eq!(restored.started_at(), None);
    }

    #[test]
    fn restore_rejects_out_of_range_disk_counts() {
        let (_, mut slot) = mid_game_slot();
        slot.disk_count = 0;
        assert!(matches!(slot.restore(), Err(IntegrityError::DiskCount(_))));
    }
}
