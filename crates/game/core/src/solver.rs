//! Optimal move generation.
//!
//! Pure functions only: the solver never touches a [`GameState`]. Hosts pull
//! moves from a [`SolutionPlan`] and execute them through the engine at
//! whatever cadence they like.
//!
//! [`GameState`]: crate::GameState

use std::collections::VecDeque;

use crate::state::{Board, TowerId};

/// A single planned transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverMove {
    pub from: TowerId,
    pub to: TowerId,
}

/// Lower bound on moves for `n` disks, `2^n - 1`.
pub const fn min_moves(disk_count: u8) -> u64 {
    if disk_count >= 64 {
        u64::MAX
    } else {
        (1u64 << disk_count) - 1
    }
}

/// Canonical recursive solution moving `n` disks from `from` to `to`.
///
/// Returns exactly `2^n - 1` moves; `n = 0` yields an empty sequence.
pub fn generate_solution(n: u8, from: TowerId, to: TowerId, aux: TowerId) -> Vec<SolverMove> {
    let mut moves = Vec::with_capacity(min_moves(n).min(1 << 20) as usize);
    push_tower(&mut moves, n, from, to, aux);
    moves
}

fn push_tower(moves: &mut Vec<SolverMove>, n: u8, from: TowerId, to: TowerId, aux: TowerId) {
    if n == 0 {
        return;
    }
    push_tower(moves, n - 1, from, aux, to);
    moves.push(SolverMove { from, to });
    push_tower(moves, n - 1, aux, to, from);
}

/// Optimal plan that gathers every disk of `board` onto `target`.
///
/// Works from any legal position. The largest disk not yet in place must
/// reach `target`, which requires every smaller disk to be stacked on the
/// remaining tower first; recursion on the smaller disks yields the shortest
/// sequence. From the starting board this equals
/// `generate_solution(n, A, C, B)`.
pub fn solve_from(board: &Board, target: TowerId) -> Vec<SolverMove> {
    let n = board.disk_count();
    // location[size] is the tower currently holding disk `size`.
    let mut location = vec![TowerId::START; n as usize + 1];
    for id in TowerId::ALL {
        for disk in board.tower(id).disks() {
            location[disk.size() as usize] = id;
        }
    }

    let mut moves = Vec::new();
    gather(&mut moves, &location, n, target);
    moves
}

/// Appends the moves that bring disks `1..=k` onto `target`, given their
/// current `location`s.
fn gather(moves: &mut Vec<SolverMove>, location: &[TowerId], k: u8, target: TowerId) {
    if k == 0 {
        return;
    }
    let here = location[k as usize];
    if here == target {
        gather(moves, location, k - 1, target);
    } else {
        let spare = here.third(target);
        gather(moves, location, k - 1, spare);
        moves.push(SolverMove {
            from: here,
            to: target,
        });
        push_tower(moves, k - 1, spare, target, here);
    }
}

/// FIFO queue of planned moves consumed one step at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionPlan {
    queue: VecDeque<SolverMove>,
    total: usize,
}

impl SolutionPlan {
    pub fn new(moves: Vec<SolverMove>) -> Self {
        let total = moves.len();
        Self {
            queue: moves.into(),
            total,
        }
    }

    /// Plan from the current position of `board` to the goal tower.
    pub fn for_board(board: &Board) -> Self {
        Self::new(solve_from(board, TowerId::GOAL))
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn peek(&self) -> Option<SolverMove> {
        self.queue.front().copied()
    }
}

impl Iterator for SolutionPlan {
    type Item = SolverMove;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl ExactSizeIterator for SolutionPlan {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Env, MoveAction, MoveSource};
    use crate::engine::GameEngine;
    use crate::state::{GameMode, GameState};

    fn apply_all(state: &mut GameState, moves: &[SolverMove]) {
        let mut engine = GameEngine::new(state);
        for step in moves {
            assert!(engine.state().board().is_well_ordered());
            engine
                .execute(
                    Env::default(),
                    &MoveAction::new(step.from, step.to)
                        .with_source(MoveSource::Solver)
                        .into(),
                )
                .unwrap_or_else(|err| panic!("illegal solver move {step:?}: {err}"));
        }
    }

    #[test]
    fn generated_solution_has_minimum_length_and_solves() {
        for n in 1..=10u8 {
            let moves = generate_solution(n, TowerId::A, TowerId::C, TowerId::B);
            assert_eq!(moves.len() as u64, min_moves(n));

            let mut state = GameState::new(n, GameMode::Single).unwrap();
            apply_all(&mut state, &moves);
            assert!(state.board().is_solved());
            assert!(state.is_completed());
        }
    }

    #[test]
    fn zero_disks_yield_no_moves() {
        assert!(generate_solution(0, TowerId::A, TowerId::C, TowerId::B).is_empty());
        assert_eq!(min_moves(0), 0);
    }

    #[test]
    fn one_disk_moves_straight_to_target() {
        assert_eq!(
            generate_solution(1, TowerId::A, TowerId::C, TowerId::B),
            vec![SolverMove {
                from: TowerId::A,
                to: TowerId::C
            }]
        );
    }

    #[test]
    fn solve_from_start_matches_canonical_solution() {
        for n in 1..=8u8 {
            let board = Board::new(n).unwrap();
            assert_eq!(
                solve_from(&board, TowerId::C),
                generate_solution(n, TowerId::A, TowerId::C, TowerId::B)
            );
        }
    }

    #[test]
    fn solve_from_finishes_a_partly_played_game() {
        let mut state = GameState::new(4, GameMode::Single).unwrap();
        apply_all(
            &mut state,
            &[
                SolverMove {
                    from: TowerId::A,
                    to: TowerId::C,
                },
                SolverMove {
                    from: TowerId::A,
                    to: TowerId::B,
                },
                SolverMove {
                    from: TowerId::C,
                    to: TowerId::A,
                },
            ],
        );

        let plan = SolutionPlan::for_board(state.board());
        let moves: Vec<_> = plan.collect();
        apply_all(&mut state, &moves);
        assert!(state.is_completed());
    }

    #[test]
    fn solve_from_solved_board_is_empty() {
        let board = Board::from_towers(3, &[vec![], vec![], vec![3, 2, 1]]).unwrap();
        assert!(solve_from(&board, TowerId::C).is_empty());
    }

    #[test]
    fn plan_tracks_remaining_moves() {
        let mut plan = SolutionPlan::for_board(&Board::new(3).unwrap());
        assert_eq!(plan.total(), 7);
        assert_eq!(plan.remaining(), 7);
        let first = plan.peek();
        assert_eq!(plan.next(), first);
        assert_eq!(plan.remaining(), 6);
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.total(), 7);

        assert_eq!(plan.by_ref().count(), 6);
        assert!(plan.is_exhausted());
        assert_eq!(plan.peek(), None);
    }
}
