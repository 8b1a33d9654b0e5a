//! Tower and disk model.
//!
//! A [`Board`] always holds exactly [`GameConfig::TOWER_COUNT`] towers. Every
//! tower is ordered bottom to top with strictly decreasing disk sizes, and the
//! union of all towers is exactly `1..=disk_count`.

use core::fmt;

use arrayvec::ArrayVec;

use crate::action::MoveError;
use crate::config::{ConfigError, GameConfig};
use crate::state::IntegrityError;

/// A disk identified by its size. Smaller sizes must rest above larger ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Disk(pub u8);

impl Disk {
    #[inline]
    pub const fn size(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three towers, `A` (start), `B` (auxiliary), or `C` (goal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct TowerId(u8);

impl TowerId {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);

    pub const ALL: [TowerId; GameConfig::TOWER_COUNT] = [Self::A, Self::B, Self::C];

    /// Tower holding the full stack at the start of a game.
    pub const START: Self = Self::A;
    /// Tower that must hold every disk for the puzzle to be solved.
    pub const GOAL: Self = Self::C;

    /// Returns the tower at `index`, or `None` for indices outside `0..3`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < GameConfig::TOWER_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The tower that is neither `self` nor `other`.
    ///
    /// Only meaningful when `self != other`.
    pub const fn third(self, other: TowerId) -> TowerId {
        Self(3 - self.0 - other.0)
    }

    /// Next tower to the right, wrapping from `C` back to `A`.
    pub const fn right(self) -> TowerId {
        Self((self.0 + 1) % 3)
    }

    /// Next tower to the left, wrapping from `A` back to `C`.
    pub const fn left(self) -> TowerId {
        Self((self.0 + 2) % 3)
    }

    pub const fn label(self) -> char {
        match self.0 {
            0 => 'A',
            1 => 'B',
            _ => 'C',
        }
    }
}

impl TryFrom<u8> for TowerId {
    type Error = InvalidTower;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TowerId::new(value as usize).ok_or(InvalidTower(value))
    }
}

impl From<TowerId> for u8 {
    fn from(value: TowerId) -> Self {
        value.0
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raised when an index does not name one of the three towers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("tower index {0} is out of range (expected 0..3)")]
pub struct InvalidTower(pub u8);

/// A single peg holding disks bottom to top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tower {
    disks: ArrayVec<Disk, { GameConfig::MAX_DISKS }>,
}

impl Tower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disks from bottom to top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// True when every disk is strictly smaller than the one beneath it.
    pub fn is_well_ordered(&self) -> bool {
        self.disks.windows(2).all(|pair| pair[0] > pair[1])
    }

    fn push(&mut self, disk: Disk) -> bool {
        self.disks.try_push(disk).is_ok()
    }

    fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}

/// Three towers and the number of disks distributed across them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    towers: [Tower; GameConfig::TOWER_COUNT],
    disk_count: u8,
}

impl Board {
    /// Builds the starting board: tower A holds `disk_count..=1` bottom to top.
    pub fn new(disk_count: u8) -> Result<Self, ConfigError> {
        GameConfig::validate_disk_count(disk_count)?;

        let mut start = Tower::new();
        for size in (1..=disk_count).rev() {
            start.push(Disk(size));
        }

        Ok(Self {
            towers: [start, Tower::new(), Tower::new()],
            disk_count,
        })
    }

    /// Builds a board from raw tower contents (bottom to top), checking the
    /// conservation and ordering invariants.
    pub fn from_towers(disk_count: u8, towers: &[Vec<u8>; 3]) -> Result<Self, IntegrityError> {
        GameConfig::validate_disk_count(disk_count)?;

        let mut seen = [false; GameConfig::MAX_DISKS + 1];
        let mut built: [Tower; GameConfig::TOWER_COUNT] = Default::default();

        for (tower_id, raw) in TowerId::ALL.into_iter().zip(towers.iter()) {
            for &size in raw {
                if size == 0 || size > disk_count {
                    return Err(IntegrityError::DiskOutOfRange {
                        disk: size,
                        disk_count,
                    });
                }
                if seen[size as usize] {
                    return Err(IntegrityError::DuplicateDisk { disk: size });
                }
                seen[size as usize] = true;
                // Sizes are unique and bounded by disk_count <= MAX_DISKS.
                built[tower_id.index()].push(Disk(size));
            }
            if !built[tower_id.index()].is_well_ordered() {
                return Err(IntegrityError::TowerOutOfOrder { tower: tower_id });
            }
        }

        if let Some(missing) = (1..=disk_count).find(|&size| !seen[size as usize]) {
            return Err(IntegrityError::MissingDisk { disk: missing });
        }

        Ok(Self {
            towers: built,
            disk_count,
        })
    }

    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    pub fn towers(&self) -> &[Tower; GameConfig::TOWER_COUNT] {
        &self.towers
    }

    pub fn tower(&self, id: TowerId) -> &Tower {
        &self.towers[id.index()]
    }

    pub fn top(&self, id: TowerId) -> Option<Disk> {
        self.tower(id).top()
    }

    /// Tower currently holding `disk`.
    pub fn locate(&self, disk: Disk) -> Option<TowerId> {
        TowerId::ALL
            .into_iter()
            .find(|&id| self.tower(id).disks().contains(&disk))
    }

    /// Checks the legal-move rule and returns the disk that would move.
    ///
    /// A move is legal iff the towers differ, the source is non-empty, and the
    /// target is empty or its top disk is larger than the moving disk.
    pub fn check_move(&self, from: TowerId, to: TowerId) -> Result<Disk, MoveError> {
        if from == to {
            return Err(MoveError::SameTower { tower: from });
        }

        let disk = self.top(from).ok_or(MoveError::EmptyTower { tower: from })?;

        match self.top(to) {
            Some(onto) if onto < disk => Err(MoveError::DiskTooLarge { disk, onto, to }),
            _ => Ok(disk),
        }
    }

    pub fn is_legal_move(&self, from: TowerId, to: TowerId) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// The goal tower holds every disk.
    pub fn is_solved(&self) -> bool {
        self.tower(TowerId::GOAL).len() == self.disk_count as usize
    }

    pub fn is_well_ordered(&self) -> bool {
        self.towers.iter().all(Tower::is_well_ordered)
    }

    /// Raw tower contents (bottom to top), as stored in save slots.
    pub fn to_raw(&self) -> [Vec<u8>; 3] {
        self.towers
            .clone()
            .map(|tower| tower.disks.iter().map(|disk| disk.0).collect())
    }

    /// Moves the top disk of `from` onto `to` without checking legality.
    ///
    /// Callers validate with [`Board::check_move`] first. Returns `None` and
    /// leaves the board untouched when `from` is empty.
    pub(crate) fn transfer(&mut self, from: TowerId, to: TowerId) -> Option<Disk> {
        let disk = self.towers[from.index()].pop()?;
        if !self.towers[to.index()].push(disk) {
            self.towers[from.index()].push(disk);
            return None;
        }
        Some(disk)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in TowerId::ALL {
            write!(f, "{}:", id)?;
            for disk in self.tower(id).disks() {
                write!(f, " {}", disk)?;
            }
            if id != TowerId::GOAL {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(a: &[u8], b: &[u8], c: &[u8]) -> [Vec<u8>; 3] {
        [a.to_vec(), b.to_vec(), c.to_vec()]
    }

    #[test]
    fn new_board_stacks_everything_on_a() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.to_raw(), raw(&[4, 3, 2, 1], &[], &[]));
        assert_eq!(board.top(TowerId::A), Some(Disk(1)));
        assert!(board.is_well_ordered());
        assert!(!board.is_solved());
    }

    #[test]
    fn solved_when_goal_tower_holds_all_disks() {
        let solved = Board::from_towers(3, &raw(&[], &[], &[3, 2, 1])).unwrap();
        assert!(solved.is_solved());

        let spread = Board::from_towers(3, &raw(&[3], &[2], &[1])).unwrap();
        assert!(!spread.is_solved());
    }

    #[test]
    fn check_move_enforces_legal_move_rule() {
        let board = Board::from_towers(3, &raw(&[3], &[2], &[1])).unwrap();

        assert_eq!(board.check_move(TowerId::C, TowerId::A), Ok(Disk(1)));
        assert_eq!(board.check_move(TowerId::B, TowerId::A), Ok(Disk(2)));
        assert_eq!(
            board.check_move(TowerId::A, TowerId::B),
            Err(MoveError::DiskTooLarge {
                disk: Disk(3),
                onto: Disk(2),
                to: TowerId::B
            })
        );
        assert_eq!(
            board.check_move(TowerId::A, TowerId::A),
            Err(MoveError::SameTower { tower: TowerId::A })
        );

        let fresh = Board::new(3).unwrap();
        assert_eq!(
            fresh.check_move(TowerId::B, TowerId::C),
            Err(MoveError::EmptyTower { tower: TowerId::B })
        );
    }

    #[test]
    fn from_towers_rejects_conservation_violations() {
        assert_eq!(
            Board::from_towers(3, &raw(&[3, 2], &[2], &[1])),
            Err(IntegrityError::DuplicateDisk { disk: 2 })
        );
        assert_eq!(
            Board::from_towers(3, &raw(&[3], &[], &[1])),
            Err(IntegrityError::MissingDisk { disk: 2 })
        );
        assert_eq!(
            Board::from_towers(3, &raw(&[4, 3], &[2], &[1])),
            Err(IntegrityError::DiskOutOfRange {
                disk: 4,
                disk_count: 3
            })
        );
        assert_eq!(
            Board::from_towers(3, &raw(&[1, 3], &[2], &[])),
            Err(IntegrityError::TowerOutOfOrder { tower: TowerId::A })
        );
    }

    #[test]
    fn tower_ids_wrap_left_and_right() {
        assert_eq!(TowerId::A.right(), TowerId::B);
        assert_eq!(TowerId::C.right(), TowerId::A);
        assert_eq!(TowerId::A.left(), TowerId::C);
        assert_eq!(TowerId::A.third(TowerId::C), TowerId::B);
        assert_eq!(TowerId::try_from(3), Err(InvalidTower(3)));
    }

    #[test]
    fn locate_finds_the_tower_holding_a_disk() {
        let board = Board::from_towers(3, &raw(&[3], &[2], &[1])).unwrap();
        assert_eq!(board.locate(Disk(2)), Some(TowerId::B));
        assert_eq!(board.locate(Disk(7)), None);
    }
}
