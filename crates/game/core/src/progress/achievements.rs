//! Achievement catalogue and the store capability that records unlocks.

use std::collections::BTreeSet;

/// Every achievement the puzzle can award.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AchievementId {
    FirstWin,
    SpeedDemon,
    EfficiencyMaster,
    Persistent,
    TowerMaster,
    UndoMaster,
    ThemeExplorer,
    MultiplayerChamp,
    SaveMaster,
    GestureGuru,
}

/// What kind of event can satisfy an achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Win,
    Undo,
    ThemeApplied,
    SaveCycle,
    GestureMove,
}

impl AchievementId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstWin => "First Victory",
            Self::SpeedDemon => "Speed Demon",
            Self::EfficiencyMaster => "Efficiency Master",
            Self::Persistent => "Persistent",
            Self::TowerMaster => "Tower Master",
            Self::UndoMaster => "Undo Master",
            Self::ThemeExplorer => "Theme Explorer",
            Self::MultiplayerChamp => "Multiplayer Champion",
            Self::SaveMaster => "Save Master",
            Self::GestureGuru => "Gesture Guru",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::FirstWin => "🏆",
            Self::SpeedDemon => "⚡",
            Self::EfficiencyMaster => "🎯",
            Self::Persistent => "💪",
            Self::TowerMaster => "🗼",
            Self::UndoMaster => "↩️",
            Self::ThemeExplorer => "🎨",
            Self::MultiplayerChamp => "👥",
            Self::SaveMaster => "💾",
            Self::GestureGuru => "👆",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstWin => "Complete your first puzzle",
            Self::SpeedDemon => "Solve the 3-disk puzzle in under 30 seconds",
            Self::EfficiencyMaster => "Solve with the minimum number of moves",
            Self::Persistent => "Complete 5 games",
            Self::TowerMaster => "Solve the 8-disk puzzle",
            Self::UndoMaster => "Use undo 10 times",
            Self::ThemeExplorer => "Try 5 different themes",
            Self::MultiplayerChamp => "Win a multiplayer game",
            Self::SaveMaster => "Save or load a game",
            Self::GestureGuru => "Complete a move using gestures",
        }
    }

    pub const fn trigger(self) -> Trigger {
        match self {
            Self::FirstWin
            | Self::SpeedDemon
            | Self::EfficiencyMaster
            | Self::Persistent
            | Self::TowerMaster
            | Self::MultiplayerChamp => Trigger::Win,
            Self::UndoMaster => Trigger::Undo,
            Self::ThemeExplorer => Trigger::ThemeApplied,
            Self::SaveMaster => Trigger::SaveCycle,
            Self::GestureGuru => Trigger::GestureMove,
        }
    }
}

/// Records which achievements are unlocked.
///
/// Unlocks are permanent: implementations must never forget an id once
/// `unlock` returned true for it.
pub trait AchievementStore {
    fn has(&self, id: AchievementId) -> bool;

    /// Marks `id` unlocked. Returns `true` only the first time.
    fn unlock(&mut self, id: AchievementId) -> bool;

    fn unlocked(&self) -> Vec<AchievementId>;
}

impl AchievementStore for BTreeSet<AchievementId> {
    fn has(&self, id: AchievementId) -> bool {
        self.contains(&id)
    }

    fn unlock(&mut self, id: AchievementId) -> bool {
        self.insert(id)
    }

    fn unlocked(&self) -> Vec<AchievementId> {
        self.iter().copied().collect()
    }
}

impl<S: AchievementStore + ?Sized> AchievementStore for Box<S> {
    fn has(&self, id: AchievementId) -> bool {
        (**self).has(id)
    }

    fn unlock(&mut self, id: AchievementId) -> bool {
        (**self).unlock(id)
    }

    fn unlocked(&self) -> Vec<AchievementId> {
        (**self).unlocked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_use_snake_case_names() {
        assert_eq!(AchievementId::FirstWin.as_str(), "first_win");
        assert_eq!(AchievementId::MultiplayerChamp.to_string(), "multiplayer_champ");
        assert_eq!(
            "gesture_guru".parse::<AchievementId>(),
            Ok(AchievementId::GestureGuru)
        );
        assert_eq!(AchievementId::iter().count(), 10);
    }

    #[test]
    fn set_store_unlocks_once() {
        let mut store = BTreeSet::new();
        assert!(store.unlock(AchievementId::SaveMaster));
        assert!(!store.unlock(AchievementId::SaveMaster));
        assert!(store.has(AchievementId::SaveMaster));
        assert_eq!(store.unlocked(), vec![AchievementId::SaveMaster]);
    }
}
