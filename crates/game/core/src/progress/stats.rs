use std::collections::BTreeSet;

/// Lifetime counters that feed achievement predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct CumulativeStats {
    /// Completed games, counted on every win.
    pub games_played: u32,
    /// Successful undo invocations.
    pub undo_count: u32,
    /// Distinct theme names applied.
    pub themes_used: BTreeSet<String>,
}

impl CumulativeStats {
    pub fn record_win(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    pub fn record_undo(&mut self) {
        self.undo_count = self.undo_count.saturating_add(1);
    }

    /// Returns true when the theme had not been used before.
    pub fn record_theme(&mut self, theme: &str) -> bool {
        self.themes_used.insert(theme.to_owned())
    }
}
