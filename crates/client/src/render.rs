//! Plain-text presentation of snapshots, events and stored data.
use std::collections::BTreeSet;
use std::fmt::Write as _;

use strum::IntoEnumIterator;

use hanoi_core::{
    AchievementId, CumulativeStats, GameMode, MoveSource, SaveSlot, SessionStatus, TowerId,
    WinSummary,
};
use hanoi_runtime::{Event, GameEvent, ProgressEvent, SessionSnapshot, format_timestamp};

/// Draws the three towers side by side, largest disk at the bottom.
///
/// The selected disk is drawn with `#` instead of `=`.
pub fn board(snapshot: &SessionSnapshot) -> String {
    let n = usize::from(snapshot.disk_count);
    let width = 2 * n + 1;
    let selected = snapshot
        .selection
        .map(|selection| (selection.tower.index(), usize::from(selection.disk.size())));

    let mut out = String::new();
    for row in (0..=n).rev() {
        let cells: Vec<String> = TowerId::ALL
            .iter()
            .map(|tower| {
                let index = tower.index();
                match snapshot.towers[index].get(row) {
                    Some(&disk) => {
                        let size = usize::from(disk);
                        let fill = if selected == Some((index, size)) { "#" } else { "=" };
                        format!("{:^width$}", fill.repeat(2 * size + 1))
                    }
                    None => format!("{:^width$}", "|"),
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    let _ = writeln!(out, "{}", "-".repeat(3 * width + 4));
    let labels: Vec<String> = TowerId::ALL
        .iter()
        .map(|tower| format!("{:^width$}", tower.label()))
        .collect();
    out.push_str(labels.join("  ").trim_end());
    out
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    let mut line = format!(
        "Moves: {} (min {}) | Efficiency: {:.0}% | Time: {}s",
        snapshot.move_count,
        snapshot.min_moves,
        snapshot.efficiency,
        snapshot.elapsed_ms / 1000
    );

    if snapshot.mode == GameMode::Multiplayer {
        for (player, stats) in snapshot.players.iter() {
            let _ = write!(line, " | {player}: {} moves, {} pts", stats.moves, stats.score);
        }
    }

    match snapshot.status {
        SessionStatus::Completed => line.push_str(" | Solved!"),
        _ if snapshot.auto_solving => {
            let _ = write!(line, " | Auto-solving ({} left)", snapshot.auto_solve_remaining);
        }
        _ if snapshot.mode == GameMode::Multiplayer => {
            let _ = write!(line, " | {} to move", snapshot.current_player);
        }
        _ => {}
    }
    line
}

/// One line for events the REPL does not already report in its replies.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::Game(GameEvent::MoveApplied {
            record,
            source: MoveSource::Solver,
            move_count,
        }) => Some(format!(
            "Solver moved disk {} from {} to {} (move {move_count})",
            record.disk, record.from, record.to
        )),
        Event::Game(GameEvent::AutoSolveStarted { total }) => {
            Some(format!("Auto-solving: {total} moves to go"))
        }
        Event::Game(GameEvent::AutoSolveFinished { won: false }) => {
            Some("Auto-solve stopped".to_owned())
        }
        Event::Game(GameEvent::InvalidMove { from, to, reason }) => {
            Some(format!("Cannot move {from} to {to}: {reason}"))
        }
        Event::Progress(ProgressEvent::AchievementUnlocked(id)) => Some(format!(
            "Achievement unlocked: {} {}: {}",
            id.icon(),
            id.title(),
            id.description()
        )),
        Event::Progress(ProgressEvent::GameWon(summary)) => Some(win(summary)),
        _ => None,
    }
}

pub fn win(summary: &WinSummary) -> String {
    let who = match summary.mode {
        GameMode::Single => "Puzzle solved".to_owned(),
        GameMode::Multiplayer => format!("{} wins", summary.winner),
    };
    format!(
        "{who}! {} moves (min {}), {}% efficiency, {}s, score {}",
        summary.moves,
        summary.min_moves,
        summary.efficiency,
        summary.elapsed_ms / 1000,
        summary.score
    )
}

pub fn achievements(unlocked: &[AchievementId]) -> String {
    let unlocked: BTreeSet<_> = unlocked.iter().copied().collect();
    AchievementId::iter()
        .map(|id| {
            let mark = if unlocked.contains(&id) { "x" } else { " " };
            format!("[{mark}] {} {}: {}", id.icon(), id.title(), id.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn saves(slots: &[(usize, SaveSlot)]) -> String {
    if slots.is_empty() {
        return "No saved games".to_owned();
    }
    slots
        .iter()
        .map(|(index, slot)| {
            format!(
                "{index}: {} ({} disks, {} moves, {}) saved {}",
                slot.name,
                slot.disk_count,
                slot.move_count(),
                slot.mode,
                format_timestamp(slot.saved_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats(stats: &CumulativeStats) -> String {
    format!(
        "Games played: {} | Undos: {} | Themes tried: {}",
        stats.games_played,
        stats.undo_count,
        stats.themes_used.len()
    )
}
