use std::sync::Arc;

use hanoi_core::{
    AchievementId, Disk, ExecuteError, GameConfig, GameMode, MoveError, MoveSource, PlayerId,
    SaveSlot, SelectOutcome, SessionStatus, Timestamp, TowerId, score_state,
};

use super::*;
use crate::clock::ManualClock;
use crate::events::{Event, GameEvent, ProgressEvent};
use crate::repository::SessionStores;

fn open(disks: u8, mode: GameMode) -> (GameSession, ManualClock, SessionStores) {
    let clock = ManualClock::new(Timestamp(10_000));
    let stores = SessionStores::in_memory();
    let config = GameConfig::with_disk_count(disks).unwrap();
    let session = GameSession::new(&config, mode, stores.clone(), Arc::new(clock.clone())).unwrap();
    (session, clock, stores)
}

fn move_disk(session: &mut GameSession, from: TowerId, to: TowerId) {
    let disk = session.state().board().top(from).unwrap();
    session.select_disk(from, disk).unwrap();
    session.attempt_move(to).unwrap();
}

fn unlocked(events: &[Event]) -> Vec<AchievementId> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Progress(ProgressEvent::AchievementUnlocked(id)) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn move_without_selection_is_rejected() {
    let (mut session, _, _) = open(3, GameMode::Single);

    let error = session.attempt_move(TowerId::B).unwrap_err();
    assert!(matches!(error, SessionError::NoSelection));
    assert_eq!(session.state().move_count(), 0);
    assert!(session.take_events().is_empty());
}

#[test]
fn selecting_twice_clears_the_selection() {
    let (mut session, _, _) = open(3, GameMode::Single);

    let first = session.select_disk(TowerId::A, Disk(1)).unwrap();
    assert!(matches!(first, SelectOutcome::Selected(_)));
    let second = session.select_disk(TowerId::A, Disk(1)).unwrap();
    assert_eq!(second, SelectOutcome::Cleared);
    assert_eq!(session.state().selection(), None);

    let events = session.take_events();
    assert_eq!(
        events.last(),
        Some(&Event::Game(GameEvent::DiskSelected { selection: None }))
    );
}

#[test]
fn illegal_move_publishes_invalid_move_and_keeps_selection() {
    let (mut session, _, _) = open(3, GameMode::Single);
    move_disk(&mut session, TowerId::A, TowerId::B);
    session.take_events();

    session.select_disk(TowerId::A, Disk(2)).unwrap();
    let error = session.attempt_move(TowerId::B).unwrap_err();

    assert!(error.is_illegal_move());
    assert!(matches!(
        error,
        SessionError::Execute(ExecuteError::Move(ref phase))
            if matches!(phase.error, MoveError::DiskTooLarge { .. })
    ));
    let selection = session.state().selection().unwrap();
    assert_eq!((selection.tower, selection.disk), (TowerId::A, Disk(2)));
    assert_eq!(session.state().move_count(), 1);

    let events = session.take_events();
    assert!(matches!(
        events.last(),
        Some(Event::Game(GameEvent::InvalidMove {
            from: TowerId::A,
            to: TowerId::B,
            ..
        }))
    ));
}

#[test]
fn gesture_moves_unlock_gesture_guru_once() {
    let (mut session, _, _) = open(3, GameMode::Single);

    session.select_disk(TowerId::A, Disk(1)).unwrap();
    let outcome = session
        .attempt_move_via(TowerId::B, MoveSource::Gesture)
        .unwrap();
    assert_eq!(outcome.source, MoveSource::Gesture);
    assert_eq!(unlocked(&session.take_events()), vec![AchievementId::GestureGuru]);

    session.select_disk(TowerId::B, Disk(1)).unwrap();
    session
        .attempt_move_via(TowerId::C, MoveSource::Gesture)
        .unwrap();
    assert!(unlocked(&session.take_events()).is_empty());
    assert!(session.achievements().contains(&AchievementId::GestureGuru));
}

#[test]
fn undo_refreshes_the_movers_score() {
    let (mut session, clock, _) = open(3, GameMode::Multiplayer);
    move_disk(&mut session, TowerId::A, TowerId::C);
    assert_eq!(session.state().current_player(), PlayerId::Two);

    clock.advance(5_000);
    let record = session.undo().unwrap();

    assert_eq!(record.player, PlayerId::One);
    assert_eq!(session.state().current_player(), PlayerId::One);
    let stats = session.state().players()[PlayerId::One];
    assert_eq!(stats.moves, 0);
    assert_eq!(stats.score, score_state(session.state(), clock.now()));
    assert_eq!(session.stats().undo_count, 1);

    let events = session.take_events();
    assert!(events.contains(&Event::Game(GameEvent::MoveUndone {
        record,
        move_count: 0
    })));
}

#[test]
fn auto_solve_plays_to_a_win() {
    let (mut session, _, stores) = open(3, GameMode::Single);

    assert_eq!(session.start_auto_solve().unwrap(), 7);
    assert!(session.is_auto_solving());
    assert_eq!(session.snapshot().auto_solve_remaining, 7);

    let mut last = None;
    while session.is_auto_solving() {
        last = Some(session.step_auto_solve().unwrap());
    }

    let Some(ReplayStep::Applied { outcome, remaining }) = last else {
        panic!("expected a final applied step, got {last:?}");
    };
    assert!(outcome.won());
    assert_eq!(remaining, 0);
    assert_eq!(session.state().status(), SessionStatus::Completed);
    assert_eq!(session.state().move_count(), 7);

    let events = session.take_events();
    assert!(events.contains(&Event::Game(GameEvent::AutoSolveFinished { won: true })));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::Progress(ProgressEvent::GameWon(_))))
    );
    let ids = unlocked(&events);
    assert!(ids.contains(&AchievementId::FirstWin));
    assert!(ids.contains(&AchievementId::EfficiencyMaster));

    assert_eq!(stores.stats.load().unwrap().games_played, 1);
    assert!(matches!(
        session.step_auto_solve(),
        Err(SessionError::ReplayInactive)
    ));
}

#[test]
fn auto_solve_resumes_from_a_partial_game() {
    let (mut session, _, _) = open(3, GameMode::Single);
    move_disk(&mut session, TowerId::A, TowerId::C);

    let total = session.start_auto_solve().unwrap();
    assert_eq!(total, 6);
    while session.is_auto_solving() {
        session.step_auto_solve().unwrap();
    }
    assert!(session.state().is_completed());
}

#[test]
fn human_intents_are_refused_during_auto_solve() {
    let (mut session, _, _) = open(3, GameMode::Single);
    session.start_auto_solve().unwrap();

    assert!(matches!(
        session.select_disk(TowerId::A, Disk(1)),
        Err(SessionError::ReplayActive)
    ));
    assert!(matches!(session.undo(), Err(SessionError::ReplayActive)));
    assert!(matches!(session.new_game(4), Err(SessionError::ReplayActive)));
    assert!(matches!(
        session.start_auto_solve(),
        Err(SessionError::ReplayActive)
    ));

    // Saving is not a board change.
    assert!(session.save_session("mid-replay").is_ok());
    assert!(session.is_auto_solving());
}

#[test]
fn reset_stops_auto_solve() {
    let (mut session, _, _) = open(3, GameMode::Single);
    session.start_auto_solve().unwrap();
    session.step_auto_solve().unwrap();
    session.take_events();

    session.reset_game();

    assert!(!session.is_auto_solving());
    assert_eq!(session.state().move_count(), 0);
    assert_eq!(session.state().status(), SessionStatus::NotStarted);
    let events = session.take_events();
    assert_eq!(
        events,
        vec![
            Event::Game(GameEvent::AutoSolveFinished { won: false }),
            Event::Game(GameEvent::GameReset {
                disk_count: 3,
                mode: GameMode::Single
            }),
        ]
    );
}

#[test]
fn cancel_reports_whether_a_replay_was_running() {
    let (mut session, _, _) = open(3, GameMode::Single);
    assert!(!session.cancel_auto_solve());
    session.start_auto_solve().unwrap();
    assert!(session.cancel_auto_solve());
    assert!(!session.is_auto_solving());
}

#[test]
fn auto_solve_refused_on_a_solved_board() {
    let (mut session, _, _) = open(1, GameMode::Single);
    move_disk(&mut session, TowerId::A, TowerId::C);
    assert!(session.state().is_completed());

    assert!(matches!(
        session.start_auto_solve(),
        Err(SessionError::GameCompleted)
    ));
}

#[test]
fn new_game_validates_disk_count() {
    let (mut session, _, _) = open(3, GameMode::Multiplayer);

    assert!(matches!(session.new_game(0), Err(SessionError::Config(_))));
    assert_eq!(session.state().disk_count(), 3);

    session.new_game(5).unwrap();
    assert_eq!(session.state().disk_count(), 5);
    assert_eq!(session.state().mode(), GameMode::Multiplayer);
}

#[test]
fn save_and_load_round_trip() {
    let (mut session, _, _) = open(3, GameMode::Single);
    move_disk(&mut session, TowerId::A, TowerId::C);

    assert!(matches!(
        session.save_session("   "),
        Err(SessionError::MissingSaveName)
    ));
    let slot = session.save_session(" checkpoint ").unwrap();
    assert_eq!(slot.name, "checkpoint");
    assert!(session.achievements().contains(&AchievementId::SaveMaster));

    move_disk(&mut session, TowerId::A, TowerId::B);
    assert_eq!(session.state().move_count(), 2);

    assert_eq!(session.load_saved(0).unwrap(), "checkpoint");
    assert_eq!(session.state().move_count(), 1);
    assert_eq!(session.state().board().top(TowerId::C), Some(Disk(1)));

    assert!(matches!(
        session.load_saved(5),
        Err(SessionError::SlotNotFound { index: 5 })
    ));
    assert_eq!(session.list_saves().unwrap().len(), 1);
    assert_eq!(session.delete_save(0).unwrap().name, "checkpoint");
    assert!(session.list_saves().unwrap().is_empty());
}

#[test]
fn rejected_slot_leaves_session_untouched() {
    let (mut session, clock, _) = open(3, GameMode::Single);
    move_disk(&mut session, TowerId::A, TowerId::B);
    let before = session.state().clone();

    let mut slot = SaveSlot::capture("broken", session.state(), clock.now());
    slot.towers = [vec![3, 2], vec![1], vec![1]];
    session.take_events();

    assert!(matches!(
        session.load_session(&slot),
        Err(SessionError::Integrity(_))
    ));
    assert_eq!(session.state(), &before);
    assert!(session.take_events().is_empty());
}

#[test]
fn themes_count_distinct_trimmed_names() {
    let (mut session, _, stores) = open(3, GameMode::Single);

    assert!(matches!(
        session.apply_theme("  "),
        Err(SessionError::MissingThemeName)
    ));
    for name in ["classic", " classic ", "ocean", "forest", "sunset"] {
        session.apply_theme(name).unwrap();
    }
    assert!(!session.achievements().contains(&AchievementId::ThemeExplorer));

    session.apply_theme("neon").unwrap();
    assert!(session.achievements().contains(&AchievementId::ThemeExplorer));
    assert_eq!(stores.stats.load().unwrap().themes_used.len(), 5);
}

#[test]
fn achievements_survive_a_new_session() {
    let (mut session, _, stores) = open(3, GameMode::Single);
    session.apply_theme("classic").unwrap();
    session.save_session("one").unwrap();

    let reopened = GameSession::new(
        &GameConfig::default(),
        GameMode::Single,
        stores,
        Arc::new(ManualClock::default()),
    )
    .unwrap();
    assert_eq!(reopened.achievements(), vec![AchievementId::SaveMaster]);
    assert!(reopened.stats().themes_used.contains("classic"));
}

#[test]
fn dispatch_routes_intents() {
    let (mut session, _, _) = open(2, GameMode::Single);

    let outcome = session
        .dispatch(Intent::SelectDisk {
            tower: TowerId::A,
            disk: Disk(1),
        })
        .unwrap();
    assert!(matches!(outcome, IntentOutcome::Selected(_)));

    let outcome = session
        .dispatch(Intent::AttemptMove {
            target: TowerId::B,
            source: MoveSource::Manual,
        })
        .unwrap();
    assert!(matches!(outcome, IntentOutcome::Moved(_)));

    let outcome = session
        .dispatch(Intent::SaveSession {
            name: "two".into(),
        })
        .unwrap();
    assert!(matches!(outcome, IntentOutcome::Saved { index: 0, .. }));

    let outcome = session.dispatch(Intent::StartAutoSolve).unwrap();
    assert_eq!(outcome, IntentOutcome::AutoSolveStarted { total: 2 });

    let outcome = session.dispatch(Intent::ResetGame).unwrap();
    assert_eq!(outcome, IntentOutcome::Reset);
    assert!(!session.is_auto_solving());
}
