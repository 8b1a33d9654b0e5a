use std::time::Duration;

use hanoi_core::{AchievementId, Disk, GameConfig, GameMode, MoveSource, SessionStatus, TowerId};
use hanoi_runtime::{
    Event, GameEvent, ManualClock, ProgressEvent, Runtime, RuntimeConfig, RuntimeError,
    SessionError, Topic,
};
use tokio::time::timeout;

fn config(disks: u8, auto_solve_delay: Duration) -> RuntimeConfig {
    RuntimeConfig {
        game_config: GameConfig::with_disk_count(disks).unwrap(),
        auto_solve_delay,
        ..RuntimeConfig::default()
    }
}

async fn start(config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .config(config)
        .clock(ManualClock::default())
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn paced_auto_solve_ends_with_game_won() {
    let runtime = start(config(3, Duration::from_millis(1))).await;
    let handle = runtime.handle();
    let mut progress = handle.subscribe(Topic::Progress);

    assert_eq!(handle.start_auto_solve().await.unwrap(), 7);

    let summary = timeout(Duration::from_secs(5), async {
        loop {
            match progress.recv().await.unwrap() {
                Event::Progress(ProgressEvent::GameWon(summary)) => break summary,
                _ => continue,
            }
        }
    })
    .await
    .expect("auto-solve should finish");

    assert_eq!(summary.moves, 7);
    assert_eq!(summary.min_moves, 7);
    assert_eq!(summary.efficiency, 100);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Completed);
    assert!(!snapshot.auto_solving);
    assert_eq!(snapshot.towers, [Vec::<u8>::new(), Vec::new(), vec![3, 2, 1]]);

    let achievements = handle.achievements().await.unwrap();
    assert!(achievements.contains(&AchievementId::FirstWin));
    assert!(achievements.contains(&AchievementId::EfficiencyMaster));
    assert_eq!(handle.stats().await.unwrap().games_played, 1);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn moves_are_refused_while_replay_runs() {
    let runtime = start(config(4, Duration::from_secs(3600))).await;
    let handle = runtime.handle();

    handle.start_auto_solve().await.unwrap();
    let error = handle.undo().await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Session(SessionError::ReplayActive)
    ));

    // Queries and saves stay available.
    assert!(handle.snapshot().await.unwrap().auto_solving);
    handle.save_session("during replay").await.unwrap();

    assert!(handle.cancel_auto_solve().await.unwrap());
    assert!(!handle.snapshot().await.unwrap().auto_solving);
}

#[tokio::test]
async fn manual_play_through_the_handle() {
    let runtime = start(config(2, RuntimeConfig::DEFAULT_AUTO_SOLVE_DELAY)).await;
    let handle = runtime.handle();
    let mut game = handle.subscribe(Topic::Game);

    handle.select_disk(TowerId::A, Disk(1)).await.unwrap();
    let error = handle.attempt_move(TowerId::A).await.unwrap_err();
    assert!(error.as_session().is_some_and(SessionError::is_illegal_move));

    handle
        .attempt_move_via(TowerId::B, MoveSource::Gesture)
        .await
        .unwrap();
    handle.select_disk(TowerId::A, Disk(2)).await.unwrap();
    handle.attempt_move(TowerId::C).await.unwrap();
    handle.select_disk(TowerId::B, Disk(1)).await.unwrap();
    let outcome = handle.attempt_move(TowerId::C).await.unwrap();
    assert!(outcome.won());

    let achievements = handle.achievements().await.unwrap();
    assert!(achievements.contains(&AchievementId::GestureGuru));
    assert!(!achievements.contains(&AchievementId::SpeedDemon));

    // The query above was handled after every earlier event was published.
    let mut moves = 0;
    let mut invalid = 0;
    while let Ok(event) = game.try_recv() {
        match event {
            Event::Game(GameEvent::MoveApplied { .. }) => moves += 1,
            Event::Game(GameEvent::InvalidMove { .. }) => invalid += 1,
            _ => {}
        }
    }
    assert_eq!((moves, invalid), (3, 1));
}

#[tokio::test]
async fn mode_change_and_save_slots() {
    let runtime = start(config(3, RuntimeConfig::DEFAULT_AUTO_SOLVE_DELAY)).await;
    let handle = runtime.handle();

    handle.set_mode(GameMode::Multiplayer).await.unwrap();
    handle.select_disk(TowerId::A, Disk(1)).await.unwrap();
    handle.attempt_move(TowerId::C).await.unwrap();

    let slot = handle.save_session("duel").await.unwrap();
    assert_eq!(slot.move_count(), 1);
    assert_eq!(handle.list_saves().await.unwrap().len(), 1);

    handle.new_game(5).await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().disk_count, 5);

    assert_eq!(handle.load_saved(0).await.unwrap(), "duel");
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.disk_count, 3);
    assert_eq!(snapshot.mode, GameMode::Multiplayer);
    assert_eq!(snapshot.move_count, 1);

    let missing = handle.delete_save(3).await.unwrap_err();
    assert!(matches!(
        missing,
        RuntimeError::Session(SessionError::SlotNotFound { index: 3 })
    ));
    assert_eq!(handle.delete_save(0).await.unwrap().name, "duel");
}

#[tokio::test]
async fn shutdown_closes_the_command_channel() {
    let runtime = start(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    drop(handle);
    runtime.shutdown().await.unwrap();
}
