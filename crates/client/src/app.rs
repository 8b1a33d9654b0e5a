//! Line-based REPL driving a [`Runtime`].
//!
//! Replies to commands are printed inline. Events the REPL cannot see in its
//! own replies (solver moves, unlocks, wins) are printed by a background
//! task subscribed to both topics.
use std::io::Write as _;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use hanoi_core::{Disk, ErrorSeverity, GameError, MoveSource, SelectOutcome, TowerId};
use hanoi_runtime::{Event, GameEvent, Runtime, RuntimeError, RuntimeHandle, Topic};

use crate::command::{self, Command, HELP};
use crate::config::ClientConfig;
use crate::render;

pub struct App {
    runtime: Runtime,
    handle: RuntimeHandle,
    printer: JoinHandle<()>,
}

impl App {
    pub async fn start(config: ClientConfig) -> Result<Self> {
        let runtime = Runtime::builder()
            .config(config.runtime_config()?)
            .stores(config.stores())
            .build()
            .await?;

        info!(
            persistence = config.enable_persistence,
            data_dir = %config.data_dir().display(),
            "Runtime built"
        );

        let handle = runtime.handle();
        let printer = tokio::spawn(print_events(handle.clone()));

        Ok(Self {
            runtime,
            handle,
            printer,
        })
    }

    pub async fn run(self) -> Result<()> {
        println!("Towers of Hanoi. Type 'help' for commands.");
        self.show().await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(error) => {
                    println!("{error}");
                    continue;
                }
            };

            if let Err(error) = self.execute(command).await {
                if error.severity() == ErrorSeverity::Fatal {
                    return Err(error.into());
                }
                println!("{error}");
            }
        }

        info!("Shutting down");
        self.printer.abort();
        drop(self.handle);
        self.runtime.shutdown().await?;
        Ok(())
    }

    async fn execute(&self, command: Command) -> hanoi_runtime::Result<()> {
        let handle = &self.handle;
        match command {
            Command::Select(tower) => {
                let Some(disk) = self.top_disk(tower).await? else {
                    println!("Tower {tower} is empty");
                    return Ok(());
                };
                match handle.select_disk(tower, disk).await? {
                    SelectOutcome::Selected(_) => println!("Picked up disk {disk} from {tower}"),
                    SelectOutcome::Cleared => println!("Put disk {disk} back on {tower}"),
                }
                self.show().await?;
            }
            Command::Move(target) => {
                handle.attempt_move(target).await?;
                self.show().await?;
            }
            Command::Transfer { from, to } => {
                let Some(disk) = self.top_disk(from).await? else {
                    println!("Tower {from} is empty");
                    return Ok(());
                };
                let selection = handle.snapshot().await?.selection;
                if selection.is_none_or(|selection| selection.tower != from) {
                    handle.select_disk(from, disk).await?;
                }
                handle.attempt_move(to).await?;
                self.show().await?;
            }
            Command::Swipe(swipe) => {
                let Some(selection) = handle.snapshot().await?.selection else {
                    println!("Select a disk first");
                    return Ok(());
                };
                handle
                    .attempt_move_via(swipe.target(selection.tower), MoveSource::Gesture)
                    .await?;
                self.show().await?;
            }
            Command::Undo => {
                let record = handle.undo().await?;
                println!(
                    "Undid disk {} from {} to {}",
                    record.disk, record.from, record.to
                );
                self.show().await?;
            }
            Command::New(disks) => {
                let disks = match disks {
                    Some(disks) => disks,
                    None => handle.snapshot().await?.disk_count,
                };
                handle.new_game(disks).await?;
                self.show().await?;
            }
            Command::Reset => {
                handle.reset_game().await?;
                self.show().await?;
            }
            Command::Mode(mode) => {
                handle.set_mode(mode).await?;
                println!("Mode: {mode}");
                self.show().await?;
            }
            Command::Solve => {
                handle.start_auto_solve().await?;
            }
            Command::Step => {
                handle.step_auto_solve().await?;
            }
            Command::Stop => {
                if !handle.cancel_auto_solve().await? {
                    println!("Auto-solve is not running");
                }
            }
            Command::Save(name) => {
                let slot = handle.save_session(name).await?;
                println!("Saved '{}' ({} moves)", slot.name, slot.move_count());
            }
            Command::Saves => println!("{}", render::saves(&handle.list_saves().await?)),
            Command::Load(index) => {
                let name = handle.load_saved(index).await?;
                println!("Loaded '{name}'");
                self.show().await?;
            }
            Command::Delete(index) => {
                let slot = handle.delete_save(index).await?;
                println!("Deleted '{}'", slot.name);
            }
            Command::Theme(name) => {
                handle.apply_theme(name.as_str()).await?;
                println!("Theme: {}", name.trim());
            }
            Command::Achievements => {
                println!("{}", render::achievements(&handle.achievements().await?));
            }
            Command::Stats => println!("{}", render::stats(&handle.stats().await?)),
            Command::Show => self.show().await?,
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    async fn top_disk(&self, tower: TowerId) -> hanoi_runtime::Result<Option<Disk>> {
        let snapshot = self.handle.snapshot().await?;
        Ok(snapshot.towers[tower.index()].last().copied().map(Disk))
    }

    async fn show(&self) -> hanoi_runtime::Result<()> {
        show(&self.handle).await
    }
}

async fn show(handle: &RuntimeHandle) -> hanoi_runtime::Result<()> {
    let snapshot = handle.snapshot().await?;
    println!("{}", render::board(&snapshot));
    println!("{}", render::status(&snapshot));
    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn print_events(handle: RuntimeHandle) {
    let mut game = handle.subscribe(Topic::Game);
    let mut progress = handle.subscribe(Topic::Progress);

    loop {
        let received = tokio::select! {
            event = game.recv() => event,
            event = progress.recv() => event,
        };

        let event = match received {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event printer lagged behind");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        if let Some(line) = render::event_line(&event) {
            println!("{line}");
        }
        let solver_move = matches!(
            event,
            Event::Game(GameEvent::MoveApplied {
                source: MoveSource::Solver,
                ..
            })
        );
        if solver_move {
            if let Err(error) = show(&handle).await {
                report(&error);
            }
        }
    }
}

fn report(error: &RuntimeError) {
    warn!(code = error.error_code(), %error, "Could not redraw the board");
}
