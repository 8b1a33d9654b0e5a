//! Parses REPL lines into client commands.
//!
//! Keyboard and gesture translation stays here; the runtime only ever sees
//! intents such as "move the selected disk to tower C, source: gesture".
use hanoi_core::{GameMode, TowerId};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Pick up (or put back) the top disk of a tower.
    Select(TowerId),
    /// Move the selected disk.
    Move(TowerId),
    /// Select and move in one step.
    Transfer { from: TowerId, to: TowerId },
    /// Move the selected disk to the neighbouring tower.
    Swipe(Swipe),
    Undo,
    New(Option<u8>),
    Reset,
    Mode(GameMode),
    Solve,
    Step,
    Stop,
    Save(String),
    Saves,
    Load(usize),
    Delete(usize),
    Theme(String),
    Achievements,
    Stats,
    Show,
    Help,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

impl Swipe {
    /// Target tower for a swipe starting at `from`. Wraps around the ends.
    pub fn target(self, from: TowerId) -> TowerId {
        match self {
            Swipe::Left => from.left(),
            Swipe::Right => from.right(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a tower (use a, b, c or 1, 2, 3)")]
    InvalidTower(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' is not a mode (use single or multiplayer)")]
    InvalidMode(String),

    #[error("'{0}' is not a direction (use left or right)")]
    InvalidDirection(String),
}

pub const HELP: &str = "\
Commands:
  select <tower>        pick up or put back the top disk (a, b, c)
  move <tower>          move the selected disk
  mv <from> <to>        select and move in one step
  swipe <left|right>    move the selected disk to the next tower
  undo                  take back the last move
  new [disks]           start a new game
  reset                 restart with the same disks and mode
  mode <single|multiplayer>
  solve                 auto-solve from the current position
  step                  apply the next solver move now
  stop                  cancel auto-solve
  save <name>           store the current game
  saves                 list stored games
  load <index>          resume a stored game
  delete <index>        remove a stored game
  theme <name>          record a theme change
  achievements          list achievements
  stats                 lifetime statistics
  show                  redraw the board
  quit";

pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();
    let rest = words.collect::<Vec<_>>();

    let command = match head.as_str() {
        "select" | "s" => Command::Select(tower_arg(&rest, 0, "select")?),
        "move" | "m" => Command::Move(tower_arg(&rest, 0, "move")?),
        "mv" => Command::Transfer {
            from: tower_arg(&rest, 0, "mv")?,
            to: tower_arg(&rest, 1, "mv")?,
        },
        "swipe" => Command::Swipe(direction_arg(&rest)?),
        "undo" | "u" => Command::Undo,
        "new" => Command::New(rest.first().map(|word| number(word)).transpose()?),
        "reset" => Command::Reset,
        "mode" => {
            let word = required(&rest, 0, "mode", "single or multiplayer")?;
            Command::Mode(
                word.parse()
                    .map_err(|_| ParseError::InvalidMode(word.to_owned()))?,
            )
        }
        "solve" => Command::Solve,
        "step" => Command::Step,
        "stop" => Command::Stop,
        "save" => Command::Save(text_arg(&rest, "save", "a name")?),
        "saves" => Command::Saves,
        "load" => Command::Load(number(required(&rest, 0, "load", "a slot index")?)?),
        "delete" => Command::Delete(number(required(&rest, 0, "delete", "a slot index")?)?),
        "theme" => Command::Theme(text_arg(&rest, "theme", "a name")?),
        "achievements" => Command::Achievements,
        "stats" => Command::Stats,
        "show" | "board" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}

pub fn parse_tower(word: &str) -> Option<TowerId> {
    match word.to_ascii_lowercase().as_str() {
        "a" | "1" => Some(TowerId::A),
        "b" | "2" => Some(TowerId::B),
        "c" | "3" => Some(TowerId::C),
        _ => None,
    }
}

fn required<'a>(
    rest: &[&'a str],
    index: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseError> {
    rest.get(index)
        .copied()
        .ok_or(ParseError::MissingArgument { command, expected })
}

fn tower_arg(rest: &[&str], index: usize, command: &'static str) -> Result<TowerId, ParseError> {
    let word = required(rest, index, command, "a tower")?;
    parse_tower(word).ok_or_else(|| ParseError::InvalidTower(word.to_owned()))
}

fn direction_arg(rest: &[&str]) -> Result<Swipe, ParseError> {
    let word = required(rest, 0, "swipe", "left or right")?;
    match word.to_ascii_lowercase().as_str() {
        "left" | "l" => Ok(Swipe::Left),
        "right" | "r" => Ok(Swipe::Right),
        _ => Err(ParseError::InvalidDirection(word.to_owned())),
    }
}

/// Names may contain spaces.
fn text_arg(rest: &[&str], command: &'static str, expected: &'static str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command, expected });
    }
    Ok(rest.join(" "))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn parses_moves() {
        assert_eq!(parse("select A"), Ok(Some(Command::Select(TowerId::A))));
        assert_eq!(parse("m 3"), Ok(Some(Command::Move(TowerId::C))));
        assert_eq!(
            parse("mv a c"),
            Ok(Some(Command::Transfer {
                from: TowerId::A,
                to: TowerId::C
            }))
        );
        assert_eq!(parse("swipe right"), Ok(Some(Command::Swipe(Swipe::Right))));
    }

    #[test]
    fn swipes_wrap_around() {
        assert_eq!(Swipe::Right.target(TowerId::C), TowerId::A);
        assert_eq!(Swipe::Left.target(TowerId::A), TowerId::C);
        assert_eq!(Swipe::Right.target(TowerId::A), TowerId::B);
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse("new"), Ok(Some(Command::New(None))));
        assert_eq!(parse("new 5"), Ok(Some(Command::New(Some(5)))));
        assert_eq!(
            parse("mode multiplayer"),
            Ok(Some(Command::Mode(GameMode::Multiplayer)))
        );
        assert_eq!(
            parse("save before the end"),
            Ok(Some(Command::Save("before the end".into())))
        );
        assert_eq!(parse("load 2"), Ok(Some(Command::Load(2))));
        assert_eq!(parse("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn reports_bad_arguments() {
        assert_eq!(
            parse("move"),
            Err(ParseError::MissingArgument {
                command: "move",
                expected: "a tower"
            })
        );
        assert_eq!(parse("move d"), Err(ParseError::InvalidTower("d".into())));
        assert_eq!(parse("load x"), Err(ParseError::InvalidNumber("x".into())));
        assert_eq!(parse("mode coop"), Err(ParseError::InvalidMode("coop".into())));
        assert_eq!(parse("jump"), Err(ParseError::Unknown("jump".into())));
    }
}
