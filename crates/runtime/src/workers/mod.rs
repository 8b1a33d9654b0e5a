//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the single [`crate::session::GameSession`] and
//! paces auto-solve replay between client commands.

mod session;

pub use session::{Command, SessionWorker};
