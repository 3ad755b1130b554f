//! Data types shared by the shell: parsed commands and job entries.

pub mod command;
pub mod job;
pub mod parser;

pub use self::command::{Command, CommandBuilder};
pub use self::job::{JobEntry, JobId, ProcessId, ProcessStatus};
