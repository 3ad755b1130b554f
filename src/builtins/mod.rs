//! Msh builtins
//!
//! Directives the shell handles itself instead of launching a program. They
//! are recognized by the first word of the line.

use std::io::Write;

use crate::errors::{Error, ErrorKind, Result};
use crate::shell::Shell;

use self::dirs::Cd;
use self::exit::Quit;
use self::history::History;
use self::jobs::{Procs, Suspend, Wake};
use self::kill::Kill;

mod dirs;
mod exit;
mod history;
mod jobs;
mod kill;

const CD_NAME: &str = "cd";
const HISTORY_NAME: &str = "history";
const KILL_NAME: &str = "kill";
const PROCS_NAME: &str = "procs";
const QUIT_NAME: &str = "quit";
const SUSPEND_NAME: &str = "suspend";
const WAKE_NAME: &str = "wake";

/// Represents a Msh builtin command such as cd or procs.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> String {
        Self::HELP.lines().next().unwrap_or(Self::NAME).to_owned()
    }
    /// Runs the command with the given arguments in the `shell` environment.
    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    [
        CD_NAME,
        HISTORY_NAME,
        KILL_NAME,
        PROCS_NAME,
        QUIT_NAME,
        SUSPEND_NAME,
        WAKE_NAME,
    ]
    .contains(&program.as_ref())
}

/// precondition: `argv[0]` is a builtin.
/// Returns (`exit_status_code`, `builtin_result`)
pub fn run(shell: &mut Shell, argv: &[String], stdout: &mut dyn Write) -> (i32, Result<()>) {
    debug_assert!(is_builtin(&argv[0]));
    let args = &argv[1..];

    let result = match argv[0].as_str() {
        CD_NAME => Cd::run(shell, args, stdout),
        HISTORY_NAME => History::run(shell, args, stdout),
        KILL_NAME => Kill::run(shell, args, stdout),
        PROCS_NAME => Procs::run(shell, args, stdout),
        QUIT_NAME => Quit::run(shell, args, stdout),
        SUSPEND_NAME => Suspend::run(shell, args, stdout),
        WAKE_NAME => Wake::run(shell, args, stdout),
        _ => unreachable!(),
    };

    let exit_status = get_builtin_exit_status(&result);
    (exit_status, result)
}

/// Builtins take their arguments from the whole line, so pipes and redirects
/// after them show up here as extra words.
fn check_arg_count<B: BuiltinCommand>(args: &[String], max: usize) -> Result<()> {
    if args.len() > max {
        return Err(Error::usage(format!("{}: too many arguments", B::NAME), 2));
    }
    Ok(())
}

fn get_builtin_exit_status(result: &Result<()>) -> i32 {
    if let Err(ref e) = *result {
        match *e.kind() {
            ErrorKind::Usage(_, code) => code,
            _ => 1,
        }
    } else {
        0
    }
}
