use std::io::Write;

use nix::sys::signal::Signal;

use crate::builtins::jobs::{parse_pid, signal_process};
use crate::builtins::{self, BuiltinCommand};
use crate::core::ProcessStatus;
use crate::errors::Result;
use crate::shell::Shell;

pub struct Kill;

impl BuiltinCommand for Kill {
    const NAME: &'static str = builtins::KILL_NAME;

    const HELP: &'static str = "\
kill: kill <pid>
    Terminate the process PID with SIGKILL.

    The process is marked TERMINATED right away and dropped from the table
    the next time it is listed.";

    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()> {
        let pid = parse_pid::<Self>(args)?;
        signal_process(shell, pid, Signal::SIGKILL, ProcessStatus::Terminated)?;
        writeln!(stdout, "Process with PID {} killed", pid)?;
        Ok(())
    }
}
