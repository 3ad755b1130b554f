use std::io::Write;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::builtins::{self, BuiltinCommand};
use crate::core::{ProcessId, ProcessStatus};
use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::shell::job_control::JobRow;
use crate::shell::Shell;

pub struct Procs;

impl BuiltinCommand for Procs {
    const NAME: &'static str = builtins::PROCS_NAME;

    const HELP: &'static str = "\
procs: procs
    Display every process started by the shell with its current status.
    Terminated processes are listed once, then forgotten.";

    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()> {
        builtins::check_arg_count::<Self>(args, 0)?;

        let failures = shell.jobs_mut().reconcile();
        for e in &failures {
            shell.report(e);
        }

        writeln!(stdout, "{}", JobRow::HEADER)?;
        for row in shell.jobs_mut().take_rows() {
            writeln!(stdout, "{}", row)?;
        }

        Ok(())
    }
}

pub struct Suspend;

impl BuiltinCommand for Suspend {
    const NAME: &'static str = builtins::SUSPEND_NAME;

    const HELP: &'static str = "\
suspend: suspend <pid>
    Stop the process PID with SIGTSTP.";

    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()> {
        let pid = parse_pid::<Self>(args)?;
        signal_process(shell, pid, Signal::SIGTSTP, ProcessStatus::Suspended)?;
        writeln!(stdout, "Process with PID {} suspended", pid)?;
        Ok(())
    }
}

pub struct Wake;

impl BuiltinCommand for Wake {
    const NAME: &'static str = builtins::WAKE_NAME;

    const HELP: &'static str = "\
wake: wake <pid>
    Resume the stopped process PID with SIGCONT.";

    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()> {
        let pid = parse_pid::<Self>(args)?;
        signal_process(shell, pid, Signal::SIGCONT, ProcessStatus::Running)?;
        writeln!(stdout, "Process with PID {} woke up", pid)?;
        Ok(())
    }
}

/// Reads the single positive pid argument of a signal builtin.
///
/// Zero and negative values are refused since `kill(2)` would address a
/// whole process group.
pub(super) fn parse_pid<B: BuiltinCommand>(args: &[String]) -> Result<ProcessId> {
    builtins::check_arg_count::<B>(args, 1)?;
    match args.first().map(|arg| arg.parse::<i32>()) {
        Some(Ok(pid)) if pid > 0 => Ok(ProcessId::from(pid)),
        Some(_) => Err(Error::usage(
            format!("{}: {}: pid must be a positive integer", B::NAME, args[0]),
            2,
        )),
        None => Err(Error::usage(format!("usage: {}", B::usage()), 2)),
    }
}

/// Sends `sig` to `pid`, then records `status` for it in the job table.
pub(super) fn signal_process(
    shell: &mut Shell,
    pid: ProcessId,
    sig: Signal,
    status: ProcessStatus,
) -> Result<()> {
    debug!("sending {} to {}", sig, pid);
    signal::kill(Pid::from(pid), sig)
        .chain_err(|| ErrorKind::Signal(pid.as_raw(), sig.as_str().to_string()))?;
    shell.jobs_mut().set_status(pid, status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::builtins::kill::Kill;
    use crate::shell::ShellConfig;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn output_of<B: BuiltinCommand>(shell: &mut Shell, words: &[&str]) -> String {
        let mut out = Vec::new();
        B::run(shell, &args(words), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn status_of(shell: &Shell, pid: ProcessId) -> Option<ProcessStatus> {
        shell.jobs().get(pid).map(|job| job.status())
    }

    fn assert_usage(result: Result<()>) {
        match result {
            Err(e) => match *e.kind() {
                ErrorKind::Usage(_, 2) => {}
                ref other => panic!("unexpected error kind: {:?}", other),
            },
            Ok(()) => panic!("expected a usage error"),
        }
    }

    #[test]
    fn bad_pid_arguments_are_usage_errors() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        for words in &[&[][..], &["abc"][..], &["0"][..], &["-1"][..]] {
            assert_usage(Suspend::run(&mut shell, &args(words), &mut Vec::new()));
            assert_usage(Wake::run(&mut shell, &args(words), &mut Vec::new()));
        }
    }

    #[test]
    fn failed_signal_keeps_status() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        // pid_max on Linux is at most 2^22, so this pid cannot exist
        let result = Suspend::run(&mut shell, &args(&["2147483000"]), &mut Vec::new());
        match result {
            Err(e) => match *e.kind() {
                ErrorKind::Signal(2_147_483_000, ref name) => assert_eq!(name, "SIGTSTP"),
                ref other => panic!("unexpected error kind: {:?}", other),
            },
            Ok(()) => panic!("signalling a missing pid succeeded"),
        }
        assert!(shell.jobs().is_empty());
    }

    #[test]
    fn empty_table_lists_header_only() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        assert_eq!(
            output_of::<Procs>(&mut shell, &[]),
            "Index\tPID\tStatus\t\tCommand\n"
        );
    }

    #[test]
    fn suspend_wake_kill_background_process() {
        let mut shell = Shell::new(ShellConfig::noninteractive());
        shell.execute_command_string("sleep 30 &").unwrap();
        let pid = shell.jobs().iter().next().unwrap().pid();
        let raw = pid.to_string();

        assert_eq!(
            output_of::<Suspend>(&mut shell, &[&raw]),
            format!("Process with PID {} suspended\n", pid)
        );
        assert_eq!(status_of(&shell, pid), Some(ProcessStatus::Suspended));

        assert_eq!(
            output_of::<Wake>(&mut shell, &[&raw]),
            format!("Process with PID {} woke up\n", pid)
        );
        assert_eq!(status_of(&shell, pid), Some(ProcessStatus::Running));

        assert_eq!(
            output_of::<Kill>(&mut shell, &[&raw]),
            format!("Process with PID {} killed\n", pid)
        );
        assert_eq!(status_of(&shell, pid), Some(ProcessStatus::Terminated));

        // give the kernel a moment so the listing reaps the child
        thread::sleep(Duration::from_millis(50));
        let listing = output_of::<Procs>(&mut shell, &[]);
        assert_eq!(
            listing,
            format!(
                "Index\tPID\tStatus\t\tCommand\n0     \t{:<6}\tTERMINATED\tsleep 30\n",
                pid
            )
        );
        assert!(shell.jobs().is_empty());
    }
}
