//! Launches a command as one child process, or two children joined by a pipe,
//! and registers every child with the job table.
//!
//! Between `fork` and `exec` the child only calls async-signal-safe functions
//! and never allocates: the C strings, the null-terminated argument array and
//! the descriptors are all prepared by the parent.

use std::ffi::CString;
use std::fs::File;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::ptr;

use nix::errno::Errno;
use nix::fcntl::{self, OFlag};
use nix::libc;
use nix::sys::stat::Mode;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::core::{Command, ProcessId};
use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::shell::job_control::JobTable;

const EXEC_FAILURE_EXIT_STATUS: i32 = 127;
const REDIRECT_FAILURE_EXIT_STATUS: i32 = 1;

/// How far the launch of a pipeline got; decides which pipe ends are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NoPipe,
    PipeCreated,
    Stage1Launched,
    Stage2Launched,
    PipeClosed,
}

#[derive(Debug)]
struct Pipe {
    read_end: File,
    write_end: File,
}

/// Owns the pipe shared by a two-stage pipeline.
///
/// Both ends are close-on-exec, so they only survive into a child through the
/// `dup2` onto its standard stream. Dropping `Plumbing` closes whatever the
/// parent still holds.
#[derive(Debug)]
pub struct Plumbing {
    phase: Phase,
    pipe: Option<Pipe>,
}

impl Plumbing {
    pub fn new() -> Self {
        Self {
            phase: Phase::NoPipe,
            pipe: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn create_pipe(&mut self) -> Result<()> {
        self.expect_phase(Phase::NoPipe, Phase::PipeCreated)?;
        self.pipe = Some(create_pipe()?);
        self.phase = Phase::PipeCreated;
        Ok(())
    }

    pub fn stage1_launched(&mut self) -> Result<()> {
        self.expect_phase(Phase::PipeCreated, Phase::Stage1Launched)?;
        self.phase = Phase::Stage1Launched;
        Ok(())
    }

    pub fn stage2_launched(&mut self) -> Result<()> {
        self.expect_phase(Phase::Stage1Launched, Phase::Stage2Launched)?;
        self.phase = Phase::Stage2Launched;
        Ok(())
    }

    /// Closes both ends in this process.
    pub fn close(&mut self) -> Result<()> {
        self.expect_phase(Phase::Stage2Launched, Phase::PipeClosed)?;
        debug!("closing both pipe ends in the parent");
        self.pipe = None;
        self.phase = Phase::PipeClosed;
        Ok(())
    }

    fn stage1_wiring(&self) -> Result<Wiring> {
        self.expect_phase(Phase::PipeCreated, Phase::Stage1Launched)?;
        let (read_end, write_end) = self.raw_ends();
        Ok(Wiring::StdoutToPipe {
            read_end,
            write_end,
        })
    }

    fn stage2_wiring(&self) -> Result<Wiring> {
        self.expect_phase(Phase::Stage1Launched, Phase::Stage2Launched)?;
        let (read_end, write_end) = self.raw_ends();
        Ok(Wiring::StdinFromPipe {
            read_end,
            write_end,
        })
    }

    fn raw_ends(&self) -> (RawFd, RawFd) {
        match self.pipe {
            Some(ref pipe) => (pipe.read_end.as_raw_fd(), pipe.write_end.as_raw_fd()),
            None => unreachable!("pipe phases always hold a pipe"),
        }
    }

    fn expect_phase(&self, expected: Phase, next: Phase) -> Result<()> {
        if self.phase != expected {
            bail!(
                "invalid pipe transition {:?} -> {:?} (expected {:?})",
                self.phase,
                next,
                expected
            );
        }
        Ok(())
    }
}

impl Default for Plumbing {
    fn default() -> Self {
        Plumbing::new()
    }
}

/// Wraps `unistd::pipe2()` to return RAII structs instead of raw, owning file descriptors
fn create_pipe() -> Result<Pipe> {
    // IMPORTANT: immediately pass the RawFds returned by pipe2() into RAII
    // structs (File) so no early return can leak them.
    let (read_end, write_end) = unistd::pipe2(OFlag::O_CLOEXEC)
        .map_err(|e| Error::resource(format!("pipe: {}", e), true))?;
    debug!("created pipe: read end {}, write end {}", read_end, write_end);
    unsafe {
        Ok(Pipe {
            read_end: File::from_raw_fd(read_end),
            write_end: File::from_raw_fd(write_end),
        })
    }
}

/// What the child does to its standard streams before exec.
#[derive(Debug)]
enum Wiring {
    Inherit,
    StdoutToPipe { read_end: RawFd, write_end: RawFd },
    StdinFromPipe { read_end: RawFd, write_end: RawFd },
    InputFile(CString),
    OutputFile(CString),
}

impl Wiring {
    /// Single-stage commands honor one redirect, input first.
    fn for_single(command: &Command) -> Result<Wiring> {
        if let Some(ref path) = command.input_redirect {
            Ok(Wiring::InputFile(to_c_path(path)?))
        } else if let Some(ref path) = command.output_redirect {
            Ok(Wiring::OutputFile(to_c_path(path)?))
        } else {
            Ok(Wiring::Inherit)
        }
    }

    fn trace_message(&self) -> &'static [u8] {
        match *self {
            Wiring::Inherit => b"",
            Wiring::StdoutToPipe { .. } => b"(child>redirecting stdout to the write end of the pipe...)\n",
            Wiring::StdinFromPipe { .. } => b"(child>redirecting stdin to the read end of the pipe...)\n",
            Wiring::InputFile(_) => b"(child>redirecting stdin from file...)\n",
            Wiring::OutputFile(_) => b"(child>redirecting stdout to file...)\n",
        }
    }

    fn target(&self) -> &[u8] {
        match *self {
            Wiring::InputFile(ref path) | Wiring::OutputFile(ref path) => path.to_bytes(),
            _ => b"pipe",
        }
    }

    /// Runs in the child.
    fn apply(&self) -> nix::Result<()> {
        match *self {
            Wiring::Inherit => Ok(()),
            Wiring::StdoutToPipe {
                read_end,
                write_end,
            } => {
                unistd::dup2(write_end, libc::STDOUT_FILENO)?;
                unistd::close(read_end)?;
                unistd::close(write_end)
            }
            Wiring::StdinFromPipe {
                read_end,
                write_end,
            } => {
                unistd::dup2(read_end, libc::STDIN_FILENO)?;
                unistd::close(write_end)?;
                unistd::close(read_end)
            }
            Wiring::InputFile(ref path) => {
                let fd = fcntl::open(
                    path.as_c_str(),
                    OFlag::O_RDONLY | OFlag::O_CLOEXEC,
                    Mode::empty(),
                )?;
                move_fd(fd, libc::STDIN_FILENO)
            }
            Wiring::OutputFile(ref path) => {
                let fd = fcntl::open(
                    path.as_c_str(),
                    OFlag::O_CREAT | OFlag::O_WRONLY | OFlag::O_TRUNC | OFlag::O_CLOEXEC,
                    Mode::S_IRWXU,
                )?;
                move_fd(fd, libc::STDOUT_FILENO)
            }
        }
    }
}

fn move_fd(fd: RawFd, target: RawFd) -> nix::Result<()> {
    if fd != target {
        unistd::dup2(fd, target)?;
        unistd::close(fd)?;
    }
    Ok(())
}

fn to_c_path(path: &str) -> Result<CString> {
    CString::new(path).chain_err(|| ErrorKind::Redirect(path.to_string()))
}

/// A stage's program and argument vector as C strings.
///
/// `argv_ptrs` points into the heap buffers of `argv` and ends with a null
/// pointer, ready for `execvp(3)`.
#[derive(Debug)]
struct Stage {
    program: CString,
    argv: Vec<CString>,
    argv_ptrs: Vec<*const libc::c_char>,
}

impl Stage {
    fn prepare(command: &Command) -> Result<Stage> {
        let program = command.program();
        let argv = command
            .argv
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<::std::result::Result<Vec<_>, _>>()
            .chain_err(|| ErrorKind::Exec(program.to_string()))?;
        let argv_ptrs = argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(Some(ptr::null()))
            .collect();
        Ok(Stage {
            program: argv[0].clone(),
            argv,
            argv_ptrs,
        })
    }
}

/// Launches commands and registers the children in a [`JobTable`].
#[derive(Debug, Default)]
pub struct Executor {
    trace_children: bool,
}

impl Executor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Children narrate their wiring on stderr, like the parent does through
    /// the debug log.
    pub fn trace_children(mut self, trace_children: bool) -> Self {
        self.trace_children = trace_children;
        self
    }

    /// Runs `command` (at most two stages). Waits when the last stage is
    /// blocking and returns the exit status of that stage; otherwise the
    /// children are left to `JobTable::reconcile` and the status is 0.
    pub fn execute(&self, mut command: Command, jobs: &mut JobTable) -> Result<i32> {
        let stages = command.stages();
        if stages > 2 {
            bail!(ErrorKind::UnsupportedPipeline(stages));
        }

        match command.take_next() {
            Some(next) => self.execute_pipeline(command, next, jobs),
            None => self.execute_single(command, jobs),
        }
    }

    fn execute_single(&self, command: Command, jobs: &mut JobTable) -> Result<i32> {
        let stage = Stage::prepare(&command)?;
        let wiring = Wiring::for_single(&command)?;

        debug!("(parent_process>forking...)");
        let pid = self.spawn(&stage, &wiring, true /* fatal */)?;
        debug!("(parent_process>created process with id: {})", pid);

        let blocking = command.blocking;
        jobs.add(command, pid);
        if blocking {
            debug!("(parent_process>waiting for child process to terminate...)");
            return wait_for(pid);
        }
        Ok(0)
    }

    fn execute_pipeline(
        &self,
        first: Command,
        second: Command,
        jobs: &mut JobTable,
    ) -> Result<i32> {
        let first_stage = Stage::prepare(&first)?;
        let second_stage = Stage::prepare(&second)?;

        let mut plumbing = Plumbing::new();
        plumbing.create_pipe()?;

        debug!("(parent_process>forking...)");
        let first_pid = self.spawn(&first_stage, &plumbing.stage1_wiring()?, true /* fatal */)?;
        debug!("(parent_process>created process with id: {})", first_pid);
        jobs.add(first, first_pid);
        plumbing.stage1_launched()?;

        let second_pid = self.spawn(&second_stage, &plumbing.stage2_wiring()?, false /* fatal */)?;
        debug!("(parent_process>created process with id: {})", second_pid);
        let blocking = second.blocking;
        jobs.add(second, second_pid);
        plumbing.stage2_launched()?;
        plumbing.close()?;

        if blocking {
            debug!("(parent_process>waiting for child processes to terminate...)");
            wait_for(first_pid)?;
            return wait_for(second_pid);
        }
        Ok(0)
    }

    fn spawn(&self, stage: &Stage, wiring: &Wiring, fatal: bool) -> Result<ProcessId> {
        // The child branch never returns: it either execs or _exits.
        match unsafe { unistd::fork() } {
            Ok(ForkResult::Parent { child }) => Ok(child.into()),
            Ok(ForkResult::Child) => exec_child(stage, wiring, self.trace_children),
            Err(e) => Err(Error::resource(format!("fork: {}", e), fatal)),
        }
    }
}

/// Convenience for `Executor::new().execute(command, jobs)`.
pub fn execute(command: Command, jobs: &mut JobTable) -> Result<i32> {
    Executor::new().execute(command, jobs)
}

fn exec_child(stage: &Stage, wiring: &Wiring, trace: bool) -> ! {
    if trace {
        child_write(&[wiring.trace_message()]);
    }
    if let Err(errno) = wiring.apply() {
        child_write(&[b"msh: ", wiring.target(), b": ", errno.desc().as_bytes(), b"\n"]);
        unsafe { libc::_exit(REDIRECT_FAILURE_EXIT_STATUS) };
    }

    if trace {
        child_write(&[
            b"(child>going to execute cmd: ",
            stage.program.to_bytes(),
            b")\n",
        ]);
    }
    unsafe {
        libc::execvp(stage.program.as_ptr(), stage.argv_ptrs.as_ptr());
    }
    let errno = Errno::last();
    child_write(&[
        b"msh: ",
        stage.program.to_bytes(),
        b": ",
        errno.desc().as_bytes(),
        b"\n",
    ]);
    unsafe { libc::_exit(EXEC_FAILURE_EXIT_STATUS) }
}

/// Unbuffered, allocation-free write to stderr for use after fork.
fn child_write(parts: &[&[u8]]) {
    for part in parts {
        let _ = unistd::write(libc::STDERR_FILENO, part);
    }
}

/// Blocks until `pid` terminates and returns its exit status, 128 plus the
/// signal number when it was killed.
fn wait_for(pid: ProcessId) -> Result<i32> {
    loop {
        match wait::waitpid(Pid::from(pid), None) {
            Ok(status) => {
                debug!("{} finished: {:?}", pid, status);
                return Ok(exit_status(status));
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => {
                debug!("{} was already reaped", pid);
                return Ok(0);
            }
            Err(e) => return Err(e).chain_err(|| format!("waitpid({})", pid)),
        }
    }
}

fn exit_status(status: WaitStatus) -> i32 {
    match status {
        WaitStatus::Exited(_, code) => code,
        WaitStatus::Signaled(_, signal, _) => 128 + signal as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::thread;
    use std::time::Duration;

    use nix::sys::signal::{self, Signal};
    use tempdir::TempDir;

    use super::*;
    use crate::core::{CommandBuilder, ProcessStatus};

    fn status_of(jobs: &JobTable, pid: ProcessId) -> Option<ProcessStatus> {
        jobs.get(pid).map(|job| job.status())
    }

    /// Reconciles until `pid` reaches `status`, or gives up after ~5s.
    fn reconcile_until(jobs: &mut JobTable, pid: ProcessId, status: ProcessStatus) {
        for _ in 0..500 {
            jobs.reconcile();
            if status_of(jobs, pid) == Some(status) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("pid {} never reached {:?}: {:?}", pid, status, jobs);
    }

    fn only_pid(jobs: &JobTable) -> ProcessId {
        assert_eq!(jobs.len(), 1, "{:?}", jobs);
        jobs.iter().next().unwrap().pid()
    }

    #[test]
    fn plumbing_phases() {
        let mut plumbing = Plumbing::new();
        assert_eq!(plumbing.phase(), Phase::NoPipe);
        assert!(plumbing.stage1_launched().is_err());
        assert!(plumbing.close().is_err());

        plumbing.create_pipe().unwrap();
        assert_eq!(plumbing.phase(), Phase::PipeCreated);
        assert!(plumbing.create_pipe().is_err());
        assert!(plumbing.stage2_wiring().is_err());
        assert!(plumbing.stage1_wiring().is_ok());

        plumbing.stage1_launched().unwrap();
        assert!(plumbing.stage1_wiring().is_err());
        assert!(plumbing.stage2_wiring().is_ok());

        plumbing.stage2_launched().unwrap();
        plumbing.close().unwrap();
        assert_eq!(plumbing.phase(), Phase::PipeClosed);
        assert!(plumbing.pipe.is_none());
    }

    #[test]
    fn pipeline_transfers_stage1_output() {
        let dir = TempDir::new("msh").unwrap();
        let out = dir.path().join("out");
        let reader = CommandBuilder::new("sh")
            .arg("-c")
            .arg(&format!("cat > '{}'", out.display()))
            .build();
        let command = CommandBuilder::new("printf")
            .arg("alpha\\nbeta")
            .pipe_to(reader)
            .build();

        let mut jobs = JobTable::new();
        execute(command, &mut jobs).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "alpha\nbeta");
        let programs: Vec<&str> = jobs.iter().map(|j| j.command().program()).collect();
        assert_eq!(programs, vec!["printf", "sh"]);
        assert!(jobs.iter().all(|j| j.command().next.is_none()));

        let rows = jobs.list();
        assert!(rows.iter().all(|r| r.status == ProcessStatus::Terminated));
        assert!(jobs.is_empty());
    }

    #[test]
    fn output_redirect_truncates() {
        let dir = TempDir::new("msh").unwrap();
        let out = dir.path().join("out");
        fs::write(&out, "previous content that is much longer\n").unwrap();
        let command = CommandBuilder::new("echo")
            .arg("hi")
            .output_redirect(out.to_str().unwrap())
            .build();

        let mut jobs = JobTable::new();
        execute(command, &mut jobs).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
    }

    #[test]
    fn output_redirect_creates_owner_only_file() {
        let dir = TempDir::new("msh").unwrap();
        let out = dir.path().join("fresh");
        let command = CommandBuilder::new("echo")
            .arg("fresh")
            .output_redirect(out.to_str().unwrap())
            .build();

        execute(command, &mut JobTable::new()).unwrap();
        let mode = fs::metadata(&out).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "fresh\n");
    }

    #[test]
    fn input_redirect_feeds_stdin() {
        let dir = TempDir::new("msh").unwrap();
        let input = dir.path().join("in");
        let out = dir.path().join("out");
        fs::write(&input, "from a file\n").unwrap();
        let command = CommandBuilder::new("sh")
            .arg("-c")
            .arg(&format!("cat > '{}'", out.display()))
            .input_redirect(input.to_str().unwrap())
            .build();

        execute(command, &mut JobTable::new()).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "from a file\n");
    }

    #[test]
    fn input_redirect_wins_over_output_redirect() {
        let dir = TempDir::new("msh").unwrap();
        let input = dir.path().join("in");
        let out = dir.path().join("out");
        let copy = dir.path().join("copy");
        fs::write(&input, "input side\n").unwrap();
        let command = CommandBuilder::new("sh")
            .arg("-c")
            .arg(&format!("cat > '{}'", copy.display()))
            .input_redirect(input.to_str().unwrap())
            .output_redirect(out.to_str().unwrap())
            .build();

        assert_eq!(execute(command, &mut JobTable::new()).unwrap(), 0);
        assert_eq!(fs::read_to_string(&copy).unwrap(), "input side\n");
        assert!(!out.exists());
    }

    #[test]
    fn pipeline_ignores_stage_redirects() {
        let dir = TempDir::new("msh").unwrap();
        let ignored = dir.path().join("f");
        let out = dir.path().join("out");
        let reader = CommandBuilder::new("sh")
            .arg("-c")
            .arg(&format!("cat > '{}'", out.display()))
            .build();
        let command = CommandBuilder::new("echo")
            .arg("x")
            .output_redirect(ignored.to_str().unwrap())
            .pipe_to(reader)
            .build();

        assert_eq!(execute(command, &mut JobTable::new()).unwrap(), 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "x\n");
        assert!(!ignored.exists());
    }

    #[test]
    fn blocking_runs_return_the_exit_status() {
        let mut jobs = JobTable::new();
        let status = execute(CommandBuilder::new("false").build(), &mut jobs).unwrap();
        assert_eq!(status, 1);

        let command = CommandBuilder::new("sh").args(&["-c", "exit 3"]).build();
        assert_eq!(execute(command, &mut jobs).unwrap(), 3);

        let command = CommandBuilder::new("sh").args(&["-c", "kill -9 $$"]).build();
        assert_eq!(execute(command, &mut jobs).unwrap(), 128 + 9);

        let background = CommandBuilder::new("false").blocking(false).build();
        assert_eq!(execute(background, &mut jobs).unwrap(), 0);
    }

    #[test]
    fn pipeline_status_is_the_last_stage() {
        let mut jobs = JobTable::new();
        let last_fails = CommandBuilder::new("true")
            .pipe_to(CommandBuilder::new("false").build())
            .build();
        assert_eq!(execute(last_fails, &mut jobs).unwrap(), 1);

        let first_fails = CommandBuilder::new("false")
            .pipe_to(CommandBuilder::new("true").build())
            .build();
        assert_eq!(execute(first_fails, &mut jobs).unwrap(), 0);
    }

    #[test]
    fn prepared_argv_is_null_terminated() {
        let command = CommandBuilder::new("echo").args(&["a", "b"]).build();
        let stage = Stage::prepare(&command).unwrap();

        assert_eq!(stage.argv_ptrs.len(), stage.argv.len() + 1);
        for (ptr, arg) in stage.argv_ptrs.iter().zip(&stage.argv) {
            assert_eq!(*ptr, arg.as_ptr());
        }
        assert!(stage.argv_ptrs.last().unwrap().is_null());
        assert_eq!(stage.program.as_bytes(), b"echo");
    }

    #[test]
    fn missing_input_file_only_fails_the_child() {
        let dir = TempDir::new("msh").unwrap();
        let command = CommandBuilder::new("cat")
            .input_redirect(dir.path().join("missing").to_str().unwrap())
            .build();

        let mut jobs = JobTable::new();
        assert_eq!(execute(command, &mut jobs).unwrap(), 1);
        let pid = only_pid(&jobs);
        reconcile_until(&mut jobs, pid, ProcessStatus::Terminated);
    }

    #[test]
    fn unknown_program_is_still_registered() {
        let command = CommandBuilder::new("msh-test-no-such-program").build();

        let mut jobs = JobTable::new();
        assert_eq!(execute(command, &mut jobs).unwrap(), 127);
        let pid = only_pid(&jobs);

        let rows = jobs.list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pid, pid);
        assert_eq!(rows[0].status, ProcessStatus::Terminated);
        assert!(jobs.list().is_empty());
    }

    #[test]
    fn three_stages_are_rejected() {
        let c = CommandBuilder::new("cat").build();
        let b = CommandBuilder::new("cat").pipe_to(c).build();
        let a = CommandBuilder::new("echo").pipe_to(b).build();

        let mut jobs = JobTable::new();
        match execute(a, &mut jobs) {
            Err(e) => match *e.kind() {
                ErrorKind::UnsupportedPipeline(3) => {}
                ref other => panic!("unexpected error kind: {:?}", other),
            },
            Ok(_) => panic!("three stages should not run"),
        }
        assert!(jobs.is_empty());
    }

    #[test]
    fn nul_in_argument_is_rejected_before_fork() {
        let command = CommandBuilder::new("echo").arg("bad\0arg").build();

        let mut jobs = JobTable::new();
        assert!(execute(command, &mut jobs).is_err());
        assert!(jobs.is_empty());
    }

    #[test]
    fn background_job_follows_signals() {
        let command = CommandBuilder::new("sleep")
            .arg("30")
            .blocking(false)
            .build();

        let mut jobs = JobTable::new();
        execute(command, &mut jobs).unwrap();
        let pid = only_pid(&jobs);
        let rows = jobs.list();
        assert_eq!(rows[0].status, ProcessStatus::Running);
        assert_eq!(rows[0].command, "sleep 30");

        signal::kill(Pid::from(pid), Signal::SIGSTOP).unwrap();
        reconcile_until(&mut jobs, pid, ProcessStatus::Suspended);

        signal::kill(Pid::from(pid), Signal::SIGCONT).unwrap();
        reconcile_until(&mut jobs, pid, ProcessStatus::Running);

        signal::kill(Pid::from(pid), Signal::SIGKILL).unwrap();
        reconcile_until(&mut jobs, pid, ProcessStatus::Terminated);
        let rows = jobs.list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ProcessStatus::Terminated);
        assert!(jobs.list().is_empty());
    }

    #[test]
    fn non_blocking_pipeline_returns_immediately() {
        let reader = CommandBuilder::new("sleep")
            .arg("30")
            .blocking(false)
            .build();
        let command = CommandBuilder::new("echo").pipe_to(reader).build();

        let mut jobs = JobTable::new();
        execute(command, &mut jobs).unwrap();
        assert_eq!(jobs.len(), 2);

        let sleeper = jobs.iter().nth(1).unwrap().pid();
        assert_eq!(status_of(&jobs, sleeper), Some(ProcessStatus::Running));
        signal::kill(Pid::from(sleeper), Signal::SIGKILL).unwrap();
        reconcile_until(&mut jobs, sleeper, ProcessStatus::Terminated);
    }
}
