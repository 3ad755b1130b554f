//! Tracks child processes launched by the shell and keeps their status in
//! step with what the kernel reports.

use std::fmt;

use nix::errno::Errno;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::core::{Command, JobEntry, JobId, ProcessId, ProcessStatus};
use crate::errors::{Error, Result};

/// What a non-blocking status query learned about one child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildState {
    /// Nothing new since the last query.
    Unchanged,
    Stopped,
    Continued,
    /// Exited normally or was killed by a signal.
    Exited,
    /// Not (or no longer) a child of this process, e.g. already reaped.
    Gone,
}

/// Source of child status changes.
pub trait StatusSource {
    /// Queries `pid` without blocking.
    fn poll(&mut self, pid: ProcessId) -> Result<ChildState>;
}

/// Asks the kernel with `waitpid(pid, WNOHANG | WUNTRACED | WCONTINUED)`.
#[derive(Debug, Default)]
pub struct WaitPidSource;

impl StatusSource for WaitPidSource {
    fn poll(&mut self, pid: ProcessId) -> Result<ChildState> {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
        match wait::waitpid(Pid::from(pid), Some(flags)) {
            Ok(WaitStatus::StillAlive) => Ok(ChildState::Unchanged),
            Ok(WaitStatus::Stopped(..)) => Ok(ChildState::Stopped),
            Ok(WaitStatus::Continued(..)) => Ok(ChildState::Continued),
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("{} exited with {}.", pid, code);
                Ok(ChildState::Exited)
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!("{} terminated by signal {:?}.", pid, signal);
                Ok(ChildState::Exited)
            }
            Ok(_) => Ok(ChildState::Unchanged),
            Err(Errno::ECHILD) => Ok(ChildState::Gone),
            Err(e) => Err(e.into()),
        }
    }
}

/// One row of `procs` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRow {
    pub index: usize,
    pub pid: ProcessId,
    pub status: ProcessStatus,
    pub command: String,
}

impl JobRow {
    pub const HEADER: &'static str = "Index\tPID\tStatus\t\tCommand";
}

impl fmt::Display for JobRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6}\t{:<6}\t{}\t{}",
            self.index, self.pid, self.status, self.command
        )
    }
}

/// Insertion-ordered jobs, unique by pid.
pub struct JobTable {
    jobs: Vec<JobEntry>,
    job_count: u32,
    source: Box<dyn StatusSource>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::with_source(Box::new(WaitPidSource))
    }

    pub fn with_source(source: Box<dyn StatusSource>) -> Self {
        Self {
            jobs: Vec::new(),
            job_count: 0,
            source,
        }
    }

    /// Starts tracking `pid` as RUNNING.
    ///
    /// A leftover entry with the same pid belongs to an earlier process whose
    /// id the OS has recycled, so it is dropped first.
    pub fn add(&mut self, command: Command, pid: ProcessId) -> JobId {
        if let Some(index) = self.find_job(pid) {
            warn!("pid {} reused while still tracked, dropping stale entry", pid);
            self.jobs.remove(index);
        }

        let job_id = self.get_next_job_id();
        debug!("tracking [{}] pid {}: {}", job_id, pid, command);
        self.jobs.push(JobEntry::new(job_id, command, pid));
        job_id
    }

    /// Stops tracking `pid`. Absent pids are ignored.
    pub fn remove(&mut self, pid: ProcessId) -> Option<JobEntry> {
        self.find_job(pid).map(|index| self.jobs.remove(index))
    }

    /// Absent pids are ignored.
    pub fn set_status(&mut self, pid: ProcessId, status: ProcessStatus) {
        if let Some(index) = self.find_job(pid) {
            self.jobs[index].set_status(status);
        }
    }

    pub fn get(&self, pid: ProcessId) -> Option<&JobEntry> {
        self.find_job(pid).map(|index| &self.jobs[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobEntry> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Checks every tracked child for status changes, without blocking.
    ///
    /// A child whose status cannot be queried keeps its entry unchanged; the
    /// failures are returned for the caller to report.
    pub fn reconcile(&mut self) -> Vec<Error> {
        let mut failures = Vec::new();
        for job in &mut self.jobs {
            let pid = job.pid();
            let new_status = match self.source.poll(pid) {
                Ok(ChildState::Unchanged) => continue,
                Ok(ChildState::Stopped) => ProcessStatus::Suspended,
                Ok(ChildState::Continued) => ProcessStatus::Running,
                Ok(ChildState::Exited) => ProcessStatus::Terminated,
                Ok(ChildState::Gone) => {
                    if job.status() == ProcessStatus::Suspended {
                        warn!("suspended pid {} vanished without an exit status", pid);
                    } else {
                        debug!("pid {} is no longer a child of this shell", pid);
                    }
                    ProcessStatus::Terminated
                }
                Err(e) => {
                    let context = format!("waitpid failed for pid {}", pid);
                    failures.push(Error::with_chain(e, context));
                    continue;
                }
            };
            job.set_status(new_status);
        }
        failures
    }

    /// Reconciles, returns one row per job, then drops terminated jobs.
    ///
    /// Query failures only reach the log; use `reconcile` and `take_rows` to
    /// see them.
    pub fn list(&mut self) -> Vec<JobRow> {
        for e in self.reconcile() {
            warn!("{}", super::describe(&e));
        }
        self.take_rows()
    }

    /// Returns one row per job, then drops terminated jobs.
    pub fn take_rows(&mut self) -> Vec<JobRow> {
        let rows = self
            .jobs
            .iter()
            .enumerate()
            .map(|(index, job)| JobRow {
                index,
                pid: job.pid(),
                status: job.status(),
                command: job.command().to_string(),
            })
            .collect();

        // Remove terminated jobs
        self.jobs.retain(|j| !j.is_terminated());
        rows
    }

    fn get_next_job_id(&mut self) -> JobId {
        self.job_count += 1;
        JobId(self.job_count)
    }

    fn find_job(&self, pid: ProcessId) -> Option<usize> {
        self.jobs.iter().position(|job| job.pid() == pid)
    }
}

impl Default for JobTable {
    fn default() -> Self {
        JobTable::new()
    }
}

impl fmt::Debug for JobTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} jobs\tjob_count: {}", self.jobs.len(), self.job_count)?;
        for job in &self.jobs {
            writeln!(f, "{}", job)?;
        }

        Ok(())
    }
}
