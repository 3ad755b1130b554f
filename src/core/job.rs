use std::fmt;

use nix::{libc, unistd::Pid};

use crate::core::command::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessId(libc::pid_t);

impl ProcessId {
    pub fn as_raw(self) -> libc::pid_t {
        self.0
    }
}

impl From<libc::pid_t> for ProcessId {
    fn from(value: libc::pid_t) -> Self {
        ProcessId(value)
    }
}

impl From<Pid> for ProcessId {
    fn from(value: Pid) -> Self {
        ProcessId(value.as_raw())
    }
}

impl From<ProcessId> for Pid {
    fn from(value: ProcessId) -> Self {
        Pid::from_raw(value.0)
    }
}

/// Honors width and alignment flags.
impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Monotonic number assigned by the job table; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    Suspended,
    Terminated,
}

impl ProcessStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProcessStatus::Running => "RUNNING",
            ProcessStatus::Suspended => "SUSPENDED",
            ProcessStatus::Terminated => "TERMINATED",
        }
    }
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Running
    }
}

/// Pads to the widest label so listing columns line up.
impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10}", self.label())
    }
}

#[derive(Debug)]
pub struct JobEntry {
    id: JobId,
    command: Command,
    pid: ProcessId,
    status: ProcessStatus,
}

impl JobEntry {
    pub fn new(id: JobId, command: Command, pid: ProcessId) -> Self {
        Self {
            id,
            command,
            pid,
            status: ProcessStatus::Running,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ProcessStatus) {
        self.status = status;
    }

    pub fn is_terminated(&self) -> bool {
        self.status == ProcessStatus::Terminated
    }
}

impl fmt::Display for JobEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}\t{}\t{}", self.id, self.pid, self.status, self.command)
    }
}
