//! The shell: reads lines, runs builtins, expands history recalls and hands
//! everything else to the executor.

use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use crate::builtins;
use crate::core::parser;
use crate::editor::Editor;
use crate::errors::{Error, ErrorKind, Result};
use crate::execute_command::Executor;
use crate::history::HistoryBuffer;

use self::job_control::JobTable;

pub mod job_control;

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Determines if new command entries will be added to the shell's command history.
    enable_command_history: bool,

    /// Number of entries to store in the shell's command history
    command_history_capacity: usize,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,

    /// Children narrate their fd wiring on stderr.
    trace_children: bool,
}

impl ShellConfig {
    /// Creates an interactive shell: command history and messages enabled.
    pub fn interactive(command_history_capacity: usize) -> Self {
        Self {
            enable_command_history: true,
            command_history_capacity,
            display_messages: true,
            trace_children: false,
        }
    }

    /// Creates a noninteractive shell.
    ///
    /// Commands are not saved, so `!!` and `!n` find nothing. The history
    /// builtin still works.
    pub fn noninteractive() -> Self {
        Default::default()
    }

    pub fn trace_children(mut self, trace_children: bool) -> Self {
        self.trace_children = trace_children;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enable_command_history: false,
            command_history_capacity: 1,
            display_messages: false,
            trace_children: false,
        }
    }
}

pub struct Shell {
    jobs: JobTable,
    history: HistoryBuffer,
    executor: Executor,
    /// Exit status of the last builtin or command line.
    last_exit_status: i32,
    config: ShellConfig,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            jobs: JobTable::new(),
            history: HistoryBuffer::with_capacity(config.command_history_capacity.max(1)),
            executor: Executor::new().trace_children(config.trace_children),
            last_exit_status: 0,
            config,
        }
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut JobTable {
        &mut self.jobs
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn last_exit_status(&self) -> i32 {
        self.last_exit_status
    }

    /// Runs one input line.
    ///
    /// `!!` and `!n` are replaced by the recalled line, which is then run (and
    /// recorded again) as if typed.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        // skip if empty
        if input.is_empty() {
            return Ok(());
        }

        if input.starts_with('!') {
            let recalled = self.expand_history(input)?;
            info!("{} -> {}", input, recalled);
            return self.execute_line(&recalled);
        }

        self.execute_line(input)
    }

    fn expand_history(&self, input: &str) -> Result<String> {
        let line = if input == "!!" {
            self.history.recall_last()?
        } else {
            match input[1..].parse::<usize>() {
                Ok(n) => self.history.recall(n)?,
                Err(_) => bail!(ErrorKind::HistoryRange(input.to_string())),
            }
        };
        Ok(line.to_string())
    }

    fn execute_line(&mut self, line: &str) -> Result<()> {
        let argv: Vec<String> = line.split_whitespace().map(String::from).collect();
        if builtins::is_builtin(&argv[0]) {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let (status, result) = builtins::run(self, &argv, &mut handle);
            self.last_exit_status = status;
            return result;
        }

        let command = match parser::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                self.last_exit_status = SYNTAX_ERROR_EXIT_STATUS;
                return Err(e);
            }
        };

        if self.config.enable_command_history {
            self.history.push(line);
        }

        match self.executor.execute(command, &mut self.jobs) {
            Ok(status) => {
                self.last_exit_status = status;
                Ok(())
            }
            Err(e) => {
                self.last_exit_status = 1;
                Err(e)
            }
        }
    }

    /// Reads and runs lines until end of input.
    pub fn execute_from_stdin(&mut self) {
        let mut editor = match Editor::new() {
            Ok(editor) => editor,
            Err(e) => {
                error!("failed to create line editor: {}", e);
                eprintln!("msh: {}", describe(&e));
                self.exit(1);
            }
        };

        loop {
            // Reap children that finished in the background.
            for e in self.jobs.reconcile() {
                self.report(&e);
            }

            let input = match editor.readline(&prompt()) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            let input = input.trim();
            if self.config.enable_command_history && !input.is_empty() {
                editor.add_history_entry(input);
            }

            if let Err(e) = self.execute_command_string(input) {
                self.report(&e);
            }
        }

        if self.config.display_messages {
            println!("exit");
        }
    }

    /// Prints `e` and ends the shell if it is fatal.
    pub fn report(&mut self, e: &Error) {
        error!("{}", describe(e));
        eprintln!("msh: {}", describe(e));
        if e.is_fatal() {
            self.exit(1);
        }
    }

    pub fn exit(&mut self, code: i32) -> ! {
        info!("msh has shut down ({} jobs still tracked)", self.jobs.len());
        process::exit(code);
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.jobs, self.history)
    }
}

const SYNTAX_ERROR_EXIT_STATUS: i32 = 2;

/// Joins an error with its causes: `outer: inner`.
pub fn describe(e: &Error) -> String {
    e.iter()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Current directory with the home prefix shown as `~`, then `$ `.
fn prompt() -> String {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("?"));
    let rel = match dirs::home_dir() {
        Some(ref home) => abbreviate_home(&cwd, home),
        None => cwd,
    };
    format!("{}$ ", rel.display())
}

fn abbreviate_home(cwd: &Path, home: &Path) -> PathBuf {
    match cwd.strip_prefix(home) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("~"),
        Ok(rel) => Path::new("~").join(rel),
        Err(_) => cwd.to_path_buf(),
    }
}
