//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

#![allow(deprecated)]

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Nix(::nix::Error);
        Readline(::rustyline::error::ReadlineError);
    }

    errors {
        // Pipe or fork failure. `fatal` is set when the shell should not try
        // to continue (first pipe/fork of a command).
        Resource(what: String, fatal: bool) {
            description("resource error")
            display("{}", what)
        }
        // The program could not be prepared for execution.
        Exec(program: String) {
            description("exec error")
            display("{}: cannot execute", program)
        }
        // A redirect target could not be opened.
        Redirect(path: String) {
            description("redirect error")
            display("{}: cannot open for redirection", path)
        }
        // Signal delivery failed.
        Signal(pid: i32, signal: String) {
            description("signal error")
            display("{}({}) failed", signal, pid)
        }
        // History recall index out of bounds.
        HistoryRange(n: String) {
            description("history index out of range")
            display("{}: command not in history", n)
        }
        // `cd` could not change the working directory.
        Cd(path: String) {
            description("cd error")
            display("cd: {}: cannot change directory", path)
        }
        Syntax(line: String) {
            description("syntax error")
            display("syntax error near: '{}'", line)
        }
        UnsupportedPipeline(stages: usize) {
            description("unsupported pipeline")
            display("pipelines of {} stages are not supported (at most 2)", stages)
        }
        // Bad arguments to a builtin; carries the exit status to report.
        Usage(message: String, code: i32) {
            description("usage error")
            display("{}", message)
        }
    }
}

impl Error {
    /// Resource failures that should terminate the shell.
    pub fn is_fatal(&self) -> bool {
        match *self.kind() {
            ErrorKind::Resource(_, fatal) => fatal,
            _ => false,
        }
    }

    pub(crate) fn resource<T: AsRef<str>>(what: T, fatal: bool) -> Error {
        ErrorKind::Resource(what.as_ref().to_string(), fatal).into()
    }

    pub(crate) fn usage<T: AsRef<str>>(message: T, code: i32) -> Error {
        ErrorKind::Usage(message.as_ref().to_string(), code).into()
    }
}
