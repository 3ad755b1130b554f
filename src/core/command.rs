//! Parsed command representation.

use std::fmt;

/// One pipeline stage plus an optional link to the stage it feeds.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// Program name followed by its arguments. Never empty.
    pub argv: Vec<String>,
    /// The file to read stdin from, if one is specified.
    pub input_redirect: Option<String>,
    /// The file to write stdout to, if one is specified.
    pub output_redirect: Option<String>,
    /// Whether the shell waits for this stage, defaults to true.
    pub blocking: bool,
    /// The stage this command's stdout is piped into.
    pub next: Option<Box<Command>>,
}

impl Command {
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Number of stages in the chain starting at `self`.
    pub fn stages(&self) -> usize {
        let mut count = 1;
        let mut current = self;
        while let Some(ref next) = current.next {
            count += 1;
            current = next;
        }
        count
    }

    /// Detaches the next stage, leaving `self` a single-stage command.
    pub fn take_next(&mut self) -> Option<Command> {
        self.next.take().map(|next| *next)
    }
}

/// Only this stage's words; used in job listings.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Builds Commands.
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    argv: Vec<String>,
    input_redirect: Option<String>,
    output_redirect: Option<String>,
    blocking: bool,
    next: Option<Box<Command>>,
}

impl CommandBuilder {
    /// Initializes a new CommandBuilder with the given program, no arguments,
    /// no redirection and blocking execution.
    pub fn new(program: &str) -> CommandBuilder {
        CommandBuilder {
            argv: vec![program.to_owned()],
            input_redirect: None,
            output_redirect: None,
            blocking: true,
            next: None,
        }
    }

    /// Add an argument to pass to the program.
    pub fn arg(&mut self, arg: &str) -> &mut CommandBuilder {
        self.argv.push(arg.to_owned());
        self
    }

    /// Add arguments to pass to the program.
    pub fn args(&mut self, args: &[&str]) -> &mut CommandBuilder {
        self.argv.extend(args.iter().map(|x| (*x).to_owned()));
        self
    }

    /// Add input redirection from the specified filename.
    pub fn input_redirect(&mut self, filename: &str) -> &mut CommandBuilder {
        self.input_redirect = Some(filename.to_owned());
        self
    }

    /// Add output redirection to the specified filename.
    pub fn output_redirect(&mut self, filename: &str) -> &mut CommandBuilder {
        self.output_redirect = Some(filename.to_owned());
        self
    }

    pub fn blocking(&mut self, blocking: bool) -> &mut CommandBuilder {
        self.blocking = blocking;
        self
    }

    /// Pipe this command's stdout into `next`.
    pub fn pipe_to(&mut self, next: Command) -> &mut CommandBuilder {
        self.next = Some(Box::new(next));
        self
    }

    pub fn build(&self) -> Command {
        Command {
            argv: self.argv.clone(),
            input_redirect: self.input_redirect.clone(),
            output_redirect: self.output_redirect.clone(),
            blocking: self.blocking,
            next: self.next.clone(),
        }
    }
}
