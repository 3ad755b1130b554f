use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct History;

impl BuiltinCommand for History {
    const NAME: &'static str = builtins::HISTORY_NAME;

    const HELP: &'static str = "\
history: history
    Display the history list, oldest first. Each line is numbered with the
    index `!n' recalls it by.";

    fn run(shell: &mut Shell, args: &[String], stdout: &mut dyn Write) -> Result<()> {
        builtins::check_arg_count::<Self>(args, 0)?;
        write!(stdout, "{}", shell.history())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ShellConfig;

    #[test]
    fn lists_entries_with_recall_index() {
        let mut shell = Shell::new(ShellConfig::interactive(20));
        shell.execute_command_string("true").unwrap();
        shell.execute_command_string("true first").unwrap();

        let mut out = Vec::new();
        History::run(&mut shell, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1: true\n2: true first\n");
    }

    #[test]
    fn empty_history_prints_nothing() {
        let mut shell = Shell::new(ShellConfig::interactive(20));
        let mut out = Vec::new();
        History::run(&mut shell, &[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
