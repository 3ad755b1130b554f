use std::io::Write;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::Result;
use crate::shell::Shell;

pub struct Quit;

impl BuiltinCommand for Quit {
    const NAME: &'static str = builtins::QUIT_NAME;

    const HELP: &'static str = "\
quit: quit
    Exit the shell with a status of 0. Background processes keep running.";

    fn run(shell: &mut Shell, args: &[String], _stdout: &mut dyn Write) -> Result<()> {
        builtins::check_arg_count::<Self>(args, 0)?;
        shell.exit(0);
    }
}
