use std::env;
use std::io::Write;
use std::path::PathBuf;

use crate::builtins::{self, BuiltinCommand};
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::shell::Shell;

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = builtins::CD_NAME;

    const HELP: &'static str = "\
cd: cd [dir]
    Change the current directory to DIR. The home directory is the
    default DIR, and `~' also names it.";

    fn run(_shell: &mut Shell, args: &[String], _stdout: &mut dyn Write) -> Result<()> {
        builtins::check_arg_count::<Self>(args, 1)?;
        let dir = match args.first().map(String::as_str) {
            Some("~") | None => {
                ::dirs::home_dir().ok_or_else(|| ErrorKind::Cd("HOME not set".into()))?
            }
            Some(path) => PathBuf::from(path),
        };

        debug!("cd {}", dir.display());
        env::set_current_dir(&dir).chain_err(|| ErrorKind::Cd(dir.display().to_string()))?;
        Ok(())
    }
}
