#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;

use docopt::Docopt;
use msh_rs::history::HISTORY_CAPACITY;
use msh_rs::{Shell, ShellConfig};
use nix::unistd::Pid;

const LOG_FILE_NAME: &str = ".msh_log";

const USAGE: &str = "
msh.

Usage:
    msh [options]
    msh [options] -c <command>
    msh (-h | --help)
    msh --version

Options:
    -h --help       Show this screen.
    --version       Show version.
    -c              Run the line <command> and exit.
    -d              Trace process creation and fd wiring to stderr.
    --log=<path>    File to write log to, defaults to ~/.msh_log
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_d: bool,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_logger(&args.flag_log, args.flag_d);
    debug!("{:?}", args);

    if args.flag_version {
        println!("msh version {}", env!("CARGO_PKG_VERSION"));
    } else if args.flag_c {
        execute_from_command_string(&args);
    } else {
        execute_from_stdin(&args);
    }
}

fn init_logger(path: &Option<String>, diagnostics: bool) {
    let log_path = path.clone().map(PathBuf::from).or_else(default_log_path);

    let pid = Pid::this();
    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace);

    if let Some(log_path) = log_path {
        match fern::log_file(&log_path) {
            Ok(file) => dispatch = dispatch.chain(file),
            Err(e) => eprintln!("msh: {}: {}", log_path.display(), e),
        }
    }

    if diagnostics {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Debug)
                .chain(std::io::stderr()),
        );
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("msh: failed to initialize logging: {}", e);
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_FILE_NAME))
}

fn execute_from_command_string(args: &Args) -> ! {
    let shell_config = ShellConfig::noninteractive().trace_children(args.flag_d);
    let mut shell = Shell::new(shell_config);

    let command = args.arg_command.as_deref().unwrap_or_default();
    if let Err(e) = shell.execute_command_string(command) {
        shell.report(&e);
        let status = match shell.last_exit_status() {
            0 => 1,
            status => status,
        };
        shell.exit(status);
    }

    let status = shell.last_exit_status();
    shell.exit(status);
}

fn execute_from_stdin(args: &Args) -> ! {
    let shell_config = ShellConfig::interactive(HISTORY_CAPACITY).trace_children(args.flag_d);
    let mut shell = Shell::new(shell_config);
    info!("msh started up");
    shell.execute_from_stdin();
    shell.exit(0)
}
