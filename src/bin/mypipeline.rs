//! Runs `ls -l | tail -n 2`, narrating every step of the parent and the two
//! children on stderr.

#[macro_use]
extern crate log;

use std::process;

use msh_rs::core::CommandBuilder;
use msh_rs::execute_command::Executor;
use msh_rs::shell::describe;
use msh_rs::shell::job_control::{JobRow, JobTable};

fn main() {
    let logger = fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = logger {
        eprintln!("mypipeline: failed to initialize logging: {}", e);
    }

    let tail = CommandBuilder::new("tail").args(&["-n", "2"]).build();
    let pipeline = CommandBuilder::new("ls").arg("-l").pipe_to(tail).build();

    let mut jobs = JobTable::new();
    let status = match Executor::new()
        .trace_children(true)
        .execute(pipeline, &mut jobs)
    {
        Ok(status) => status,
        Err(e) => {
            eprintln!("mypipeline: {}", describe(&e));
            process::exit(1);
        }
    };
    debug!("(parent_process>pipeline exited with status {})", status);

    debug!("(parent_process>final process table:)");
    debug!("{}", JobRow::HEADER);
    for row in jobs.list() {
        debug!("{}", row);
    }
    debug!("(parent_process>finished)");
}
