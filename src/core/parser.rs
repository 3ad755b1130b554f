//! MSH Parser
//!
//! Turns a raw input line into a [`Command`] chain. Words are separated by
//! whitespace, stages by `|`. `<file` and `>file` (with or without a space)
//! set redirects and a trailing `&` makes a stage non-blocking.

use crate::core::command::{Command, CommandBuilder};
use crate::errors::{ErrorKind, Result};

/// Parses `input` into a command chain.
///
/// Returns `Ok(None)` for blank input.
///
/// # Examples
///
/// ```
/// use msh_rs::core::parser;
///
/// let command = parser::parse("ls -l | tail -n 2 &").unwrap().unwrap();
/// assert_eq!(command.argv, vec!["ls", "-l"]);
/// assert!(command.blocking);
///
/// let next = command.next.unwrap();
/// assert_eq!(next.argv, vec!["tail", "-n", "2"]);
/// assert!(!next.blocking);
/// ```
pub fn parse(input: &str) -> Result<Option<Command>> {
    let input_trimmed = input.trim();
    if input_trimmed.is_empty() {
        return Ok(None);
    }

    let mut stages = Vec::new();
    for segment in input_trimmed.split('|') {
        stages.push(parse_stage(segment).map_err(|_| ErrorKind::Syntax(input_trimmed.into()))?);
    }

    let mut chain: Option<Command> = None;
    for mut stage in stages.into_iter().rev() {
        if let Some(next) = chain.take() {
            stage.pipe_to(next);
        }
        chain = Some(stage.build());
    }
    debug!("parsed Command: {:?}", chain);
    Ok(chain)
}

fn parse_stage(segment: &str) -> Result<CommandBuilder> {
    let mut words = Vec::new();
    let mut input_redirect = None;
    let mut output_redirect = None;
    let mut blocking = true;

    // Only the stage's final word can carry the `&` marker.
    let mut args: Vec<&str> = segment.split_whitespace().collect();
    if let Some(last) = args.pop() {
        if last.ends_with('&') {
            blocking = false;
            let rest = &last[..last.len() - 1];
            if !rest.is_empty() {
                args.push(rest);
            }
        } else {
            args.push(last);
        }
    }

    let mut infile = false;
    let mut outfile = false;
    for arg in args {
        if infile {
            input_redirect = Some(arg);
            infile = false;
        } else if outfile {
            output_redirect = Some(arg);
            outfile = false;
        } else if arg.starts_with('<') {
            if arg.len() > 1 {
                input_redirect = Some(&arg[1..]);
            } else {
                infile = true;
            }
        } else if arg.starts_with('>') {
            if arg.len() > 1 {
                output_redirect = Some(&arg[1..]);
            } else {
                outfile = true;
            }
        } else {
            words.push(arg);
        }
    }
    if infile || outfile || words.is_empty() {
        bail!(ErrorKind::Syntax(segment.into()));
    }

    let mut builder = CommandBuilder::new(words[0]);
    builder.args(&words[1..]).blocking(blocking);
    if let Some(path) = input_redirect {
        builder.input_redirect(path);
    }
    if let Some(path) = output_redirect {
        builder.output_redirect(path);
    }
    Ok(builder)
}
