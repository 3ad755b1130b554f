//! Msh - a minimal job-tracking shell
//!
//! Runs single commands and two-stage pipelines with redirection, keeps a
//! table of every child it started and a short command history.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

#[macro_use]
mod util;

pub mod builtins;
pub mod core;
pub mod editor;
pub mod errors;
pub mod execute_command;
pub mod history;
pub mod shell;

pub use crate::shell::{Shell, ShellConfig};
