//! Opt-in process-wide command line.
//!
//! Call [`init`] once at startup, register with [`add_cmd`] and [`add_help`],
//! then call [`parse`]. Every other function fails with
//! [`Error::NotInitialized`] until [`init`] has run. Code that wants several
//! independent command lines (tests, embedded tools) should use
//! [`SubCli`] directly.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::OnceCell;

use crate::command::{HelpTopic, SubCommand};
use crate::dispatch::{Outcome, SubCli};
use crate::error::{Error, Result};
use crate::program::Program;

static COMMAND_LINE: OnceCell<Mutex<SubCli>> = OnceCell::new();

/// Installs the default command line. Fails if called twice.
pub fn init(program: Program) -> Result<()> {
    COMMAND_LINE
        .set(Mutex::new(SubCli::new(program)))
        .map_err(|_| Error::AlreadyInitialized)
}

/// Installs a default command line named after the running executable.
pub fn init_default() -> Result<()> {
    init(Program::from_process())
}

fn command_line() -> Result<MutexGuard<'static, SubCli>> {
    let cell = COMMAND_LINE.get().ok_or(Error::NotInitialized)?;
    // A handler that panicked leaves the registry itself intact.
    Ok(cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
}

/// Runs `f` against the default command line.
pub fn with<T>(f: impl FnOnce(&mut SubCli) -> T) -> Result<T> {
    let mut guard = command_line()?;
    Ok(f(&mut *guard))
}

pub fn set_program(program: Program) -> Result<()> {
    command_line()?.set_program(program);
    Ok(())
}

pub fn add_cmd(cmd: SubCommand) -> Result<()> {
    command_line()?.add_cmd(cmd)
}

pub fn add_help(topic: HelpTopic) -> Result<()> {
    command_line()?.add_help(topic);
    Ok(())
}

/// Dispatches the process arguments. The lock is held while the handler
/// runs, so handlers must not call back into this module.
pub fn parse() -> Result<Outcome> {
    command_line()?.run()
}

/// Dispatches an explicit argument vector (`args[0]` is the program name).
pub fn dispatch<S: AsRef<str>>(args: &[S]) -> Result<Outcome> {
    command_line()?.dispatch(args)
}

/// Positional arguments left for the last dispatched command.
pub fn args() -> Result<Vec<String>> {
    Ok(command_line()?.args().to_vec())
}
