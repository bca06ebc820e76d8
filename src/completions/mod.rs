//! Shell completion scripts generated from the registry.
//!
//! Fish output is rendered natively, one independent block per command.
//! Other shells go through `clap_complete` using a `clap::Command` tree that
//! mirrors the registry.

use std::io::Write;
use std::str::FromStr;

use clap::Command;

use crate::error::{Error, Result};
use crate::program::Program;
use crate::registry::Registry;

pub mod fish;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    PowerShell,
    Zsh,
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bash" => Ok(Shell::Bash),
            "elvish" => Ok(Shell::Elvish),
            "fish" => Ok(Shell::Fish),
            "powershell" => Ok(Shell::PowerShell),
            "zsh" => Ok(Shell::Zsh),
            other => Err(Error::UnsupportedShell(other.to_string())),
        }
    }
}

/// Writes the completion script for `shell` into `w`.
pub fn generate(
    shell: Shell,
    program: &Program,
    registry: &Registry,
    w: &mut dyn Write,
) -> Result<()> {
    let generator = match shell {
        Shell::Fish => {
            for block in fish::build(&program.name, registry) {
                writeln!(w, "{block}")?;
            }
            return Ok(());
        }
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Elvish => clap_complete::Shell::Elvish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Zsh => clap_complete::Shell::Zsh,
    };
    let mut cmd = command_tree(program, registry);
    clap_complete::generate(generator, &mut cmd, program.name.clone(), w);
    Ok(())
}

/// `clap` mirror of the registry: one subcommand per registered command
/// with its flags. Repeated tokens appear once.
pub(crate) fn command_tree(program: &Program, registry: &Registry) -> Command {
    let mut root = Command::new(program.name.clone())
        .about(program.description.clone())
        .version(program.version.clone())
        .disable_help_flag(true)
        .disable_version_flag(true);
    let mut seen: Vec<&str> = Vec::new();
    for cmd in registry.commands() {
        if cmd.token.is_empty() || seen.contains(&cmd.token.as_str()) {
            continue;
        }
        seen.push(&cmd.token);
        root = root.subcommand(
            cmd.flags
                .command()
                .no_binary_name(false)
                .about(cmd.short.clone()),
        );
    }
    root
}
