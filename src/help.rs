//! Usage summary and per-command help text.
//!
//! Nothing here fails on bad input: unknown topics and surplus arguments are
//! reported as text. Only sink write errors are returned.

use std::io::{self, Write};

use crate::command::SubCommand;
use crate::program::Program;
use crate::registry::Registry;

/// Writes the top-level usage summary.
pub fn write_top_level(
    w: &mut dyn Write,
    program: &Program,
    registry: &Registry,
) -> io::Result<()> {
    writeln!(w, "{}", program.description)?;
    writeln!(w)?;
    write!(w, "Usage:\n\t{} command [arguments]\n\n", program.name)?;
    write!(w, "The commands are:\n\n")?;
    write_listing(w, registry.commands())?;
    write!(
        w,
        "\nUse \"{} help [command]\" for more information about a command\n\n",
        program.name
    )?;

    if registry.help_topics().is_empty() {
        return Ok(());
    }
    write!(w, "Additional help topics:\n\n")?;
    write_listing(w, registry.help_topics())?;
    write!(
        w,
        "\nUse \"{} help [topic]\" for more information about that topic\n\n",
        program.name
    )
}

fn write_listing(w: &mut dyn Write, entries: &[SubCommand]) -> io::Result<()> {
    for entry in entries {
        writeln!(w, "\t{}\t\t{}", entry.token, entry.short)?;
    }
    Ok(())
}

/// Handles `help [args...]`: the summary with no arguments, the detail for
/// a single token, a usage reminder otherwise.
pub fn write_help(
    w: &mut dyn Write,
    program: &Program,
    registry: &Registry,
    args: &[String],
) -> io::Result<()> {
    match args {
        [] => write_top_level(w, program, registry),
        [token] => write_detail(w, program, registry, token),
        _ => {
            write!(w, "usage: {} help command\n\n", program.name)?;
            writeln!(w, "Too many arguments given.")
        }
    }
}

/// Long help of a command (followed by its flags) or of a help topic.
pub fn write_detail(
    w: &mut dyn Write,
    program: &Program,
    registry: &Registry,
    token: &str,
) -> io::Result<()> {
    if let Some(cmd) = registry.command(token) {
        writeln!(w, "{}", cmd.help)?;
        return cmd.flags.write_defaults(w);
    }
    if let Some(topic) = registry.topic(token) {
        return writeln!(w, "{}", topic.help);
    }
    writeln!(w, "Unknown help topic \"{}\". Run \"{} help\".", token, program.name)
}
