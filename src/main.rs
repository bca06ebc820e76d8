//! # subcli demo
//!
//! A small program built on the `subcli` library, used to try the dispatcher
//! from a real shell and by the integration tests.
//!
//! ```bash
//! subcli                        # usage summary
//! subcli greet --loud world     # run a command
//! subcli help greet             # command help with its flags
//! subcli completions fish       # completion script on stdout
//! ```
//!
//! If `subcli.yaml` (or the file named by `SUBCLI_MANIFEST`) exists, program
//! identity and help topics are read from it. Set `RUST_LOG=debug` to trace
//! dispatch decisions.

use anyhow::{bail, Result};
use std::io;
use subcli::config::manifest_path;
use subcli::{program, Flag, HelpTopic, Input, Outcome, Shell, SubCli, SubCommand};
use tracing_subscriber::EnvFilter;

fn greet(input: &Input<'_>) -> Result<()> {
    let greeting = input.value("greeting").unwrap_or("hello");
    let name = if input.args().is_empty() {
        "world".to_string()
    } else {
        input.args().join(" ")
    };
    let line = format!("{greeting}, {name}!");
    if input.flag("loud") {
        println!("{}", line.to_uppercase());
    } else {
        println!("{line}");
    }
    Ok(())
}

fn check_shell(input: &Input<'_>) -> Result<()> {
    match input.args() {
        [shell] => {
            shell.parse::<Shell>()?;
            Ok(())
        }
        _ => bail!("usage: completions <shell>"),
    }
}

fn build() -> Result<SubCli> {
    let path = manifest_path("subcli.yaml");
    let mut cli = if path.exists() {
        SubCli::from_manifest_file(&path)?
    } else {
        SubCli::new(program!())
    };

    cli.add_cmd(
        SubCommand::new("greet")
            .short("print a greeting")
            .help(
                "usage: greet [--loud] [--greeting value] [name...]\n\n\
                 Greet someone, the world by default.",
            )
            .flags([
                Flag::switch("loud", "print in upper case"),
                Flag::value("greeting", "greeting word").default_value("hello"),
            ])
            .handler(greet),
    )?;
    cli.add_cmd(
        SubCommand::new("completions")
            .short("emit shell completion script")
            .help(
                "usage: completions <bash|elvish|fish|powershell|zsh>\n\n\
                 Write a completion script for the given shell to stdout.",
            )
            .handler(check_shell),
    )?;
    cli.add_help(HelpTopic::new(
        "logging",
        "diagnostic output",
        "Set RUST_LOG (for example RUST_LOG=debug) to trace how arguments are dispatched.",
    ));
    Ok(cli)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut cli = build()?;
    if let Outcome::Ran { command } = cli.run()? {
        if let (true, Some(shell)) = (command == "completions", cli.args().first()) {
            let shell: Shell = shell.parse()?;
            cli.write_completions(shell, &mut io::stdout())?;
        }
    }
    Ok(())
}
