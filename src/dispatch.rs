//! The [`SubCli`] context: program identity, registry, output sink and the
//! single-pass dispatcher.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use crate::command::{HelpTopic, NoOp, SubCommand};
use crate::completions::{self, Shell};
use crate::config::{load_manifest, Manifest};
use crate::error::{Error, Result};
use crate::flags::Parsed;
use crate::help;
use crate::program::Program;
use crate::registry::Registry;

const HELP: &str = "help";
const VERSION: &str = "version";

/// What to do when a command's flags fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorPolicy {
    /// Print the error, then run the handler with the raw arguments.
    #[default]
    Continue,
    /// Print the error and skip the handler.
    Abort,
}

/// How a call to [`SubCli::dispatch`] was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `help` (or no command): summary, detail or usage reminder printed.
    Help,
    /// `version` printed.
    Version,
    /// Handler of `command` ran.
    Ran { command: String },
    /// `command -h` printed the command's help instead of running it.
    CommandHelp { command: String },
    /// Flags of `command` failed to parse and the handler was skipped.
    ParseFailed { command: String },
    /// No builtin or registered command matched.
    Unknown { command: String },
}

/// A command line: who the program is, what it can do, where text goes.
///
/// Register commands and topics first, then call [`SubCli::dispatch`] once.
/// The type does no locking; registering while another thread dispatches is
/// not supported.
pub struct SubCli {
    program: Program,
    registry: Registry,
    output: Box<dyn Write + Send>,
    policy: ParseErrorPolicy,
    args: Vec<String>,
}

impl SubCli {
    /// New command line writing to stderr, with the `version` builtin listed.
    pub fn new(program: Program) -> Self {
        let mut cli = SubCli {
            program,
            registry: Registry::new(),
            output: Box::new(io::stderr()),
            policy: ParseErrorPolicy::default(),
            args: Vec::new(),
        };
        cli.registry.register_command(cli.version_entry());
        cli
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut cli = SubCli::new(manifest.program);
        for topic in manifest.topics {
            cli.add_help(topic);
        }
        cli
    }

    /// Reads a manifest file (see [`crate::config`]) and builds from it.
    pub fn from_manifest_file(path: &Path) -> Result<Self> {
        let manifest = load_manifest(path).map_err(Error::Manifest)?;
        Ok(SubCli::from_manifest(manifest))
    }

    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn set_output(&mut self, output: impl Write + Send + 'static) {
        self.output = Box::new(output);
    }

    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Replaces the program identity and refreshes the `version` entry.
    pub fn set_program(&mut self, program: Program) {
        self.program = program;
        let entry = self.version_entry();
        self.registry.replace_command(entry);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers a subcommand. `help` and `version` are builtins and are
    /// rejected, as are flags whose names cannot be parsed.
    pub fn add_cmd(&mut self, cmd: SubCommand) -> Result<()> {
        if cmd.token == HELP || cmd.token == VERSION {
            return Err(Error::Reserved(cmd.token));
        }
        if let Some((flag, reason)) = cmd
            .declared
            .iter()
            .find_map(|f| f.name_problem().map(|reason| (f.name(), reason)))
        {
            return Err(Error::InvalidFlag {
                command: cmd.token.clone(),
                flag: flag.to_string(),
                reason,
            });
        }
        self.registry.register_command(cmd);
        Ok(())
    }

    pub fn add_help(&mut self, topic: HelpTopic) {
        self.registry.register_help_topic(topic);
    }

    /// Positional arguments left for the last dispatched command.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Dispatches the process arguments.
    pub fn run(&mut self) -> Result<Outcome> {
        let args: Vec<String> = std::env::args().collect();
        self.dispatch(&args)
    }

    /// Resolves `args[1]` to a builtin, a registered command, or nothing,
    /// and acts on it. `args[0]` is the program name and is not inspected.
    /// A missing or empty `args[1]` behaves like `help`.
    pub fn dispatch<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Outcome> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let token = args.get(1).map(String::as_str);
        let rest = args.get(2..).unwrap_or_default();
        tracing::debug!(command = ?token, args = ?rest, "dispatching");

        match token {
            None | Some("") | Some(HELP) => {
                help::write_help(&mut self.output, &self.program, &self.registry, rest)?;
                Ok(Outcome::Help)
            }
            Some(VERSION) => {
                writeln!(
                    self.output,
                    "{} version {}",
                    self.program.name, self.program.version
                )?;
                Ok(Outcome::Version)
            }
            Some(token) => self.run_command(token, rest),
        }
    }

    fn run_command(&mut self, token: &str, rest: &[String]) -> Result<Outcome> {
        let Some(cmd) = self.registry.command(token) else {
            tracing::debug!(command = token, "unknown subcommand");
            writeln!(
                self.output,
                "{}: unknown subcommand \"{}\"",
                self.program.name, token
            )?;
            writeln!(self.output, "Run \"{} help\" for usage.", self.program.name)?;
            return Ok(Outcome::Unknown {
                command: token.to_string(),
            });
        };

        let parsed = match cmd.flags.parse(rest) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(command = token, error = %err, "flag parsing failed");
                let message = err.to_string();
                write!(self.output, "{message}")?;
                if !message.ends_with('\n') {
                    writeln!(self.output)?;
                }
                if self.policy == ParseErrorPolicy::Abort {
                    return Ok(Outcome::ParseFailed {
                        command: token.to_string(),
                    });
                }
                Parsed::unparsed(rest)
            }
        };

        if parsed.help_requested() {
            help::write_detail(&mut self.output, &self.program, &self.registry, token)?;
            return Ok(Outcome::CommandHelp {
                command: token.to_string(),
            });
        }

        self.args = parsed.args().to_vec();
        tracing::debug!(command = token, args = ?self.args, "running handler");
        cmd.handler
            .run(&parsed.input(&cmd.token))
            .map_err(|source| Error::Handler {
                command: token.to_string(),
                source,
            })?;
        Ok(Outcome::Ran {
            command: token.to_string(),
        })
    }

    /// Writes shell completions to the output sink.
    pub fn completions(&mut self, shell: Shell) -> Result<()> {
        completions::generate(shell, &self.program, &self.registry, &mut self.output)
    }

    /// Writes shell completions to `w` instead of the output sink.
    pub fn write_completions(&self, shell: Shell, w: &mut dyn Write) -> Result<()> {
        completions::generate(shell, &self.program, &self.registry, w)
    }

    fn version_entry(&self) -> SubCommand {
        let name = &self.program.name;
        SubCommand::new(VERSION)
            .short(format!("prints {name} version"))
            .help(format!("usage: {name} version\n\nPrint the version of {name}"))
            .action(NoOp)
    }
}

impl fmt::Debug for SubCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubCli")
            .field("program", &self.program)
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
