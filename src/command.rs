use std::fmt;

use crate::flags::{Flag, FlagSet, Input};

/// Behavior run when a subcommand is dispatched.
///
/// Implemented for any `Fn(&Input) -> anyhow::Result<()>`, so most hosts
/// register closures.
pub trait Handler: Send + Sync {
    fn run(&self, input: &Input<'_>) -> anyhow::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Input<'_>) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, input: &Input<'_>) -> anyhow::Result<()> {
        self(input)
    }
}

/// Handler that does nothing. Backs help topics and commands registered
/// without behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

impl Handler for NoOp {
    fn run(&self, _input: &Input<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A registrable subcommand.
///
/// ```
/// use subcli::{Flag, SubCommand};
///
/// let cmd = SubCommand::new("greet")
///     .short("print a greeting")
///     .help("usage: demo greet [--loud] name")
///     .flag(Flag::switch("loud", "shout the greeting"))
///     .handler(|input: &subcli::Input<'_>| {
///         println!("hello {}", input.args().join(" "));
///         Ok(())
///     });
/// assert_eq!(cmd.token(), "greet");
/// ```
pub struct SubCommand {
    pub(crate) token: String,
    pub(crate) short: String,
    pub(crate) help: String,
    pub(crate) handler: Box<dyn Handler>,
    pub(crate) declared: Vec<Flag>,
    pub(crate) flags: FlagSet,
}

impl SubCommand {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        SubCommand {
            flags: FlagSet::new(token.clone(), Vec::new()),
            token,
            short: String::new(),
            help: String::new(),
            handler: Box::new(NoOp),
            declared: Vec::new(),
        }
    }

    /// One-line description shown in listings and completions.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Long help text shown by `help <command>`.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.declared.push(flag);
        self
    }

    pub fn flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.declared.extend(flags);
        self
    }

    /// Runs `f` when the command is dispatched.
    pub fn handler<F>(self, f: F) -> Self
    where
        F: Fn(&Input<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action(f)
    }

    /// Like [`SubCommand::handler`], for any [`Handler`] implementation.
    pub fn action(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn short_description(&self) -> &str {
        &self.short
    }

    pub fn long_help(&self) -> &str {
        &self.help
    }

    /// Flags in effect. Empty until the command is registered.
    pub fn flag_set(&self) -> &FlagSet {
        &self.flags
    }

    /// Allocates this command's own flag set from its declarations.
    pub(crate) fn bind_flags(&mut self) {
        self.flags = FlagSet::new(self.token.clone(), self.declared.iter().cloned());
    }
}

impl fmt::Debug for SubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubCommand")
            .field("token", &self.token)
            .field("short", &self.short)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Documentation-only entry listed under "Additional help topics".
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct HelpTopic {
    pub command: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub help: String,
}

impl HelpTopic {
    pub fn new(
        command: impl Into<String>,
        short: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        HelpTopic {
            command: command.into(),
            short: short.into(),
            help: help.into(),
        }
    }
}

impl From<HelpTopic> for SubCommand {
    fn from(topic: HelpTopic) -> Self {
        SubCommand::new(topic.command)
            .short(topic.short)
            .help(topic.help)
    }
}
