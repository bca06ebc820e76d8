//! Per-command flag declarations, parsed with `clap`.
//!
//! A [`FlagSet`] is built from the [`Flag`] list of a subcommand when the
//! subcommand is registered. Parsing stops at the first positional argument
//! (or after `--`); everything from there on is handed to the handler.

use std::io::{self, Write};

use clap::{Arg, ArgAction, ArgMatches, Command};

const RESERVED_PREFIX: &str = "__subcli_";
const RESIDUAL_ID: &str = "__subcli_args";
const HELP_ID: &str = "__subcli_help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Boolean flag, set by its presence.
    Switch,
    /// Flag taking exactly one string value.
    Value,
}

/// Declaration of a single option accepted by a subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    usage: String,
    kind: FlagKind,
    default: Option<String>,
}

impl Flag {
    pub fn switch(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Flag {
            name: name.into(),
            usage: usage.into(),
            kind: FlagKind::Switch,
            default: None,
        }
    }

    pub fn value(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Flag {
            name: name.into(),
            usage: usage.into(),
            kind: FlagKind::Value,
            default: None,
        }
    }

    /// Default used when a value flag is not given. Ignored for switches.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    /// Why clap would refuse this name, if it would.
    pub fn name_problem(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name is empty")
        } else if self.name.starts_with('-') {
            Some("name starts with '-'")
        } else if self.name.contains('=') {
            Some("name contains '='")
        } else if self.name.chars().any(char::is_whitespace) {
            Some("name contains whitespace")
        } else if self.name.starts_with(RESERVED_PREFIX) {
            Some("name uses a reserved prefix")
        } else {
            None
        }
    }

    fn is_short(&self) -> bool {
        self.name.chars().count() == 1
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.usage.clone());
        if self.is_short() {
            if let Some(c) = self.name.chars().next() {
                arg = arg.short(c);
            }
        }
        match self.kind {
            FlagKind::Switch => arg.action(ArgAction::SetTrue),
            FlagKind::Value => {
                arg = arg.action(ArgAction::Set).value_name("value");
                if let Some(default) = &self.default {
                    arg = arg.default_value(default.clone());
                }
                arg
            }
        }
    }
}

/// The flags owned by one subcommand, bound to its token.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    name: String,
    flags: Vec<Flag>,
}

impl FlagSet {
    /// Builds a set sorted by flag name. A repeated name keeps its first
    /// declaration.
    pub fn new(name: impl Into<String>, flags: impl IntoIterator<Item = Flag>) -> Self {
        let name = name.into();
        let mut unique: Vec<Flag> = Vec::new();
        for flag in flags {
            if unique.iter().any(|f| f.name == flag.name) {
                tracing::warn!(command = %name, flag = %flag.name, "duplicate flag ignored");
                continue;
            }
            unique.push(flag);
        }
        unique.sort_by(|a, b| a.name.cmp(&b.name));
        FlagSet {
            name,
            flags: unique,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Name and usage of every declared flag, in name order.
    pub fn visit_all(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.flags.iter().map(|f| (f.name(), f.usage()))
    }

    /// `clap` view of this set, also used to feed completion generators.
    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args(self.flags.iter().map(Flag::to_arg))
            .arg(
                Arg::new(RESIDUAL_ID)
                    .value_name("args")
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .action(ArgAction::Append),
            );

        let short_free = !self.flags.iter().any(|f| f.name == "h");
        let long_free = !self.flags.iter().any(|f| f.name == "help");
        if short_free || long_free {
            let mut help = Arg::new(HELP_ID).action(ArgAction::SetTrue).hide(true);
            if short_free {
                help = help.short('h');
            }
            if long_free {
                help = help.long("help");
            }
            cmd = cmd.arg(help);
        }
        cmd
    }

    /// Parses `args` (everything after the command token).
    pub fn parse(&self, args: &[String]) -> Result<Parsed, clap::Error> {
        let matches = self.command().try_get_matches_from(args)?;
        let positional = matches
            .get_many::<String>(RESIDUAL_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let help_requested = matches
            .try_get_one::<bool>(HELP_ID)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);
        Ok(Parsed {
            args: positional,
            matches: Some(matches),
            help_requested,
        })
    }

    /// Writes the defaults listing shown under a command's help text.
    pub fn write_defaults(&self, w: &mut dyn Write) -> io::Result<()> {
        for flag in &self.flags {
            if flag.is_short() {
                write!(w, "  -{}", flag.name)?;
            } else {
                write!(w, "  --{}", flag.name)?;
            }
            if flag.kind == FlagKind::Value {
                write!(w, " value")?;
            }
            if flag.is_short() {
                write!(w, "\t")?;
            } else {
                write!(w, "\n    \t")?;
            }
            write!(w, "{}", flag.usage)?;
            if let (FlagKind::Value, Some(default)) = (flag.kind, &flag.default) {
                write!(w, " (default {default:?})")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

/// Result of parsing a command's arguments.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    args: Vec<String>,
    matches: Option<ArgMatches>,
    help_requested: bool,
}

impl Parsed {
    /// Stand-in used when parsing failed and the handler still runs: the
    /// raw residual becomes the positional list and no flag is set.
    pub fn unparsed(args: &[String]) -> Self {
        Parsed {
            args: args.to_vec(),
            matches: None,
            help_requested: false,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn help_requested(&self) -> bool {
        self.help_requested
    }

    pub fn input<'a>(&'a self, command: &'a str) -> Input<'a> {
        Input {
            command,
            args: &self.args,
            matches: self.matches.as_ref(),
        }
    }
}

/// What a handler sees: its command token, positional arguments and flags.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    command: &'a str,
    args: &'a [String],
    matches: Option<&'a ArgMatches>,
}

impl<'a> Input<'a> {
    /// Input with positional arguments only, for calling handlers directly.
    pub fn new(command: &'a str, args: &'a [String]) -> Self {
        Input {
            command,
            args,
            matches: None,
        }
    }

    pub fn command(&self) -> &'a str {
        self.command
    }

    pub fn args(&self) -> &'a [String] {
        self.args
    }

    /// Whether switch `name` was given. Unknown names read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.matches
            .and_then(|m| m.try_get_one::<bool>(name).ok().flatten().copied())
            .unwrap_or(false)
    }

    /// Value of flag `name`, falling back to its declared default.
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.matches
            .and_then(|m| m.try_get_one::<String>(name).ok().flatten())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> FlagSet {
        FlagSet::new(
            "build",
            [
                Flag::value("out", "output directory").default_value("target"),
                Flag::switch("v", "verbose output"),
            ],
        )
    }

    #[test]
    fn test_visit_all_is_sorted_by_name() {
        let set = FlagSet::new(
            "x",
            [Flag::switch("zeta", "z"), Flag::switch("alpha", "a")],
        );
        let names: Vec<_> = set.visit_all().map(|(n, _)| n).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn test_duplicate_flag_keeps_first() {
        let set = FlagSet::new("x", [Flag::switch("a", "first"), Flag::switch("a", "second")]);
        let pairs: Vec<_> = set.visit_all().collect();
        assert_eq!(pairs, [("a", "first")]);
    }

    #[test]
    fn test_parse_flags_then_positionals() {
        let parsed = sample()
            .parse(&strings(&["-v", "--out", "dist", "one", "--two"]))
            .unwrap();
        assert_eq!(parsed.args(), strings(&["one", "--two"]).as_slice());
        let input = parsed.input("build");
        assert!(input.flag("v"));
        assert_eq!(input.value("out"), Some("dist"));
        assert!(!parsed.help_requested());
    }

    #[test]
    fn test_parse_uses_default_value() {
        let parsed = sample().parse(&[]).unwrap();
        let input = parsed.input("build");
        assert!(parsed.args().is_empty());
        assert!(!input.flag("v"));
        assert_eq!(input.value("out"), Some("target"));
        assert_eq!(input.value("missing"), None);
    }

    #[test]
    fn test_parse_double_dash_ends_flags() {
        let parsed = sample().parse(&strings(&["--", "-v"])).unwrap();
        assert_eq!(parsed.args(), strings(&["-v"]).as_slice());
        assert!(!parsed.input("build").flag("v"));
    }

    #[test]
    fn test_parse_unknown_flag_fails() {
        assert!(sample().parse(&strings(&["--nope"])).is_err());
    }

    #[test]
    fn test_help_flag_is_detected() {
        let parsed = sample().parse(&strings(&["-h"])).unwrap();
        assert!(parsed.help_requested());
    }

    #[test]
    fn test_host_declared_h_flag_wins() {
        let set = FlagSet::new("x", [Flag::switch("h", "human readable")]);
        let parsed = set.parse(&strings(&["-h"])).unwrap();
        assert!(!parsed.help_requested());
        assert!(parsed.input("x").flag("h"));
    }

    #[test]
    fn test_flag_name_problems() {
        assert_eq!(Flag::switch("-x", "bad").name_problem(), Some("name starts with '-'"));
        assert_eq!(Flag::value("", "bad").name_problem(), Some("name is empty"));
        assert_eq!(Flag::value("a=b", "bad").name_problem(), Some("name contains '='"));
        assert_eq!(Flag::switch("a b", "bad").name_problem(), Some("name contains whitespace"));
        assert!(Flag::switch("__subcli_args", "bad").name_problem().is_some());
        assert_eq!(Flag::switch("dry-run", "ok").name_problem(), None);
        assert_eq!(Flag::switch("v", "ok").name_problem(), None);
    }

    #[test]
    fn test_write_defaults() {
        let mut out = Vec::new();
        sample().write_defaults(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  --out value\n    \toutput directory (default \"target\")\n  -v\tverbose output\n"
        );
    }

    #[test]
    fn test_unparsed_input_has_no_flags() {
        let raw = strings(&["--bad", "x"]);
        let parsed = Parsed::unparsed(&raw);
        let input = parsed.input("build");
        assert_eq!(input.args(), raw.as_slice());
        assert!(!input.flag("v"));
        assert_eq!(input.value("out"), None);
    }
}
