//! # subcli
//!
//! Subcommand dispatch for "tool command [flags] [args]" style programs.
//!
//! Register subcommands (each with its own flags and handler) and help
//! topics on a [`SubCli`], then dispatch the process arguments once. `help`
//! and `version` are builtins. The same registry renders the usage summary
//! and shell completion scripts.
//!
//! ```
//! use subcli::{Flag, Input, Outcome, Program, SubCli, SubCommand};
//!
//! let mut cli = SubCli::new(Program::new("demo", "1.0", "A demo tool"))
//!     .with_output(std::io::sink());
//! cli.add_cmd(
//!     SubCommand::new("greet")
//!         .short("print a greeting")
//!         .flag(Flag::switch("loud", "shout"))
//!         .handler(|input: &Input<'_>| {
//!             assert!(input.flag("loud"));
//!             Ok(())
//!         }),
//! )
//! .unwrap();
//!
//! let outcome = cli.dispatch(&["demo", "greet", "--loud", "world"]).unwrap();
//! assert_eq!(outcome, Outcome::Ran { command: "greet".into() });
//! assert_eq!(cli.args(), ["world"]);
//! ```

pub mod command;
pub mod completions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod global;
pub mod help;
pub mod program;
pub mod registry;

pub use command::{Handler, HelpTopic, NoOp, SubCommand};
pub use completions::Shell;
pub use config::{load_manifest, Manifest};
pub use dispatch::{Outcome, ParseErrorPolicy, SubCli};
pub use error::{Error, Result};
pub use flags::{Flag, FlagKind, FlagSet, Input};
pub use program::Program;
pub use registry::Registry;
