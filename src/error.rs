//! Error types returned by the dispatcher and its helpers.
//!
//! User-facing conditions (unknown command, unknown help topic, too many help
//! arguments, flag parse failures) are printed to the output sink and are not
//! errors. The variants here cover what the caller has to act on.

use std::io;

/// Errors surfaced to the host program.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("writing to output failed: {0}")]
    Output(#[from] io::Error),

    #[error("\"{0}\" is a builtin command and cannot be registered")]
    Reserved(String),

    #[error("command \"{command}\" failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("command \"{command}\" declares invalid flag \"{flag}\": {reason}")]
    InvalidFlag {
        command: String,
        flag: String,
        reason: &'static str,
    },

    #[error("unsupported shell '{0}', choose: bash, elvish, fish, powershell, zsh")]
    UnsupportedShell(String),

    #[error("the default command line is already initialized")]
    AlreadyInitialized,

    #[error("the default command line has not been initialized")]
    NotInitialized,

    #[error("loading manifest: {0:#}")]
    Manifest(anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
