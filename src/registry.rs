//! Ordered storage for subcommands and help topics.
//!
//! Both collections are kept sorted by token after every insertion. Sorting
//! is stable, so when a token is registered twice the first registration
//! stays ahead of the second and is the one dispatch reaches.
//!
//! The registry has no internal locking. Populate it before dispatching; hosts
//! that reconfigure commands from several threads must wrap it themselves.

use std::cmp::Ordering;

use crate::command::{HelpTopic, SubCommand};

/// Byte-wise order used for every listing.
pub fn token_order(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<SubCommand>,
    topics: Vec<SubCommand>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, allocating its flag set from its declarations.
    pub fn register_command(&mut self, mut cmd: SubCommand) {
        if self.command(&cmd.token).is_some() {
            tracing::warn!(
                command = %cmd.token,
                "duplicate command token, first registration wins"
            );
        }
        tracing::debug!(command = %cmd.token, "registering command");
        cmd.bind_flags();
        self.commands.push(cmd);
        self.commands.sort_by(|a, b| token_order(&a.token, &b.token));
    }

    pub fn register_help_topic(&mut self, topic: HelpTopic) {
        if self.topic(&topic.command).is_some() {
            tracing::warn!(topic = %topic.command, "duplicate help topic, first registration wins");
        }
        tracing::debug!(topic = %topic.command, "registering help topic");
        self.topics.push(topic.into());
        self.topics.sort_by(|a, b| token_order(&a.token, &b.token));
    }

    /// Replaces the first command with `token`, keeping its position.
    pub(crate) fn replace_command(&mut self, mut cmd: SubCommand) {
        cmd.bind_flags();
        match self.commands.iter_mut().find(|c| c.token == cmd.token) {
            Some(slot) => *slot = cmd,
            None => self.register_command(cmd),
        }
    }

    pub fn commands(&self) -> &[SubCommand] {
        &self.commands
    }

    pub fn help_topics(&self) -> &[SubCommand] {
        &self.topics
    }

    /// First command with `token` in iteration order.
    pub fn command(&self, token: &str) -> Option<&SubCommand> {
        self.commands.iter().find(|c| c.token == token)
    }

    pub fn topic(&self, token: &str) -> Option<&SubCommand> {
        self.topics.iter().find(|t| t.token == token)
    }
}
