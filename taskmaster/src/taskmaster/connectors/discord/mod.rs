//! Discord connectivity module for the task manager.
//!
//! This module provides abstractions for interacting with Discord, including:
//! - Error types for Discord connectivity issues
//! - The `DiscordConnector` trait for replying and awaiting follow-up messages
//! - The `Requester` data structure describing the invoking member
//!
//! The module is designed to be implementation-agnostic, allowing for different
//! Discord client libraries to be used by implementing the `DiscordConnector`
//! trait. A concrete implementation using the Serenity library is provided in
//! the `serenity` submodule.

use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;
use thiserror::Error;

pub(crate) mod requester;
pub(crate) mod serenity;

/// Errors that can occur during Discord connectivity operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The command was not executed in a server channel
    #[error("Not in a server channel")]
    NotInServerChannel,
    /// Failed to send a reply message
    #[error("Cannot send reply")]
    CannotSendReply,
    /// Failed to wait for a follow-up message
    #[error("Cannot await reply")]
    CannotAwaitReply,
}

/// Trait for abstracting Discord interactions within one command invocation.
#[automock]
#[async_trait]
pub trait DiscordConnector {
    /// Sends a reply to the person that invoked the command
    async fn send_reply(&self, message: &str) -> Result<(), Error>;

    /// Waits for the next message sent by the invoking member in the channel
    /// the command came from.
    ///
    /// This is a single-shot subscription: it resolves with the first matching
    /// message, or with `None` once `timeout` elapses without one.
    async fn await_reply(&self, timeout: Duration) -> Result<Option<String>, Error>;
}
