//! Serenity-based implementation of Discord connectivity.
//!
//! This module provides the concrete implementation of the Discord connector
//! trait using the Serenity Discord library.

use crate::taskmaster::connectors::discord::Error::{CannotSendReply, NotInServerChannel};
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::connectors::discord::{DiscordConnector, Error};
use crate::taskmaster::store::file::FileTaskStore;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::time::Duration;

/// Discord connector implementation using the Serenity library.
///
/// Provides reply and follow-up-message functionality scoped to one command
/// invocation, using the Poise context.
pub struct SerenityDiscordConnector<'a> {
    context: Context<'a>,
}

impl<'a> SerenityDiscordConnector<'a> {
    /// Creates a new SerenityDiscordConnector instance.
    ///
    /// # Arguments
    ///
    /// * `context` - Poise command context for Discord interactions
    pub fn new(context: Context<'a>) -> Self {
        Self { context }
    }

    /// Builds the domain view of the member that invoked the command.
    ///
    /// # Returns
    ///
    /// * `Result<Requester, Error>` - The invoking member, or
    ///   `NotInServerChannel` when the command did not come from a guild
    pub fn requester(&self) -> Result<Requester, Error> {
        let ctx = &self.context;
        let Some(guild_id) = ctx.guild_id() else {
            return Err(NotInServerChannel);
        };
        let author = ctx.author();
        Ok(Requester {
            guild_id: guild_id.get(),
            user_id: author.id.get(),
            user_name: author.name.clone(),
            mention: format!("<@{}>", author.id.get()),
        })
    }
}

#[async_trait]
impl DiscordConnector for SerenityDiscordConnector<'_> {
    async fn send_reply(&self, message: &str) -> Result<(), Error> {
        let ctx = &self.context;
        let Ok(_) = ctx.reply(message).await else {
            return Err(CannotSendReply);
        };
        Ok(())
    }

    async fn await_reply(&self, timeout: Duration) -> Result<Option<String>, Error> {
        let ctx = &self.context;
        let response = serenity::MessageCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(timeout)
            .next()
            .await;
        Ok(response.map(|message| message.content))
    }
}

/// Data shared with every Poise command invocation
pub struct Data {
    pub task_store: FileTaskStore,
}

/// Type alias for Poise command context
pub type Context<'a> = poise::Context<'a, Data, anyhow::Error>;
