pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod connectors;
pub(crate) mod identity;
pub(crate) mod store;

use crate::taskmaster::commands::add::{Adder, AdderImpl};
use crate::taskmaster::commands::clear::{ClearScope, Clearer, ClearerImpl};
use crate::taskmaster::commands::mark::{MarkAction, Marker, MarkerImpl};
use crate::taskmaster::commands::view::{Viewer, ViewerImpl};
use crate::taskmaster::commands::{
    Error, GENERIC_FAILURE, INVALID_CLEAR_USAGE, INVALID_TASK_USAGE,
};
use crate::taskmaster::connectors::discord::DiscordConnector;
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::store::TaskStore;
use async_trait::async_trait;
use log::error;

/// The command surface of the bot, one method per chat command.
///
/// Implementations translate every user-correctable problem into a chat
/// reply; an `Err` coming out of these methods means the reply channel
/// itself is broken.
#[async_trait]
pub trait TaskMaster {
    async fn task(&self, requester: &Requester, action: &str, description: &str)
    -> Result<(), Error>;
    async fn view(&self, requester: &Requester) -> Result<(), Error>;
    async fn clear(&self, requester: &Requester, which: &str) -> Result<(), Error>;
}

pub struct TaskMasterImpl<'a, STORE: TaskStore, DISCORD: DiscordConnector> {
    task_store: &'a STORE,
    discord_connector: &'a DISCORD,
}

impl<'a, STORE: TaskStore, DISCORD: DiscordConnector> TaskMasterImpl<'a, STORE, DISCORD> {
    pub fn new(task_store: &'a STORE, discord_connector: &'a DISCORD) -> Self {
        Self {
            task_store,
            discord_connector,
        }
    }
}

#[async_trait]
impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync> TaskMaster
    for TaskMasterImpl<'a, STORE, DISCORD>
{
    async fn task(
        &self,
        requester: &Requester,
        action: &str,
        description: &str,
    ) -> Result<(), Error> {
        let outcome = match action {
            "add" => {
                AdderImpl::new(self.task_store, self.discord_connector)
                    .add(requester, description)
                    .await
            }
            "finished" => {
                MarkerImpl::new(self.task_store, self.discord_connector)
                    .mark(requester, MarkAction::Finished, description)
                    .await
            }
            "cancel" => {
                MarkerImpl::new(self.task_store, self.discord_connector)
                    .mark(requester, MarkAction::Cancelled, description)
                    .await
            }
            _ => {
                self.discord_connector
                    .send_reply(INVALID_TASK_USAGE)
                    .await
                    .map_err(Error::from)
            }
        };
        self.recover(outcome).await
    }

    async fn view(&self, requester: &Requester) -> Result<(), Error> {
        let outcome = ViewerImpl::new(self.task_store, self.discord_connector)
            .view(requester)
            .await;
        self.recover(outcome).await
    }

    async fn clear(&self, requester: &Requester, which: &str) -> Result<(), Error> {
        let outcome = match ClearScope::parse(which) {
            Some(scope) => {
                ClearerImpl::new(self.task_store, self.discord_connector)
                    .clear(requester, scope)
                    .await
            }
            None => {
                self.discord_connector
                    .send_reply(INVALID_CLEAR_USAGE)
                    .await
                    .map_err(Error::from)
            }
        };
        self.recover(outcome).await
    }
}

impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync>
    TaskMasterImpl<'a, STORE, DISCORD>
{
    /// Turns a handler failure into a generic failure reply.
    ///
    /// Persistence and connectivity problems are fatal for the one command
    /// that hit them, never for the process: they get logged, the member gets
    /// a reply, and the command completes.
    async fn recover(&self, outcome: Result<(), Error>) -> Result<(), Error> {
        let Err(err) = outcome else {
            return Ok(());
        };
        error!("Command handling failed: {err}");
        self.discord_connector.send_reply(GENERIC_FAILURE).await?;
        Ok(())
    }
}
