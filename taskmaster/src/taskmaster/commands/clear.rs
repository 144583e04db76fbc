use crate::taskmaster::commands::view::no_tasks_reply;
use crate::taskmaster::commands::{Error, Reply};
use crate::taskmaster::config;
use crate::taskmaster::connectors::discord::DiscordConnector;
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::store::{StoreKey, TaskStatus, TaskStore};
use async_trait::async_trait;
use log::info;

const CONFIRMATION_PROMPT: &str = "Are you sure you want to delete all of your tasks? (Y/n)";

/// Which class of tasks a clear invocation removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Finished,
    Cancelled,
    All,
}

impl ClearScope {
    /// Parses the `which` argument of the clear command.
    pub(crate) fn parse(which: &str) -> Option<Self> {
        match which {
            "finished" => Some(ClearScope::Finished),
            "cancelled" => Some(ClearScope::Cancelled),
            "all" => Some(ClearScope::All),
            _ => None,
        }
    }
}

/// Bulk-removes tasks from a member's list.
#[async_trait]
pub trait Clearer {
    async fn clear(&self, requester: &Requester, scope: ClearScope) -> Result<(), Error>;
}

pub struct ClearerImpl<'a, STORE: TaskStore, DISCORD: DiscordConnector> {
    task_store: &'a STORE,
    discord_connector: &'a DISCORD,
}

impl<'a, STORE: TaskStore, DISCORD: DiscordConnector> ClearerImpl<'a, STORE, DISCORD> {
    pub fn new(task_store: &'a STORE, discord_connector: &'a DISCORD) -> Self {
        Self {
            task_store,
            discord_connector,
        }
    }
}

#[async_trait]
impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync> Clearer
    for ClearerImpl<'a, STORE, DISCORD>
{
    async fn clear(&self, requester: &Requester, scope: ClearScope) -> Result<(), Error> {
        let key = StoreKey::from(requester);
        if !self.task_store.exists(key) {
            self.discord_connector
                .send_reply(&no_tasks_reply(requester))
                .await?;
            return Ok(());
        }
        match scope {
            ClearScope::All => self.clear_all(requester, key).await,
            ClearScope::Finished => {
                self.clear_with_status(requester, key, TaskStatus::Finished)
                    .await
            }
            ClearScope::Cancelled => {
                self.clear_with_status(requester, key, TaskStatus::Cancelled)
                    .await
            }
        }
    }
}

impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync>
    ClearerImpl<'a, STORE, DISCORD>
{
    /// Interactive bulk deletion: one confirmation round-trip, no retries.
    ///
    /// A timed-out prompt is abandoned with no reply and no change; any
    /// response other than the exact confirmation token aborts.
    async fn clear_all(&self, requester: &Requester, key: StoreKey) -> Result<(), Error> {
        self.discord_connector
            .send_reply(CONFIRMATION_PROMPT)
            .await?;
        let Some(response) = self
            .discord_connector
            .await_reply(config::CONFIRMATION_TIMEOUT)
            .await?
        else {
            info!("Bulk deletion confirmation timed out");
            return Ok(());
        };
        if response == config::CONFIRMATION_TOKEN {
            self.task_store.delete_all(key)?;
            self.discord_connector
                .send_reply(&cleared_all_reply(requester))
                .await?;
        } else {
            self.discord_connector
                .send_reply(&aborted_reply(requester))
                .await?;
        }
        Ok(())
    }

    async fn clear_with_status(
        &self,
        requester: &Requester,
        key: StoreKey,
        status: TaskStatus,
    ) -> Result<(), Error> {
        // The reply does not distinguish whether anything matched
        self.task_store.clear_with_status(key, status)?;
        self.discord_connector
            .send_reply(&cleared_reply(requester))
            .await?;
        Ok(())
    }
}

fn cleared_all_reply(requester: &Requester) -> Reply {
    format!("Cleared all of {}'s tasks 🧹", requester.mention)
}

fn cleared_reply(requester: &Requester) -> Reply {
    format!("Cleared selected {}'s tasks 🧹", requester.mention)
}

fn aborted_reply(requester: &Requester) -> Reply {
    format!(
        "**{}**'s tasks have not been removed: Action aborted",
        requester.user_name
    )
}
