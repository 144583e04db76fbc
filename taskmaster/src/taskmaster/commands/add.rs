use crate::taskmaster::commands::{Error, Reply};
use crate::taskmaster::connectors::discord::DiscordConnector;
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::store::{StoreKey, TaskStore};
use async_trait::async_trait;
use log::info;

/// Registers new tasks on a member's list.
#[async_trait]
pub trait Adder {
    async fn add(&self, requester: &Requester, description: &str) -> Result<(), Error>;
}

pub struct AdderImpl<'a, STORE: TaskStore, DISCORD: DiscordConnector> {
    task_store: &'a STORE,
    discord_connector: &'a DISCORD,
}

impl<'a, STORE: TaskStore, DISCORD: DiscordConnector> AdderImpl<'a, STORE, DISCORD> {
    pub fn new(task_store: &'a STORE, discord_connector: &'a DISCORD) -> Self {
        Self {
            task_store,
            discord_connector,
        }
    }
}

#[async_trait]
impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync> Adder
    for AdderImpl<'a, STORE, DISCORD>
{
    async fn add(&self, requester: &Requester, description: &str) -> Result<(), Error> {
        let key = StoreKey::from(requester);
        self.task_store.ensure_initialized(key)?;
        let appended = self.task_store.append(key, description)?;
        if appended.at_capacity {
            // The cap is advisory: warn, but the task is registered regardless
            self.discord_connector
                .send_reply(&capacity_warning(requester))
                .await?;
        }
        info!("Registered task #{} for {}", appended.index, requester.user_name);
        self.discord_connector
            .send_reply(&success_reply(requester, appended.index, description))
            .await?;
        Ok(())
    }
}

fn success_reply(requester: &Requester, index: usize, description: &str) -> Reply {
    format!(
        "Successfully added a new task for **{}** 💪\n> **#{}:** {}",
        requester.user_name, index, description
    )
}

fn capacity_warning(requester: &Requester) -> Reply {
    format!(
        "Hey {}, how about completing some of your current tasks before registering new ones?\nType `!view` to see what is still open.",
        requester.mention
    )
}
