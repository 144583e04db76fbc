use crate::taskmaster::commands::{Error, Reply};
use crate::taskmaster::connectors::discord::DiscordConnector;
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::store;
use crate::taskmaster::store::{StoreKey, TaskStatus, TaskStore};
use async_trait::async_trait;

/// Reply for mark invocations whose index is not a number.
const MARK_USAGE: &str =
    "When marking a task as finished or cancelled, give me its index in the `description` field";

/// The two ways a member can close out a task.
///
/// The previous status is never inspected: marking overwrites whatever status
/// the task currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    Finished,
    Cancelled,
}

impl MarkAction {
    fn status(self) -> TaskStatus {
        match self {
            MarkAction::Finished => TaskStatus::Finished,
            MarkAction::Cancelled => TaskStatus::Cancelled,
        }
    }
}

/// Marks existing tasks as finished or cancelled.
#[async_trait]
pub trait Marker {
    async fn mark(
        &self,
        requester: &Requester,
        action: MarkAction,
        index_text: &str,
    ) -> Result<(), Error>;
}

pub struct MarkerImpl<'a, STORE: TaskStore, DISCORD: DiscordConnector> {
    task_store: &'a STORE,
    discord_connector: &'a DISCORD,
}

impl<'a, STORE: TaskStore, DISCORD: DiscordConnector> MarkerImpl<'a, STORE, DISCORD> {
    pub fn new(task_store: &'a STORE, discord_connector: &'a DISCORD) -> Self {
        Self {
            task_store,
            discord_connector,
        }
    }
}

#[async_trait]
impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync> Marker
    for MarkerImpl<'a, STORE, DISCORD>
{
    async fn mark(
        &self,
        requester: &Requester,
        action: MarkAction,
        index_text: &str,
    ) -> Result<(), Error> {
        let key = StoreKey::from(requester);
        self.task_store.ensure_initialized(key)?;
        let Ok(index) = index_text.trim().parse::<usize>() else {
            self.discord_connector.send_reply(MARK_USAGE).await?;
            return Ok(());
        };
        match self.task_store.set_status(key, index, action.status()) {
            Ok(_) => {
                self.discord_connector
                    .send_reply(&confirmation_reply(action, index))
                    .await?;
            }
            Err(store::Error::IndexOutOfRange { index, len }) => {
                self.discord_connector
                    .send_reply(&out_of_range_reply(index, len))
                    .await?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

fn confirmation_reply(action: MarkAction, index: usize) -> Reply {
    match action {
        MarkAction::Finished => "Successfully finished task 💪".to_string(),
        MarkAction::Cancelled => format!("Task {index} has been cancelled 😴💤"),
    }
}

fn out_of_range_reply(index: usize, len: usize) -> Reply {
    format!(
        "There is no task #{index}: you currently have {len} task(s). Type `!view` to check the indices."
    )
}
