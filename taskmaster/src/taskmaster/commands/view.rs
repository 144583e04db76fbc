use crate::taskmaster::commands::{Error, Reply};
use crate::taskmaster::connectors::discord::DiscordConnector;
use crate::taskmaster::connectors::discord::requester::Requester;
use crate::taskmaster::store::{StoreKey, TaskList, TaskStore};
use async_trait::async_trait;

/// Lists a member's tasks.
#[async_trait]
pub trait Viewer {
    async fn view(&self, requester: &Requester) -> Result<(), Error>;
}

pub struct ViewerImpl<'a, STORE: TaskStore, DISCORD: DiscordConnector> {
    task_store: &'a STORE,
    discord_connector: &'a DISCORD,
}

impl<'a, STORE: TaskStore, DISCORD: DiscordConnector> ViewerImpl<'a, STORE, DISCORD> {
    pub fn new(task_store: &'a STORE, discord_connector: &'a DISCORD) -> Self {
        Self {
            task_store,
            discord_connector,
        }
    }
}

#[async_trait]
impl<'a, STORE: TaskStore + Send + Sync, DISCORD: DiscordConnector + Send + Sync> Viewer
    for ViewerImpl<'a, STORE, DISCORD>
{
    async fn view(&self, requester: &Requester) -> Result<(), Error> {
        let key = StoreKey::from(requester);
        if !self.task_store.exists(key) {
            self.discord_connector
                .send_reply(&no_tasks_reply(requester))
                .await?;
            return Ok(());
        }
        let tasks = self.task_store.load(key)?;
        if tasks.is_empty() {
            // An initialized but empty list reads the same as no list at all
            self.discord_connector
                .send_reply(&no_tasks_reply(requester))
                .await?;
            return Ok(());
        }
        self.discord_connector.send_reply(&render(&tasks)).await?;
        Ok(())
    }
}

/// Shared by every read-style command that finds nothing to show.
pub(crate) fn no_tasks_reply(requester: &Requester) -> Reply {
    format!("There are no registered tasks for {}", requester.mention)
}

/// Renders the list one task per line, status glyph before description.
fn render(tasks: &TaskList) -> Reply {
    tasks
        .iter()
        .enumerate()
        .map(|(position, task)| {
            format!("{}. {}{}", position + 1, task.status.glyph(), task.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
