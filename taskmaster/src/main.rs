mod taskmaster;

use self::taskmaster::config::Config;
use self::taskmaster::connectors::discord::serenity::{
    Context, Data, SerenityDiscordConnector,
};
use self::taskmaster::store::file::FileTaskStore;
use crate::taskmaster::{TaskMaster, TaskMasterImpl};
use log::{LevelFilter, info};
use log4rs::config::{Appender, Logger, Root};
use log4rs::append::console::ConsoleAppender;
use poise::serenity_prelude as serenity;

/// Ping command to test bot availability
///
/// Any instance of bot connected to the server will respond with "Pong!".
#[poise::command(prefix_command, slash_command)]
async fn ping(ctx: Context<'_>) -> anyhow::Result<()> {
    ctx.reply("Pong!").await?;
    Ok(())
}

/// Show this menu
#[poise::command(prefix_command, slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"] command: Option<String>,
) -> anyhow::Result<()> {
    let config = poise::builtins::HelpConfiguration {
        extra_text_at_bottom: "\
Type !help command for more info on a command.",
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}

/// Manage your personal task list
///
/// Use `add` with a description to register a task, or `finished`/`cancel`
/// with a task's index to close it out.
#[poise::command(prefix_command, slash_command)]
async fn task(
    ctx: Context<'_>,
    #[description = "What to do: add, finished, or cancel"] action: String,
    #[description = "The task description, or its index when finishing/cancelling"]
    #[rest]
    description: String,
) -> anyhow::Result<()> {
    let connector = SerenityDiscordConnector::new(ctx);
    let requester = connector.requester()?;
    let taskmaster = TaskMasterImpl::new(&ctx.data().task_store, &connector);
    taskmaster.task(&requester, &action, &description).await?;
    Ok(())
}

/// List your registered tasks, oldest first
#[poise::command(prefix_command, slash_command)]
async fn view(ctx: Context<'_>) -> anyhow::Result<()> {
    let connector = SerenityDiscordConnector::new(ctx);
    let requester = connector.requester()?;
    let taskmaster = TaskMasterImpl::new(&ctx.data().task_store, &connector);
    taskmaster.view(&requester).await?;
    Ok(())
}

/// Bulk-remove tasks by status
///
/// Clearing `all` asks for confirmation first; `finished` and `cancelled`
/// remove just that class of tasks.
#[poise::command(prefix_command, slash_command)]
async fn clear(
    ctx: Context<'_>,
    #[description = "Which tasks to remove: finished, cancelled, or all"] which: String,
) -> anyhow::Result<()> {
    let connector = SerenityDiscordConnector::new(ctx);
    let requester = connector.requester()?;
    let taskmaster = TaskMasterImpl::new(&ctx.data().task_store, &connector);
    taskmaster.clear(&requester, &which).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let stdout = ConsoleAppender::builder().build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .logger(Logger::builder().build("taskmaster", LevelFilter::Info))
        .build(Root::builder().appender("stdout").build(LevelFilter::Warn))
        .unwrap();
    let _log4rs_handle = log4rs::init_config(config).unwrap();
    let token = std::env::var("DISCORD_TOKEN").expect("missing DISCORD_TOKEN");
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MESSAGES;

    let framework = poise::Framework::<Data, anyhow::Error>::builder()
        .options(poise::FrameworkOptions {
            commands: vec![help(), ping(), task(), view(), clear()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                let config = Config::new()?;
                info!(
                    "Serving up to {} tasks per member out of {}",
                    config.max_number_of_tasks,
                    config.storage_root.display()
                );
                let task_store =
                    FileTaskStore::new(config.storage_root, config.max_number_of_tasks);
                Ok(Data { task_store })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await;

    info!("Starting bot...");
    client.unwrap().start().await.unwrap();
}
