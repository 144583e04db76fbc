//! Command handlers for the task manager.
//!
//! One submodule per user-facing operation: adding a task, marking it
//! finished or cancelled, viewing the list, and bulk clearing. Each handler
//! is a small service over a [`TaskStore`](crate::taskmaster::store::TaskStore)
//! and a [`DiscordConnector`](crate::taskmaster::connectors::discord::DiscordConnector),
//! validating input, performing the store operation, and formatting the reply.

use crate::taskmaster::connectors::discord;
use crate::taskmaster::store;
use thiserror::Error;

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod mark;
pub(crate) mod view;

pub(crate) type Reply = String;

/// Reply for `task` invocations whose action is not part of the command.
pub(crate) const INVALID_TASK_USAGE: &str =
    "Invalid use of the `task` command: the action must be `add`, `finished` or `cancel`. Try again ☕";

/// Reply for `clear` invocations whose scope is not part of the command.
pub(crate) const INVALID_CLEAR_USAGE: &str =
    "Invalid use of the `clear` command: tell me whether to clear `finished`, `cancelled` or `all` tasks. Try again ☕";

/// Last-resort reply when a store or connectivity failure stops a command.
pub(crate) const GENERIC_FAILURE: &str =
    "Something went wrong while handling your tasks. Try again later ☕";

/// Errors a command handler can fail with.
///
/// User-correctable input problems never surface here; handlers translate
/// those into chat replies directly. What remains are persistence and
/// connectivity failures, fatal to the one command that hit them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Task store failure: {0}")]
    Store(#[from] store::Error),
    #[error("Discord connectivity failure: {0}")]
    Discord(#[from] discord::Error),
}
