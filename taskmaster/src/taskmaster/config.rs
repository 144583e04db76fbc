use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Exact reply required to confirm a bulk deletion. Anything else aborts.
pub const CONFIRMATION_TOKEN: &str = "Y";

/// How long a bulk deletion waits for its confirmation reply.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the task manager.
///
/// `max_number_of_tasks` is the one required setting: the advisory cap on a
/// member's list length before add commands start warning. It is usually
/// supplied via the `MAX_NUMBER_OF_TASKS` environment variable, with
/// `taskmaster/config.toml` as an optional file source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub max_number_of_tasks: usize,
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./guilds")
}

impl Config {
    pub(crate) fn new() -> anyhow::Result<Self> {
        let s = config::Config::builder()
            .add_source(config::File::with_name("taskmaster/config").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Ok(s.try_deserialize()?)
    }
}
