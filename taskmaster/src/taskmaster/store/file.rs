//! Flat-file implementation of the task store.
//!
//! Each guild gets a directory named after the obscured guild ID, and each
//! member of that guild gets a `<obscured user ID>.tasks` file inside it
//! holding their serialized task list. Directories and files are created
//! lazily on first use; a file is removed once a clear operation empties it,
//! while guild directories are never removed.

use crate::taskmaster::identity;
use crate::taskmaster::store::{Appended, Error, StoreKey, TaskList, TaskRecord, TaskStatus, TaskStore};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Task store backed by one JSON file per (guild, member) pair.
pub struct FileTaskStore {
    root: PathBuf,
    max_tasks: usize,
}

impl FileTaskStore {
    /// Creates a store rooted at `root` with an advisory cap of `max_tasks`
    /// tasks per member.
    pub fn new(root: PathBuf, max_tasks: usize) -> Self {
        Self { root, max_tasks }
    }

    fn guild_dir(&self, key: StoreKey) -> PathBuf {
        self.root.join(identity::obscure(key.guild_id))
    }

    fn task_file(&self, key: StoreKey) -> PathBuf {
        self.guild_dir(key)
            .join(format!("{}.tasks", identity::obscure(key.user_id)))
    }

    fn persist(&self, key: StoreKey, tasks: &TaskList) -> Result<(), Error> {
        let serialized = serde_json::to_vec(tasks)?;
        fs::write(self.task_file(key), serialized)?;
        Ok(())
    }
}

impl TaskStore for FileTaskStore {
    fn ensure_initialized(&self, key: StoreKey) -> Result<(), Error> {
        let guild_dir = self.guild_dir(key);
        if !guild_dir.exists() {
            fs::create_dir_all(&guild_dir)?;
            info!("Initialized task storage for a new guild");
        }
        if !self.task_file(key).exists() {
            self.persist(key, &TaskList::new())?;
        }
        Ok(())
    }

    fn exists(&self, key: StoreKey) -> bool {
        self.task_file(key).exists()
    }

    fn load(&self, key: StoreKey) -> Result<TaskList, Error> {
        let path = self.task_file(key);
        if !path.exists() {
            return Ok(TaskList::new());
        }
        let contents = fs::read(path)?;
        Ok(serde_json::from_slice(&contents)?)
    }

    fn append(&self, key: StoreKey, description: &str) -> Result<Appended, Error> {
        let mut tasks = self.load(key)?;
        let at_capacity = tasks.len() >= self.max_tasks;
        tasks.push(TaskRecord::added(description));
        self.persist(key, &tasks)?;
        let index = tasks.len();
        Ok(Appended {
            tasks,
            index,
            at_capacity,
        })
    }

    fn set_status(&self, key: StoreKey, index: usize, status: TaskStatus) -> Result<TaskList, Error> {
        let mut tasks = self.load(key)?;
        if index == 0 || index > tasks.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: tasks.len(),
            });
        }
        tasks[index - 1].status = status;
        self.persist(key, &tasks)?;
        Ok(tasks)
    }

    fn clear_with_status(&self, key: StoreKey, status: TaskStatus) -> Result<bool, Error> {
        let tasks = self.load(key)?;
        let len_before = tasks.len();
        let remaining: TaskList = tasks
            .into_iter()
            .filter(|task| task.status != status)
            .collect();
        let removed = remaining.len() != len_before;
        if remaining.is_empty() {
            self.delete_all(key)?;
        } else {
            self.persist(key, &remaining)?;
        }
        Ok(removed)
    }

    fn delete_all(&self, key: StoreKey) -> Result<(), Error> {
        match fs::remove_file(self.task_file(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GUILD_ID: u64 = 424242;
    const USER_ID: u64 = 171717;

    fn setup_store() -> (TempDir, FileTaskStore) {
        let temp = TempDir::new().unwrap();
        let store = FileTaskStore::new(temp.path().to_path_buf(), 10);
        (temp, store)
    }

    fn key() -> StoreKey {
        StoreKey {
            guild_id: GUILD_ID,
            user_id: USER_ID,
        }
    }

    #[test]
    fn test_ensure_initialized_creates_empty_list() {
        // Arrange
        let (_temp, store) = setup_store();

        // Act
        store.ensure_initialized(key()).unwrap();

        // Assert
        assert!(store.exists(key()));
        assert_eq!(store.load(key()).unwrap(), TaskList::new());
    }

    #[test]
    fn test_ensure_initialized_preserves_existing_list() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "buy milk").unwrap();

        // Act
        store.ensure_initialized(key()).unwrap();

        // Assert
        assert_eq!(store.load(key()).unwrap().len(), 1);
    }

    #[test]
    fn test_storage_paths_hide_raw_ids() {
        // Arrange
        let (temp, store) = setup_store();

        // Act
        store.ensure_initialized(key()).unwrap();

        // Assert: neither path component contains a raw decimal ID
        let guild_entry = fs::read_dir(temp.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name()
            .into_string()
            .unwrap();
        assert_eq!(guild_entry, identity::obscure(GUILD_ID));
        assert_ne!(guild_entry, GUILD_ID.to_string());
    }

    #[test]
    fn test_load_without_file_returns_empty_list() {
        // Arrange
        let (_temp, store) = setup_store();

        // Act
        let tasks = store.load(key()).unwrap();

        // Assert
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        fs::write(store.task_file(key()), b"definitely not json").unwrap();

        // Act
        let result = store.load(key());

        // Assert
        assert!(matches!(result, Err(Error::CorruptStore(_))));
    }

    #[test]
    fn test_load_rejects_unknown_status_code() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        fs::write(store.task_file(key()), br#"[[7,"mystery"]]"#).unwrap();

        // Act
        let result = store.load(key());

        // Assert
        assert!(matches!(result, Err(Error::CorruptStore(_))));
    }

    #[test]
    fn test_append_assigns_one_based_positions_in_order() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();

        // Act
        let first = store.append(key(), "first").unwrap();
        let second = store.append(key(), "second").unwrap();
        let third = store.append(key(), "third").unwrap();

        // Assert
        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert_eq!(third.index, 3);
        let tasks = store.load(key()).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].description, "first");
        assert_eq!(tasks[2].description, "third");
        assert!(tasks.iter().all(|task| task.status == TaskStatus::Added));
    }

    #[test]
    fn test_append_wire_format_uses_status_codes() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();

        // Act
        store.append(key(), "buy milk").unwrap();

        // Assert
        let contents = fs::read_to_string(store.task_file(key())).unwrap();
        assert_eq!(contents, r#"[[0,"buy milk"]]"#);
    }

    #[test]
    fn test_append_over_capacity_still_appends_but_flags_it() {
        // Arrange: a store that caps at a single task
        let temp = TempDir::new().unwrap();
        let store = FileTaskStore::new(temp.path().to_path_buf(), 1);
        store.ensure_initialized(key()).unwrap();

        // Act
        let first = store.append(key(), "within capacity").unwrap();
        let second = store.append(key(), "over capacity").unwrap();

        // Assert: the cap is advisory, the second append goes through
        assert!(!first.at_capacity);
        assert!(second.at_capacity);
        assert_eq!(second.index, 2);
        assert_eq!(store.load(key()).unwrap().len(), 2);
    }

    #[test]
    fn test_set_status_changes_only_the_addressed_task() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "buy milk").unwrap();
        store.append(key(), "write report").unwrap();

        // Act
        let tasks = store.set_status(key(), 1, TaskStatus::Finished).unwrap();

        // Assert
        assert_eq!(tasks[0].status, TaskStatus::Finished);
        assert_eq!(tasks[0].description, "buy milk");
        assert_eq!(tasks[1].status, TaskStatus::Added);
        assert_eq!(store.load(key()).unwrap(), tasks);
    }

    #[test]
    fn test_set_status_allows_overwriting_terminal_statuses() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "buy milk").unwrap();
        store.set_status(key(), 1, TaskStatus::Finished).unwrap();

        // Act: no transition table is enforced
        let tasks = store.set_status(key(), 1, TaskStatus::Cancelled).unwrap();

        // Assert
        assert_eq!(tasks[0].status, TaskStatus::Cancelled);
    }

    #[test]
    fn test_set_status_out_of_range_leaves_list_unchanged() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "first").unwrap();
        store.append(key(), "second").unwrap();
        store.append(key(), "third").unwrap();
        let before = fs::read(store.task_file(key())).unwrap();

        // Act
        let zero = store.set_status(key(), 0, TaskStatus::Finished);
        let past_end = store.set_status(key(), 4, TaskStatus::Finished);

        // Assert
        assert!(matches!(zero, Err(Error::IndexOutOfRange { index: 0, len: 3 })));
        assert!(matches!(past_end, Err(Error::IndexOutOfRange { index: 4, len: 3 })));
        assert_eq!(fs::read(store.task_file(key())).unwrap(), before);
    }

    #[test]
    fn test_clear_with_status_removes_only_matching_tasks() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "done").unwrap();
        store.append(key(), "open").unwrap();
        store.set_status(key(), 1, TaskStatus::Finished).unwrap();

        // Act
        let removed = store.clear_with_status(key(), TaskStatus::Finished).unwrap();

        // Assert
        assert!(removed);
        let tasks = store.load(key()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "open");
    }

    #[test]
    fn test_clear_with_status_deletes_file_when_nothing_remains() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "done").unwrap();
        store.append(key(), "also done").unwrap();
        store.set_status(key(), 1, TaskStatus::Finished).unwrap();
        store.set_status(key(), 2, TaskStatus::Finished).unwrap();

        // Act
        let removed = store.clear_with_status(key(), TaskStatus::Finished).unwrap();

        // Assert: no empty artifact is left behind, and a later load succeeds
        assert!(removed);
        assert!(!store.exists(key()));
        assert_eq!(store.load(key()).unwrap(), TaskList::new());
    }

    #[test]
    fn test_clear_with_status_reports_when_nothing_matched() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "still open").unwrap();

        // Act
        let removed = store.clear_with_status(key(), TaskStatus::Cancelled).unwrap();

        // Assert
        assert!(!removed);
        assert_eq!(store.load(key()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_all_removes_the_backing_file() {
        // Arrange
        let (_temp, store) = setup_store();
        store.ensure_initialized(key()).unwrap();
        store.append(key(), "buy milk").unwrap();

        // Act
        store.delete_all(key()).unwrap();

        // Assert
        assert!(!store.exists(key()));
    }

    #[test]
    fn test_delete_all_is_a_no_op_without_a_file() {
        // Arrange
        let (_temp, store) = setup_store();

        // Act
        let result = store.delete_all(key());

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_lists_are_scoped_per_member() {
        // Arrange
        let (_temp, store) = setup_store();
        let other = StoreKey {
            guild_id: GUILD_ID,
            user_id: USER_ID + 1,
        };
        store.ensure_initialized(key()).unwrap();
        store.ensure_initialized(other).unwrap();

        // Act
        store.append(key(), "mine").unwrap();

        // Assert
        assert_eq!(store.load(key()).unwrap().len(), 1);
        assert!(store.load(other).unwrap().is_empty());
    }
}
