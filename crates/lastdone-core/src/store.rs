//! Ordered in-memory task collection backed by a whole-document persistence service.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Task;

/// Storage for the serialized task list. Every save overwrites the previous document.
pub trait Persistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, CoreError>;
    fn save(&self, bytes: &[u8]) -> Result<(), CoreError>;
}

impl<T: Persistence + ?Sized> Persistence for Arc<T> {
    fn load(&self) -> Result<Option<Vec<u8>>, CoreError> {
        (**self).load()
    }

    fn save(&self, bytes: &[u8]) -> Result<(), CoreError> {
        (**self).save(bytes)
    }
}

/// JSON document on disk, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<Vec<u8>>, CoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the document in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    document: Mutex<Option<Vec<u8>>>,
    saves: Mutex<usize>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(Some(bytes.into())),
            saves: Mutex::new(0),
        }
    }

    pub fn document(&self) -> Option<Vec<u8>> {
        self.document.lock().ok().and_then(|doc| doc.clone())
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.document())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), CoreError> {
        if let Ok(mut doc) = self.document.lock() {
            *doc = Some(bytes.to_vec());
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct TaskStore<P> {
    persistence: P,
    tasks: Vec<Task>,
}

impl<P: Persistence> TaskStore<P> {
    /// Load previously saved tasks. Unreadable or undecodable state yields an
    /// empty store; the failure is only logged.
    pub fn open(persistence: P) -> Self {
        let tasks = match persistence.load() {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Task>>(&bytes) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(error = %e, "saved tasks could not be decoded; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "saved tasks could not be read; starting empty");
                Vec::new()
            }
        };
        debug!(count = tasks.len(), "task store opened");
        Self { persistence, tasks }
    }

    /// Serialize and persist the full ordered sequence.
    pub fn save(&self) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec_pretty(&self.tasks)?;
        self.persistence.save(&bytes)?;
        debug!(count = self.tasks.len(), "task store saved");
        Ok(())
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Prepend a task. Ids must be unique.
    pub fn insert(&mut self, task: Task) -> Result<(), CoreError> {
        if self.find(task.id).is_some() {
            return Err(CoreError::InvalidInput(format!(
                "A task with id {} already exists.",
                task.id
            )));
        }
        self.tasks.insert(0, task);
        Ok(())
    }

    /// Remove a task. Cancelling its notification is the caller's job.
    pub fn delete(&mut self, id: Uuid) -> Result<Task, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Tasks sorted most recently done first, narrowed to names containing
    /// `query` (case-insensitive). An empty query keeps every task.
    pub fn filter(&self, query: &str) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return sorted;
        }
        sorted
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect()
    }
}
