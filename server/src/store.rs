//! In-memory todo store.
//!
//! # Design
//! One `RwLock` guards the whole collection, so each operation's
//! find-then-mutate sequence is atomic with respect to every other request.
//! Concurrent updates to the same id are serialized and the last write wins.
//!
//! Records live in a map keyed by id; a separate deque keeps ids newest-first
//! for listing. Updates never touch the deque, so they never reorder.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{NewTodo, Todo, TodoPatch};

/// Source of the current time for `created` / `updated`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default)]
struct Collection {
    records: HashMap<String, Todo>,
    newest_first: VecDeque<String>,
}

/// Cheap clonable handle to the shared collection.
#[derive(Clone)]
pub struct TodoStore {
    inner: Arc<RwLock<Collection>>,
    clock: Arc<dyn Clock>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection::default())),
            clock,
        }
    }

    // Wire format carries milliseconds; store exactly what clients will see.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    /// All todos, most recently created first.
    pub async fn list(&self) -> Vec<Todo> {
        let collection = self.inner.read().await;
        collection
            .newest_first
            .iter()
            .filter_map(|id| collection.records.get(id))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Todo, StoreError> {
        let collection = self.inner.read().await;
        collection
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub async fn create(&self, input: NewTodo) -> Todo {
        let mut collection = self.inner.write().await;
        let now = self.now();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description.unwrap_or_default(),
            completed: input.completed.unwrap_or(false),
            starred: input.starred.unwrap_or(false),
            priority: input.priority.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            created: now,
            updated: now,
        };

        collection.newest_first.push_front(todo.id.clone());
        collection.records.insert(todo.id.clone(), todo.clone());
        debug!(id = %todo.id, total = collection.records.len(), "todo created");
        todo
    }

    /// Apply `patch` to the record with `id`. `updated` always advances,
    /// even when the patch is empty.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, StoreError> {
        let mut collection = self.inner.write().await;
        let todo = collection
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let now = self.now();
        let updated = if now > todo.updated {
            now
        } else {
            todo.updated + Duration::milliseconds(1)
        };

        patch.apply_to(todo);
        todo.updated = updated;
        debug!(id = %todo.id, "todo updated");
        Ok(todo.clone())
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut collection = self.inner.write().await;
        if collection.records.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        collection.newest_first.retain(|existing| existing != id);
        debug!(id, total = collection.records.len(), "todo removed");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
