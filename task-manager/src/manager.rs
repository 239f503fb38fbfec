use crate::store::{StoreError, TaskStore};
use crate::task::Task;
use log::{debug, info};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Session-scoped handle for a task. Ids are handed out in increasing order
/// and never reused, so removing a task does not renumber the others.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TaskId(u32);

impl TaskId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TaskId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Field {
    Title,
    Description,
    Category,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Category => "category",
        };
        write!(f, "{name}")
    }
}

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("the {0} must not be empty")]
    MissingField(Field),
    #[error("no task with ID {0}")]
    TaskNotFound(TaskId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The in-memory task list owned by a front end, plus the store it syncs to.
#[derive(Debug)]
pub struct TaskManager {
    store: TaskStore,
    tasks: Vec<(TaskId, Task)>,
    next_id: u32,
    dirty: bool,
}

impl TaskManager {
    /// Creates a manager with no tasks. Nothing is read from disk.
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            next_id: 1,
            dirty: false,
        }
    }

    /// Loads the store's tasks and numbers them from 1 in file order.
    pub fn open(store: TaskStore) -> Result<Self, ManagerError> {
        let loaded = store.load_all()?;
        let mut manager = Self::new(store);
        for task in loaded {
            manager.push(task);
        }
        info!(
            "Opened {} with {} tasks",
            manager.store.path().display(),
            manager.tasks.len()
        );
        Ok(manager)
    }

    /// Adds a pending task. Every field must contain something other than
    /// whitespace; the values are stored untouched.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<TaskId, ManagerError> {
        let (title, description, category) = (title.into(), description.into(), category.into());
        for (field, value) in [
            (Field::Title, &title),
            (Field::Description, &description),
            (Field::Category, &category),
        ] {
            if value.trim().is_empty() {
                return Err(ManagerError::MissingField(field));
            }
        }

        let id = self.push(Task::new(title, description, category));
        self.dirty = true;
        debug!("Added task {id}");
        Ok(id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.position(id).map(|index| &self.tasks[index].1)
    }

    pub fn complete(&mut self, id: TaskId) -> Result<&Task, ManagerError> {
        let index = self.position(id).ok_or(ManagerError::TaskNotFound(id))?;
        let task = &mut self.tasks[index].1;
        if !task.is_completed() {
            task.mark_completed();
            self.dirty = true;
            debug!("Completed task {id}");
        }
        Ok(&self.tasks[index].1)
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Task, ManagerError> {
        let index = self.position(id).ok_or(ManagerError::TaskNotFound(id))?;
        let (_, task) = self.tasks.remove(index);
        self.dirty = true;
        debug!("Deleted task {id}");
        Ok(task)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().map(|(id, task)| (*id, task))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True when the list changed since it was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<(), ManagerError> {
        let tasks: Vec<Task> = self.tasks.iter().map(|(_, task)| task.clone()).collect();
        self.store.save_all(&tasks)?;
        self.dirty = false;
        info!(
            "Saved {} tasks to {}",
            tasks.len(),
            self.store.path().display()
        );
        Ok(())
    }

    /// Renders every task as `#<id> <task>`, separated by blank lines.
    pub fn render(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks.".to_string();
        }
        self.tasks
            .iter()
            .map(|(id, task)| format!("#{id} {task}"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn push(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.tasks.push((id, task));
        self.next_id += 1;
        id
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|(task_id, _)| *task_id == id)
    }
}
