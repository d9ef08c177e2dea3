//! Task records and the ordered task list.
//!
//! Tasks are addressed by position only. Duplicate text is valid and each
//! copy keeps its own slot and checked flag.

use serde::Serialize;

use crate::error::{Error, Result};

/// A single task: free-form text plus a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub text: String,
    pub checked: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }

    pub fn unchecked(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// Ordered sequence of tasks. Display order is persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn checked_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.checked).count()
    }

    /// Append a task at the end of the list.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the task at `index` and return it.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Flip the checked flag at `index`, returning the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let task = &mut self.tasks[index];
        task.checked = !task.checked;
        Ok(task.checked)
    }

    /// Relocate one task from `from` to `to`; every other task keeps its
    /// relative order.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let task = self.tasks.remove(from);
            self.tasks.insert(to, task);
        }
        Ok(())
    }

    /// Exchange two slots. The drag controller only swaps neighbours.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.tasks.swap(a, b);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(Error::InvalidArgument(format!(
                "task index {index} out of range (list has {} tasks)",
                self.tasks.len()
            )));
        }
        Ok(())
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
