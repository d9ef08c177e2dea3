//! Application state: the task list, its persisted fragment, and the drag
//! controller, owned together so every mutation keeps them consistent.

use crate::codec;
use crate::error::{Error, Result};
use crate::input::PointerEvent;
use crate::progress::Progress;
use crate::reorder::{GestureStep, ReorderController, RowLayout};
use crate::task::{Task, TaskList};

#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: TaskList,
    fragment: String,
    reorder: ReorderController,
}

impl TaskBoard {
    /// Empty board with no fragment written yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a fragment, recovering to an empty list when it is
    /// malformed.
    pub fn from_fragment(fragment: &str) -> Self {
        match Self::try_from_fragment(fragment) {
            Ok(board) => board,
            Err(err) => {
                tracing::warn!(error = %err, "fragment could not be decoded; starting empty");
                let tasks = TaskList::new();
                Self {
                    fragment: codec::encode(&tasks),
                    tasks,
                    reorder: ReorderController::new(),
                }
            }
        }
    }

    /// Load from a fragment, failing on malformed input.
    pub fn try_from_fragment(fragment: &str) -> Result<Self> {
        let tasks = codec::decode(fragment)?;
        Ok(Self {
            tasks,
            fragment: fragment.strip_prefix('#').unwrap_or(fragment).to_string(),
            reorder: ReorderController::new(),
        })
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Current persisted fragment, without the leading `#`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn progress(&self) -> Option<Progress> {
        Progress::of(&self.tasks)
    }

    /// Row currently lifted by a drag.
    pub fn lifted(&self) -> Option<usize> {
        self.reorder.lifted()
    }

    /// Append an unchecked task. Text is trimmed and must not be empty.
    pub fn add(&mut self, text: &str) -> Result<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidArgument(
                "task text cannot be empty".to_string(),
            ));
        }
        self.settle_drag();
        self.tasks.push(Task::unchecked(text));
        self.persist();
        Ok(self.tasks.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.settle_drag();
        let task = self.tasks.remove(index)?;
        self.persist();
        Ok(task)
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let checked = self.tasks.toggle(index)?;
        self.persist();
        Ok(checked)
    }

    pub fn move_task(&mut self, from: usize, to: usize) -> Result<()> {
        self.settle_drag();
        self.tasks.move_task(from, to)?;
        self.persist();
        Ok(())
    }

    /// Drop every task and the fragment with them.
    pub fn clear(&mut self) {
        self.settle_drag();
        self.tasks.clear();
        self.fragment.clear();
    }

    /// Feed a pointer event to the drag controller. A finished gesture
    /// rewrites the fragment.
    pub fn dispatch(&mut self, event: &PointerEvent, layout: &dyn RowLayout) -> GestureStep {
        let step = self.reorder.dispatch(&mut self.tasks, event, layout);
        if let GestureStep::Dropped(outcome) = &step {
            self.fragment = outcome.fragment.clone();
        }
        step
    }

    /// Structural edits invalidate the drag context, so an active drag is
    /// dropped where it stands first.
    fn settle_drag(&mut self) {
        if let Ok(outcome) = self.reorder.end(&self.tasks) {
            tracing::debug!(index = outcome.index, "drag dropped by list edit");
            self.fragment = outcome.fragment;
        }
    }

    fn persist(&mut self) {
        self.fragment = codec::encode(&self.tasks);
    }
}
