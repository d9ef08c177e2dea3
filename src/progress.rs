//! Completion progress over the task list.

use serde::Serialize;

use crate::task::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
}

impl Progress {
    /// Progress of `tasks`, or `None` when there is nothing to show.
    pub fn of(tasks: &TaskList) -> Option<Self> {
        if tasks.is_empty() {
            return None;
        }
        Some(Self {
            checked: tasks.checked_count(),
            total: tasks.len(),
        })
    }

    /// Fraction complete in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        self.checked as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} done ({:.0}%)",
            self.checked,
            self.total,
            self.percent()
        )
    }
}
