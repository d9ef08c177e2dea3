//! Terminal front end.

pub mod task_viewer;
