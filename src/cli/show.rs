//! hashlist show/progress command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::progress::Progress;

use super::{load_board, push_board_summary, Session};

#[derive(Serialize)]
struct ProgressReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percent: Option<f64>,
}

pub(crate) fn run_show(session: &Session, fragment: &str) -> Result<()> {
    let board = load_board(fragment)?;
    let report = session.report(&board);

    let count = board.tasks().len();
    let noun = if count == 1 { "task" } else { "tasks" };
    let mut human = HumanOutput::new(format!("hashlist show: {count} {noun}"));
    push_board_summary(&mut human, &report);
    for (index, task) in board.tasks().iter().enumerate() {
        let mark = if task.checked { "x" } else { " " };
        human.push_detail(format!("[{mark}] {index}: {}", task.text));
    }
    if board.tasks().is_empty() {
        human.push_next_step("hashlist add <fragment> <text>");
    }

    emit_success(session.output, "show", &report, Some(&human))
}

pub(crate) fn run_progress(session: &Session, fragment: &str) -> Result<()> {
    let board = load_board(fragment)?;
    let progress = board.progress();
    let report = ProgressReport {
        progress,
        percent: progress.map(|p| p.percent()),
    };

    let header = match progress {
        Some(progress) => format!("hashlist progress: {progress}"),
        None => "hashlist progress: no tasks".to_string(),
    };
    let human = HumanOutput::new(header);

    emit_success(session.output, "progress", &report, Some(&human))
}
