//! hashlist add/toggle/remove/move/clear command implementation
//!
//! Each command decodes the given fragment, applies one edit and prints the
//! re-encoded fragment.

use crate::board::TaskBoard;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::{load_board, push_board_summary, Session};

pub(crate) fn run_add(session: &Session, fragment: &str, text: &str) -> Result<()> {
    let mut board = load_board(fragment)?;
    let index = board.add(text)?;
    let header = format!("hashlist add: added task {index}");
    emit_board(session, "add", &board, header)
}

pub(crate) fn run_toggle(session: &Session, fragment: &str, index: usize) -> Result<()> {
    let mut board = load_board(fragment)?;
    let checked = board.toggle(index)?;
    let state = if checked { "checked" } else { "unchecked" };
    let header = format!("hashlist toggle: task {index} {state}");
    emit_board(session, "toggle", &board, header)
}

pub(crate) fn run_remove(session: &Session, fragment: &str, index: usize) -> Result<()> {
    let mut board = load_board(fragment)?;
    let task = board.remove(index)?;
    let header = format!("hashlist remove: removed task {index} ({})", task.text);
    emit_board(session, "remove", &board, header)
}

pub(crate) fn run_move(session: &Session, fragment: &str, from: usize, to: usize) -> Result<()> {
    let mut board = load_board(fragment)?;
    board.move_task(from, to)?;
    let header = format!("hashlist move: task {from} -> {to}");
    emit_board(session, "move", &board, header)
}

pub(crate) fn run_clear(session: &Session) -> Result<()> {
    let mut board = TaskBoard::new();
    board.clear();
    emit_board(session, "clear", &board, "hashlist clear: list emptied".to_string())
}

fn emit_board(session: &Session, command: &str, board: &TaskBoard, header: String) -> Result<()> {
    let report = session.report(board);
    let mut human = HumanOutput::new(header);
    push_board_summary(&mut human, &report);
    emit_success(session.output, command, &report, Some(&human))
}
