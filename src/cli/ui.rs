//! hashlist ui command implementation

use crate::board::TaskBoard;
use crate::codec;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::ui::task_viewer;

use super::{push_board_summary, Session};

pub(crate) fn run(session: &Session, fragment: Option<&str>) -> Result<()> {
    let fragment = fragment.map(codec::fragment_from_input).unwrap_or_default();
    let mut warnings = Vec::new();
    let board = match TaskBoard::try_from_fragment(&fragment) {
        Ok(board) => board,
        Err(err) => {
            warnings.push(format!("started from an empty list: {err}"));
            TaskBoard::from_fragment(&fragment)
        }
    };

    let board = task_viewer::run(board, &session.config.ui)?;

    let report = session.report(&board);
    let count = board.tasks().len();
    let mut human = HumanOutput::new(format!("hashlist ui: {count} tasks"));
    push_board_summary(&mut human, &report);
    for warning in warnings {
        human.push_warning(warning);
    }
    emit_success(session.output, "ui", &report, Some(&human))
}
