use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::board::TaskBoard;
use crate::config::UiConfig;
use crate::error::Result;
use crate::input::{self, GesturePhase, HitRegion, MousePointer, Pointer, PointerEvent, RowTarget};
use crate::reorder::{GestureStep, UniformRows};

use super::view;

const EVENT_POLL_MS: u64 = 120;
/// Columns taken by the `[x] ` checkbox at the start of a row.
pub(crate) const CHECKBOX_WIDTH: u16 = 4;
/// Columns taken by the remove button at the end of a row.
pub(crate) const REMOVE_WIDTH: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// Where the task rows were drawn on the last frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListGeometry {
    pub(crate) area: Rect,
    pub(crate) scroll: usize,
    pub(crate) row_height: u16,
}

impl ListGeometry {
    fn new(row_height: u16) -> Self {
        Self {
            area: Rect::default(),
            scroll: 0,
            row_height: row_height.max(1),
        }
    }

    /// Row boxes in terminal coordinates, scroll offset included.
    pub(crate) fn rows(&self) -> UniformRows {
        let height = f32::from(self.row_height);
        UniformRows::new(
            f32::from(self.area.y) - self.scroll as f32 * height,
            height,
        )
    }

    pub(crate) fn visible_rows(&self) -> usize {
        usize::from((self.area.height / self.row_height).max(1))
    }

    pub(crate) fn hit_test(&self, column: u16, row: u16, len: usize) -> Option<RowTarget> {
        let area = self.area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let index = self.scroll + usize::from((row - area.y) / self.row_height);
        if index >= len {
            return None;
        }
        let region = if column < area.x + CHECKBOX_WIDTH {
            HitRegion::Checkbox
        } else if column >= (area.x + area.width).saturating_sub(REMOVE_WIDTH) {
            HitRegion::RemoveButton
        } else {
            HitRegion::Body
        };
        Some(RowTarget { index, region })
    }
}

pub struct AppState {
    pub(crate) board: TaskBoard,
    pub(crate) input: String,
    pub(crate) cursor: Option<usize>,
    pub(crate) hovered: Option<usize>,
    pub(crate) geometry: ListGeometry,
    pub(crate) config: UiConfig,
    status: Option<(String, StatusKind)>,
}

impl AppState {
    pub fn new(board: TaskBoard, config: UiConfig) -> Self {
        let cursor = (!board.tasks().is_empty()).then_some(0);
        Self {
            board,
            input: String::new(),
            cursor,
            hovered: None,
            geometry: ListGeometry::new(config.row_height),
            config,
            status: None,
        }
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn into_board(self) -> TaskBoard {
        self.board
    }

    /// Whether row `index` draws its remove button.
    pub(crate) fn shows_remove(&self, index: usize) -> bool {
        !self.config.hover_highlight
            || self.hovered == Some(index)
            || self.board.lifted() == Some(index)
    }

    /// Row and region under a cell. The remove column only counts as the
    /// remove button while the button is drawn.
    fn target_at(&self, column: u16, row: u16) -> Option<RowTarget> {
        let len = self.board.tasks().len();
        let mut target = self.geometry.hit_test(column, row, len)?;
        if target.region == HitRegion::RemoveButton && !self.shows_remove(target.index) {
            target.region = HitRegion::Body;
        }
        Some(target)
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        self.status.clone()
    }

    /// Record where the list is drawn and scroll so the focused row stays
    /// visible.
    pub(crate) fn update_geometry(&mut self, area: Rect) {
        self.geometry.area = area;
        let visible = self.geometry.visible_rows();
        let len = self.board.tasks().len();
        if let Some(focus) = self.board.lifted().or(self.cursor) {
            if focus < self.geometry.scroll {
                self.geometry.scroll = focus;
            } else if focus >= self.geometry.scroll + visible {
                self.geometry.scroll = focus + 1 - visible;
            }
        }
        self.geometry.scroll = self.geometry.scroll.min(len.saturating_sub(visible));
    }

    /// Handle a key press. Returns `true` when the view should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('x') if ctrl => {
                self.board.clear();
                self.cursor = None;
                self.hovered = None;
                self.set_info("list cleared".to_string());
            }
            KeyCode::Enter => self.add_from_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up if alt => self.shift_cursor_task(-1),
            KeyCode::Down if alt => self.shift_cursor_task(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Tab => {
                if let Some(index) = self.cursor {
                    self.toggle(index);
                }
            }
            KeyCode::Delete => {
                if let Some(index) = self.cursor {
                    self.remove(index);
                }
            }
            KeyCode::Char(ch) if !ctrl && !alt => self.input.push(ch),
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let len = self.board.tasks().len();
        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered = self
                    .geometry
                    .hit_test(mouse.column, mouse.row, len)
                    .map(|target| target.index);
            }
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            kind => {
                let Some(phase) = input::gesture_phase(kind) else {
                    return;
                };
                let target = match phase {
                    GesturePhase::Start => self.target_at(mouse.column, mouse.row),
                    GesturePhase::Move | GesturePhase::End => None,
                };
                let event = PointerEvent {
                    phase,
                    pointer: Pointer::Mouse(MousePointer::at_cell_row(mouse.row)),
                    target,
                };
                let rows = self.geometry.rows();
                match self.board.dispatch(&event, &rows) {
                    GestureStep::Lifted { index } => {
                        self.cursor = Some(index);
                        self.hovered = Some(index);
                    }
                    GestureStep::Moved { to, .. } => {
                        self.cursor = Some(to);
                        self.hovered = Some(to);
                    }
                    GestureStep::Dropped(outcome) => {
                        self.cursor = Some(outcome.index);
                        if outcome.moved() {
                            self.set_info(format!(
                                "moved task {} to {}",
                                outcome.origin, outcome.index
                            ));
                        }
                    }
                    GestureStep::Held => {}
                    GestureStep::Ignored => {
                        if let Some(target) = target {
                            self.click(target);
                        }
                    }
                }
            }
        }
    }

    fn click(&mut self, target: RowTarget) {
        match target.region {
            HitRegion::Checkbox => self.toggle(target.index),
            HitRegion::RemoveButton => self.remove(target.index),
            HitRegion::Body => {}
        }
    }

    fn add_from_input(&mut self) {
        if self.input.trim().is_empty() {
            self.input.clear();
            return;
        }
        match self.board.add(&self.input) {
            Ok(index) => {
                self.input.clear();
                self.cursor = Some(index);
                self.status = None;
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn toggle(&mut self, index: usize) {
        if let Err(err) = self.board.toggle(index) {
            self.set_error(err.to_string());
        }
    }

    fn remove(&mut self, index: usize) {
        match self.board.remove(index) {
            Ok(task) => {
                self.set_info(format!("removed \"{}\"", task.text));
                self.hovered = None;
                self.clamp_cursor();
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.board.tasks().len();
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.cursor = Some(next as usize);
    }

    fn shift_cursor_task(&mut self, delta: isize) {
        let Some(from) = self.cursor else {
            return;
        };
        let len = self.board.tasks().len() as isize;
        let to = from as isize + delta;
        if to < 0 || to >= len {
            return;
        }
        let to = to as usize;
        match self.board.move_task(from, to) {
            Ok(()) => self.cursor = Some(to),
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.board.tasks().len();
        self.cursor = match self.cursor {
            _ if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None => None,
        };
    }

    fn set_error(&mut self, message: String) {
        self.status = Some((message, StatusKind::Error));
    }

    fn set_info(&mut self, message: String) {
        self.status = Some((message, StatusKind::Info));
    }
}

/// Run the interactive view until the user quits and hand back the board.
pub fn run(board: TaskBoard, config: &UiConfig) -> Result<TaskBoard> {
    let mut app = AppState::new(board, config.clone());
    run_terminal(&mut app)?;
    Ok(app.into_board())
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
