//! Drag-to-reorder state machine.
//!
//! One gesture at a time moves one task. While dragging, each move event
//! compares the pointer with the dragged row's current bounding box: going
//! past the row's bottom edge swaps it with the next row, going above its
//! top edge swaps it with the previous row. Anywhere inside the row is the
//! hysteresis band and changes nothing. Running off either end of the list
//! drops the task where it is.

use crate::codec;
use crate::error::{Error, Result};
use crate::input::{GesturePhase, HitRegion, PointerEvent, PointerInput};
use crate::task::TaskList;

/// Vertical extent of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub height: f32,
}

impl RowBounds {
    pub fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Geometry provided by whatever renders the rows.
pub trait RowLayout {
    /// Current bounding box of the row at `index`.
    fn row_bounds(&self, index: usize) -> Option<RowBounds>;
}

/// Rows stacked back to back with a fixed height, the first one at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRows {
    pub origin: f32,
    pub row_height: f32,
}

impl UniformRows {
    pub fn new(origin: f32, row_height: f32) -> Self {
        Self { origin, row_height }
    }
}

impl RowLayout for UniformRows {
    fn row_bounds(&self, index: usize) -> Option<RowBounds> {
        Some(RowBounds {
            top: self.origin + index as f32 * self.row_height,
            height: self.row_height,
        })
    }
}

/// Neighbours of the dragged row, captured at start and after every swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragContext {
    /// Position the task had when the gesture started.
    pub origin: usize,
    /// Position the task has now.
    pub index: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl DragContext {
    fn at(origin: usize, index: usize, len: usize) -> Self {
        Self {
            origin,
            index,
            previous: index.checked_sub(1),
            next: (index + 1 < len).then_some(index + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragContext),
}

/// Result of a completed gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub origin: usize,
    pub index: usize,
    /// Fragment re-encoded from the reordered list.
    pub fragment: String,
}

impl DropOutcome {
    pub fn moved(&self) -> bool {
        self.origin != self.index
    }
}

/// What a single event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStep {
    /// Event did not concern the controller.
    Ignored,
    /// A drag started on `index`.
    Lifted { index: usize },
    /// Pointer stayed inside the hysteresis band.
    Held,
    /// Dragged task moved one slot.
    Moved { from: usize, to: usize },
    /// Gesture ended.
    Dropped(DropOutcome),
}

#[derive(Debug, Default)]
pub struct ReorderController {
    state: GestureState,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Index of the lifted row, if a drag is active.
    pub fn lifted(&self) -> Option<usize> {
        match self.state {
            GestureState::Dragging(ctx) => Some(ctx.index),
            GestureState::Idle => None,
        }
    }

    /// Handle a press on row `index`.
    pub fn start(
        &mut self,
        tasks: &mut TaskList,
        index: usize,
        region: HitRegion,
        pointer: &dyn PointerInput,
        layout: &dyn RowLayout,
    ) -> Result<GestureStep> {
        if let GestureState::Dragging(ctx) = self.state {
            return Err(Error::InvalidGestureState(format!(
                "drag of row {} already in progress",
                ctx.index
            )));
        }
        if index >= tasks.len() {
            return Err(Error::InvalidArgument(format!(
                "cannot drag row {index} of a {}-task list",
                tasks.len()
            )));
        }
        if !region.is_draggable() {
            return Ok(GestureStep::Ignored);
        }

        self.state = GestureState::Dragging(DragContext::at(index, index, tasks.len()));
        tracing::debug!(index, "drag started");

        match self.track(tasks, pointer, layout)? {
            GestureStep::Held => Ok(GestureStep::Lifted { index }),
            step => Ok(step),
        }
    }

    /// Handle a pointer move while dragging.
    pub fn pointer_move(
        &mut self,
        tasks: &mut TaskList,
        pointer: &dyn PointerInput,
        layout: &dyn RowLayout,
    ) -> Result<GestureStep> {
        if !self.is_dragging() {
            return Err(Error::InvalidGestureState(
                "move event without an active drag".to_string(),
            ));
        }
        self.track(tasks, pointer, layout)
    }

    /// Handle a release: finish the gesture and re-encode the list.
    pub fn end(&mut self, tasks: &TaskList) -> Result<DropOutcome> {
        match self.state {
            GestureState::Dragging(ctx) => Ok(self.finish(ctx, tasks)),
            GestureState::Idle => Err(Error::InvalidGestureState(
                "end event without an active drag".to_string(),
            )),
        }
    }

    /// Route a normalized event to the matching handler. Invalid events are
    /// logged and ignored.
    pub fn dispatch(
        &mut self,
        tasks: &mut TaskList,
        event: &PointerEvent,
        layout: &dyn RowLayout,
    ) -> GestureStep {
        let result = match event.phase {
            GesturePhase::Start => match event.target {
                Some(target) => self.start(
                    tasks,
                    target.index,
                    target.region,
                    &event.pointer,
                    layout,
                ),
                None => Ok(GestureStep::Ignored),
            },
            GesturePhase::Move => self.pointer_move(tasks, &event.pointer, layout),
            GesturePhase::End => self.end(tasks).map(GestureStep::Dropped),
        };

        result.unwrap_or_else(|err| {
            tracing::debug!(error = %err, phase = ?event.phase, "ignoring pointer event");
            GestureStep::Ignored
        })
    }

    fn track(
        &mut self,
        tasks: &mut TaskList,
        pointer: &dyn PointerInput,
        layout: &dyn RowLayout,
    ) -> Result<GestureStep> {
        let ctx = match self.state {
            GestureState::Dragging(ctx) => ctx,
            GestureState::Idle => {
                return Err(Error::InvalidGestureState("no active drag".to_string()))
            }
        };
        if ctx.index >= tasks.len() {
            return Ok(GestureStep::Dropped(self.finish(ctx, tasks)));
        }

        let Some(y) = pointer.vertical_position() else {
            return Ok(GestureStep::Held);
        };
        let Some(bounds) = layout.row_bounds(ctx.index) else {
            return Ok(GestureStep::Held);
        };
        let midpoint = bounds.midpoint();
        let band = bounds.height / 2.0;

        let neighbour = if y > midpoint + band {
            ctx.next
        } else if y < midpoint - band {
            ctx.previous
        } else {
            return Ok(GestureStep::Held);
        };

        match neighbour {
            Some(to) => {
                tasks.swap(ctx.index, to);
                self.state =
                    GestureState::Dragging(DragContext::at(ctx.origin, to, tasks.len()));
                tracing::debug!(from = ctx.index, to, "dragged task moved");
                Ok(GestureStep::Moved {
                    from: ctx.index,
                    to,
                })
            }
            None => Ok(GestureStep::Dropped(self.finish(ctx, tasks))),
        }
    }

    fn finish(&mut self, ctx: DragContext, tasks: &TaskList) -> DropOutcome {
        self.state = GestureState::Idle;
        let outcome = DropOutcome {
            origin: ctx.origin,
            index: ctx.index,
            fragment: codec::encode(tasks),
        };
        tracing::debug!(origin = outcome.origin, index = outcome.index, "drag finished");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MousePointer, RowTarget, TouchPointer};
    use crate::task::Task;

    const ROW: f32 = 10.0;

    fn layout() -> UniformRows {
        UniformRows::new(0.0, ROW)
    }

    fn tasks(names: &[&str]) -> TaskList {
        names.iter().map(|name| Task::unchecked(*name)).collect()
    }

    fn texts(list: &TaskList) -> Vec<&str> {
        list.iter().map(|task| task.text.as_str()).collect()
    }

    fn press(index: usize, y: f32) -> PointerEvent {
        PointerEvent::mouse(
            GesturePhase::Start,
            y,
            Some(RowTarget {
                index,
                region: HitRegion::Body,
            }),
        )
    }

    fn drag(y: f32) -> PointerEvent {
        PointerEvent::mouse(GesturePhase::Move, y, None)
    }

    fn release(y: f32) -> PointerEvent {
        PointerEvent::mouse(GesturePhase::End, y, None)
    }

    #[test]
    fn drag_down_two_slots() {
        let mut list = tasks(&["a", "b", "c", "d"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        assert_eq!(
            controller.dispatch(&mut list, &press(0, 5.0), &rows),
            GestureStep::Lifted { index: 0 }
        );
        assert_eq!(controller.lifted(), Some(0));

        assert_eq!(
            controller.dispatch(&mut list, &drag(15.0), &rows),
            GestureStep::Moved { from: 0, to: 1 }
        );
        assert_eq!(
            controller.dispatch(&mut list, &drag(25.0), &rows),
            GestureStep::Moved { from: 1, to: 2 }
        );
        assert_eq!(texts(&list), vec!["b", "c", "a", "d"]);

        match controller.dispatch(&mut list, &release(25.0), &rows) {
            GestureStep::Dropped(outcome) => {
                assert_eq!(outcome.origin, 0);
                assert_eq!(outcome.index, 2);
                assert!(outcome.moved());
                assert_eq!(outcome.fragment, "?s=0&0=b&1=c&2=a&3=d");
            }
            other => panic!("expected drop, got {other:?}"),
        }
        assert!(!controller.is_dragging());
    }

    #[test]
    fn drag_up_uses_refreshed_neighbours() {
        let mut list = tasks(&["a", "b", "c"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        controller.dispatch(&mut list, &press(2, 25.0), &rows);
        assert_eq!(
            controller.dispatch(&mut list, &drag(15.0), &rows),
            GestureStep::Moved { from: 2, to: 1 }
        );
        assert_eq!(
            controller.dispatch(&mut list, &drag(5.0), &rows),
            GestureStep::Moved { from: 1, to: 0 }
        );
        assert_eq!(texts(&list), vec!["c", "a", "b"]);
        match controller.state() {
            GestureState::Dragging(ctx) => {
                assert_eq!(ctx.previous, None);
                assert_eq!(ctx.next, Some(1));
            }
            GestureState::Idle => panic!("expected drag in progress"),
        }
    }

    #[test]
    fn pointer_inside_band_holds_position() {
        let mut list = tasks(&["a", "b", "c"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        controller.dispatch(&mut list, &press(1, 15.0), &rows);
        for y in [10.0, 10.5, 15.0, 19.9, 20.0] {
            assert_eq!(controller.dispatch(&mut list, &drag(y), &rows), GestureStep::Held);
        }
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
        assert!(controller.is_dragging());
    }

    #[test]
    fn running_off_the_end_drops() {
        let mut list = tasks(&["a", "b"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        controller.dispatch(&mut list, &press(1, 15.0), &rows);
        match controller.dispatch(&mut list, &drag(25.0), &rows) {
            GestureStep::Dropped(outcome) => assert!(!outcome.moved()),
            other => panic!("expected drop, got {other:?}"),
        }
        assert!(!controller.is_dragging());

        controller.dispatch(&mut list, &press(0, 5.0), &rows);
        assert!(matches!(
            controller.dispatch(&mut list, &drag(-1.0), &rows),
            GestureStep::Dropped(_)
        ));
        assert_eq!(texts(&list), vec!["a", "b"]);
    }

    #[test]
    fn non_draggable_regions_do_not_lift() {
        let mut list = tasks(&["a", "b"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        for region in [HitRegion::Checkbox, HitRegion::RemoveButton] {
            let event = PointerEvent::mouse(
                GesturePhase::Start,
                5.0,
                Some(RowTarget { index: 0, region }),
            );
            assert_eq!(controller.dispatch(&mut list, &event, &rows), GestureStep::Ignored);
        }
        assert!(!controller.is_dragging());
    }

    #[test]
    fn events_without_a_gesture_are_noops() {
        let mut list = tasks(&["a", "b"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        assert!(matches!(
            controller.pointer_move(&mut list, &MousePointer::new(30.0), &rows),
            Err(Error::InvalidGestureState(_))
        ));
        assert!(matches!(controller.end(&list), Err(Error::InvalidGestureState(_))));
        assert_eq!(controller.dispatch(&mut list, &drag(30.0), &rows), GestureStep::Ignored);
        assert_eq!(controller.dispatch(&mut list, &release(30.0), &rows), GestureStep::Ignored);
        assert_eq!(texts(&list), vec!["a", "b"]);
    }

    #[test]
    fn second_start_is_ignored_while_dragging() {
        let mut list = tasks(&["a", "b", "c"]);
        let mut controller = ReorderController::new();
        let rows = layout();

        controller.dispatch(&mut list, &press(0, 5.0), &rows);
        assert_eq!(controller.dispatch(&mut list, &press(2, 25.0), &rows), GestureStep::Ignored);
        assert_eq!(controller.lifted(), Some(0));
    }

    #[test]
    fn touch_gesture_matches_mouse_gesture() {
        let mut list = tasks(&["a", "b", "c"]);
        let mut controller = ReorderController::new();
        let rows = layout();
        let target = Some(RowTarget {
            index: 0,
            region: HitRegion::Body,
        });

        controller.dispatch(
            &mut list,
            &PointerEvent::touch(GesturePhase::Start, TouchPointer::single(1, 5.0), target),
            &rows,
        );
        controller.dispatch(
            &mut list,
            &PointerEvent::touch(GesturePhase::Move, TouchPointer::single(1, 12.0), None),
            &rows,
        );
        // touchend carries no touches
        let step = controller.dispatch(
            &mut list,
            &PointerEvent::touch(GesturePhase::End, TouchPointer::default(), None),
            &rows,
        );
        assert!(matches!(step, GestureStep::Dropped(ref outcome) if outcome.index == 1));
        assert_eq!(texts(&list), vec!["b", "a", "c"]);
    }

    #[test]
    fn uniform_rows_stack_from_origin() {
        let rows = UniformRows::new(3.0, 2.0);
        let bounds = rows.row_bounds(2).expect("bounds");
        assert_eq!(bounds, RowBounds { top: 7.0, height: 2.0 });
        assert_eq!(bounds.midpoint(), 8.0);
    }
}
