//! Unified pointer input.
//!
//! Mouse and touch events are normalized into [`PointerEvent`] before they
//! reach the drag controller, so the controller only ever asks for a
//! vertical position and never cares which device produced it.

use crossterm::event::{MouseButton, MouseEventKind};

/// Anything that can report where the pointer is vertically.
pub trait PointerInput {
    /// Vertical page coordinate, or `None` when the event carries no point
    /// (for example a touch end with no remaining touches).
    fn vertical_position(&self) -> Option<f32>;
}

/// Direct pointer (mouse) coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePointer {
    pub y: f32,
}

impl MousePointer {
    pub fn new(y: f32) -> Self {
        Self { y }
    }

    /// Pointer at the vertical centre of a terminal cell row.
    pub fn at_cell_row(row: u16) -> Self {
        Self {
            y: f32::from(row) + 0.5,
        }
    }
}

impl PointerInput for MousePointer {
    fn vertical_position(&self) -> Option<f32> {
        Some(self.y)
    }
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub y: f32,
}

/// Touch event payload. Only the first touch drives a drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchPointer {
    pub touches: Vec<TouchPoint>,
}

impl TouchPointer {
    pub fn single(id: u64, y: f32) -> Self {
        Self {
            touches: vec![TouchPoint { id, y }],
        }
    }
}

impl PointerInput for TouchPointer {
    fn vertical_position(&self) -> Option<f32> {
        self.touches.first().map(|touch| touch.y)
    }
}

/// Pointer payload from either modality.
#[derive(Debug, Clone, PartialEq)]
pub enum Pointer {
    Mouse(MousePointer),
    Touch(TouchPointer),
}

impl PointerInput for Pointer {
    fn vertical_position(&self) -> Option<f32> {
        match self {
            Pointer::Mouse(mouse) => mouse.vertical_position(),
            Pointer::Touch(touch) => touch.vertical_position(),
        }
    }
}

/// Start, move and end of one gesture (press/touchstart, move/touchmove,
/// release/touchend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Start,
    Move,
    End,
}

/// Part of a task row under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRegion {
    /// Row text and padding. The only region a drag may start from.
    Body,
    /// Completion checkbox.
    Checkbox,
    /// Remove button.
    RemoveButton,
}

impl HitRegion {
    pub fn is_draggable(self) -> bool {
        matches!(self, HitRegion::Body)
    }
}

/// Row and region a start event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTarget {
    pub index: usize,
    pub region: HitRegion,
}

/// Device-independent pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: GesturePhase,
    pub pointer: Pointer,
    /// Only meaningful for [`GesturePhase::Start`].
    pub target: Option<RowTarget>,
}

impl PointerEvent {
    pub fn mouse(phase: GesturePhase, y: f32, target: Option<RowTarget>) -> Self {
        Self {
            phase,
            pointer: Pointer::Mouse(MousePointer::new(y)),
            target,
        }
    }

    pub fn touch(phase: GesturePhase, touch: TouchPointer, target: Option<RowTarget>) -> Self {
        Self {
            phase,
            pointer: Pointer::Touch(touch),
            target,
        }
    }
}

/// Map a terminal mouse event kind onto a gesture phase. Only the left
/// button drags; hover and scroll are not part of a gesture.
pub fn gesture_phase(kind: MouseEventKind) -> Option<GesturePhase> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GesturePhase::Start),
        MouseEventKind::Drag(MouseButton::Left) => Some(GesturePhase::Move),
        MouseEventKind::Up(MouseButton::Left) => Some(GesturePhase::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_first_point() {
        let touch = TouchPointer {
            touches: vec![TouchPoint { id: 7, y: 12.0 }, TouchPoint { id: 8, y: 40.0 }],
        };
        assert_eq!(Pointer::Touch(touch).vertical_position(), Some(12.0));
        assert_eq!(TouchPointer::default().vertical_position(), None);
    }

    #[test]
    fn cell_rows_map_to_cell_centres() {
        assert_eq!(MousePointer::at_cell_row(3).vertical_position(), Some(3.5));
    }

    #[test]
    fn only_left_button_drives_gestures() {
        assert_eq!(
            gesture_phase(MouseEventKind::Down(MouseButton::Left)),
            Some(GesturePhase::Start)
        );
        assert_eq!(
            gesture_phase(MouseEventKind::Drag(MouseButton::Left)),
            Some(GesturePhase::Move)
        );
        assert_eq!(
            gesture_phase(MouseEventKind::Up(MouseButton::Left)),
            Some(GesturePhase::End)
        );
        assert_eq!(gesture_phase(MouseEventKind::Down(MouseButton::Right)), None);
        assert_eq!(gesture_phase(MouseEventKind::Moved), None);
    }

    #[test]
    fn only_body_is_draggable() {
        assert!(HitRegion::Body.is_draggable());
        assert!(!HitRegion::Checkbox.is_draggable());
        assert!(!HitRegion::RemoveButton.is_draggable());
    }
}
