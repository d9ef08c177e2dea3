use hashlist::board::TaskBoard;
use hashlist::codec;
use hashlist::input::{GesturePhase, HitRegion, PointerEvent, RowTarget, TouchPointer};
use hashlist::reorder::{GestureStep, UniformRows};
use hashlist::task::Task;

#[test]
fn load_toggle_and_reencode() {
    let mut board = TaskBoard::from_fragment("?s=2&0=buy+milk&1=walk+dog");
    assert_eq!(
        board.tasks().as_slice(),
        &[Task::new("buy milk", false), Task::new("walk dog", true)]
    );

    board.toggle(0).expect("toggle");
    assert_eq!(board.fragment(), "?s=3&0=buy+milk&1=walk+dog");
}

#[test]
fn touch_drag_then_reload_preserves_new_order() {
    let mut board = TaskBoard::from_fragment("?s=4&0=one&1=two&2=three");
    let rows = UniformRows::new(100.0, 40.0);
    let target = Some(RowTarget {
        index: 2,
        region: HitRegion::Body,
    });

    board.dispatch(
        &PointerEvent::touch(GesturePhase::Start, TouchPointer::single(1, 180.0), target),
        &rows,
    );
    let step = board.dispatch(
        &PointerEvent::touch(GesturePhase::Move, TouchPointer::single(1, 130.0), None),
        &rows,
    );
    assert_eq!(step, GestureStep::Moved { from: 2, to: 1 });
    board.dispatch(
        &PointerEvent::touch(GesturePhase::End, TouchPointer::default(), None),
        &rows,
    );

    let reloaded = codec::decode(board.fragment()).expect("decode");
    let texts: Vec<&str> = reloaded.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "three", "two"]);
    assert!(reloaded.get(1).expect("three").checked);
}

#[test]
fn stray_release_is_ignored() {
    let mut board = TaskBoard::from_fragment("?s=0&0=a");
    let rows = UniformRows::new(0.0, 1.0);
    let step = board.dispatch(&PointerEvent::mouse(GesturePhase::End, 0.5, None), &rows);
    assert_eq!(step, GestureStep::Ignored);
    assert_eq!(board.fragment(), "?s=0&0=a");
}
