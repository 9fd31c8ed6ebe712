use super::*;
use crate::foundation::slot::SlotUpdate;
use crate::mask::item_mask::Mask;
use crate::mask::pattern::Pattern;
use crate::sequence::int_gen::IntGenerator;

fn tagged(id: u32) -> Frame<(), u32> {
    Frame::new(
        Pattern::new(|_| Some(())),
        Mask::new(move |_| SlotUpdate::Set(id)),
        IntGenerator::of([0]),
    )
    .unwrap()
}

fn tag(frame: &Frame<(), u32>) -> u32 {
    let mut out = None;
    frame.apply(|_, id| out = Some(id));
    out.unwrap()
}

fn drain(anim: &mut Animation<(), u32>) -> Vec<u32> {
    let mut out = Vec::new();
    while anim.has_next_frame() {
        out.push(tag(&anim.next_frame()));
    }
    out
}

fn take(anim: &mut Animation<(), u32>, n: usize) -> Vec<u32> {
    (0..n).map(|_| tag(&anim.next_frame())).collect()
}

fn counter() -> Animation<(), u32> {
    Animation::infinite(tagged(0), |prev| tagged(tag(prev) + 1))
}

#[test]
fn of_frames_rejects_empty_list() {
    assert!(Animation::<(), u32>::of_frames(Vec::new()).is_err());
}

#[test]
fn of_frames_is_restartable() {
    let mut anim = Animation::of_frames([tagged(1), tagged(2), tagged(3)]).unwrap();
    assert_eq!(drain(&mut anim), vec![1, 2, 3]);
    anim.reset();
    assert_eq!(drain(&mut anim), vec![1, 2, 3]);
}

#[test]
fn infinite_rewinds_to_seed() {
    let mut anim = counter();
    assert_eq!(take(&mut anim, 4), vec![0, 1, 2, 3]);
    anim.reset();
    assert_eq!(take(&mut anim, 2), vec![0, 1]);
}

#[test]
fn and_then_plays_in_order() {
    let first = Animation::of_frames([tagged(1), tagged(2)]).unwrap();
    let second = Animation::of_frames([tagged(3)]).unwrap().limit(1);
    let mut anim = first.and_then(second);
    assert_eq!(drain(&mut anim), vec![1, 2, 3]);
    anim.reset();
    assert_eq!(drain(&mut anim), vec![1, 2, 3]);

    let mut flat = Animation::of_frames([tagged(1)])
        .unwrap()
        .and_then(Animation::of_frames([tagged(2)]).unwrap());
    assert_eq!(drain(&mut flat), vec![1, 2]);
}

#[test]
fn infinite_receivers_absorb_and_then() {
    let mut anim = counter().and_then(Animation::of_frames([tagged(99)]).unwrap());
    assert_eq!(take(&mut anim, 3), vec![0, 1, 2]);
}

#[test]
fn continuously_restarts_and_absorbs() {
    let mut anim = Animation::of_frames([tagged(1), tagged(2)])
        .unwrap()
        .continuously()
        .continuously()
        .and_then(Animation::of_frames([tagged(7)]).unwrap());
    assert!(anim.is_infinite());
    assert_eq!(take(&mut anim, 5), vec![1, 2, 1, 2, 1]);
    assert!(anim.has_next_frame());
}

#[test]
fn limit_of_limit_keeps_tighter_bound_and_position() {
    let mut anim = counter().limit(10);
    assert_eq!(take(&mut anim, 2), vec![0, 1]);
    let mut anim = anim.limit(4);
    assert_eq!(drain(&mut anim), vec![2, 3]);
    anim.reset();
    assert_eq!(drain(&mut anim), vec![0, 1, 2, 3]);

    let mut looser = counter().limit(2).limit(8);
    assert_eq!(drain(&mut looser), vec![0, 1]);
}

#[test]
fn limit_of_continuous_animation() {
    let mut anim = Animation::of_frames([tagged(5), tagged(6)])
        .unwrap()
        .continuously()
        .limit(3);
    assert!(!anim.is_infinite());
    assert_eq!(drain(&mut anim), vec![5, 6, 5]);
}

#[test]
fn clones_are_independent_cursors() {
    let mut a = Animation::of_frames([tagged(1), tagged(2)]).unwrap();
    a.next_frame();
    let mut b = a.clone();
    assert_eq!(drain(&mut b), vec![2]);
    assert_eq!(drain(&mut a), vec![2]);
}

#[test]
#[should_panic(expected = "exhausted")]
fn next_frame_past_end_panics() {
    let mut anim = Animation::of_frames([tagged(1)]).unwrap();
    anim.next_frame();
    anim.next_frame();
}
