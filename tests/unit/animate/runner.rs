use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animate::frame::Frame;
use crate::foundation::slot::SlotUpdate;
use crate::host::scheduler::HostCaps;
use crate::host::tick::TickScheduler;
use crate::mask::item_mask::Mask;
use crate::mask::pattern::Pattern;
use crate::sequence::int_gen::IntGenerator;

type Log = Rc<RefCell<Vec<(u64, usize)>>>;

fn frames(n: i32) -> Animation<usize, usize> {
    let frames = (0..n).map(|slot| {
        Frame::new(
            Pattern::index(),
            Mask::new(|symbol: Option<&usize>| match symbol {
                Some(&i) => SlotUpdate::Set(i),
                None => SlotUpdate::Keep,
            }),
            IntGenerator::of([slot]),
        )
        .unwrap()
    });
    Animation::of_frames(frames).unwrap()
}

fn runner(
    host: &Rc<TickScheduler>,
    animation: Animation<usize, usize>,
    opts: RunnerOpts,
) -> (AnimationRunner<usize, usize>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let clock = Rc::downgrade(host);
    let runner = AnimationRunner::with_opts(
        host.clone(),
        animation,
        move |slot, _| {
            let now = clock.upgrade().map_or(0, |h| h.now());
            sink.borrow_mut().push((now, slot));
        },
        opts,
    );
    (runner, log)
}

#[test]
fn fresh_runner_is_not_started() {
    let host = Rc::new(TickScheduler::new());
    let (runner, _) = runner(&host, frames(2), RunnerOpts::default());
    assert_eq!(runner.status(), AnimationState::NotStarted);
    assert_eq!(runner.frames_applied(), 0);
}

#[test]
fn play_while_running_is_a_state_error() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, _) = runner(&host, frames(3), RunnerOpts::default());
    assert_eq!(
        runner.play(Schedule::fixed_rate(2)).unwrap(),
        AnimationState::Running
    );
    let err = runner.play(Schedule::now()).unwrap_err();
    assert!(matches!(err, SlotframeError::State(_)));
}

#[test]
fn runs_to_finished_and_releases_task() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(3), RunnerOpts::default());
    runner.play(Schedule::fixed_rate(2)).unwrap();
    host.advance(20);
    assert_eq!(*log.borrow(), vec![(2, 0), (4, 1), (6, 2)]);
    assert_eq!(runner.status(), AnimationState::Finished);
    assert_eq!(host.pending(), 0);
}

#[test]
fn exhausted_schedule_leaves_runner_paused() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(4), RunnerOpts::default());
    runner.play(Schedule::fixed_rate(1).limit_steps(2)).unwrap();
    host.advance(10);
    assert_eq!(runner.status(), AnimationState::Paused);
    assert_eq!(log.borrow().len(), 2);

    runner.play(Schedule::of([1, 1])).unwrap();
    host.advance(10);
    assert_eq!(runner.status(), AnimationState::Finished);
    assert_eq!(
        log.borrow().iter().map(|&(_, slot)| slot).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn stop_pauses_without_rewinding() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(3), RunnerOpts::default());
    runner.play(Schedule::fixed_rate(1)).unwrap();
    host.advance(1);
    runner.stop();
    assert_eq!(runner.status(), AnimationState::Paused);
    host.advance(5);
    assert_eq!(log.borrow().len(), 1);

    runner.play(Schedule::now()).unwrap();
    assert_eq!(log.borrow().last(), Some(&(6, 1)));
}

#[test]
fn stop_before_play_pauses() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(3), RunnerOpts::default());
    runner.stop();
    assert_eq!(runner.status(), AnimationState::Paused);

    runner.play(Schedule::once(2)).unwrap();
    host.advance(2);
    assert_eq!(*log.borrow(), vec![(2, 0)]);

    runner.reset();
    assert_eq!(runner.status(), AnimationState::NotStarted);
}

#[test]
fn stop_when_finished_is_a_noop() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, _) = runner(&host, frames(1), RunnerOpts::default());
    assert_eq!(
        runner.play(Schedule::now()).unwrap(),
        AnimationState::Finished
    );
    runner.stop();
    assert_eq!(runner.status(), AnimationState::Finished);
}

#[test]
fn reset_after_finished_allows_replay() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(2), RunnerOpts::default());
    runner.play(Schedule::of([0, 0])).unwrap();
    assert_eq!(runner.status(), AnimationState::Finished);
    assert_eq!(
        runner.play(Schedule::now()).unwrap(),
        AnimationState::Finished
    );

    runner.reset();
    assert_eq!(runner.status(), AnimationState::NotStarted);
    assert_eq!(
        runner.play(Schedule::once(3)).unwrap(),
        AnimationState::Running
    );
    host.advance(3);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(runner.frames_applied(), 3);
}

#[test]
fn reset_cancels_pending_task() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(&host, frames(3), RunnerOpts::default());
    runner.play(Schedule::once(5)).unwrap();
    runner.reset();
    host.advance(10);
    assert!(log.borrow().is_empty());
    assert_eq!(host.pending(), 0);
}

#[test]
fn dropping_runner_cancels_its_task() {
    let host = Rc::new(TickScheduler::new());
    let (mut runner, log) = runner(
        &host,
        frames(3),
        RunnerOpts {
            native_schedules: false,
        },
    );
    runner.play(Schedule::fixed_rate(2)).unwrap();
    drop(runner);
    assert_eq!(host.pending(), 0);
    host.advance(10);
    assert!(log.borrow().is_empty());
}

#[test]
fn capability_less_host_still_runs_native_shapes() {
    let host = Rc::new(TickScheduler::with_caps(HostCaps::NONE));
    let (mut runner, log) = runner(&host, frames(3), RunnerOpts::default());
    runner.play(Schedule::once(1).append(Schedule::fixed_rate(3))).unwrap();
    host.advance(20);
    assert_eq!(*log.borrow(), vec![(1, 0), (4, 1), (7, 2)]);
}

#[test]
fn opts_default_to_native_and_deserialize_partially() {
    assert!(RunnerOpts::default().native_schedules);
    let opts: RunnerOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, RunnerOpts::default());
    let opts: RunnerOpts = serde_json::from_str(r#"{"native_schedules": false}"#).unwrap();
    assert!(!opts.native_schedules);
}
