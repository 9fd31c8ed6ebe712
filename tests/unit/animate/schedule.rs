use super::*;

fn take(s: &mut Schedule, n: usize) -> Vec<Option<u64>> {
    (0..n).map(|_| s.next()).collect()
}

fn drain(s: &mut Schedule) -> Vec<u64> {
    std::iter::from_fn(|| s.next()).take(1000).collect()
}

#[test]
fn once_emits_exactly_one_delay() {
    let mut s = Schedule::once(7);
    assert_eq!(take(&mut s, 3), vec![Some(7), None, None]);
    s.reset();
    assert_eq!(s.next(), Some(7));
    assert_eq!(Schedule::now(), Schedule::once(0));
}

#[test]
fn single_delay_of_is_once() {
    assert_eq!(Schedule::of([4]), Schedule::once(4));
    let mut empty = Schedule::of([]);
    assert_eq!(empty.next(), None);
}

#[test]
fn once_repeat_matches_fixed_rate() {
    for delay in [0, 3] {
        let mut repeated = Schedule::once(delay).repeat();
        let mut fixed = Schedule::fixed_rate(delay);
        assert_eq!(take(&mut repeated, 6), take(&mut fixed, 6));
    }
}

#[test]
fn limit_time_drops_step_that_overruns_budget() {
    let mut s = Schedule::of([1, 2, 3]).limit_time(5);
    assert_eq!(drain(&mut s), vec![1, 2]);
    s.reset();
    assert_eq!(drain(&mut s), vec![1, 2]);

    let mut exact = Schedule::of([2, 3]).limit_time(5);
    assert_eq!(drain(&mut exact), vec![2, 3]);
}

#[test]
fn limit_time_of_limit_time_keeps_tighter_budget_and_progress() {
    let mut s = Schedule::fixed_rate(2).limit_time(10);
    assert_eq!(s.next(), Some(2));
    let mut s = s.limit_time(5);
    assert_eq!(drain(&mut s), vec![2]);
    s.reset();
    assert_eq!(drain(&mut s), vec![2, 2]);
}

#[test]
fn limit_steps_caps_emitted_delays() {
    let mut s = Schedule::fixed_rate(3).limit_steps(4);
    assert_eq!(drain(&mut s), vec![3, 3, 3, 3]);
    s.reset();
    assert_eq!(drain(&mut s).len(), 4);

    let mut truncated = Schedule::of([1, 2, 3, 4]).limit_steps(2);
    assert_eq!(drain(&mut truncated), vec![1, 2]);

    let mut partial = Schedule::of([1, 2, 3, 4]);
    partial.next();
    let mut partial = partial.limit_steps(2);
    assert_eq!(drain(&mut partial), vec![2, 3]);
    partial.reset();
    assert_eq!(drain(&mut partial), vec![1, 2]);

    assert_eq!(Schedule::fixed_rate(5).limit_steps(1), Schedule::once(5));
    assert_eq!(drain(&mut Schedule::once(1).limit_steps(0)), Vec::<u64>::new());
}

#[test]
fn limit_steps_of_limit_steps_keeps_tighter_bound() {
    let mut s = Schedule::fixed_rate(1).limit_steps(5);
    s.next();
    let mut s = s.limit_steps(3).limit_steps(9);
    assert_eq!(drain(&mut s), vec![1, 1]);
}

#[test]
fn append_concatenates_and_flattens_arrays() {
    let mut s = Schedule::once(1).append(Schedule::of([2, 3]));
    assert_eq!(drain(&mut s), vec![1, 2, 3]);
    s.reset();
    assert_eq!(drain(&mut s), vec![1, 2, 3]);

    let flat = Schedule::of([1, 2]).append(Schedule::of([3, 4]));
    assert_eq!(flat, Schedule::of([1, 2, 3, 4]));
}

#[test]
fn infinite_schedules_absorb_append_and_repeat() {
    let fixed = Schedule::fixed_rate(2);
    assert_eq!(fixed.clone().append(Schedule::once(9)), fixed);
    assert_eq!(fixed.clone().repeat(), fixed);

    let looping = Schedule::of([1, 2]).repeat();
    assert_eq!(looping.clone().append(Schedule::once(9)), looping);
    assert_eq!(looping.clone().repeat(), looping);
}

#[test]
fn composite_infinite_schedules_absorb_append_and_repeat() {
    let warmup = Schedule::once(2).append(Schedule::fixed_rate(3));
    assert!(warmup.is_infinite());
    assert_eq!(warmup.clone().repeat(), warmup);
    assert_eq!(warmup.clone().append(Schedule::once(9)), warmup);

    let mut s = warmup.repeat();
    assert_eq!(take(&mut s, 3), vec![Some(2), Some(3), Some(3)]);
}

#[test]
fn repeat_restarts_finite_schedules() {
    let mut s = Schedule::of([1, 2]).append(Schedule::once(5)).repeat();
    assert!(s.is_infinite());
    assert_eq!(
        take(&mut s, 7),
        vec![Some(1), Some(2), Some(5), Some(1), Some(2), Some(5), Some(1)]
    );
}

#[test]
fn repeating_an_empty_schedule_stays_empty() {
    let mut s = Schedule::of([]).repeat();
    assert_eq!(s.next(), None);
    assert!(!s.is_infinite());
}

#[test]
fn clone_keeps_cursor_position() {
    let mut s = Schedule::of([1, 2, 3]);
    s.next();
    let mut copy = s.clone();
    assert_eq!(copy.next(), Some(2));
    assert_eq!(s.next(), Some(2));
}
