//! A marker running around a double chest on a simulated host.
//!
//! `cargo run --example marquee`

use std::cell::RefCell;
use std::rc::Rc;

use slotframe::{
    Animation, AnimationRunner, Border, BorderPattern, Frame, IntGenerator, Mask, Pattern,
    Schedule, SlotUpdate, TickScheduler,
};

const SLOTS: usize = 54;

type Item = Option<&'static str>;

fn marker(slot: usize) -> anyhow::Result<Frame<(), Item>> {
    let previous = (slot + SLOTS - 1) % SLOTS;
    let active = IntGenerator::of([i32::try_from(previous)?, i32::try_from(slot)?]);
    let mask = Mask::new(|symbol: Option<&()>| match symbol {
        Some(()) => SlotUpdate::Set(Some("marker")),
        // clearing a slot is a write, not a skip
        None => SlotUpdate::Set(None),
    });
    Ok(Frame::new(Pattern::single(slot, ()), mask, active)?)
}

fn current_slot(frame: &Frame<(), Item>) -> usize {
    let mut slots = frame.active_slots().clone();
    slots.reset();
    slots
        .last()
        .and_then(|slot| usize::try_from(slot).ok())
        .unwrap_or(0)
}

fn render(grid: &[Item]) -> String {
    grid.chunks(9)
        .map(|row| {
            row.iter()
                .map(|cell| if cell.is_some() { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let host = Rc::new(TickScheduler::new());
    let grid: Rc<RefCell<Vec<Item>>> = Rc::new(RefCell::new(vec![None; SLOTS]));

    let border: Pattern<Border> = BorderPattern::new(9, 6).into();
    let outline = Frame::new(
        border,
        Mask::single(Border::Outer, Some("glass")),
        IntGenerator::range(0, SLOTS as i32, 1)?,
    )?;
    outline.apply(|slot, item| grid.borrow_mut()[slot] = item);
    println!("outline:\n{}\n", render(&grid.borrow()));

    let animation = Animation::infinite(marker(0)?, |frame| {
        let next = (current_slot(frame) + 1) % SLOTS;
        // slots below SLOTS always fit in i32
        marker(next).unwrap_or_else(|_| frame.clone())
    })
    .limit(SLOTS + 1);

    let sink = grid.clone();
    let mut runner = AnimationRunner::new(host.clone(), animation, move |slot, item| {
        sink.borrow_mut()[slot] = item;
    });

    runner.play(Schedule::now().append(Schedule::fixed_rate(5)))?;
    for _ in 0..4 {
        host.advance(5);
        println!("tick {} ({}):\n{}\n", host.now(), runner.status(), render(&grid.borrow()));
    }

    host.run_until_idle(1_000);
    println!(
        "tick {}: {} after {} frames",
        host.now(),
        runner.status(),
        runner.frames_applied()
    );
    Ok(())
}
