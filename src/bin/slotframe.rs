use std::{
    cell::RefCell,
    path::PathBuf,
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use slotframe::{
    Animation, AnimationRunner, Frame, GRID_COLUMNS, HostCaps, IntGenerator, Mask, NativePlan,
    Pattern, RunnerOpts, ScheduleDef, SlotUpdate, TickScheduler,
};

#[derive(Parser, Debug)]
#[command(name = "slotframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which host primitive a schedule maps to.
    Plan(PlanArgs),
    /// Simulate a marker animation on a text grid.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ScheduleSource {
    /// Schedule definition as inline JSON.
    #[arg(long)]
    schedule: Option<String>,

    /// Path to a schedule definition JSON file.
    #[arg(long)]
    schedule_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    source: ScheduleSource,

    /// Pretend the host only offers one-shot tasks.
    #[arg(long)]
    no_timers: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: ScheduleSource,

    /// Number of frames in the animation.
    #[arg(long, default_value_t = 9)]
    frames: usize,

    /// Grid rows (9 slots each).
    #[arg(long, default_value_t = 1)]
    rows: usize,

    /// Ticks to simulate.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Drive every schedule step by step.
    #[arg(long)]
    generic: bool,

    /// Pretend the host only offers one-shot tasks.
    #[arg(long)]
    no_timers: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_schedule(source: &ScheduleSource) -> anyhow::Result<ScheduleDef> {
    let def = match (&source.schedule, &source.schedule_file) {
        (Some(text), _) => ScheduleDef::from_json(text).context("parse --schedule JSON")?,
        (None, Some(path)) => ScheduleDef::from_path(path)?,
        (None, None) => anyhow::bail!("either --schedule or --schedule-file is required"),
    };
    Ok(def)
}

fn host_caps(no_timers: bool) -> HostCaps {
    if no_timers {
        HostCaps::NONE
    } else {
        HostCaps::ALL
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let def = read_schedule(&args.source)?;
    let schedule = def.build();
    let Some(plan) = NativePlan::recognize(&schedule) else {
        println!("plan: step by step");
        return Ok(());
    };
    println!("plan: {}", serde_json::to_string(&plan)?);
    match plan.bind(host_caps(args.no_timers)) {
        Some(binding) => println!("binding: {}", serde_json::to_string(&binding)?),
        None => println!("binding: step by step"),
    }
    Ok(())
}

/// Frame that draws the marker at `slot` and clears `previous`.
fn marker_frame(slot: usize, previous: Option<usize>) -> anyhow::Result<Frame<(), char>> {
    let mut active = Vec::with_capacity(2);
    active.extend(previous);
    active.push(slot);
    let active = active
        .into_iter()
        .map(i32::try_from)
        .collect::<Result<Vec<_>, _>>()
        .context("grid too large")?;
    let mask = Mask::new(|symbol: Option<&()>| {
        SlotUpdate::Set(if symbol.is_some() { '#' } else { '.' })
    });
    Ok(Frame::new(
        Pattern::single(slot, ()),
        mask,
        IntGenerator::of(active),
    )?)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let def = read_schedule(&args.source)?;
    let size = GRID_COLUMNS * args.rows.max(1);

    let frames = (0..args.frames)
        .map(|n| marker_frame(n % size, n.checked_sub(1).map(|p| p % size)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let animation = Animation::of_frames(frames).context("build animation")?;

    let host = Rc::new(TickScheduler::with_caps(host_caps(args.no_timers)));
    let grid = Rc::new(RefCell::new(vec!['.'; size]));
    let container = {
        let grid = grid.clone();
        let clock = Rc::downgrade(&host);
        move |slot: usize, item: char| {
            if let Some(cell) = grid.borrow_mut().get_mut(slot) {
                *cell = item;
            }
            if item == '#' {
                let tick = clock.upgrade().map_or(0, |h| h.now());
                println!("tick {tick}: marker at slot {slot}");
            }
        }
    };
    let opts = RunnerOpts {
        native_schedules: !args.generic,
    };
    let mut runner = AnimationRunner::with_opts(host.clone(), animation, container, opts);

    runner.play(def.build())?;
    host.run_until_idle(args.ticks);

    println!(
        "status: {} after {} frame(s), tick {}",
        runner.status(),
        runner.frames_applied(),
        host.now()
    );
    for row in grid.borrow().chunks(GRID_COLUMNS) {
        println!("{}", row.iter().collect::<String>());
    }
    Ok(())
}
