pub mod animation;
pub mod frame;
pub mod native;
pub mod runner;
pub mod schedule;
pub mod schedule_def;
