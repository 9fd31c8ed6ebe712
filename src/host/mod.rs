pub mod scheduler;
pub mod tick;
