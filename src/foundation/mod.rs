pub mod error;
pub mod slot;
