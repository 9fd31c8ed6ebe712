pub mod item_mask;
pub mod pattern;
pub mod patterns;
pub mod shape;
