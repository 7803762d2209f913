pub mod coordinate;
pub mod item;
pub mod point;
pub mod types;
