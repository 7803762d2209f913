pub mod item;
pub mod point;
#[cfg(feature = "server")]
pub mod config;
