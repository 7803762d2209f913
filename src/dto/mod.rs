//! JSON shapes shared by the registry backend and its HTTP clients.

pub mod items;
pub mod points;
