//! Core library exports for the Ecoleta collection-point service.
//!
//! The always-available `discovery` module holds the client-side filter
//! coordinator. The `data` feature adds SQLite persistence, `server` the
//! registry HTTP API and `client` the `reqwest` adapters used by discovery.

pub mod discovery;
pub mod domain;
pub mod dto;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "client")]
pub mod client;
