//! Configuration, record models and shared helpers

pub mod clock;
pub mod config;
pub mod models;
