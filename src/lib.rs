// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod anomaly;
pub mod cli;
pub mod core;
pub mod specs;

pub mod file;
pub mod params;
pub mod runner;
pub mod store;
