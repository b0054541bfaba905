// src/core/mod.rs

pub mod csv;
pub mod date;
pub mod stats;
