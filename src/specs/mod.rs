// src/specs/mod.rs
//! # Variable specs
//!
//! Static knowledge about the capitals table's climate variables: canonical
//! column names, units, one-line descriptions, and whether a variable is
//! signed (temperatures go below zero, so a size-style magnitude needs the
//! shifted derivation).
//!
//! ## What lives here
//! - The **catalog** of known variables and lookup by name.
//!
//! ## What does **not** live here
//! - Schema validation — whether a column exists in a given CSV is decided
//!   against that file's header row, never against this catalog.
//! - Scoring — see `anomaly`.
//!
//! The catalog drives `--list-vars`, the `--all-vars` expansion (catalog ∩
//! header), and shifted-size eligibility.

pub mod variables;
