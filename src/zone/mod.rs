//! Habitable-zone computation.
//!
//! Everything in this module is pure: no I/O, no shared state, safe to call
//! directly from the UI thread.
//!
//! - `model`     — black-body equilibrium distance (`distance_for`)
//! - `worlds`    — the fixed table of five world-type temperature bands
//! - `evaluator` — applies the model across the table for one star

pub mod evaluator;
pub mod model;
pub mod worlds;

pub use evaluator::{evaluate, ZoneResult};
pub use model::{distance_for, round_half_up, StarObservation, LS};
pub use worlds::{WorldType, WorldTypeSpec, WORLDS};
