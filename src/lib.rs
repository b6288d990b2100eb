#![deny(missing_docs)]
//! This crate encodes classic logic-grid puzzles as SAT problems and solves them.

extern crate self as logic_puzzles;

/// The `error` module defines the crate-wide error type.
pub mod error;

/// The `modeling` module provides typed sorts, functions and ordinals over a SAT encoding,
/// plus the solver session and the all-solutions enumerator.
#[allow(missing_docs)]
pub mod modeling;

/// The `puzzles` module holds the zebra, bags, ice-cream, schedule and New Year's puzzles.
#[allow(missing_docs)]
pub mod puzzles;

/// The `sat` module implements boolean formulas, their CNF encoding and the solver backend.
#[allow(missing_docs)]
pub mod sat;

pub use error::{Error, Result};
