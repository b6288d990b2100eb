#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Typed finite-domain modelling on top of the SAT layer.
//!
//! Puzzles declare their sorts as enums deriving [`Domain`], introduce
//! functions, unknown constants and ordinals through a [`ConstraintSet`], and
//! state their clues as [`Formula`](crate::sat::expr::Formula)s over
//! [`Term`]s. Solving yields a [`Model`] that is read back through the same
//! typed symbols, or an [`Enumerator`] over every distinct solution.

pub mod constraints;
pub mod domain;
pub mod enumerate;
pub mod function;
pub mod model;
pub mod ordinal;
pub mod session;
pub mod term;

pub use constraints::{Check, ConstraintSet};
pub use domain::Domain;
pub use enumerate::{Enumerator, Projection, Solution, all_solutions};
pub use function::{Constant, Function};
pub use model::Model;
pub use ordinal::Ordinal;
pub use puzzle_macros::Domain;
pub use session::Session;
pub use term::{IntTerm, Term};
