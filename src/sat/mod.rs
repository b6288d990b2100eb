#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Boolean formulas, their CNF encoding, and the solver backend.

pub mod assignment;
pub mod cnf;
pub mod dimacs;
pub mod expr;
pub mod solver;
