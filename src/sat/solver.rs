#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The seam between the puzzle encodings and the SAT solver that decides them.
//!
//! Search, propagation and core extraction all live behind [`Backend`]; the
//! crate ships a single implementation on top of `varisat`.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Literal;
use smallvec::SmallVec;
use std::fmt::{self, Display};
use tracing::{trace, warn};
use varisat::{ExtendFormula, Lit};

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Sat,
    Unsat,
    Unknown,
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sat => "sat",
            Self::Unsat => "unsat",
            Self::Unknown => "unknown",
        })
    }
}

/// An incremental SAT solver.
///
/// Clauses are only ever added. `solve` may be called repeatedly; each call
/// sees every clause added so far.
pub trait Backend {
    fn add_clause(&mut self, clause: &[Literal]);

    /// Decides the clauses added so far under `assumptions`.
    fn solve(&mut self, assumptions: &[Literal]) -> Status;

    /// The model of the last `Sat` answer.
    fn model(&self) -> Option<Assignment>;

    /// The subset of assumptions responsible for the last `Unsat` answer.
    fn failed_core(&self) -> Vec<Literal>;
}

#[allow(clippy::cast_possible_truncation)]
fn from_lit(l: Lit) -> Literal {
    l.to_dimacs() as Literal
}

fn to_lit(l: Literal) -> Lit {
    Lit::from_dimacs(l as isize)
}

/// [`Backend`] backed by the `varisat` CDCL solver.
pub struct Varisat {
    solver: varisat::Solver<'static>,
}

impl fmt::Debug for Varisat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Varisat").finish_non_exhaustive()
    }
}

impl Varisat {
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: varisat::Solver::new(),
        }
    }
}

impl Default for Varisat {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for Varisat {
    fn add_clause(&mut self, clause: &[Literal]) {
        let lits: SmallVec<[Lit; 8]> = clause.iter().copied().map(to_lit).collect();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self, assumptions: &[Literal]) -> Status {
        let lits: Vec<Lit> = assumptions.iter().copied().map(to_lit).collect();
        self.solver.assume(&lits);
        let status = match self.solver.solve() {
            Ok(true) => Status::Sat,
            Ok(false) => Status::Unsat,
            Err(err) => {
                warn!(%err, "varisat gave up");
                Status::Unknown
            }
        };
        trace!(%status, assumptions = assumptions.len(), "solve");
        status
    }

    fn model(&self) -> Option<Assignment> {
        self.solver
            .model()
            .map(|lits| Assignment::from_literals(lits.into_iter().map(from_lit)))
    }

    fn failed_core(&self) -> Vec<Literal> {
        self.solver
            .failed_core()
            .map(|core| core.iter().copied().map(from_lit).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sat_and_model() {
        let mut solver = Varisat::new();
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[-1]);
        assert_eq!(solver.solve(&[]), Status::Sat);
        let model = solver.model().unwrap();
        assert!(!model.var_value(1));
        assert!(model.var_value(2));
    }

    #[test]
    fn test_unsat() {
        let mut solver = Varisat::new();
        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);
        assert_eq!(solver.solve(&[]), Status::Unsat);
    }

    #[test]
    fn test_incremental_clauses() {
        let mut solver = Varisat::new();
        solver.add_clause(&[1, 2]);
        assert_eq!(solver.solve(&[]), Status::Sat);
        solver.add_clause(&[-1]);
        solver.add_clause(&[-2]);
        assert_eq!(solver.solve(&[]), Status::Unsat);
    }

    #[test]
    fn test_failed_core_names_assumptions() {
        let mut solver = Varisat::new();
        // 3 and 4 guard contradictory units; 5 guards an unrelated one.
        solver.add_clause(&[1, -3]);
        solver.add_clause(&[-1, -4]);
        solver.add_clause(&[2, -5]);
        assert_eq!(solver.solve(&[3, 4, 5]), Status::Unsat);
        let core = solver.failed_core();
        assert!(core.contains(&3));
        assert!(core.contains(&4));
        assert_eq!(solver.solve(&[3, 5]), Status::Sat);
    }
}
