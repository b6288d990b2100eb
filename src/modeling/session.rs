use crate::modeling::constraints::ConstraintSet;
use crate::modeling::model::Model;
use crate::sat::cnf::{Cnf, Literal};
use crate::sat::expr::Formula;
use crate::sat::solver::{Backend, Status};
use rustc_hash::FxHashMap;
use tracing::debug;

/// A constraint set loaded into an incremental backend.
///
/// Every labelled clue is switched on through its guard literal on each
/// `solve`. Formulas added later are encoded into the same [`Cnf`] so their
/// definitions are shared with the original clauses.
#[derive(Debug)]
pub struct Session<B> {
    cnf: Cnf,
    guards: FxHashMap<Literal, String>,
    assumptions: Vec<Literal>,
    backend: B,
    flushed: usize,
}

impl<B: Backend> Session<B> {
    pub fn new(constraints: &ConstraintSet, backend: B) -> Self {
        let encoding = constraints.encode();
        debug!(
            vars = encoding.cnf.num_vars,
            clauses = encoding.cnf.clauses.len(),
            clues = encoding.guards.len(),
            "encoded constraints"
        );
        let assumptions = encoding.guards.iter().map(|&(guard, _)| guard).collect();
        let mut session = Self {
            cnf: encoding.cnf,
            guards: encoding.guards.into_iter().collect(),
            assumptions,
            backend,
            flushed: 0,
        };
        session.flush();
        session
    }

    fn flush(&mut self) {
        for clause in &self.cnf.clauses[self.flushed..] {
            self.backend.add_clause(clause);
        }
        self.flushed = self.cnf.clauses.len();
    }

    /// Permanently asserts `formula`.
    pub fn add(&mut self, formula: &Formula) {
        self.cnf.add_formula(formula, None);
        self.flush();
    }

    pub fn solve(&mut self) -> Status {
        self.backend.solve(&self.assumptions)
    }

    /// The model of the last `Sat` answer.
    #[must_use]
    pub fn model(&self) -> Option<Model> {
        self.backend.model().map(Model::new)
    }

    /// Labels of the clues in the failed core of the last `Unsat` answer, in
    /// the order they were asserted.
    #[must_use]
    pub fn conflicting_clues(&self) -> Vec<String> {
        let core = self.backend.failed_core();
        self.assumptions
            .iter()
            .filter(|&guard| core.contains(guard))
            .filter_map(|guard| self.guards.get(guard).cloned())
            .collect()
    }
}
