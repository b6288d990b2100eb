//! Enumeration of every distinct solution of a constraint set.
//!
//! The enumerator solves, projects the model onto the dependent functions
//! over every element of an independent sort, blocks that projection and
//! solves again, until the solver answers `unsat`.

use crate::error::{Error, Result};
use crate::modeling::constraints::ConstraintSet;
use crate::modeling::domain::Domain;
use crate::modeling::function::Function;
use crate::modeling::model::Model;
use crate::modeling::session::Session;
use crate::sat::expr::Formula;
use crate::sat::solver::{Backend, Status, Varisat};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Something read off a model for each element of the independent sort `D`.
pub trait Projection<D: Domain> {
    fn name(&self) -> &str;

    /// Name of the value taken at `element`.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if the model holds no value there.
    fn label(&self, model: &Model, element: D) -> Result<&'static str>;

    /// A formula that holds exactly when the value at `element` differs from
    /// the one in `model`.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if the model holds no value there.
    fn differs(&self, model: &Model, element: D) -> Result<Formula>;
}

impl<D: Domain, C: Domain> Projection<D> for Function<D, C> {
    fn name(&self) -> &str {
        Function::name(self)
    }

    fn label(&self, model: &Model, element: D) -> Result<&'static str> {
        model.value(self, element).map(Domain::name)
    }

    fn differs(&self, model: &Model, element: D) -> Result<Formula> {
        model.value(self, element).map(|c| !self.is(element, c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<D> {
    pub element: D,
    pub values: SmallVec<[&'static str; 4]>,
}

/// One solution, projected onto the dependent functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<D> {
    pub columns: Vec<String>,
    pub rows: Vec<Row<D>>,
    pub model: Model,
}

impl<D: Domain> Solution<D> {
    fn project(model: Model, projections: &[&dyn Projection<D>]) -> Result<Self> {
        let rows = D::ALL
            .iter()
            .map(|&element| {
                let values = projections
                    .iter()
                    .map(|p| p.label(&model, element))
                    .collect::<Result<_>>()?;
                Ok(Row { element, values })
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            columns: projections.iter().map(|p| p.name().to_owned()).collect(),
            rows,
            model,
        })
    }

    /// The value of `column` at `element`.
    #[must_use]
    pub fn get(&self, element: D, column: &str) -> Option<&'static str> {
        let column = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|row| row.element == element)
            .map(|row| row.values[column])
    }

    /// The projection only, so solutions from different runs can be compared.
    #[must_use]
    pub fn key(&self) -> Vec<(D, SmallVec<[&'static str; 4]>)> {
        self.rows
            .iter()
            .map(|row| (row.element, row.values.clone()))
            .collect()
    }
}

impl<D: Domain> Display for Solution<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self
            .rows
            .iter()
            .map(|row| row.element.name().len())
            .chain([D::NAME.len()])
            .max()
            .unwrap_or_default();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .map(|row| row.values[i].len())
                    .chain([column.len()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        write!(f, "{:<first$}", D::NAME.to_lowercase())?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {column:<width$}")?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:<first$}", row.element.name())?;
            for (value, width) in row.values.iter().zip(&widths) {
                write!(f, "  {value:<width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum State {
    Searching,
    SolutionFound(Model),
    Exhausted,
}

/// Iterator over the distinct solutions of a constraint set.
///
/// Each step is one blocking solver call on a single incremental backend.
/// An unsatisfiable set yields nothing; an `unknown` answer yields one
/// [`Error::Unknown`] and ends the iteration.
pub struct Enumerator<'p, D: Domain, B = Varisat> {
    session: Session<B>,
    projections: &'p [&'p dyn Projection<D>],
    state: State,
    found: usize,
}

impl<'p, D: Domain> Enumerator<'p, D> {
    #[must_use]
    pub fn new(constraints: &ConstraintSet, projections: &'p [&'p dyn Projection<D>]) -> Self {
        Self::with_backend(constraints, projections, Varisat::new())
    }
}

impl<'p, D: Domain, B: Backend> Enumerator<'p, D, B> {
    pub fn with_backend(
        constraints: &ConstraintSet,
        projections: &'p [&'p dyn Projection<D>],
        backend: B,
    ) -> Self {
        Self {
            session: Session::new(constraints, backend),
            projections,
            state: State::Searching,
            found: 0,
        }
    }

    /// Number of solutions emitted so far.
    #[must_use]
    pub const fn found(&self) -> usize {
        self.found
    }

    /// Records the solution and rules its projection out of later searches.
    fn emit(&mut self, model: Model) -> Result<Solution<D>> {
        let exclusion = D::ALL
            .iter()
            .cartesian_product(self.projections)
            .map(|(&element, p)| p.differs(&model, element))
            .collect::<Result<Vec<_>>>()?;
        self.session.add(&Formula::or(exclusion));
        self.found += 1;
        trace!(found = self.found, "blocked solution");
        Solution::project(model, self.projections)
    }
}

impl<D: Domain, B: Backend> Iterator for Enumerator<'_, D, B> {
    type Item = Result<Solution<D>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::Exhausted) {
                State::Exhausted => return None,
                State::Searching => match self.session.solve() {
                    Status::Sat => match self.session.model() {
                        Some(model) => self.state = State::SolutionFound(model),
                        None => {
                            return Some(Err(Error::Unknown(
                                "sat answer without a model".to_owned(),
                            )));
                        }
                    },
                    Status::Unsat => {
                        debug!(solutions = self.found, "enumeration exhausted");
                        return None;
                    }
                    Status::Unknown => {
                        debug!(solutions = self.found, "enumeration stopped on unknown");
                        return Some(Err(Error::Unknown(format!(
                            "after {} solution(s)",
                            self.found
                        ))));
                    }
                },
                State::SolutionFound(model) => {
                    let solution = self.emit(model);
                    if solution.is_ok() {
                        self.state = State::Searching;
                    }
                    return Some(solution);
                }
            }
        }
    }
}

impl<D: Domain, B: Backend> FusedIterator for Enumerator<'_, D, B> {}

/// Every distinct solution of `constraints`, projected onto `projections`
/// over every element of `D`.
///
/// # Errors
///
/// [`Error::Unknown`] if the solver gives up part way, or
/// [`Error::Undetermined`] if a projection reads a symbol the constraint set
/// does not own.
pub fn all_solutions<D: Domain>(
    constraints: &ConstraintSet,
    projections: &[&dyn Projection<D>],
) -> Result<Vec<Solution<D>>> {
    Enumerator::new(constraints, projections).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::Domain;
    use crate::sat::cnf::Literal;
    use crate::sat::assignment::Assignment;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
    enum Runner {
        Ann,
        Bo,
        Cy,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
    enum Place {
        Gold,
        Silver,
        Bronze,
    }

    fn podium() -> (ConstraintSet, Function<Runner, Place>) {
        let (cs, place) = ConstraintSet::new().one_to_one::<Runner, Place>("place").unwrap();
        (cs, place)
    }

    #[test]
    fn test_counts_every_permutation_once() {
        let (cs, place) = podium();
        let solutions = all_solutions::<Runner>(&cs, &[&place]).unwrap();
        assert_eq!(solutions.len(), 6);
        assert_eq!(solutions.iter().map(Solution::key).unique().count(), 6);
    }

    #[test]
    fn test_clues_narrow_the_set() {
        let (cs, place) = podium();
        let cs = cs.clue("Ann did not win", place.of(Runner::Ann).is_not(Place::Gold));
        let solutions = all_solutions::<Runner>(&cs, &[&place]).unwrap();
        assert_eq!(solutions.len(), 4);
        for solution in &solutions {
            assert_ne!(solution.get(Runner::Ann, "place"), Some("gold"));
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let (cs, place) = podium();
        let first: HashSet<_> = all_solutions::<Runner>(&cs, &[&place])
            .unwrap()
            .iter()
            .map(Solution::key)
            .collect();
        let second: HashSet<_> = all_solutions::<Runner>(&cs, &[&place])
            .unwrap()
            .iter()
            .map(Solution::key)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsat_set_yields_nothing() {
        let (cs, place) = podium();
        let cs = cs
            .clue("Ann won", place.is(Runner::Ann, Place::Gold))
            .clue("Bo won", place.is(Runner::Bo, Place::Gold));
        let projections: [&dyn Projection<Runner>; 1] = [&place];
        let mut solutions = Enumerator::new(&cs, &projections);
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
        assert_eq!(solutions.found(), 0);
    }

    #[test]
    fn test_projection_ignores_other_symbols() {
        let (cs, place) = podium();
        let (cs, _) = cs.constant::<Runner>("fan_favourite").unwrap();
        // Three choices of favourite per podium, but only the podium is projected.
        assert_eq!(all_solutions::<Runner>(&cs, &[&place]).unwrap().len(), 6);
    }

    #[test]
    fn test_display_aligns_columns() {
        let (cs, place) = podium();
        let cs = cs
            .assert(place.is(Runner::Ann, Place::Silver))
            .assert(place.is(Runner::Bo, Place::Gold));
        let solutions = all_solutions::<Runner>(&cs, &[&place]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].to_string(),
            "runner  place \nann     silver\nbo      gold  \ncy      bronze\n"
        );
    }

    /// Backend that always gives up.
    struct GiveUp;

    impl Backend for GiveUp {
        fn add_clause(&mut self, _: &[Literal]) {}

        fn solve(&mut self, _: &[Literal]) -> Status {
            Status::Unknown
        }

        fn model(&self) -> Option<Assignment> {
            None
        }

        fn failed_core(&self) -> Vec<Literal> {
            Vec::new()
        }
    }

    #[test]
    fn test_unknown_is_an_error_not_exhaustion() {
        let (cs, place) = podium();
        let projections: [&dyn Projection<Runner>; 1] = [&place];
        let mut solutions = Enumerator::with_backend(&cs, &projections, GiveUp);
        assert!(matches!(solutions.next(), Some(Err(Error::Unknown(_)))));
        assert!(solutions.next().is_none());
    }
}
