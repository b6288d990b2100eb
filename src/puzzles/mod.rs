#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The logic-grid puzzles shipped with the crate.
//!
//! Each puzzle declares its sorts, builds its symbols and clues into a
//! [`ConstraintSet`], and knows how to describe a model in plain words. Every
//! clue is labelled so that an unsatisfiable clue set can be reported by
//! naming the clues that conflict.

pub mod bags;
pub mod icecream;
pub mod new_years;
pub mod schedule;
pub mod zebra;

use crate::error::Result;
use crate::modeling::{ConstraintSet, Domain, Model, Projection, Solution, all_solutions};

pub trait Puzzle: Sized {
    /// Command-line name of the puzzle.
    const NAME: &'static str;

    /// Whether the puzzle reports every solution unless asked otherwise.
    const ENUMERATE: bool = false;

    /// The independent sort that solutions are tabulated over.
    type Subject: Domain;

    /// Declares the puzzle's symbols and asserts its clues.
    ///
    /// # Errors
    ///
    /// Propagates declaration errors from the [`ConstraintSet`] builders.
    fn build() -> Result<(ConstraintSet, Self)>;

    /// The functions that make up a solution, read over [`Self::Subject`].
    fn projections(&self) -> Vec<&dyn Projection<Self::Subject>>;

    /// The puzzle's answer in words.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`](crate::Error::Undetermined) if `model` does not
    /// come from this puzzle's constraint set.
    fn describe(&self, model: &Model) -> Result<String>;

    /// Every distinct solution of the puzzle.
    ///
    /// # Errors
    ///
    /// See [`all_solutions`].
    fn solutions(&self, constraints: &ConstraintSet) -> Result<Vec<Solution<Self::Subject>>> {
        all_solutions(constraints, &self.projections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn unique<P: Puzzle>() {
        let (cs, puzzle) = P::build().unwrap();
        let solutions = puzzle.solutions(&cs).unwrap();
        assert_eq!(solutions.len(), 1, "{} should have one solution", P::NAME);
        cs.verify(&solutions[0].model).unwrap();
    }

    #[test]
    fn test_zebra_is_unique() {
        unique::<zebra::Zebra>();
    }

    #[test]
    fn test_bags_is_unique() {
        unique::<bags::Bags>();
    }

    #[test]
    fn test_ice_cream_is_unique() {
        unique::<icecream::IceCream>();
    }

    #[test]
    fn test_schedule_is_unique() {
        unique::<schedule::Schedule>();
    }

    #[test]
    fn test_new_years_has_no_solution() {
        let (cs, puzzle) = new_years::NewYears::build().unwrap();
        assert!(puzzle.solutions(&cs).unwrap().is_empty());
        assert!(matches!(cs.solve(), Err(Error::Unsatisfiable { .. })));
    }
}
