use crate::error::{Error, Result};
use crate::modeling::domain::Domain;
use crate::modeling::function::{Constant, Function};
use crate::modeling::term::{IntTerm, Term};
use crate::sat::assignment::Assignment;
use crate::sat::expr::Formula;

/// A satisfying assignment, read back through the typed symbols that were
/// declared in the [`ConstraintSet`](super::ConstraintSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    assignment: Assignment,
}

impl Model {
    pub(crate) const fn new(assignment: Assignment) -> Self {
        Self { assignment }
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[must_use]
    pub fn holds(&self, formula: &Formula) -> bool {
        formula.eval(&|v| self.assignment.var_value(v))
    }

    /// `f(d)`.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if no codomain element is assigned.
    pub fn value<D: Domain, C: Domain>(&self, f: &Function<D, C>, d: D) -> Result<C> {
        C::ALL
            .iter()
            .copied()
            .find(|&c| self.assignment.var_value(f.var(d, c)))
            .ok_or_else(|| Error::Undetermined(format!("{}({d})", f.name())))
    }

    /// `[(d, f(d))]` over the whole domain, in declaration order.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if any element has no assigned value.
    pub fn table<D: Domain, C: Domain>(&self, f: &Function<D, C>) -> Result<Vec<(D, C)>> {
        D::ALL
            .iter()
            .map(|&d| self.value(f, d).map(|c| (d, c)))
            .collect()
    }

    /// The element an unknown constant was assigned.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if the constant has no assigned element.
    pub fn constant<D: Domain>(&self, constant: &Constant<D>) -> Result<D> {
        D::ALL
            .iter()
            .copied()
            .find(|&d| self.assignment.var_value(constant.var(d)))
            .ok_or_else(|| Error::Undetermined(constant.name().to_owned()))
    }

    /// The element a term denotes.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if none of the term's cases hold.
    pub fn term<D: Domain>(&self, term: &Term<D>) -> Result<D> {
        D::ALL
            .iter()
            .copied()
            .find(|&d| self.holds(&term.is(d)))
            .ok_or_else(|| Error::Undetermined(format!("term of sort {}", D::NAME)))
    }

    /// The value an integer term takes.
    ///
    /// # Errors
    ///
    /// [`Error::Undetermined`] if none of the term's cases hold.
    pub fn int(&self, term: &IntTerm) -> Result<i64> {
        term.cases()
            .iter()
            .find(|(condition, _)| self.holds(condition))
            .map(|&(_, value)| value)
            .ok_or_else(|| Error::Undetermined("integer term".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::domain::tests::Color;
    use crate::modeling::ordinal::Ordinal;

    fn model(true_vars: &[i32]) -> Model {
        Model::new(Assignment::from_literals(true_vars.iter().copied()))
    }

    #[test]
    fn test_value_and_table() {
        let f = Function::<Color, Color>::new("next", 1);
        // red -> green (2), green -> dark_blue (7), dark_blue -> off-white (12), off-white -> red (13)
        let m = model(&[2, 7, 12, 13]);
        assert_eq!(m.value(&f, Color::Red).unwrap(), Color::Green);
        assert_eq!(
            m.table(&f).unwrap(),
            vec![
                (Color::Red, Color::Green),
                (Color::Green, Color::DarkBlue),
                (Color::DarkBlue, Color::OffWhite),
                (Color::OffWhite, Color::Red),
            ]
        );
    }

    #[test]
    fn test_undetermined_value_is_an_error() {
        let f = Function::<Color, Color>::new("next", 1);
        let m = model(&[2]);
        let err = m.value(&f, Color::Green).unwrap_err();
        assert_eq!(err.to_string(), "model assigns no value to `next(green)`");
    }

    #[test]
    fn test_constant_term_and_int() {
        let c = Constant::<Color>::new("favourite", 1);
        let m = model(&[3]);
        assert_eq!(m.constant(&c).unwrap(), Color::DarkBlue);
        assert_eq!(m.term(&c.term()).unwrap(), Color::DarkBlue);

        let position = Ordinal::<Color>::new("position");
        assert_eq!(m.int(&position.at(&c)).unwrap(), 3);
        assert_eq!(m.int(&position.at(&c).plus(1)).unwrap(), 4);
    }
}
