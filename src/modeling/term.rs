//! Values of a sort, and integers, as they appear inside formulas.
//!
//! A [`Term<D>`] is stored as one indicator formula per element of `D`: entry
//! `i` holds exactly when the term denotes `D::ALL[i]`. A known element is a
//! row of constants, a [`Constant`](super::Constant) a row of atoms, and a
//! function application is assembled from the indicators of its argument.
//! Comparing two terms is then a finite disjunction over the sort.

use crate::modeling::domain::Domain;
use crate::sat::expr::Formula;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term<D> {
    cases: Vec<Formula>,
    sort: PhantomData<D>,
}

impl<D: Domain> Term<D> {
    /// The term denoting exactly `element`.
    #[must_use]
    pub fn value(element: D) -> Self {
        Self::from_cases(
            D::ALL
                .iter()
                .map(|&d| Formula::Const(d == element))
                .collect(),
        )
    }

    pub(crate) fn from_cases(cases: Vec<Formula>) -> Self {
        debug_assert_eq!(cases.len(), D::size(), "one case per element of {}", D::NAME);
        Self {
            cases,
            sort: PhantomData,
        }
    }

    #[must_use]
    pub fn cases(&self) -> &[Formula] {
        &self.cases
    }

    /// The term denotes `element`.
    #[must_use]
    pub fn is(&self, element: D) -> Formula {
        self.cases[element.index()].clone()
    }

    #[must_use]
    pub fn is_not(&self, element: D) -> Formula {
        !self.is(element)
    }

    /// The term denotes one of `elements`.
    #[must_use]
    pub fn is_any(&self, elements: &[D]) -> Formula {
        Formula::or(elements.iter().map(|&d| self.is(d)))
    }

    /// Both terms denote the same element.
    #[must_use]
    pub fn equals(&self, other: impl Into<Self>) -> Formula {
        let other = other.into();
        Formula::or(D::ALL.iter().map(|&d| self.is(d) & other.is(d)))
    }

    #[must_use]
    pub fn differs(&self, other: impl Into<Self>) -> Formula {
        !self.equals(other)
    }
}

impl<D: Domain> From<D> for Term<D> {
    fn from(element: D) -> Self {
        Self::value(element)
    }
}

impl<D: Domain> From<&Term<D>> for Term<D> {
    fn from(term: &Term<D>) -> Self {
        term.clone()
    }
}

/// An integer-valued expression over finitely many cases.
///
/// Each case pairs a condition with the value taken when it holds. Terms built
/// from [`Ordinal::at`](super::Ordinal::at) have exactly one true condition in
/// every model, so comparisons reduce to disjunctions over pairs of cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntTerm {
    cases: Vec<(Formula, i64)>,
}

impl IntTerm {
    #[must_use]
    pub fn constant(value: i64) -> Self {
        Self {
            cases: vec![(Formula::TRUE, value)],
        }
    }

    pub(crate) const fn from_cases(cases: Vec<(Formula, i64)>) -> Self {
        Self { cases }
    }

    #[must_use]
    pub fn cases(&self) -> &[(Formula, i64)] {
        &self.cases
    }

    #[must_use]
    pub fn plus(mut self, offset: i64) -> Self {
        for (_, value) in &mut self.cases {
            *value += offset;
        }
        self
    }

    #[must_use]
    pub fn minus(self, offset: i64) -> Self {
        self.plus(-offset)
    }

    /// `relation(self, other)` holds for the values the two terms take.
    pub fn relation(&self, other: &Self, relation: impl Fn(i64, i64) -> bool) -> Formula {
        Formula::or(self.cases.iter().flat_map(|(f, a)| {
            other
                .cases
                .iter()
                .filter(|&&(_, b)| relation(*a, b))
                .map(move |(g, _)| f.clone() & g.clone())
                .collect::<Vec<_>>()
        }))
    }

    #[must_use]
    pub fn equals(&self, other: &Self) -> Formula {
        self.relation(other, |a, b| a == b)
    }

    #[must_use]
    pub fn less_than(&self, other: &Self) -> Formula {
        self.relation(other, |a, b| a < b)
    }

    #[must_use]
    pub fn greater_than(&self, other: &Self) -> Formula {
        self.relation(other, |a, b| a > b)
    }

    /// The values differ by exactly one.
    #[must_use]
    pub fn next_to(&self, other: &Self) -> Formula {
        self.relation(other, |a, b| a.abs_diff(b) == 1)
    }

    /// The term takes `value`.
    #[must_use]
    pub fn is(&self, value: i64) -> Formula {
        Formula::or(
            self.cases
                .iter()
                .filter(|&&(_, v)| v == value)
                .map(|(f, _)| f.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::domain::tests::Color;

    fn atoms(base: u32) -> Term<Color> {
        Term::from_cases((0..4).map(|i| Formula::atom(base + i)).collect())
    }

    #[test]
    fn test_value_is_constant_row() {
        let t = Term::value(Color::Green);
        assert_eq!(t.is(Color::Green), Formula::TRUE);
        assert_eq!(t.is(Color::Red), Formula::FALSE);
        assert_eq!(t.is_any(&[Color::Red, Color::Green]), Formula::TRUE);
    }

    #[test]
    fn test_equals_known_value_collapses_to_atom() {
        let t = atoms(1);
        assert_eq!(t.equals(Color::DarkBlue), Formula::atom(3));
        assert_eq!(t.differs(Color::Red), !Formula::atom(1));
    }

    #[test]
    fn test_equals_between_unknowns() {
        let (s, t) = (atoms(1), atoms(5));
        let same = s.equals(&t);
        // Both "green": vars 2 and 6.
        assert!(same.eval(&|v| v == 2 || v == 6));
        assert!(!same.eval(&|v| v == 2 || v == 7));
    }

    #[test]
    fn test_int_relations() {
        let red = IntTerm::from_cases(vec![(Formula::atom(1), 1), (Formula::atom(2), 2)]);
        let three = IntTerm::constant(3);
        assert_eq!(red.less_than(&three), Formula::or([Formula::atom(1), Formula::atom(2)]));
        assert_eq!(red.clone().plus(1).equals(&three), Formula::atom(2));
        assert_eq!(red.clone().plus(2).minus(1).is(3), Formula::atom(2));
        assert_eq!(red.next_to(&three), Formula::atom(2));
        assert_eq!(three.greater_than(&red), Formula::or([Formula::atom(1), Formula::atom(2)]));
    }
}
