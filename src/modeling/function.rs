use crate::modeling::domain::Domain;
use crate::modeling::term::Term;
use crate::sat::expr::{Formula, Var};
use std::marker::PhantomData;

/// A total function from sort `D` to sort `C`, declared in a
/// [`ConstraintSet`](super::ConstraintSet).
///
/// Backed by one variable per `(d, c)` pair, true when `f(d) = c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function<D, C> {
    name: String,
    base: Var,
    sorts: PhantomData<(D, C)>,
}

impl<D: Domain, C: Domain> Function<D, C> {
    pub(crate) fn new(name: impl Into<String>, base: Var) -> Self {
        Self {
            name: name.into(),
            base,
            sorts: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn var(&self, d: D, c: C) -> Var {
        self.base + (d.index() * C::size() + c.index()) as Var
    }

    /// `f(d) = c`.
    #[must_use]
    pub fn is(&self, d: D, c: C) -> Formula {
        Formula::atom(self.var(d, c))
    }

    /// `f(d)` as a term of the codomain.
    #[must_use]
    pub fn of(&self, d: D) -> Term<C> {
        Term::from_cases(C::ALL.iter().map(|&c| self.is(d, c)).collect())
    }

    /// `f(arg)` for an arbitrary argument term.
    #[must_use]
    pub fn at(&self, arg: impl Into<Term<D>>) -> Term<C> {
        let arg = arg.into();
        Term::from_cases(
            C::ALL
                .iter()
                .map(|&c| Formula::or(D::ALL.iter().map(|&d| arg.is(d) & self.is(d, c))))
                .collect(),
        )
    }

    /// Every element of `D` maps to exactly one element of `C`.
    #[must_use]
    pub fn totality(&self) -> Formula {
        Formula::and(D::ALL.iter().map(|&d| Formula::exactly_one(self.of(d).cases())))
    }

    /// No two elements of `D` map to the same element of `C`.
    #[must_use]
    pub fn distinctness(&self) -> Formula {
        Formula::and(C::ALL.iter().map(|&c| {
            let preimage: Vec<Formula> = D::ALL.iter().map(|&d| self.is(d, c)).collect();
            Formula::at_most_one(&preimage)
        }))
    }
}

/// An unknown element of sort `D`, such as "the house where the zebra lives".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant<D> {
    name: String,
    base: Var,
    sort: PhantomData<D>,
}

impl<D: Domain> Constant<D> {
    pub(crate) fn new(name: impl Into<String>, base: Var) -> Self {
        Self {
            name: name.into(),
            base,
            sort: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn var(&self, d: D) -> Var {
        self.base + d.index() as Var
    }

    #[must_use]
    pub fn is(&self, d: D) -> Formula {
        Formula::atom(self.var(d))
    }

    #[must_use]
    pub fn is_not(&self, d: D) -> Formula {
        !self.is(d)
    }

    #[must_use]
    pub fn term(&self) -> Term<D> {
        Term::from_cases(D::ALL.iter().map(|&d| self.is(d)).collect())
    }

    /// The constant denotes exactly one element.
    #[must_use]
    pub fn definedness(&self) -> Formula {
        Formula::exactly_one(self.term().cases())
    }
}

impl<D: Domain> From<&Constant<D>> for Term<D> {
    fn from(constant: &Constant<D>) -> Self {
        constant.term()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::Domain;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
    enum Person {
        Ann,
        Bob,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
    enum Drink {
        Tea,
        Milk,
        Water,
    }

    #[test]
    fn test_vars_are_laid_out_row_major() {
        let f = Function::<Person, Drink>::new("drinks", 10);
        assert_eq!(f.var(Person::Ann, Drink::Tea), 10);
        assert_eq!(f.var(Person::Ann, Drink::Water), 12);
        assert_eq!(f.var(Person::Bob, Drink::Tea), 13);
    }

    #[test]
    fn test_at_known_argument_is_of() {
        let f = Function::<Person, Drink>::new("drinks", 1);
        assert_eq!(f.at(Person::Bob), f.of(Person::Bob));
    }

    #[test]
    fn test_at_constant_argument() {
        let f = Function::<Person, Drink>::new("drinks", 1);
        let who = Constant::<Person>::new("who", 7);
        let milk = f.at(&who).is(Drink::Milk);
        // who = Bob (var 8), drinks(Bob) = Milk (var 5).
        assert!(milk.eval(&|v| v == 8 || v == 5));
        assert!(!milk.eval(&|v| v == 7 || v == 5));
    }

    #[test]
    fn test_totality_and_distinctness() {
        let f = Function::<Person, Drink>::new("drinks", 1);
        let total = f.totality();
        let distinct = f.distinctness();
        // Ann: tea (1), Bob: milk (5).
        let ok = |v: Var| v == 1 || v == 5;
        assert!(total.eval(&ok) && distinct.eval(&ok));
        // Both drink tea.
        let shared = |v: Var| v == 1 || v == 4;
        assert!(total.eval(&shared) && !distinct.eval(&shared));
        // Bob drinks nothing.
        assert!(!total.eval(&|v| v == 1));
    }

    #[test]
    fn test_constant_definedness() {
        let who = Constant::<Person>::new("who", 1);
        assert!(who.definedness().eval(&|v| v == 2));
        assert!(!who.definedness().eval(&|_| true));
        assert_eq!(who.is_not(Person::Ann), !Formula::atom(1));
    }
}
