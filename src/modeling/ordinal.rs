use crate::modeling::domain::Domain;
use crate::modeling::term::{IntTerm, Term};
use std::marker::PhantomData;

/// Position of each element of an ordered sort: the first declared element is
/// 1, the next 2, and so on.
///
/// The mapping is fixed by the declaration order, so it needs no solver
/// variables; applying it to a term yields an [`IntTerm`] whose cases are the
/// term's indicators paired with these positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordinal<D> {
    name: String,
    sort: PhantomData<D>,
}

impl<D: Domain> Ordinal<D> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self, element: D) -> i64 {
        element.ordinal()
    }

    /// `(element, position)` for every element, in declaration order.
    #[must_use]
    pub fn values(&self) -> Vec<(D, i64)> {
        D::ALL.iter().map(|&d| (d, self.value(d))).collect()
    }

    /// The position of whatever `arg` denotes.
    #[must_use]
    pub fn at(&self, arg: impl Into<Term<D>>) -> IntTerm {
        let arg = arg.into();
        IntTerm::from_cases(D::ALL.iter().map(|&d| (arg.is(d), self.value(d))).collect())
    }
}
