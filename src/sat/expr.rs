#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Boolean formulas over SAT variables.
//!
//! Formulas are built through the smart constructors on [`Formula`], which fold
//! constants and flatten nested conjunctions/disjunctions as they go. A clue
//! that mentions a known domain element therefore collapses to a handful of
//! atoms before it ever reaches the CNF encoder.

use std::ops::{BitAnd, BitOr, Not};

/// A SAT variable, numbered from 1 as in DIMACS.
pub type Var = u32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    Const(bool),
    Atom(Var),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub const TRUE: Self = Self::Const(true);
    pub const FALSE: Self = Self::Const(false);

    #[must_use]
    pub const fn atom(var: Var) -> Self {
        Self::Atom(var)
    }

    /// Conjunction of `parts`. An empty conjunction is `true`.
    #[must_use]
    pub fn and(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Self::Const(true) => {}
                Self::Const(false) => return Self::FALSE,
                Self::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::TRUE,
            1 => flat.swap_remove(0),
            _ => Self::And(flat),
        }
    }

    /// Disjunction of `parts`. An empty disjunction is `false`.
    #[must_use]
    pub fn or(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Self::Const(false) => {}
                Self::Const(true) => return Self::TRUE,
                Self::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::FALSE,
            1 => flat.swap_remove(0),
            _ => Self::Or(flat),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Const(b) => Self::Const(!b),
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    #[must_use]
    pub fn implies(self, then: Self) -> Self {
        match (self, then) {
            (Self::Const(false), _) | (_, Self::Const(true)) => Self::TRUE,
            (Self::Const(true), then) => then,
            (cond, Self::Const(false)) => cond.negate(),
            (cond, then) => Self::Implies(Box::new(cond), Box::new(then)),
        }
    }

    #[must_use]
    pub fn iff(self, other: Self) -> Self {
        match (self, other) {
            (Self::Const(true), f) | (f, Self::Const(true)) => f,
            (Self::Const(false), f) | (f, Self::Const(false)) => f.negate(),
            (a, b) if a == b => Self::TRUE,
            (a, b) => Self::Iff(Box::new(a), Box::new(b)),
        }
    }

    /// Exactly one of `a` and `b` holds.
    #[must_use]
    pub fn xor(self, other: Self) -> Self {
        self.iff(other).negate()
    }

    /// Pairwise "not both" over `parts`.
    #[must_use]
    pub fn at_most_one(parts: &[Self]) -> Self {
        use itertools::Itertools;

        Self::and(
            parts
                .iter()
                .tuple_combinations()
                .map(|(a, b)| Self::or([a.clone().negate(), b.clone().negate()])),
        )
    }

    #[must_use]
    pub fn exactly_one(parts: &[Self]) -> Self {
        Self::and([Self::or(parts.iter().cloned()), Self::at_most_one(parts)])
    }

    /// Evaluates the formula under `value`, which reports each variable's truth value.
    pub fn eval(&self, value: &impl Fn(Var) -> bool) -> bool {
        match self {
            Self::Const(b) => *b,
            Self::Atom(v) => value(*v),
            Self::Not(inner) => !inner.eval(value),
            Self::And(parts) => parts.iter().all(|p| p.eval(value)),
            Self::Or(parts) => parts.iter().any(|p| p.eval(value)),
            Self::Implies(cond, then) => !cond.eval(value) || then.eval(value),
            Self::Iff(a, b) => a.eval(value) == b.eval(value),
        }
    }

    /// Largest variable mentioned, or 0 for a variable-free formula.
    #[must_use]
    pub fn max_var(&self) -> Var {
        match self {
            Self::Const(_) => 0,
            Self::Atom(v) => *v,
            Self::Not(inner) => inner.max_var(),
            Self::And(parts) | Self::Or(parts) => parts.iter().map(Self::max_var).max().unwrap_or(0),
            Self::Implies(a, b) | Self::Iff(a, b) => a.max_var().max(b.max_var()),
        }
    }
}

impl Not for Formula {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}

impl BitAnd for Formula {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::and([self, rhs])
    }
}

impl BitOr for Formula {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::or([self, rhs])
    }
}

/// Conjunction of `body(d)` over every `d` in `elements`.
pub fn forall<T: Copy>(elements: &[T], body: impl FnMut(T) -> Formula) -> Formula {
    Formula::and(elements.iter().copied().map(body))
}

/// Disjunction of `body(d)` over every `d` in `elements`.
pub fn exists<T: Copy>(elements: &[T], body: impl FnMut(T) -> Formula) -> Formula {
    Formula::or(elements.iter().copied().map(body))
}
