#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
use crate::sat::cnf::Literal;
use crate::sat::expr::Var;
use bit_vec::BitVec;

/// A complete truth assignment as returned by the backend, indexed by variable.
///
/// Variables the backend never saw read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(BitVec);

impl Assignment {
    /// Builds an assignment from the literals of a model; positive literals are true.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut assignment = Self::default();
        for l in literals {
            if l > 0 {
                assignment.set(l.unsigned_abs(), true);
            }
        }
        assignment
    }

    pub fn set(&mut self, var: Var, value: bool) {
        let index = var as usize;
        if index >= self.0.len() {
            self.0.grow(index + 1 - self.0.len(), false);
        }
        self.0.set(index, value);
    }

    #[must_use]
    pub fn var_value(&self, var: Var) -> bool {
        self.0.get(var as usize).unwrap_or(false)
    }
}
