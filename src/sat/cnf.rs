#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Conjunctive normal form and the Tseitin encoding of [`Formula`]s.
//!
//! Clauses use DIMACS literals: a positive `i32` is a variable, a negative one
//! its negation. Every compound sub-formula that is not at the top level of an
//! assertion gets a fresh definition variable; identical sub-formulas share one
//! definition.

use crate::sat::expr::{Formula, Var};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::{self, Display};

pub type Literal = i32;
pub type Clause = SmallVec<[Literal; 8]>;

#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub num_vars: Var,
    definitions: FxHashMap<Formula, Literal>,
}

#[allow(clippy::cast_possible_wrap)]
const fn lit(var: Var) -> Literal {
    var as Literal
}

impl Cnf {
    /// An empty CNF whose first `num_vars` variables are already taken.
    #[must_use]
    pub fn new(num_vars: Var) -> Self {
        Self {
            clauses: Vec::new(),
            num_vars,
            definitions: FxHashMap::default(),
        }
    }

    /// Allocates a fresh variable and returns its positive literal.
    pub fn fresh(&mut self) -> Literal {
        self.num_vars += 1;
        lit(self.num_vars)
    }

    pub fn add_clause(&mut self, clause: impl IntoIterator<Item = Literal>) {
        let clause: Clause = clause.into_iter().collect();
        if let Some(max) = clause.iter().map(|l| l.unsigned_abs()).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    /// Asserts `formula`. With a `guard`, every generated clause is weakened by
    /// `¬guard`, so the formula only binds while `guard` is assumed true.
    pub fn add_formula(&mut self, formula: &Formula, guard: Option<Literal>) {
        let off: Option<Literal> = guard.map(|g| -g);
        match formula {
            Formula::Const(true) => {}
            Formula::Const(false) => match off {
                Some(off) => self.add_clause([off]),
                None => {
                    let x = self.fresh();
                    self.add_clause([x]);
                    self.add_clause([-x]);
                }
            },
            Formula::And(parts) => {
                for part in parts {
                    self.add_formula(part, guard);
                }
            }
            Formula::Or(parts) => {
                let clause: Clause = parts
                    .iter()
                    .map(|p| self.define(p))
                    .chain(off)
                    .collect();
                self.add_clause(clause);
            }
            Formula::Implies(cond, then) => {
                let cond = self.define(cond);
                let then = self.define(then);
                self.add_clause([-cond, then].into_iter().chain(off));
            }
            other => {
                let l = self.define(other);
                self.add_clause([l].into_iter().chain(off));
            }
        }
    }

    /// Returns a literal equivalent to `formula`, adding definition clauses as needed.
    pub fn define(&mut self, formula: &Formula) -> Literal {
        match formula {
            Formula::Atom(v) => lit(*v),
            Formula::Not(inner) => -self.define(inner),
            Formula::Const(b) => {
                if let Some(&l) = self.definitions.get(formula) {
                    return l;
                }
                let t = self.fresh();
                self.add_clause([if *b { t } else { -t }]);
                self.definitions.insert(formula.clone(), t);
                t
            }
            compound => {
                if let Some(&l) = self.definitions.get(compound) {
                    return l;
                }
                let t = match compound {
                    Formula::And(parts) => {
                        let lits: Vec<Literal> = parts.iter().map(|p| self.define(p)).collect();
                        let t = self.fresh();
                        for &l in &lits {
                            self.add_clause([-t, l]);
                        }
                        self.add_clause(std::iter::once(t).chain(lits.iter().map(|l| -l)));
                        t
                    }
                    Formula::Or(parts) => {
                        let lits: Vec<Literal> = parts.iter().map(|p| self.define(p)).collect();
                        let t = self.fresh();
                        for &l in &lits {
                            self.add_clause([t, -l]);
                        }
                        self.add_clause(std::iter::once(-t).chain(lits.iter().copied()));
                        t
                    }
                    Formula::Implies(cond, then) => {
                        let (a, b) = (self.define(cond), self.define(then));
                        let t = self.fresh();
                        self.add_clause([-t, -a, b]);
                        self.add_clause([t, a]);
                        self.add_clause([t, -b]);
                        t
                    }
                    Formula::Iff(left, right) => {
                        let (a, b) = (self.define(left), self.define(right));
                        let t = self.fresh();
                        self.add_clause([-t, -a, b]);
                        self.add_clause([-t, a, -b]);
                        self.add_clause([t, a, b]);
                        self.add_clause([t, -a, -b]);
                        t
                    }
                    Formula::Atom(_) | Formula::Not(_) | Formula::Const(_) => unreachable!(),
                };
                self.definitions.insert(compound.clone(), t);
                t
            }
        }
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(SmallVec::len).sum()
    }

    /// Checks every clause against `value`.
    pub fn verify(&self, value: &impl Fn(Var) -> bool) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&l| value(l.unsigned_abs()) == l.is_positive())
        })
    }
}

/// DIMACS rendering: problem line followed by one `0`-terminated clause per line.
impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for l in clause {
                write!(f, "{l} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    /// Brute-forces all assignments of `vars` and checks the formula holds exactly
    /// when some extension of the assignment satisfies the CNF.
    fn assert_equisatisfiable(formula: &Formula, vars: Var) {
        let mut cnf = Cnf::new(vars);
        cnf.add_formula(formula, None);
        let aux = cnf.num_vars - vars;

        for bits in 0..(1u32 << vars) {
            let base = |v: Var| bits & (1 << (v - 1)) != 0;
            let expected = formula.eval(&base);
            let extended = (0..(1u32 << aux)).any(|extra| {
                cnf.verify(&|v| {
                    if v <= vars {
                        base(v)
                    } else {
                        extra & (1 << (v - vars - 1)) != 0
                    }
                })
            });
            assert_eq!(expected, extended, "mismatch for assignment {bits:b}");
        }
    }

    #[test]
    fn test_or_of_atoms_needs_no_definitions() {
        let mut cnf = Cnf::new(3);
        cnf.add_formula(
            &Formula::or([Formula::atom(1), !Formula::atom(2), Formula::atom(3)]),
            None,
        );
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.clauses.len(), 1);
        assert_eq!(cnf.clauses[0].iter().copied().collect_vec(), vec![1, -2, 3]);
    }

    #[test]
    fn test_nested_formulas_are_equisatisfiable() {
        let a = || Formula::atom(1);
        let b = || Formula::atom(2);
        let c = || Formula::atom(3);

        assert_equisatisfiable(&((a() & b()) | !c()), 3);
        assert_equisatisfiable(&a().iff(b() | c()), 3);
        assert_equisatisfiable(&!(a().implies(b() & c())), 3);
        assert_equisatisfiable(&Formula::exactly_one(&[a(), b(), c()]), 3);
        assert_equisatisfiable(&((a() & b()) | (b() & c()) | (a() & c())), 3);
    }

    #[test]
    fn test_shared_subformulas_reuse_definitions() {
        let shared = Formula::atom(1) & Formula::atom(2);
        let mut cnf = Cnf::new(3);
        cnf.add_formula(&(shared.clone() | Formula::atom(3)), None);
        let vars_after_first = cnf.num_vars;
        cnf.add_formula(&(shared | !Formula::atom(3)), None);
        assert_eq!(cnf.num_vars, vars_after_first);
    }

    #[test]
    fn test_false_is_contradiction() {
        let mut cnf = Cnf::new(0);
        cnf.add_formula(&Formula::FALSE, None);
        assert!(!cnf.verify(&|_| true));
        assert!(!cnf.verify(&|_| false));
    }

    #[test]
    fn test_guarded_formula_is_released_by_guard() {
        let mut cnf = Cnf::new(2);
        cnf.add_formula(&(Formula::atom(1) & Formula::atom(2)), Some(3));
        assert!(cnf.verify(&|v| v != 3));
        assert!(!cnf.verify(&|v| v == 3));
        assert!(cnf.verify(&|_| true));
    }

    #[test]
    fn test_dimacs_rendering() {
        let mut cnf = Cnf::new(2);
        cnf.add_clause([1, -2]);
        cnf.add_clause([2]);
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
        assert_eq!(cnf.num_literals(), 3);
    }
}
