//! The constraint accumulator every puzzle is built from.
//!
//! A [`ConstraintSet`] is threaded by value through the builders: each
//! declaration consumes the set and hands it back together with the new
//! symbol, so the order in which symbols and clues are introduced is visible
//! in the code that builds a puzzle.
//!
//! ```ignore
//! let cs = ConstraintSet::new();
//! let (cs, bag) = cs.one_to_one::<Girl, Bag>("bag")?;
//! let (cs, american) = cs.constant::<Girl>("american")?;
//! let cs = cs.clue("the American has the yellow bag", bag.at(&american).is(Bag::Yellow));
//! let model = cs.solve()?;
//! ```

use crate::error::{Error, Result};
use crate::modeling::domain::{Domain, ensure_inhabited};
use crate::modeling::function::{Constant, Function};
use crate::modeling::model::Model;
use crate::modeling::ordinal::Ordinal;
use crate::modeling::session::Session;
use crate::sat::cnf::{Cnf, Literal};
use crate::sat::expr::{Formula, Var};
use crate::sat::solver::{Backend, Status, Varisat};
use rustc_hash::FxHashSet;
use std::fmt::{self, Display};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function {
        domain: &'static str,
        codomain: &'static str,
        one_to_one: bool,
    },
    Constant {
        sort: &'static str,
    },
    Ordinal {
        sort: &'static str,
    },
}

/// A declared symbol and the solver variables that back it.
///
/// The variables form a `rows x columns` grid in row-major order, one
/// variable per cell. An ordinal has rows but no variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub first_var: Var,
    pub num_vars: usize,
    pub rows: Vec<String>,
    pub columns: Vec<&'static str>,
}

impl Symbol {
    /// Each row label with the value `model` gives it, or `None` where no
    /// column is set.
    #[must_use]
    pub fn read(&self, model: &Model) -> Vec<(&str, Option<String>)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let value = if let SymbolKind::Ordinal { .. } = self.kind {
                    Some((r + 1).to_string())
                } else {
                    self.columns
                        .iter()
                        .enumerate()
                        .find(|&(c, _)| {
                            #[allow(clippy::cast_possible_truncation)]
                            let var = self.first_var + (r * self.columns.len() + c) as Var;
                            model.assignment().var_value(var)
                        })
                        .map(|(_, column)| (*column).to_owned())
                };
                (row.as_str(), value)
            })
            .collect()
    }
}

fn names<D: Domain>() -> Vec<&'static str> {
    D::ALL.iter().map(|d| d.name()).collect()
}

fn row_names<D: Domain>() -> Vec<String> {
    D::ALL.iter().map(|d| d.name().to_owned()).collect()
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Function {
                domain,
                codomain,
                one_to_one,
            } => {
                let arrow = if one_to_one { ">->" } else { "->" };
                write!(f, "function {}: {domain} {arrow} {codomain}", self.name)?;
            }
            SymbolKind::Constant { sort } => write!(f, "constant {}: {sort}", self.name)?,
            SymbolKind::Ordinal { sort } => write!(f, "ordinal {}: {sort} -> 1..", self.name)?,
        }
        if self.num_vars > 0 {
            write!(
                f,
                " (vars {}..={})",
                self.first_var,
                self.first_var as usize + self.num_vars - 1
            )?;
        }
        Ok(())
    }
}

/// An asserted formula, optionally labelled with the clue it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assertion {
    pub label: Option<String>,
    pub formula: Formula,
}

/// Answer of [`ConstraintSet::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Sat(Model),
    /// `clues` are the labels of a conflicting subset of the labelled clues.
    Unsat {
        clues: Vec<String>,
    },
    Unknown,
}

/// The CNF of a constraint set, with one guard literal per labelled clue.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub cnf: Cnf,
    pub guards: Vec<(Literal, String)>,
}

impl Encoding {
    /// Comment lines describing where each symbol and clue lives in the CNF.
    #[must_use]
    pub fn comments(&self, symbols: &[Symbol]) -> Vec<String> {
        symbols
            .iter()
            .map(ToString::to_string)
            .chain(
                self.guards
                    .iter()
                    .map(|(guard, label)| format!("clue \"{label}\" guarded by {guard}")),
            )
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    last_var: Var,
    symbols: Vec<Symbol>,
    names: FxHashSet<String>,
    assertions: Vec<Assertion>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        rows: Vec<String>,
        columns: Vec<&'static str>,
    ) -> Result<Var> {
        if !self.names.insert(name.to_owned()) {
            return Err(Error::DuplicateSymbol(name.to_owned()));
        }
        let num_vars = if let SymbolKind::Ordinal { .. } = kind {
            0
        } else {
            rows.len() * columns.len()
        };
        let first_var = self.last_var + 1;
        #[allow(clippy::cast_possible_truncation)]
        {
            self.last_var += num_vars as Var;
        }
        debug!(name, num_vars, first_var, "declare");
        self.symbols.push(Symbol {
            name: name.to_owned(),
            kind,
            first_var,
            num_vars,
            rows,
            columns,
        });
        Ok(first_var)
    }

    fn push(&mut self, label: Option<String>, formula: Formula) {
        self.assertions.push(Assertion { label, formula });
    }

    /// Declares a total function `name: D -> C`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] if either sort has no elements,
    /// [`Error::DuplicateSymbol`] if `name` is taken.
    pub fn function<D: Domain, C: Domain>(self, name: &str) -> Result<(Self, Function<D, C>)> {
        self.declare_function(name, false)
    }

    /// Declares a one-to-one function `name: D -> C`: total, and no two
    /// elements of `D` share an image.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] if either sort has no elements,
    /// [`Error::DuplicateSymbol`] if `name` is taken.
    pub fn one_to_one<D: Domain, C: Domain>(self, name: &str) -> Result<(Self, Function<D, C>)> {
        self.declare_function(name, true)
    }

    fn declare_function<D: Domain, C: Domain>(
        mut self,
        name: &str,
        one_to_one: bool,
    ) -> Result<(Self, Function<D, C>)> {
        ensure_inhabited::<D>()?;
        ensure_inhabited::<C>()?;
        let kind = SymbolKind::Function {
            domain: D::NAME,
            codomain: C::NAME,
            one_to_one,
        };
        let base = self.declare(name, kind, row_names::<D>(), names::<C>())?;
        let function = Function::new(name, base);
        self.push(None, function.totality());
        if one_to_one {
            self.push(None, function.distinctness());
        }
        Ok((self, function))
    }

    /// Declares an unknown element `name` of sort `D`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] if `D` has no elements,
    /// [`Error::DuplicateSymbol`] if `name` is taken.
    pub fn constant<D: Domain>(mut self, name: &str) -> Result<(Self, Constant<D>)> {
        ensure_inhabited::<D>()?;
        let kind = SymbolKind::Constant { sort: D::NAME };
        let base = self.declare(name, kind, vec![name.to_owned()], names::<D>())?;
        let constant = Constant::new(name, base);
        self.push(None, constant.definedness());
        Ok((self, constant))
    }

    /// Declares the ordinal `name` of the ordered sort `D`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDomain`] if `D` has no elements,
    /// [`Error::DuplicateSymbol`] if `name` is taken.
    pub fn ordinal<D: Domain>(mut self, name: &str) -> Result<(Self, Ordinal<D>)> {
        ensure_inhabited::<D>()?;
        let kind = SymbolKind::Ordinal { sort: D::NAME };
        self.declare(name, kind, row_names::<D>(), Vec::new())?;
        Ok((self, Ordinal::new(name)))
    }

    #[must_use]
    pub fn assert(mut self, formula: Formula) -> Self {
        self.push(None, formula);
        self
    }

    #[must_use]
    pub fn assert_all(self, formulas: impl IntoIterator<Item = Formula>) -> Self {
        formulas.into_iter().fold(self, Self::assert)
    }

    /// Asserts `formula` under a label. Labelled clues are what an
    /// unsatisfiable answer reports back.
    #[must_use]
    pub fn clue(mut self, label: impl Into<String>, formula: Formula) -> Self {
        self.push(Some(label.into()), formula);
        self
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Number of variables owned by declared symbols.
    #[must_use]
    pub const fn num_vars(&self) -> Var {
        self.last_var
    }

    /// Tseitin-encodes every assertion. Labelled clues are guarded by a fresh
    /// literal each, so the solver can report which of them conflict.
    #[must_use]
    pub fn encode(&self) -> Encoding {
        let reserved = self
            .assertions
            .iter()
            .map(|a| a.formula.max_var())
            .fold(self.last_var, Var::max);
        let mut cnf = Cnf::new(reserved);
        let mut guards = Vec::new();
        for assertion in &self.assertions {
            let guard = assertion.label.as_ref().map(|label| {
                let guard = cnf.fresh();
                guards.push((guard, label.clone()));
                guard
            });
            cnf.add_formula(&assertion.formula, guard);
        }
        Encoding { cnf, guards }
    }

    /// Decides the constraints with the default backend.
    #[must_use]
    pub fn check(&self) -> Check {
        self.check_with(Varisat::new())
    }

    #[must_use]
    pub fn check_with<B: Backend>(&self, backend: B) -> Check {
        let mut session = Session::new(self, backend);
        match session.solve() {
            Status::Sat => session.model().map_or(Check::Unknown, Check::Sat),
            Status::Unsat => Check::Unsat {
                clues: session.conflicting_clues(),
            },
            Status::Unknown => Check::Unknown,
        }
    }

    /// Finds a model, treating anything but `sat` as an error.
    ///
    /// # Errors
    ///
    /// [`Error::Unsatisfiable`] naming the conflicting clues, or
    /// [`Error::Unknown`] if the solver gave up.
    pub fn solve(&self) -> Result<Model> {
        match self.check() {
            Check::Sat(model) => Ok(model),
            Check::Unsat { clues } => Err(Error::Unsatisfiable { clues }),
            Check::Unknown => Err(Error::Unknown("no verdict".to_owned())),
        }
    }

    /// Re-evaluates every assertion under `model`.
    ///
    /// # Errors
    ///
    /// [`Error::Verification`] naming the first violated assertion.
    pub fn verify(&self, model: &Model) -> Result<()> {
        for (i, assertion) in self.assertions.iter().enumerate() {
            if !model.holds(&assertion.formula) {
                let what = assertion
                    .label
                    .as_ref()
                    .map_or_else(|| format!("assertion #{i}"), |label| format!("clue \"{label}\""));
                return Err(Error::Verification(what));
            }
        }
        Ok(())
    }
}
