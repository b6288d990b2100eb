//! Error types for the puzzle models.

use thiserror::Error;

/// Main error type for building, solving and reading puzzle models.
#[derive(Debug, Error)]
pub enum Error {
    /// A builder was given a sort with no elements.
    #[error("domain `{0}` has no elements")]
    EmptyDomain(&'static str),

    /// Two symbols were declared under the same name.
    #[error("symbol `{0}` is declared twice")]
    DuplicateSymbol(String),

    /// The solver proved the constraints contradictory.
    #[error("constraints are unsatisfiable{}", conflicting(.clues))]
    Unsatisfiable {
        /// Labels of the clues in the solver's failed core.
        clues: Vec<String>,
    },

    /// The solver could not decide.
    #[error("solver could not decide satisfiability: {0}")]
    Unknown(String),

    /// A model holds no value for a symbol, usually because the symbol belongs
    /// to a different constraint set.
    #[error("model assigns no value to `{0}`")]
    Undetermined(String),

    /// A model returned by the solver violates an asserted formula.
    #[error("model violates {0}")]
    Verification(String),

    /// Writing a DIMACS export failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn conflicting(clues: &[String]) -> String {
    if clues.is_empty() {
        String::new()
    } else {
        format!("; conflicting clues: {}", clues.join(", "))
    }
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, Error>;
