#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A writer for the DIMACS CNF file format.
//!
//! The output is what most SAT solvers accept on the command line:
//! - Comment lines starting with 'c'. The puzzle encodings use them to record
//!   which variable range belongs to which declared symbol.
//! - A problem line 'p cnf <`num_variables`> <`num_clauses`>'.
//! - One clause per line, literals separated by spaces and terminated by '0'.

use crate::sat::cnf::Cnf;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes `cnf` to `writer`, preceded by one comment line per entry of `comments`.
///
/// # Errors
///
/// Propagates any I/O error from `writer`.
pub fn write_dimacs<W: Write>(mut writer: W, cnf: &Cnf, comments: &[String]) -> io::Result<()> {
    for comment in comments {
        for line in comment.lines() {
            writeln!(writer, "c {line}")?;
        }
    }
    write!(writer, "{cnf}")?;
    writer.flush()
}

/// Writes `cnf` to the file at `path`, replacing it if it exists.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_file(path: &Path, cnf: &Cnf, comments: &[String]) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_dimacs(BufWriter::new(file), cnf, comments)
}
