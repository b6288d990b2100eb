//! Command-line parsing and the per-puzzle report.

pub(crate) mod cli;
