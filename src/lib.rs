//! `odegen` turns a declarative description of a system of ordinary
//! differential equations into a MATLAB simulation script or a LaTeX
//! equation listing.
//!
//! The parser populates a [`SymbolTable`] with one entry per equation and
//! one per declared parameter; [`generate`] validates every reference,
//! drives the selected backend over the trees and tears the table down
//! again.

extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod table;
pub mod validate;

use std::io::Write;

pub use ast::Expr;
pub use codegen::{generate_latex, generate_matlab, substitute_indices, ExprVisitor};
pub use error::{Diagnostic, GenError};
pub use parser::parse_string;
pub use table::{Symbol, SymbolTable};

/// Output targets of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Matlab,
    Latex,
}

/// Runs a whole generation pass over the current table contents: validation,
/// rendering to `out`, then teardown.
///
/// The table is torn down on every exit path, including validation failure,
/// so a subsequent run starts clean. On success the returned diagnostics are
/// the registration diagnostics followed by whatever the backend reported.
pub fn generate<W: Write>(
    table: &mut SymbolTable,
    target: Target,
    out: &mut W,
) -> Result<Vec<Diagnostic>, GenError> {
    let result = validate::validate(table).and_then(|_| match target {
        Target::Matlab => codegen::matlab::generate(table, out),
        Target::Latex => codegen::latex::generate(table, out),
    });
    let mut diagnostics = table.take_diagnostics();
    table.teardown();
    diagnostics.extend(result?);
    Ok(diagnostics)
}
