//! MATLAB backend: a runnable simulation script. Symbol references are
//! rewritten into state-vector accesses before the solver function is
//! printed, while the comment echo at the top of the script shows the
//! system as it was written.

use std::io::{self, Write};

use itertools::Itertools;

use crate::ast::Expr;
use crate::codegen::latex::LatexPrinter;
use crate::codegen::ExprVisitor;
use crate::error::{Diagnostic, GenError};
use crate::table::SymbolTable;

/// Rewrites every defined-symbol reference in `expr` into the corresponding
/// state-vector slot. Numbers and variable references are left untouched,
/// and the tree shape never changes, only leaf identity. Runs strictly after
/// validation; an unregistered symbol here is the same fatal error.
pub fn substitute_indices(expr: &mut Expr, table: &SymbolTable) -> Result<(), GenError> {
    match expr {
        Expr::Symbol(name) => {
            let index = table.get_symbol(name)?.index;
            *expr = Expr::State(index);
            Ok(())
        }
        Expr::Binop { left, right, .. } => {
            substitute_indices(left, table)?;
            substitute_indices(right, table)
        }
        Expr::Monop { child, .. } => substitute_indices(child, table),
        Expr::Call { arg, .. } => substitute_indices(arg, table),
        Expr::Number(_) | Expr::Variable(_) | Expr::State(_) => Ok(()),
    }
}

/// Prints one expression in MATLAB syntax: fully parenthesized infix, no
/// precedence-based elision, `y(i + 1)` state accesses, `abs()` for the
/// absolute-value operator.
pub struct MatlabPrinter<'a, W: Write> {
    pub out: &'a mut W,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl<W: Write> ExprVisitor for MatlabPrinter<'_, W> {
    fn visit_number(&mut self, value: f64) -> io::Result<()> {
        write!(self.out, "{}", value)
    }

    fn visit_symbol(&mut self, name: &str) -> io::Result<()> {
        // only reachable on unsubstituted trees (the comment echo)
        write!(self.out, "{}", name)
    }

    fn visit_variable(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "{}", name)
    }

    fn visit_state(&mut self, index: usize) -> io::Result<()> {
        // MATLAB matrices are 1-based
        write!(self.out, "y({})", index + 1)
    }

    fn visit_binop(&mut self, op: char, left: &Expr, right: &Expr) -> io::Result<()> {
        write!(self.out, "(")?;
        self.visit(left)?;
        write!(self.out, "{}", op)?;
        self.visit(right)?;
        write!(self.out, ")")
    }

    fn visit_monop(&mut self, op: char, child: &Expr) -> io::Result<()> {
        match op {
            '-' => {
                write!(self.out, "(-")?;
                self.visit(child)?;
                write!(self.out, ")")
            }
            '|' => {
                write!(self.out, "abs(")?;
                self.visit(child)?;
                write!(self.out, ")")
            }
            _ => {
                self.diagnostics.push(Diagnostic::BadOperator(op));
                Ok(())
            }
        }
    }

    fn visit_call(&mut self, fn_name: &str, arg: &Expr) -> io::Result<()> {
        write!(self.out, "{}(", fn_name)?;
        self.visit(arg)?;
        write!(self.out, ")")
    }
}

/// Writes the simulation script for the current table contents.
///
/// The comment echo renders the original trees, so the substitution rewrite
/// runs on an owned copy of each equation and the table itself is never
/// mutated; a second backend can still run against the same table.
pub fn generate<W: Write>(table: &SymbolTable, out: &mut W) -> Result<Vec<Diagnostic>, GenError> {
    let mut diagnostics = Vec::new();

    writeln!(out, "%% Simulator generated by odegen.")?;
    writeln!(out, "% ODE:")?;
    for sym in table.symbols() {
        write!(out, "% (d/dt){} = ", sym.name)?;
        let mut printer = LatexPrinter {
            out: &mut *out,
            diagnostics: &mut diagnostics,
        };
        printer.visit(&sym.equation)?;
        writeln!(out)?;
    }

    write!(out, "\ndydt = @(t, y) [")?;
    for sym in table.symbols() {
        let mut equation = sym.equation.clone();
        substitute_indices(&mut equation, table)?;
        let mut printer = MatlabPrinter {
            out: &mut *out,
            diagnostics: &mut diagnostics,
        };
        printer.visit(&equation)?;
        write!(out, ";")?;
    }
    writeln!(out, "];")?;

    // no mechanism to set non-zero initial values
    write!(out, "y_0 = [0")?;
    for _ in 1..table.len() {
        write!(out, ", 0")?;
    }
    writeln!(out, "];")?;

    writeln!(out, "[t,y] = ode45(dydt, [0 20], y_0);")?;

    writeln!(out, "figure; clf;")?;
    writeln!(out, "hold on;")?;
    for index in 0..table.len() {
        writeln!(out, "plot(t,y(:,{}),'-o');", index + 1)?;
    }
    writeln!(out, "hold off;")?;
    writeln!(out, "grid on;")?;
    writeln!(out, "xlabel('Time t');")?;
    writeln!(out, "ylabel('Solution');")?;
    let legend = table
        .symbols()
        .iter()
        .map(|sym| format!("'{}'", sym.name))
        .join(", ");
    writeln!(out, "legend({});", legend)?;

    Ok(diagnostics)
}
