//! LaTeX backend: an equation listing, one line per defined symbol, with
//! every tree rendered exactly as registered (no index substitution).

use std::io::{self, Write};

use crate::ast::Expr;
use crate::codegen::ExprVisitor;
use crate::error::{Diagnostic, GenError};
use crate::table::SymbolTable;

/// Human-readable equation printer. Also drives the pre-substitution
/// comment echo of the MATLAB backend.
pub struct LatexPrinter<'a, W: Write> {
    pub out: &'a mut W,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl<W: Write> ExprVisitor for LatexPrinter<'_, W> {
    fn visit_number(&mut self, value: f64) -> io::Result<()> {
        write!(self.out, "{}", value)
    }

    fn visit_symbol(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "{}", name)
    }

    fn visit_variable(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "{}", name)
    }

    fn visit_state(&mut self, index: usize) -> io::Result<()> {
        // substituted trees never reach this backend, but render the slot
        // the way the numerical target does rather than losing it
        write!(self.out, "y({})", index + 1)
    }

    fn visit_binop(&mut self, op: char, left: &Expr, right: &Expr) -> io::Result<()> {
        match op {
            '+' | '-' => {
                write!(self.out, "(")?;
                self.visit(left)?;
                write!(self.out, " {} ", op)?;
                self.visit(right)?;
                write!(self.out, ")")
            }
            '*' | '/' | '^' => {
                write!(self.out, "(")?;
                self.visit(left)?;
                write!(self.out, "{}", op)?;
                self.visit(right)?;
                write!(self.out, ")")
            }
            _ => {
                // the node renders nothing; the run continues
                self.diagnostics.push(Diagnostic::BadOperator(op));
                Ok(())
            }
        }
    }

    fn visit_monop(&mut self, op: char, child: &Expr) -> io::Result<()> {
        match op {
            '-' => {
                write!(self.out, "(-")?;
                self.visit(child)?;
                write!(self.out, ")")
            }
            '|' => {
                write!(self.out, "|")?;
                self.visit(child)?;
                write!(self.out, "|")
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

/// Writes the equation listing for the current table contents.
pub fn generate<W: Write>(table: &SymbolTable, out: &mut W) -> Result<Vec<Diagnostic>, GenError> {
    let mut diagnostics = Vec::new();
    writeln!(out, "% Equation listing generated by odegen.")?;
    writeln!(out, "\\begin{{align*}}")?;
    for sym in table.symbols() {
        write!(out, "\\frac{{d}}{{dt}}{} &= ", sym.name)?;
        let mut printer = LatexPrinter {
            out: &mut *out,
            diagnostics: &mut diagnostics,
        };
        printer.visit(&sym.equation)?;
        writeln!(out, " \\\\")?;
    }
    writeln!(out, "\\end{{align*}}")?;
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::{generate, LatexPrinter};
    use crate::ast::Expr;
    use crate::codegen::ExprVisitor;
    use crate::error::Diagnostic;
    use crate::parser::parse_string;
    use crate::table::SymbolTable;

    fn render(expr: &Expr) -> (String, Vec<Diagnostic>) {
        let mut buf = Vec::new();
        let mut diagnostics = Vec::new();
        let mut printer = LatexPrinter {
            out: &mut buf,
            diagnostics: &mut diagnostics,
        };
        printer.visit(expr).unwrap();
        (String::from_utf8(buf).unwrap(), diagnostics)
    }

    #[test]
    fn additive_operators_are_spaced() {
        let mut table = SymbolTable::new();
        parse_string("dot(a) = a + 2 dot(b) = a * b", &mut table).unwrap();
        let (text, diagnostics) = render(&table.symbols()[0].equation);
        assert_eq!(text, "(a + 2)");
        assert!(diagnostics.is_empty());
        let (text, _) = render(&table.symbols()[1].equation);
        assert_eq!(text, "(a*b)");
    }

    #[test]
    fn negated_absolute_value() {
        let mut table = SymbolTable::new();
        parse_string("dot(x) = -|x|", &mut table).unwrap();
        let (text, _) = render(&table.symbols()[0].equation);
        assert_eq!(text, "(-|x|)");
    }

    #[test]
    fn bad_operator_is_skipped_and_reported() {
        let expr = Expr::Binop {
            op: '%',
            left: Box::new(Expr::Number(1.0)),
            right: Box::new(Expr::Number(2.0)),
        };
        let (text, diagnostics) = render(&expr);
        assert_eq!(text, "");
        assert_eq!(diagnostics, vec![Diagnostic::BadOperator('%')]);
    }

    #[test]
    fn listing_has_one_line_per_equation() {
        let mut table = SymbolTable::new();
        parse_string("dot(a) = a + 2 dot(b) = a * b", &mut table).unwrap();
        let mut buf = Vec::new();
        let diagnostics = generate(&table, &mut buf).unwrap();
        assert!(diagnostics.is_empty());
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "% Equation listing generated by odegen.\n\
             \\begin{align*}\n\
             \\frac{d}{dt}a &= (a + 2) \\\\\n\
             \\frac{d}{dt}b &= (a*b) \\\\\n\
             \\end{align*}\n"
        );
    }
}
