//! Rendering backends for a validated system of equations.
//!
//! Each backend implements [`ExprVisitor`], one operation per node variant,
//! writing straight to the caller's sink. Parenthesization and operator
//! placement are backend decisions, not properties of the tree.

use std::io;

use crate::ast::Expr;

pub mod latex;
pub mod matlab;

pub use latex::generate as generate_latex;
pub use matlab::{generate as generate_matlab, substitute_indices};

/// Dispatch contract implemented by every rendering backend.
///
/// Rendering is effect-only: each operation appends text to the backend's
/// sink and returns nothing but the write result. Recursion into children
/// happens explicitly inside the operations via [`ExprVisitor::visit`].
pub trait ExprVisitor {
    fn visit_number(&mut self, value: f64) -> io::Result<()>;
    fn visit_symbol(&mut self, name: &str) -> io::Result<()>;
    fn visit_variable(&mut self, name: &str) -> io::Result<()>;
    fn visit_state(&mut self, index: usize) -> io::Result<()>;
    fn visit_binop(&mut self, op: char, left: &Expr, right: &Expr) -> io::Result<()>;
    fn visit_monop(&mut self, op: char, child: &Expr) -> io::Result<()>;
    fn visit_call(&mut self, fn_name: &str, arg: &Expr) -> io::Result<()>;

    fn visit(&mut self, expr: &Expr) -> io::Result<()> {
        match expr {
            Expr::Number(value) => self.visit_number(*value),
            Expr::Symbol(name) => self.visit_symbol(name),
            Expr::Variable(name) => self.visit_variable(name),
            Expr::State(index) => self.visit_state(*index),
            Expr::Binop { op, left, right } => self.visit_binop(*op, left, right),
            Expr::Monop { op, child } => self.visit_monop(*op, child),
            Expr::Call { fn_name, arg } => self.visit_call(fn_name, arg),
        }
    }
}
