use std::boxed::Box;

/// The independent time variable. It is bound by the generated solver
/// function itself, so it resolves without an equation or a declaration.
pub const TIME_VAR: &str = "t";

/// Expression tree for the right-hand side of an ODE definition.
///
/// Trees are built by the parser, owned by the symbol table and walked by
/// the backends. Every child is owned exclusively through `Box`: no sharing,
/// no cycles, so dropping a tree releases every node recursively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number(f64),

    /// A reference to a symbol defined by one of the equations of the
    /// system. The MATLAB backend rewrites these into [`Expr::State`].
    Symbol(String),

    /// A free variable or declared parameter, rendered verbatim and never
    /// substituted.
    Variable(String),

    /// A slot in the solver's state vector, 0-based. Produced only by the
    /// index-substitution rewrite and rendered 1-based as `y(i + 1)`.
    State(usize),

    /// `op` is one of `+ - * / ^`; anything else is reported as a bad
    /// operator at render time.
    Binop {
        op: char,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `op` is `-` (negation) or `|` (absolute value).
    Monop {
        op: char,
        child: Box<Expr>,
    },

    /// A built-in function applied to a single argument.
    Call {
        fn_name: String,
        arg: Box<Expr>,
    },
}
