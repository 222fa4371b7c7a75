use std::fmt;
use std::io;

/// Fatal generation failure. An unresolved name is the only domain error
/// that crosses the crate boundary; every non-fatal condition travels on the
/// [`Diagnostic`] channel instead.
#[derive(Debug)]
pub enum GenError {
    UndefinedSymbol(String),
    Io(io::Error),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::UndefinedSymbol(name) => write!(f, "undefined symbol: {}", name),
            GenError::Io(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io(err) => Some(err),
            GenError::UndefinedSymbol(_) => None,
        }
    }
}

impl From<io::Error> for GenError {
    fn from(err: io::Error) -> Self {
        GenError::Io(err)
    }
}

/// Non-fatal conditions reported alongside the generated output. These never
/// abort a run: a duplicate definition keeps the first registration, and a
/// node with an unrecognized operator renders nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    DuplicateSymbol(String),
    BadOperator(char),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateSymbol(name) => write!(f, "symbol defined twice: {}", name),
            Diagnostic::BadOperator(op) => write!(f, "bad operator: {}", op),
        }
    }
}
