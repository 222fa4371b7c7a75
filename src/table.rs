use std::collections::BTreeMap;

use crate::ast::Expr;
use crate::error::{Diagnostic, GenError};

/// A symbol defined by one of the equations of the system.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// 0-based position in the system, assigned at registration time in
    /// registration order and immutable afterwards. The MATLAB backend uses
    /// it 1-based for state-vector and plot-column accesses.
    pub index: usize,
    pub equation: Expr,
}

/// Registry of the equations of the system and the declared parameters.
///
/// One table is created per generation run, populated by the parser (one
/// registration per defined equation, one declaration per parameter), read
/// by validation and the backends, and torn down once the run completes or
/// fails.
///
/// Duplicate definitions are tolerated: the second entry is appended with
/// its own index, a diagnostic is recorded, and lookups by name keep
/// returning the first registration. The duplicate is never rendered.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    parameters: BTreeMap<String, f64>,
    diagnostics: Vec<Diagnostic>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new symbol with `index = len()`. A name registered twice
    /// records a [`Diagnostic::DuplicateSymbol`] but is still appended.
    pub fn register_symbol(&mut self, name: &str, equation: Expr) {
        if self.find_index(name).is_some() {
            self.diagnostics
                .push(Diagnostic::DuplicateSymbol(name.to_owned()));
        }
        let index = self.symbols.len();
        self.symbols.push(Symbol {
            name: name.to_owned(),
            index,
            equation,
        });
    }

    /// Index of a defined symbol, first match wins. Absence is a signal
    /// consumed by validation and name classification, not an error.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.symbols
            .iter()
            .find(|sym| sym.name == name)
            .map(|sym| sym.index)
    }

    /// First-registered symbol with the given name.
    pub fn get_symbol(&self, name: &str) -> Result<&Symbol, GenError> {
        self.symbols
            .iter()
            .find(|sym| sym.name == name)
            .ok_or_else(|| GenError::UndefinedSymbol(name.to_owned()))
    }

    /// All symbols in definition order (equal to index order).
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of equations in the system.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Declares a parameter with the default value 1.0. Idempotent: a
    /// parameter declared twice keeps its current value.
    pub fn declare_parameter(&mut self, name: &str) {
        self.parameters.entry(name.to_owned()).or_insert(1.0);
    }

    pub fn set_parameter(&mut self, name: &str, value: f64) {
        self.parameters.insert(name.to_owned(), value);
    }

    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    pub fn is_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Drains the diagnostics recorded during registration.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Releases every owned equation tree and clears both registries, so a
    /// subsequent registration starts indexing from 0 again. Safe to call on
    /// an already empty table.
    pub fn teardown(&mut self) {
        self.symbols.clear();
        self.parameters.clear();
        self.diagnostics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SymbolTable;
    use crate::ast::Expr;
    use crate::error::Diagnostic;

    #[test]
    fn indices_follow_registration_order() {
        let mut table = SymbolTable::new();
        table.register_symbol("a", Expr::Number(1.0));
        table.register_symbol("b", Expr::Number(2.0));
        table.register_symbol("c", Expr::Number(3.0));
        assert_eq!(table.len(), 3);
        assert_eq!(table.find_index("a"), Some(0));
        assert_eq!(table.find_index("b"), Some(1));
        assert_eq!(table.find_index("c"), Some(2));
        assert_eq!(table.find_index("d"), None);
    }

    #[test]
    fn duplicate_registration_keeps_first_match() {
        let mut table = SymbolTable::new();
        table.register_symbol("a", Expr::Number(1.0));
        table.register_symbol("a", Expr::Number(2.0));
        // both entries are retained, lookups return the first
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_index("a"), Some(0));
        assert_eq!(table.get_symbol("a").unwrap().equation, Expr::Number(1.0));
        assert_eq!(
            table.take_diagnostics(),
            vec![Diagnostic::DuplicateSymbol("a".to_owned())]
        );
    }

    #[test]
    fn get_symbol_fails_on_unknown_name() {
        let table = SymbolTable::new();
        assert!(table.get_symbol("missing").is_err());
    }

    #[test]
    fn parameters_default_to_one() {
        let mut table = SymbolTable::new();
        table.declare_parameter("k");
        assert!(table.is_parameter("k"));
        assert_eq!(table.parameter("k"), Some(1.0));

        table.set_parameter("k", 0.5);
        assert_eq!(table.parameter("k"), Some(0.5));

        // re-declaring keeps the explicit value
        table.declare_parameter("k");
        assert_eq!(table.parameter("k"), Some(0.5));

        assert!(!table.is_parameter("r"));
        assert_eq!(table.parameter("r"), None);
    }

    #[test]
    fn teardown_resets_everything() {
        let mut table = SymbolTable::new();
        table.register_symbol("a", Expr::Number(1.0));
        table.register_symbol("a", Expr::Number(2.0));
        table.declare_parameter("k");
        table.teardown();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(!table.is_parameter("k"));
        assert!(table.take_diagnostics().is_empty());

        // indexing restarts from 0
        table.register_symbol("b", Expr::Number(3.0));
        assert_eq!(table.find_index("b"), Some(0));

        // teardown of an empty table is a no-op
        table.teardown();
        table.teardown();
        assert!(table.is_empty());
    }
}
