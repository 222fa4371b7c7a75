use crate::ast::{Expr, TIME_VAR};
use crate::error::GenError;
use crate::table::SymbolTable;

/// Checks that every name referenced by any equation resolves to a defined
/// symbol, a declared parameter or the time variable. The walk is
/// depth-first, left-to-right, over the equations in index order, and fails
/// fast on the first unresolved name: generation must not proceed on a
/// system with dangling references.
pub fn validate(table: &SymbolTable) -> Result<(), GenError> {
    for sym in table.symbols() {
        check(&sym.equation, table)?;
    }
    Ok(())
}

fn check(expr: &Expr, table: &SymbolTable) -> Result<(), GenError> {
    match expr {
        Expr::Number(_) | Expr::State(_) => Ok(()),
        Expr::Symbol(name) | Expr::Variable(name) => {
            if name == TIME_VAR || table.find_index(name).is_some() || table.is_parameter(name) {
                Ok(())
            } else {
                Err(GenError::UndefinedSymbol(name.clone()))
            }
        }
        Expr::Binop { left, right, .. } => {
            check(left, table)?;
            check(right, table)
        }
        Expr::Monop { child, .. } => check(child, table),
        Expr::Call { arg, .. } => check(arg, table),
    }
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::error::GenError;
    use crate::parser::parse_string;
    use crate::table::SymbolTable;

    fn table_from(text: &str) -> SymbolTable {
        let mut table = SymbolTable::new();
        parse_string(text, &mut table).unwrap();
        table
    }

    #[test]
    fn all_references_defined() {
        let table = table_from(
            "
            param k = 2
            dot(a) = a + 2
            dot(b) = a * b - k
            ",
        );
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn undefined_symbol_fails() {
        let table = table_from("dot(a) = a * b");
        match validate(&table) {
            Err(GenError::UndefinedSymbol(name)) => assert_eq!(name, "b"),
            other => panic!("expected undefined symbol, got {:?}", other),
        }
    }

    #[test]
    fn failure_is_position_independent() {
        // the dangling name sits deep inside a call argument
        let table = table_from("dot(a) = sin(a / (missing + 1))");
        match validate(&table) {
            Err(GenError::UndefinedSymbol(name)) => assert_eq!(name, "missing"),
            other => panic!("expected undefined symbol, got {:?}", other),
        }
    }

    #[test]
    fn first_unresolved_name_wins() {
        // depth-first and left-to-right: u is reported, not v
        let table = table_from("dot(a) = u + v");
        match validate(&table) {
            Err(GenError::UndefinedSymbol(name)) => assert_eq!(name, "u"),
            other => panic!("expected undefined symbol, got {:?}", other),
        }
    }

    #[test]
    fn time_variable_is_always_resolved() {
        let table = table_from("dot(a) = sin(t) - a");
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn parameter_must_be_declared() {
        let undeclared = table_from("dot(a) = k * a");
        assert!(validate(&undeclared).is_err());

        let declared = table_from(
            "
            param k
            dot(a) = k * a
            ",
        );
        assert!(validate(&declared).is_ok());
    }
}
