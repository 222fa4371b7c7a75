//! Parser for the textual ODE syntax. Parsing populates a [`SymbolTable`]
//! directly: one symbol registration per `dot(...)` equation and one
//! parameter declaration per `param` statement.

use pest::error::Error;
use pest::iterators::Pair;
use pest::Parser;
use std::boxed::Box;

use crate::ast::{Expr, TIME_VAR};
use crate::table::SymbolTable;

#[derive(Parser)]
#[grammar = "parser/ode_grammar.pest"] // relative to src
pub struct OdeParser;

//sign       = @{ "-" | "+" }
//term_op    = @{ "-" | "+" }
//factor_op  = @{ "*" | "/" }
fn parse_op(pair: Pair<Rule>) -> char {
    pair.as_str().chars().next().unwrap()
}

//name       = @{ ('a'..'z' | 'A'..'Z') ~ ("_" | 'a'..'z' | 'A'..'Z' | '0'..'9')* }
fn parse_name(pair: Pair<Rule>) -> &str {
    pair.as_str()
}

//value      = { sign? ~ real }
fn parse_param_value(pair: Pair<Rule>) -> f64 {
    let mut inner = pair.into_inner();
    let mut sign = 1.0;
    if inner.peek().unwrap().as_rule() == Rule::sign {
        if parse_op(inner.next().unwrap()) == '-' {
            sign = -1.0;
        }
    }
    sign * inner.next().unwrap().as_str().parse::<f64>().unwrap()
}

fn parse_expr(pair: Pair<Rule>, table: &SymbolTable) -> Expr {
    match pair.as_rule() {
        // a name is a variable when it cannot be defined by an equation:
        // the time variable or a previously declared parameter. everything
        // else is a symbol reference that validation must resolve.
        Rule::name => {
            let name = pair.as_str();
            if name == TIME_VAR || table.is_parameter(name) {
                Expr::Variable(name.to_owned())
            } else {
                Expr::Symbol(name.to_owned())
            }
        }

        //real       = @{ ('0'..'9')+ ~ ("." ~ ('0'..'9')+)? ~ (("e" | "E") ~ ("-" | "+")? ~ ('0'..'9')+)? }
        Rule::real => Expr::Number(pair.as_str().parse().unwrap()),

        //call       = { name ~ "(" ~ expression ~ ")" }
        Rule::call => {
            let mut inner = pair.into_inner();
            Expr::Call {
                fn_name: parse_name(inner.next().unwrap()).to_owned(),
                arg: Box::new(parse_expr(inner.next().unwrap(), table)),
            }
        }

        //absolute   = { "|" ~ expression ~ "|" }
        Rule::absolute => Expr::Monop {
            op: '|',
            child: Box::new(parse_expr(pair.into_inner().next().unwrap(), table)),
        },

        //expression = { sign? ~ term ~ (term_op ~ term)* }
        Rule::expression => {
            let mut inner = pair.into_inner();
            let sign = if inner.peek().unwrap().as_rule() == Rule::sign {
                Some(parse_op(inner.next().unwrap()))
            } else {
                None
            };
            // a leading "-" negates the first term only; a leading "+"
            // changes nothing
            let mut head = match sign {
                Some('-') => Expr::Monop {
                    op: '-',
                    child: Box::new(parse_expr(inner.next().unwrap(), table)),
                },
                _ => parse_expr(inner.next().unwrap(), table),
            };
            while inner.peek().is_some() {
                let op = parse_op(inner.next().unwrap());
                let rhs = parse_expr(inner.next().unwrap(), table);
                head = Expr::Binop {
                    op,
                    left: Box::new(head),
                    right: Box::new(rhs),
                };
            }
            head
        }

        //term       = { factor ~ (factor_op ~ factor)* }
        //factor     = { primary ~ (pow_op ~ primary)* }
        Rule::term | Rule::factor => {
            let mut inner = pair.into_inner();
            let mut head = parse_expr(inner.next().unwrap(), table);
            while inner.peek().is_some() {
                let op = parse_op(inner.next().unwrap());
                let rhs = parse_expr(inner.next().unwrap(), table);
                head = Expr::Binop {
                    op,
                    left: Box::new(head),
                    right: Box::new(rhs),
                };
            }
            head
        }

        //primary    = { call | absolute | name | real | "(" ~ expression ~ ")" }
        Rule::primary => parse_expr(pair.into_inner().next().unwrap(), table),

        _ => unreachable!("{:?}", pair.to_string()),
    }
}

/// Parses `text` and populates `table`. The table is left partially
/// populated on a syntax error; callers tear it down either way.
pub fn parse_string(text: &str, table: &mut SymbolTable) -> Result<(), Box<Error<Rule>>> {
    let main = OdeParser::parse(Rule::main, text)?.next().unwrap();
    for pair in main.into_inner().take_while(|p| p.as_rule() != Rule::EOI) {
        let stmt = pair.into_inner().next().unwrap();
        match stmt.as_rule() {
            //parameter  = { "param" ~ name ~ ("=" ~ value)? }
            Rule::parameter => {
                let mut inner = stmt.into_inner();
                let name = parse_name(inner.next().unwrap()).to_owned();
                table.declare_parameter(&name);
                if let Some(value) = inner.next() {
                    table.set_parameter(&name, parse_param_value(value));
                }
            }
            //equation   = { "dot" ~ "(" ~ name ~ ")" ~ "=" ~ expression }
            Rule::equation => {
                let mut inner = stmt.into_inner();
                let name = parse_name(inner.next().unwrap()).to_owned();
                let rhs = parse_expr(inner.next().unwrap(), table);
                table.register_symbol(&name, rhs);
            }
            _ => unreachable!("{:?}", stmt.to_string()),
        }
    }
    Ok(())
}
