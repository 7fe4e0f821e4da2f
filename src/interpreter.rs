//! Tree-walking interpreter for the Yatay scripting language (`spec.md`
//! §4.3).
//!
//! Walks a statement sequence in order against a single `Environment`. A
//! runtime error aborts the remaining statements of the program; it is
//! reported once into the `Diagnostics` sink and the interpreter stops
//! cleanly (no panic, no partial re-entry).

use crate::ast::{Expr, Stmt};
use crate::diagnostics::Diagnostics;
use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::token::TokenKind;
use crate::value::Value;
use std::io::Write;

/// Evaluates statements against a single lexical environment, optionally
/// emitting the `Expresión [ … ] evaluada como [ … ].` trace line for every
/// expression statement (`spec.md` §9: the current default behavior, kept
/// as a configurable switch rather than hard-wired).
pub struct Interpreter<W: Write> {
    environment: Environment,
    output: W,
    trace_expressions: bool,
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W, trace_expressions: bool) -> Self {
        Self {
            environment: Environment::new(),
            output,
            trace_expressions,
        }
    }

    /// Runs the program against this interpreter's environment. Any
    /// runtime error halts execution immediately and is reported into
    /// `diagnostics`; the caller should check `diagnostics.had_runtime_error()`
    /// afterwards.
    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            if let Err(err) = self.execute(statement) {
                diagnostics.runtime_error(err.line, &err.message);
                return;
            }
        }
    }

    fn execute(&mut self, statement: &Stmt) -> Result<()> {
        match statement {
            Stmt::ExpressionStatement(expr) => {
                let value = self.evaluate(expr)?;
                if self.trace_expressions {
                    let _ = writeln!(
                        self.output,
                        "Expresión [ {} ] evaluada como [ {} ].",
                        pretty_print(expr),
                        value
                    );
                }
                Ok(())
            }
            Stmt::VariableDeclaration { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Absent,
                };
                self.environment.define(&name.lexeme, value, name.line)
            }
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::VariableAccess(name) => self.environment.get(&name.lexeme, name.line),
            Expr::Unary { operator, operand } => self.evaluate_unary(operator, operand),
            Expr::Binary { left, operator, right } => self.evaluate_binary(left, operator, right),
        }
    }

    fn evaluate_unary(&mut self, operator: &crate::token::Token, operand: &Expr) -> Result<Value> {
        let value = self.evaluate(operand)?;
        match operator.kind {
            TokenKind::Minus => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::at(operator, "operand must be a number")),
            },
            TokenKind::KeywordNo => Ok(Value::Boolean(!value.is_truthy())),
            _ => unreachable!("unary operator token must be '-' or 'no'"),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr,
        operator: &crate::token::Token,
        right: &Expr,
    ) -> Result<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.kind {
            TokenKind::Equal => Ok(Value::Boolean(left == right)),
            TokenKind::Unequal => Ok(Value::Boolean(left != right)),

            TokenKind::Less | TokenKind::LessOrEqual | TokenKind::Greater | TokenKind::GreaterOrEqual => {
                let (l, r) = (
                    as_number(&left, operator)?,
                    as_number(&right, operator)?,
                );
                let result = match operator.kind {
                    TokenKind::Less => l < r,
                    TokenKind::LessOrEqual => l <= r,
                    TokenKind::Greater => l > r,
                    TokenKind::GreaterOrEqual => l >= r,
                    _ => unreachable!(),
                };
                Ok(Value::Boolean(result))
            }

            TokenKind::Plus => match (left, right) {
                (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
                (Value::Text(l), Value::Text(r)) => Ok(Value::Text(l + &r)),
                _ => Err(RuntimeError::at(
                    operator,
                    "operands must both be numbers or both be text",
                )),
            },

            TokenKind::Minus => {
                let (l, r) = (as_number(&left, operator)?, as_number(&right, operator)?);
                Ok(Value::Number(l - r))
            }
            TokenKind::Asterisk => {
                let (l, r) = (as_number(&left, operator)?, as_number(&right, operator)?);
                Ok(Value::Number(l * r))
            }
            TokenKind::Slash => {
                let (l, r) = (as_number(&left, operator)?, as_number(&right, operator)?);
                if r == 0.0 {
                    return Err(RuntimeError::at(operator, "divisor must be nonzero"));
                }
                Ok(Value::Number(l / r))
            }
            // Grammatically labeled as integer division, but its run-time
            // semantics is floating-point remainder (`spec.md` §9 open
            // question, resolved in favor of observable behavior).
            TokenKind::DoubleSlash => {
                let (l, r) = (as_number(&left, operator)?, as_number(&right, operator)?);
                Ok(Value::Number(l % r))
            }

            _ => unreachable!("binary operator token must be one of the grammar's operator kinds"),
        }
    }
}

fn as_number(value: &Value, operator: &crate::token::Token) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(RuntimeError::at(operator, "operands must be numbers")),
    }
}

/// Pretty-prints an expression for the trace line. This mirrors `Value`'s
/// `Display` for literals and otherwise renders the surface syntax the
/// expression was built from.
fn pretty_print(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => value.to_string(),
        Expr::Grouping(inner) => format!("({})", pretty_print(inner)),
        Expr::Unary { operator, operand } => {
            // The symbolic `-` binds directly to its operand ("-5"); the
            // keyword operator `no` needs a separating space ("no falso").
            let separator = if operator.kind == TokenKind::KeywordNo { " " } else { "" };
            format!("{}{}{}", operator.lexeme, separator, pretty_print(operand))
        }
        Expr::Binary { left, operator, right } => {
            format!("{} {} {}", pretty_print(left), operator.lexeme, pretty_print(right))
        }
        Expr::VariableAccess(name) => name.lexeme.clone(),
    }
}
