//! Evaluation of canonical boolean expressions.
//!
//! The evaluator tokenizes an expression once and can then be run over
//! many variable assignments, which is exactly what the truth-table
//! generator needs: one parse, `2^n` evaluations.
//!
//! Precedence, loosest to tightest: OR, NOR, NAND, XOR, AND, prefix NOT,
//! brackets. The normalizer wraps every XOR/NAND/NOR operand pair in
//! explicit brackets, so the relative order of those three is never
//! observable in canonical text; it exists so the evaluator is total
//! over the grammar.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::normalize::{tokenize, Token};

/// A reusable evaluator for one expression.
pub struct Evaluator {
    tokens: Vec<Token>,
}

impl Evaluator {
    /// Tokenizes the expression. Accepts canonical text; input aliases
    /// still tokenize, so callers substituting literals by hand keep
    /// working.
    pub fn new(expression: &str) -> Result<Self> {
        let tokens = tokenize(expression).map_err(|e| match e {
            Error::Syntax { message } => Error::Evaluation { message },
            other => other,
        })?;
        if tokens.is_empty() {
            return Err(Error::evaluation("empty expression"));
        }
        Ok(Self { tokens })
    }

    /// Evaluates the expression under the given assignment.
    ///
    /// Fails with [`Error::UndeclaredVariable`] when the expression names
    /// a variable missing from `env`, and [`Error::Evaluation`] when the
    /// residual expression is malformed.
    pub fn evaluate(&self, env: &HashMap<String, bool>) -> Result<bool> {
        let mut parser = Parser {
            tokens: &self.tokens,
            pos: 0,
            env,
        };
        let value = parser.or_expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(Error::evaluation("trailing tokens after expression"));
        }
        Ok(value)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    env: &'a HashMap<String, bool>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or_expr(&mut self) -> Result<bool> {
        let mut value = self.nor_expr()?;
        while self.eat(&Token::Or) {
            let rhs = self.nor_expr()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn nor_expr(&mut self) -> Result<bool> {
        let mut value = self.nand_expr()?;
        while self.eat(&Token::Nor) {
            let rhs = self.nand_expr()?;
            value = !(value || rhs);
        }
        Ok(value)
    }

    fn nand_expr(&mut self) -> Result<bool> {
        let mut value = self.xor_expr()?;
        while self.eat(&Token::Nand) {
            let rhs = self.xor_expr()?;
            value = !(value && rhs);
        }
        Ok(value)
    }

    fn xor_expr(&mut self) -> Result<bool> {
        let mut value = self.and_expr()?;
        while self.eat(&Token::Xor) {
            let rhs = self.and_expr()?;
            value = value != rhs;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> Result<bool> {
        let mut value = self.factor()?;
        while self.eat(&Token::And) {
            let rhs = self.factor()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<bool> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(Error::evaluation("expression ends mid-term")),
        };
        self.pos += 1;
        match token {
            Token::Not => Ok(!self.factor()?),
            Token::Open => {
                let value = self.or_expr()?;
                if !self.eat(&Token::Close) {
                    return Err(Error::evaluation("missing closing bracket"));
                }
                Ok(value)
            }
            Token::Const(value) => Ok(value),
            Token::Ident(name) => match self.env.get(&name) {
                Some(value) => Ok(*value),
                None => Err(Error::UndeclaredVariable { name }),
            },
            other => Err(Error::evaluation(format!(
                "unexpected `{:?}` in expression",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str, pairs: &[(&str, bool)]) -> Result<bool> {
        let env: HashMap<String, bool> =
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Evaluator::new(expr)?.evaluate(&env)
    }

    #[test]
    fn test_basic_operators() {
        assert!(eval("a+b", &[("a", false), ("b", true)]).unwrap());
        assert!(!eval("a*b", &[("a", false), ("b", true)]).unwrap());
        assert!(eval("~a", &[("a", false)]).unwrap());
        assert!(eval("(a%b)", &[("a", true), ("b", false)]).unwrap());
        assert!(!eval("(a%b)", &[("a", true), ("b", true)]).unwrap());
    }

    #[test]
    fn test_nand_nor() {
        assert!(eval("(a|b)", &[("a", true), ("b", false)]).unwrap());
        assert!(!eval("(a|b)", &[("a", true), ("b", true)]).unwrap());
        assert!(eval("(a-b)", &[("a", false), ("b", false)]).unwrap());
        assert!(!eval("(a-b)", &[("a", true), ("b", false)]).unwrap());
    }

    #[test]
    fn test_precedence() {
        // AND binds tighter than OR.
        assert!(eval("a+b*c", &[("a", true), ("b", false), ("c", false)]).unwrap());
        assert!(!eval("(a+b)*c", &[("a", true), ("b", false), ("c", false)]).unwrap());
        // NOT binds tightest.
        assert!(eval("~a*b", &[("a", false), ("b", true)]).unwrap());
    }

    #[test]
    fn test_constants() {
        assert!(eval("1", &[]).unwrap());
        assert!(!eval("0", &[]).unwrap());
        assert!(eval("~0", &[]).unwrap());
        assert!(eval("a+1", &[("a", false)]).unwrap());
    }

    #[test]
    fn test_undeclared_variable() {
        assert!(matches!(
            eval("a+b", &[("a", true)]),
            Err(Error::UndeclaredVariable { .. })
        ));
    }

    #[test]
    fn test_malformed_residual() {
        assert!(matches!(eval("a+", &[("a", true)]), Err(Error::Evaluation { .. })));
        assert!(matches!(eval("(a", &[("a", true)]), Err(Error::Evaluation { .. })));
        assert!(matches!(
            eval("a)b", &[("a", true), ("b", true)]),
            Err(Error::Evaluation { .. })
        ));
    }
}
