//! Closed-form expressions of a single variable `x`.
//!
//! The grammar is deliberately small: numeric literals, the variable `x`,
//! the constants `pi` and `e`, the binary operators `+ - * / ^`, unary sign,
//! parentheses and a handful of elementary functions. `^` binds tighter than
//! unary minus and is right associative, so `-x^2` is `-(x^2)`.

use psd_core::errors::{ErrorInfo, PsdError};

fn expr_error(code: &str, source: &str, message: impl Into<String>) -> PsdError {
    PsdError::Parse(ErrorInfo::new(code, message).with_context("source", source))
}

/// Binary operators supported by [`Expr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Pow,
}

/// Elementary functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Natural exponential.
    Exp,
    /// Natural logarithm (`ln` or `log`).
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "exp" => Some(Func::Exp),
            "ln" | "log" => Some(Func::Ln),
            "log10" => Some(Func::Log10),
            "sqrt" => Some(Func::Sqrt),
            "abs" => Some(Func::Abs),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            _ => None,
        }
    }

    fn apply(self, value: f64) -> f64 {
        match self {
            Func::Exp => value.exp(),
            Func::Ln => value.ln(),
            Func::Log10 => value.log10(),
            Func::Sqrt => value.sqrt(),
            Func::Abs => value.abs(),
            Func::Sin => value.sin(),
            Func::Cos => value.cos(),
            Func::Tan => value.tan(),
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or named constant.
    Const(f64),
    /// The free variable `x`.
    Var,
    /// Unary negation.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Elementary function call.
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Parses `source` into an expression tree.
    pub fn parse(source: &str) -> Result<Self, PsdError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
        };
        let expr = parser.expression()?;
        if let Some(token) = parser.peek() {
            return Err(expr_error(
                "expr-trailing",
                source,
                format!("unexpected trailing token {token:?}"),
            ));
        }
        Ok(expr)
    }

    /// Evaluates the expression at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Const(value) => *value,
            Expr::Var => x,
            Expr::Neg(inner) => -inner.eval(x),
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(x), rhs.eval(x));
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => a.powf(b),
                }
            }
            Expr::Call(func, arg) => func.apply(arg.eval(x)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    Open,
    Close,
}

fn tokenize(source: &str) -> Result<Vec<Token>, PsdError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        if ch.is_whitespace() {
            idx += 1;
        } else if ch.is_ascii_digit() || ch == '.' {
            let start = idx;
            while idx < chars.len() && (chars[idx].is_ascii_digit() || chars[idx] == '.') {
                idx += 1;
            }
            // Exponent suffix only when a digit follows, so `2*e` keeps the constant.
            if idx < chars.len() && (chars[idx] == 'e' || chars[idx] == 'E') {
                let mut probe = idx + 1;
                if probe < chars.len() && (chars[probe] == '+' || chars[probe] == '-') {
                    probe += 1;
                }
                if probe < chars.len() && chars[probe].is_ascii_digit() {
                    idx = probe;
                    while idx < chars.len() && chars[idx].is_ascii_digit() {
                        idx += 1;
                    }
                }
            }
            let text: String = chars[start..idx].iter().collect();
            let value = text.parse::<f64>().map_err(|_| {
                expr_error("expr-number", source, format!("invalid number literal {text}"))
            })?;
            tokens.push(Token::Number(value));
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            let start = idx;
            while idx < chars.len() && (chars[idx].is_ascii_alphanumeric() || chars[idx] == '_') {
                idx += 1;
            }
            tokens.push(Token::Ident(chars[start..idx].iter().collect()));
        } else {
            let token = match ch {
                '+' | '-' | '*' | '/' | '^' => Token::Op(ch),
                '(' => Token::Open,
                ')' => Token::Close,
                other => {
                    return Err(expr_error(
                        "expr-char",
                        source,
                        format!("unexpected character '{other}'"),
                    ))
                }
            };
            tokens.push(token);
            idx += 1;
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expression(&mut self) -> Result<Expr, PsdError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            let op = if op == '+' { BinOp::Add } else { BinOp::Sub };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, PsdError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/']) {
            let rhs = self.unary()?;
            let op = if op == '*' { BinOp::Mul } else { BinOp::Div };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, PsdError> {
        match self.eat_op(&['+', '-']) {
            Some('-') => Ok(Expr::Neg(Box::new(self.unary()?))),
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, PsdError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, PsdError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Expr::Const(value)),
            Some(Token::Open) => {
                let inner = self.expression()?;
                self.expect_close()?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Var),
                "pi" => Ok(Expr::Const(std::f64::consts::PI)),
                "e" => Ok(Expr::Const(std::f64::consts::E)),
                _ => {
                    let func = Func::from_name(&name).ok_or_else(|| {
                        expr_error(
                            "expr-ident",
                            self.source,
                            format!("unknown identifier '{name}'"),
                        )
                    })?;
                    match self.next() {
                        Some(Token::Open) => {}
                        _ => {
                            return Err(expr_error(
                                "expr-call",
                                self.source,
                                format!("function '{name}' requires parentheses"),
                            ))
                        }
                    }
                    let arg = self.expression()?;
                    self.expect_close()?;
                    Ok(Expr::Call(func, Box::new(arg)))
                }
            },
            Some(token) => Err(expr_error(
                "expr-token",
                self.source,
                format!("unexpected token {token:?}"),
            )),
            None => Err(expr_error(
                "expr-eof",
                self.source,
                "unexpected end of expression",
            )),
        }
    }

    fn expect_close(&mut self) -> Result<(), PsdError> {
        match self.next() {
            Some(Token::Close) => Ok(()),
            _ => Err(expr_error("expr-paren", self.source, "missing ')'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str, x: f64) -> f64 {
        Expr::parse(source).expect("parse").eval(x)
    }

    #[test]
    fn precedence_follows_arithmetic() {
        assert_eq!(eval("1+2*3", 0.0), 7.0);
        assert_eq!(eval("(1+2)*3", 0.0), 9.0);
        assert_eq!(eval("2^3^2", 0.0), 512.0);
        assert_eq!(eval("-x^2", 3.0), -9.0);
        assert_eq!(eval("2^-1", 0.0), 0.5);
        assert_eq!(eval("8/4/2", 0.0), 1.0);
    }

    #[test]
    fn exponent_literals_and_constants() {
        assert_eq!(eval("2.5e-1*x", 4.0), 1.0);
        assert_eq!(eval("2*e", 0.0), 2.0 * std::f64::consts::E);
        assert!((eval("sqrt(2*pi)", 0.0) - (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-15);
        assert!((eval("ln(exp(x))", 1.5) - 1.5).abs() < 1e-15);
    }

    #[test]
    fn rejects_malformed_sources() {
        assert!(Expr::parse("").is_err());
        assert!(Expr::parse("1+").is_err());
        assert!(Expr::parse("exp x").is_err());
        assert!(Expr::parse("foo(x)").is_err());
        assert!(Expr::parse("(x").is_err());
        assert!(Expr::parse("x)").is_err());
        assert!(Expr::parse("x # 2").is_err());
    }
}
