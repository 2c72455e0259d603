//! Expression parsing implementation
//!
//! One method per C precedence level, lowest first:
//!
//! ```text
//! assignment  ::= identifier "=" assignment | logical_or
//! logical_or  ::= logical_and ("||" logical_and)*
//! logical_and ::= equality ("&&" equality)*
//! equality    ::= relational (("==" | "!=") relational)*
//! relational  ::= additive (("<" | "<=" | ">" | ">=") additive)*
//! additive    ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= unary (("*" | "/" | "%") unary)*
//! unary       ::= ("-" | "!") unary | primary
//! primary     ::= int | float | "true" | "false" | identifier | "(" expression ")"
//! ```
//!
//! Binary levels are left-associative; assignment is right-associative.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment or logical-or (right-associative)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_logical_or()?;

        let loc = self.current_location();
        if self.match_token(&Token::Eq(loc)) {
            let value = Box::new(self.parse_assignment()?);
            return match expr {
                Expr::Variable(name, _) => Ok(Expr::Assignment {
                    name,
                    value,
                    location: loc,
                }),
                _ => Err(ParseError {
                    message: "Left-hand side of assignment must be a variable".to_string(),
                    location: loc,
                }),
            };
        }

        Ok(expr)
    }

    /// Shared loop for one left-associative binary precedence level
    fn parse_binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        operator: fn(&Token) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = operator(self.peek()) {
            let loc = self.current_location();
            self.advance();
            let right = operand(self)?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_logical_and, |t| match t {
            Token::OrOr(_) => Some(BinOp::Or),
            _ => None,
        })
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, |t| match t {
            Token::AndAnd(_) => Some(BinOp::And),
            _ => None,
        })
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_relational, |t| match t {
            Token::EqEq(_) => Some(BinOp::Eq),
            Token::NotEq(_) => Some(BinOp::Ne),
            _ => None,
        })
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, |t| match t {
            Token::Lt(_) => Some(BinOp::Lt),
            Token::Le(_) => Some(BinOp::Le),
            Token::Gt(_) => Some(BinOp::Gt),
            Token::Ge(_) => Some(BinOp::Ge),
            _ => None,
        })
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, |t| match t {
            Token::Plus(_) => Some(BinOp::Add),
            Token::Minus(_) => Some(BinOp::Sub),
            _ => None,
        })
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, |t| match t {
            Token::Star(_) => Some(BinOp::Mul),
            Token::Slash(_) => Some(BinOp::Div),
            Token::Percent(_) => Some(BinOp::Mod),
            _ => None,
        })
    }

    /// Parse unary (- !)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let op = match self.peek() {
            Token::Minus(_) => Some(UnOp::Neg),
            Token::Bang(_) => Some(UnOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::UnaryOp {
                op,
                operand,
                location: loc,
            });
        }

        self.parse_primary()
    }

    /// Parse primary (literals, variables, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let expr = match self.peek() {
            Token::IntLiteral(n, _) => Expr::IntLiteral(*n, loc),
            Token::FloatLiteral(x, _) => Expr::FloatLiteral(*x, loc),
            Token::True(_) => Expr::BoolLiteral(true, loc),
            Token::False(_) => Expr::BoolLiteral(false, loc),
            Token::Ident(name, _) => Expr::Variable(name.clone(), loc),
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                return Ok(expr);
            }
            other => {
                return Err(ParseError {
                    message: format!("Unexpected token: {}", other),
                    location: loc,
                });
            }
        };

        self.advance();
        Ok(expr)
    }
}
