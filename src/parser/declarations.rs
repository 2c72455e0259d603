//! Declaration parsing implementation
//!
//! Top-level MiniC programs are a sequence of parameterless function
//! definitions; this module also parses the scalar type keywords shared with
//! local variable declarations.
//!
//! # Grammar
//!
//! ```text
//! function_def ::= type identifier "(" ")" "{" statements "}"
//! type         ::= "int" | "float" | "bool" | "void"
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition: type name() { body }
    pub(crate) fn parse_function_definition(&mut self) -> Result<FunctionDef, ParseError> {
        let return_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        let location = self.previous_location();

        self.expect_lparen("after function name")?;
        if !self.check(&Token::RParen(self.current_location())) {
            return Err(self.error_here(format!(
                "Function '{}' must not take parameters, found {}",
                name,
                self.peek()
            )));
        }
        self.expect_rparen("after '('")?;
        self.expect_lbrace("before function body")?;

        let body = self.parse_block_statements()?;

        self.expect_rbrace("after function body")?;

        Ok(FunctionDef {
            name,
            return_type,
            body,
            location,
        })
    }

    /// Parse a type keyword
    pub(crate) fn parse_type(&mut self) -> Result<BaseType, ParseError> {
        let base = match self.peek() {
            Token::Int(_) => BaseType::Int,
            Token::Float(_) => BaseType::Float,
            Token::Bool(_) => BaseType::Bool,
            Token::Void(_) => BaseType::Void,
            other => {
                return Err(self.error_here(format!("Expected type, found {}", other)));
            }
        };
        self.advance();
        Ok(base)
    }
}
