//! Statement parsing implementation
//!
//! This module handles parsing of all MiniC statement types:
//!
//! - Variable declarations: `int x, y = 42;`
//! - Control flow: `if`, `while`, `for`
//! - `return`
//! - Print primitives: `println_int(e);`, `println_float(e);`, `println_bool(e);`
//! - Compound statements: `{ ... }`
//! - Expression statements: assignments
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | if_stmt | while_stmt | for_stmt
//!             | return_stmt | print_stmt | block | expr_stmt
//! ```

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            return self.parse_return_statement();
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        if self.match_token(&Token::For(loc)) {
            return self.parse_for_statement();
        }

        if let Some(kind) = self.print_kind() {
            self.advance();
            return self.parse_print_statement(kind);
        }

        if self.match_token(&Token::LBrace(loc)) {
            let statements = self.parse_block_statements()?;
            self.expect_rbrace("after block")?;
            return Ok(Stmt::Block {
                statements,
                location: loc,
            });
        }

        if self.is_type_keyword() {
            return self.parse_variable_declaration();
        }

        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(Stmt::Expression {
            expr,
            location: loc,
        })
    }

    fn print_kind(&self) -> Option<PrintKind> {
        match self.peek() {
            Token::PrintlnInt(_) => Some(PrintKind::Int),
            Token::PrintlnFloat(_) => Some(PrintKind::Float),
            Token::PrintlnBool(_) => Some(PrintKind::Bool),
            _ => None,
        }
    }

    /// Parse `println_*(expr);` after the keyword
    fn parse_print_statement(&mut self, kind: PrintKind) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();
        let ctx = format!("after '{}'", kind.builtin_name());

        self.expect_lparen(&ctx)?;
        let arg = self.parse_expression()?;
        self.expect_rparen("after print argument")?;
        self.expect_semicolon("after print statement")?;

        Ok(Stmt::Print {
            kind,
            arg,
            location: loc,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        let expr = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_semicolon("after return")?;

        Ok(Stmt::Return {
            expr,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_statement_or_block()?;

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(self.parse_statement_or_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_statement_or_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'for'")?;

        let init = if self.match_token(&Token::Semicolon(self.current_location())) {
            None
        } else if self.is_type_keyword() {
            // The declaration consumes its own semicolon
            Some(Box::new(self.parse_variable_declaration()?))
        } else {
            let init_loc = self.current_location();
            let expr = self.parse_expression()?;
            self.expect_semicolon("after for init")?;
            Some(Box::new(Stmt::Expression {
                expr,
                location: init_loc,
            }))
        };

        let condition = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon("after for condition")?;

        let update = if self.check(&Token::RParen(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_rparen("after for clauses")?;

        let body = self.parse_statement_or_block()?;

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location: loc,
        })
    }

    /// Parse variable declaration: type name [= init] {, name [= init]} ;
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        let var_type = self.parse_type()?;
        if var_type == BaseType::Void {
            return Err(ParseError {
                message: "Variables cannot be declared 'void'".to_string(),
                location,
            });
        }

        let mut declarators = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let name_loc = self.previous_location();
            let init = if self.match_token(&Token::Eq(self.current_location())) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            declarators.push(Declarator {
                name,
                init,
                location: name_loc,
            });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        self.expect_semicolon("after variable declaration")?;

        Ok(Stmt::VarDecl {
            var_type,
            declarators,
            location,
        })
    }

    /// Parse statement or block (for if/while/for bodies)
    pub(crate) fn parse_statement_or_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.match_token(&Token::LBrace(self.current_location())) {
            let statements = self.parse_block_statements()?;
            self.expect_rbrace("after block")?;
            Ok(statements)
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }
}
