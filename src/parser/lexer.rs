//! Lexer (tokenizer) for MiniC source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! `#include "printlib.h"` and other preprocessor lines are skipped rather than
//! parsed; the print primitives are keywords of the language.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    FloatLiteral(f64, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Int(SourceLocation),
    Float(SourceLocation),
    Bool(SourceLocation),
    Void(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    For(SourceLocation),
    Return(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    PrintlnInt(SourceLocation),
    PrintlnFloat(SourceLocation),
    PrintlnBool(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::FloatLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Float(loc)
            | Token::Bool(loc)
            | Token::Void(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::For(loc)
            | Token::Return(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::PrintlnInt(loc)
            | Token::PrintlnFloat(loc)
            | Token::PrintlnBool(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::FloatLiteral(x, _) => write!(f, "float literal {}", x),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Float(_) => write!(f, "'float'"),
            Token::Bool(_) => write!(f, "'bool'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::True(_) => write!(f, "'true'"),
            Token::False(_) => write!(f, "'false'"),
            Token::PrintlnInt(_) => write!(f, "'println_int'"),
            Token::PrintlnFloat(_) => write!(f, "'println_float'"),
            Token::PrintlnBool(_) => write!(f, "'println_bool'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, thiserror::Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for MiniC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '0'..='9' => self.number_literal(ch, loc),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.number_literal(ch, loc)
            }

            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '%' => Ok(Token::Percent(loc)),
            '=' => Ok(self.one_or_two('=', Token::EqEq(loc), Token::Eq(loc))),
            '!' => Ok(self.one_or_two('=', Token::NotEq(loc), Token::Bang(loc))),
            '<' => Ok(self.one_or_two('=', Token::Le(loc), Token::Lt(loc))),
            '>' => Ok(self.one_or_two('=', Token::Ge(loc), Token::Gt(loc))),
            '&' if self.peek() == Some('&') => {
                self.advance();
                Ok(Token::AndAnd(loc))
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                Ok(Token::OrOr(loc))
            }
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Consume `second` if it follows, choosing between a two- and one-character token
    fn one_or_two(&mut self, second: char, two: Token, one: Token) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            two
        } else {
            one
        }
    }

    /// Parse numeric literal: `123`, `1.5`, `1.` or `.5`
    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first);
        let mut is_float = first == '.';

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            let value = text.parse::<f64>().map_err(|_| LexError {
                message: format!("Invalid float literal: {}", text),
                location: loc,
            })?;
            Ok(Token::FloatLiteral(value, loc))
        } else {
            let value = text.parse::<i64>().map_err(|_| LexError {
                message: format!("Invalid integer literal: {}", text),
                location: loc,
            })?;
            Ok(Token::IntLiteral(value, loc))
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "int" => Token::Int(loc),
            "float" => Token::Float(loc),
            "bool" => Token::Bool(loc),
            "void" => Token::Void(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "for" => Token::For(loc),
            "return" => Token::Return(loc),
            "true" => Token::True(loc),
            "false" => Token::False(loc),
            "println_int" => Token::PrintlnInt(loc),
            "println_float" => Token::PrintlnFloat(loc),
            "println_bool" => Token::PrintlnBool(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Skip preprocessor directive (#include, etc.)
    fn skip_preprocessor_directive(&mut self) {
        self.skip_line_comment();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "main"));
        assert!(matches!(tokens[2], Token::LParen(_)));
        assert!(matches!(tokens[3], Token::RParen(_)));
        assert!(matches!(tokens[4], Token::LBrace(_)));
        assert!(matches!(tokens[5], Token::Return(_)));
        assert!(matches!(tokens[6], Token::IntLiteral(0, _)));
        assert!(matches!(tokens[7], Token::Semicolon(_)));
        assert!(matches!(tokens[8], Token::RBrace(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
    }

    #[test]
    fn test_operators() {
        let mut lexer = Lexer::new("== != <= >= && || ! = < >");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::Le(_)));
        assert!(matches!(tokens[3], Token::Ge(_)));
        assert!(matches!(tokens[4], Token::AndAnd(_)));
        assert!(matches!(tokens[5], Token::OrOr(_)));
        assert!(matches!(tokens[6], Token::Bang(_)));
        assert!(matches!(tokens[7], Token::Eq(_)));
        assert!(matches!(tokens[8], Token::Lt(_)));
        assert!(matches!(tokens[9], Token::Gt(_)));
    }

    #[test]
    fn test_number_literals() {
        let mut lexer = Lexer::new("42 1.15 1. .5");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0], Token::IntLiteral(42, SourceLocation::new(1, 1)));
        assert!(matches!(tokens[1], Token::FloatLiteral(x, _) if x == 1.15));
        assert!(matches!(tokens[2], Token::FloatLiteral(x, _) if x == 1.0));
        assert!(matches!(tokens[3], Token::FloatLiteral(x, _) if x == 0.5));
    }

    #[test]
    fn test_keywords() {
        let mut lexer = Lexer::new("println_int println_float println_bool true false bool");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::PrintlnInt(_)));
        assert!(matches!(tokens[1], Token::PrintlnFloat(_)));
        assert!(matches!(tokens[2], Token::PrintlnBool(_)));
        assert!(matches!(tokens[3], Token::True(_)));
        assert!(matches!(tokens[4], Token::False(_)));
        assert!(matches!(tokens[5], Token::Bool(_)));
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Semicolon(_)));
        assert!(matches!(tokens[3], Token::Int(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "y"));
        assert!(matches!(tokens[5], Token::Semicolon(_)));
        assert!(matches!(tokens[6], Token::Int(_)));
        assert!(matches!(tokens[7], Token::Ident(ref s, _) if s == "z"));
    }

    #[test]
    fn test_preprocessor_skip() {
        let mut lexer = Lexer::new("#include \"printlib.h\"\nint x;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert_eq!(tokens[0].location(), SourceLocation::new(2, 1));
    }

    #[test]
    fn test_single_ampersand_is_rejected() {
        let mut lexer = Lexer::new("a & b");
        let err = lexer.tokenize().unwrap_err();

        assert_eq!(err.location, SourceLocation::new(1, 3));
        assert!(err.message.contains("'&'"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut lexer = Lexer::new("int x; /* never closed");
        assert!(lexer.tokenize().is_err());
    }
}
