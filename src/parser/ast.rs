// AST (Abstract Syntax Tree) definitions for MiniC

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Scalar types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Int,
    Float,
    Bool,
    Void, // Only valid as a function return type
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseType::Int => "int",
            BaseType::Float => "float",
            BaseType::Bool => "bool",
            BaseType::Void => "void",
        };
        f.write_str(name)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// The three output primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintKind {
    Int,
    Float,
    Bool,
}

impl PrintKind {
    /// Name of the primitive as written in source
    pub fn builtin_name(&self) -> &'static str {
        match self {
            PrintKind::Int => "println_int",
            PrintKind::Float => "println_float",
            PrintKind::Bool => "println_bool",
        }
    }

    /// Declared parameter type of the primitive
    pub fn param_type(&self) -> BaseType {
        match self {
            PrintKind::Int => BaseType::Int,
            PrintKind::Float => BaseType::Float,
            PrintKind::Bool => BaseType::Bool,
        }
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral(i64, SourceLocation),
    FloatLiteral(f64, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    Variable(String, SourceLocation),
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `name = value`, usable both as a statement and inside a `for` header
    Assignment {
        name: String,
        value: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLiteral(_, loc)
            | Expr::FloatLiteral(_, loc)
            | Expr::BoolLiteral(_, loc)
            | Expr::Variable(_, loc) => *loc,
            Expr::UnaryOp { location, .. }
            | Expr::BinaryOp { location, .. }
            | Expr::Assignment { location, .. } => *location,
        }
    }
}

/// One name in a declaration such as `int x, y = 2;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Expr>,
    pub location: SourceLocation,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        var_type: BaseType,
        declarators: Vec<Declarator>,
        location: SourceLocation,
    },
    Expression {
        expr: Expr,
        location: SourceLocation,
    },
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    For {
        init: Option<Box<Stmt>>, // VarDecl or Expression
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Return {
        expr: Option<Expr>,
        location: SourceLocation,
    },
    Print {
        kind: PrintKind,
        arg: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::Expression { location, .. }
            | Stmt::Block { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Print { location, .. } => *location,
        }
    }
}

/// A parameterless function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub return_type: BaseType,
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<FunctionDef>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}
