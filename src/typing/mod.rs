//! Static typing pass
//!
//! Rejects ill-typed programs before they run. The rules mirror the
//! evaluator's: `int` and `float` mix freely (the result is `float`), `bool`
//! never mixes with a numeric kind, and stores coerce between `int` and
//! `float` only.
//!
//! A program that passes this check can still fail at runtime, but only with
//! a division by zero or an output error.

use crate::parser::ast::*;
use rustc_hash::FxHashMap;

/// A static typing error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("In function {function}: {location}: {message}")]
pub struct TypeError {
    pub function: String,
    pub message: String,
    pub location: SourceLocation,
}

/// Check every function of `program`
pub fn check_program(program: &Program) -> Result<(), TypeError> {
    let mut seen: FxHashMap<&str, SourceLocation> = FxHashMap::default();
    for function in &program.functions {
        if let Some(first) = seen.insert(function.name.as_str(), function.location) {
            return Err(TypeError {
                function: function.name.clone(),
                message: format!("Function {} already defined at {}", function.name, first),
                location: function.location,
            });
        }
        if function.name == "main" && function.return_type == BaseType::Bool {
            return Err(TypeError {
                function: function.name.clone(),
                message: "main must return int, float or void, not bool".to_string(),
                location: function.location,
            });
        }
        TypeChecker::new(function).check_function(function)?;
    }

    if !seen.contains_key("main") {
        return Err(TypeError {
            function: "main".to_string(),
            message: "No main function defined".to_string(),
            location: SourceLocation::new(1, 1),
        });
    }
    Ok(())
}

/// Whether a value of type `from` may be stored into a cell of type `to`
fn is_coercible(from: BaseType, to: BaseType) -> bool {
    from == to || (is_numeric(from) && is_numeric(to))
}

fn is_numeric(ty: BaseType) -> bool {
    matches!(ty, BaseType::Int | BaseType::Float)
}

/// Symbol table and error context for one function
struct TypeChecker {
    function: String,
    return_type: BaseType,
    scopes: Vec<FxHashMap<String, BaseType>>,
}

impl TypeChecker {
    fn new(function: &FunctionDef) -> Self {
        TypeChecker {
            function: function.name.clone(),
            return_type: function.return_type,
            scopes: vec![FxHashMap::default()],
        }
    }

    fn error(&self, message: impl Into<String>, location: SourceLocation) -> TypeError {
        TypeError {
            function: self.function.clone(),
            message: message.into(),
            location,
        }
    }

    fn invalid(&self, what: &str, types: &[BaseType], location: SourceLocation) -> TypeError {
        let names: Vec<String> = types.iter().map(ToString::to_string).collect();
        self.error(
            format!("invalid type for {}: {}", what, names.join(" and ")),
            location,
        )
    }

    fn lookup(&self, name: &str, location: SourceLocation) -> Result<BaseType, TypeError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
            .ok_or_else(|| self.error(format!("Undefined variable {}", name), location))
    }

    fn check_function(mut self, function: &FunctionDef) -> Result<(), TypeError> {
        self.check_block(&function.body)
    }

    fn check_block(&mut self, statements: &[Stmt]) -> Result<(), TypeError> {
        statements.iter().try_for_each(|stmt| self.check_stmt(stmt))
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), TypeError> {
        match stmt {
            Stmt::VarDecl {
                var_type,
                declarators,
                location,
            } => {
                if *var_type == BaseType::Void {
                    return Err(self.error("Variable declared void", *location));
                }
                for decl in declarators {
                    if let Some(init) = &decl.init {
                        let init_type = self.check_expr(init)?;
                        if !is_coercible(init_type, *var_type) {
                            return Err(self.invalid(
                                &format!("initialization of {}", decl.name),
                                &[*var_type, init_type],
                                decl.location,
                            ));
                        }
                    }
                    self.declare(&decl.name, *var_type, decl.location)?;
                }
                Ok(())
            }

            Stmt::Expression { expr, .. } => self.check_expr(expr).map(|_| ()),

            Stmt::Block { statements, .. } => self.check_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                location,
            } => {
                self.check_condition(condition, "if statement", *location)?;
                self.check_block(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch)?;
                }
                Ok(())
            }

            Stmt::While {
                condition,
                body,
                location,
            } => {
                self.check_condition(condition, "while statement", *location)?;
                self.check_block(body)
            }

            Stmt::For {
                init,
                condition,
                update,
                body,
                location,
            } => {
                self.scopes.push(FxHashMap::default());
                let result = self.check_for(init.as_deref(), condition.as_ref(), update.as_ref(), body, *location);
                self.scopes.pop();
                result
            }

            Stmt::Return { expr, location } => self.check_return(expr.as_ref(), *location),

            Stmt::Print {
                kind,
                arg,
                location,
            } => {
                let arg_type = self.check_expr(arg)?;
                let accepted = match kind {
                    // Widened like any int argument to a float parameter
                    PrintKind::Float => is_numeric(arg_type),
                    _ => arg_type == kind.param_type(),
                };
                if !accepted {
                    return Err(self.invalid(
                        &format!("{} statement", kind.builtin_name()),
                        &[arg_type],
                        *location,
                    ));
                }
                Ok(())
            }
        }
    }

    fn check_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &[Stmt],
        location: SourceLocation,
    ) -> Result<(), TypeError> {
        if let Some(init) = init {
            self.check_stmt(init)?;
        }
        if let Some(condition) = condition {
            self.check_condition(condition, "for statement", location)?;
        }
        if let Some(update) = update {
            self.check_expr(update)?;
        }
        self.check_block(body)
    }

    fn check_condition(
        &mut self,
        condition: &Expr,
        what: &str,
        location: SourceLocation,
    ) -> Result<(), TypeError> {
        let cond_type = self.check_expr(condition)?;
        if cond_type != BaseType::Bool {
            return Err(self.invalid(what, &[cond_type], location));
        }
        Ok(())
    }

    fn check_return(&mut self, expr: Option<&Expr>, location: SourceLocation) -> Result<(), TypeError> {
        match (expr, self.return_type) {
            (None, BaseType::Void) => Ok(()),
            (None, expected) => Err(self.error(
                format!("return without a value in function returning {}", expected),
                location,
            )),
            (Some(_), BaseType::Void) => {
                Err(self.error("return with a value in function returning void", location))
            }
            (Some(expr), expected) => {
                let actual = self.check_expr(expr)?;
                if !is_coercible(actual, expected) {
                    return Err(self.invalid("return statement", &[expected, actual], location));
                }
                Ok(())
            }
        }
    }

    fn declare(&mut self, name: &str, ty: BaseType, location: SourceLocation) -> Result<(), TypeError> {
        let redeclared = self
            .scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name));
        if redeclared {
            return Err(self.error(format!("Variable {} already declared", name), location));
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
        Ok(())
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<BaseType, TypeError> {
        match expr {
            Expr::IntLiteral(..) => Ok(BaseType::Int),
            Expr::FloatLiteral(..) => Ok(BaseType::Float),
            Expr::BoolLiteral(..) => Ok(BaseType::Bool),
            Expr::Variable(name, location) => self.lookup(name, *location),

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let ty = self.check_expr(operand)?;
                match (op, ty) {
                    (UnOp::Neg, BaseType::Int | BaseType::Float) => Ok(ty),
                    (UnOp::Not, BaseType::Bool) => Ok(BaseType::Bool),
                    (UnOp::Neg, _) => Err(self.invalid("unary minus operand", &[ty], *location)),
                    (UnOp::Not, _) => Err(self.invalid("not operand", &[ty], *location)),
                }
            }

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let lhs = self.check_expr(left)?;
                let rhs = self.check_expr(right)?;
                self.binary_result(*op, lhs, rhs, *location)
            }

            Expr::Assignment {
                name,
                value,
                location,
            } => {
                let target = self.lookup(name, *location)?;
                let value_type = self.check_expr(value)?;
                if !is_coercible(value_type, target) {
                    return Err(self.invalid(
                        &format!("assignment to {}", name),
                        &[target, value_type],
                        *location,
                    ));
                }
                Ok(target)
            }
        }
    }

    fn binary_result(
        &self,
        op: BinOp,
        lhs: BaseType,
        rhs: BaseType,
        location: SourceLocation,
    ) -> Result<BaseType, TypeError> {
        let numeric = is_numeric(lhs) && is_numeric(rhs);
        let both_bool = lhs == BaseType::Bool && rhs == BaseType::Bool;

        let result = if op.is_arithmetic() {
            numeric.then(|| {
                if lhs == BaseType::Int && rhs == BaseType::Int {
                    BaseType::Int
                } else {
                    BaseType::Float
                }
            })
        } else if op.is_logical() {
            both_bool.then_some(BaseType::Bool)
        } else if op.is_equality() {
            (numeric || both_bool).then_some(BaseType::Bool)
        } else {
            numeric.then_some(BaseType::Bool)
        };

        result.ok_or_else(|| {
            self.invalid(
                &format!("'{}' operands", op.symbol()),
                &[lhs, rhs],
                location,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> Result<(), TypeError> {
        check_program(&parse_source(source).unwrap())
    }

    fn message(source: &str) -> String {
        check(source).unwrap_err().to_string()
    }

    #[test]
    fn test_well_typed_program() {
        check(
            "int main() {
                int x = 8, y;
                float f = x / 2;
                bool b = x < f && !(y == 0);
                for (int i = 0; i < 3; i = i + 1) { f = f + i; }
                while (b) { b = false; }
                if (b || f >= 1.5) println_float(x); else println_bool(b);
                return f;
            }",
        )
        .unwrap();
    }

    #[test]
    fn test_error_format() {
        assert_eq!(
            message("int main() {\n  int x;\n  x = true;\n  return 0;\n}"),
            "In function main: line 3, column 5: invalid type for assignment to x: int and bool"
        );
    }

    #[test]
    fn test_redeclaration() {
        let msg = message("int main() { int x; float x; return 0; }");
        assert!(msg.ends_with("Variable x already declared"), "{}", msg);
    }

    #[test]
    fn test_for_header_may_shadow() {
        check("int main() { int i; for (int i = 0; i < 2; i = i + 1) { } for (int i = 0; i < 2; i = i + 1) { } return i; }").unwrap();
    }

    #[test]
    fn test_for_header_variable_is_out_of_scope_after_loop() {
        let msg = message("int main() { for (int i = 0; i < 2; i = i + 1) { } return i; }");
        assert!(msg.ends_with("Undefined variable i"), "{}", msg);
    }

    #[test]
    fn test_undefined_variable() {
        let msg = message("int main() { println_int(y); return 0; }");
        assert!(msg.ends_with("Undefined variable y"), "{}", msg);
    }

    #[test]
    fn test_operator_kinds() {
        assert!(check("int main() { bool b = true + false; return 0; }").is_err());
        assert!(check("int main() { bool b = true < false; return 0; }").is_err());
        assert!(check("int main() { bool b = 1 == true; return 0; }").is_err());
        assert!(check("int main() { bool b = 1 && true; return 0; }").is_err());
        assert!(check("int main() { int n = -true; return 0; }").is_err());
        assert!(check("int main() { bool b = !1; return 0; }").is_err());
        check("int main() { bool b = true != false; float f = 7.5 % 2; return 0; }").unwrap();
    }

    #[test]
    fn test_conditions_must_be_bool() {
        assert!(check("int main() { if (1) { } return 0; }").is_err());
        assert!(check("int main() { while (1.0) { } return 0; }").is_err());
        assert!(check("int main() { for (; 0;) { } return 0; }").is_err());
    }

    #[test]
    fn test_print_kinds() {
        check("int main() { println_float(3); return 0; }").unwrap();
        assert!(check("int main() { println_int(3.0); return 0; }").is_err());
        assert!(check("int main() { println_bool(1); return 0; }").is_err());
        assert!(check("int main() { println_int(true); return 0; }").is_err());
    }

    #[test]
    fn test_return_types() {
        check("void main() { return; }").unwrap();
        assert!(check("void main() { return 1; }").is_err());
        assert!(check("int main() { return; }").is_err());
        assert!(check("int main() { return true; }").is_err());
    }

    #[test]
    fn test_missing_and_duplicate_functions() {
        let msg = message("int helper() { return 0; }");
        assert!(msg.contains("No main function"), "{}", msg);

        let msg = message("int main() { return 0; } int main() { return 1; }");
        assert!(msg.contains("already defined"), "{}", msg);
    }

    #[test]
    fn test_main_cannot_return_bool() {
        assert_eq!(
            message("bool main() { return true; }"),
            "In function main: line 1, column 6: main must return int, float or void, not bool"
        );
        check("bool helper() { return true; } int main() { return 0; }").unwrap();
        check("float main() { return 1.5; }").unwrap();
    }
}
