//! Function shape: formal parameters and return-value detection

use oxc_ast::ast::{ArrowFunctionExpression, BindingPattern, FormalParameters, Function, FunctionBody, Statement};
use oxc_span::Span;

/// One formal parameter, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// `None` for destructured parameters
    pub name: Option<String>,
    pub position: usize,
    pub has_default: bool,
    pub is_rest: bool,
}

/// Everything the doc-comment rules need to know about a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Span of the underlying function node (never the wrapper)
    pub span: Span,
    pub params: Vec<ParameterDescriptor>,
    pub returns_value: bool,
    pub is_async: bool,
    pub is_generator: bool,
    /// `false` for overload signatures and `declare function`
    pub has_body: bool,
}

impl FunctionInfo {
    pub fn from_function(func: &Function) -> Self {
        Self {
            span: func.span,
            params: parameters(&func.params),
            returns_value: func.body.as_ref().is_some_and(|body| body_returns_value(body)),
            is_async: func.r#async,
            is_generator: func.generator,
            has_body: func.body.is_some(),
        }
    }

    pub fn from_arrow(arrow: &ArrowFunctionExpression) -> Self {
        Self {
            span: arrow.span,
            params: parameters(&arrow.params),
            // An expression body always produces a value
            returns_value: arrow.expression || body_returns_value(&arrow.body),
            is_async: arrow.r#async,
            is_generator: false,
            has_body: true,
        }
    }
}

/// Describe the formal parameters of a function
pub fn parameters(params: &FormalParameters) -> Vec<ParameterDescriptor> {
    let mut descriptors: Vec<ParameterDescriptor> = params
        .items
        .iter()
        .enumerate()
        .map(|(position, param)| ParameterDescriptor {
            name: binding_name(&param.pattern),
            position,
            has_default: param.initializer.is_some()
                || matches!(param.pattern, BindingPattern::AssignmentPattern(_)),
            is_rest: false,
        })
        .collect();

    if let Some(rest) = &params.rest {
        descriptors.push(ParameterDescriptor {
            name: binding_name(&rest.rest.argument),
            position: descriptors.len(),
            has_default: false,
            is_rest: true,
        });
    }
    descriptors
}

/// Name of a plain identifier binding; `None` for destructuring
fn binding_name(pattern: &BindingPattern) -> Option<String> {
    if pattern.is_destructuring_pattern() {
        return None;
    }
    pattern.get_binding_identifier().map(|ident| ident.name.to_string())
}

/// Whether a function body returns a value.
///
/// Walks statements only; nested functions and classes are never entered
/// because they appear as expressions or declarations, which are not
/// descended into.
pub fn body_returns_value(body: &FunctionBody) -> bool {
    body.statements.iter().any(statement_returns_value)
}

fn statement_returns_value(statement: &Statement) -> bool {
    match statement {
        Statement::ReturnStatement(ret) => ret.argument.is_some(),
        Statement::BlockStatement(block) => block.body.iter().any(statement_returns_value),
        Statement::IfStatement(if_stmt) => {
            statement_returns_value(&if_stmt.consequent)
                || if_stmt.alternate.as_ref().is_some_and(statement_returns_value)
        }
        Statement::ForStatement(for_stmt) => statement_returns_value(&for_stmt.body),
        Statement::ForInStatement(for_in) => statement_returns_value(&for_in.body),
        Statement::ForOfStatement(for_of) => statement_returns_value(&for_of.body),
        Statement::WhileStatement(while_stmt) => statement_returns_value(&while_stmt.body),
        Statement::DoWhileStatement(do_while) => statement_returns_value(&do_while.body),
        Statement::LabeledStatement(labeled) => statement_returns_value(&labeled.body),
        Statement::WithStatement(with) => statement_returns_value(&with.body),
        Statement::SwitchStatement(switch) => switch
            .cases
            .iter()
            .any(|case| case.consequent.iter().any(statement_returns_value)),
        Statement::TryStatement(try_stmt) => {
            try_stmt.block.body.iter().any(statement_returns_value)
                || try_stmt
                    .handler
                    .as_ref()
                    .is_some_and(|handler| handler.body.body.iter().any(statement_returns_value))
                || try_stmt
                    .finalizer
                    .as_ref()
                    .is_some_and(|finalizer| finalizer.body.iter().any(statement_returns_value))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::ast::{ClassElement, Statement};
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use pretty_assertions::assert_eq;

    fn first_function(source: &str, source_type: SourceType) -> FunctionInfo {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type).parse();
        match ret.program.body.first() {
            Some(Statement::FunctionDeclaration(func)) => FunctionInfo::from_function(func),
            _ => panic!("expected a function declaration"),
        }
    }

    fn names(info: &FunctionInfo) -> Vec<Option<&str>> {
        info.params.iter().map(|p| p.name.as_deref()).collect()
    }

    #[test]
    fn test_parameters() {
        let info = first_function(
            "function f(a, b = 1, { c }, [d] = [], ...rest) {}",
            SourceType::jsx(),
        );
        assert_eq!(names(&info), vec![Some("a"), Some("b"), None, None, Some("rest")]);
        assert_eq!(
            info.params.iter().map(|p| p.has_default).collect::<Vec<_>>(),
            vec![false, true, false, true, false]
        );
        assert!(info.params[4].is_rest);
        assert_eq!(info.params[4].position, 4);
    }

    #[test]
    fn test_typescript_parameters() {
        let info = first_function(
            "function f(a: number, cb: (x: number) => void, opts?: Map<string, number>, limit: number = 10) {}",
            SourceType::tsx(),
        );
        assert_eq!(names(&info), vec![Some("a"), Some("cb"), Some("opts"), Some("limit")]);
        assert_eq!(
            info.params.iter().map(|p| p.has_default).collect::<Vec<_>>(),
            vec![false, false, false, true]
        );
    }

    #[test]
    fn test_returns_value() {
        let cases = [
            ("function f() { return 1; }", true),
            ("function f() { return; }", false),
            ("function f(x) { if (x) { return x; } }", true),
            ("function f(xs) { for (const x of xs) { if (x) return x; } }", true),
            ("function f() { try { work(); } catch (e) { return null; } }", true),
            ("function f(x) { switch (x) { case 1: return 'one'; } }", true),
            ("function f() { const g = () => 1; function h() { return 2; } }", false),
            ("function f() { items.forEach(function (x) { return x; }); }", false),
            ("function f() { class A { m() { return 1; } } }", false),
        ];
        for (source, expected) in cases {
            assert_eq!(first_function(source, SourceType::jsx()).returns_value, expected, "{source}");
        }
    }

    #[test]
    fn test_modifier_names_are_plain_parameters() {
        let info = first_function(
            "function f(override = false, readonly, public = 1, x) {}",
            SourceType::jsx(),
        );
        assert_eq!(
            names(&info),
            vec![Some("override"), Some("readonly"), Some("public"), Some("x")]
        );
        assert_eq!(
            info.params.iter().map(|p| p.has_default).collect::<Vec<_>>(),
            vec![true, false, true, false]
        );
    }

    #[test]
    fn test_parameter_properties() {
        let source = "class A { constructor(private readonly store: Store, public log = console) {} }";
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let Some(Statement::ClassDeclaration(class)) = ret.program.body.first() else {
            panic!("expected a class");
        };
        let Some(ClassElement::MethodDefinition(ctor)) = class.body.body.first() else {
            panic!("expected a constructor");
        };
        let info = FunctionInfo::from_function(&ctor.value);
        assert_eq!(names(&info), vec![Some("store"), Some("log")]);
        assert!(info.params[1].has_default);
    }

    #[test]
    fn test_rest_destructuring() {
        let info = first_function("function f(a, ...[b, c]) {}", SourceType::jsx());
        assert_eq!(names(&info), vec![Some("a"), None]);
        assert!(info.params[1].is_rest);
    }
}
