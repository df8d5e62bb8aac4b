//! Resolution of function and method call expressions within function bodies.
//!
//! A call path is walked segment by segment: the head is resolved either against
//! the enclosing class (for `this.foo()` calls) or against the current scope (for
//! direct calls, which may bind to a local variable, a sibling method, or a
//! module-level function). Remaining segments are resolved through [`GetItem`] on
//! whatever type the previous segment landed on, mirroring how member access works
//! for fields.

use std::ops::Range;

use libinko_macros::InkoError;
use libinko_macros_core::SourceCode;

use crate::{
    ast::{ExpressionAst, FunctionCallAst},
    nom_tools::{Span, ToRange},
    tir::{
        context::TirContext,
        object_signature::{GetItem, TypeValue},
        resolver::function::find_class_location,
        scope::ScopeLocation,
        TirError,
    },
};

use super::{try_resolve_primitive, TypeLocation};

pub(super) fn resolve_function_call<'base>(
    context: &mut TirContext<'base>,
    scope_location: ScopeLocation,
    function_call: &FunctionCallAst<'base>,
) -> Result<TypeLocation, TirError> {
    let path = function_call.path.get_path();
    let is_this = function_call.path.is_this();

    let mut location = resolve_call_head(context, scope_location, is_this, path[0].clone())?;

    for segment in path.iter().skip(1) {
        location = resolve_member(context, location, segment.clone())?;
    }

    let arguments = function_call
        .arguments
        .iter()
        .map(|argument| resolve_expression(context, scope_location, argument))
        .collect::<Result<Vec<_>, _>>()?;

    validate_call(context, location, &arguments, &function_call.call_span)
}

fn resolve_call_head<'base>(
    context: &mut TirContext<'base>,
    scope_location: ScopeLocation,
    is_this: bool,
    head: Span<'base>,
) -> Result<TypeLocation, TirError> {
    if is_this {
        let class_location = find_class_location(context, scope_location)
            .ok_or_else(|| FunctionCallError::this_out_of_class(&head))?;
        return resolve_member(context, class_location, head);
    }

    let scope = context.get_scope(scope_location).expect("Scope not found, it is a bug");
    match scope.get_variable(context, &head) {
        Some(variable) => Ok(variable.location),
        None => Err(FunctionCallError::undefined_method(&head)),
    }
}

fn resolve_member<'base>(context: &TirContext<'base>, location: TypeLocation, segment: Span<'base>) -> Result<TypeLocation, TirError> {
    let signature = context
        .types
        .get_from_location(location)
        .unwrap_or_else(|| panic!("Type location not resolved yet, it is a bug"));

    if let Some(location) = signature.value.lookup_method(context, segment.text) {
        return Ok(location);
    }

    // No method or field named `segment` exists, but the receiver implements
    // the unknown-message protocol: route the send through it instead of
    // failing with `UndefinedMethod`.
    if signature.value.guard_unknown_message(context, segment.text) {
        if let Some(location) = signature.value.lookup_method(context, "unknown_message") {
            return Ok(location);
        }
    }

    Err(FunctionCallError::undefined_method(&segment))
}

/// Resolves the type of a sub-expression, returning its type location together
/// with the span it was computed from (used for type-mismatch diagnostics).
pub(super) fn resolve_expression<'base>(
    context: &mut TirContext<'base>,
    scope_location: ScopeLocation,
    expression: &ExpressionAst<'base>,
) -> Result<(TypeLocation, Span<'base>), TirError> {
    match expression {
        ExpressionAst::Primitive { span, value } => Ok((try_resolve_primitive(context, value, span)?, span.clone())),
        ExpressionAst::Ident(name) => {
            let scope = context.get_scope(scope_location).expect("Scope not found, it is a bug");
            match scope.get_variable(context, name) {
                Some(variable) => Ok((variable.location, name.clone())),
                None => Err(FunctionCallError::undefined_method(name)),
            }
        }
        ExpressionAst::Ref(reference) => {
            let mut location = resolve_call_head(context, scope_location, false, reference.names[0].clone())?;

            for segment in reference.names.iter().skip(1) {
                location = resolve_member(context, location, segment.clone())?;
            }

            Ok((location, reference.names.last().expect("Ref with no path segments").clone()))
        }
        ExpressionAst::FunctionCall(call) => Ok((resolve_function_call(context, scope_location, call)?, call.call_span.clone())),
        ExpressionAst::Not(inner) => resolve_expression(context, scope_location, inner),
        ExpressionAst::Operation { left, right, .. } => {
            let (left_location, left_span) = resolve_expression(context, scope_location, left)?;
            let (right_location, _) = resolve_expression(context, scope_location, right)?;

            let left_value = context.types.get_from_location(left_location).unwrap().value.clone();
            let right_value = context.types.get_from_location(right_location).unwrap().value.clone();

            if !left_value.is_same_type(context, &right_value) {
                return Err(TirError::types_do_not_match(left_span.to_range(), left_span.state.file.clone()));
            }

            Ok((left_location, left_span))
        }
    }
}

fn validate_call<'base>(
    context: &mut TirContext<'base>,
    location: TypeLocation,
    arguments: &[(TypeLocation, Span<'base>)],
    call_span: &Span<'base>,
) -> Result<TypeLocation, TirError> {
    let signature = context
        .types
        .get_from_location(location)
        .unwrap_or_else(|| panic!("Type location not resolved yet, it is a bug"));

    let (parameters, return_type) = match signature.value.as_ref() {
        TypeValue::Function(function) => (function.arguments.iter().map(|argument| argument.field_type).collect::<Vec<_>>(), function.return_type),
        TypeValue::InterfaceFunction(function) => (function.arguments.iter().map(|argument| argument.field_type).collect::<Vec<_>>(), function.return_type),
        _ => return Err(FunctionCallError::undefined_method(call_span)),
    };

    if parameters.len() != arguments.len() {
        return Err(TirError::arity_mismatch(parameters.len(), arguments.len(), call_span.to_range(), call_span.state.file.clone()));
    }

    for (parameter_location, (argument_location, argument_span)) in parameters.iter().zip(arguments.iter()) {
        let parameter_value = context.types.get_from_location(*parameter_location).unwrap().value.clone();
        let argument_value = context.types.get_from_location(*argument_location).unwrap().value.clone();

        if !parameter_value.is_same_type(context, &argument_value) {
            return Err(TirError::types_do_not_match(argument_span.to_range(), argument_span.state.file.clone()));
        }
    }

    Ok(return_type)
}

#[derive(Clone, Debug, InkoError, thiserror::Error)]
#[error("`this` needs to be used inside a class function")]
#[diagnostic(code("inko::error::this_out_of_class"), help("move this call into a class method or use the direct function name"))]
pub struct ThisOutOfClass {
    #[label("`this` is not available here")]
    pub position: Range<usize>,

    #[source_code]
    pub code: SourceCode,
}

#[derive(Clone, Debug, InkoError, thiserror::Error)]
pub enum FunctionCallError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ThisOutOfClass(Box<ThisOutOfClass>),
}

impl From<FunctionCallError> for TirError {
    fn from(value: FunctionCallError) -> Self {
        super::super::ResolverError::FunctionCall(Box::new(value)).into()
    }
}

impl FunctionCallError {
    pub fn this_out_of_class(span: &Span<'_>) -> TirError {
        FunctionCallError::ThisOutOfClass(ThisOutOfClass {
            position: span.to_range(),
            code: span.state.file.clone().into(),
        }.into()).into()
    }

    pub fn undefined_method(span: &Span<'_>) -> TirError {
        TirError::undefined_method(span.text.to_string(), span.to_range(), span.state.file.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{file::SourceFile, nom_tools::State, process_code, tir::TirError};

    #[test]
    fn func_call_1() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        abc();
    }
}

func abc(): string {
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();
        Ok(())
    }

    #[test]
    fn func_call_2() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc();
        abc();
    }

    func abc(): string {
    }
}

func abc(): string {
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();
        Ok(())
    }

    #[test]
    fn func_call_3() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc("hello");
    }

    func abc(a: string): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();

        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc("hello", "world");
    }
    func abc(a: string, b: string): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();
        Ok(())
    }

    #[test]
    fn func_call_4_arity_mismatch() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc();
    }

    func abc(a: string): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let error = crate::tir::build(vec![ast.into()]).unwrap_err();
        assert!(matches!(error, TirError::ArityMismatch(_)));
        Ok(())
    }

    #[test]
    fn func_call_5_type_mismatch() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.abc(1);
    }

    func abc(a: string): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let error = crate::tir::build(vec![ast.into()]).unwrap_err();
        assert!(matches!(error, TirError::TypesDoNotMatch(_)));
        Ok(())
    }

    #[test]
    fn func_call_6_undefined_method() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
class TestClass {
    func init(this): string {
        this.nope();
    }

    func abc(): string {
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        let error = crate::tir::build(vec![ast.into()]).unwrap_err();
        assert!(matches!(error, TirError::UndefinedMethod(_)));
        Ok(())
    }

    #[test]
    fn func_call_8_unknown_message_dispatch() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
interface IDynamic {
    func unknown_message(): string;
}

extend TestClass: IDynamic {
    func unknown_message(): string {

    }
}

class TestClass {
    func init(this): string {
        this.does_not_exist();
    }
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();
        Ok(())
    }

    #[test]
    fn func_call_7_interface_and_field_chain() -> Result<(), TirError> {
        let state = State::new(SourceFile::new(vec!["source".into()], r#"
interface ITest {
    func test(a: string): string;
    a: TestClass;
}

extend TestClass: ITest {
    func test(a: string): string {

    }
    a: TestClass;
}

class TestClass {
    func init(this): string {
        this.test("erhanbaris");
        this.a.test("baris");
        abc();
    }
}

func abc(): TestClass {
}
"#.to_string()));
        let ast = process_code(&state)?;
        crate::tir::build(vec![ast.into()]).unwrap();
        Ok(())
    }
}
