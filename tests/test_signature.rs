//! Signature export against declarations covering every rendering rule.
//!
//! Each case pairs a method descriptor, as introspection would report it,
//! with the declaration the exporter must produce.

use phpref::hir::{
    DefaultValue, FunctionDescriptor, Literal, ParameterDescriptor, Signature, TypeDescriptor, Visibility,
};
use phpref::{FunctionRef, MethodDescriptor, Modifiers, ReflectionTools};
use rstest::rstest;

const CLASS: &str = "Brick\\Reflection\\Tests\\Classes\\PHP80";

fn public(name: &str, signature: Signature) -> MethodDescriptor {
    MethodDescriptor::new(CLASS, name, Visibility::Public).with_signature(signature)
}

fn param(name: &str, ty: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name).typed(TypeDescriptor::named(ty))
}

fn nullable_param(name: &str, ty: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name).typed(TypeDescriptor::nullable(ty))
}

fn null() -> DefaultValue {
    DefaultValue::Literal(Literal::Null)
}

fn kitchen_sink() -> MethodDescriptor {
    MethodDescriptor::new(CLASS, "kitchenSink", Visibility::Protected)
        .with_flags(Modifiers::FINAL | Modifiers::STATIC)
        .with_signature(
            Signature::new()
                .param(param("a", "int"))
                .param(nullable_param("b", "string").with_default(null()))
                .param(
                    param("c", "array")
                        .by_reference()
                        .with_default(DefaultValue::Literal(Literal::list([
                            Literal::Int(1),
                            Literal::string("x"),
                        ]))),
                )
                .param(nullable_param("objects", "stdClass").by_reference().variadic())
                .returns_reference()
                .returns(TypeDescriptor::nullable("static")),
        )
}

#[rstest]
#[case(public("noParamsNoReturnType", Signature::new()), "public function noParamsNoReturnType()")]
#[case(
    public("returnNullableType", Signature::new().returns(TypeDescriptor::nullable("string"))),
    "public function returnNullableType(): ?string"
)]
#[case(
    public("returnClassType", Signature::new().returns(TypeDescriptor::named("stdClass"))),
    "public function returnClassType(): \\stdClass"
)]
#[case(
    public("untypedParam", Signature::new().param(ParameterDescriptor::new("x"))),
    "public function untypedParam($x)"
)]
#[case(
    public("typedParamWithReference", Signature::new().param(param("x", "int").by_reference())),
    "public function typedParamWithReference(int & $x)"
)]
#[case(
    public(
        "typedParamWithReferenceAndDefaultValue",
        Signature::new().param(param("x", "int").by_reference().with_default(DefaultValue::Literal(Literal::Int(123))))
    ),
    "public function typedParamWithReferenceAndDefaultValue(int & $x = 123)"
)]
#[case(
    public(
        "nullableTypedParamWithReferenceDefaultNull",
        Signature::new().param(nullable_param("x", "string").by_reference().with_default(null()))
    ),
    "public function nullableTypedParamWithReferenceDefaultNull(?string & $x = null)"
)]
#[case(
    public("variadics", Signature::new().param(param("a", "int")).param(param("b", "string").variadic())),
    "public function variadics(int $a, string ...$b)"
)]
#[case(
    public("nullableVariadics", Signature::new().param(param("a", "int")).param(nullable_param("b", "string").variadic())),
    "public function nullableVariadics(int $a, ?string ...$b)"
)]
#[case(
    MethodDescriptor::new("Brick\\Reflection\\Tests\\Classes\\PHP81", "returnNever", Visibility::Protected)
        .with_flags(Modifiers::FINAL)
        .with_signature(Signature::new().returns(TypeDescriptor::named("never"))),
    "final protected function returnNever(): never"
)]
#[case(
    MethodDescriptor::new(CLASS, "intersectionTypes", Visibility::Public)
        .with_flags(Modifiers::ABSTRACT)
        .with_signature(
            Signature::new()
                .param(ParameterDescriptor::new("a").typed(TypeDescriptor::intersection([
                    TypeDescriptor::named("Countable"),
                    TypeDescriptor::named("Traversable"),
                ])))
                .returns(TypeDescriptor::intersection([
                    TypeDescriptor::named("Countable"),
                    TypeDescriptor::named("ArrayAccess"),
                ]))
        ),
    "abstract public function intersectionTypes(\\Countable&\\Traversable $a): \\Countable&\\ArrayAccess"
)]
#[case(
    kitchen_sink(),
    "final protected static function & kitchenSink(int $a, ?string $b = null, array & $c = [1, 'x'], ?\\stdClass & ...$objects): ?static"
)]
fn test_export_function(#[case] method: MethodDescriptor, #[case] expected: &str) {
    let tools = ReflectionTools::new();
    assert_eq!(tools.export_function(FunctionRef::Method(&method), Modifiers::empty()).unwrap(), expected);
}

#[test]
fn test_export_excluding_modifiers() {
    let tools = ReflectionTools::new();
    let method = kitchen_sink();

    let exported = tools
        .export_function(FunctionRef::Method(&method), Modifiers::FINAL | Modifiers::STATIC)
        .unwrap();
    assert!(exported.starts_with("protected function & kitchenSink("));
}

#[test]
fn test_export_function_parameters() {
    let tools = ReflectionTools::new();
    let function = FunctionDescriptor::new(
        "Brick\\Reflection\\Tests\\reflectedParameterFunc",
        Signature::new()
            .param(param("arg", "string"))
            .param(param("flags", "int").with_default(DefaultValue::Constant("Brick\\Reflection\\FLAGS".into())))
            .doc("/**\n * @param string $arg\n */"),
    );
    let function = FunctionRef::Function(&function);

    assert_eq!(
        tools.export_function_parameters(function).unwrap(),
        "string $arg, int $flags = \\Brick\\Reflection\\FLAGS"
    );
    assert_eq!(tools.function_name(function), "Brick\\Reflection\\Tests\\reflectedParameterFunc");
    assert_eq!(tools.function_parameter_types(function)["arg"], vec!["string"]);
}

#[test]
fn test_unknown_parameter_type_is_unsupported() {
    let tools = ReflectionTools::new();
    let method = public(
        "future",
        Signature::new().param(ParameterDescriptor::new("x").typed(TypeDescriptor::Unknown("FutureType".into()))),
    );

    let err = tools.export_function(FunctionRef::Method(&method), Modifiers::empty()).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported type kind `FutureType`");
}
