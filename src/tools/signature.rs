//! Signature rendering.
//!
//! Renders functions and methods the way they would be declared, with every
//! class name fully qualified so that the output does not depend on the
//! imports of the file it came from:
//!
//! ```text
//! final protected static function & kitchenSink(?\stdClass & ...$objects): ?static
//! ```

use crate::base::NS_SEPARATOR;
use crate::hir::{
    DefaultValue, FunctionRef, Literal, Modifiers, NamedType, ParameterDescriptor, ReflectionError, Result,
    TypeDescriptor,
};

use super::export::export_literal;

/// Render the signature of a function or method.
///
/// Modifiers in `exclude` are left out of a method's modifier list.
pub fn export_function(function: FunctionRef<'_>, exclude: Modifiers) -> Result<String> {
    let mut out = String::new();

    if let FunctionRef::Method(method) = function {
        for modifier in method.modifiers().difference(exclude).names() {
            out.push_str(modifier);
            out.push(' ');
        }
    }

    let signature = function.signature();
    out.push_str("function ");
    if signature.returns_reference {
        out.push_str("& ");
    }
    out.push_str(function.short_name());
    out.push('(');
    out.push_str(&export_parameters(function)?);
    out.push(')');

    if let Some(return_type) = &signature.return_type {
        out.push_str(": ");
        out.push_str(&render_type(return_type)?);
    }

    Ok(out)
}

/// Render the comma-separated parameter list, without parentheses.
pub fn export_parameters(function: FunctionRef<'_>) -> Result<String> {
    let parameters = function
        .signature()
        .parameters
        .iter()
        .map(export_parameter)
        .collect::<Result<Vec<_>>>()?;
    Ok(parameters.join(", "))
}

/// `[type ][& ][...]$name[ = default]`
pub fn export_parameter(parameter: &ParameterDescriptor) -> Result<String> {
    let mut out = String::new();

    if let Some(ty) = &parameter.ty {
        // `T $x = null` declares an implicitly nullable `?T`.
        let implicitly_nullable = matches!(parameter.default, Some(DefaultValue::Literal(Literal::Null)));
        match ty {
            TypeDescriptor::Named(named) if implicitly_nullable && !named.nullable => {
                let nullable = NamedType {
                    nullable: true,
                    ..named.clone()
                };
                out.push_str(&render_type(&TypeDescriptor::Named(nullable))?);
            }
            _ => out.push_str(&render_type(ty)?),
        }
        out.push(' ');
    }
    if parameter.by_reference {
        out.push_str("& ");
    }
    if parameter.variadic {
        out.push_str("...");
    }
    out.push('$');
    out.push_str(&parameter.name);

    if let Some(default) = &parameter.default {
        out.push_str(" = ");
        out.push_str(&render_default(default));
    }

    Ok(out)
}

/// Render a declared type.
///
/// # Errors
///
/// [`ReflectionError::Unsupported`] for [`TypeDescriptor::Unknown`] and for
/// composite shapes the host language cannot declare.
pub fn render_type(ty: &TypeDescriptor) -> Result<String> {
    match ty {
        TypeDescriptor::Named(named) => {
            let marker = if named.nullable && !named.is_implicitly_nullable() {
                "?"
            } else {
                ""
            };
            Ok(format!("{marker}{}", qualify(named)))
        }
        TypeDescriptor::Union(members) => render_union(members),
        TypeDescriptor::Intersection(members) => render_intersection(members),
        TypeDescriptor::Unknown(kind) => Err(ReflectionError::unsupported(format!("type kind `{kind}`"))),
    }
}

/// A union of one named type and `null` collapses to `?T`.
fn render_union(members: &[TypeDescriptor]) -> Result<String> {
    if let [a, b] = members {
        let pair = match (a, b) {
            (TypeDescriptor::Named(t), TypeDescriptor::Named(n)) if is_null(n) && !is_null(t) => Some(t),
            (TypeDescriptor::Named(n), TypeDescriptor::Named(t)) if is_null(n) && !is_null(t) => Some(t),
            _ => None,
        };
        if let Some(named) = pair.filter(|named| !named.is_implicitly_nullable()) {
            return Ok(format!("?{}", qualify(named)));
        }
    }

    let parts = members
        .iter()
        .map(|member| match member {
            TypeDescriptor::Named(named) => Ok(qualify(named)),
            TypeDescriptor::Intersection(inner) => Ok(format!("({})", render_intersection(inner)?)),
            TypeDescriptor::Union(_) => Err(ReflectionError::unsupported("nested union type")),
            TypeDescriptor::Unknown(kind) => Err(ReflectionError::unsupported(format!("type kind `{kind}`"))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("|"))
}

fn render_intersection(members: &[TypeDescriptor]) -> Result<String> {
    let parts = members
        .iter()
        .map(|member| match member {
            TypeDescriptor::Named(named) => Ok(qualify(named)),
            TypeDescriptor::Union(_) | TypeDescriptor::Intersection(_) => {
                Err(ReflectionError::unsupported("composite type inside an intersection"))
            }
            TypeDescriptor::Unknown(kind) => Err(ReflectionError::unsupported(format!("type kind `{kind}`"))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("&"))
}

fn is_null(named: &NamedType) -> bool {
    named.name.eq_ignore_ascii_case("null")
}

/// Class names get a leading separator; builtins, `self` and `parent` do not.
pub(crate) fn qualify(named: &NamedType) -> String {
    if named.is_builtin() || named.is_relative() {
        return named.name.to_string();
    }
    let name = named.name.trim_start_matches(NS_SEPARATOR);
    format!("{NS_SEPARATOR}{name}")
}

/// Constants render as qualified paths, literals as source literals.
pub fn render_default(default: &DefaultValue) -> String {
    match default {
        DefaultValue::Literal(literal) => export_literal(literal),
        DefaultValue::Constant(name) => {
            let is_relative_class_constant = ["self::", "static::", "parent::"]
                .iter()
                .any(|prefix| name.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix)));
            if is_relative_class_constant {
                name.to_string()
            } else {
                format!("{NS_SEPARATOR}{}", name.trim_start_matches(NS_SEPARATOR))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{FunctionDescriptor, MethodDescriptor, Signature, Visibility};

    fn method(name: &str, visibility: Visibility, signature: Signature) -> MethodDescriptor {
        MethodDescriptor::new("Brick\\Reflection\\Tests\\Classes\\PHP80", name, visibility).with_signature(signature)
    }

    fn export(method: &MethodDescriptor) -> String {
        export_function(FunctionRef::Method(method), Modifiers::empty()).unwrap()
    }

    #[test]
    fn test_no_params_no_return_type() {
        let m = method("noParamsNoReturnType", Visibility::Public, Signature::new());
        assert_eq!(export(&m), "public function noParamsNoReturnType()");
    }

    #[test]
    fn test_return_types() {
        let m = method("returnType", Visibility::Public, Signature::new().returns(TypeDescriptor::named("int")));
        assert_eq!(export(&m), "public function returnType(): int");

        let m = method(
            "returnNullableClassType",
            Visibility::Public,
            Signature::new().returns(TypeDescriptor::nullable("Brick\\Reflection\\Tests\\A")),
        );
        assert_eq!(export(&m), "public function returnNullableClassType(): ?\\Brick\\Reflection\\Tests\\A");

        let m = method("returnMixed", Visibility::Public, Signature::new().returns(TypeDescriptor::nullable("mixed")));
        assert_eq!(export(&m), "public function returnMixed(): mixed");
    }

    #[test]
    fn test_self_and_static_are_not_qualified() {
        let m = method(
            "selfKitchenSink",
            Visibility::Private,
            Signature::new()
                .param(ParameterDescriptor::new("a").typed(TypeDescriptor::named("self")))
                .param(ParameterDescriptor::new("b").typed(TypeDescriptor::nullable("self")))
                .param(
                    ParameterDescriptor::new("c")
                        .typed(TypeDescriptor::nullable("self"))
                        .with_default(DefaultValue::Literal(Literal::Null)),
                )
                .param(
                    ParameterDescriptor::new("d")
                        .typed(TypeDescriptor::nullable("self"))
                        .by_reference()
                        .with_default(DefaultValue::Literal(Literal::Null)),
                )
                .returns(TypeDescriptor::named("self")),
        );
        assert_eq!(
            export(&m),
            "private function selfKitchenSink(self $a, ?self $b, ?self $c = null, ?self & $d = null): self"
        );

        let m = method("returnNullableStatic", Visibility::Private, Signature::new().returns(TypeDescriptor::nullable("static")));
        assert_eq!(export(&m), "private function returnNullableStatic(): ?static");
    }

    #[test]
    fn test_union_types() {
        let m = method(
            "unionTypes",
            Visibility::Public,
            Signature::new()
                .param(ParameterDescriptor::new("a").typed(TypeDescriptor::union([
                    TypeDescriptor::named("stdClass"),
                    TypeDescriptor::named("string"),
                    TypeDescriptor::named("null"),
                ])))
                .param(ParameterDescriptor::new("b").typed(TypeDescriptor::union([
                    TypeDescriptor::named("string"),
                    TypeDescriptor::named("null"),
                ])))
                .returns(TypeDescriptor::union([
                    TypeDescriptor::named("stdClass"),
                    TypeDescriptor::named("string"),
                    TypeDescriptor::named("int"),
                    TypeDescriptor::named("null"),
                ])),
        );
        assert_eq!(
            export(&m),
            "public function unionTypes(\\stdClass|string|null $a, ?string $b): \\stdClass|string|int|null"
        );
    }

    #[test]
    fn test_dnf_types() {
        let countable_traversable = TypeDescriptor::intersection([
            TypeDescriptor::named("Countable"),
            TypeDescriptor::named("Traversable"),
        ]);
        let m = MethodDescriptor::new("PHP82", "dnfTypes", Visibility::Public)
            .with_flags(Modifiers::ABSTRACT)
            .with_signature(
                Signature::new()
                    .param(
                        ParameterDescriptor::new("foo")
                            .typed(TypeDescriptor::union([countable_traversable.clone(), TypeDescriptor::named("null")])),
                    )
                    .returns(TypeDescriptor::union([
                        countable_traversable,
                        TypeDescriptor::intersection([
                            TypeDescriptor::named("JsonSerializable"),
                            TypeDescriptor::named("Countable"),
                            TypeDescriptor::named("Stringable"),
                        ]),
                        TypeDescriptor::named("int"),
                        TypeDescriptor::named("null"),
                    ])),
            );
        assert_eq!(
            export(&m),
            "abstract public function dnfTypes((\\Countable&\\Traversable)|null $foo): \
             (\\Countable&\\Traversable)|(\\JsonSerializable&\\Countable&\\Stringable)|int|null"
        );
    }

    #[test]
    fn test_intersection_type() {
        let ty = TypeDescriptor::intersection([TypeDescriptor::named("Countable"), TypeDescriptor::named("ArrayAccess")]);
        assert_eq!(render_type(&ty).unwrap(), "\\Countable&\\ArrayAccess");
    }

    #[test]
    fn test_union_with_false() {
        let ty = TypeDescriptor::union([TypeDescriptor::named("string"), TypeDescriptor::named("false")]);
        assert_eq!(render_type(&ty).unwrap(), "string|false");
    }

    #[test]
    fn test_return_by_reference() {
        let m = method(
            "returnWithReference",
            Visibility::Public,
            Signature::new().returns_reference().returns(TypeDescriptor::named("void")),
        );
        assert_eq!(export(&m), "public function & returnWithReference(): void");
    }

    #[test]
    fn test_constant_defaults() {
        let m = method(
            "constantParams",
            Visibility::Private,
            Signature::new()
                .param(
                    ParameterDescriptor::new("a")
                        .typed(TypeDescriptor::named("string"))
                        .with_default(DefaultValue::Constant("PHP_EOL".into())),
                )
                .param(
                    ParameterDescriptor::new("b")
                        .typed(TypeDescriptor::nullable("int"))
                        .with_default(DefaultValue::Constant("Brick\\Reflection\\Tests\\Classes\\TEST".into())),
                ),
        );
        assert_eq!(
            export(&m),
            "private function constantParams(string $a = \\PHP_EOL, ?int $b = \\Brick\\Reflection\\Tests\\Classes\\TEST)"
        );
    }

    #[test]
    fn test_class_constant_default() {
        assert_eq!(render_default(&DefaultValue::Constant("self::SIZE".into())), "self::SIZE");
        assert_eq!(render_default(&DefaultValue::Constant("App\\Config::SIZE".into())), "\\App\\Config::SIZE");
    }

    #[test]
    fn test_default_null_makes_type_nullable() {
        let m = method(
            "nullableTypedParamWithDefaultNullOldSyntax",
            Visibility::Public,
            Signature::new().param(
                ParameterDescriptor::new("x")
                    .typed(TypeDescriptor::named("string"))
                    .with_default(DefaultValue::Literal(Literal::Null)),
            ),
        );
        assert_eq!(export(&m), "public function nullableTypedParamWithDefaultNullOldSyntax(?string $x = null)");

        let m = method(
            "nullableTypedParamWithDefaultValue",
            Visibility::Public,
            Signature::new().param(
                ParameterDescriptor::new("x")
                    .typed(TypeDescriptor::nullable("string"))
                    .with_default(DefaultValue::Literal(Literal::string("hello"))),
            ),
        );
        assert_eq!(export(&m), "public function nullableTypedParamWithDefaultValue(?string $x = 'hello')");
    }

    #[test]
    fn test_variadics() {
        let m = method(
            "nullableVariadicsWithReference",
            Visibility::Public,
            Signature::new()
                .param(ParameterDescriptor::new("a").typed(TypeDescriptor::named("int")))
                .param(
                    ParameterDescriptor::new("b")
                        .typed(TypeDescriptor::nullable("string"))
                        .by_reference()
                        .variadic(),
                ),
        );
        assert_eq!(export(&m), "public function nullableVariadicsWithReference(int $a, ?string & ...$b)");
    }

    #[test]
    fn test_untyped_params() {
        let m = method(
            "untypedParamWithReference",
            Visibility::Public,
            Signature::new().param(ParameterDescriptor::new("x").by_reference()),
        );
        assert_eq!(export(&m), "public function untypedParamWithReference(& $x)");
    }

    #[test]
    fn test_excluded_modifiers() {
        let m = MethodDescriptor::new("A", "kitchenSink", Visibility::Protected)
            .with_flags(Modifiers::FINAL | Modifiers::STATIC);
        let out = export_function(FunctionRef::Method(&m), Modifiers::FINAL | Modifiers::PROTECTED).unwrap();
        assert_eq!(out, "static function kitchenSink()");
    }

    #[test]
    fn test_free_function_has_no_modifiers() {
        let f = FunctionDescriptor::new(
            "Brick\\Reflection\\Tests\\reflectedParameterFunc",
            Signature::new().param(ParameterDescriptor::new("arg").typed(TypeDescriptor::named("string"))),
        );
        let out = export_function(FunctionRef::Function(&f), Modifiers::empty()).unwrap();
        assert_eq!(out, "function reflectedParameterFunc(string $arg)");
    }

    #[test]
    fn test_unknown_type_fails_loudly() {
        let m = method(
            "future",
            Visibility::Public,
            Signature::new().returns(TypeDescriptor::Unknown("ReflectionFutureType".into())),
        );
        let err = export_function(FunctionRef::Method(&m), Modifiers::empty()).unwrap_err();
        assert!(matches!(err, ReflectionError::Unsupported { .. }));
    }
}
