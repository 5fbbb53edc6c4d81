use std::sync::Arc;

use smol_str::SmolStr;

use crate::hir::{
    ClassDescriptor, FunctionRef, MethodDescriptor, Modifiers, ParameterDescriptor, PropertyDescriptor, Result,
    TypeDescriptor, class_hierarchy, class_methods, class_properties,
};

use super::cache::ReflectionCache;
use super::doc_types::{ParameterTypes, parse_param_annotations, parse_var_annotation, structural_types};
use super::signature::{export_function, export_parameters};

/// Where member type information comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeHintStrategy {
    /// Declared types first, doc-comment annotations when there are none.
    #[default]
    Structural,
    /// Doc-comment annotations only; declared types are ignored.
    AnnotationsOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolsOptions {
    pub type_hints: TypeHintStrategy,
}

/// Entry point for hierarchy, naming, export and documented-type queries.
///
/// Per-function results are memoized in an owned [`ReflectionCache`]; create
/// a fresh instance, or call [`ReflectionCache::clear`], to start over.
#[derive(Debug, Default)]
pub struct ReflectionTools {
    options: ToolsOptions,
    cache: ReflectionCache,
}

impl ReflectionTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ToolsOptions) -> Self {
        Self {
            options,
            cache: ReflectionCache::new(),
        }
    }

    pub fn options(&self) -> ToolsOptions {
        self.options
    }

    pub fn cache(&self) -> &ReflectionCache {
        &self.cache
    }

    /// Ancestors of `class`, root first, ending with `class`.
    pub fn class_hierarchy<'a>(&self, class: &'a ClassDescriptor) -> Vec<&'a ClassDescriptor> {
        class_hierarchy(class)
    }

    pub fn class_methods<'a>(&self, class: &'a ClassDescriptor) -> Vec<&'a MethodDescriptor> {
        class_methods(class)
    }

    pub fn class_properties<'a>(&self, class: &'a ClassDescriptor) -> Vec<&'a PropertyDescriptor> {
        class_properties(class)
    }

    /// `Ns\Class::method` for methods, the function name otherwise.
    pub fn function_name(&self, function: FunctionRef<'_>) -> String {
        match function {
            FunctionRef::Method(method) => format!("{}::{}", method.declaring_class, method.name),
            FunctionRef::Function(function) => function.name.to_string(),
        }
    }

    pub fn export_function(&self, function: FunctionRef<'_>, exclude: Modifiers) -> Result<String> {
        export_function(function, exclude)
    }

    pub fn export_function_parameters(&self, function: FunctionRef<'_>) -> Result<String> {
        export_parameters(function)
    }

    /// Types documented with `@param` on `function`, by parameter name.
    pub fn function_parameter_types(&self, function: FunctionRef<'_>) -> Arc<ParameterTypes> {
        self.cache.parameter_types_or_insert_with(function.key(), || {
            function
                .doc_comment()
                .map(parse_param_annotations)
                .unwrap_or_default()
        })
    }

    /// Types of one parameter of `function`.
    pub fn parameter_types(&self, function: FunctionRef<'_>, parameter: &ParameterDescriptor) -> Vec<SmolStr> {
        if let Some(types) = self.structural(parameter.ty.as_ref()) {
            return types;
        }
        self.function_parameter_types(function)
            .get(parameter.name.as_str())
            .cloned()
            .unwrap_or_default()
    }

    pub fn property_types(&self, property: &PropertyDescriptor) -> Vec<SmolStr> {
        if let Some(types) = self.structural(property.ty.as_ref()) {
            return types;
        }
        property
            .doc_comment
            .as_deref()
            .map(parse_var_annotation)
            .unwrap_or_default()
    }

    /// The single fully-qualified class a property holds, if that is all
    /// it can hold.
    pub fn property_class(&self, property: &PropertyDescriptor) -> Option<String> {
        match self.property_types(property).as_slice() {
            [single] => single.strip_prefix('\\').map(str::to_string),
            _ => None,
        }
    }

    fn structural(&self, ty: Option<&TypeDescriptor>) -> Option<Vec<SmolStr>> {
        match self.options.type_hints {
            TypeHintStrategy::Structural => ty.and_then(structural_types),
            TypeHintStrategy::AnnotationsOnly => None,
        }
    }
}
