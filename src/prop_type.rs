//! Prop type descriptors.
//!
//! Classifies a validator expression (`PropTypes.bool`,
//! `PropTypes.shape({...}).isRequired`, a hand-written function) into a
//! [`TypeDescriptor`]. Classification never fails: anything unrecognized is
//! kept verbatim as `custom`.

use indexmap::IndexMap;
use oxc_ast::ast::{Argument, Expression, ObjectExpression, ObjectPropertyKind};
use serde::Serialize;
use std::collections::HashSet;

use crate::node::{is_literal, property_name, AccessKey, Node, NodeKey};
use crate::parse::SourceModule;
use crate::resolve::member_chain;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum TypeDescriptor {
    Array,
    Bool,
    Func,
    Number,
    Object,
    String,
    Any,
    Element,
    Node,
    Symbol,
    Enum { value: Vec<RawValue> },
    Union { value: Vec<TypeDescriptor> },
    ArrayOf { value: Box<TypeDescriptor> },
    ObjectOf { value: Box<TypeDescriptor> },
    Shape { value: IndexMap<String, ShapeField> },
    InstanceOf { value: String },
    Custom { raw: String },
}

/// Source text of an expression plus whether it has to be evaluated
/// (anything but a literal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawValue {
    pub value: String,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeField {
    #[serde(flatten)]
    pub kind: TypeDescriptor,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TypeDescriptor {
    fn simple(name: &str) -> Option<TypeDescriptor> {
        Some(match name {
            "array" => TypeDescriptor::Array,
            "bool" => TypeDescriptor::Bool,
            "func" => TypeDescriptor::Func,
            "number" => TypeDescriptor::Number,
            "object" => TypeDescriptor::Object,
            "string" => TypeDescriptor::String,
            "any" => TypeDescriptor::Any,
            "element" => TypeDescriptor::Element,
            "node" => TypeDescriptor::Node,
            "symbol" => TypeDescriptor::Symbol,
            _ => return None,
        })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TypeDescriptor::Custom { .. })
    }
}

/// Descriptor for the validator expression `expr`.
pub fn get_prop_type<'a>(module: &SourceModule<'a>, expr: &'a Expression<'a>) -> TypeDescriptor {
    Extractor {
        module,
        visited: HashSet::new(),
    }
    .descriptor(expr)
}

/// `X.isRequired` or `X["isRequired"]` anywhere past the root of the chain.
pub fn is_required_prop_type(expr: &Expression<'_>) -> bool {
    member_chain(expr)
        .iter()
        .any(|link| !link.is_root && link.name == Some("isRequired"))
}

struct Extractor<'m, 'a> {
    module: &'m SourceModule<'a>,
    /// expressions on the active classification chain
    visited: HashSet<NodeKey>,
}

impl<'m, 'a> Extractor<'m, 'a> {
    /// Only the expressions currently being classified are guarded, so a
    /// validator variable used twice is followed both times.
    fn descriptor(&mut self, expr: &'a Expression<'a>) -> TypeDescriptor {
        let original = Node::Expression(expr);
        let raw = self.module.text(original);
        let key = original.key();
        if !self.visited.insert(key) {
            return TypeDescriptor::Custom { raw };
        }
        let descriptor = self.resolve_and_classify(expr, raw);
        self.visited.remove(&key);
        descriptor
    }

    fn resolve_and_classify(&mut self, expr: &'a Expression<'a>, raw: String) -> TypeDescriptor {
        let node = Node::from_expression(expr);
        let resolved = self.module.resolve_to_value(node);
        if !resolved.same(&node) {
            match resolved {
                Node::Expression(target) => return self.descriptor(target),
                // `var {bool} = PropTypes`
                Node::Access(access) => {
                    if let AccessKey::Name(name) = access.property {
                        if let Some(simple) = TypeDescriptor::simple(name) {
                            return simple;
                        }
                    }
                }
                _ => {}
            }
        }
        self.classify(expr, raw)
    }

    fn classify(&mut self, expr: &'a Expression<'a>, raw: String) -> TypeDescriptor {
        for link in member_chain(expr) {
            let Some(name) = link.name else {
                continue;
            };
            if let Some(simple) = TypeDescriptor::simple(name) {
                return simple;
            }
            if let Some(arguments) = link.arguments {
                if let Some(descriptor) = self.complex(name, arguments) {
                    return descriptor;
                }
            }
        }
        TypeDescriptor::Custom { raw }
    }

    /// Validators taking an argument. `None` when `name` is not one of them
    /// or the argument has an unexpected shape.
    fn complex(&mut self, name: &str, arguments: &'a [Argument<'a>]) -> Option<TypeDescriptor> {
        let argument = arguments.first()?.as_expression()?;
        match name {
            "oneOf" => {
                let elements = self.array_elements(argument)?;
                let value = elements
                    .into_iter()
                    .map(|element| RawValue {
                        value: self.module.text(Node::Expression(element)),
                        computed: !is_literal(element),
                    })
                    .collect();
                Some(TypeDescriptor::Enum { value })
            }
            "oneOfType" => {
                let elements = self.array_elements(argument)?;
                let value = elements
                    .into_iter()
                    .map(|element| self.descriptor(element))
                    .collect();
                Some(TypeDescriptor::Union { value })
            }
            "arrayOf" => Some(TypeDescriptor::ArrayOf {
                value: Box::new(self.descriptor(argument)),
            }),
            "objectOf" => Some(TypeDescriptor::ObjectOf {
                value: Box::new(self.descriptor(argument)),
            }),
            "instanceOf" => Some(TypeDescriptor::InstanceOf {
                value: self.module.text(Node::Expression(argument)),
            }),
            "shape" => match self.module.resolve_to_value(Node::from_expression(argument)) {
                Node::Object(object) => Some(TypeDescriptor::Shape {
                    value: self.shape_fields(object),
                }),
                _ => None,
            },
            _ => None,
        }
    }

    fn array_elements(&self, argument: &'a Expression<'a>) -> Option<Vec<&'a Expression<'a>>> {
        match self.module.resolve_to_value(Node::from_expression(argument)) {
            Node::Expression(Expression::ArrayExpression(array)) => Some(
                array
                    .elements
                    .iter()
                    .filter_map(|element| element.as_expression())
                    .collect(),
            ),
            _ => None,
        }
    }

    fn shape_fields(&mut self, object: &'a ObjectExpression<'a>) -> IndexMap<String, ShapeField> {
        let mut fields = IndexMap::new();
        for property in &object.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = property else {
                continue;
            };
            let Some(name) = property_name(&prop.key, prop.computed) else {
                continue;
            };
            let field = ShapeField {
                kind: self.descriptor(&prop.value),
                required: is_required_prop_type(&prop.value),
                description: self.module.docblock_before(prop.span.start),
            };
            fields.insert(name, field);
        }
        fields
    }
}
