//! Documentation handlers.
//!
//! Each handler reads one aspect of a component definition and records it
//! on the [`Documentation`]. Handlers never fail: a missing or unexpected
//! shape leaves the corresponding fields untouched.

use oxc_ast::ast::{Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind};
use oxc_span::GetSpan;
use std::collections::HashSet;
use tracing::trace;

use crate::component::return_values;
use crate::document::Documentation;
use crate::node::{is_literal, property_name, Node, NodeKey};
use crate::parse::SourceModule;
use crate::prop_type::{get_prop_type, is_required_prop_type, RawValue, TypeDescriptor};

/// Extends the documentation of one definition.
///
/// Any `Fn(&mut Documentation, Node, &SourceModule)` is a handler.
pub trait Handler: Send + Sync {
    fn handle<'a>(
        &self,
        documentation: &mut Documentation,
        definition: Node<'a>,
        module: &SourceModule<'a>,
    );
}

impl<F> Handler for F
where
    F: for<'a> Fn(&mut Documentation, Node<'a>, &SourceModule<'a>) + Send + Sync,
{
    fn handle<'a>(
        &self,
        documentation: &mut Documentation,
        definition: Node<'a>,
        module: &SourceModule<'a>,
    ) {
        self(documentation, definition, module)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DESCRIPTION & NAME
// ═══════════════════════════════════════════════════════════════════════════════

/// Docblock of the definition, or the empty string.
pub fn component_docblock_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let description = definition_docblock(module, definition).unwrap_or_default();
    documentation.set_description(description);
}

fn definition_docblock<'a>(module: &SourceModule<'a>, definition: Node<'a>) -> Option<String> {
    if let Node::Class(class) = definition {
        if let (Some(first), Some(last)) = (class.decorators.first(), class.decorators.last()) {
            let docblock = module
                .docblock_within(last.span.end, class.body.span.start)
                .or_else(|| module.docblock_before(first.span.start));
            if docblock.is_some() {
                return docblock;
            }
        }
    }
    // `var Foo = React.createClass({...})` documents the statement, and an
    // export wrapper is itself the enclosing statement
    let anchor = match module.enclosing_statement(definition) {
        Some(stmt) => stmt.span().start,
        None => definition.span().start,
    };
    module.docblock_before(anchor)
}

/// `displayName` when it resolves to a string literal.
pub fn display_name_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let Some(value) = module.get_member_value(definition, "displayName") else {
        return;
    };
    if let Node::Expression(Expression::StringLiteral(name)) = module.resolve_to_value(value) {
        documentation.set_display_name(name.value.as_str());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULT VALUES
// ═══════════════════════════════════════════════════════════════════════════════

/// Default values from `defaultProps`, or from the object returned by
/// `getDefaultProps`.
pub fn default_props_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let Some(value) = module.get_member_value(definition, "defaultProps") else {
        return;
    };
    let object = match module.resolve_to_value(value) {
        Node::Object(object) => object,
        function @ (Node::Function(_) | Node::Arrow(_)) => {
            let returned = return_values(function).into_iter().find_map(|returned| {
                match module.resolve_to_value(Node::from_expression(returned)) {
                    Node::Object(object) => Some(object),
                    _ => None,
                }
            });
            match returned {
                Some(object) => object,
                None => return,
            }
        }
        other => {
            trace!("defaultProps is not an object: {}", module.text(other));
            return;
        }
    };

    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(prop) = property else {
            continue;
        };
        let Some(name) = property_name(&prop.key, prop.computed) else {
            continue;
        };
        let value = default_value(module, &prop.value);
        documentation.prop_descriptor(&name).default_value = Some(value);
    }
}

/// Literals are kept verbatim. Anything else is resolved first; imported
/// values are shown by their local name.
fn default_value<'a>(module: &SourceModule<'a>, expr: &'a Expression<'a>) -> RawValue {
    if is_literal(expr) {
        return RawValue {
            value: module.text(Node::Expression(expr)),
            computed: false,
        };
    }
    match module.resolve_to_value(Node::from_expression(expr)) {
        Node::Import(binding) => RawValue {
            value: binding.local.to_string(),
            computed: true,
        },
        resolved => RawValue {
            value: module.text(resolved),
            computed: matches!(
                resolved,
                Node::Access(_)
                    | Node::Expression(
                        Expression::CallExpression(_)
                            | Expression::StaticMemberExpression(_)
                            | Expression::ComputedMemberExpression(_)
                            | Expression::Identifier(_)
                    )
            ),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROP TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// The `propTypes` member resolved to an object literal.
fn prop_types_object<'a>(
    module: &SourceModule<'a>,
    definition: Node<'a>,
) -> Option<&'a ObjectExpression<'a>> {
    let value = module.get_member_value(definition, "propTypes")?;
    match module.resolve_to_value(value) {
        Node::Object(object) => Some(object),
        _ => None,
    }
}

/// Visit every real property of `object`, following spreads that resolve to
/// object literals.
fn each_prop_type<'a>(
    module: &SourceModule<'a>,
    object: &'a ObjectExpression<'a>,
    visited: &mut HashSet<NodeKey>,
    visit: &mut dyn FnMut(String, &'a ObjectProperty<'a>),
) {
    if !visited.insert(Node::Object(object).key()) {
        return;
    }
    for property in &object.properties {
        match property {
            ObjectPropertyKind::ObjectProperty(prop) => {
                if let Some(name) = property_name(&prop.key, prop.computed) {
                    visit(name, prop);
                }
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                if let Node::Object(nested) =
                    module.resolve_to_value(Node::from_expression(&spread.argument))
                {
                    each_prop_type(module, nested, visited, visit);
                }
            }
        }
    }
}

/// Type and requiredness of every prop in `propTypes`.
pub fn prop_type_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let Some(object) = prop_types_object(module, definition) else {
        return;
    };
    each_prop_type(module, object, &mut HashSet::new(), &mut |name, prop| {
        let descriptor = documentation.prop_descriptor(&name);
        if module.is_prop_types_expression(&prop.value) {
            let kind = get_prop_type(module, &prop.value);
            descriptor.required = !kind.is_custom() && is_required_prop_type(&prop.value);
            descriptor.type_descriptor = Some(kind);
        } else {
            descriptor.type_descriptor = Some(TypeDescriptor::Custom {
                raw: module.text(Node::Expression(&prop.value)),
            });
            descriptor.required = false;
        }
    });
}

/// Modules whose prop types are merged in: spreads inside `propTypes`, or
/// `propTypes` itself when it is not an object literal.
pub fn prop_type_composition_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let Some(value) = module.get_member_value(definition, "propTypes") else {
        return;
    };
    match module.resolve_to_value(value) {
        Node::Object(object) => {
            for property in &object.properties {
                if let ObjectPropertyKind::SpreadProperty(spread) = property {
                    let argument = module.resolve_to_value(Node::from_expression(&spread.argument));
                    if let Some(name) = module.resolve_to_module(argument) {
                        documentation.add_composes(name);
                    }
                }
            }
        }
        other => {
            if let Some(name) = module.resolve_to_module(other) {
                documentation.add_composes(name);
            }
        }
    }
}

/// Docblock above each prop type, or the empty string.
pub fn prop_docblock_handler<'a>(
    documentation: &mut Documentation,
    definition: Node<'a>,
    module: &SourceModule<'a>,
) {
    let Some(object) = prop_types_object(module, definition) else {
        return;
    };
    each_prop_type(module, object, &mut HashSet::new(), &mut |name, prop| {
        let description = module.docblock_before(prop.span.start).unwrap_or_default();
        documentation.prop_descriptor(&name).description = Some(description);
    });
}

impl<'a> SourceModule<'a> {
    /// `expr` comes from the component library or a prop-types module.
    pub fn is_prop_types_expression(&self, expr: &'a Expression<'a>) -> bool {
        self.resolve_to_module(Node::from_expression(expr))
            .is_some_and(|name| self.options().is_prop_types_module(&name))
    }
}
