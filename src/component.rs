//! Component recognizers
//!
//! Structural tests deciding whether a node defines a component: a factory
//! call with a spec object, a class, or a function returning an element.
//! Library provenance is established through value resolution, so local
//! aliases of the library (`var R = require('react')`) are recognized.

use oxc_ast::ast::{
    ArrowFunctionExpression, CallExpression, Class, ClassElement, Expression, Function,
    MethodDefinitionKind, Statement,
};
use oxc_ast::AstKind;
use oxc_ast_visit::Visit;
use oxc_syntax::scope::ScopeFlags;
use std::collections::HashSet;

use crate::node::{property_name, AccessKey, ImportedName, Node, NodeKey};
use crate::parse::SourceModule;

const BASE_CLASSES: [&str; 2] = ["Component", "PureComponent"];

impl<'a> SourceModule<'a> {
    /// `React.createClass(spec)`, or a call to the export of a class factory
    /// module (`createReactClass(spec)`).
    pub fn is_create_class_call(&self, call: &'a CallExpression<'a>) -> bool {
        if self.is_library_call(call, "createClass") {
            return true;
        }
        let callee = call.callee.without_parentheses();
        matches!(callee, Expression::Identifier(_))
            && self
                .resolve_to_module(Node::from_expression(callee))
                .is_some_and(|name| self.options().is_class_factory_module(&name))
    }

    /// `React.createElement(...)` or an aliased `createElement` from the library.
    pub fn is_create_element_call(&self, call: &'a CallExpression<'a>) -> bool {
        self.is_library_call(call, "createElement")
    }

    fn is_library_call(&self, call: &'a CallExpression<'a>, method: &str) -> bool {
        match call.callee.without_parentheses() {
            Expression::StaticMemberExpression(member) => {
                member.property.name == method && self.is_library_value(Node::from_expression(&member.object))
            }
            callee @ Expression::Identifier(_) => {
                self.is_library_export(self.resolve_to_value(Node::from_expression(callee)), method)
            }
            _ => false,
        }
    }

    fn is_library_value(&self, node: Node<'a>) -> bool {
        self.resolve_to_module(node)
            .is_some_and(|name| self.options().is_component_module(&name))
    }

    /// `node` is the library export `name`, reached through a member access,
    /// a destructuring pattern or a named import.
    fn is_library_export(&self, node: Node<'a>, name: &str) -> bool {
        match node {
            Node::Import(binding) => {
                binding.imported == ImportedName::Named(name)
                    && self
                        .options()
                        .is_component_module(binding.declaration.source.value.as_str())
            }
            Node::Access(access) => {
                access.property == AccessKey::Name(name) && self.is_library_value(access.object)
            }
            Node::Expression(Expression::StaticMemberExpression(member)) => {
                member.property.name == name && self.is_library_value(Node::from_expression(&member.object))
            }
            _ => false,
        }
    }

    /// A class with an instance `render` method, or one extending the
    /// library's `Component`/`PureComponent`.
    pub fn is_component_class(&self, class: &'a Class<'a>) -> bool {
        if has_render_method(class) {
            return true;
        }
        let Some(super_class) = &class.super_class else {
            return false;
        };
        let base = self.resolve_to_value(Node::from_expression(super_class));
        BASE_CLASSES
            .iter()
            .any(|name| self.is_library_export(base, name))
    }

    /// A function or arrow whose own return values are elements, directly or
    /// through conditionals, logical operators, stored references or calls
    /// to helpers that return elements.
    pub fn is_stateless_component(&self, node: Node<'a>) -> bool {
        node.is_function_like() && self.returns_element(node, &mut HashSet::new())
    }

    fn returns_element(&self, function: Node<'a>, visited: &mut HashSet<NodeKey>) -> bool {
        if !visited.insert(function.key()) {
            return false;
        }
        return_values(function)
            .into_iter()
            .any(|value| self.is_element_value(value, visited))
    }

    fn is_element_value(&self, expr: &'a Expression<'a>, visited: &mut HashSet<NodeKey>) -> bool {
        let expr = expr.without_parentheses();
        if !visited.insert(Node::Expression(expr).key()) {
            return false;
        }
        match expr {
            Expression::JSXElement(_) | Expression::JSXFragment(_) => true,
            Expression::ConditionalExpression(cond) => {
                self.is_element_value(&cond.consequent, visited)
                    || self.is_element_value(&cond.alternate, visited)
            }
            Expression::LogicalExpression(logical) => {
                self.is_element_value(&logical.left, visited)
                    || self.is_element_value(&logical.right, visited)
            }
            Expression::SequenceExpression(seq) => seq
                .expressions
                .last()
                .is_some_and(|last| self.is_element_value(last, visited)),
            Expression::CallExpression(call) => {
                if self.is_create_element_call(call) {
                    return true;
                }
                let callee = match call.callee.without_parentheses() {
                    callee @ Expression::Identifier(_) => {
                        Some(self.resolve_to_value(Node::from_expression(callee)))
                    }
                    Expression::StaticMemberExpression(_) => self.resolve_member_path(&call.callee),
                    _ => None,
                };
                match callee {
                    Some(helper) if helper.is_function_like() => self.returns_element(helper, visited),
                    _ => false,
                }
            }
            Expression::Identifier(_) => match self.resolve_to_value(Node::Expression(expr)) {
                Node::Expression(value) => self.is_element_value(value, visited),
                _ => false,
            },
            _ => false,
        }
    }
}

fn has_render_method(class: &Class<'_>) -> bool {
    class.body.body.iter().any(|element| match element {
        ClassElement::MethodDefinition(method) => {
            !method.r#static
                && method.kind == MethodDefinitionKind::Method
                && property_name(&method.key, method.computed).as_deref() == Some("render")
        }
        _ => false,
    })
}

/// Expressions returned by `function` itself; returns inside nested
/// functions and classes belong to those. An expression-bodied arrow
/// returns its body.
pub fn return_values<'a>(function: Node<'a>) -> Vec<&'a Expression<'a>> {
    let mut collector = ReturnCollector { values: Vec::new() };
    match function {
        Node::Function(func) => {
            if let Some(body) = &func.body {
                collector.visit_function_body(body);
            }
        }
        Node::Arrow(arrow) if arrow.expression => {
            if let Some(Statement::ExpressionStatement(stmt)) = arrow.body.statements.first() {
                collector.values.push(&stmt.expression);
            }
        }
        Node::Arrow(arrow) => collector.visit_function_body(&arrow.body),
        _ => {}
    }
    collector.values
}

struct ReturnCollector<'a> {
    values: Vec<&'a Expression<'a>>,
}

impl<'a> Visit<'a> for ReturnCollector<'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        if let AstKind::ReturnStatement(ret) = kind {
            if let Some(argument) = &ret.argument {
                self.values.push(argument);
            }
        }
    }

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _arrow: &ArrowFunctionExpression<'a>) {}

    fn visit_class(&mut self, _class: &Class<'a>) {}
}
