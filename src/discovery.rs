//! Discovery Module for the component docgen
//!
//! Finds every component definition in a module and picks the one the
//! module exports. Export surfaces are the top-level ES module exports plus
//! the CommonJS `module.exports` / `exports.name` assignments.

use oxc_ast::ast::{
    ArrowFunctionExpression, AssignmentTarget, CallExpression, ChainElement, Class, Declaration,
    ExportDefaultDeclarationKind, Expression, Function, ModuleExportName, Statement,
};
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::operator::AssignmentOperator;
use oxc_syntax::scope::ScopeFlags;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{DocgenError, Result};
use crate::node::{Node, NodeKey};
use crate::parse::SourceModule;
use crate::scope::{export_name, reference_symbol};

// ═══════════════════════════════════════════════════════════════════════════════
// CANDIDATES
// ═══════════════════════════════════════════════════════════════════════════════

/// Collects component definitions in source order. A recognized definition
/// is not searched further, so helpers nested inside it are not reported
/// separately.
struct CandidateCollector<'m, 'a> {
    module: &'m SourceModule<'a>,
    found: Vec<Node<'a>>,
    seen: HashSet<NodeKey>,
}

impl<'m, 'a> CandidateCollector<'m, 'a> {
    fn record(&mut self, node: Node<'a>) {
        if self.seen.insert(node.key()) {
            self.found.push(node);
        }
    }
}

impl<'m, 'a> Visit<'a> for CandidateCollector<'m, 'a> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        let call = self.alloc(call);
        if self.module.is_create_class_call(call) {
            if let Some(spec) = self.module.create_class_spec(call) {
                self.record(spec);
                return;
            }
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        let class = self.alloc(class);
        if self.module.is_component_class(class) {
            self.record(Node::Class(class));
        } else {
            walk::walk_class(self, class);
        }
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        let func = self.alloc(func);
        if self.module.is_stateless_component(Node::Function(func)) {
            self.record(Node::Function(func));
        } else {
            walk::walk_function(self, func, flags);
        }
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        let arrow = self.alloc(arrow);
        if self.module.is_stateless_component(Node::Arrow(arrow)) {
            self.record(Node::Arrow(arrow));
        } else {
            walk::walk_arrow_function_expression(self, arrow);
        }
    }
}

/// Every component definition in `module`, in source order.
pub fn find_all_component_definitions<'a>(module: &SourceModule<'a>) -> Vec<Node<'a>> {
    let mut collector = CandidateCollector {
        module,
        found: Vec::new(),
        seen: HashSet::new(),
    };
    collector.visit_program(module.program());
    debug!("found {} component definition(s)", collector.found.len());
    collector.found
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

/// The component definition reachable from the module's exports.
///
/// - one exported definition: that definition
/// - several distinct exported definitions: [`DocgenError::AmbiguousExport`]
/// - nothing exported at all: the only definition in the module, if there
///   is exactly one
/// - only non-components exported: `None`
pub fn find_exported_component_definition<'a>(
    module: &SourceModule<'a>,
) -> Result<Option<Node<'a>>> {
    let surfaces = export_surfaces(module);
    let has_exports = !surfaces.is_empty();
    let mut exported: Vec<Node<'a>> = Vec::new();
    for surface in surfaces {
        if let Some(definition) = module.exported_definition(surface) {
            if !exported.iter().any(|known| known.same(&definition)) {
                exported.push(definition);
            }
        }
    }
    debug!("{} exported component definition(s)", exported.len());

    match exported.len() {
        0 if has_exports => Ok(None),
        0 => {
            let mut candidates = find_all_component_definitions(module);
            if candidates.len() == 1 {
                Ok(candidates.pop())
            } else {
                Ok(None)
            }
        }
        1 => Ok(exported.pop()),
        count => Err(DocgenError::AmbiguousExport { count }),
    }
}

/// Values made visible to importers, in source order. Only top-level
/// statements are considered; re-exports from other modules are skipped.
pub fn export_surfaces<'a>(module: &SourceModule<'a>) -> Vec<Node<'a>> {
    let mut surfaces = Vec::new();
    for stmt in &module.program().body {
        match stmt {
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    surfaces.push(Node::Function(func))
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    surfaces.push(Node::Class(class))
                }
                other => {
                    if let Some(expr) = other.as_expression() {
                        surfaces.push(Node::from_expression(expr));
                    }
                }
            },
            Statement::ExportNamedDeclaration(export) => {
                match &export.declaration {
                    Some(Declaration::VariableDeclaration(decl)) => {
                        surfaces.extend(decl.declarations.iter().map(Node::Declarator));
                    }
                    Some(Declaration::FunctionDeclaration(func)) => surfaces.push(Node::Function(func)),
                    Some(Declaration::ClassDeclaration(class)) => surfaces.push(Node::Class(class)),
                    _ => {}
                }
                if export.source.is_none() {
                    for specifier in &export.specifiers {
                        if let Some(value) = local_export_value(module, &specifier.local) {
                            surfaces.push(value);
                        }
                    }
                }
            }
            Statement::ExpressionStatement(expr_stmt) => {
                if let Expression::AssignmentExpression(assign) = &expr_stmt.expression {
                    if assign.operator == AssignmentOperator::Assign
                        && is_commonjs_export(&assign.left)
                    {
                        surfaces.push(Node::from_expression(&assign.right));
                    }
                }
            }
            _ => {}
        }
    }
    surfaces
}

/// `export {Foo}` / `export {Foo as Bar}`: the value bound to the local name.
fn local_export_value<'a>(
    module: &SourceModule<'a>,
    local: &'a ModuleExportName<'a>,
) -> Option<Node<'a>> {
    let symbol = match local {
        ModuleExportName::IdentifierReference(ident) => reference_symbol(module.scoping(), ident),
        other => module.index().top_level_symbol(export_name(other)),
    }?;
    module.resolve_symbol(symbol)
}

fn is_identifier(expr: &Expression<'_>, name: &str) -> bool {
    matches!(expr.without_parentheses(), Expression::Identifier(ident) if ident.name == name)
}

/// `module.exports`
fn is_module_exports(expr: &Expression<'_>) -> bool {
    match expr.without_parentheses() {
        Expression::StaticMemberExpression(member) => {
            member.property.name == "exports" && is_identifier(&member.object, "module")
        }
        _ => false,
    }
}

/// `module.exports = `, `exports.name = ` or `module.exports.name = `
fn is_commonjs_export(target: &AssignmentTarget<'_>) -> bool {
    let AssignmentTarget::StaticMemberExpression(member) = target else {
        return false;
    };
    (member.property.name == "exports" && is_identifier(&member.object, "module"))
        || is_identifier(&member.object, "exports")
        || is_module_exports(&member.object)
}

impl<'a> SourceModule<'a> {
    /// Object literal passed to a factory call, after resolution.
    pub fn create_class_spec(&self, call: &'a CallExpression<'a>) -> Option<Node<'a>> {
        let argument = call.arguments.first()?.as_expression()?;
        match self.resolve_to_value(Node::from_expression(argument)) {
            spec @ Node::Object(_) => Some(spec),
            _ => None,
        }
    }

    /// `node` itself as a component definition, if it is one.
    pub fn resolve_definition(&self, node: Node<'a>) -> Option<Node<'a>> {
        match node {
            Node::Class(class) if self.is_component_class(class) => Some(node),
            Node::Function(_) | Node::Arrow(_) if self.is_stateless_component(node) => Some(node),
            Node::Expression(Expression::CallExpression(call)) if self.is_create_class_call(call) => {
                self.create_class_spec(call)
            }
            _ => None,
        }
    }

    /// Definition behind an export surface. Calls that are not factory
    /// calls are treated as wrappers (`connect(mapState)(Foo)`,
    /// `memo(Foo)`) and unwrapped through their last argument.
    fn exported_definition(&self, surface: Node<'a>) -> Option<Node<'a>> {
        let mut value = self.resolve_to_value(surface);
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(value.key()) {
                return None;
            }
            if let Some(definition) = self.resolve_definition(value) {
                return Some(definition);
            }
            let Node::Expression(expr) = value else {
                return None;
            };
            let call = wrapper_call(expr)?;
            let wrapped = call.arguments.last()?.as_expression()?;
            value = self.resolve_to_value(Node::from_expression(wrapped));
        }
    }
}

/// `wrap(x)` or `wrap?.(x)`.
fn wrapper_call<'a>(expr: &'a Expression<'a>) -> Option<&'a CallExpression<'a>> {
    match expr {
        Expression::CallExpression(call) => Some(call),
        Expression::ChainExpression(chain) => match &chain.expression {
            ChainElement::CallExpression(call) => Some(call),
            _ => None,
        },
        _ => None,
    }
}
