use crate::node::{property_name, ImportBinding, ImportedName, Node, NodeKey};
use oxc_ast::ast::{
    AssignmentExpression, AssignmentTarget, BindingIdentifier, BindingPattern, Class, Expression,
    Function, IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName, Program,
    Statement, VariableDeclarator,
};
use oxc_ast::AstKind;
use oxc_ast_visit::{walk, Visit};
use oxc_semantic::Scoping;
use oxc_syntax::operator::AssignmentOperator;
use oxc_syntax::symbol::SymbolId;
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING SITES
// ═══════════════════════════════════════════════════════════════════════════════

/// Where a symbol was declared, as far as value resolution cares.
/// Parameters and catch bindings are absent: references to them stay put.
#[derive(Debug, Clone)]
pub enum BindingSite<'a> {
    /// `path` locates the identifier inside the declarator's pattern.
    Variable {
        declarator: &'a VariableDeclarator<'a>,
        path: Vec<PatternStep>,
    },
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Import(ImportBinding<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternStep {
    Key(String),
    Index(usize),
    /// `...rest` capture
    Rest,
    /// computed key without a static name
    Opaque,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCOPE INDEX
// ═══════════════════════════════════════════════════════════════════════════════

/// Module-wide tables built in one traversal: parent links, binding sites
/// per symbol, and plain `name = value` assignments per symbol.
#[derive(Debug, Default)]
pub struct ScopeIndex<'a> {
    parents: HashMap<NodeKey, Node<'a>>,
    bindings: HashMap<SymbolId, BindingSite<'a>>,
    assignments: HashMap<SymbolId, Vec<&'a Expression<'a>>>,
    top_level: HashMap<String, SymbolId>,
}

impl<'a> ScopeIndex<'a> {
    pub fn build(program: &'a Program<'a>, scoping: &Scoping) -> Self {
        let mut builder = IndexBuilder {
            index: ScopeIndex::default(),
            stack: Vec::new(),
            scoping,
            depth: 0,
        };
        builder.visit_program(program);
        builder.index
    }

    pub fn parent(&self, node: Node<'a>) -> Option<Node<'a>> {
        self.parents.get(&node.key()).copied()
    }

    pub fn binding(&self, symbol: SymbolId) -> Option<&BindingSite<'a>> {
        self.bindings.get(&symbol)
    }

    pub fn assignments(&self, symbol: SymbolId) -> &[&'a Expression<'a>] {
        self.assignments
            .get(&symbol)
            .map(|values| values.as_slice())
            .unwrap_or(&[])
    }

    /// Symbol declared under `name` outside of any function or class body.
    pub fn top_level_symbol(&self, name: &str) -> Option<SymbolId> {
        self.top_level.get(name).copied()
    }
}

pub fn reference_symbol(scoping: &Scoping, ident: &IdentifierReference<'_>) -> Option<SymbolId> {
    let reference_id = ident.reference_id.get()?;
    scoping.get_reference(reference_id).symbol_id()
}

pub fn export_name<'a>(name: &'a ModuleExportName<'a>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.as_str(),
        ModuleExportName::IdentifierReference(id) => id.name.as_str(),
        ModuleExportName::StringLiteral(lit) => lit.value.as_str(),
    }
}

struct IndexBuilder<'a, 's> {
    index: ScopeIndex<'a>,
    stack: Vec<Node<'a>>,
    scoping: &'s Scoping,
    /// function/class nesting
    depth: usize,
}

impl<'a, 's> IndexBuilder<'a, 's> {
    fn enter(&mut self, node: Node<'a>) {
        if let Some(parent) = self.stack.last() {
            self.index.parents.insert(node.key(), *parent);
        }
        self.stack.push(node);
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn bind(&mut self, id: &BindingIdentifier<'a>, site: BindingSite<'a>) {
        let Some(symbol) = id.symbol_id.get() else {
            return;
        };
        if self.depth == 0 {
            self.index.top_level.insert(id.name.to_string(), symbol);
        }
        match self.index.bindings.get(&symbol) {
            // `var x; var x = value;` keeps the initialized declarator
            Some(BindingSite::Variable { declarator, .. }) if declarator.init.is_none() => {
                self.index.bindings.insert(symbol, site);
            }
            Some(_) => {}
            None => {
                self.index.bindings.insert(symbol, site);
            }
        }
    }

    fn collect_pattern(
        &mut self,
        declarator: &'a VariableDeclarator<'a>,
        pattern: &'a BindingPattern<'a>,
        path: &mut Vec<PatternStep>,
    ) {
        match pattern {
            BindingPattern::BindingIdentifier(id) => {
                let site = BindingSite::Variable {
                    declarator,
                    path: path.clone(),
                };
                self.bind(id, site);
            }
            BindingPattern::ObjectPattern(obj) => {
                for prop in &obj.properties {
                    path.push(match property_name(&prop.key, prop.computed) {
                        Some(name) => PatternStep::Key(name),
                        None => PatternStep::Opaque,
                    });
                    self.collect_pattern(declarator, &prop.value, path);
                    path.pop();
                }
                if let Some(rest) = &obj.rest {
                    path.push(PatternStep::Rest);
                    self.collect_pattern(declarator, &rest.argument, path);
                    path.pop();
                }
            }
            BindingPattern::ArrayPattern(arr) => {
                for (index, elem) in arr.elements.iter().enumerate() {
                    if let Some(elem) = elem {
                        path.push(PatternStep::Index(index));
                        self.collect_pattern(declarator, elem, path);
                        path.pop();
                    }
                }
                if let Some(rest) = &arr.rest {
                    path.push(PatternStep::Rest);
                    self.collect_pattern(declarator, &rest.argument, path);
                    path.pop();
                }
            }
            BindingPattern::AssignmentPattern(assign) => {
                self.collect_pattern(declarator, &assign.left, path);
            }
        }
    }

    fn record_assignment(&mut self, assign: &'a AssignmentExpression<'a>) {
        if assign.operator != AssignmentOperator::Assign {
            return;
        }
        if let AssignmentTarget::AssignmentTargetIdentifier(id) = &assign.left {
            if let Some(symbol) = reference_symbol(self.scoping, id) {
                self.index
                    .assignments
                    .entry(symbol)
                    .or_default()
                    .push(&assign.right);
            }
        }
    }

    fn bind_imports(&mut self, import: &'a ImportDeclaration<'a>) {
        let Some(specifiers) = &import.specifiers else {
            return;
        };
        for specifier in specifiers {
            let (local, imported) = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    (&s.local, ImportedName::Named(export_name(&s.imported)))
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    (&s.local, ImportedName::Default)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    (&s.local, ImportedName::Namespace)
                }
            };
            let binding = ImportBinding {
                declaration: import,
                imported,
                identifier: local,
                local: local.name.as_str(),
            };
            self.bind(local, BindingSite::Import(binding));
        }
    }
}

impl<'a, 's> Visit<'a> for IndexBuilder<'a, 's> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::Program(program) => self.enter(Node::Program(program)),
            AstKind::VariableDeclarator(declarator) => {
                self.collect_pattern(declarator, &declarator.id, &mut Vec::new());
                self.enter(Node::Declarator(declarator));
            }
            AstKind::ObjectExpression(object) => self.enter(Node::Object(object)),
            AstKind::Class(class) => {
                if let Some(id) = &class.id {
                    self.bind(id, BindingSite::Class(class));
                }
                self.enter(Node::Class(class));
                self.depth += 1;
            }
            AstKind::Function(func) => {
                if let Some(id) = &func.id {
                    self.bind(id, BindingSite::Function(func));
                }
                self.enter(Node::Function(func));
                self.depth += 1;
            }
            AstKind::ArrowFunctionExpression(arrow) => {
                self.enter(Node::Arrow(arrow));
                self.depth += 1;
            }
            AstKind::ImportDeclaration(import) => self.bind_imports(import),
            AstKind::AssignmentExpression(assign) => self.record_assignment(assign),
            _ => {}
        }
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::Class(_) | AstKind::Function(_) | AstKind::ArrowFunctionExpression(_) => {
                self.depth -= 1;
                self.leave();
            }
            AstKind::Program(_) | AstKind::VariableDeclarator(_) | AstKind::ObjectExpression(_) => {
                self.leave()
            }
            _ => {}
        }
    }

    // `Statement` and `Expression` have no `AstKind` of their own
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        let stmt = self.alloc(stmt);
        self.enter(Node::Statement(stmt));
        walk::walk_statement(self, stmt);
        self.leave();
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        let expr = self.alloc(expr);
        match expr {
            // entered through `enter_node` under their dedicated variant
            Expression::ClassExpression(_)
            | Expression::FunctionExpression(_)
            | Expression::ArrowFunctionExpression(_)
            | Expression::ObjectExpression(_) => walk::walk_expression(self, expr),
            _ => {
                self.enter(Node::Expression(expr));
                walk::walk_expression(self, expr);
                self.leave();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_semantic::SemanticBuilder;
    use oxc_span::SourceType;

    fn index_source<'a>(allocator: &'a Allocator, source: &'a str) -> (ScopeIndex<'a>, Scoping) {
        let ret = Parser::new(allocator, source, SourceType::default().with_module(true).with_jsx(true)).parse();
        let program: &'a Program<'a> = allocator.alloc(ret.program);
        let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
        (ScopeIndex::build(program, &scoping), scoping)
    }

    #[test]
    fn test_records_destructuring_paths() {
        let allocator = Allocator::default();
        let (index, _) = index_source(&allocator, "var {foo: {bar: baz}, ...rest} = obj;");
        let baz = index.top_level_symbol("baz").unwrap();
        match index.binding(baz) {
            Some(BindingSite::Variable { path, .. }) => assert_eq!(
                path,
                &vec![
                    PatternStep::Key("foo".to_string()),
                    PatternStep::Key("bar".to_string())
                ]
            ),
            other => panic!("unexpected binding {:?}", other),
        }
        let rest = index.top_level_symbol("rest").unwrap();
        match index.binding(rest) {
            Some(BindingSite::Variable { path, .. }) => assert_eq!(path, &vec![PatternStep::Rest]),
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_records_import_provenance() {
        let allocator = Allocator::default();
        let (index, _) = index_source(
            &allocator,
            "import React, {PropTypes as P} from 'react'; import * as all from 'x';",
        );
        let p = index.top_level_symbol("P").unwrap();
        match index.binding(p) {
            Some(BindingSite::Import(binding)) => {
                assert_eq!(binding.imported, ImportedName::Named("PropTypes"));
                assert_eq!(binding.declaration.source.value.as_str(), "react");
            }
            other => panic!("unexpected binding {:?}", other),
        }
        let all = index.top_level_symbol("all").unwrap();
        assert!(matches!(
            index.binding(all),
            Some(BindingSite::Import(ImportBinding {
                imported: ImportedName::Namespace,
                ..
            }))
        ));
    }

    #[test]
    fn test_nested_declarations_are_not_top_level() {
        let allocator = Allocator::default();
        let (index, _) = index_source(&allocator, "function outer() { var inner = 1; }");
        assert!(index.top_level_symbol("outer").is_some());
        assert!(index.top_level_symbol("inner").is_none());
    }

    #[test]
    fn test_records_plain_assignments() {
        let allocator = Allocator::default();
        let (index, _) = index_source(&allocator, "var Foo; Foo = 1; Foo += 2;");
        let foo = index.top_level_symbol("Foo").unwrap();
        assert_eq!(index.assignments(foo).len(), 1);
    }

    #[test]
    fn test_records_assignments_in_every_expression_position() {
        let allocator = Allocator::default();
        let (index, _) = index_source(
            &allocator,
            "var x;\n<div onClick={() => { x = 1; }} />;\nwrap?.(() => { x = 2; });\nfunction f(a = () => { x = 3; }) {}",
        );
        let x = index.top_level_symbol("x").unwrap();
        assert_eq!(index.assignments(x).len(), 3);
    }
}
