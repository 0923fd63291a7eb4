//! Value resolution.
//!
//! Follows identifier bindings, destructuring and assignments to the value a
//! reference denotes, and recognizes which external module a value came
//! from. Resolution never fails: a dead end returns the node reached so far.

use oxc_ast::ast::{
    Argument, BindingPattern, CallExpression, Expression, IdentifierReference, VariableDeclarator,
};
use oxc_syntax::operator::AssignmentOperator;
use oxc_syntax::symbol::SymbolId;
use std::collections::HashSet;
use tracing::trace;

use crate::node::{AccessKey, MemberAccess, Node, NodeKey};
use crate::parse::SourceModule;
use crate::scope::{reference_symbol, BindingSite, PatternStep};

impl<'a> SourceModule<'a> {
    /// Resolve `node` to the value it denotes, or return it unchanged.
    ///
    /// - declarators resolve to their initializer (or a single later
    ///   `name = value` assignment when there is none)
    /// - identifiers follow the innermost visible binding
    /// - destructured bindings become a synthesized access chain into the
    ///   right-hand side; rest captures stop at the pattern
    /// - functions, classes and imports are terminal
    /// - member and call expressions are not looked into
    pub fn resolve_to_value(&self, node: Node<'a>) -> Node<'a> {
        let key = node.key();
        if let Some(resolved) = self.resolved.borrow().get(&key) {
            return *resolved;
        }
        let resolved = self.resolve_with(node, &mut HashSet::new());
        self.resolved.borrow_mut().insert(key, resolved);
        resolved
    }

    /// Value bound to `symbol`, if the module declares it somewhere we track.
    pub fn resolve_symbol(&self, symbol: SymbolId) -> Option<Node<'a>> {
        self.resolve_symbol_with(symbol, &mut HashSet::new())
    }

    fn resolve_with(&self, node: Node<'a>, visited: &mut HashSet<NodeKey>) -> Node<'a> {
        if !visited.insert(node.key()) {
            trace!("resolution cycle cut at {:?}", node.span());
            return node;
        }
        match node {
            Node::Declarator(declarator) => match &declarator.init {
                Some(init) => self.resolve_with(Node::from_expression(init), visited),
                None => match self.single_assignment(declarator) {
                    Some(value) => self.resolve_with(Node::from_expression(value), visited),
                    None => node,
                },
            },
            Node::Expression(expr) => match expr {
                Expression::Identifier(ident) => self.resolve_identifier(node, ident, visited),
                Expression::AssignmentExpression(assign)
                    if assign.operator == AssignmentOperator::Assign =>
                {
                    self.resolve_with(Node::from_expression(&assign.right), visited)
                }
                _ => node,
            },
            _ => node,
        }
    }

    fn resolve_identifier(
        &self,
        node: Node<'a>,
        ident: &'a IdentifierReference<'a>,
        visited: &mut HashSet<NodeKey>,
    ) -> Node<'a> {
        let Some(symbol) = reference_symbol(self.scoping(), ident) else {
            trace!("unbound identifier {}", ident.name);
            return node;
        };
        self.resolve_symbol_with(symbol, visited).unwrap_or(node)
    }

    fn resolve_symbol_with(
        &self,
        symbol: SymbolId,
        visited: &mut HashSet<NodeKey>,
    ) -> Option<Node<'a>> {
        let site = self.index().binding(symbol)?;
        Some(match *site {
            BindingSite::Variable {
                declarator,
                ref path,
            } if path.is_empty() => self.resolve_with(Node::Declarator(declarator), visited),
            BindingSite::Variable {
                declarator,
                ref path,
            } => self.destructured_value(symbol, declarator, path),
            BindingSite::Function(func) => Node::Function(func),
            BindingSite::Class(class) => Node::Class(class),
            BindingSite::Import(binding) => Node::Import(binding),
        })
    }

    /// `var Foo; Foo = value;` with exactly one plain assignment.
    fn single_assignment(
        &self,
        declarator: &'a VariableDeclarator<'a>,
    ) -> Option<&'a Expression<'a>> {
        let BindingPattern::BindingIdentifier(id) = &declarator.id else {
            return None;
        };
        match self.index().assignments(id.symbol_id.get()?) {
            [value] => Some(*value),
            _ => None,
        }
    }

    fn destructured_value(
        &self,
        symbol: SymbolId,
        declarator: &'a VariableDeclarator<'a>,
        path: &[PatternStep],
    ) -> Node<'a> {
        if let Some(node) = self.destructured.borrow().get(&symbol) {
            return *node;
        }
        let node = self.build_access(declarator, path);
        self.destructured.borrow_mut().insert(symbol, node);
        node
    }

    fn build_access(&self, declarator: &'a VariableDeclarator<'a>, path: &[PatternStep]) -> Node<'a> {
        let Some(init) = &declarator.init else {
            return Node::Declarator(declarator);
        };
        let mut current = Node::from_expression(init);
        for step in path {
            let property = match step {
                PatternStep::Key(name) => AccessKey::Name(self.allocator().alloc_str(name)),
                PatternStep::Index(index) => AccessKey::Index(*index),
                PatternStep::Rest | PatternStep::Opaque => return Node::Pattern(&declarator.id),
            };
            current = Node::Access(self.allocator().alloc(MemberAccess {
                object: current,
                property,
            }));
        }
        current
    }

    /// Name of the external module `node` ultimately comes from:
    /// `require("x")`, an import declaration, or a member/call rooted in one.
    pub fn resolve_to_module(&self, node: Node<'a>) -> Option<String> {
        self.module_of(node, &mut HashSet::new())
    }

    fn module_of(&self, node: Node<'a>, visited: &mut HashSet<NodeKey>) -> Option<String> {
        if !visited.insert(node.key()) {
            return None;
        }
        match node {
            Node::Declarator(declarator) => {
                let init = declarator.init.as_ref()?;
                self.module_of(Node::from_expression(init), visited)
            }
            Node::Expression(expr) => match expr {
                Expression::CallExpression(call) => match require_source(call) {
                    Some(source) => Some(source.to_string()),
                    None => self.module_of(Node::from_expression(&call.callee), visited),
                },
                Expression::StaticMemberExpression(_) | Expression::ComputedMemberExpression(_) => {
                    self.module_of(Node::from_expression(member_expression_root(expr)), visited)
                }
                Expression::Identifier(_) => {
                    let value = self.resolve_to_value(node);
                    if value.same(&node) {
                        None
                    } else {
                        self.module_of(value, visited)
                    }
                }
                _ => None,
            },
            Node::Access(access) => self.module_of(access.object, visited),
            Node::Import(binding) => Some(binding.declaration.source.value.to_string()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMBER EXPRESSIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// `require("x")` → `x`
pub fn require_source<'a>(call: &'a CallExpression<'a>) -> Option<&'a str> {
    let Expression::Identifier(callee) = call.callee.without_parentheses() else {
        return None;
    };
    if callee.name != "require" {
        return None;
    }
    match call.arguments.first()?.as_expression()? {
        Expression::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// Repeatedly take the object side of a member expression.
pub fn member_expression_root<'a>(expr: &'a Expression<'a>) -> &'a Expression<'a> {
    let mut current = expr.without_parentheses();
    loop {
        match current {
            Expression::StaticMemberExpression(member) => {
                current = member.object.without_parentheses()
            }
            Expression::ComputedMemberExpression(member) => {
                current = member.object.without_parentheses()
            }
            _ => return current,
        }
    }
}

/// One step of a member chain, root first.
#[derive(Debug, Clone, Copy)]
pub struct MemberLink<'a> {
    /// Static name; `None` for non-literal computed access or a non-identifier root.
    pub name: Option<&'a str>,
    pub computed: bool,
    /// Arguments when this member is immediately called.
    pub arguments: Option<&'a [Argument<'a>]>,
    pub is_root: bool,
}

/// `X.oneOf([...]).isRequired` → `[X, oneOf(args), isRequired]`
pub fn member_chain<'a>(expr: &'a Expression<'a>) -> Vec<MemberLink<'a>> {
    let mut links = Vec::new();
    let mut current = expr.without_parentheses();
    let mut arguments = None;
    loop {
        match current {
            Expression::CallExpression(call) => {
                arguments = Some(&call.arguments[..]);
                current = call.callee.without_parentheses();
            }
            Expression::StaticMemberExpression(member) => {
                links.push(MemberLink {
                    name: Some(member.property.name.as_str()),
                    computed: false,
                    arguments: arguments.take(),
                    is_root: false,
                });
                current = member.object.without_parentheses();
            }
            Expression::ComputedMemberExpression(member) => {
                let name = match &member.expression {
                    Expression::StringLiteral(lit) => Some(lit.value.as_str()),
                    _ => None,
                };
                links.push(MemberLink {
                    name,
                    computed: true,
                    arguments: arguments.take(),
                    is_root: false,
                });
                current = member.object.without_parentheses();
            }
            other => {
                let name = match other {
                    Expression::Identifier(ident) => Some(ident.name.as_str()),
                    _ => None,
                };
                links.push(MemberLink {
                    name,
                    computed: false,
                    arguments: arguments.take(),
                    is_root: true,
                });
                break;
            }
        }
    }
    links.reverse();
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{last_expression, module_for};
    use oxc_allocator::Allocator;

    #[test]
    fn test_member_expression_root() {
        let allocator = Allocator::default();
        let module = module_for(&allocator, "foo.bar.baz[qux];");
        let root = member_expression_root(last_expression(&module));
        assert_eq!(Node::Expression(root).source_text(module.source()), "foo");
    }

    #[test]
    fn test_member_chain_attaches_arguments() {
        let allocator = Allocator::default();
        let module = module_for(&allocator, "React.PropTypes.oneOf(['a']).isRequired;");
        let chain = member_chain(last_expression(&module));
        let names: Vec<_> = chain.iter().map(|link| link.name).collect();
        assert_eq!(
            names,
            vec![Some("React"), Some("PropTypes"), Some("oneOf"), Some("isRequired")]
        );
        assert!(chain[0].is_root);
        assert!(chain[2].arguments.is_some());
        assert!(chain[3].arguments.is_none());
    }

    #[test]
    fn test_require_source() {
        let allocator = Allocator::default();
        let module = module_for(&allocator, "require('react');");
        let Expression::CallExpression(call) = last_expression(&module) else {
            panic!("expected call");
        };
        assert_eq!(require_source(call), Some("react"));
    }
}
