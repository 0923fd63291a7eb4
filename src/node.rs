//! Addressable view over the oxc AST.
//!
//! `Node` is the closed set of forms the analysis hands around. Every node
//! borrows from the module arena, so nodes are `Copy` and identity is the
//! arena address (see [`NodeKey`]).

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingIdentifier, BindingPattern, Class, Expression, Function, ImportDeclaration,
    ObjectExpression, Program, PropertyKey, Statement, VariableDeclarator,
};
use oxc_span::{GetSpan, Span};

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program<'a>),
    Statement(&'a Statement<'a>),
    Declarator(&'a VariableDeclarator<'a>),
    Expression(&'a Expression<'a>),
    Object(&'a ObjectExpression<'a>),
    Class(&'a Class<'a>),
    Function(&'a Function<'a>),
    Arrow(&'a ArrowFunctionExpression<'a>),
    Import(ImportBinding<'a>),
    Pattern(&'a BindingPattern<'a>),
    Access(&'a MemberAccess<'a>),
}

/// A local name bound by an import declaration.
#[derive(Debug, Clone, Copy)]
pub struct ImportBinding<'a> {
    pub declaration: &'a ImportDeclaration<'a>,
    pub imported: ImportedName<'a>,
    /// Binding of the specifier, which is the identity of the import.
    pub identifier: &'a BindingIdentifier<'a>,
    pub local: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportedName<'a> {
    Default,
    Namespace,
    Named(&'a str),
}

/// Member access reconstructed from a destructuring pattern:
/// `var {a: {b}} = x` makes `b` resolve to `x.a.b`.
#[derive(Debug, Clone, Copy)]
pub struct MemberAccess<'a> {
    pub object: Node<'a>,
    pub property: AccessKey<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKey<'a> {
    Name(&'a str),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    tag: u8,
    addr: usize,
}

fn addr<T>(value: &T) -> usize {
    value as *const T as usize
}

impl<'a> Node<'a> {
    /// Wrap an expression, looking through parentheses and giving
    /// class/function/arrow/object literals their dedicated variant.
    pub fn from_expression(expr: &'a Expression<'a>) -> Node<'a> {
        let expr = expr.without_parentheses();
        match expr {
            Expression::ClassExpression(class) => Node::Class(class),
            Expression::FunctionExpression(func) => Node::Function(func),
            Expression::ArrowFunctionExpression(arrow) => Node::Arrow(arrow),
            Expression::ObjectExpression(object) => Node::Object(object),
            _ => Node::Expression(expr),
        }
    }

    pub fn key(&self) -> NodeKey {
        let (tag, addr) = match self {
            Node::Program(n) => (0, addr(*n)),
            Node::Statement(n) => (1, addr(*n)),
            Node::Declarator(n) => (2, addr(*n)),
            Node::Expression(n) => (3, addr(*n)),
            Node::Object(n) => (4, addr(*n)),
            Node::Class(n) => (5, addr(*n)),
            Node::Function(n) => (6, addr(*n)),
            Node::Arrow(n) => (7, addr(*n)),
            Node::Import(n) => (8, addr(n.identifier)),
            Node::Pattern(n) => (9, addr(*n)),
            Node::Access(n) => (10, addr(*n)),
        };
        NodeKey { tag, addr }
    }

    pub fn same(&self, other: &Node<'a>) -> bool {
        self.key() == other.key()
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Program(n) => n.span,
            Node::Statement(n) => n.span(),
            Node::Declarator(n) => n.span,
            Node::Expression(n) => n.span(),
            Node::Object(n) => n.span,
            Node::Class(n) => n.span,
            Node::Function(n) => n.span,
            Node::Arrow(n) => n.span,
            Node::Import(n) => n.declaration.span,
            Node::Pattern(n) => n.span(),
            Node::Access(n) => n.object.span(),
        }
    }

    /// Verbatim source text. Synthesized accesses are printed as
    /// `object.name` / `object[index]`.
    pub fn source_text(&self, source: &str) -> String {
        match self {
            Node::Access(access) => {
                let object = access.object.source_text(source);
                match access.property {
                    AccessKey::Name(name) => format!("{}.{}", object, name),
                    AccessKey::Index(index) => format!("{}[{}]", object, index),
                }
            }
            Node::Import(binding) => binding.local.to_string(),
            other => other.span().source_text(source).to_string(),
        }
    }

    pub fn as_expression(&self) -> Option<&'a Expression<'a>> {
        match *self {
            Node::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn is_function_like(&self) -> bool {
        matches!(self, Node::Function(_) | Node::Arrow(_))
    }
}

pub fn is_literal(expr: &Expression<'_>) -> bool {
    matches!(
        expr.without_parentheses(),
        Expression::StringLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::BigIntLiteral(_)
            | Expression::RegExpLiteral(_)
    )
}

/// Static name of a property key: identifiers (unless computed), string
/// literals and numeric literals. `[someVariable]` has no static name.
pub fn property_name(key: &PropertyKey<'_>, computed: bool) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) if !computed => Some(id.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        PropertyKey::NumericLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}
