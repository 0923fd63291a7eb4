//! Shared fixtures for the unit tests.

use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPattern, Class, Expression, VariableDeclarator};
use oxc_ast::AstKind;
use oxc_ast_visit::Visit;

use crate::parse::{DocgenOptions, SourceModule};

pub fn module_for<'a>(allocator: &'a Allocator, source: &'a str) -> SourceModule<'a> {
    SourceModule::parse(allocator, source, &DocgenOptions::default())
        .unwrap_or_else(|e| panic!("fixture failed to parse: {}", e))
}

#[derive(Default)]
struct Collected<'a> {
    expressions: Vec<&'a Expression<'a>>,
    classes: Vec<&'a Class<'a>>,
    declarators: Vec<&'a VariableDeclarator<'a>>,
}

impl<'a> Visit<'a> for Collected<'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::ExpressionStatement(stmt) => self.expressions.push(&stmt.expression),
            AstKind::Class(class) => self.classes.push(class),
            AstKind::VariableDeclarator(declarator) => self.declarators.push(declarator),
            _ => {}
        }
    }
}

fn collect<'a>(module: &SourceModule<'a>) -> Collected<'a> {
    let mut collected = Collected::default();
    collected.visit_program(module.program());
    collected
}

/// Expression of the last expression statement, at any depth.
pub fn last_expression<'a>(module: &SourceModule<'a>) -> &'a Expression<'a> {
    match collect(module).expressions.last() {
        Some(expr) => *expr,
        None => panic!("fixture has no expression statement"),
    }
}

/// `index`-th class in source order.
pub fn find_class<'a>(module: &SourceModule<'a>, index: usize) -> &'a Class<'a> {
    collect(module).classes[index]
}

/// Initializer of the first declarator binding `name`.
pub fn declarator_init<'a>(module: &SourceModule<'a>, name: &str) -> Option<&'a Expression<'a>> {
    collect(module).declarators.into_iter().find_map(|declarator| {
        match &declarator.id {
            BindingPattern::BindingIdentifier(id) if id.name == name => declarator.init.as_ref(),
            _ => None,
        }
    })
}
