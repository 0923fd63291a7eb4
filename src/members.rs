//! Member lookup on component definitions.
//!
//! A definition exposes members through object properties (factory specs),
//! class bodies, or `Definition.member = value` statements that follow the
//! definition in the same statement list.

use oxc_ast::ast::{
    AssignmentTarget, BindingPattern, Class, ClassElement, Expression, MethodDefinitionKind,
    ObjectExpression, ObjectPropertyKind, Statement,
};
use oxc_syntax::operator::AssignmentOperator;
use oxc_syntax::symbol::SymbolId;

use crate::node::{property_name, Node};
use crate::parse::{statement_list, SourceModule};
use crate::scope::reference_symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOrigin {
    /// written in the class body
    Declared,
    /// `Definition.member = value` after the definition
    Assigned,
}

#[derive(Debug, Clone)]
pub struct DefinitionMember<'a> {
    pub name: String,
    pub value: Node<'a>,
    pub is_static: bool,
    pub origin: MemberOrigin,
}

/// Names that stand for the same piece of metadata.
fn synonym(name: &str) -> Option<&'static str> {
    match name {
        "defaultProps" => Some("getDefaultProps"),
        "getDefaultProps" => Some("defaultProps"),
        _ => None,
    }
}

/// First property of `object` named `name`. Spread properties are skipped.
pub fn property_value<'a>(object: &'a ObjectExpression<'a>, name: &str) -> Option<&'a Expression<'a>> {
    object.properties.iter().find_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(prop)
            if property_name(&prop.key, prop.computed).as_deref() == Some(name) =>
        {
            Some(&prop.value)
        }
        _ => None,
    })
}

impl<'a> SourceModule<'a> {
    /// Value of `name` on a definition, trying its synonym second.
    pub fn get_member_value(&self, definition: Node<'a>, name: &str) -> Option<Node<'a>> {
        self.member_value(definition, name).or_else(|| {
            synonym(name).and_then(|alternative| self.member_value(definition, alternative))
        })
    }

    fn member_value(&self, definition: Node<'a>, name: &str) -> Option<Node<'a>> {
        match definition {
            Node::Object(object) => property_value(object, name).map(Node::from_expression),
            Node::Class(class) => self
                .normalize_class_definition(class)
                .into_iter()
                .find(|member| member.name == name)
                .map(|member| member.value),
            Node::Function(_) | Node::Arrow(_) => self
                .assigned_members(definition)
                .into_iter()
                .find(|member| member.name == name)
                .map(|member| member.value),
            _ => None,
        }
    }

    /// Members of `class` as if every later `Class.member = value` statement
    /// had been written as a static member in the body. The tree itself is
    /// left untouched.
    pub fn normalize_class_definition(&self, class: &'a Class<'a>) -> Vec<DefinitionMember<'a>> {
        let mut members = Vec::new();
        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method) => {
                    if matches!(
                        method.kind,
                        MethodDefinitionKind::Constructor | MethodDefinitionKind::Set
                    ) {
                        continue;
                    }
                    if let Some(name) = property_name(&method.key, method.computed) {
                        members.push(DefinitionMember {
                            name,
                            value: Node::Function(&method.value),
                            is_static: method.r#static,
                            origin: MemberOrigin::Declared,
                        });
                    }
                }
                ClassElement::PropertyDefinition(prop) => {
                    let (Some(name), Some(value)) =
                        (property_name(&prop.key, prop.computed), &prop.value)
                    else {
                        continue;
                    };
                    members.push(DefinitionMember {
                        name,
                        value: Node::from_expression(value),
                        is_static: prop.r#static,
                        origin: MemberOrigin::Declared,
                    });
                }
                _ => {}
            }
        }
        members.extend(self.assigned_members(Node::Class(class)));
        members
    }

    /// `Ref.member = value` statements following the definition's binding
    /// in the statement list that declares it.
    pub fn assigned_members(&self, definition: Node<'a>) -> Vec<DefinitionMember<'a>> {
        let Some((symbol, anchor)) = self.definition_binding(definition) else {
            return Vec::new();
        };
        let Some(statements) = self.parent(Node::Statement(anchor)).and_then(statement_list) else {
            return Vec::new();
        };
        let Some(position) = statements.iter().position(|stmt| std::ptr::eq(stmt, anchor)) else {
            return Vec::new();
        };
        statements[position + 1..]
            .iter()
            .filter_map(|stmt| self.member_assignment(stmt, symbol))
            .collect()
    }

    /// Symbol the definition is bound to and the statement declaring it.
    fn definition_binding(&self, definition: Node<'a>) -> Option<(SymbolId, &'a Statement<'a>)> {
        let own_id = match definition {
            Node::Class(class) => class.id.as_ref(),
            Node::Function(func) => func.id.as_ref(),
            _ => None,
        };
        let mut parent = self.parent(definition)?;
        while let Node::Expression(Expression::ParenthesizedExpression(_)) = parent {
            parent = self.parent(parent)?;
        }
        match parent {
            Node::Statement(stmt) => Some((own_id?.symbol_id.get()?, stmt)),
            Node::Declarator(declarator) => {
                let BindingPattern::BindingIdentifier(id) = &declarator.id else {
                    return None;
                };
                Some((id.symbol_id.get()?, self.enclosing_statement(parent)?))
            }
            Node::Expression(Expression::AssignmentExpression(assign)) => {
                let AssignmentTarget::AssignmentTargetIdentifier(id) = &assign.left else {
                    return None;
                };
                let symbol = reference_symbol(self.scoping(), id)?;
                Some((symbol, self.enclosing_statement(parent)?))
            }
            _ => None,
        }
    }

    fn member_assignment(
        &self,
        stmt: &'a Statement<'a>,
        symbol: SymbolId,
    ) -> Option<DefinitionMember<'a>> {
        let Statement::ExpressionStatement(expr_stmt) = stmt else {
            return None;
        };
        let Expression::AssignmentExpression(assign) = &expr_stmt.expression else {
            return None;
        };
        if assign.operator != AssignmentOperator::Assign {
            return None;
        }
        let (object, name) = match &assign.left {
            AssignmentTarget::StaticMemberExpression(member) => {
                (&member.object, member.property.name.to_string())
            }
            AssignmentTarget::ComputedMemberExpression(member) => match &member.expression {
                Expression::StringLiteral(lit) => (&member.object, lit.value.to_string()),
                _ => return None,
            },
            _ => return None,
        };
        let Expression::Identifier(ident) = object.without_parentheses() else {
            return None;
        };
        if reference_symbol(self.scoping(), ident)? != symbol {
            return None;
        }
        Some(DefinitionMember {
            name,
            value: Node::from_expression(&assign.right),
            is_static: true,
            origin: MemberOrigin::Assigned,
        })
    }

    /// Resolve a dotted path through object literals:
    /// `obj.deep.member` with `obj = {deep: {member: fn}}` yields `fn`.
    pub fn resolve_member_path(&self, expr: &'a Expression<'a>) -> Option<Node<'a>> {
        match expr.without_parentheses() {
            Expression::StaticMemberExpression(member) => {
                let Node::Object(object) = self.resolve_member_path(&member.object)? else {
                    return None;
                };
                let value = property_value(object, member.property.name.as_str())?;
                Some(self.resolve_to_value(Node::from_expression(value)))
            }
            other => Some(self.resolve_to_value(Node::from_expression(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{find_class, last_expression, module_for};
    use oxc_allocator::Allocator;

    #[test]
    fn test_finds_assignments_to_class_declarations() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "class Foo {}\nFoo.propTypes = 42;\nFoo['displayName'] = 'Foo';",
        );
        let members = module.normalize_class_definition(find_class(&module, 0));
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["propTypes", "displayName"]);
        assert!(members.iter().all(|m| m.is_static && m.origin == MemberOrigin::Assigned));
        assert_eq!(module.text(members[0].value), "42");
    }

    #[test]
    fn test_finds_assignments_to_class_expressions() {
        let allocator = Allocator::default();
        let module = module_for(&allocator, "var Foo = class {};\nFoo.propTypes = 42;");
        let members = module.normalize_class_definition(find_class(&module, 0));
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "propTypes");
    }

    #[test]
    fn test_ignores_assignments_in_other_scopes() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "class Foo {}\nfunction bar() { Foo.propTypes = 42; }\nif (x) { Foo.displayName = 'x'; }",
        );
        assert!(module.normalize_class_definition(find_class(&module, 0)).is_empty());
    }

    #[test]
    fn test_ignores_assignments_before_declaration_and_to_shadowed_names() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "var Bar = 1;\nclass Foo {}\nBar.propTypes = 1;\nFoo.propTypes += 2;",
        );
        assert!(module.normalize_class_definition(find_class(&module, 0)).is_empty());
    }

    #[test]
    fn test_class_body_members_come_first() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "class Foo { static propTypes = {}; render() {} set x(v) {} constructor() {} }\nFoo.displayName = 'Foo';",
        );
        let members = module.normalize_class_definition(find_class(&module, 0));
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["propTypes", "render", "displayName"]);
        assert!(members[0].is_static);
        assert!(!members[1].is_static);
    }

    #[test]
    fn test_member_value_uses_synonyms() {
        let allocator = Allocator::default();
        let module = module_for(&allocator, "({getDefaultProps: function() { return {}; }});");
        let definition = Node::from_expression(last_expression(&module));
        let value = module.get_member_value(definition, "defaultProps").unwrap();
        assert!(matches!(value, Node::Function(_)));
        assert!(module.get_member_value(definition, "propTypes").is_none());
    }

    #[test]
    fn test_member_value_on_stateless_definitions() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "let Foo = () => null;\nFoo.defaultProps = {a: 1};",
        );
        let Some(init) = crate::test_utils::declarator_init(&module, "Foo") else {
            panic!("missing declarator");
        };
        let value = module.get_member_value(Node::from_expression(init), "defaultProps");
        assert!(matches!(value, Some(Node::Object(_))));
    }

    #[test]
    fn test_resolve_member_path_through_objects() {
        let allocator = Allocator::default();
        let module = module_for(
            &allocator,
            "var member = () => 1;\nvar obj = {deep: {member: member}};\nobj.deep.member;",
        );
        let resolved = module.resolve_member_path(last_expression(&module));
        assert!(matches!(resolved, Some(Node::Arrow(_))));
    }
}
