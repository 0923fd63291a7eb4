#[cfg(test)]
mod tests {
    use crate::discovery::{find_all_component_definitions, find_exported_component_definition};
    use crate::error::DocgenError;
    use crate::node::Node;
    use crate::parse::SourceModule;
    use crate::test_utils::module_for;
    use oxc_allocator::Allocator;
    use pretty_assertions::assert_eq;

    fn candidate_count(source: &str) -> usize {
        let allocator = Allocator::default();
        let module = module_for(&allocator, source);
        find_all_component_definitions(&module).len()
    }

    /// Declared name of a definition, or its source text.
    fn definition_name<'a>(module: &SourceModule<'a>, node: Node<'a>) -> String {
        let id = match node {
            Node::Class(class) => class.id.as_ref(),
            Node::Function(func) => func.id.as_ref(),
            _ => None,
        };
        match id {
            Some(id) => id.name.to_string(),
            None => module.text(node),
        }
    }

    fn exported(source: &str) -> Result<Option<String>, DocgenError> {
        let allocator = Allocator::default();
        let module = module_for(&allocator, source);
        let definition = find_exported_component_definition(&module)?;
        Ok(definition.map(|node| definition_name(&module, node)))
    }

    // ───────────────────────────────────────────────────────────────────────
    // all definitions
    // ───────────────────────────────────────────────────────────────────────

    #[test]
    fn test_finds_create_class_independent_of_alias() {
        let source = "var R = require('React');\nvar Component = R.createClass({});\nmodule.exports = Component;";
        assert_eq!(candidate_count(source), 1);
    }

    #[test]
    fn test_ignores_create_class_of_other_modules() {
        let source = "var React = require('NoReact');\nvar Component = React.createClass({});\nmodule.exports = Component;";
        assert_eq!(candidate_count(source), 0);
    }

    #[test]
    fn test_finds_resolved_spec_objects() {
        let source = "var React = require('react');\nvar spec = {};\nvar Component = React.createClass(spec);";
        let allocator = Allocator::default();
        let module = module_for(&allocator, source);
        let definitions = find_all_component_definitions(&module);
        assert_eq!(definitions.len(), 1);
        assert!(matches!(definitions[0], Node::Object(_)));
    }

    #[test]
    fn test_finds_component_classes() {
        let source = r#"
            var React = require("React");
            class ComponentA extends React.Component {}
            class ComponentB { render() {} }
            var ComponentC = class extends React.PureComponent {};
            var ComponentD = class { render() {} };
            class NotAComponent {}
        "#;
        assert_eq!(candidate_count(source), 4);
    }

    #[test]
    fn test_ignores_classes_of_other_modules() {
        let source = "var R = require('FakeReact');\nclass ComponentA extends R.Component {}";
        assert_eq!(candidate_count(source), 0);
    }

    #[test]
    fn test_finds_stateless_components() {
        let source = r#"
            import React from 'React';
            let ComponentA = () => <div />;
            function ComponentB() { return React.createElement('div', null); }
            const ComponentC = function(props) { return props.visible ? <div /> : null; };
            const ComponentD = function(props) {
                var result = <div />;
                return result;
            };
            const ComponentE = function(props) {
                var result = () => <div />;
                return result();
            };
            const ComponentF = function(props) {
                var helpers = {
                    comp() { return <div />; }
                };
                return helpers.comp();
            };
            const ComponentG = function(props) {
                var helpers = { deep: { comp: () => <div /> } };
                return helpers.deep.comp();
            };
            function NotAComponent() { return null; }
        "#;
        assert_eq!(candidate_count(source), 7);
    }

    #[test]
    fn test_nested_definitions_are_separate_candidates() {
        let source = r#"
            function factory() {
                return {
                    A: () => <div />,
                    B: function() { return <span />; },
                };
            }
        "#;
        assert_eq!(candidate_count(source), 2);
    }

    #[test]
    fn test_helper_inside_a_component_is_not_a_second_candidate() {
        let source = r#"
            function Component(props) {
                function renderBody() {
                    return <div />;
                }
                return renderBody();
            }
        "#;
        assert_eq!(candidate_count(source), 1);
    }

    #[test]
    fn test_mixed_definition_kinds_in_source_order() {
        let source = r#"
            var React = require('react');
            var A = React.createClass({});
            class B extends React.Component {}
            function C() { return <div />; }
        "#;
        let allocator = Allocator::default();
        let module = module_for(&allocator, source);
        let definitions = find_all_component_definitions(&module);
        assert_eq!(definitions.len(), 3);
        assert!(matches!(definitions[0], Node::Object(_)));
        assert!(matches!(definitions[1], Node::Class(_)));
        assert!(matches!(definitions[2], Node::Function(_)));
    }

    // ───────────────────────────────────────────────────────────────────────
    // exported definition
    // ───────────────────────────────────────────────────────────────────────

    const TWO_CLASSES: &str = r#"
        var React = require('react');
        class First extends React.Component { render() {} }
        class Second extends React.Component { render() {} }
    "#;

    #[test]
    fn test_picks_the_named_export() {
        let second = format!("{}\nexport {{Second}};", TWO_CLASSES);
        assert_eq!(exported(&second), Ok(Some("Second".to_string())));
        let first = format!("{}\nexport {{First as Renamed}};", TWO_CLASSES);
        assert_eq!(exported(&first), Ok(Some("First".to_string())));
    }

    #[test]
    fn test_rejects_several_exports() {
        let source = format!("{}\nexport {{First, Second}};", TWO_CLASSES);
        assert_eq!(exported(&source), Err(DocgenError::AmbiguousExport { count: 2 }));

        let source = format!("{}\nexports.First = First;\nexports.Second = Second;", TWO_CLASSES);
        assert_eq!(exported(&source), Err(DocgenError::AmbiguousExport { count: 2 }));
    }

    #[test]
    fn test_same_definition_exported_twice_is_not_ambiguous() {
        let source = format!("{}\nexport default Second;\nexport {{Second}};", TWO_CLASSES);
        assert_eq!(exported(&source), Ok(Some("Second".to_string())));
    }

    #[test]
    fn test_unexported_modules_need_a_single_candidate() {
        assert_eq!(exported(TWO_CLASSES), Ok(None));
        let single = "var React = require('react');\nclass Only extends React.Component {}";
        assert_eq!(exported(single), Ok(Some("Only".to_string())));
    }

    #[test]
    fn test_exporting_only_non_components_finds_nothing() {
        let source = "function Only() { return <div />; }\nexport default 42;";
        assert_eq!(exported(source), Ok(None));
        let source = "function Only() { return <div />; }\nmodule.exports = {};";
        assert_eq!(exported(source), Ok(None));
    }

    #[test]
    fn test_exported_declarations() {
        let source = "var React = require('react');\nexport default class Foo extends React.Component {}";
        assert_eq!(exported(source), Ok(Some("Foo".to_string())));
        let source = "export function Foo() { return <div />; }\nfunction Bar() { return <div />; }";
        assert_eq!(exported(source), Ok(Some("Foo".to_string())));
        let source = "export const Foo = () => <div />, x = 1;\nconst Bar = () => <div />;";
        assert_eq!(exported(source), Ok(Some("() => <div />".to_string())));
    }

    #[test]
    fn test_commonjs_exports() {
        let source = r#"
            var React = require('react');
            var A = React.createClass({displayName: 'A'});
            var B = React.createClass({displayName: 'B'});
            module.exports = B;
        "#;
        assert_eq!(exported(source), Ok(Some("{displayName: 'B'}".to_string())));

        let source = r#"
            var React = require('react');
            var A = React.createClass({displayName: 'A'});
            exports.B = React.createClass({displayName: 'B'});
        "#;
        assert_eq!(exported(source), Ok(Some("{displayName: 'B'}".to_string())));
    }

    #[test]
    fn test_unwraps_higher_order_components() {
        let source = format!(
            "{}\nexport default connect(mapState)(withStyles(styles)(Second));",
            TWO_CLASSES
        );
        assert_eq!(exported(&source), Ok(Some("Second".to_string())));

        let source = format!("{}\nmodule.exports = React.memo(First);", TWO_CLASSES);
        assert_eq!(exported(&source), Ok(Some("First".to_string())));

        let source = format!("{}\nexport default wrap?.(Second);", TWO_CLASSES);
        assert_eq!(exported(&source), Ok(Some("Second".to_string())));
    }

    #[test]
    fn test_finds_definitions_in_every_expression_position() {
        assert_eq!(candidate_count("module.exports = wrap?.(() => <div />);"), 1);
        assert_eq!(candidate_count("render(<Route component={() => <div />} />);"), 1);
        assert_eq!(candidate_count("function make(render = () => <div />) {}"), 1);
        assert_eq!(
            exported("module.exports = wrap?.(() => <div />);"),
            Ok(Some("() => <div />".to_string()))
        );
    }

    #[test]
    fn test_exported_non_components_are_ignored() {
        let source = format!("{}\nexport const helper = () => 1;\nexport {{Second}};", TWO_CLASSES);
        assert_eq!(exported(&source), Ok(Some("Second".to_string())));
    }
}
