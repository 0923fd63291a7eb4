//! Parse Module for the component docgen
//!
//! Turns source text into a [`SourceModule`]: the arena-allocated program,
//! its scoping tables and the module-wide index every later phase reads.
//! Also hosts the string-in, record-out entry points.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::{Comment, Program, Statement};
use oxc_parser::Parser;
use oxc_semantic::{Scoping, SemanticBuilder};
use oxc_span::SourceType;
use oxc_syntax::symbol::SymbolId;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::analyze::{analyze, analyze_all};
use crate::document::DocumentationRecord;
use crate::error::{DocgenError, Result};
use crate::node::{Node, NodeKey};
use crate::scope::ScopeIndex;

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocgenOptions {
    pub typescript: bool,
    pub jsx: bool,
    /// Modules providing the component library (`createClass`, `Component`,
    /// `createElement`, `PropTypes`).
    pub component_modules: Vec<String>,
    /// Modules whose exports are accepted as prop type validators.
    pub prop_types_modules: Vec<String>,
    /// Modules whose callable export builds a component from a spec object.
    pub class_factory_modules: Vec<String>,
}

impl Default for DocgenOptions {
    fn default() -> Self {
        Self {
            typescript: false,
            jsx: true,
            component_modules: vec![
                "react".to_string(),
                "react/addons".to_string(),
                "react-native".to_string(),
            ],
            prop_types_modules: vec!["ReactPropTypes".to_string(), "prop-types".to_string()],
            class_factory_modules: vec!["create-react-class".to_string()],
        }
    }
}

fn contains_module(list: &[String], name: &str) -> bool {
    list.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

impl DocgenOptions {
    pub fn source_type(&self) -> SourceType {
        SourceType::default()
            .with_module(true)
            .with_jsx(self.jsx)
            .with_typescript(self.typescript)
    }

    pub fn is_component_module(&self, name: &str) -> bool {
        contains_module(&self.component_modules, name)
    }

    pub fn is_prop_types_module(&self, name: &str) -> bool {
        self.is_component_module(name) || contains_module(&self.prop_types_modules, name)
    }

    pub fn is_class_factory_module(&self, name: &str) -> bool {
        contains_module(&self.class_factory_modules, name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE MODULE
// ═══════════════════════════════════════════════════════════════════════════════

/// One parsed module. Everything borrows from the caller's arena, and the
/// module is never shared between analyses.
pub struct SourceModule<'a> {
    allocator: &'a Allocator,
    source: &'a str,
    program: &'a Program<'a>,
    scoping: Scoping,
    index: ScopeIndex<'a>,
    options: DocgenOptions,
    pub(crate) resolved: RefCell<HashMap<NodeKey, Node<'a>>>,
    pub(crate) destructured: RefCell<HashMap<SymbolId, Node<'a>>>,
}

impl<'a> SourceModule<'a> {
    pub fn parse(
        allocator: &'a Allocator,
        source: &'a str,
        options: &DocgenOptions,
    ) -> Result<Self> {
        let ret = Parser::new(allocator, source, options.source_type()).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DocgenError::Parse { message });
        }

        let program: &'a Program<'a> = allocator.alloc(ret.program);
        let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
        let index = ScopeIndex::build(program, &scoping);

        Ok(Self {
            allocator,
            source,
            program,
            scoping,
            index,
            options: options.clone(),
            resolved: RefCell::new(HashMap::new()),
            destructured: RefCell::new(HashMap::new()),
        })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn program(&self) -> &'a Program<'a> {
        self.program
    }

    pub fn allocator(&self) -> &'a Allocator {
        self.allocator
    }

    pub fn scoping(&self) -> &Scoping {
        &self.scoping
    }

    pub fn index(&self) -> &ScopeIndex<'a> {
        &self.index
    }

    pub fn options(&self) -> &DocgenOptions {
        &self.options
    }

    pub fn comments(&self) -> &'a [Comment] {
        &self.program.comments
    }

    pub fn parent(&self, node: Node<'a>) -> Option<Node<'a>> {
        self.index.parent(node)
    }

    pub fn text(&self, node: Node<'a>) -> String {
        node.source_text(self.source)
    }

    /// Closest statement containing `node`, climbing through expressions
    /// and declarators only.
    pub fn enclosing_statement(&self, node: Node<'a>) -> Option<&'a Statement<'a>> {
        let mut current = node;
        loop {
            match self.parent(current)? {
                Node::Statement(stmt) => return Some(stmt),
                parent @ (Node::Expression(_) | Node::Declarator(_)) => current = parent,
                _ => return None,
            }
        }
    }
}

/// Statements directly owned by a program, function body or block.
pub fn statement_list<'a>(owner: Node<'a>) -> Option<&'a [Statement<'a>]> {
    match owner {
        Node::Program(program) => Some(&program.body[..]),
        Node::Function(func) => func.body.as_ref().map(|body| &body.statements[..]),
        Node::Arrow(arrow) => Some(&arrow.body.statements[..]),
        Node::Statement(Statement::BlockStatement(block)) => Some(&block.body[..]),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Document the single exported component of `source`.
pub fn parse(source: &str, options: &DocgenOptions) -> Result<DocumentationRecord> {
    let allocator = Allocator::default();
    let module = SourceModule::parse(&allocator, source, options)?;
    analyze(&module, None, None)
}

/// Document every component definition found in `source`.
pub fn parse_all(source: &str, options: &DocgenOptions) -> Result<Vec<DocumentationRecord>> {
    let allocator = Allocator::default();
    let module = SourceModule::parse(&allocator, source, options)?;
    Ok(analyze_all(&module, None))
}

/// Independent analyses, one per source, run in parallel.
pub fn parse_batch<S: AsRef<str> + Sync>(
    sources: &[S],
    options: &DocgenOptions,
) -> Vec<Result<DocumentationRecord>> {
    sources
        .par_iter()
        .map(|source| parse(source.as_ref(), options))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORT
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn parse_component_docs_native(
    source: String,
    options: Option<serde_json::Value>,
) -> napi::Result<serde_json::Value> {
    let options: DocgenOptions = match options {
        Some(value) => {
            serde_json::from_value(value).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => DocgenOptions::default(),
    };
    let record = parse(&source, &options)
        .map_err(|e| napi::Error::from_reason(format!("[{}] {}", e.code(), e)))?;
    serde_json::to_value(record).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_ast::AstKind;
    use oxc_ast_visit::Visit;

    #[test]
    fn test_options_match_modules_case_insensitively() {
        let options = DocgenOptions::default();
        assert!(options.is_component_module("React"));
        assert!(options.is_component_module("react/addons"));
        assert!(!options.is_component_module("FakeReact"));
        assert!(options.is_prop_types_module("ReactPropTypes"));
        assert!(options.is_prop_types_module("react"));
        assert!(options.is_class_factory_module("create-react-class"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: DocgenOptions =
            serde_json::from_str(r#"{"componentModules": ["preact"]}"#).unwrap();
        assert!(options.is_component_module("preact"));
        assert!(!options.is_component_module("react"));
        assert!(options.jsx);
    }

    #[test]
    fn test_syntax_errors_surface_as_parse_errors() {
        let allocator = Allocator::default();
        let result = SourceModule::parse(&allocator, "var = ;", &DocgenOptions::default());
        assert!(matches!(result, Err(DocgenError::Parse { .. })));
    }

    #[test]
    fn test_enclosing_statement_climbs_declarators() {
        let allocator = Allocator::default();
        let source = "export var Foo = bar(class {});";
        let module = SourceModule::parse(&allocator, source, &DocgenOptions::default()).unwrap();
        let Statement::ExportNamedDeclaration(_) = &module.program().body[0] else {
            panic!("expected export");
        };
        let stmt = &module.program().body[0];
        let mut classes = Vec::new();
        struct Classes<'v, 'a>(&'v mut Vec<&'a oxc_ast::ast::Class<'a>>);
        impl<'v, 'a> Visit<'a> for Classes<'v, 'a> {
            fn enter_node(&mut self, kind: AstKind<'a>) {
                if let AstKind::Class(class) = kind {
                    self.0.push(class);
                }
            }
        }
        Classes(&mut classes).visit_program(module.program());
        let found = module.enclosing_statement(Node::Class(classes[0])).unwrap();
        assert!(std::ptr::eq(found, stmt));
    }
}
