//! # Component Docgen (native)
//!
//! Static documentation extraction for UI component modules. A module is
//! parsed once, its component definition is located, and an ordered list
//! of handlers fills a [`DocumentationRecord`]. Nothing is executed.
//!
//! ## Resolution Invariants
//!
//! 1. **Innermost Binding**: identifiers resolve through the scope tables of
//!    the parser's semantic pass, so shadowing is always honoured.
//! 2. **Terminal Values**: functions, classes and imports are never unwrapped
//!    further. Member and call expressions are not evaluated.
//! 3. **Dead Ends Are Values**: resolution returns the last node it reached,
//!    it never fails. Cycles stop at the first repeated node.
//! 4. **Provenance**: which external module a value came from is recognized
//!    from `require("x")` calls and import declarations, independent of the
//!    local alias.
//!
//! ## Discovery Rules
//!
//! - factory call: `X.createClass({...})` with `X` from a component module
//! - class: an instance `render` method, or extending `Component` /
//!   `PureComponent` from a component module
//! - stateless: a function whose own return values are elements
//!
//! Exactly one exported definition is documented. Several exported
//! definitions are rejected as ambiguous (DOCGEN-ERR-AMBIGUOUS-EXPORT).

mod analyze;
mod component;
mod discovery;
mod docblock;
mod document;
mod error;
mod handlers;
mod members;
mod node;
mod parse;
mod prop_type;
mod resolve;
mod scope;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod discovery_tests;

pub use analyze::{
    analyze, analyze_all, default_handlers, ComponentResolver, ExportedComponentResolver,
};
pub use component::return_values;
pub use discovery::{
    export_surfaces, find_all_component_definitions, find_exported_component_definition,
};
pub use docblock::parse_docblock;
pub use document::{Documentation, DocumentationRecord, PropDescriptor};
pub use error::{DocgenError, Result};
pub use handlers::{
    component_docblock_handler, default_props_handler, display_name_handler,
    prop_docblock_handler, prop_type_composition_handler, prop_type_handler, Handler,
};
pub use members::{DefinitionMember, MemberOrigin};
pub use node::{AccessKey, ImportBinding, ImportedName, MemberAccess, Node};
pub use parse::{parse, parse_all, parse_batch, DocgenOptions, SourceModule};
pub use prop_type::{
    get_prop_type, is_required_prop_type, RawValue, ShapeField, TypeDescriptor,
};
pub use resolve::{member_expression_root, member_chain, MemberLink};

#[cfg(feature = "napi")]
pub use parse::parse_component_docs_native;
