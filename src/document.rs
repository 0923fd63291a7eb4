//! # Documentation Accumulator
//!
//! [`Documentation`] is the mutable builder handlers write into during one
//! analysis. [`DocumentationRecord`] is the frozen, serializable result.
//!
//! ## Key Invariants
//!
//! 1. **No Empty Props**: a prop nobody wrote anything for is not emitted.
//! 2. **Discovery Order**: props and composed modules keep insertion order.
//! 3. **Unique Composes**: a module name is listed at most once.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::prop_type::{RawValue, TypeDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDescriptor {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropDescriptor {
    fn is_empty(&self) -> bool {
        self.type_descriptor.is_none()
            && self.default_value.is_none()
            && self.description.is_none()
            && !self.required
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, PropDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub composes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Documentation {
    display_name: Option<String>,
    description: String,
    props: IndexMap<String, PropDescriptor>,
    composes: IndexSet<String>,
}

impl Documentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = Some(name.into());
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Descriptor for `name`, created on first access so handlers can merge
    /// into what earlier handlers wrote.
    pub fn prop_descriptor(&mut self, name: &str) -> &mut PropDescriptor {
        self.props.entry(name.to_string()).or_default()
    }

    pub fn prop(&self, name: &str) -> Option<&PropDescriptor> {
        self.props.get(name)
    }

    pub fn add_composes(&mut self, module: impl Into<String>) {
        self.composes.insert(module.into());
    }

    pub fn composes(&self) -> impl Iterator<Item = &str> {
        self.composes.iter().map(String::as_str)
    }

    pub fn into_record(self) -> DocumentationRecord {
        DocumentationRecord {
            display_name: self.display_name,
            description: self.description,
            props: self
                .props
                .into_iter()
                .filter(|(_, descriptor)| !descriptor.is_empty())
                .collect(),
            composes: self.composes.into_iter().collect(),
        }
    }
}
