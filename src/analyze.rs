//! Orchestration: locate a definition, run the handlers, freeze the record.

use tracing::debug;

use crate::discovery::{find_all_component_definitions, find_exported_component_definition};
use crate::document::{Documentation, DocumentationRecord};
use crate::error::{DocgenError, Result};
use crate::handlers::{
    component_docblock_handler, default_props_handler, display_name_handler,
    prop_docblock_handler, prop_type_composition_handler, prop_type_handler, Handler,
};
use crate::node::Node;
use crate::parse::SourceModule;

/// Strategy picking the definition to document.
///
/// Any `Fn(&SourceModule) -> Result<Option<Node>>` is a resolver.
pub trait ComponentResolver {
    fn resolve<'a>(&self, module: &SourceModule<'a>) -> Result<Option<Node<'a>>>;
}

impl<F> ComponentResolver for F
where
    F: for<'a> Fn(&SourceModule<'a>) -> Result<Option<Node<'a>>>,
{
    fn resolve<'a>(&self, module: &SourceModule<'a>) -> Result<Option<Node<'a>>> {
        self(module)
    }
}

/// The single exported definition, see [`find_exported_component_definition`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportedComponentResolver;

impl ComponentResolver for ExportedComponentResolver {
    fn resolve<'a>(&self, module: &SourceModule<'a>) -> Result<Option<Node<'a>>> {
        find_exported_component_definition(module)
    }
}

/// Built-in handlers in the order they run.
pub fn default_handlers() -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(component_docblock_handler),
        Box::new(display_name_handler),
        Box::new(default_props_handler),
        Box::new(prop_type_handler),
        Box::new(prop_type_composition_handler),
        Box::new(prop_docblock_handler),
    ]
}

/// Document the definition chosen by `resolver` (default:
/// [`ExportedComponentResolver`]) with `handlers` (default:
/// [`default_handlers`]).
pub fn analyze<'a>(
    module: &SourceModule<'a>,
    resolver: Option<&dyn ComponentResolver>,
    handlers: Option<&[Box<dyn Handler>]>,
) -> Result<DocumentationRecord> {
    let definition = match resolver {
        Some(resolver) => resolver.resolve(module)?,
        None => ExportedComponentResolver.resolve(module)?,
    };
    let Some(definition) = definition else {
        return Err(DocgenError::MissingDefinition);
    };
    debug!("documenting definition at {:?}", definition.span());

    Ok(match handlers {
        Some(handlers) => document(module, definition, handlers),
        None => document(module, definition, &default_handlers()),
    })
}

/// Document every component definition in the module, in source order.
pub fn analyze_all<'a>(
    module: &SourceModule<'a>,
    handlers: Option<&[Box<dyn Handler>]>,
) -> Vec<DocumentationRecord> {
    let defaults;
    let handlers = match handlers {
        Some(handlers) => handlers,
        None => {
            defaults = default_handlers();
            &defaults[..]
        }
    };
    find_all_component_definitions(module)
        .into_iter()
        .map(|definition| document(module, definition, handlers))
        .collect()
}

fn document<'a>(
    module: &SourceModule<'a>,
    definition: Node<'a>,
    handlers: &[Box<dyn Handler>],
) -> DocumentationRecord {
    let mut documentation = Documentation::new();
    for handler in handlers {
        handler.handle(&mut documentation, definition, module);
    }
    documentation.into_record()
}
