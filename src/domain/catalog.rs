//! Block catalog: the palette of available block types.
//!
//! The catalog is the only place blocks are instantiated. It assigns
//! the identifier, copies the type's default props, and decides
//! container-capability; the engine itself never recomputes any of
//! this. Unknown type names are signaled here, before any tree
//! mutation is attempted.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::node::{BlockNode, Props};

/// Definition of one block type in the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeSpec {
    /// Type tag stored on nodes
    pub name: String,
    /// Human-readable label for palettes and tree output
    pub label: String,
    /// Whether blocks of this type carry a children sequence
    #[serde(default)]
    pub accepts_children: bool,
    /// Props a fresh block of this type starts with
    #[serde(default)]
    pub default_props: Props,
}

/// Ordered set of block types. Order is palette display order.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    types: Vec<BlockTypeSpec>,
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockCatalog {
    /// Catalog with no types registered.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// The built-in palette: section/row/col containers plus
    /// text/image/button/hero leaves.
    pub fn builtin() -> Self {
        let types = vec![
            spec("section", "Section", true, json!({ "bg": "#ffffff", "pad": 16 })),
            spec("row", "Row", true, json!({ "cols": 2, "gap": 16 })),
            spec("col", "Column", true, json!({})),
            spec(
                "text",
                "Text",
                false,
                json!({ "as": "p", "value": "Your text here..." }),
            ),
            spec("image", "Image", false, json!({ "src": "", "alt": "placeholder" })),
            spec(
                "button",
                "Button",
                false,
                json!({ "label": "Click me", "href": "#" }),
            ),
            spec(
                "hero",
                "Hero",
                false,
                json!({ "title": "Welcome", "subtitle": "Build pages from blocks", "imageUrl": "" }),
            ),
        ];
        Self { types }
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&BlockTypeSpec> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Whether the named type accepts children. Unknown names are not
    /// containers.
    pub fn is_container_type(&self, name: &str) -> bool {
        self.get(name).map(|t| t.accepts_children).unwrap_or(false)
    }

    /// Instantiate a fresh block of the named type: new unique id,
    /// copy of the default props, empty children iff container-capable.
    pub fn create_default(&self, name: &str) -> Result<BlockNode, DomainError> {
        let spec = self
            .get(name)
            .ok_or_else(|| DomainError::UnknownBlockType(name.to_string()))?;
        Ok(BlockNode {
            id: Uuid::new_v4().to_string(),
            block_type: spec.name.clone(),
            props: spec.default_props.clone(),
            children: spec.accepts_children.then(Vec::new),
        })
    }

    /// Register an additional type (e.g. from configuration).
    pub fn register(&mut self, spec: BlockTypeSpec) -> Result<(), DomainError> {
        if self.get(&spec.name).is_some() {
            return Err(DomainError::DuplicateBlockType(spec.name));
        }
        self.types.push(spec);
        Ok(())
    }

    /// Iterate the palette in display order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockTypeSpec> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn spec(name: &str, label: &str, accepts_children: bool, default_props: Value) -> BlockTypeSpec {
    let default_props = match default_props {
        Value::Object(map) => map,
        _ => Props::new(),
    };
    BlockTypeSpec {
        name: name.to_string(),
        label: label.to_string(),
        accepts_children,
        default_props,
    }
}
