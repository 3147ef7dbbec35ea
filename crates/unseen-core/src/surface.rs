//! The boundary between the engine and the document it recolors.
//!
//! The engine never discovers nodes on its own. Callers hand it [`NodeId`]s
//! and a [`StyleSurface`] that can read rendered values and read/write the
//! author-set (inline) values of the five color-bearing properties.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Stable handle to a style-bearing node on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The color-bearing style properties the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Color,
    BackgroundColor,
    BorderColor,
    BackgroundImage,
    BoxShadow,
}

impl StyleProperty {
    /// Every property, in snapshot order.
    pub const ALL: [Self; 5] = [
        Self::Color,
        Self::BackgroundColor,
        Self::BorderColor,
        Self::BackgroundImage,
        Self::BoxShadow,
    ];

    /// CSS property name.
    pub const fn css_name(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::BorderColor => "border-color",
            Self::BackgroundImage => "background-image",
            Self::BoxShadow => "box-shadow",
        }
    }

    /// Whether the property holds a single solid color.
    pub const fn is_solid_color(&self) -> bool {
        matches!(
            self,
            Self::Color | Self::BackgroundColor | Self::BorderColor
        )
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A document that exposes style-bearing nodes to the engine.
pub trait StyleSurface {
    /// Rendered (computed) value of `property` on `node`.
    fn rendered(&self, node: NodeId, property: StyleProperty) -> Result<String, SimulationError>;

    /// Author-set value of `property` on `node`; empty when unset.
    fn inline(&self, node: NodeId, property: StyleProperty) -> Result<String, SimulationError>;

    /// Overwrite the author-set value. An empty `value` clears it.
    fn set_inline(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<(), SimulationError>;
}

// ── In-memory surface ────────────────────────────────────────────

/// A node held by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub id: NodeId,
    /// Values coming from the cascade, used when no inline value is set.
    #[serde(default)]
    pub style: BTreeMap<StyleProperty, String>,
    /// Author-set values; these win over `style`.
    #[serde(default)]
    pub inline: BTreeMap<StyleProperty, String>,
    /// Rejects inline writes, like a node whose style is frozen.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

impl MemoryNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            style: BTreeMap::new(),
            inline: BTreeMap::new(),
            read_only: false,
        }
    }

    #[must_use]
    pub fn with_style(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.style.insert(property, value.into());
        self
    }

    #[must_use]
    pub fn with_inline(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.inline.insert(property, value.into());
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Inline value, or empty when unset.
    pub fn inline_value(&self, property: StyleProperty) -> &str {
        self.inline.get(&property).map_or("", String::as_str)
    }

    /// Inline value when set, otherwise the cascaded value.
    pub fn rendered_value(&self, property: StyleProperty) -> &str {
        match self.inline.get(&property) {
            Some(v) if !v.is_empty() => v,
            _ => self.style.get(&property).map_or("", String::as_str),
        }
    }
}

/// An in-memory document, loadable from JSON as a list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MemoryNode>", into = "Vec<MemoryNode>")]
pub struct MemorySurface {
    nodes: BTreeMap<NodeId, MemoryNode>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node.
    pub fn insert(&mut self, node: MemoryNode) {
        self.nodes.insert(node.id, node);
    }

    /// Detach a node; later reads and writes for it fail.
    pub fn remove(&mut self, id: NodeId) -> Option<MemoryNode> {
        self.nodes.remove(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn get(&self, id: NodeId) -> Result<&MemoryNode, SimulationError> {
        self.nodes.get(&id).ok_or(SimulationError::NodeUnavailable(id))
    }
}

impl TryFrom<Vec<MemoryNode>> for MemorySurface {
    type Error = String;

    fn try_from(list: Vec<MemoryNode>) -> Result<Self, Self::Error> {
        let mut nodes = BTreeMap::new();
        for node in list {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(format!("duplicate node id {id}"));
            }
        }
        Ok(Self { nodes })
    }
}

impl From<MemorySurface> for Vec<MemoryNode> {
    fn from(surface: MemorySurface) -> Self {
        surface.nodes.into_values().collect()
    }
}

impl StyleSurface for MemorySurface {
    fn rendered(&self, node: NodeId, property: StyleProperty) -> Result<String, SimulationError> {
        Ok(self.get(node)?.rendered_value(property).to_string())
    }

    fn inline(&self, node: NodeId, property: StyleProperty) -> Result<String, SimulationError> {
        Ok(self.get(node)?.inline_value(property).to_string())
    }

    fn set_inline(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<(), SimulationError> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(SimulationError::NodeUnavailable(node))?;
        if entry.read_only {
            return Err(SimulationError::Rejected {
                node,
                property,
                reason: "node is read-only".to_string(),
            });
        }
        if value.is_empty() {
            entry.inline.remove(&property);
        } else {
            entry.inline.insert(property, value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_overrides_cascade() {
        let mut surface = MemorySurface::new();
        surface.insert(
            MemoryNode::new(NodeId(1)).with_style(StyleProperty::Color, "rgb(1, 2, 3)"),
        );

        let id = NodeId(1);
        assert_eq!(surface.rendered(id, StyleProperty::Color).unwrap(), "rgb(1, 2, 3)");
        assert_eq!(surface.inline(id, StyleProperty::Color).unwrap(), "");

        surface.set_inline(id, StyleProperty::Color, "rgb(9, 9, 9)").unwrap();
        assert_eq!(surface.rendered(id, StyleProperty::Color).unwrap(), "rgb(9, 9, 9)");

        surface.set_inline(id, StyleProperty::Color, "").unwrap();
        assert_eq!(surface.rendered(id, StyleProperty::Color).unwrap(), "rgb(1, 2, 3)");
        assert!(surface.node(id).unwrap().inline.is_empty(), "empty write clears");
    }

    #[test]
    fn test_solid_color_properties() {
        let solid: Vec<_> = StyleProperty::ALL
            .into_iter()
            .filter(StyleProperty::is_solid_color)
            .collect();
        assert_eq!(
            solid,
            [
                StyleProperty::Color,
                StyleProperty::BackgroundColor,
                StyleProperty::BorderColor
            ]
        );
    }

    #[test]
    fn test_missing_node_is_unavailable() {
        let mut surface = MemorySurface::new();
        let err = surface.rendered(NodeId(7), StyleProperty::Color).unwrap_err();
        assert_eq!(err, SimulationError::NodeUnavailable(NodeId(7)));
        assert!(surface.set_inline(NodeId(7), StyleProperty::Color, "red").is_err());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut surface = MemorySurface::new();
        surface.insert(MemoryNode::new(NodeId(2)).read_only());
        let err = surface
            .set_inline(NodeId(2), StyleProperty::BorderColor, "rgb(0, 0, 0)")
            .unwrap_err();
        assert!(matches!(err, SimulationError::Rejected { .. }), "{err}");
    }

    #[test]
    fn test_json_roundtrip_uses_css_names() {
        let json = r#"[
            {"id": 3, "style": {"background-color": "rgb(255, 0, 0)"}},
            {"id": 1, "inline": {"box-shadow": "none"}}
        ]"#;
        let surface: MemorySurface = serde_json::from_str(json).unwrap();
        assert_eq!(surface.ids(), vec![NodeId(1), NodeId(3)]);
        assert_eq!(
            surface.node(NodeId(3)).unwrap().rendered_value(StyleProperty::BackgroundColor),
            "rgb(255, 0, 0)"
        );

        let back = serde_json::to_string(&surface).unwrap();
        assert!(back.contains("\"background-color\""), "{back}");
        assert!(!back.contains("read_only"), "{back}");
    }

    #[test]
    fn test_json_rejects_duplicate_ids() {
        let json = r#"[{"id": 1}, {"id": 1}]"#;
        let err = serde_json::from_str::<MemorySurface>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate node id #1"), "{err}");
    }
}
