//! Snapshots of author-set styles, taken before the first mutation.
//!
//! Each node moves through `unseen → cached → restored`. The first snapshot
//! of a node wins until the whole cache is drained, so simulating the same
//! node any number of times never loses its true original styles.

use std::collections::BTreeMap;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::surface::{NodeId, StyleProperty, StyleSurface};

/// The author-set values of the five color-bearing properties.
///
/// Empty strings mean "not set inline".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub background_image: String,
    pub box_shadow: String,
}

impl StyleSnapshot {
    /// Read the current inline values of `node`.
    pub fn capture<S: StyleSurface + ?Sized>(
        surface: &S,
        node: NodeId,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            color: surface.inline(node, StyleProperty::Color)?,
            background_color: surface.inline(node, StyleProperty::BackgroundColor)?,
            border_color: surface.inline(node, StyleProperty::BorderColor)?,
            background_image: surface.inline(node, StyleProperty::BackgroundImage)?,
            box_shadow: surface.inline(node, StyleProperty::BoxShadow)?,
        })
    }

    pub fn get(&self, property: StyleProperty) -> &str {
        match property {
            StyleProperty::Color => &self.color,
            StyleProperty::BackgroundColor => &self.background_color,
            StyleProperty::BorderColor => &self.border_color,
            StyleProperty::BackgroundImage => &self.background_image,
            StyleProperty::BoxShadow => &self.box_shadow,
        }
    }

    /// Write every snapshotted value back as the inline value of `node`.
    ///
    /// Every property is attempted even after a write fails; the first
    /// failure is returned once all writes have been tried.
    pub fn restore<S: StyleSurface + ?Sized>(
        &self,
        surface: &mut S,
        node: NodeId,
    ) -> Result<(), SimulationError> {
        let mut first_err = None;
        for property in StyleProperty::ALL {
            if let Err(e) = surface.set_inline(node, property, self.get(property)) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// Per-node snapshots for one activation.
#[derive(Debug, Clone, Default)]
pub struct StyleMutationCache {
    entries: BTreeMap<NodeId, StyleSnapshot>,
}

impl StyleMutationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot for `node` unless one already exists.
    ///
    /// `capture` only runs for unseen nodes. Returns `true` when a new entry
    /// was created; a failed capture leaves the node unseen.
    pub fn record_with<F>(&mut self, node: NodeId, capture: F) -> Result<bool, SimulationError>
    where
        F: FnOnce() -> Result<StyleSnapshot, SimulationError>,
    {
        if self.entries.contains_key(&node) {
            return Ok(false);
        }
        self.entries.insert(node, capture()?);
        Ok(true)
    }

    pub fn get(&self, node: NodeId) -> Option<&StyleSnapshot> {
        self.entries.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry, leaving the cache empty.
    pub fn take_all(&mut self) -> BTreeMap<NodeId, StyleSnapshot> {
        mem::take(&mut self.entries)
    }
}
