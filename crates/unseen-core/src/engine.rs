//! The simulation engine — applies a deficiency to nodes and undoes it.
//!
//! One [`SimulationEngine`] value spans one activation: from the first
//! processed node until [`SimulationEngine::restore_all`]. Everything runs
//! synchronously on the caller's thread. For large documents,
//! [`SimulationEngine::process_iter`] yields one node at a time so the
//! caller can bound how much work happens per step.

use crate::cache::{StyleMutationCache, StyleSnapshot};
use crate::deficiency::Deficiency;
use crate::error::SimulationError;
use crate::params::SimulationParams;
use crate::parse::{parse_color, parse_gradient};
use crate::surface::{NodeId, StyleProperty, StyleSurface};

/// Result of processing a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub node: NodeId,
    /// Whether this call took the node's snapshot.
    pub newly_cached: bool,
    /// Properties whose inline value was rewritten.
    pub mutated: Vec<StyleProperty>,
}

/// Summary of a batch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub mutated: usize,
    pub failed: Vec<(NodeId, SimulationError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Summary of a restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    pub failed: Vec<(NodeId, SimulationError)>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Simulated replacement for a rendered property value.
///
/// Solid-color properties yield `rgb(r, g, b)`; `background-image` yields a
/// reconstructed linear gradient. Returns `None` when there is nothing to
/// simulate: no color, no recognizable gradient, or a box shadow.
pub fn simulate_property(
    property: StyleProperty,
    rendered: &str,
    deficiency: Deficiency,
) -> Option<String> {
    match property {
        p if p.is_solid_color() => {
            parse_color(rendered).map(|rgb| deficiency.simulate(rgb).to_string())
        }
        StyleProperty::BackgroundImage => {
            parse_gradient(rendered).map(|g| g.simulate(deficiency).reconstruct())
        }
        _ => None,
    }
}

/// Engine context owning the mutation cache for one activation.
#[derive(Debug, Default)]
pub struct SimulationEngine {
    cache: StyleMutationCache,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &StyleMutationCache {
        &self.cache
    }

    /// Number of nodes that will be restored by [`Self::restore_all`].
    pub fn pending(&self) -> usize {
        self.cache.len()
    }

    /// Simulate `params.deficiency` on one node.
    ///
    /// Snapshots the node's inline styles on first contact, then rewrites
    /// each configured property whose rendered value holds a color. Calling
    /// this again on the same node keeps the first snapshot.
    pub fn process<S: StyleSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        node: NodeId,
        params: &SimulationParams,
    ) -> Result<ProcessOutcome, SimulationError> {
        let newly_cached = self
            .cache
            .record_with(node, || StyleSnapshot::capture(&*surface, node))?;

        let mut mutated = Vec::new();
        for &property in &params.properties {
            let rendered = surface.rendered(node, property)?;
            let Some(value) = simulate_property(property, &rendered, params.deficiency) else {
                continue;
            };
            surface.set_inline(node, property, &value)?;
            tracing::debug!("{node} {property}: {rendered} -> {value}");
            mutated.push(property);
        }

        Ok(ProcessOutcome {
            node,
            newly_cached,
            mutated,
        })
    }

    /// Lazily process `nodes`, one per call to `next`.
    ///
    /// Dropping the iterator stops the pass; nodes already processed stay
    /// cached. Starting over from the first node is safe since snapshots
    /// are first-write-wins.
    pub fn process_iter<'a, S, I>(
        &'a mut self,
        surface: &'a mut S,
        nodes: I,
        params: &'a SimulationParams,
    ) -> ProcessIter<'a, S, I::IntoIter>
    where
        S: StyleSurface + ?Sized,
        I: IntoIterator<Item = NodeId>,
    {
        ProcessIter {
            engine: self,
            surface,
            nodes: nodes.into_iter(),
            params,
        }
    }

    /// Process every node in one synchronous pass.
    ///
    /// A failing node is logged and recorded in the report; the pass
    /// continues with the remaining nodes.
    pub fn process_batch<S, I>(
        &mut self,
        surface: &mut S,
        nodes: I,
        params: &SimulationParams,
    ) -> BatchReport
    where
        S: StyleSurface + ?Sized,
        I: IntoIterator<Item = NodeId>,
    {
        let mut report = BatchReport::default();
        for (node, result) in self.process_iter(surface, nodes, params) {
            match result {
                Ok(outcome) => {
                    report.processed += 1;
                    if !outcome.mutated.is_empty() {
                        report.mutated += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to simulate {} on {node}: {e}", params.deficiency);
                    report.failed.push((node, e));
                }
            }
        }
        tracing::info!(
            "{} pass: {} processed, {} recolored, {} failed",
            params.deficiency,
            report.processed,
            report.mutated,
            report.failed.len()
        );
        report
    }

    /// Write every snapshot back and clear the cache.
    ///
    /// The cache is empty once this returns, even if some nodes could not
    /// be restored; those are logged and listed in the report.
    pub fn restore_all<S: StyleSurface + ?Sized>(&mut self, surface: &mut S) -> RestoreReport {
        let entries = self.cache.take_all();
        tracing::info!("restoring original styles for {} nodes", entries.len());

        let mut report = RestoreReport::default();
        for (node, snapshot) in entries {
            match snapshot.restore(surface, node) {
                Ok(()) => report.restored += 1,
                Err(e) => {
                    tracing::warn!("failed to restore {node}: {e}");
                    report.failed.push((node, e));
                }
            }
        }
        report
    }
}

/// Incremental pass returned by [`SimulationEngine::process_iter`].
pub struct ProcessIter<'a, S: ?Sized, I> {
    engine: &'a mut SimulationEngine,
    surface: &'a mut S,
    nodes: I,
    params: &'a SimulationParams,
}

impl<S, I> Iterator for ProcessIter<'_, S, I>
where
    S: StyleSurface + ?Sized,
    I: Iterator<Item = NodeId>,
{
    type Item = (NodeId, Result<ProcessOutcome, SimulationError>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        let result = self.engine.process(&mut *self.surface, node, self.params);
        Some((node, result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}
