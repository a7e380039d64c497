//! # Difference-constraint graph
//!
//! An in-memory directed weighted multigraph keyed by [`Vertex`]. Every edge carries
//! the [`Origin`] it came from so the relaxer can remove all edges contributed by a
//! given assertion, and so a negative-cycle witness can be translated back into the
//! assertion ids that caused it.
//!
//! The teacher crate keeps its constraint table as a dense `(max,+)` matrix and
//! propagates it with an incremental Floyd-Warshall-style pass (see
//! [`crate::graph::propagation`] for how this crate instead runs Bellman-Ford from an
//! injected source, following the shape of an `IncSTN`-style distance graph); the
//! adjacency-list-plus-tightening-policy shape below is the same idea applied to a
//! sparse graph keyed by named variables instead of small integer instants.

pub mod propagation;

use std::collections::HashMap;
use std::fmt;
use crate::compiler::Origin;
use crate::model::EndpointVar;

/// A vertex of the constraint graph: either a named endpoint variable or the
/// distinguished virtual source injected before propagation (spec §4.2).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Vertex {
    Var(EndpointVar),
    Source,
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Var(v) => write!(f, "{}", v),
            Vertex::Source => f.write_str("<source>"),
        }
    }
}

/// A single directed edge: `value(to) - value(from) <= weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub to: Vertex,
    pub weight: f64,
    pub origin: Origin,
}

/// A directed weighted multigraph over [`Vertex`] with provenance-tagged, tightened edges.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: HashMap<Vertex, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `v` exists as a vertex, even with no outgoing edges yet.
    pub fn add_vertex(&mut self, v: Vertex) {
        self.adjacency.entry(v).or_default();
    }

    /// Inserts `from -> to` with the tightening policy of spec §4.2: the tighter of the
    /// new and any existing weight between the same pair wins; ties keep the existing edge.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, weight: f64, origin: Origin) {
        self.adjacency.entry(to.clone()).or_default();
        let edges = self.adjacency.entry(from).or_default();
        if let Some(existing) = edges.iter_mut().find(|e| e.to == to) {
            if weight < existing.weight {
                existing.weight = weight;
                existing.origin = origin;
            }
        } else {
            edges.push(Edge { to, weight, origin });
        }
    }

    /// Adds a zero-weight edge from [`Vertex::Source`] to every vertex currently in the
    /// graph, guaranteeing every variable is reachable from the source (spec §4.2).
    pub fn inject_virtual_source(&mut self) {
        let targets: Vec<Vertex> = self.adjacency.keys().cloned().collect();
        for v in targets {
            self.add_edge(Vertex::Source, v, 0.0, Origin::VirtualSource);
        }
        self.adjacency.entry(Vertex::Source).or_default();
    }

    #[inline]
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.adjacency.keys()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edges_from(&self, v: &Vertex) -> &[Edge] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All `(from, edge)` pairs in the graph, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Edge)> {
        self.adjacency.iter().flat_map(|(from, edges)| edges.iter().map(move |e| (from, e)))
    }

    /// Removes every edge whose origin is `Origin::Assertion(id)`, in place.
    ///
    /// Used by the exploratory `find_all_conflicts` helper (spec §4.7), not by the main
    /// relaxer, which rebuilds the whole graph from scratch on each iteration instead.
    pub fn remove_by_assertion(&mut self, id: &str) {
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.origin.assertion_id().map(|a| a.as_str()) != Some(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str) -> Vertex {
        Vertex::Var(EndpointVar::start(name))
    }

    #[test]
    fn tightening_keeps_the_smaller_weight() {
        let mut g = Graph::new();
        g.add_edge(v("a"), v("b"), 5.0, Origin::EventInternal);
        g.add_edge(v("a"), v("b"), 2.0, Origin::Assertion("k1".into()));
        assert_eq!(g.edges_from(&v("a")).len(), 1);
        assert_eq!(g.edges_from(&v("a"))[0].weight, 2.0);
    }

    #[test]
    fn tightening_ignores_a_looser_bound() {
        let mut g = Graph::new();
        g.add_edge(v("a"), v("b"), 2.0, Origin::EventInternal);
        g.add_edge(v("a"), v("b"), 5.0, Origin::Assertion("k1".into()));
        assert_eq!(g.edges_from(&v("a"))[0].weight, 2.0);
        assert!(matches!(g.edges_from(&v("a"))[0].origin, Origin::EventInternal));
    }

    #[test]
    fn virtual_source_reaches_every_vertex() {
        let mut g = Graph::new();
        g.add_edge(v("a"), v("b"), 1.0, Origin::EventInternal);
        g.add_vertex(v("c"));
        g.inject_virtual_source();
        let reached: Vec<_> = g.edges_from(&Vertex::Source).iter().map(|e| e.to.clone()).collect();
        assert!(reached.contains(&v("a")));
        assert!(reached.contains(&v("b")));
        assert!(reached.contains(&v("c")));
    }

    #[test]
    fn remove_by_assertion_drops_only_matching_edges() {
        let mut g = Graph::new();
        g.add_edge(v("a"), v("b"), 1.0, Origin::Assertion("k1".into()));
        g.add_edge(v("b"), v("a"), 1.0, Origin::Assertion("k2".into()));
        g.remove_by_assertion("k1");
        assert!(g.edges_from(&v("a")).is_empty());
        assert_eq!(g.edges_from(&v("b")).len(), 1);
    }
}
