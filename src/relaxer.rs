//! # Confidence-weighted priority relaxation
//!
//! Drives the main repair loop of spec §4.4: while the network built from the
//! surviving assertions is infeasible, discard the lowest-confidence assertion named
//! in the reported witness and rebuild from scratch. The graph is rebuilt rather than
//! edited in place on each iteration — simpler, and the teacher crate's own `extend`/
//! `global_propagation` path already favors a full rebuild over incremental edits when
//! more than one constraint changes at once, which is exactly this loop's situation.

use std::collections::HashSet;
use tracing::debug;

use crate::compiler::Compiler;
use crate::config::SolverConfig;
use crate::graph::propagation::{propagate, PropagationResult};
use crate::graph::{Graph, Vertex};
use crate::model::{Assertion, AssertionId, Event};

/// Outcome of running the relaxer to completion.
pub struct RelaxResult {
    pub graph: Graph,
    pub propagation: PropagationResult,
    /// Discarded assertion ids, in the order they were removed.
    pub discarded: Vec<AssertionId>,
    /// Assertion ids still active when the loop stopped.
    pub surviving: Vec<AssertionId>,
    pub iterations: usize,
}

/// Builds a fresh graph from `events` and `assertions` (ignoring `enabled` — the caller
/// is expected to have already filtered disabled events/assertions out).
pub fn build_graph(events: &[Event], assertions: &[Assertion], config: &SolverConfig) -> Graph {
    let mut graph = Graph::new();
    for event in events {
        graph.add_vertex(Vertex::Var(crate::model::EndpointVar::start(event.id.clone())));
        graph.add_vertex(Vertex::Var(crate::model::EndpointVar::end(event.id.clone())));
        for c in Compiler::compile_event_internal(event, config) {
            graph.add_edge(Vertex::Var(c.from), Vertex::Var(c.to), c.bound, c.origin);
        }
    }
    for assertion in assertions {
        for c in Compiler::compile_assertion(assertion, config) {
            graph.add_edge(Vertex::Var(c.from), Vertex::Var(c.to), c.bound, c.origin);
        }
    }
    graph.inject_virtual_source();
    graph
}

/// Runs the relaxer to completion per spec §4.4.
pub fn relax(events: &[Event], assertions: &[Assertion], config: &SolverConfig) -> RelaxResult {
    // Sorted once, ascending by confidence weight; candidates for removal come first.
    // Ties within the same confidence are broken by input order, discarding the later
    // assertion first (spec: "ties are broken by input order: the second"), so we sort
    // by descending original index as the secondary key.
    let mut order: Vec<usize> = (0..assertions.len()).collect();
    order.sort_by(|&i, &j| {
        assertions[i].confidence.weight().cmp(&assertions[j].confidence.weight()).then(j.cmp(&i))
    });
    let priority: Vec<AssertionId> = order.into_iter().map(|i| assertions[i].id.clone()).collect();

    let mut surviving: HashSet<AssertionId> = assertions.iter().map(|a| a.id.clone()).collect();
    let mut discarded = Vec::new();

    let cap = config.relaxer_iteration_cap.min(assertions.len().max(1));
    for iterations in 1..=cap {
        let live_assertions: Vec<Assertion> =
            assertions.iter().filter(|a| surviving.contains(&a.id)).cloned().collect();
        let graph = build_graph(events, &live_assertions, config);
        let propagation = propagate(&graph, &Vertex::Source);

        let witness = match &propagation {
            PropagationResult::Feasible(_) => {
                debug!(iterations, discarded = discarded.len(), "relaxation reached a feasible network");
                return finish(graph, propagation, discarded, &priority, &surviving, iterations);
            }
            PropagationResult::Infeasible(witness) => witness,
        };

        let removable = priority
            .iter()
            .find(|id| surviving.contains(*id) && witness.cycle_origin_ids.contains(id))
            .cloned();

        match removable {
            Some(id) if iterations < cap => {
                debug!(assertion = %id, "discarding lowest-confidence assertion in witness");
                surviving.remove(&id);
                discarded.push(id);
            }
            _ => {
                debug!("relaxation stopped without reaching a feasible network");
                return finish(graph, propagation, discarded, &priority, &surviving, iterations);
            }
        }
    }
    unreachable!("loop always returns by the time iterations reaches cap")
}

/// Enumerates more conflicts than the single witness the main relaxer happens to hit
/// (spec §4.7). Runs on the full, un-relaxed graph; each time propagation is infeasible
/// its witness assertions are recorded and removed in place from the live graph, then
/// propagation runs again without rebuilding from the original assertion list.
///
/// Does not affect [`crate::orchestrator::solve`]'s output; it exists for callers that
/// want to surface more than one conflict at a time (e.g. "show me everything that's wrong").
pub fn find_all_conflicts(
    events: &[Event],
    assertions: &[Assertion],
    config: &SolverConfig,
) -> Vec<Vec<AssertionId>> {
    let mut graph = build_graph(events, assertions, config);
    let mut conflicts = Vec::new();

    loop {
        match propagate(&graph, &Vertex::Source) {
            PropagationResult::Feasible(_) => break,
            PropagationResult::Infeasible(witness) => {
                if witness.cycle_origin_ids.is_empty() {
                    break;
                }
                for id in &witness.cycle_origin_ids {
                    graph.remove_by_assertion(id);
                }
                conflicts.push(witness.cycle_origin_ids);
            }
        }
    }
    conflicts
}

fn finish(
    graph: Graph,
    propagation: PropagationResult,
    discarded: Vec<AssertionId>,
    priority: &[AssertionId],
    surviving: &HashSet<AssertionId>,
    iterations: usize,
) -> RelaxResult {
    RelaxResult {
        graph,
        propagation,
        discarded,
        surviving: priority.iter().filter(|id| surviving.contains(*id)).cloned().collect(),
        iterations,
    }
}
