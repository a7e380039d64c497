//! # Orchestrator: the single public entry point
//!
//! Wires the Compiler, Graph, Propagator, Relaxer and Placer together per spec §4.6.
//! Every other module is pure and stateless; this is the only place that measures
//! wall-clock time and emits `tracing` spans.

use std::time::Instant;

use tracing::{debug, instrument};

use crate::config::SolverConfig;
use crate::graph::propagation::PropagationResult;
use crate::model::{
    Assertion, Conflict, Event, Severity, SolveResult, SolveStatus, Violation,
};
use crate::placer::{place, place_fallback};
use crate::relaxer::relax;

/// Solves a single timeline: compiles `events`/`assertions` into difference
/// constraints, relaxes away the lowest-confidence assertions needed to reach a
/// feasible network, and places the result on `config`'s display range.
///
/// Callers are expected to have already filtered out disabled events/assertions;
/// this function does not consult the `enabled` field itself.
#[instrument(skip(events, assertions, config), fields(events = events.len(), assertions = assertions.len()))]
pub fn solve(events: &[Event], assertions: &[Assertion], config: &SolverConfig) -> SolveResult {
    let started = Instant::now();

    if events.is_empty() {
        return finish(SolveStatus::Satisfiable, Vec::new(), Vec::new(), Vec::new(), started);
    }

    if assertions.is_empty() {
        debug!("no assertions; using fallback placement");
        return finish(SolveStatus::Satisfiable, place_fallback(events, config), Vec::new(), Vec::new(), started);
    }

    let outcome = relax(events, assertions, config);

    match &outcome.propagation {
        PropagationResult::Feasible(feasible) => {
            let positions = place(events, &feasible.distances, config);
            if outcome.discarded.is_empty() {
                debug!("network satisfiable without relaxation");
                finish(SolveStatus::Satisfiable, positions, Vec::new(), Vec::new(), started)
            } else {
                debug!(discarded = outcome.discarded.len(), "network satisfiable after relaxation");
                let violations = build_violations(&outcome.discarded, assertions);
                finish(SolveStatus::Relaxed, positions, violations, Vec::new(), started)
            }
        }
        PropagationResult::Infeasible(witness) => {
            debug!("relaxer exhausted without reaching a feasible network");
            let conflict = Conflict {
                assertion_ids: witness.cycle_origin_ids.clone(),
                description: describe_conflict(&witness.cycle_origin_ids, assertions),
            };
            finish(SolveStatus::Unsatisfiable, place_fallback(events, config), Vec::new(), vec![conflict], started)
        }
    }
}

fn finish(
    status: SolveStatus,
    positions: Vec<crate::model::Position>,
    violations: Vec<Violation>,
    conflicts: Vec<Conflict>,
    started: Instant,
) -> SolveResult {
    SolveResult { status, positions, violations, conflicts, elapsed_ms: started.elapsed().as_secs_f64() * 1000.0 }
}

fn build_violations(discarded: &[crate::model::AssertionId], assertions: &[Assertion]) -> Vec<Violation> {
    discarded
        .iter()
        .filter_map(|id| assertions.iter().find(|a| &a.id == id))
        .map(|a| Violation {
            assertion_id: a.id.clone(),
            severity: Severity::from(a.confidence),
            message: format!(
                "discarded '{}' ({} {} {}) to restore a feasible timeline",
                a.id, a.source_id, a.relation, a.target_id
            ),
        })
        .collect()
}

fn describe_conflict(ids: &[crate::model::AssertionId], assertions: &[Assertion]) -> String {
    if ids.is_empty() {
        return "the timeline has no feasible arrangement of events".to_string();
    }
    let parts: Vec<String> = ids
        .iter()
        .filter_map(|id| assertions.iter().find(|a| &a.id == id))
        .map(|a| format!("{} {} {}", a.source_id, a.relation, a.target_id))
        .collect();
    format!("no feasible arrangement satisfies all of: {}", parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, Relation};

    fn cfg() -> SolverConfig {
        SolverConfig::default()
    }

    #[test]
    fn s1_fully_consistent_chain_is_satisfiable() {
        let events = vec![Event::instant("A"), Event::instant("B"), Event::instant("C")];
        let assertions = vec![
            Assertion::new("a1", "A", Relation::Before, "B", Confidence::Explicit),
            Assertion::new("a2", "B", Relation::Before, "C", Confidence::Explicit),
        ];
        let result = solve(&events, &assertions, &cfg());
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert!(result.violations.is_empty());
        assert_eq!(result.positions.len(), 3);
        let a = result.positions.iter().find(|p| p.event_id == "A").unwrap();
        let b = result.positions.iter().find(|p| p.event_id == "B").unwrap();
        let c = result.positions.iter().find(|p| p.event_id == "C").unwrap();
        assert!(a.start < b.start);
        assert!(b.start < c.start);
    }

    #[test]
    fn s3_conflicting_cycle_is_relaxed_by_discarding_the_weakest_link() {
        let events = vec![Event::instant("A"), Event::instant("B"), Event::instant("C")];
        let assertions = vec![
            Assertion::new("a1", "A", Relation::Before, "B", Confidence::Explicit),
            Assertion::new("a2", "B", Relation::Before, "C", Confidence::Explicit),
            Assertion::new("a3", "C", Relation::Before, "A", Confidence::Speculation),
        ];
        let result = solve(&events, &assertions, &cfg());
        assert_eq!(result.status, SolveStatus::Relaxed);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].assertion_id, "a3");
        assert_eq!(result.violations[0].severity, Severity::Soft);
    }

    #[test]
    fn s6_empty_input_is_trivially_satisfiable() {
        let result = solve(&[], &[], &cfg());
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert!(result.positions.is_empty());
    }

    #[test]
    fn s6_singleton_lands_on_the_midpoint() {
        let events = vec![Event::instant("A")];
        let result = solve(&events, &[], &cfg());
        assert_eq!(result.status, SolveStatus::Satisfiable);
        assert_eq!(result.positions.len(), 1);
        assert_eq!(result.positions[0].start, cfg().midpoint());
    }

    #[test]
    fn mutually_contradictory_explicit_assertions_relax_via_tie_break() {
        // Both assertions are explicit, so this is a removable conflict decided purely
        // by the tie-break rule (spec S4: ties broken by input order, the second
        // assertion discarded), not an intrinsic one.
        let events = vec![Event::instant("A"), Event::instant("B")];
        let assertions = vec![
            Assertion::new("a1", "A", Relation::Before, "B", Confidence::Explicit),
            Assertion::new("a2", "B", Relation::Before, "A", Confidence::Explicit),
        ];
        let result = solve(&events, &assertions, &cfg());
        assert_eq!(result.status, SolveStatus::Relaxed);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].assertion_id, "a2");
        assert_eq!(result.violations[0].severity, Severity::Hard);
    }

    #[test]
    fn iteration_cap_too_small_surfaces_as_unsatisfiable() {
        // Two independent contradictions need two discards to resolve; capping the
        // relaxer at a single iteration forces it to give up before either is removed,
        // surfacing genuinely as `unsatisfiable` (spec §4.4's bounded-iteration case).
        let tight_cap = SolverConfig::new(2f64.powi(-20), 1.0, 1000.0, 50.0, 20.0, 1).unwrap();
        let events = vec![
            Event::instant("A"),
            Event::instant("B"),
            Event::instant("C"),
            Event::instant("D"),
        ];
        let assertions = vec![
            Assertion::new("a1", "A", Relation::Before, "B", Confidence::Explicit),
            Assertion::new("a2", "B", Relation::Before, "A", Confidence::Explicit),
            Assertion::new("a3", "C", Relation::Before, "D", Confidence::Explicit),
            Assertion::new("a4", "D", Relation::Before, "C", Confidence::Explicit),
        ];
        let result = solve(&events, &assertions, &tight_cap);
        assert_eq!(result.status, SolveStatus::Unsatisfiable);
        assert_eq!(result.conflicts.len(), 1);
        assert!(!result.positions.is_empty());
    }

    #[test]
    fn interval_minimum_width_is_respected_end_to_end() {
        let events = vec![Event::interval("A")];
        let assertions = vec![Assertion::new("a1", "A", Relation::Equals, "A", Confidence::Explicit)];
        let result = solve(&events, &assertions, &cfg());
        let a = &result.positions[0];
        assert!(a.end - a.start >= cfg().minimum_display_width - 1e-9);
    }

    #[test]
    fn elapsed_ms_is_recorded() {
        let result = solve(&[], &[], &cfg());
        assert!(result.elapsed_ms >= 0.0);
    }
}
