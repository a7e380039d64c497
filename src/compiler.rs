//! # Allen relation → difference constraint translation
//!
//! Pure functions from a single [`Assertion`] (or a single [`Event`]'s internal shape)
//! to the finite list of [`DifferenceConstraint`]s it implies. Nothing here touches the
//! graph or the rest of the pipeline; see [`crate::graph`] for where these constraints
//! are accumulated.

use crate::config::SolverConfig;
use crate::model::{AssertionId, Assertion, EndpointVar, Event, Relation};

/// Provenance tag carried by every edge so the relaxer can remove all edges that came
/// from a given assertion, and so conflict witnesses can name the assertions involved.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Origin {
    /// Edge compiled from a user assertion.
    Assertion(AssertionId),
    /// `start <= end` (interval) or `start == end` (instant) internal constraint.
    EventInternal,
    /// Zero-weight fan-out edge from the injected virtual source.
    VirtualSource,
}

impl Origin {
    #[inline]
    pub fn assertion_id(&self) -> Option<&AssertionId> {
        match self {
            Origin::Assertion(id) => Some(id),
            _ => None,
        }
    }
}

/// `value(to) - value(from) <= bound`.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferenceConstraint {
    pub from: EndpointVar,
    pub to: EndpointVar,
    pub bound: f64,
    pub origin: Origin,
}

/// Translates Allen relations and per-event shape constraints into difference constraints.
pub struct Compiler;

impl Compiler {
    /// Compiles the encoding-table row for a single assertion's relation (spec §4.1).
    ///
    /// Each strict `<` becomes a bound of `-epsilon`; each `=` becomes two opposite
    /// constraints with bound `0`.
    pub fn compile_assertion(assertion: &Assertion, config: &SolverConfig) -> Vec<DifferenceConstraint> {
        let a_s = EndpointVar::start(assertion.source_id.clone());
        let a_e = EndpointVar::end(assertion.source_id.clone());
        let b_s = EndpointVar::start(assertion.target_id.clone());
        let b_e = EndpointVar::end(assertion.target_id.clone());
        let origin = Origin::Assertion(assertion.id.clone());
        let eps = config.epsilon;

        // x < y  =>  x - y <= -eps  =>  edge(from=y, to=x, weight=-eps)
        let lt = |x: EndpointVar, y: EndpointVar| DifferenceConstraint {
            from: y, to: x, bound: -eps, origin: origin.clone(),
        };
        // x == y =>  x - y <= 0  and  y - x <= 0
        let eq = |x: EndpointVar, y: EndpointVar, out: &mut Vec<DifferenceConstraint>| {
            out.push(DifferenceConstraint { from: y.clone(), to: x.clone(), bound: 0.0, origin: origin.clone() });
            out.push(DifferenceConstraint { from: x, to: y, bound: 0.0, origin: origin.clone() });
        };

        let mut out = Vec::new();
        match assertion.relation {
            Relation::Before => out.push(lt(a_e, b_s)),
            Relation::After => out.push(lt(b_e, a_s)),
            Relation::Meets => eq(a_e, b_s, &mut out),
            Relation::MetBy => eq(a_s, b_e, &mut out),
            Relation::Overlaps => {
                out.push(lt(a_s.clone(), b_s.clone()));
                out.push(lt(b_s, a_e.clone()));
                out.push(lt(a_e, b_e));
            }
            Relation::OverlappedBy => {
                out.push(lt(b_s.clone(), a_s.clone()));
                out.push(lt(a_s, b_e.clone()));
                out.push(lt(b_e, a_e));
            }
            Relation::Starts => {
                eq(a_s, b_s, &mut out);
                out.push(lt(a_e, b_e));
            }
            Relation::StartedBy => {
                eq(a_s, b_s, &mut out);
                out.push(lt(b_e, a_e));
            }
            Relation::Finishes => {
                out.push(lt(b_s, a_s));
                eq(a_e, b_e, &mut out);
            }
            Relation::FinishedBy => {
                out.push(lt(a_s, b_s));
                eq(a_e, b_e, &mut out);
            }
            Relation::During => {
                out.push(lt(b_s, a_s));
                out.push(lt(a_e, b_e));
            }
            Relation::Contains => {
                out.push(lt(a_s, b_s));
                out.push(lt(b_e, a_e));
            }
            Relation::Equals => {
                eq(a_s, b_s, &mut out);
                eq(a_e, b_e, &mut out);
            }
        }
        out
    }

    /// Compiles the per-event internal shape constraint: `start == end` for an instant,
    /// `end - start >= mu` for an interval.
    pub fn compile_event_internal(event: &Event, config: &SolverConfig) -> Vec<DifferenceConstraint> {
        let start = EndpointVar::start(event.id.clone());
        let end = EndpointVar::end(event.id.clone());
        if event.is_interval() {
            // end - start >= mu  <=>  start - end <= -mu
            vec![DifferenceConstraint { from: end, to: start, bound: -config.mu, origin: Origin::EventInternal }]
        } else {
            vec![
                DifferenceConstraint { from: end.clone(), to: start.clone(), bound: 0.0, origin: Origin::EventInternal },
                DifferenceConstraint { from: start, to: end, bound: 0.0, origin: Origin::EventInternal },
            ]
        }
    }
}
