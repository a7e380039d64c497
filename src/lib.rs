//! # chronoplace
//!
//! Places dated events on a one-dimensional display axis from a set of qualitative
//! Allen-interval-algebra assertions between them.
//!
//! Each assertion (`A before B`, `A overlaps B`, ...) is compiled into one or more
//! difference constraints (`value(y) - value(x) <= bound`) over the start/end
//! variables of the two events involved. The resulting constraint graph is checked for
//! feasibility with Bellman-Ford; if the network is infeasible, the lowest-confidence
//! assertion implicated in the negative cycle is discarded and the network rebuilt,
//! repeating until a feasible network is found or no assertion is left to discard.
//! The feasible network's shortest-path distances from a virtual source are then
//! normalized onto a configurable display range.
//!
//! The single entry point is [`solve`]. Everything upstream of it ([`compiler`],
//! [`graph`], [`relaxer`], [`placer`]) is exposed for callers that want to drive the
//! pipeline one stage at a time (e.g. to call [`relaxer::find_all_conflicts`]).

pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod orchestrator;
pub mod placer;
pub mod relaxer;
pub mod worker;

pub use config::SolverConfig;
pub use error::ConfigError;
pub use model::{
    Assertion, AssertionId, Confidence, Conflict, DurationKind, EndpointKind, EndpointVar, Event,
    EventId, Position, Relation, Severity, SolveRequest, SolveResult, SolveStatus, Violation,
};
pub use orchestrator::solve;
