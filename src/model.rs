//! # Events, assertions and the shapes that flow in and out of the solver

use std::fmt;

/// Stable identifier of an [`Event`].
pub type EventId = String;

/// Stable identifier of an [`Assertion`].
pub type AssertionId = String;

/// Whether an event occupies a single instant or spans a non-zero duration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationKind {
    Instant,
    Interval,
}

/// A dated event contributing two endpoint variables (`start`, `end`) to the graph.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub id: EventId,
    pub duration: DurationKind,
    pub enabled: bool,
}

impl Event {
    pub fn instant(id: impl Into<EventId>) -> Self {
        Self { id: id.into(), duration: DurationKind::Instant, enabled: true }
    }

    pub fn interval(id: impl Into<EventId>) -> Self {
        Self { id: id.into(), duration: DurationKind::Interval, enabled: true }
    }

    #[inline]
    pub fn is_interval(&self) -> bool {
        matches!(self.duration, DurationKind::Interval)
    }
}

/// One of the thirteen Allen interval relations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    Before,
    After,
    Meets,
    MetBy,
    Overlaps,
    OverlappedBy,
    Starts,
    StartedBy,
    Finishes,
    FinishedBy,
    During,
    Contains,
    Equals,
}

impl Relation {
    /// The inverse relation: `A R B` holds iff `B R.inverse() A` holds.
    ///
    /// Used by the inverse-symmetry property test (spec §8 property 7).
    pub const fn inverse(self) -> Relation {
        use Relation::*;
        match self {
            Before => After,
            After => Before,
            Meets => MetBy,
            MetBy => Meets,
            Overlaps => OverlappedBy,
            OverlappedBy => Overlaps,
            Starts => StartedBy,
            StartedBy => Starts,
            Finishes => FinishedBy,
            FinishedBy => Finishes,
            During => Contains,
            Contains => During,
            Equals => Equals,
        }
    }

    /// Lower-case, hyphenated name as used in human-readable messages.
    pub fn name(self) -> &'static str {
        use Relation::*;
        match self {
            Before => "before",
            After => "after",
            Meets => "meets",
            MetBy => "met-by",
            Overlaps => "overlaps",
            OverlappedBy => "overlapped-by",
            Starts => "starts",
            StartedBy => "started-by",
            Finishes => "finishes",
            FinishedBy => "finished-by",
            During => "during",
            Contains => "contains",
            Equals => "equals",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordinal trust level attached to an [`Assertion`], controlling removal priority
/// during relaxation. Only the relative order matters; the numeric weights are an
/// implementation detail exposed for diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Confidence {
    Speculation,
    Inferred,
    Explicit,
}

impl Confidence {
    /// A strictly decreasing priority weight, suggested by the spec as 1000/100/10.
    pub const fn weight(self) -> u32 {
        match self {
            Confidence::Explicit => 1000,
            Confidence::Inferred => 100,
            Confidence::Speculation => 10,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::Explicit => "explicit",
            Confidence::Inferred => "inferred",
            Confidence::Speculation => "speculation",
        })
    }
}

/// A directed qualitative temporal assertion between two events.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assertion {
    pub id: AssertionId,
    pub source_id: EventId,
    pub target_id: EventId,
    pub relation: Relation,
    pub confidence: Confidence,
    pub enabled: bool,
}

impl Assertion {
    pub fn new(
        id: impl Into<AssertionId>,
        source_id: impl Into<EventId>,
        relation: Relation,
        target_id: impl Into<EventId>,
        confidence: Confidence,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            relation,
            target_id: target_id.into(),
            confidence,
            enabled: true,
        }
    }
}

/// Which endpoint of an event a variable refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EndpointKind {
    Start,
    End,
}

/// One of the two real-valued temporal coordinates associated with an event.
///
/// Stored as a typed `(event, kind)` pair rather than a pre-formatted string so the
/// hot path (graph lookups) never re-parses text; [`EndpointVar::canonical`] produces
/// the `{event_id}_start` / `{event_id}_end` form the spec describes for diagnostics.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EndpointVar {
    pub event: EventId,
    pub kind: EndpointKind,
}

impl EndpointVar {
    #[inline]
    pub fn start(event: impl Into<EventId>) -> Self {
        Self { event: event.into(), kind: EndpointKind::Start }
    }

    #[inline]
    pub fn end(event: impl Into<EventId>) -> Self {
        Self { event: event.into(), kind: EndpointKind::End }
    }

    /// The canonical string form: the event id with a `_start`/`_end` suffix.
    pub fn canonical(&self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for EndpointVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EndpointKind::Start => write!(f, "{}_start", self.event),
            EndpointKind::End => write!(f, "{}_end", self.event),
        }
    }
}

/// Final status of a [`crate::solve`] invocation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    Satisfiable,
    Relaxed,
    Unsatisfiable,
}

/// `soft` for a discarded speculation-tier assertion, `hard` for anything stronger.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Soft,
    Hard,
}

impl From<Confidence> for Severity {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::Speculation => Severity::Soft,
            Confidence::Inferred | Confidence::Explicit => Severity::Hard,
        }
    }
}

/// One assertion discarded during relaxation, with a human-readable explanation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    pub assertion_id: AssertionId,
    pub severity: Severity,
    pub message: String,
}

/// A surviving, unresolved conflict witness (only populated in the unsatisfiable branch).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conflict {
    pub assertion_ids: Vec<AssertionId>,
    pub description: String,
}

/// One placed event: `start <= end`, instants have `start == end`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub event_id: EventId,
    pub start: f64,
    pub end: f64,
}

/// The result of a single [`crate::solve`] invocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    pub status: SolveStatus,
    pub positions: Vec<Position>,
    pub violations: Vec<Violation>,
    pub conflicts: Vec<Conflict>,
    pub elapsed_ms: f64,
}

/// Bundled solve input, mirroring the "Solve request" shape of the external interface.
///
/// [`crate::solve`] also accepts the two slices directly; this type exists for callers
/// that want a single serializable value to hand to (or receive from) a host process.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    pub events: Vec<Event>,
    pub assertions: Vec<Assertion>,
}
