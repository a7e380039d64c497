//! # Distance-map to display-coordinate conversion
//!
//! Turns the shortest-path distances out of a feasible [`crate::graph::propagation`]
//! run into the `{start, end}` coordinates a caller actually wants to draw, per spec
//! §4.5. Nothing here runs propagation or relaxation; both `place` and `place_fallback`
//! are pure functions of their inputs.

use std::collections::HashMap;

use crate::config::SolverConfig;
use crate::graph::Vertex;
use crate::model::{Event, Position};

/// Converts `distances` (as returned by a feasible propagation from the virtual source)
/// into one [`Position`] per placeable event, normalized onto `config`'s display range.
///
/// An event whose start or end distance is missing or non-finite is omitted from the
/// output (spec §4.5 step 1 — "pathological inputs"; see SPEC_FULL.md §9).
pub fn place(events: &[Event], distances: &HashMap<Vertex, f64>, config: &SolverConfig) -> Vec<Position> {
    let raw: Vec<(&Event, f64, f64)> = events
        .iter()
        .filter_map(|event| {
            let start = *distances.get(&Vertex::Var(crate::model::EndpointVar::start(event.id.clone())))?;
            let end = *distances.get(&Vertex::Var(crate::model::EndpointVar::end(event.id.clone())))?;
            if start.is_finite() && end.is_finite() {
                Some((event, start, end))
            } else {
                None
            }
        })
        .collect();

    if raw.is_empty() {
        return Vec::new();
    }

    let lo = raw.iter().fold(f64::INFINITY, |m, (_, s, e)| m.min(*s).min(*e));
    let hi = raw.iter().fold(f64::NEG_INFINITY, |m, (_, s, e)| m.max(*s).max(*e));

    if hi <= lo {
        let mid = config.midpoint();
        return raw.iter().map(|(event, ..)| Position { event_id: event.id.clone(), start: mid, end: mid }).collect();
    }

    let normalize = |v: f64| config.pad + (v - lo) / (hi - lo) * config.usable_range();

    raw.iter()
        .map(|(event, start, end)| {
            if event.is_interval() {
                let start = normalize(*start);
                let mut end = normalize(*end);
                if end - start < config.minimum_display_width {
                    end = start + config.minimum_display_width;
                }
                Position { event_id: event.id.clone(), start, end }
            } else {
                let point = normalize(*start);
                Position { event_id: event.id.clone(), start: point, end: point }
            }
        })
        .collect()
}

/// Evenly spaces `events` across the padded display range, ignoring any distance map.
/// Used when there are no assertions to propagate, or the relaxer never reached a
/// feasible network (spec §4.5 "Fallback placement").
pub fn place_fallback(events: &[Event], config: &SolverConfig) -> Vec<Position> {
    let n = events.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        let mid = config.midpoint();
        return vec![Position { event_id: events[0].id.clone(), start: mid, end: mid }];
    }

    let span = config.usable_range();
    let step = span / n as f64;
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let slot_start = config.pad + i as f64 * step;
            if event.is_interval() {
                let width = (step * 0.8).max(config.minimum_display_width);
                Position { event_id: event.id.clone(), start: slot_start, end: slot_start + width }
            } else {
                let point = slot_start + step / 2.0;
                Position { event_id: event.id.clone(), start: point, end: point }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EndpointVar;

    fn cfg() -> SolverConfig {
        SolverConfig::default()
    }

    fn dist(pairs: &[(&str, &str, f64)]) -> HashMap<Vertex, f64> {
        pairs
            .iter()
            .map(|(event, kind, v)| {
                let var = if *kind == "start" { EndpointVar::start(*event) } else { EndpointVar::end(*event) };
                (Vertex::Var(var), *v)
            })
            .collect()
    }

    #[test]
    fn instant_collapses_to_a_single_point() {
        let events = vec![Event::instant("A"), Event::instant("B")];
        let d = dist(&[("A", "start", 0.0), ("A", "end", 0.0), ("B", "start", 10.0), ("B", "end", 10.0)]);
        let positions = place(&events, &d, &cfg());
        assert_eq!(positions.len(), 2);
        for p in &positions {
            assert_eq!(p.start, p.end);
        }
    }

    #[test]
    fn interval_respects_minimum_display_width() {
        let events = vec![Event::interval("A"), Event::instant("B")];
        let d = dist(&[("A", "start", 0.0), ("A", "end", 0.01), ("B", "start", 10.0), ("B", "end", 10.0)]);
        let positions = place(&events, &d, &cfg());
        let a = positions.iter().find(|p| p.event_id == "A").unwrap();
        assert!(a.end - a.start >= cfg().minimum_display_width - 1e-9);
    }

    #[test]
    fn degenerate_equal_bounds_places_everything_at_the_midpoint() {
        let events = vec![Event::instant("A"), Event::instant("B")];
        let d = dist(&[("A", "start", 5.0), ("A", "end", 5.0), ("B", "start", 5.0), ("B", "end", 5.0)]);
        let positions = place(&events, &d, &cfg());
        let mid = cfg().midpoint();
        assert!(positions.iter().all(|p| (p.start - mid).abs() < 1e-9));
    }

    #[test]
    fn unplaceable_event_is_omitted_not_errored() {
        let events = vec![Event::instant("A"), Event::instant("B")];
        let d = dist(&[("A", "start", 0.0), ("A", "end", 0.0)]);
        let positions = place(&events, &d, &cfg());
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].event_id, "A");
    }

    #[test]
    fn fallback_spaces_events_evenly_within_the_padded_range() {
        let events = vec![Event::instant("A"), Event::interval("B"), Event::instant("C")];
        let config = cfg();
        let positions = place_fallback(&events, &config);
        assert_eq!(positions.len(), 3);
        for p in &positions {
            assert!(p.start >= config.pad - 1e-9);
            assert!(p.end <= config.scale - config.pad + 1e-9);
        }
    }

    #[test]
    fn fallback_singleton_lands_on_the_midpoint() {
        let events = vec![Event::instant("only")];
        let config = cfg();
        let positions = place_fallback(&events, &config);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].start, config.midpoint());
    }
}
