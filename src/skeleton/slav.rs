//! The set of active LAVs, plus the immutable original-edge list used to
//! evaluate split candidates. Owns the vertex arena for the lifetime of one
//! `skeletonize` call and implements the three event handlers.

use geo_types::{Coord, Polygon};

use crate::error::{ContourId, SkeletonError};
use crate::util::LineSegment;

use super::arena::{VertexArena, VertexId};
use super::event::{Event, SplitEvent, VertexEvent};
use super::lav::{ring_points, Lav, LavId};
use super::vertex::{self, LavVertex};
use super::Arc;

/// The original polygon edge with the two bisectors at its endpoints at
/// time zero. Never mutated after construction; used only to evaluate
/// split-event candidates against the polygon as it was before any
/// wavefront propagation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OriginalEdge {
    pub edge: LineSegment,
    pub bisector_left: crate::util::Ray,
    pub bisector_right: crate::util::Ray,
}

pub(crate) struct Slav {
    arena: VertexArena,
    lavs: Vec<(LavId, Lav)>,
    next_lav_id: u64,
    original_edges: Vec<OriginalEdge>,
    tolerance: f64,
}

impl Slav {
    /// Builds the initial SLAV: one LAV per ring (exterior first, then
    /// holes), plus the OriginalEdge list recorded from every ring.
    pub(crate) fn from_polygon(polygon: &Polygon<f64>, tolerance: f64) -> Result<Self, SkeletonError> {
        let mut arena = VertexArena::new();
        let mut lavs = Vec::new();
        let mut next_lav_id = 0u64;
        let mut original_edges = Vec::new();

        let mut rings: Vec<(ContourId, Vec<Coord<f64>>)> = Vec::new();
        rings.push((ContourId::Exterior, ring_points(polygon.exterior())));
        for (i, hole) in polygon.interiors().iter().enumerate() {
            rings.push((ContourId::Hole(i), ring_points(hole)));
        }

        for (contour, points) in rings {
            for (idx, p) in points.iter().enumerate() {
                if !p.x.is_finite() || !p.y.is_finite() {
                    return Err(SkeletonError::NonFiniteCoordinate { contour, index: idx });
                }
            }
            let lav = Lav::from_polygon(&mut arena, &points, contour)?;
            let lav_id = LavId(next_lav_id);
            next_lav_id += 1;
            for vid in lav.iter(&arena).collect::<Vec<_>>() {
                arena.get_mut(vid).lav = Some(lav_id);
                let v = arena.get(vid);
                original_edges.push(OriginalEdge {
                    edge: v.edge_left,
                    bisector_left: arena.get(v.prev).bisector,
                    bisector_right: v.bisector,
                });
            }
            lavs.push((lav_id, lav));
        }

        Ok(Slav { arena, lavs, next_lav_id, original_edges, tolerance })
    }

    pub(crate) fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub(crate) fn arena(&self) -> &VertexArena {
        &self.arena
    }

    fn fresh_lav_id(&mut self) -> LavId {
        let id = LavId(self.next_lav_id);
        self.next_lav_id += 1;
        id
    }

    fn lav_index(&self, id: LavId) -> Option<usize> {
        self.lavs.iter().position(|(lid, _)| *lid == id)
    }

    /// Every vertex still valid on every active LAV; used only by the
    /// property-test harness and peak/teardown helpers.
    pub(crate) fn active_vertex_count(&self) -> usize {
        self.lavs.iter().map(|(_, lav)| lav.len).sum()
    }

    fn next_event_for(&self, vid: VertexId) -> Option<Event> {
        vertex::next_event(&self.arena, &self.original_edges, vid, self.tolerance)
    }

    /// Handles an edge event: `va`/`vb` are adjacent (`vb == va.next`). A
    /// ring of length 3 collapsing is a peak event -- every vertex is
    /// finalized to the event point and the LAV is retired. Otherwise the
    /// pair is unified into a single replacement vertex.
    pub(crate) fn handle_edge(&mut self, event: super::event::EdgeEvent) -> (Vec<Arc>, Vec<Option<Event>>) {
        let va = event.va;
        let vb = event.vb;
        let lav_id = self.arena.get(va).lav.expect("edge event participant must belong to a LAV");
        debug_assert_eq!(self.arena.get(vb).lav, Some(lav_id));

        let idx = self.lav_index(lav_id).expect("edge event's LAV must still be active");
        let (_, lav) = self.lavs[idx];

        let va_prev = self.arena.get(va).prev;
        let vb_next = self.arena.get(vb).next;
        if va_prev == vb_next && lav.len == 3 {
            log::info!(
                "peak event at {:?} distance {} collapsing lav {:?}",
                event.point, event.distance, lav_id
            );
            let mut arcs = Vec::new();
            for vid in lav.iter(&self.arena).collect::<Vec<_>>() {
                arcs.push(Arc { source: event.point, sink: self.arena.get(vid).point });
                self.arena.get_mut(vid).invalidate();
            }
            self.lavs.remove(idx);
            return (arcs, Vec::new());
        }

        log::info!(
            "edge event at {:?} distance {} between {} and {}",
            event.point, event.distance, va, vb
        );
        let mut lav_mut = lav;
        let replacement = lav_mut.unify(&mut self.arena, va, vb, event.point, lav_id);
        self.lavs[idx].1 = lav_mut;

        let arcs = vec![
            Arc { source: event.point, sink: self.arena.get(va).point },
            Arc { source: event.point, sink: self.arena.get(vb).point },
        ];
        let events = vec![self.next_event_for(replacement)];
        (arcs, events)
    }

    /// Handles a split event: locates the ring position incident to the
    /// opposite edge, splits the LAV into (up to) two chains anchored at
    /// the event point, and finalizes any chain that collapses below
    /// length 3.
    pub(crate) fn handle_split(&mut self, event: SplitEvent) -> (Vec<Arc>, Vec<Option<Event>>) {
        let v = event.v;
        let lav_id = match self.arena.get(v).lav {
            Some(id) => id,
            None => return (Vec::new(), Vec::new()),
        };
        let idx = match self.lav_index(lav_id) {
            Some(i) => i,
            None => return (Vec::new(), Vec::new()),
        };

        let x = self.find_edge_start(lav_id, &event.opposite_edge);
        let x = match x {
            Some(x) => x,
            None => {
                log::warn!(
                    "split event at {:?} distance {} dropped: opposite edge not found in lav {:?}",
                    event.point, event.distance, lav_id
                );
                return (Vec::new(), Vec::new());
            }
        };
        let y = self.arena.get(x).prev;

        log::info!("split event at {:?} distance {} on lav {:?}", event.point, event.distance, lav_id);
        let mut arcs = vec![Arc { source: event.point, sink: self.arena.get(v).point }];

        let v_prev = self.arena.get(v).prev;
        let v_next = self.arena.get(v).next;
        let edge_left = self.arena.get(v).edge_left;
        let edge_right = self.arena.get(v).edge_right;

        let v1_id = self.arena.next_id();
        let v1 = LavVertex::new(event.point, edge_left, event.opposite_edge, None, v1_id, None);
        let pushed = self.arena.push(v1);
        debug_assert_eq!(pushed, v1_id);

        let v2_id = self.arena.next_id();
        let v2 = LavVertex::new(event.point, event.opposite_edge, edge_right, None, v2_id, None);
        let pushed = self.arena.push(v2);
        debug_assert_eq!(pushed, v2_id);

        // v1: prev = v.prev, next = x; v.prev.next = v1; x.prev = v1.
        self.arena.get_mut(v1_id).prev = v_prev;
        self.arena.get_mut(v1_id).next = x;
        self.arena.get_mut(v_prev).next = v1_id;
        self.arena.get_mut(x).prev = v1_id;

        // v2: prev = y, next = v.next; v.next.prev = v2; y.next = v2.
        self.arena.get_mut(v2_id).prev = y;
        self.arena.get_mut(v2_id).next = v_next;
        self.arena.get_mut(v_next).prev = v2_id;
        self.arena.get_mut(y).next = v2_id;

        self.arena.get_mut(v).invalidate();
        self.lavs.remove(idx);

        let mut events = Vec::new();
        for head in [v1_id, v2_id] {
            let (head_arcs, head_events) = self.finalize_or_register_chain(head);
            arcs.extend(head_arcs);
            events.extend(head_events);
        }
        (arcs, events)
    }

    /// Handles a vertex event: every still-valid vertex in `event.vertices`
    /// collapses to the shared event point in one move. `vertices` is a
    /// ring-contiguous run (built by walking the ring in
    /// `promote_to_vertex_event`), so the whole run is replaced by a single
    /// bridging vertex carrying the run's outermost edges -- a direct
    /// generalization of `unify` from a pair to an N-way coincidence, which
    /// keeps the ring singly-linked without ever producing a self-looped
    /// stub vertex. Every participant still emits its closing arc to the
    /// event point, as the spec requires.
    pub(crate) fn handle_vertex(&mut self, event: VertexEvent) -> (Vec<Arc>, Vec<Option<Event>>) {
        let valid: Vec<VertexId> =
            event.vertices.iter().copied().filter(|v| self.arena.get(*v).valid).collect();
        if valid.len() < 2 {
            log::info!(
                "vertex event at {:?} has fewer than two valid participants; replaying fallback edge event",
                event.point
            );
            return self.handle_edge(event.fallback);
        }

        log::info!(
            "vertex event at {:?} distance {} with {} participants",
            event.point, event.distance, valid.len()
        );

        let first = valid[0];
        let last = *valid.last().unwrap();
        let lav_id = self.arena.get(first).lav.expect("vertex event participant must belong to a LAV");
        let idx = self.lav_index(lav_id).expect("vertex event's LAV must still be active");

        let edge_left = self.arena.get(first).edge_left;
        let edge_right = self.arena.get(last).edge_right;
        let prev = self.arena.get(first).prev;
        let next = self.arena.get(last).next;

        let replacement_id = self.arena.next_id();
        let replacement = LavVertex::new(event.point, edge_left, edge_right, None, replacement_id, None);
        let pushed = self.arena.push(replacement);
        debug_assert_eq!(pushed, replacement_id);
        self.arena.get_mut(replacement_id).prev = prev;
        self.arena.get_mut(replacement_id).next = next;
        self.arena.get_mut(prev).next = replacement_id;
        self.arena.get_mut(next).prev = replacement_id;

        self.lavs.remove(idx);

        let mut arcs = Vec::new();
        for &vid in &valid {
            arcs.push(Arc { source: event.point, sink: self.arena.get(vid).point });
            self.arena.get_mut(vid).invalidate();
        }

        let (chain_arcs, events) = self.finalize_or_register_chain(replacement_id);
        arcs.extend(chain_arcs);
        (arcs, events)
    }

    /// Locates, within `lav_id`'s ring, the vertex whose `edge_left`
    /// matches `edge` (via `has_edge`).
    fn find_edge_start(&self, lav_id: LavId, edge: &LineSegment) -> Option<VertexId> {
        let (_, lav) = self.lavs[self.lav_index(lav_id)?];
        lav.iter(&self.arena).find(|vid| self.arena.get(*vid).has_edge(edge))
    }

    /// Builds a LAV from a freshly-linked chain; if its length is still
    /// >= 3 it's registered as an active LAV (and its head vertex's next
    /// event computed), otherwise the chain is a finalized 2-cycle and
    /// both its vertices emit a closing arc and are invalidated.
    fn finalize_or_register_chain(&mut self, head: VertexId) -> (Vec<Arc>, Vec<Option<Event>>) {
        let lav = Lav::from_chain(&self.arena, head);
        if lav.len > 2 {
            let lav_id = self.fresh_lav_id();
            for vid in lav.iter(&self.arena).collect::<Vec<_>>() {
                self.arena.get_mut(vid).lav = Some(lav_id);
            }
            self.lavs.push((lav_id, lav));
            let events: Vec<Option<Event>> =
                lav.iter(&self.arena).map(|vid| self.next_event_for(vid)).collect();
            (Vec::new(), events)
        } else {
            let tail = self.arena.get(head).next;
            let arcs = vec![Arc { source: self.arena.get(head).point, sink: self.arena.get(tail).point }];
            self.arena.get_mut(head).invalidate();
            self.arena.get_mut(tail).invalidate();
            (arcs, Vec::new())
        }
    }

    /// Computes the initial event for every vertex of every starting LAV.
    pub(crate) fn initial_events(&self) -> Vec<Option<Event>> {
        let mut events = Vec::new();
        for (_, lav) in &self.lavs {
            for vid in lav.iter(&self.arena) {
                events.push(self.next_event_for(vid));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, LineString};

    fn square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0., 0.), (100., 0.), (100., 100.), (0., 100.)]),
            vec![],
        )
    }

    #[test]
    fn from_polygon_builds_one_lav_and_four_original_edges() {
        let slav = Slav::from_polygon(&square(), crate::util::DEFAULT_TOLERANCE).unwrap();
        assert_eq!(slav.lavs.len(), 1);
        assert_eq!(slav.original_edges.len(), 4);
        assert_eq!(slav.active_vertex_count(), 4);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let p = Polygon::new(
            LineString::from(vec![(0., 0.), (f64::NAN, 0.), (1., 1.)]),
            vec![],
        );
        let err = Slav::from_polygon(&p, crate::util::DEFAULT_TOLERANCE).unwrap_err();
        assert_eq!(err, SkeletonError::NonFiniteCoordinate { contour: ContourId::Exterior, index: 1 });
    }

    #[test]
    fn initial_events_nonempty_for_square() {
        let slav = Slav::from_polygon(&square(), crate::util::DEFAULT_TOLERANCE).unwrap();
        let events = slav.initial_events();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.is_some()));
    }

    #[test]
    fn holes_contribute_additional_lavs_and_edges() {
        let exterior = LineString::from(vec![(0., 0.), (100., 0.), (100., 100.), (0., 100.)]);
        let hole = LineString::from(vec![(40., 40.), (40., 60.), (60., 60.), (60., 40.)]);
        let p = Polygon::new(exterior, vec![hole]);
        let slav = Slav::from_polygon(&p, crate::util::DEFAULT_TOLERANCE).unwrap();
        assert_eq!(slav.lavs.len(), 2);
        assert_eq!(slav.original_edges.len(), 8);
        let _ = coord! {x: 0., y: 0.};
    }
}
