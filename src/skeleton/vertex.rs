//! A wavefront vertex: its position, the two polygon edges whose bisector
//! it rides, and the logic that computes the next candidate event it
//! participates in.

use geo_types::Coord;

use crate::util::{add, approx_eq_point, approx_eq_scalar, cross, dot, magnitude, normalize, scale,
    sub, Line, LineSegment, Ray};

use super::arena::{VertexArena, VertexId};
use super::event::{EdgeEvent, Event};
use super::lav::LavId;
use super::slav::OriginalEdge;

#[derive(Debug, Clone, Copy)]
pub(crate) struct LavVertex {
    pub point: Coord<f64>,
    pub edge_left: LineSegment,
    pub edge_right: LineSegment,
    pub bisector: Ray,
    pub is_reflex: bool,
    pub prev: VertexId,
    pub next: VertexId,
    pub lav: Option<LavId>,
    pub valid: bool,
}

impl LavVertex {
    /// `creators`, when supplied, overrides the `(-normalize(edge_left.v),
    /// normalize(edge_right.v))` pair used to decide reflexivity and the
    /// bisector direction -- `unify` passes the vanishing vertices'
    /// bisector directions instead, since the edges are no longer
    /// contiguous in the obvious way once a vertex has been merged away.
    pub(crate) fn new(
        point: Coord<f64>,
        edge_left: LineSegment,
        edge_right: LineSegment,
        creators: Option<(Coord<f64>, Coord<f64>)>,
        self_id: VertexId,
        lav: Option<LavId>,
    ) -> Self {
        let (cl, cr) = creators.unwrap_or_else(|| {
            let cl = normalize(scale(edge_left.v, -1.0)).unwrap_or(scale(edge_left.v, -1.0));
            let cr = normalize(edge_right.v).unwrap_or(edge_right.v);
            (cl, cr)
        });
        let is_reflex = cross(cl, cr) < 0.0;
        let sign = if is_reflex { -1.0 } else { 1.0 };
        let bisector = Ray::new(point, scale(add(cl, cr), sign));
        LavVertex {
            point,
            edge_left,
            edge_right,
            bisector,
            is_reflex,
            prev: self_id,
            next: self_id,
            lav,
            valid: true,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
        self.lav = None;
    }

    /// `has_edge` from the spec: does this vertex's left edge match `e`
    /// (same anchor, same direction)? Used by `split`/`unify` to locate
    /// the ring position incident to a given original edge.
    pub(crate) fn has_edge(&self, e: &LineSegment) -> bool {
        self.edge_left.p == e.p && segments_parallel_same_direction(&self.edge_left, e)
    }
}

fn segments_parallel_same_direction(a: &LineSegment, b: &LineSegment) -> bool {
    match (normalize(a.v), normalize(b.v)) {
        (Some(na), Some(nb)) => na == nb,
        _ => a.v == b.v,
    }
}

fn segments_equal(a: &LineSegment, b: &LineSegment) -> bool {
    a.p == b.p && a.v == b.v
}

/// Which neighbor a candidate edge event was built against; determines
/// which of the vertex's two edges measures the event's distance and
/// which ordering `(va, vb)` the resulting [`EdgeEvent`] carries.
enum Side {
    Prev,
    Next,
}

/// Computes the earliest event this vertex participates in: the best of
/// its split candidates (if reflex) and its two edge-event candidates
/// (against `prev` and `next`), promoted to a vertex event if enough
/// other reflex vertices on the ring turn out to collide at the same
/// point and distance.
pub(crate) fn next_event(
    arena: &VertexArena,
    original_edges: &[OriginalEdge],
    vid: VertexId,
    tolerance: f64,
) -> Option<Event> {
    let v = arena.get(vid);
    let mut best: Option<Event> = None;

    if v.is_reflex {
        for oe in original_edges {
            if segments_equal(&oe.edge, &v.edge_left) || segments_equal(&oe.edge, &v.edge_right) {
                continue;
            }
            if let Some(candidate) = split_candidate(v, vid, oe, tolerance) {
                best = keep_earliest(best, candidate);
            }
        }
    }

    if let Some(edge) = edge_event_with(arena, vid, v.prev, Side::Prev) {
        best = keep_earliest(best, Event::Edge(edge));
    }
    if let Some(edge) = edge_event_with(arena, vid, v.next, Side::Next) {
        best = keep_earliest(best, Event::Edge(edge));
    }

    match best {
        Some(Event::Edge(edge)) => Some(promote_to_vertex_event(arena, edge, tolerance)),
        other => other,
    }
}

fn keep_earliest(current: Option<Event>, candidate: Event) -> Option<Event> {
    match current {
        None => Some(candidate),
        Some(cur) => {
            if candidate.distance() < cur.distance() {
                Some(candidate)
            } else {
                Some(cur)
            }
        }
    }
}

fn edge_event_with(
    arena: &VertexArena,
    vid: VertexId,
    neighbor_id: VertexId,
    side: Side,
) -> Option<EdgeEvent> {
    let v = arena.get(vid);
    let neighbor = arena.get(neighbor_id);
    let point = v.bisector.intersect(&neighbor.bisector)?;
    let (edge, va, vb) = match side {
        Side::Prev => (v.edge_left, neighbor_id, vid),
        Side::Next => (v.edge_right, vid, neighbor_id),
    };
    let distance = edge.line().distance_to(point);
    Some(EdgeEvent { distance, point, va, vb })
}

/// Steps (a)-(g) of the split-candidate construction.
fn split_candidate(
    v: &LavVertex,
    vid: VertexId,
    oe: &OriginalEdge,
    tolerance: f64,
) -> Option<Event> {
    let cand_dir = normalize(oe.edge.v)?;

    // (a) self_edge is whichever of the vertex's two edges is less
    // parallel to the candidate edge.
    let left_parallel = normalize(v.edge_left.v).map(|d| dot(d, cand_dir).abs());
    let right_parallel = normalize(v.edge_right.v).map(|d| dot(d, cand_dir).abs());
    let self_edge = match (left_parallel, right_parallel) {
        (Some(l), Some(r)) => {
            if l <= r {
                v.edge_left
            } else {
                v.edge_right
            }
        }
        (Some(_), None) => v.edge_left,
        (None, Some(_)) => v.edge_right,
        (None, None) => {
            log::debug!("split candidate discarded: both of {vid}'s edges are degenerate");
            return None;
        }
    };

    // (b)
    let i = self_edge.line().intersect(&oe.edge.line())?;
    if approx_eq_point(i, v.point, tolerance) {
        log::debug!("split candidate discarded: self_edge meets candidate edge at {vid} itself");
        return None;
    }

    // (c)
    let lin = normalize(sub(v.point, i))?;
    let mut ed = cand_dir;
    if dot(lin, ed) < 0.0 {
        ed = scale(ed, -1.0);
    }

    // (d)
    let sum = add(lin, ed);
    if magnitude(sum) == 0.0 {
        log::debug!("split candidate discarded: self and candidate directions cancel");
        return None;
    }
    let bisector_line = Line { p: i, v: sum };

    // (e)
    let b = bisector_line.intersect_ray(&v.bisector)?;

    // (f) eligibility: b must lie inside the wedge of the candidate
    // edge's endpoint bisectors, and on the inward side of the edge.
    let bl_dir = normalize(oe.bisector_left.v)?;
    let br_dir = normalize(oe.bisector_right.v)?;
    let ed_dir = normalize(oe.edge.v)?;
    let d_bl = normalize(sub(b, oe.bisector_left.p))?;
    let d_br = normalize(sub(b, oe.bisector_right.p))?;
    let d_ed = normalize(sub(b, oe.edge.p))?;

    if !(cross(bl_dir, d_bl) > 0.0) {
        log::debug!("split candidate discarded: {vid} outside left-bisector wedge");
        return None;
    }
    if !(cross(br_dir, d_br) < 0.0) {
        log::debug!("split candidate discarded: {vid} outside right-bisector wedge");
        return None;
    }
    if !(cross(ed_dir, d_ed) < 0.0) {
        log::debug!("split candidate discarded: {vid} on outward side of candidate edge");
        return None;
    }

    // (g)
    let distance = oe.edge.line().distance_to(b);
    Some(Event::Split(super::event::SplitEvent { distance, point: b, v: vid, opposite_edge: oe.edge }))
}

/// Vertex-event promotion: if either participant of `edge` is reflex,
/// walk forward around the ring starting at `vb.next` looking for other
/// reflex vertices whose bisector passes through `edge.point` at the same
/// distance, stopping at the first vertex that doesn't coincide. The walk
/// must stop there rather than skip past it: `handle_vertex` later splices
/// out everything between the first and last participant as one
/// contiguous run, so a non-coincident vertex in the middle of that run
/// would be silently bypassed and orphaned rather than invalidated. Two or
/// more coincident reflex vertices promote the edge event to a vertex
/// event, carrying the original edge event as a fallback for replay if the
/// ring has changed by the time this event is popped.
fn promote_to_vertex_event(arena: &VertexArena, edge: EdgeEvent, tolerance: f64) -> Event {
    let va_vertex = arena.get(edge.va);
    let vb_vertex = arena.get(edge.vb);
    if !va_vertex.is_reflex && !vb_vertex.is_reflex {
        return Event::Edge(edge);
    }

    let anchor_bisector = if va_vertex.is_reflex { va_vertex.bisector } else { vb_vertex.bisector };

    let mut coincident = Vec::new();
    let mut w = vb_vertex.next;
    while w != edge.va {
        let wv = arena.get(w);
        let coincides = wv.is_reflex
            && anchor_bisector.intersect(&wv.bisector).is_some_and(|point| {
                approx_eq_point(point, edge.point, tolerance)
                    && approx_eq_scalar(wv.edge_left.line().distance_to(point), edge.distance, tolerance)
            });
        if !coincides {
            break;
        }
        coincident.push(w);
        w = wv.next;
    }

    if coincident.is_empty() {
        return Event::Edge(edge);
    }

    let mut vertices = vec![edge.va, edge.vb];
    vertices.extend(coincident);
    let reflex_count = vertices.iter().filter(|id| arena.get(**id).is_reflex).count();
    if reflex_count < 2 {
        return Event::Edge(edge);
    }

    Event::Vertex(super::event::VertexEvent {
        distance: edge.distance,
        point: edge.point,
        vertices,
        fallback: edge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn c(x: f64, y: f64) -> Coord<f64> {
        coord! {x: x, y: y}
    }

    #[test]
    fn convex_vertex_is_not_reflex() {
        // a square corner, traversed CCW: turning left everywhere.
        let edge_left = LineSegment::new(c(0., 0.), c(10., 0.));
        let edge_right = LineSegment::new(c(10., 0.), c(10., 10.));
        let id = VertexId::for_test(0);
        let v = LavVertex::new(c(10., 0.), edge_left, edge_right, None, id, None);
        assert!(!v.is_reflex);
    }

    #[test]
    fn reflex_vertex_is_detected() {
        // a zigzag valley: turning right.
        let edge_left = LineSegment::new(c(0., 10.), c(5., 0.));
        let edge_right = LineSegment::new(c(5., 0.), c(10., 10.));
        let id = VertexId::for_test(0);
        let v = LavVertex::new(c(5., 0.), edge_left, edge_right, None, id, None);
        assert!(v.is_reflex);
    }
}
