//! A single wavefront ring: a circular doubly-linked list of
//! [`LavVertex`] nodes, addressed through a [`VertexArena`].

use geo_types::LineString;

use crate::error::{ContourId, SkeletonError};
use crate::util::LineSegment;

use super::arena::{VertexArena, VertexId};
use super::vertex::LavVertex;

/// Identifies a [`Lav`] within a [`super::slav::Slav`]. Monotonically
/// assigned and never reused within one `skeletonize` call, so a LAV that
/// has been split or retired cannot be confused with one created later at
/// the same `Vec` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LavId(pub(crate) u64);

/// A single active wavefront loop: a head index into the shared vertex
/// arena, plus a cached length so "has this ring collapsed below 3" is an
/// O(1) check rather than a walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lav {
    pub head: VertexId,
    pub len: usize,
}

impl Lav {
    /// Builds the initial ring for one polygon contour: filters out
    /// consecutive duplicate points and colinear triples, then links a
    /// `LavVertex` per surviving point.
    pub(crate) fn from_polygon(
        arena: &mut VertexArena,
        points: &[geo_types::Coord<f64>],
        contour: ContourId,
    ) -> Result<Self, SkeletonError> {
        let cleaned = clean_ring(points);
        if cleaned.len() < 3 {
            return Err(SkeletonError::TooFewVertices { contour, remaining: cleaned.len() });
        }

        let n = cleaned.len();
        let first_id = arena.next_id();
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let prev = cleaned[(i + n - 1) % n];
            let cur = cleaned[i];
            let next = cleaned[(i + 1) % n];
            let id = arena.next_id();
            let vertex = LavVertex::new(
                cur,
                LineSegment::new(prev, cur),
                LineSegment::new(cur, next),
                None,
                id,
                None,
            );
            let pushed = arena.push(vertex);
            debug_assert_eq!(pushed, id);
            ids.push(id);
        }
        for i in 0..n {
            let prev = ids[(i + n - 1) % n];
            let next = ids[(i + 1) % n];
            let node = arena.get_mut(ids[i]);
            node.prev = prev;
            node.next = next;
        }
        debug_assert_eq!(first_id, ids[0]);
        Ok(Lav { head: first_id, len: n })
    }

    /// Adopts an already-linked chain (built by a split or vertex-event
    /// handler) as a new ring; recounts its length by walking it once.
    pub(crate) fn from_chain(arena: &VertexArena, head: VertexId) -> Self {
        let mut len = 0;
        let mut cur = head;
        loop {
            len += 1;
            cur = arena.get(cur).next;
            if cur == head {
                break;
            }
        }
        Lav { head, len }
    }

    /// Precondition: `vb == va.next` within this ring. Replaces the two
    /// adjacent vertices with one, anchored at `point`, carrying the
    /// incoming bisectors (not the polygon edges) as the replacement's
    /// creator vectors -- see [`LavVertex::new`]'s `creators` parameter.
    pub(crate) fn unify(
        &mut self,
        arena: &mut VertexArena,
        va: VertexId,
        vb: VertexId,
        point: geo_types::Coord<f64>,
        lav_id: LavId,
    ) -> VertexId {
        debug_assert_eq!(arena.get(va).next, vb, "unify requires vb == va.next");

        let edge_left = arena.get(va).edge_left;
        let edge_right = arena.get(vb).edge_right;
        let creators = (arena.get(vb).bisector.v, arena.get(va).bisector.v);

        let prev = arena.get(va).prev;
        let next = arena.get(vb).next;

        let id = arena.next_id();
        let replacement =
            LavVertex::new(point, edge_left, edge_right, Some(creators), id, Some(lav_id));
        let pushed = arena.push(replacement);
        debug_assert_eq!(pushed, id);

        arena.get_mut(id).prev = prev;
        arena.get_mut(id).next = next;
        arena.get_mut(prev).next = id;
        arena.get_mut(next).prev = id;

        arena.get_mut(va).invalidate();
        arena.get_mut(vb).invalidate();

        if self.head == va || self.head == vb {
            self.head = id;
        }
        self.len -= 1;
        id
    }

    pub(crate) fn iter<'a>(&self, arena: &'a VertexArena) -> LavIter<'a> {
        LavIter { arena, head: self.head, cur: Some(self.head) }
    }
}

pub(crate) struct LavIter<'a> {
    arena: &'a VertexArena,
    head: VertexId,
    cur: Option<VertexId>,
}

impl<'a> Iterator for LavIter<'a> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        let cur = self.cur?;
        let next = self.arena.get(cur).next;
        self.cur = if next == self.head { None } else { Some(next) };
        Some(cur)
    }
}

/// Drops consecutive duplicate points and colinear triples from a closed
/// ring given as a `geo_types` coordinate slice *without* a repeated
/// closing point (callers strip that before calling in).
fn clean_ring(points: &[geo_types::Coord<f64>]) -> Vec<geo_types::Coord<f64>> {
    let mut deduped = Vec::with_capacity(points.len());
    for &p in points {
        if deduped.last().map_or(true, |&last| last != p) {
            deduped.push(p);
        }
    }
    if deduped.len() > 1 && deduped.first() == deduped.last() {
        deduped.pop();
    }
    if deduped.len() < 3 {
        return deduped;
    }

    let n = deduped.len();
    let mut keep = vec![true; n];
    for i in 0..n {
        let prev = deduped[(i + n - 1) % n];
        let cur = deduped[i];
        let next = deduped[(i + 1) % n];
        let d1 = crate::util::sub(cur, prev);
        let d2 = crate::util::sub(next, cur);
        if crate::util::cross(d1, d2) == 0.0 && crate::util::dot(d1, d2) > 0.0 {
            keep[i] = false;
        }
    }
    deduped.into_iter().zip(keep).filter(|(_, k)| *k).map(|(p, _)| p).collect()
}

/// Extracts a contour's coordinates from a `geo_types::LineString`,
/// dropping the duplicated closing point `geo_types` rings carry.
pub(crate) fn ring_points(ls: &LineString<f64>) -> Vec<geo_types::Coord<f64>> {
    let coords = &ls.0;
    if coords.len() >= 2 && coords.first() == coords.last() {
        coords[..coords.len() - 1].to_vec()
    } else {
        coords.clone()
    }
}
