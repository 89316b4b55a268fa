//! The tagged event variant the driver dispatches on, and the min-heap
//! that orders pending events by distance (ties broken by insertion
//! order).

use std::cmp::Ordering;

use crate::priority_queue::PriorityQueue;
use crate::util::Coordinate;

use super::arena::VertexId;
use crate::util::LineSegment;

/// Two adjacent bisectors meeting, collapsing the shared edge. `vb` is
/// always `va.next` at the time the event is resolved (or was, when the
/// event was constructed — the pair may have since been invalidated).
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeEvent {
    pub distance: f64,
    pub point: Coordinate,
    pub va: VertexId,
    pub vb: VertexId,
}

/// A reflex vertex's bisector reaching a non-adjacent polygon edge,
/// splitting the LAV that owns it.
#[derive(Debug, Clone)]
pub(crate) struct SplitEvent {
    pub distance: f64,
    pub point: Coordinate,
    pub v: VertexId,
    pub opposite_edge: LineSegment,
}

/// Two or more reflex vertices arriving at the same point simultaneously.
/// `fallback` is replayed as a plain edge event if fewer than two of
/// `vertices` are still valid by the time this event is popped.
#[derive(Debug, Clone)]
pub(crate) struct VertexEvent {
    pub distance: f64,
    pub point: Coordinate,
    pub vertices: Vec<VertexId>,
    pub fallback: EdgeEvent,
}

#[derive(Debug, Clone)]
pub(crate) enum Event {
    Edge(EdgeEvent),
    Split(SplitEvent),
    Vertex(VertexEvent),
}

impl Event {
    pub(crate) fn distance(&self) -> f64 {
        match self {
            Event::Edge(e) => e.distance,
            Event::Split(e) => e.distance,
            Event::Vertex(e) => e.distance,
        }
    }
}

/// Wraps an [`Event`] with a monotonic insertion sequence so the heap has
/// a total order over `f64` distances (which alone are only partially
/// ordered, because of `NaN`) and so equal-distance events pop in FIFO
/// order, matching "ties break by insertion order" from the event model.
struct QueueEntry {
    event: Event,
    sequence: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .distance()
            .partial_cmp(&other.event.distance())
            .unwrap_or(Ordering::Equal)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Min-heap over [`Event`]s keyed by distance ascending. `put(None)` is a
/// no-op; stale events are recognized and dropped at pop time by the
/// driver checking each participant's `valid` flag, not by this queue.
pub(crate) struct EventQueue {
    inner: PriorityQueue<QueueEntry>,
    next_sequence: u64,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        EventQueue { inner: PriorityQueue::new(), next_sequence: 0 }
    }

    pub(crate) fn put(&mut self, event: Option<Event>) {
        if let Some(event) = event {
            let sequence = self.next_sequence;
            self.next_sequence += 1;
            self.inner.insert(QueueEntry { event, sequence });
        }
    }

    pub(crate) fn put_all(&mut self, events: impl IntoIterator<Item = Option<Event>>) {
        for event in events {
            self.put(event);
        }
    }

    pub(crate) fn get(&mut self) -> Option<Event> {
        self.inner.pop().map(|entry| entry.event)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
