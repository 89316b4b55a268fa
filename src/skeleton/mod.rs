//! The straight-skeleton event simulation: a priority-driven wavefront
//! propagation over a polygon's edges, detecting and resolving edge,
//! split, peak and vertex events until the queue drains.
//!
//! In the normal case you only need [`skeletonize`] or
//! [`skeletonize_with_config`]; everything else in this module is the
//! internal machinery (the vertex arena, the LAV/SLAV ring structures, and
//! the event queue) that those two functions wire together.

mod arena;
mod event;
mod lav;
mod slav;
mod vertex;

use geo_types::{Coord, Polygon};

use crate::error::SkeletonError;
use crate::util::{approx_eq_point, DEFAULT_TOLERANCE};
use event::{Event, EventQueue};
use slav::Slav;

/// One edge of the straight skeleton: `source` is the event point where the
/// arc was created (the later, more-collapsed end), `sink` is either the
/// pre-event position of a wavefront vertex or (for a peak finalization)
/// another collapsing vertex's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub source: Coord<f64>,
    pub sink: Coord<f64>,
}

/// Pluggable trace sink for visualization/debugging. All methods default to
/// doing nothing, so a partial implementation only needs to override the
/// hooks it cares about. No method here is load-bearing for the computed
/// skeleton: a sink only observes, it never influences the result.
pub trait DebugSink {
    fn line(&mut self, _from: Coord<f64>, _to: Coord<f64>) {}
    fn point(&mut self, _at: Coord<f64>) {}
    fn show(&mut self) {}
}

/// Tunables for [`skeletonize_with_config`]. `tolerance` is the relative
/// tolerance `approximately_equals`-style comparisons use when deciding
/// whether two floating-point-drifted points/distances coincide; `debug` is
/// an optional trace sink.
pub struct SkeletonConfig {
    pub tolerance: f64,
    pub debug: Option<Box<dyn DebugSink>>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        SkeletonConfig { tolerance: DEFAULT_TOLERANCE, debug: None }
    }
}

impl std::fmt::Debug for SkeletonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkeletonConfig")
            .field("tolerance", &self.tolerance)
            .field("debug", &self.debug.is_some())
            .finish()
    }
}

/// Computes the straight skeleton of `polygon` (exterior plus any interior
/// rings/holes) using the default tolerance and no trace sink.
///
/// # Example
///
/// ```
/// use geo_types::{LineString, Polygon};
/// use straight_skeleton::skeletonize;
///
/// let square = Polygon::new(
///     LineString::from(vec![(0., 0.), (100., 0.), (100., 100.), (0., 100.)]),
///     vec![],
/// );
/// let arcs = skeletonize(&square).unwrap();
/// assert_eq!(arcs.len(), 4);
/// ```
pub fn skeletonize(polygon: &Polygon<f64>) -> Result<Vec<Arc>, SkeletonError> {
    skeletonize_with_config(polygon, &SkeletonConfig::default())
}

/// Computes the straight skeleton of `polygon` with an explicit
/// [`SkeletonConfig`] (tolerance and/or debug sink).
pub fn skeletonize_with_config(
    polygon: &Polygon<f64>,
    config: &SkeletonConfig,
) -> Result<Vec<Arc>, SkeletonError> {
    let mut slav = Slav::from_polygon(polygon, config.tolerance)?;
    let mut queue = EventQueue::new();
    queue.put_all(slav.initial_events());

    let mut output = Vec::new();

    while let Some(event) = queue.get() {
        let (arcs, events) = match event {
            Event::Edge(e) => {
                let participants_valid =
                    slav.arena().get(e.va).valid && slav.arena().get(e.vb).valid;
                if !participants_valid {
                    log::debug!("dropping stale edge event at {:?}", e.point);
                    continue;
                }
                slav.handle_edge(e)
            }
            Event::Split(e) => {
                if !slav.arena().get(e.v).valid {
                    log::debug!("dropping stale split event at {:?}", e.point);
                    continue;
                }
                slav.handle_split(e)
            }
            Event::Vertex(e) => {
                let valid_count = e.vertices.iter().filter(|v| slav.arena().get(**v).valid).count();
                if valid_count >= 2 {
                    slav.handle_vertex(e)
                } else {
                    log::debug!(
                        "vertex event at {:?} has fewer than two valid participants at pop time; replaying fallback",
                        e.point
                    );
                    if !slav.arena().get(e.fallback.va).valid || !slav.arena().get(e.fallback.vb).valid {
                        continue;
                    }
                    slav.handle_edge(e.fallback)
                }
            }
        };
        queue.put_all(events);
        // A vertex already sitting at an event point (e.g. a peak
        // finalizing a LAV one of whose vertices was just created by a
        // unify at that same point) emits a source == sink arc. That's
        // not a skeleton edge, just bookkeeping fallout of the handler
        // that finalizes every member of a collapsing ring uniformly, so
        // drop it rather than surface a zero-length arc to callers.
        output.extend(
            arcs.into_iter().filter(|arc| !approx_eq_point(arc.source, arc.sink, config.tolerance)),
        );
    }

    Ok(output)
}
