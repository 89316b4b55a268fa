//! Computes the **straight skeleton** of a simple polygon (optionally with
//! holes) in the [GeoRust] ecosystem.
//!
//! The straight skeleton is the planar graph traced by the vertices of a
//! family of progressively inward-offset copies of a polygon's boundary,
//! as the offset shrinks the boundary to nothing. Each edge of the
//! skeleton (an [`Arc`]) lies along the angle bisector of two polygon
//! edges; arcs meet at nodes where three or more bisectors become
//! incident.
//!
//! This crate computes the skeleton itself -- the geometric event
//! simulation that wavefront-propagates the polygon boundary, detecting
//! and resolving edge events (two adjacent bisectors meet, collapsing an
//! edge), split events (a reflex vertex crashes into a non-adjacent edge,
//! splitting the wavefront loop), peak events (a three-vertex loop
//! collapses to a point), and vertex events (two or more reflex vertices
//! arrive simultaneously at the same point). Reconstructing an offset
//! (buffered) polygon, rounded joints, and any CLI/file-format tooling are
//! left to callers: walk the returned arcs and build what you need on top.
//!
//! # Example
//!
//! ```
//! use geo_types::{LineString, Polygon};
//! use straight_skeleton::skeletonize;
//!
//! let square = Polygon::new(
//!     LineString::from(vec![(0., 0.), (100., 0.), (100., 100.), (0., 100.)]),
//!     vec![],
//! );
//! let arcs = skeletonize(&square).unwrap();
//! assert_eq!(arcs.len(), 4);
//! ```
//!
//! # Reference
//!
//! This is a straight-skeleton implementation in the tradition of Felkel
//! and Obdrzalek's SCCG '98 paper[^note1], following the wavefront/LAV/SLAV
//! formulation rather than that paper's original roof model directly.
//!
//! [GeoRust]: https://georust.org
//! [^note1]: Felkel, Petr; Obdržálek, Štěpán (1998), *"Straight skeleton
//!   implementation"*, SCCG 98: Proceedings of the 14th Spring Conference
//!   on Computer Graphics, pp. 210-218.

mod error;
mod priority_queue;
pub mod skeleton;
pub mod util;

pub use error::{ContourId, SkeletonError};
#[doc(inline)]
pub use skeleton::{skeletonize, skeletonize_with_config, Arc, DebugSink, SkeletonConfig};
#[doc(inline)]
pub use util::{Coordinate, Ray};
