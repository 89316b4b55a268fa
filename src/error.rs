use thiserror::Error;

/// Failure returned by the public `skeletonize*` entry points before the
/// event simulation starts.
///
/// These are the only failures this crate surfaces as a `Result`: runtime
/// geometric infeasibility (an unresolvable split event) and numerical
/// degeneracy (parallel intersections, zero-length bisectors) are logged
/// and the offending event is dropped instead, per the core's three-way
/// failure classification. A vertex that is popped from the event queue
/// while reportedly valid but detached from every LAV is a programmer
/// error, not a `SkeletonError`, and is caught by a `debug_assert!` instead.
#[derive(Debug, Error, PartialEq)]
pub enum SkeletonError {
    #[error(
        "contour {contour} has only {remaining} vertices left after removing duplicates and \
         colinear points; a LAV needs at least 3"
    )]
    TooFewVertices { contour: ContourId, remaining: usize },

    #[error("contour {contour} vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { contour: ContourId, index: usize },
}

/// Identifies which input ring a [`SkeletonError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourId {
    Exterior,
    Hole(usize),
}

impl std::fmt::Display for ContourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContourId::Exterior => write!(f, "exterior"),
            ContourId::Hole(i) => write!(f, "hole[{i}]"),
        }
    }
}
