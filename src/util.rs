//! Geometry primitives shared by the skeleton module: points, rays, line
//! segments and infinite lines, plus the handful of predicates the event
//! simulation needs (intersection, signed/unsigned distance, approximate
//! equality).
//!
//! Everything here is built directly on [`geo_types::Coord<f64>`] so the
//! crate composes with the rest of the GeoRust ecosystem instead of
//! inventing its own vector type.

use geo_types::Coord;

/// A 2D point or vector. Re-exported at the crate root for source
/// compatibility with call sites that spell it `Coordinate`.
pub type Coordinate = Coord<f64>;

/// Default relative tolerance used by [`approx_eq`] when a caller does not
/// supply one explicitly via [`crate::SkeletonConfig`].
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// `a.x * b.y - a.y * b.x`, the 2D scalar cross product.
#[inline]
pub fn cross(a: Coordinate, b: Coordinate) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The 2D dot product.
#[inline]
pub fn dot(a: Coordinate, b: Coordinate) -> f64 {
    a.x * b.x + a.y * b.y
}

#[inline]
pub fn magnitude(v: Coordinate) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// `v / |v|`. Returns `None` for a zero-length vector instead of producing
/// NaN; callers are expected to skip the degenerate case.
#[inline]
pub fn normalize(v: Coordinate) -> Option<Coordinate> {
    let m = magnitude(v);
    if m == 0.0 {
        None
    } else {
        Some(Coord { x: v.x / m, y: v.y / m })
    }
}

#[inline]
pub fn sub(a: Coordinate, b: Coordinate) -> Coordinate {
    Coord { x: a.x - b.x, y: a.y - b.y }
}

#[inline]
pub fn add(a: Coordinate, b: Coordinate) -> Coordinate {
    Coord { x: a.x + b.x, y: a.y + b.y }
}

#[inline]
pub fn scale(a: Coordinate, k: f64) -> Coordinate {
    Coord { x: a.x * k, y: a.y * k }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    magnitude(sub(a, b))
}

/// `a == b`, or componentwise within `max(|a|, |b|) * tolerance` — the
/// relative-tolerance comparison the split/vertex-event detection relies on
/// to treat floating-point-drifted coincidences as equal.
pub fn approx_eq_scalar(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= a.abs().max(b.abs()) * tolerance
}

/// [`approx_eq_scalar`] applied pointwise to both coordinates.
pub fn approx_eq_point(a: Coordinate, b: Coordinate, tolerance: f64) -> bool {
    approx_eq_scalar(a.x, b.x, tolerance) && approx_eq_scalar(a.y, b.y, tolerance)
}

/// A directed segment of finite length: anchor `p`, direction `v` with
/// `|v|` equal to the segment length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p: Coordinate,
    pub v: Coordinate,
}

impl LineSegment {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        LineSegment { p: from, v: sub(to, from) }
    }

    pub fn end(&self) -> Coordinate {
        add(self.p, self.v)
    }

    pub fn line(&self) -> Line {
        Line { p: self.p, v: self.v }
    }
}

/// An infinite line through `p` in direction `v` (direction need not be
/// normalized).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p: Coordinate,
    pub v: Coordinate,
}

impl Line {
    /// Intersection of two infinite lines, or `None` if parallel
    /// (including colinear).
    pub fn intersect(&self, other: &Line) -> Option<Coordinate> {
        let denom = cross(self.v, other.v);
        if denom == 0.0 {
            return None;
        }
        let diff = sub(other.p, self.p);
        let t = cross(diff, other.v) / denom;
        Some(add(self.p, scale(self.v, t)))
    }

    /// Intersection of this infinite line with `ray`, constrained only on
    /// the ray's side: `None` if the intersection lies behind the ray's
    /// origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Coordinate> {
        let denom = cross(ray.v, self.v);
        if denom == 0.0 {
            return None;
        }
        let diff = sub(self.p, ray.p);
        let t = cross(diff, self.v) / denom;
        if t < -RAY_EPSILON {
            return None;
        }
        Some(add(ray.p, scale(ray.v, t)))
    }

    /// Unsigned perpendicular distance from `point` to this line.
    pub fn distance_to(&self, point: Coordinate) -> f64 {
        match normalize(self.v) {
            Some(n) => cross(n, sub(point, self.p)).abs(),
            None => distance(self.p, point),
        }
    }
}

/// Tolerance for "behind the ray origin" checks; intersections at the
/// origin itself (`t == 0`) must count as in front, not behind.
const RAY_EPSILON: f64 = 1e-9;

/// A ray: origin `p`, direction `v` (not necessarily normalized).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub p: Coordinate,
    pub v: Coordinate,
}

impl Ray {
    pub fn new(p: Coordinate, v: Coordinate) -> Self {
        Ray { p, v }
    }

    pub fn line(&self) -> Line {
        Line { p: self.p, v: self.v }
    }

    /// Point at parameter `t` along the ray: `p + t * v`.
    pub fn point_at(&self, t: f64) -> Coordinate {
        add(self.p, scale(self.v, t))
    }

    /// Intersection with another ray; `None` if parallel or if the
    /// intersection lies behind either origin.
    pub fn intersect(&self, other: &Ray) -> Option<Coordinate> {
        let denom = cross(self.v, other.v);
        if denom == 0.0 {
            return None;
        }
        let diff = sub(other.p, self.p);
        let t = cross(diff, other.v) / denom;
        let s = cross(diff, self.v) / denom;
        if t < -RAY_EPSILON || s < -RAY_EPSILON {
            return None;
        }
        Some(add(self.p, scale(self.v, t)))
    }

    /// Signed orientation of `point` relative to this ray: positive if the
    /// point is to the left of the ray's direction, negative if to the
    /// right, zero if colinear.
    pub fn orientation(&self, point: Coordinate) -> f64 {
        cross(self.v, sub(point, self.p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coord { x, y }
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(normalize(c(0.0, 0.0)).is_none());
    }

    #[test]
    fn normalize_unit_length() {
        let n = normalize(c(3.0, 4.0)).unwrap();
        assert!((magnitude(n) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_and_dot_of_perpendicular_axes() {
        assert_eq!(cross(c(1.0, 0.0), c(0.0, 1.0)), 1.0);
        assert_eq!(dot(c(1.0, 0.0), c(0.0, 1.0)), 0.0);
    }

    #[test]
    fn line_intersect_parallel_is_none() {
        let a = Line { p: c(0.0, 0.0), v: c(1.0, 0.0) };
        let b = Line { p: c(0.0, 1.0), v: c(2.0, 0.0) };
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn line_intersect_crossing() {
        let a = Line { p: c(0.0, 0.0), v: c(1.0, 0.0) };
        let b = Line { p: c(5.0, -5.0), v: c(0.0, 1.0) };
        let i = a.intersect(&b).unwrap();
        assert!(approx_eq_point(i, c(5.0, 0.0), DEFAULT_TOLERANCE));
    }

    #[test]
    fn ray_intersect_behind_origin_is_none() {
        let a = Ray::new(c(0.0, 0.0), c(1.0, 0.0));
        let b = Ray::new(c(-5.0, 1.0), c(0.0, -1.0));
        // b points toward (-5, 0), which a's ray would only reach at t = -5.
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn ray_intersect_in_front() {
        let a = Ray::new(c(0.0, 0.0), c(1.0, 1.0));
        let b = Ray::new(c(2.0, 0.0), c(-1.0, 1.0));
        let i = a.intersect(&b).unwrap();
        assert!(approx_eq_point(i, c(1.0, 1.0), DEFAULT_TOLERANCE));
    }

    #[test]
    fn approx_eq_scalar_relative_tolerance() {
        assert!(approx_eq_scalar(1000.0, 1000.5, 1e-3));
        assert!(!approx_eq_scalar(1.0, 2.0, 1e-3));
    }

    #[test]
    fn distance_to_line() {
        let l = Line { p: c(0.0, 0.0), v: c(1.0, 0.0) };
        assert!((l.distance_to(c(3.0, 4.0)) - 4.0).abs() < 1e-9);
    }
}
