//
// geometry.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! 2D vectors, modular arithmetic and the triplet-orientation / segment
//! crossing primitives the rest of the crate's intersection testing is
//! built on.

use nalgebra::Vector2;

pub type Vec2 = Vector2<f64>;

/// `((x mod n) + n) mod n`, valid for both real and integer arguments.
pub fn positive_modulo(x: f64, n: f64) -> f64 {
    ((x % n) + n) % n
}

/// Integer variant of [`positive_modulo`].
pub fn positive_modulo_i(x: i64, n: i64) -> i64 {
    ((x % n) + n) % n
}

/// `-1`, `0` or `+1` depending on the sign of `x`.
pub fn sign(x: f64) -> i32 {
    if x > 0. {
        1
    } else if x < 0. {
        -1
    } else {
        0
    }
}

/// Relative-tolerance closeness, degenerating to an exact match only when
/// `b` is zero and `a` is too.
///
/// The relative test `|a - b| < rel * |b|` is undefined for `b == 0`; this
/// guards with an absolute tolerance floor so values close to zero are not
/// spuriously reported as "not close" (spec.md §9 Open Questions).
pub fn is_close(a: f64, b: f64, rel: f64) -> bool {
    const ABS_FLOOR: f64 = 1e-12;
    (a - b).abs() < rel * b.abs().max(ABS_FLOOR)
}

/// Orientation of the ordered triplet `(a, b, c)`.
///
/// Returns `0` when the three points are collinear, `1` when they turn
/// clockwise and `-1` when they turn counter-clockwise.
pub fn orient(a: Vec2, b: Vec2, c: Vec2) -> i32 {
    let val = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    sign(val)
}

/// Whether point `p` lies within the axis-aligned bounding box of the
/// segment `(a, b)`, inclusive of the boundary. Used for the collinear
/// special cases of [`segments_cross`].
fn on_segment(a: Vec2, p: Vec2, b: Vec2) -> bool {
    p.x <= a.x.max(b.x) && p.x >= a.x.min(b.x) && p.y <= a.y.max(b.y) && p.y >= a.y.min(b.y)
}

/// Whether the closed segments `(a1, b1)` and `(a2, b2)` cross (or touch).
///
/// Implements the standard orientation-based test: the two segments cross
/// whenever the endpoints of one straddle the line of the other, with
/// explicit handling of the four collinear degeneracies.
pub fn segments_cross(a1: Vec2, b1: Vec2, a2: Vec2, b2: Vec2) -> bool {
    let o1 = orient(a1, b1, a2);
    let o2 = orient(a1, b1, b2);
    let o3 = orient(a2, b2, a1);
    let o4 = orient(a2, b2, b1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    if o1 == 0 && on_segment(a1, a2, b1) {
        return true;
    }
    if o2 == 0 && on_segment(a1, b2, b1) {
        return true;
    }
    if o3 == 0 && on_segment(a2, a1, b2) {
        return true;
    }
    if o4 == 0 && on_segment(a2, b1, b2) {
        return true;
    }
    false
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn positive_modulo_wraps_negative() {
        assert_abs_diff_eq!(positive_modulo(-1., 4.), 3.);
        assert_abs_diff_eq!(positive_modulo(5., 4.), 1.);
        assert_abs_diff_eq!(positive_modulo(0., 4.), 0.);
    }

    #[test]
    fn positive_modulo_i_wraps_negative() {
        assert_eq!(positive_modulo_i(-1, 4), 3);
        assert_eq!(positive_modulo_i(5, 4), 1);
    }

    #[test]
    fn sign_values() {
        assert_eq!(sign(2.), 1);
        assert_eq!(sign(-2.), -1);
        assert_eq!(sign(0.), 0);
    }

    #[test]
    fn is_close_handles_zero() {
        assert!(is_close(0., 0., 1e-8));
        assert!(!is_close(1e-6, 0., 1e-8));
        assert!(is_close(1.0000001, 1., 1e-3));
    }

    #[test]
    fn orient_collinear() {
        assert_eq!(
            orient(Vec2::new(0., 0.), Vec2::new(1., 0.), Vec2::new(2., 0.)),
            0
        );
    }

    #[test]
    fn orient_clockwise_counterclockwise() {
        let a = Vec2::new(0., 0.);
        let b = Vec2::new(1., 0.);
        let c = Vec2::new(1., 1.);
        let o = orient(a, b, c);
        assert_ne!(o, 0);
        // Swapping endpoints of the last segment should flip the sign.
        let o2 = orient(a, b, Vec2::new(1., -1.));
        assert_eq!(o2, -o);
    }

    #[test]
    fn segments_cross_basic() {
        let a = Vec2::new(0., -1.);
        let b = Vec2::new(0., 1.);
        let c = Vec2::new(-1., 0.);
        let d = Vec2::new(1., 0.);
        assert!(segments_cross(a, b, c, d));
    }

    #[test]
    fn segments_cross_disjoint() {
        let a = Vec2::new(0., -1.);
        let b = Vec2::new(0., 1.);
        let c = Vec2::new(5., 0.);
        let d = Vec2::new(6., 0.);
        assert!(!segments_cross(a, b, c, d));
    }

    /// spec.md §8 property 8: symmetric under swapping either pair.
    #[test]
    fn segments_cross_symmetry() {
        let a = Vec2::new(0., -1.);
        let b = Vec2::new(0., 1.);
        let c = Vec2::new(-1., 0.);
        let d = Vec2::new(1., 0.);
        assert_eq!(segments_cross(a, b, c, d), segments_cross(c, d, a, b));
        assert_eq!(segments_cross(a, b, c, d), segments_cross(b, a, c, d));

        let e = Vec2::new(5., 0.);
        let f = Vec2::new(6., 0.);
        assert_eq!(segments_cross(a, b, e, f), segments_cross(e, f, a, b));
        assert_eq!(segments_cross(a, b, e, f), segments_cross(b, a, e, f));
    }

    #[test]
    fn segments_cross_collinear_overlap() {
        let a = Vec2::new(0., 0.);
        let b = Vec2::new(2., 0.);
        let c = Vec2::new(1., 0.);
        let d = Vec2::new(3., 0.);
        assert!(segments_cross(a, b, c, d));
    }

    #[test]
    fn segments_cross_collinear_disjoint() {
        let a = Vec2::new(0., 0.);
        let b = Vec2::new(1., 0.);
        let c = Vec2::new(2., 0.);
        let d = Vec2::new(3., 0.);
        assert!(!segments_cross(a, b, c, d));
    }
}
