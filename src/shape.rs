//
// shape.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! The immutable radial-polygon [`Shape`] and its boundary-point cache.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::PackingError;
use crate::geometry::Vec2;

/// An immutable radial polygon: a sequence of radii measured from the
/// shape's centroid at equal angular steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub radial_points: Vec<f64>,
    pub rotational_symmetries: u64,
    pub mirrors: u64,
}

impl Shape {
    pub fn new(
        name: impl Into<String>,
        radial_points: Vec<f64>,
        rotational_symmetries: u64,
        mirrors: u64,
    ) -> Self {
        Self {
            name: name.into(),
            radial_points,
            rotational_symmetries,
            mirrors,
        }
    }

    /// Number of radial sample points defining the polygon boundary.
    pub fn resolution(&self) -> usize {
        self.radial_points.len()
    }

    /// Angular spacing between consecutive radial points.
    pub fn angular_step(&self) -> f64 {
        2. * PI / self.resolution() as f64
    }

    pub fn min_radius(&self) -> f64 {
        self.radial_points
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_radius(&self) -> f64 {
        self.radial_points
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Radius at integer index `i`, interpreted modulo [`Shape::resolution`]
    /// (negative indices wrap around).
    pub fn get_point(&self, i: i64) -> f64 {
        let n = self.resolution() as i64;
        let idx = crate::geometry::positive_modulo_i(i, n) as usize;
        self.radial_points[idx]
    }

    /// Area of the radial polygon: `½ sin(angular_step) Σ r_i r_{i+1}`.
    pub fn area(&self) -> f64 {
        let step = self.angular_step();
        let n = self.resolution();
        let sum: f64 = (0..n)
            .map(|i| self.get_point(i as i64) * self.get_point(i as i64 + 1))
            .sum();
        0.5 * step.sin() * sum
    }

    /// Ensure `self` and `other` share a radial resolution, as required
    /// before any point-for-point comparison of two shapes.
    pub fn check_resolution_matches(&self, other: &Shape) -> Result<(), PackingError> {
        if self.resolution() != other.resolution() {
            return Err(PackingError::ResolutionMismatch {
                first: self.resolution(),
                second: other.resolution(),
            });
        }
        Ok(())
    }

    /// Boundary points of this shape in a frame where the line towards the
    /// other shape's centre (at angle `angle_to_other`, in this shape's
    /// local frame) is the +x axis. Covers `resolution/2 + 1` points,
    /// `k = -resolution/4 ..= resolution/4`.
    pub fn generate_position_cache(&self, angle_to_other: f64) -> Vec<Vec2> {
        self.generate_cache_range(angle_to_other, self.resolution() as i64 / 4)
    }

    /// As [`Shape::generate_position_cache`], but over the full boundary:
    /// `k = -resolution/2 ..= resolution/2`.
    pub fn generate_position_cache_full(&self, angle_to_other: f64) -> Vec<Vec2> {
        self.generate_cache_range(angle_to_other, self.resolution() as i64 / 2)
    }

    fn generate_cache_range(&self, angle_to_other: f64, half_width: i64) -> Vec<Vec2> {
        let step = self.angular_step();
        let q = (angle_to_other / step).round() as i64;
        (-half_width..=half_width)
            .map(|k| {
                let j = q + k;
                let theta = (j as f64 * step - angle_to_other).abs();
                let r = self.get_point(j);
                Vec2::new(r * theta.cos(), r * theta.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square() -> Shape {
        Shape::new("Square", vec![1., 1., 1., 1.], 4, 4)
    }

    #[test]
    fn resolution_and_angular_step() {
        let s = square();
        assert_eq!(s.resolution(), 4);
        assert_abs_diff_eq!(s.angular_step(), PI / 2.);
    }

    #[test]
    fn get_point_wraps_negative() {
        let s = Shape::new("tri", vec![1., 2., 3.], 3, 3);
        assert_abs_diff_eq!(s.get_point(-1), 3.);
        assert_abs_diff_eq!(s.get_point(3), 1.);
        assert_abs_diff_eq!(s.get_point(0), 1.);
    }

    #[test]
    fn square_area_is_two() {
        // A radius-1 square (diagonal = 2) split into 4 right triangles has
        // area 2: ½ sin(π/2) (1·1 + 1·1 + 1·1 + 1·1) = 2.
        let s = square();
        assert_abs_diff_eq!(s.area(), 2., epsilon = 1e-10);
    }

    #[test]
    fn min_max_radius() {
        let s = Shape::new("irregular", vec![1., 2., 0.5], 1, 0);
        assert_abs_diff_eq!(s.min_radius(), 0.5);
        assert_abs_diff_eq!(s.max_radius(), 2.);
    }

    #[test]
    fn resolution_mismatch_detected() {
        let a = square();
        let b = Shape::new("tri", vec![1., 1., 1.], 3, 3);
        assert!(a.check_resolution_matches(&b).is_err());
        assert!(a.check_resolution_matches(&a).is_ok());
    }

    #[test]
    fn position_cache_length() {
        let s = square();
        assert_eq!(
            s.generate_position_cache(0.).len(),
            s.resolution() / 4 * 2 + 1
        );
        assert_eq!(
            s.generate_position_cache_full(0.).len(),
            s.resolution() / 2 * 2 + 1
        );
    }

    #[test]
    fn position_cache_axis_alignment() {
        // At angle_to_other = 0, the k = 0 point sits on the local +x axis.
        let s = square();
        let cache = s.generate_position_cache(0.);
        let mid = cache.len() / 2;
        assert_abs_diff_eq!(cache[mid].y, 0., epsilon = 1e-10);
    }
}
