//
// instance.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! `ShapeInstance` and polygon-polygon intersection testing across
//! periodic images (spec.md §4.G).

use std::f64::consts::{PI, TAU};

use crate::basis::BasisArena;
use crate::cell::{Cell, OccupiedSite};
use crate::geometry::{is_close, positive_modulo, segments_cross, Vec2};
use crate::shape::Shape;
use crate::symmetry::SymmetryTransform;

/// One symmetry image of one occupied site, borrowing its shape, its site
/// and the symmetry transform that generates this particular image.
#[derive(Debug, Clone, Copy)]
pub struct ShapeInstance<'a> {
    pub shape: &'a Shape,
    pub site: &'a OccupiedSite,
    pub transform: &'a SymmetryTransform,
}

impl<'a> ShapeInstance<'a> {
    pub fn new(shape: &'a Shape, site: &'a OccupiedSite, transform: &'a SymmetryTransform) -> Self {
        Self {
            shape,
            site,
            transform,
        }
    }

    /// The fractional position of this image: the site's own free
    /// position carried through its generating symmetry transform.
    pub fn fractional_coords(&self, arena: &BasisArena) -> Vec2 {
        self.transform.real_to_fractional(self.site.get_position(arena))
    }

    pub fn angle(&self, arena: &BasisArena) -> f64 {
        self.site.angle_value(arena)
    }

    pub fn rotation_offset(&self) -> f64 {
        self.transform.rotation_offset
    }

    /// `transform.flipped XOR site.flip_site`.
    pub fn flipped(&self) -> bool {
        self.transform.flipped ^ self.site.flip_site
    }

    /// Inclines `(α, β)` of the line joining this instance (at `pos_this`)
    /// to `other` (at `pos_other`), both in real (Cartesian) coordinates.
    pub fn compute_incline(
        &self,
        pos_this: Vec2,
        arena: &BasisArena,
        other: &ShapeInstance,
        pos_other: Vec2,
        other_arena: &BasisArena,
    ) -> (f64, f64) {
        let d = pos_this - pos_other;
        let central = d.norm();
        let ratio = (pos_other.x - pos_this.x) / central;
        let mut alpha = ratio.acos();
        if alpha.is_nan() {
            alpha = if is_close(ratio, 1., 1e-9) { 0. } else { PI };
        }
        if pos_other.x < pos_this.x {
            alpha = TAU - alpha;
        }
        let mut beta = alpha + PI;

        let this_flipped = self.flipped();
        let other_flipped = other.flipped();
        if this_flipped {
            alpha = TAU - alpha;
        }
        if other_flipped {
            beta = TAU - beta;
        }

        alpha += self.angle(arena);
        beta += other.angle(other_arena);

        let this_sign = if this_flipped { -1. } else { 1. };
        let other_sign = if other_flipped { -1. } else { 1. };
        alpha += this_sign * self.rotation_offset();
        beta += other_sign * other.rotation_offset();

        (positive_modulo(alpha, TAU), positive_modulo(beta, TAU))
    }

    /// Whether this instance (at `pos_this`) overlaps `other` (at
    /// `pos_other`), both in real (Cartesian) coordinates.
    pub fn intersects_with(
        &self,
        pos_this: Vec2,
        arena: &BasisArena,
        other: &ShapeInstance,
        pos_other: Vec2,
        other_arena: &BasisArena,
    ) -> bool {
        let central = (pos_this - pos_other).norm();
        if central > self.shape.max_radius() + other.shape.max_radius() {
            return false;
        }

        let (alpha, beta) =
            self.compute_incline(pos_this, arena, other, pos_other, other_arena);

        let ca = self.shape.generate_position_cache(alpha);
        let cb = other.shape.generate_position_cache(beta);

        let mut pa_prev = *ca.last().expect("position cache is never empty");
        let mut pb_prev = *cb.last().expect("position cache is never empty");
        for &pa in &ca {
            for &pb in &cb {
                if segments_cross(pa_prev, pa, pb_prev, pb) {
                    return true;
                }
                pb_prev = pb;
                pa_prev = pa;
            }
        }
        false
    }
}

/// Shell depth for the periodic image test: `2` when the cell is sheared
/// close to degenerate (`angle` or `2π − angle` below `π/4`), else `1`.
fn shell_depth(cell_angle: f64) -> i64 {
    if cell_angle < PI / 4. || TAU - cell_angle < PI / 4. {
        2
    } else {
        1
    }
}

/// Whether `a` (at `pos_a`, real coordinates) overlaps any periodic image
/// of `b` under `cell`. `same_instance` must be `true` only when `a` and
/// `b` are literally the same symmetry image of the same occupied site —
/// that (trivial, zero-offset) self-overlap is skipped, but `a`'s overlap
/// with its own non-trivial periodic translates is still checked.
#[allow(clippy::too_many_arguments)]
pub fn check_for_intersection(
    a: &ShapeInstance,
    pos_a: Vec2,
    arena_a: &BasisArena,
    b: &ShapeInstance,
    arena_b: &BasisArena,
    cell: &Cell,
    cell_arena: &BasisArena,
    same_instance: bool,
) -> bool {
    let fb = b.fractional_coords(arena_b);
    let shells = shell_depth(cell.angle(cell_arena));

    for dx in -shells..=shells {
        for dy in -shells..=shells {
            if same_instance && dx == 0 && dy == 0 {
                continue;
            }
            let real_b = cell.fractional_to_real(
                cell_arena,
                Vec2::new(fb.x + dx as f64, fb.y + dy as f64),
            );
            if a.intersects_with(pos_a, arena_a, b, real_b, arena_b) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::basis::Basis;
    use crate::symmetry::WyckoffSite;
    use std::f64::consts::FRAC_PI_2;

    fn disc(name: &str) -> Shape {
        Shape::new(name, vec![0.3, 0.3, 0.3, 0.3], 4, 4)
    }

    fn site_at(arena: &mut BasisArena, x: f64, y: f64) -> OccupiedSite {
        let wyckoff = WyckoffSite {
            letter: 'a',
            symmetries: vec![SymmetryTransform::identity()],
            variability: 1,
            rotations: 1,
            mirrors: 0,
        };
        let xb = arena.push(Basis::fixed(x));
        let yb = arena.push(Basis::fixed(y));
        let ab = arena.push(Basis::fixed(0.));
        OccupiedSite::new(wyckoff, xb, yb, ab)
    }

    #[test]
    fn far_apart_shapes_never_intersect() {
        let mut arena = BasisArena::new();
        let shape = disc("disc");
        let site_a = site_at(&mut arena, 0., 0.);
        let site_b = site_at(&mut arena, 0.9, 0.9);
        let t = SymmetryTransform::identity();

        let a = ShapeInstance::new(&shape, &site_a, &t);
        let b = ShapeInstance::new(&shape, &site_b, &t);

        let pos_a = Vec2::new(0., 0.);
        let pos_b = Vec2::new(50., 50.);
        assert!(!a.intersects_with(pos_a, &arena, &b, pos_b, &arena));
    }

    #[test]
    fn coincident_shapes_intersect() {
        let mut arena = BasisArena::new();
        let shape = disc("disc");
        let site_a = site_at(&mut arena, 0., 0.);
        let site_b = site_at(&mut arena, 0., 0.);
        let t = SymmetryTransform::identity();

        let a = ShapeInstance::new(&shape, &site_a, &t);
        let b = ShapeInstance::new(&shape, &site_b, &t);

        let pos = Vec2::new(0., 0.);
        assert!(a.intersects_with(pos, &arena, &b, pos, &arena));
    }

    #[test]
    fn shell_depth_widens_for_sheared_cells() {
        assert_eq!(shell_depth(FRAC_PI_2), 1);
        assert_eq!(shell_depth(0.1), 2);
        assert_eq!(shell_depth(TAU - 0.1), 2);
    }

    #[test]
    fn same_instance_skips_zero_offset_but_not_periodic_images() {
        let mut arena = BasisArena::new();
        let x_len = arena.push(Basis::cell_length(1., 0.1, 10., 0.01));
        let y_len = arena.push(Basis::cell_length(1., 0.1, 10., 0.01));
        let angle = arena.push(Basis::cell_angle(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, x_len, y_len));
        let cell = Cell::new(x_len, y_len, angle);

        let shape = disc("disc");
        let site_a = site_at(&mut arena, 0., 0.);
        let t = SymmetryTransform::identity();
        let a = ShapeInstance::new(&shape, &site_a, &t);

        // A tiny disc at the origin does not overlap its own periodic
        // translate one full cell away.
        assert!(!check_for_intersection(&a, Vec2::new(0., 0.), &arena, &a, &arena, &cell, &arena, true));
    }
}
