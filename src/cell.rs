//
// cell.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! The parametric unit cell ([`Cell`]) and a shape replica's placement
//! within it ([`OccupiedSite`]) — spec.md §4.F.

use crate::basis::{Basis, BasisArena, BasisId};
use crate::geometry::Vec2;
use crate::symmetry::WyckoffSite;

/// Three references to basis parameters: the cell's side lengths and the
/// angle enclosed between them. All of `Cell`'s methods are pure functions
/// of the arena's current values.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub x_len: BasisId,
    pub y_len: BasisId,
    pub angle: BasisId,
}

impl Cell {
    pub fn new(x_len: BasisId, y_len: BasisId, angle: BasisId) -> Self {
        Self { x_len, y_len, angle }
    }

    pub fn x_len(&self, arena: &BasisArena) -> f64 {
        arena.value(self.x_len)
    }

    pub fn y_len(&self, arena: &BasisArena) -> f64 {
        arena.value(self.y_len)
    }

    pub fn angle(&self, arena: &BasisArena) -> f64 {
        arena.value(self.angle)
    }

    /// `x_len · y_len · |sin(angle)|`.
    pub fn area(&self, arena: &BasisArena) -> f64 {
        self.x_len(arena) * self.y_len(arena) * self.angle(arena).sin().abs()
    }

    /// `(f.x·x_len + f.y·y_len·cos(angle), f.y·y_len·sin(angle))`.
    pub fn fractional_to_real(&self, arena: &BasisArena, f: Vec2) -> Vec2 {
        let (x_len, y_len, angle) = (self.x_len(arena), self.y_len(arena), self.angle(arena));
        Vec2::new(
            f.x * x_len + f.y * y_len * angle.cos(),
            f.y * y_len * angle.sin(),
        )
    }
}

/// A single shape replica placed at a `WyckoffSite`'s orbit.
///
/// `flip_site` is a discrete mutable bit (the target of [`crate::basis::FlipBasis`]),
/// separate from the continuous `{x, y, angle}` basis parameters.
#[derive(Debug, Clone)]
pub struct OccupiedSite {
    pub wyckoff: WyckoffSite,
    pub x: BasisId,
    pub y: BasisId,
    pub angle: BasisId,
    pub flip_site: bool,
}

impl OccupiedSite {
    pub fn new(wyckoff: WyckoffSite, x: BasisId, y: BasisId, angle: BasisId) -> Self {
        Self {
            wyckoff,
            x,
            y,
            angle,
            flip_site: false,
        }
    }

    /// `(x.value, y.value)`.
    pub fn get_position(&self, arena: &BasisArena) -> Vec2 {
        Vec2::new(arena.value(self.x), arena.value(self.y))
    }

    pub fn angle_value(&self, arena: &BasisArena) -> f64 {
        arena.value(self.angle)
    }

    pub fn multiplicity(&self) -> usize {
        self.wyckoff.multiplicity()
    }

    /// Whether this site's `x` basis is correctly `Fixed`, per the
    /// `!vary_x ⇒ x is Fixed` invariant (spec.md §3 OccupiedSite).
    pub fn x_fixed_invariant_holds(&self, arena: &BasisArena) -> bool {
        self.wyckoff.vary_x() || matches!(arena.get(self.x), Basis::Fixed(_))
    }

    pub fn y_fixed_invariant_holds(&self, arena: &BasisArena) -> bool {
        self.wyckoff.vary_y() || matches!(arena.get(self.y), Basis::Fixed(_))
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::symmetry::SymmetryTransform;

    fn square_cell() -> (BasisArena, Cell) {
        let mut arena = BasisArena::new();
        let x_len = arena.push(Basis::cell_length(2., 0.1, 10., 0.01));
        let y_len = arena.push(Basis::cell_length(2., 0.1, 10., 0.01));
        let angle = arena.push(Basis::cell_angle(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, x_len, y_len));
        (arena, Cell::new(x_len, y_len, angle))
    }

    /// spec.md §8 property 5.
    #[test]
    fn area_formula() {
        let (arena, cell) = square_cell();
        let expected =
            (cell.x_len(&arena) * cell.y_len(&arena) * cell.angle(&arena).sin()).abs();
        assert_abs_diff_eq!(cell.area(&arena), expected, epsilon = 1e-12);
    }

    #[test]
    fn fractional_to_real_square() {
        let (arena, cell) = square_cell();
        let real = cell.fractional_to_real(&arena, Vec2::new(0.5, 0.5));
        assert_abs_diff_eq!(real.x, 1., epsilon = 1e-10);
        assert_abs_diff_eq!(real.y, 1., epsilon = 1e-10);
    }

    fn site(vary_x: bool, vary_y: bool) -> WyckoffSite {
        let mut sym = SymmetryTransform::identity();
        if !vary_x {
            sym.ax = 0.;
        }
        if !vary_y {
            sym.by = 0.;
        }
        WyckoffSite {
            letter: 'a',
            symmetries: vec![sym],
            variability: 1,
            rotations: 1,
            mirrors: 0,
        }
    }

    #[test]
    fn occupied_site_position_and_invariant() {
        let mut arena = BasisArena::new();
        let x = arena.push(Basis::fixed(0.));
        let y = arena.push(Basis::free(0.3, 0., 1., 1.));
        let angle = arena.push(Basis::free(0., 0., std::f64::consts::TAU, 1.));
        let occ = OccupiedSite::new(site(false, true), x, y, angle);

        let pos = occ.get_position(&arena);
        assert_abs_diff_eq!(pos.x, 0.);
        assert_abs_diff_eq!(pos.y, 0.3);
        assert!(occ.x_fixed_invariant_holds(&arena));
        assert!(occ.y_fixed_invariant_holds(&arena));
        assert_eq!(occ.multiplicity(), 1);
    }
}
