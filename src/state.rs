//
// state.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! `PackedState`: the owner of one candidate packing's cell, occupied
//! sites and basis arena (spec.md §4.H).

use itertools::iproduct;

use crate::basis::{BasisArena, FlipBasis};
use crate::cell::{Cell, OccupiedSite};
use crate::error::PackingError;
use crate::instance::{check_for_intersection, ShapeInstance};
use crate::shape::Shape;
use crate::symmetry::WallpaperGroup;

/// Owns a `WallpaperGroup`, a `Shape`, a `Cell`, the occupied sites and the
/// arena of basis parameters backing all of the above.
///
/// Lifecycle: created by [`crate::optimise::initialise_structure`], mutated
/// only by the Monte Carlo driver, dropped once its isopointal group's
/// optimization completes.
#[derive(Debug, Clone)]
pub struct PackedState {
    pub wallpaper: WallpaperGroup,
    pub shape: Shape,
    pub cell: Cell,
    pub occupied_sites: Vec<OccupiedSite>,
    pub arena: BasisArena,
    pub flip: FlipBasis,
}

impl PackedState {
    pub fn new(
        wallpaper: WallpaperGroup,
        shape: Shape,
        cell: Cell,
        occupied_sites: Vec<OccupiedSite>,
        arena: BasisArena,
    ) -> Self {
        let flip = FlipBasis::new(occupied_sites.len());
        Self {
            wallpaper,
            shape,
            cell,
            occupied_sites,
            arena,
            flip,
        }
    }

    /// `Σ site.multiplicity`, constant over the lifetime of a `PackedState`.
    pub fn num_shapes(&self) -> usize {
        self.occupied_sites.iter().map(OccupiedSite::multiplicity).sum()
    }

    /// `num_shapes · shape.area / cell.area`.
    pub fn packing_fraction(&self) -> Result<f64, PackingError> {
        let fraction = self.num_shapes() as f64 * self.shape.area() / self.cell.area(&self.arena);
        if fraction.is_finite() {
            Ok(fraction)
        } else {
            Err(PackingError::NumericError {
                x_len: self.cell.x_len(&self.arena),
                y_len: self.cell.y_len(&self.arena),
                angle: self.cell.angle(&self.arena),
                detail: "packing fraction is not finite".into(),
            })
        }
    }

    /// Whether any two shape replicas, across all symmetry images and
    /// periodic translates, overlap (spec.md §4.G "Global intersection").
    pub fn check_intersection(&self) -> bool {
        for (i, site_a) in self.occupied_sites.iter().enumerate() {
            for (j, site_b) in self.occupied_sites.iter().enumerate().skip(i) {
                for (ta, tb) in iproduct!(&site_a.wyckoff.symmetries, &site_b.wyckoff.symmetries) {
                    let a = ShapeInstance::new(&self.shape, site_a, ta);
                    let b = ShapeInstance::new(&self.shape, site_b, tb);
                    let pos_a = self
                        .cell
                        .fractional_to_real(&self.arena, a.fractional_coords(&self.arena));
                    let same_instance =
                        i == j && std::ptr::eq(ta, tb);
                    if check_for_intersection(
                        &a,
                        pos_a,
                        &self.arena,
                        &b,
                        &self.arena,
                        &self.cell,
                        &self.arena,
                        same_instance,
                    ) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Dense snapshot of every current basis value, in declaration order.
    pub fn save_basis(&self) -> Vec<f64> {
        self.arena.save()
    }

    /// Restore every basis value from a snapshot produced by
    /// [`PackedState::save_basis`] on this same state.
    pub fn load_basis(&mut self, snapshot: &[f64]) {
        self.arena.load(snapshot);
    }

    /// `'c' | 's' | 'a'`: chiral, achiral (self-symmetric), or mixed,
    /// derived from `chiralsum = Σ (2·flip − 1) · multiplicity` against
    /// `totalsum = Σ multiplicity` (spec.md §6).
    pub fn chirality(&self) -> char {
        let mut chiralsum: i64 = 0;
        let mut totalsum: i64 = 0;
        for site in &self.occupied_sites {
            let m = site.multiplicity() as i64;
            let flip = if site.flip_site { 1 } else { 0 };
            chiralsum += (2 * flip - 1) * m;
            totalsum += m;
        }
        if chiralsum == totalsum {
            'c'
        } else if chiralsum == -totalsum {
            's'
        } else {
            'a'
        }
    }

    /// Textual serialization per spec.md §6: shape name, cell parameters,
    /// wallpaper group label and, for every occupied site and every
    /// symmetry image, its fractional position and effective angle.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Shape:{}\nCell:\n a:{:.6}\n b:{:.6}\n angle:{:.6}\nWallpaper Group:{}\n",
            self.shape.name,
            self.cell.x_len(&self.arena),
            self.cell.y_len(&self.arena),
            self.cell.angle(&self.arena),
            self.wallpaper.label,
        );
        for site in &self.occupied_sites {
            out.push_str(&format!("Site:{}\n", site.wyckoff.letter));
            let angle_value = site.angle_value(&self.arena);
            for transform in &site.wyckoff.symmetries {
                let instance = ShapeInstance::new(&self.shape, site, transform);
                let pos = instance.fractional_coords(&self.arena);
                out.push_str(&format!(
                    "  x:{:.6} y:{:.6} angle:{:.6}\n",
                    pos.x,
                    pos.y,
                    angle_value + transform.rotation_offset
                ));
            }
        }
        out
    }
}
