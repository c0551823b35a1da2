//
// symmetry.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! `SymmetryTransform`, `WyckoffSite` and `WallpaperGroup` (spec.md §3, §4.C).
//!
//! The static table of the 17 wallpaper groups itself is an external input
//! data module per spec.md §1; `crate::wallpaper_data` carries a small
//! stand-in catalogue sufficient to drive the isopointal enumeration and
//! Monte Carlo components, not the full table.

use serde::{Deserialize, Serialize};

use crate::geometry::{positive_modulo, Vec2};

/// One of the eight discrete mirror-plane orientations a `WyckoffSite`'s
/// general position may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteMirror {
    Deg0,
    Deg30,
    Deg45,
    Deg60,
    Deg90,
    Deg135,
    Deg300,
    Deg330,
}

impl SiteMirror {
    pub fn degrees(self) -> f64 {
        match self {
            SiteMirror::Deg0 => 0.,
            SiteMirror::Deg30 => 30.,
            SiteMirror::Deg45 => 45.,
            SiteMirror::Deg60 => 60.,
            SiteMirror::Deg90 => 90.,
            SiteMirror::Deg135 => 135.,
            SiteMirror::Deg300 => 300.,
            SiteMirror::Deg330 => 330.,
        }
    }

    pub fn radians(self) -> f64 {
        self.degrees().to_radians()
    }
}

/// An immutable affine map on fractional coordinates, one image of a
/// `WyckoffSite`'s orbit under its wallpaper group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryTransform {
    pub ax: f64,
    pub bx: f64,
    pub cx: f64,
    pub ay: f64,
    pub by: f64,
    pub cy: f64,
    pub rotation_offset: f64,
    pub flipped: bool,
    pub site_mirror: SiteMirror,
}

impl SymmetryTransform {
    pub fn identity() -> Self {
        Self {
            ax: 1.,
            bx: 0.,
            cx: 0.,
            ay: 0.,
            by: 1.,
            cy: 0.,
            rotation_offset: 0.,
            flipped: false,
            site_mirror: SiteMirror::Deg0,
        }
    }

    pub fn new(ax: f64, bx: f64, cx: f64, ay: f64, by: f64, cy: f64) -> Self {
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
            ..Self::identity()
        }
    }

    pub fn with_rotation_offset(mut self, rotation_offset: f64) -> Self {
        self.rotation_offset = rotation_offset;
        self
    }

    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    pub fn with_site_mirror(mut self, site_mirror: SiteMirror) -> Self {
        self.site_mirror = site_mirror;
        self
    }

    /// Apply the affine map to a point in fractional coordinates, reducing
    /// both components into `[0, 1)`.
    pub fn real_to_fractional(&self, p: Vec2) -> Vec2 {
        let x = positive_modulo(self.ax * p.x + self.bx * p.y + self.cx, 1.);
        let y = positive_modulo(self.ay * p.x + self.by * p.y + self.cy, 1.);
        Vec2::new(x, y)
    }
}

/// An equivalence class of positions in a wallpaper group, labelled by a
/// letter; its orbit size is `multiplicity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WyckoffSite {
    pub letter: char,
    pub symmetries: Vec<SymmetryTransform>,
    /// 0 or 1: whether distinct copies of this site (for a multi-site
    /// isopointal group) are interchangeable at the same Wyckoff position.
    pub variability: u8,
    /// Positional rotation order at this site.
    pub rotations: u64,
    /// Positional mirror count at this site (0 if none).
    pub mirrors: u64,
}

impl WyckoffSite {
    pub fn multiplicity(&self) -> usize {
        self.symmetries.len()
    }

    fn first(&self) -> &SymmetryTransform {
        self.symmetries
            .first()
            .expect("a WyckoffSite always has at least one symmetry image")
    }

    pub fn vary_x(&self) -> bool {
        self.first().ax.abs() > 0.1
    }

    pub fn vary_y(&self) -> bool {
        self.first().by.abs() > 0.1
    }

    pub fn mirror_type(&self) -> SiteMirror {
        self.first().site_mirror
    }
}

/// One of the 17 planar crystallographic (wallpaper) symmetry groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallpaperGroup {
    pub label: String,
    pub wyckoff_sites: Vec<WyckoffSite>,
    pub a_b_equal: bool,
    pub rectangular: bool,
    pub hexagonal: bool,
    pub num_symmetries: u64,
}

impl WallpaperGroup {
    /// Exactly one of `{free, rectangular, hexagonal}` governs the cell
    /// angle constraint (spec.md §3 WallpaperGroup invariant).
    pub fn angle_constraint_is_consistent(&self) -> bool {
        let flags = [
            !self.a_b_equal && !self.rectangular && !self.hexagonal,
            self.rectangular,
            self.hexagonal,
        ];
        flags.iter().filter(|b| **b).count() == 1
    }
}
