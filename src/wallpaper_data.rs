//
// wallpaper_data.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! A small stand-in catalogue of wallpaper groups.
//!
//! spec.md §1 treats the full, hard-coded table of the 17 wallpaper groups
//! as an external input data module, out of scope for this crate. This
//! module carries just enough of that table — `p1`, `p2`, `p4mm`, `p3` and
//! `p6` — to exercise isopointal enumeration and the Monte Carlo driver,
//! including the three literal end-to-end scenarios of spec.md §8
//! (square/p4mm, triangle/p3, hexagon/p6).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::symmetry::{SiteMirror, SymmetryTransform, WallpaperGroup, WyckoffSite};

fn general_site(letter: char, rotations: u64, mirrors: u64) -> WyckoffSite {
    WyckoffSite {
        letter,
        symmetries: vec![SymmetryTransform::identity()],
        variability: 1,
        rotations,
        mirrors,
    }
}

/// `p1`: no symmetry beyond translation. Free cell.
pub fn p1() -> WallpaperGroup {
    WallpaperGroup {
        label: "p1".into(),
        wyckoff_sites: vec![general_site('a', 1, 0)],
        a_b_equal: false,
        rectangular: false,
        hexagonal: false,
        num_symmetries: 1,
    }
}

/// `p2`: 2-fold rotation. Free cell.
pub fn p2() -> WallpaperGroup {
    let mut site = general_site('a', 2, 0);
    site.symmetries.push(
        SymmetryTransform::new(-1., 0., 0., 0., -1., 0.).with_rotation_offset(std::f64::consts::PI),
    );
    WallpaperGroup {
        label: "p2".into(),
        wyckoff_sites: vec![site],
        a_b_equal: false,
        rectangular: false,
        hexagonal: false,
        num_symmetries: 2,
    }
}

/// `p4mm`: square cell, highest-symmetry (4-fold, 4 mirrors) Wyckoff site.
pub fn p4mm() -> WallpaperGroup {
    let site = WyckoffSite {
        letter: 'a',
        symmetries: vec![SymmetryTransform::identity()
            .with_site_mirror(SiteMirror::Deg45)],
        variability: 1,
        rotations: 4,
        mirrors: 4,
    };
    WallpaperGroup {
        label: "p4mm".into(),
        wyckoff_sites: vec![site],
        a_b_equal: true,
        rectangular: true,
        hexagonal: false,
        num_symmetries: 8,
    }
}

/// `p3`: hexagonal cell (`angle = π/3`), 3-fold site.
pub fn p3() -> WallpaperGroup {
    let mut site = general_site('a', 3, 0);
    let two_pi_3 = 2. * FRAC_PI_3;
    site.symmetries.push(
        SymmetryTransform::identity().with_rotation_offset(two_pi_3),
    );
    site.symmetries.push(
        SymmetryTransform::identity().with_rotation_offset(2. * two_pi_3),
    );
    WallpaperGroup {
        label: "p3".into(),
        wyckoff_sites: vec![site],
        a_b_equal: true,
        rectangular: false,
        hexagonal: true,
        num_symmetries: 3,
    }
}

/// `p6`: hexagonal cell (`angle = π/3`), 6-fold site.
pub fn p6() -> WallpaperGroup {
    let mut site = general_site('a', 6, 0);
    for k in 1..6 {
        let offset = k as f64 * FRAC_PI_3;
        site.symmetries
            .push(SymmetryTransform::identity().with_rotation_offset(offset));
    }
    WallpaperGroup {
        label: "p6".into(),
        wyckoff_sites: vec![site],
        a_b_equal: true,
        rectangular: false,
        hexagonal: true,
        num_symmetries: 6,
    }
}

/// The stand-in catalogue of wallpaper groups carried by this crate.
pub fn catalogue() -> Vec<WallpaperGroup> {
    vec![p1(), p2(), p4mm(), p3(), p6()]
}

/// Resolve a wallpaper group label against the stand-in catalogue, as the
/// static table would in a complete deployment (spec.md §1).
pub fn by_label(label: &str) -> Option<WallpaperGroup> {
    catalogue().into_iter().find(|g| g.label == label)
}

/// `π/2`, the Fixed cell angle for `rectangular` groups (spec.md §4.I).
pub const RECTANGULAR_ANGLE: f64 = FRAC_PI_2;

/// `π/3`, the Fixed cell angle for `hexagonal` groups (spec.md §4.I).
pub const HEXAGONAL_ANGLE: f64 = FRAC_PI_3;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catalogue_resolves_by_label() {
        assert_eq!(by_label("p4mm").unwrap().label, "p4mm");
        assert!(by_label("p17").is_none());
    }

    #[test]
    fn p4mm_is_square() {
        let g = p4mm();
        assert!(g.a_b_equal);
        assert!(g.rectangular);
        assert!(!g.hexagonal);
        assert!(g.angle_constraint_is_consistent());
    }

    #[test]
    fn p3_and_p6_are_hexagonal() {
        for g in [p3(), p6()] {
            assert!(g.a_b_equal);
            assert!(g.hexagonal);
            assert!(!g.rectangular);
            assert!(g.angle_constraint_is_consistent());
        }
    }

    #[test]
    fn p1_and_p2_are_free() {
        for g in [p1(), p2()] {
            assert!(!g.a_b_equal);
            assert!(g.angle_constraint_is_consistent());
        }
    }

    #[test]
    fn multiplicities_match_num_symmetries() {
        assert_eq!(p3().wyckoff_sites[0].multiplicity(), 3);
        assert_eq!(p6().wyckoff_sites[0].multiplicity(), 6);
    }
}
