//
// isopointal.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! Enumeration of isopointal groups: multisets of `n` Wyckoff sites
//! compatible with a shape's own rotational/mirror symmetry (spec.md
//! §4.E).

use itertools::Itertools;

use crate::symmetry::{WallpaperGroup, WyckoffSite};

/// An ordered, multiset-canonical list of `WyckoffSite` references to be
/// occupied by one shape replica each.
#[derive(Debug, Clone, PartialEq)]
pub struct IsopointalGroup {
    pub sites: Vec<WyckoffSite>,
}

impl IsopointalGroup {
    pub fn group_multiplicity(&self) -> usize {
        self.sites.iter().map(WyckoffSite::multiplicity).sum()
    }
}

fn is_admissible(shape_rotational_symmetries: u64, shape_mirrors: u64, w: &WyckoffSite) -> bool {
    let rotation_ok = w.rotations != 0 && shape_rotational_symmetries % w.rotations == 0;
    let mirror_ok =
        w.mirrors == 0 || (shape_mirrors != 0 && shape_mirrors % w.mirrors == 0);
    rotation_ok && mirror_ok
}

fn canonical_key(combo: &[WyckoffSite]) -> Vec<char> {
    let mut letters: Vec<char> = combo.iter().map(|w| w.letter).collect();
    letters.sort_unstable();
    letters
}

/// Enumerate every isopointal group of `n` occupied sites admissible for
/// `shape` under `group`, with no two returned groups equal as multisets of
/// Wyckoff letters (spec.md §8 property 9).
///
/// Returns an empty `Vec` — not an error — when the admitted pool is empty
/// or smaller than `n` (the `NoAdmissibleSites` policy of spec.md §7).
pub fn enumerate_isopointal_groups(
    shape_rotational_symmetries: u64,
    shape_mirrors: u64,
    group: &WallpaperGroup,
    n: usize,
) -> Vec<IsopointalGroup> {
    let mut pool: Vec<WyckoffSite> = Vec::new();
    for w in &group.wyckoff_sites {
        if !is_admissible(shape_rotational_symmetries, shape_mirrors, w) {
            continue;
        }
        if w.variability == 1 {
            for _ in 0..n {
                pool.push(w.clone());
            }
        } else {
            pool.push(w.clone());
        }
    }

    if pool.len() < n || n == 0 {
        return Vec::new();
    }

    let mut seen = std::collections::HashSet::new();
    let mut groups = Vec::new();
    for combo in pool.into_iter().combinations(n) {
        let key = canonical_key(&combo);
        if seen.insert(key) {
            groups.push(IsopointalGroup { sites: combo });
        }
    }
    groups
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wallpaper_data;

    #[test]
    fn square_on_p4mm_admits_single_site() {
        let group = wallpaper_data::p4mm();
        let groups = enumerate_isopointal_groups(4, 4, &group, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_multiplicity(), 1);
    }

    #[test]
    fn incompatible_rotation_yields_no_admissible_sites() {
        // A shape with 3-fold symmetry cannot occupy a 4-fold site.
        let group = wallpaper_data::p4mm();
        let groups = enumerate_isopointal_groups(3, 0, &group, 1);
        assert!(groups.is_empty());
    }

    /// spec.md §8 property 9.
    #[test]
    fn no_duplicate_multisets() {
        let group = wallpaper_data::p1();
        let groups = enumerate_isopointal_groups(1, 0, &group, 1);
        let mut keys: Vec<Vec<char>> = groups.iter().map(|g| canonical_key(&g.sites)).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn zero_sites_requested_yields_empty() {
        let group = wallpaper_data::p1();
        assert!(enumerate_isopointal_groups(1, 0, &group, 0).is_empty());
    }
}
