//
// basis.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! Bounded scalar parameters ("basis") with tentative/commit/rollback
//! semantics, stored in a flat, index-addressed arena (spec.md §9 "Cyclic
//! references via weak indices") rather than the raw/shared-pointer graph
//! of the original implementation.
//!
//! [`Basis`] is a tagged variant over the five kinds spec.md §3 describes
//! (`Free`, `Fixed`, `CellLength`, `CellAngle`, `Mirror`); the discrete Flip
//! move lives separately in [`FlipBasis`] since it mutates a list of
//! occupied sites rather than another basis parameter (see `site.rs`).

use std::f64::consts::PI;

use rand::Rng;

use crate::geometry::positive_modulo;

/// Index of a [`Basis`] within a [`BasisArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasisId(pub(crate) usize);

/// Shared `{value, previous, min, max, step}` core of every basis variant.
#[derive(Debug, Clone, Copy)]
struct BasisCore {
    value: f64,
    previous: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl BasisCore {
    fn new(value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            value,
            previous: value,
            min,
            max,
            step,
        }
    }

    fn value_range(&self) -> f64 {
        self.max - self.min
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Commit a new (unclamped) value, saving the current value as
    /// `previous` for a single level of rollback.
    fn commit(&mut self, new_value: f64) {
        self.previous = self.value;
        self.value = self.clamp(new_value);
    }

    fn rollback(&mut self) {
        self.value = self.previous;
    }
}

/// A single bounded degree of freedom of the packing.
#[derive(Debug, Clone)]
pub enum Basis {
    /// Unconstrained within `[min, max]`.
    Free(BasisCore),
    /// `min == max == value`; `propose`/`set` are no-ops.
    Fixed(BasisCore),
    /// A cell side length; proposals scale the value rather than offset it.
    CellLength(BasisCore),
    /// A cell angle; committing rescales the two linked [`CellLength`]
    /// parameters to preserve cell area.
    CellAngle {
        core: BasisCore,
        length_a: BasisId,
        length_b: BasisId,
    },
    /// Quantised to multiples of `π / mirrors`.
    Mirror { core: BasisCore, mirrors: u64 },
}

impl Basis {
    pub fn free(value: f64, min: f64, max: f64, step: f64) -> Self {
        Basis::Free(BasisCore::new(value, min, max, step))
    }

    pub fn fixed(value: f64) -> Self {
        Basis::Fixed(BasisCore::new(value, value, value, 0.))
    }

    pub fn cell_length(value: f64, min: f64, max: f64, step: f64) -> Self {
        Basis::CellLength(BasisCore::new(value, min, max, step))
    }

    pub fn cell_angle(value: f64, min: f64, max: f64, length_a: BasisId, length_b: BasisId) -> Self {
        Basis::CellAngle {
            core: BasisCore::new(value, min, max, 1.),
            length_a,
            length_b,
        }
    }

    pub fn mirror(value: f64, mirrors: u64) -> Self {
        Basis::Mirror {
            core: BasisCore::new(value, 0., 2. * PI, 1.),
            mirrors,
        }
    }

    fn core(&self) -> &BasisCore {
        match self {
            Basis::Free(core)
            | Basis::Fixed(core)
            | Basis::CellLength(core)
            | Basis::CellAngle { core, .. }
            | Basis::Mirror { core, .. } => core,
        }
    }

    fn core_mut(&mut self) -> &mut BasisCore {
        match self {
            Basis::Free(core)
            | Basis::Fixed(core)
            | Basis::CellLength(core)
            | Basis::CellAngle { core, .. }
            | Basis::Mirror { core, .. } => core,
        }
    }

    pub fn value(&self) -> f64 {
        self.core().value
    }

    pub fn value_range(&self) -> f64 {
        self.core().value_range()
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Basis::Fixed(_))
    }

    /// Propose a new value without mutating `self`. `u` is drawn fresh from
    /// `[0, 1)` by the caller-supplied `rng`.
    pub fn propose(&self, rng: &mut impl Rng, kt: f64) -> f64 {
        let u: f64 = rng.gen();
        match self {
            Basis::Free(core) => core.value + core.step * core.value_range() * (u - 0.5),
            Basis::Fixed(core) => core.value,
            Basis::CellLength(core) => core.value * (1. + (3. * kt).min(0.1) * (u - 0.5)),
            Basis::CellAngle { core, .. } => core.value + core.step * core.value_range() * (u - 0.5),
            Basis::Mirror { core, mirrors } => {
                let m = *mirrors;
                if m % 2 == 0 && u < 0.5 {
                    let delta = PI / m as f64;
                    if core.value < 3. * PI / 4. {
                        core.value + delta
                    } else {
                        core.value - delta
                    }
                } else {
                    positive_modulo(core.value + PI, 2. * PI)
                }
            }
        }
    }

    /// Local clamp-and-commit, without any linked side effects. Used
    /// directly by every variant except `CellAngle`, whose cross-parameter
    /// rescale is handled one level up by [`BasisArena::set`].
    fn commit_local(&mut self, new_value: f64) {
        if self.is_fixed() {
            return;
        }
        self.core_mut().commit(new_value);
    }

    fn rollback_local(&mut self) {
        if self.is_fixed() {
            return;
        }
        self.core_mut().rollback();
    }
}

/// The flat, index-addressed store of [`Basis`] parameters owned by a
/// `PackedState`. All cross-references between parameters (a `CellAngle`'s
/// two linked `CellLength`s, or two cell sides sharing one `CellLength`
/// when `a_b_equal`) are [`BasisId`] indices into this single `Vec`,
/// eliminating the raw-pointer aliasing of the original implementation.
#[derive(Debug, Clone, Default)]
pub struct BasisArena {
    values: Vec<Basis>,
}

impl BasisArena {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, basis: Basis) -> BasisId {
        self.values.push(basis);
        BasisId(self.values.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, id: BasisId) -> &Basis {
        &self.values[id.0]
    }

    pub fn value(&self, id: BasisId) -> f64 {
        self.get(id).value()
    }

    pub fn propose(&self, id: BasisId, rng: &mut impl Rng, kt: f64) -> f64 {
        self.get(id).propose(rng, kt)
    }

    /// Indices of every non-`Fixed` parameter: the pool the Monte Carlo
    /// driver draws its mutation target from (spec.md §4.I step 2).
    pub fn variable_ids(&self) -> Vec<BasisId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_fixed())
            .map(|(i, _)| BasisId(i))
            .collect()
    }

    /// Commit `new_value` to the parameter at `id`. For `CellAngle`, also
    /// rescales the two linked `CellLength` parameters by
    /// `sqrt(sin(previous) / sin(new))` so the cell area is preserved
    /// (spec.md §3, CellAngle variant).
    pub fn set(&mut self, id: BasisId, new_value: f64) {
        if let Basis::CellAngle {
            length_a, length_b, ..
        } = self.values[id.0]
        {
            let previous = self.values[id.0].value();
            self.values[id.0].commit_local(new_value);
            let committed = self.values[id.0].value();
            let scale = (previous.sin() / committed.sin()).sqrt();
            self.rescale_length(length_a, scale);
            if length_b != length_a {
                self.rescale_length(length_b, scale);
            }
            return;
        }
        self.values[id.0].commit_local(new_value);
    }

    fn rescale_length(&mut self, id: BasisId, scale: f64) {
        if let Basis::CellLength(core) = &mut self.values[id.0] {
            let new_value = core.value * scale;
            core.commit(new_value);
        }
    }

    fn rollback_length(&mut self, id: BasisId) {
        if let Basis::CellLength(core) = &mut self.values[id.0] {
            core.rollback();
        }
    }

    /// Roll back the parameter at `id` to its pre-`set` value. For
    /// `CellAngle`, also restores the two linked lengths to their
    /// pre-`set` values.
    pub fn reset(&mut self, id: BasisId) {
        if let Basis::CellAngle {
            length_a, length_b, ..
        } = self.values[id.0]
        {
            self.values[id.0].rollback_local();
            self.rollback_length(length_a);
            if length_b != length_a {
                self.rollback_length(length_b);
            }
            return;
        }
        self.values[id.0].rollback_local();
    }

    /// Dense snapshot of every current value, in declaration order.
    pub fn save(&self) -> Vec<f64> {
        self.values.iter().map(Basis::value).collect()
    }

    /// Restore every value from a snapshot produced by [`BasisArena::save`]
    /// on this same arena. Bypasses `propose`/`set`'s transactional commit
    /// (there is nothing sensible to roll back to), but still clamps
    /// defensively into each parameter's bounds.
    pub fn load(&mut self, snapshot: &[f64]) {
        for (basis, &value) in self.values.iter_mut().zip(snapshot) {
            let core = basis.core_mut();
            let clamped = core.clamp(value);
            core.value = clamped;
            core.previous = clamped;
        }
    }
}

/// The discrete "flip a single occupied site" move.
///
/// Unlike the continuous [`Basis`] variants, `FlipBasis` does not live in
/// the [`BasisArena`]: it weakly references the occupied-site list owned
/// by the `PackedState` (spec.md §3 "Flip (discrete)"), so its `set`/
/// `reset` take that list explicitly rather than through arena indexing.
#[derive(Debug, Clone)]
pub struct FlipBasis {
    num_sites: usize,
    previous: Option<usize>,
}

impl FlipBasis {
    pub fn new(num_sites: usize) -> Self {
        Self {
            num_sites,
            previous: None,
        }
    }

    /// `⌊u · |sites|⌋`.
    pub fn propose(&self, rng: &mut impl Rng) -> usize {
        let u: f64 = rng.gen();
        ((u * self.num_sites as f64) as usize).min(self.num_sites.saturating_sub(1))
    }

    /// Toggle the `flip_site` bit of `sites[index]`, recording `index` for
    /// a single later [`FlipBasis::reset`].
    pub fn set(&mut self, index: usize, flip_bits: &mut [bool]) {
        flip_bits[index] ^= true;
        self.previous = Some(index);
    }

    /// Toggle the recorded index's bit back, then forget it — idempotent
    /// after the first call (spec.md §8 property 3).
    pub fn reset(&mut self, flip_bits: &mut [bool]) {
        if let Some(index) = self.previous.take() {
            flip_bits[index] ^= true;
        }
    }
}
