//
// optimise.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! The Metropolis simulated-annealing driver (spec.md §4.I): structure
//! initialization, the per-step propose/validate/accept loop, and the
//! rayon-parallel dispatch of independent annealing cycles within one
//! isopointal group.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rayon::prelude::*;

use crate::basis::{Basis, BasisArena};
use crate::cell::{Cell, OccupiedSite};
use crate::error::PackingError;
use crate::isopointal::IsopointalGroup;
use crate::shape::Shape;
use crate::state::PackedState;
use crate::symmetry::WallpaperGroup;
use crate::wallpaper_data::{HEXAGONAL_ANGLE, RECTANGULAR_ANGLE};

/// Tunables of the annealing schedule (spec.md §4.I, §6 defaults).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MCVars {
    pub kt_start: f64,
    pub kt_finish: f64,
    pub max_step_size: f64,
    pub steps: u64,
    pub num_cycles: u32,
}

impl Default for MCVars {
    fn default() -> Self {
        Self {
            kt_start: 0.1,
            kt_finish: 5e-4,
            max_step_size: 0.01,
            steps: 10_000,
            num_cycles: 32,
        }
    }
}

impl MCVars {
    /// `(kT_finish / kT_start)^(1/steps)`.
    pub fn kt_ratio(&self) -> f64 {
        (self.kt_finish / self.kt_start).powf(1. / self.steps as f64)
    }
}

/// Builder for [`MCVars`], mirroring the teacher's `BuildOptimiser` pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct MCVarsBuilder {
    vars: MCVars,
}

impl MCVarsBuilder {
    pub fn new() -> Self {
        Self {
            vars: MCVars::default(),
        }
    }

    pub fn kt_start(&mut self, kt_start: f64) -> &mut Self {
        self.vars.kt_start = kt_start;
        self
    }

    pub fn kt_finish(&mut self, kt_finish: f64) -> &mut Self {
        self.vars.kt_finish = kt_finish;
        self
    }

    pub fn max_step_size(&mut self, max_step_size: f64) -> &mut Self {
        self.vars.max_step_size = max_step_size;
        self
    }

    pub fn steps(&mut self, steps: u64) -> &mut Self {
        self.vars.steps = steps;
        self
    }

    pub fn num_cycles(&mut self, num_cycles: u32) -> &mut Self {
        self.vars.num_cycles = num_cycles;
        self
    }

    pub fn build(&self) -> MCVars {
        self.vars
    }
}

/// Build a fresh `PackedState` for `iso` under `group`, with a randomly
/// initialised cell and occupied sites (spec.md §4.I "Initialization").
pub fn initialise_structure(
    shape: Shape,
    iso: &IsopointalGroup,
    group: WallpaperGroup,
    step: f64,
    rng: &mut impl Rng,
) -> PackedState {
    let max_cell_size = 4. * shape.max_radius() * iso.group_multiplicity() as f64;

    let mut arena = BasisArena::new();
    let (x_len, y_len) = if group.a_b_equal {
        let len = arena.push(Basis::cell_length(max_cell_size, 0.1, max_cell_size, step));
        (len, len)
    } else {
        (
            arena.push(Basis::cell_length(max_cell_size, 0.1, max_cell_size, step)),
            arena.push(Basis::cell_length(max_cell_size, 0.1, max_cell_size, step)),
        )
    };

    let angle = if group.hexagonal {
        arena.push(Basis::fixed(HEXAGONAL_ANGLE))
    } else if group.rectangular {
        arena.push(Basis::fixed(RECTANGULAR_ANGLE))
    } else {
        let u: f64 = rng.gen();
        let value = std::f64::consts::FRAC_PI_4 + u * std::f64::consts::FRAC_PI_2;
        arena.push(Basis::cell_angle(
            value,
            std::f64::consts::FRAC_PI_4,
            3. * std::f64::consts::FRAC_PI_4,
            x_len,
            y_len,
        ))
    };
    let cell = Cell::new(x_len, y_len, angle);

    let mut occupied_sites = Vec::with_capacity(iso.sites.len());
    for wyckoff in &iso.sites {
        let x = if wyckoff.vary_x() {
            let u: f64 = rng.gen();
            arena.push(Basis::free(u, 0., 1., step))
        } else {
            arena.push(Basis::fixed(0.))
        };
        let y = if wyckoff.vary_y() {
            let u: f64 = rng.gen();
            arena.push(Basis::free(u, 0., 1., step))
        } else {
            arena.push(Basis::fixed(0.))
        };
        let angle_basis = if wyckoff.mirrors > 0 {
            let m = wyckoff.mirror_type().degrees();
            arena.push(Basis::mirror(m.to_radians(), wyckoff.mirrors))
        } else {
            let u: f64 = rng.gen();
            arena.push(Basis::free(u * std::f64::consts::TAU, 0., std::f64::consts::TAU, step))
        };
        occupied_sites.push(OccupiedSite::new(wyckoff.clone(), x, y, angle_basis));
    }

    PackedState::new(group, shape, cell, occupied_sites, arena)
}

/// `A = exp((1/p_prev − 1/p)/kt + replicas · ln(p_prev/p))`, clipped into
/// `[0, 1]` (spec.md §4.I step 6). `replicas` is the number of shape
/// replicas in the cell.
fn acceptance_probability(p_prev: f64, p: f64, kt: f64, replicas: f64) -> f64 {
    let exponent = (1. / p_prev - 1. / p) / kt + replicas * (p_prev / p).ln();
    exponent.exp().min(1.).max(0.)
}

/// Run one annealing cycle of `vars.steps` Metropolis steps starting from
/// `state`, returning the best `PackedState` observed.
///
/// `EmptyBasis` (spec.md §7): if `state` has no variable basis parameters,
/// returns `state` unchanged rather than erroring.
///
/// `cancel` is the cooperative cancellation token of spec.md §5: checked
/// once per step, and on observing it set (`Cancelled`, spec.md §7) the
/// loop stops early and the best snapshot observed so far is returned,
/// same as a normal completion.
pub fn anneal_once(
    mut state: PackedState,
    vars: &MCVars,
    seed: u64,
    cancel: &AtomicBool,
) -> Result<PackedState, PackingError> {
    let variable_ids = state.arena.variable_ids();
    if variable_ids.is_empty() {
        return Ok(state);
    }

    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let kt_ratio = vars.kt_ratio();
    let mut kt = vars.kt_start;

    let mut p_prev = state.packing_fraction()?;
    let mut p_max = p_prev;
    let mut best_basis = state.save_basis();
    let mut best_flips: Vec<bool> = state.occupied_sites.iter().map(|s| s.flip_site).collect();
    let replicas = state.num_shapes() as f64;

    for t in 0..vars.steps {
        if cancel.load(Ordering::Relaxed) {
            debug!("anneal_once cancelled at step {}", t);
            break;
        }

        kt *= kt_ratio;

        let i = variable_ids[rng.gen_range(0..variable_ids.len())];

        if t % 100 != 0 {
            let f = state.flip.propose(&mut rng);
            let mut flip_bits: Vec<bool> =
                state.occupied_sites.iter().map(|s| s.flip_site).collect();
            state.flip.set(f, &mut flip_bits);
            for (site, bit) in state.occupied_sites.iter_mut().zip(flip_bits.iter()) {
                site.flip_site = *bit;
            }
        }

        let v = state.arena.propose(i, &mut rng, kt);
        state.arena.set(i, v);

        if state.check_intersection() {
            state.arena.reset(i);
            // Flip is intentionally left uncommitted on rejection here —
            // see spec.md §9 Open Questions.
            continue;
        }

        let p = state.packing_fraction()?;
        let threshold: f64 = rng.gen();
        let accept_probability = acceptance_probability(p_prev, p, kt, replicas);
        if threshold >= accept_probability {
            state.arena.reset(i);
            let mut flip_bits: Vec<bool> =
                state.occupied_sites.iter().map(|s| s.flip_site).collect();
            state.flip.reset(&mut flip_bits);
            for (site, bit) in state.occupied_sites.iter_mut().zip(flip_bits.iter()) {
                site.flip_site = *bit;
            }
        } else {
            p_prev = p;
        }

        if p_prev > p_max {
            p_max = p_prev;
            best_basis = state.save_basis();
            best_flips = state.occupied_sites.iter().map(|s| s.flip_site).collect();
            trace!("new best packing fraction {:.6} at step {}", p_max, t);
        }
    }

    state.load_basis(&best_basis);
    for (site, flip) in state.occupied_sites.iter_mut().zip(best_flips.into_iter()) {
        site.flip_site = flip;
    }
    debug!("anneal_once finished with packing fraction {:.6}", p_max);
    Ok(state)
}

/// Run `vars.num_cycles` independent annealing cycles for `iso`, each from
/// a freshly initialised structure, in parallel, and return the single
/// best `PackedState` across all cycles.
///
/// `cancel` is shared across every cycle's worker thread; setting it stops
/// each cycle's `anneal_once` at its next step rather than aborting the
/// whole dispatch, so cycles already past their last step still
/// contribute their best snapshot to the final reduction.
pub fn optimise_isopointal_group(
    shape: &Shape,
    iso: &IsopointalGroup,
    group: &WallpaperGroup,
    vars: &MCVars,
    base_seed: u64,
    cancel: &AtomicBool,
) -> Option<PackedState> {
    (0..vars.num_cycles)
        .into_par_iter()
        .filter_map(|cycle| {
            let seed = base_seed.wrapping_add(cycle as u64);
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let state = initialise_structure(
                shape.clone(),
                iso,
                group.clone(),
                vars.max_step_size,
                &mut rng,
            );
            match anneal_once(state, vars, seed, cancel) {
                Ok(result) => Some(result),
                Err(err) => {
                    debug!("cycle {} failed: {}", cycle, err);
                    None
                }
            }
        })
        .reduce_with(|a, b| match (a.packing_fraction(), b.packing_fraction()) {
            (Ok(pa), Ok(pb)) if pb > pa => b,
            _ => a,
        })
}
