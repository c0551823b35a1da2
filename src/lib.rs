//
// lib.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! Densest periodic packing of a single rigid 2D polygonal shape under a
//! wallpaper (planar crystallographic) symmetry group, found by simulated
//! annealing over a basis graph of bounded continuous and discrete
//! parameters.
//!
//! The core couples four parts: the [`basis`] graph of mutable parameters,
//! [`isopointal`] enumeration of admissible Wyckoff-site assignments,
//! [`instance`] polygon intersection testing across periodic images, and
//! the [`optimise`] Metropolis annealing driver that ties them together
//! into a [`state::PackedState`].
//!
//! Out of scope: a command-line driver, logging sink configuration, SVG
//! rendering, CSV persistence, scripting bindings, and the full static
//! table of the 17 wallpaper groups (of which [`wallpaper_data`] carries
//! only a representative subset).

pub mod basis;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod isopointal;
pub mod optimise;
pub mod shape;
pub mod state;
pub mod symmetry;
pub mod wallpaper_data;

pub use basis::{Basis, BasisArena, BasisId, FlipBasis};
pub use cell::{Cell, OccupiedSite};
pub use error::PackingError;
pub use geometry::Vec2;
pub use instance::ShapeInstance;
pub use isopointal::{enumerate_isopointal_groups, IsopointalGroup};
pub use optimise::{initialise_structure, optimise_isopointal_group, MCVars, MCVarsBuilder};
pub use shape::Shape;
pub use state::PackedState;
pub use symmetry::{SiteMirror, SymmetryTransform, WallpaperGroup, WyckoffSite};
