//
// error.rs
// Copyright (C) 2019 Malcolm Ramsay <malramsay64@gmail.com>
// Distributed under terms of the MIT license.
//

//! Error kinds raised by the packing core, per the policy table of
//! spec.md §7. `EmptyBasis`, `NoAdmissibleSites` and `Cancelled` are not
//! fatal — the call sites that would raise them instead return an
//! unchanged state, an empty result, or the best snapshot observed so
//! far, as the policy column specifies, so they are not represented here
//! as `Result` errors but documented for completeness in the functions
//! that implement that behaviour (`optimise::anneal_once`'s cancellation
//! check, for `Cancelled`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackingError {
    /// The packing fraction, or an intermediate geometric quantity derived
    /// from the current basis values, evaluated to NaN or infinity.
    #[error(
        "packing fraction is not finite (x_len={x_len}, y_len={y_len}, angle={angle}): {detail}"
    )]
    NumericError {
        x_len: f64,
        y_len: f64,
        angle: f64,
        detail: String,
    },

    /// Two shapes with different radial resolutions were compared.
    #[error("cannot compare shapes with different resolutions ({first} vs {second})")]
    ResolutionMismatch { first: usize, second: usize },

    /// Cooperative cancellation was observed by the Monte Carlo driver.
    ///
    /// Never constructed as a `Result::Err`: per spec.md §7's policy
    /// ("Return current best"), `optimise::anneal_once` instead returns
    /// `Ok` with the best snapshot observed before cancellation. The
    /// variant is kept so callers can match on it symmetrically with the
    /// other error kinds and so the error message is available to any
    /// future call site that does want to surface cancellation as fatal.
    #[error("optimisation cancelled")]
    Cancelled,
}
