//! Equilibrium models.
//!
//! Each submodule pairs a set of correlations with the orchestration needed to
//! answer property queries against them.

pub mod sorption;
