// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the transcription of a locomotion problem into an [`OptimizationModel`](`crate::model::OptimizationModel`).
pub mod constraint;
pub mod cost;
pub mod dynamical_system;
pub mod optimal_control;
#[cfg(test)]
pub(crate) mod testing;

pub use constraint::Constraint;
pub use cost::{Cost, IntegralControlEnergyCost};
pub use dynamical_system::DynamicalSystem;
pub use optimal_control::OptimalControl;
