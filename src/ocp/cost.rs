// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the Cost trait and the integral control energy cost.
use crate::exception::{check_dimension, OcpResult};
use crate::model::WholeBodyState;
use nalgebra::DVector;

/// A running cost which is evaluated at every step of the horizon.
#[cfg_attr(test, mockall::automock)]
pub trait Cost {
    fn name(&self) -> &str;

    /// Computes the cost of `state`.
    fn compute(&self, state: &WholeBodyState) -> OcpResult<f64>;
}

/// Penalizes the joint efforts integrated over the step:
/// `duration * tau^T diag(w) tau`.
#[derive(Debug, Clone)]
pub struct IntegralControlEnergyCost {
    joint_effort_weights: DVector<f64>,
}

impl IntegralControlEnergyCost {
    pub const NAME: &'static str = "integral control energy";

    /// Creates a new cost with one weight per joint.
    pub fn new(joint_effort_weights: DVector<f64>) -> Self {
        IntegralControlEnergyCost {
            joint_effort_weights,
        }
    }

    pub fn set_weights(&mut self, joint_effort_weights: DVector<f64>) {
        self.joint_effort_weights = joint_effort_weights;
    }

    pub fn weights(&self) -> &DVector<f64> {
        &self.joint_effort_weights
    }
}

impl Cost for IntegralControlEnergyCost {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// # Errors
    /// * [`InconsistentDimension`](`crate::exception::OcpException::InconsistentDimension`)
    /// if the number of weights and joint efforts differ.
    fn compute(&self, state: &WholeBodyState) -> OcpResult<f64> {
        check_dimension(
            Self::NAME,
            self.joint_effort_weights.len(),
            state.joint_eff.len(),
        )?;
        let energy = state
            .joint_eff
            .iter()
            .zip(self.joint_effort_weights.iter())
            .map(|(tau, w)| w * tau * tau)
            .sum::<f64>();
        Ok(state.duration * energy)
    }
}
