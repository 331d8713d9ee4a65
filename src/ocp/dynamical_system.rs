// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the DynamicalSystem trait.
use crate::exception::OcpResult;
use crate::model::{ContactMap, WholeBodyState};
use crate::ocp::constraint::Constraint;
use nalgebra::{DVector, Vector6};

/// Describes how the robot moves from one step to the next.
///
/// A dynamical system is the constraint which couples consecutive steps; it follows the
/// rolling context protocol of [`Constraint`]. On top of that it owns
/// * the codec between one block of the decision vector and a [`WholeBodyState`]
///   ([`to_whole_body_state`](`Self::to_whole_body_state`) and
///   [`from_whole_body_state`](`Self::from_whole_body_state`) have to round-trip),
/// * the boundary conditions of the motion,
/// * the integration policy and
/// * the kinematics used to complete the contact quantities of a solution.
pub trait DynamicalSystem: Constraint {
    /// Length of one block of the decision vector.
    fn dimension_of_state(&self) -> usize;

    /// Length of the residual of
    /// [`compute_terminal_constraint`](`Self::compute_terminal_constraint`).
    fn terminal_constraint_dimension(&self) -> usize {
        0
    }

    /// True if the terminal state has to be reached at the end of the horizon.
    fn is_full_trajectory_optimization(&self) -> bool {
        false
    }

    /// True if every step lasts [`fixed_step_time`](`Self::fixed_step_time`) instead of
    /// a duration which is part of the decision variables.
    fn is_fixed_step_integration(&self) -> bool;

    fn fixed_step_time(&self) -> f64;

    fn initial_state(&self) -> &WholeBodyState;

    fn terminal_state(&self) -> &WholeBodyState;

    /// Lower and upper bound of one decision block, expressed as states.
    fn state_bounds(&self) -> (WholeBodyState, WholeBodyState);

    /// Lower and upper bound of the terminal residual.
    fn terminal_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        (DVector::zeros(0), DVector::zeros(0))
    }

    /// Decodes one block of the decision vector.
    fn to_whole_body_state(&self, decision_state: &[f64]) -> OcpResult<WholeBodyState>;

    /// Encodes a state into one block of the decision vector.
    fn from_whole_body_state(&self, state: &WholeBodyState) -> OcpResult<DVector<f64>>;

    /// Computes the terminal residual for the state of the last step.
    fn compute_terminal_constraint(&mut self, _state: &WholeBodyState) -> OcpResult<DVector<f64>> {
        Ok(DVector::zeros(0))
    }

    fn joint_dof(&self) -> usize;

    fn end_effector_names(&self) -> Vec<String>;

    /// Positions of the given end effectors.
    fn compute_forward_kinematics(
        &self,
        base_pos: &Vector6<f64>,
        joint_pos: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap;

    /// Velocities of the given end effectors.
    fn compute_velocity(
        &self,
        base_pos: &Vector6<f64>,
        joint_pos: &DVector<f64>,
        base_vel: &Vector6<f64>,
        joint_vel: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap;

    /// Accelerations of the given end effectors.
    #[allow(clippy::too_many_arguments)]
    fn compute_acceleration(
        &self,
        base_pos: &Vector6<f64>,
        joint_pos: &DVector<f64>,
        base_vel: &Vector6<f64>,
        joint_vel: &DVector<f64>,
        base_acc: &Vector6<f64>,
        joint_acc: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap;
}
