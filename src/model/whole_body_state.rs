// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the WholeBodyState and WholeBodyTrajectory types.
use nalgebra::{DVector, Vector6};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps the name of a contact (end effector) to a vector quantity.
pub type ContactMap = BTreeMap<String, DVector<f64>>;

/// Maps the name of a contact (end effector) to a wrench (torque, force).
pub type ContactWrenchMap = BTreeMap<String, Vector6<f64>>;

/// Describes the state of a floating-base articulated robot at one instant.
///
/// The base quantities are ordered as (angular x, y, z, linear x, y, z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholeBodyState {
    /// Absolute time. Unit: \[s\]
    pub time: f64,
    /// Length of the step that ends at this state. Unit: \[s\]
    pub duration: f64,
    /// Base pose.
    pub base_pos: Vector6<f64>,
    /// Base velocity.
    pub base_vel: Vector6<f64>,
    /// Base acceleration.
    pub base_acc: Vector6<f64>,
    /// Base wrench.
    pub base_eff: Vector6<f64>,
    /// Joint position. Unit: \[rad\]
    pub joint_pos: DVector<f64>,
    /// Joint velocity. Unit: \[rad/s\]
    pub joint_vel: DVector<f64>,
    /// Joint acceleration. Unit: \[rad/s^2\]
    pub joint_acc: DVector<f64>,
    /// Joint effort. Unit: \[Nm\]
    pub joint_eff: DVector<f64>,
    /// Contact positions, keyed by end-effector name.
    pub contact_pos: ContactMap,
    /// Contact velocities, keyed by end-effector name.
    pub contact_vel: ContactMap,
    /// Contact accelerations, keyed by end-effector name.
    pub contact_acc: ContactMap,
    /// Contact wrenches, keyed by end-effector name.
    pub contact_eff: ContactWrenchMap,
}

impl WholeBodyState {
    /// Creates a state at rest with `num_joints` joints and no contacts.
    pub fn new(num_joints: usize) -> Self {
        WholeBodyState {
            time: 0.,
            duration: 0.,
            base_pos: Vector6::zeros(),
            base_vel: Vector6::zeros(),
            base_acc: Vector6::zeros(),
            base_eff: Vector6::zeros(),
            joint_pos: DVector::zeros(num_joints),
            joint_vel: DVector::zeros(num_joints),
            joint_acc: DVector::zeros(num_joints),
            joint_eff: DVector::zeros(num_joints),
            contact_pos: ContactMap::new(),
            contact_vel: ContactMap::new(),
            contact_acc: ContactMap::new(),
            contact_eff: ContactWrenchMap::new(),
        }
    }

    /// Number of joints described by this state.
    pub fn joint_dof(&self) -> usize {
        self.joint_pos.len()
    }
}

impl Default for WholeBodyState {
    fn default() -> Self {
        WholeBodyState::new(0)
    }
}

/// Sequence of whole-body states. Index 0 is the initial condition, index k the state
/// after k discrete steps.
pub type WholeBodyTrajectory = Vec<WholeBodyState>;
