// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Collaborators for exercising the formulation in unit tests.
use crate::exception::{check_dimension, create_precondition_exception, OcpResult};
use crate::model::{ContactMap, WholeBodyState};
use crate::ocp::constraint::Constraint;
use crate::ocp::dynamical_system::DynamicalSystem;
use nalgebra::{DVector, Vector3, Vector6};
use std::cell::Cell;
use std::rc::Rc;

pub const FOOT: &str = "foot";

/// Observes the rolling context of a collaborator which was moved into the formulation.
#[derive(Debug, Clone, Default)]
pub struct ContextProbe {
    buffered: Rc<Cell<bool>>,
    resets: Rc<Cell<usize>>,
}

impl ContextProbe {
    pub fn is_buffered(&self) -> bool {
        self.buffered.get()
    }
    pub fn resets(&self) -> usize {
        self.resets.get()
    }
    fn set(&self) {
        self.buffered.set(true);
    }
    fn reset(&self) {
        self.buffered.set(false);
        self.resets.set(self.resets.get() + 1);
    }
}

/// Joints integrated with explicit Euler steps.
///
/// A decision block is `[base_pos(6), q(n), dq(n), ddq(n)]`, the residual of a step is
/// `q - q_last - duration * dq`.
pub struct JointIntegrator {
    pub num_joints: usize,
    pub step_time: f64,
    pub fixed_step_integration: bool,
    pub decoded_duration: f64,
    pub full_trajectory: bool,
    pub soft: bool,
    pub residual_padding: usize,
    pub bound_padding: usize,
    pub terminal_padding: usize,
    pub initial: WholeBodyState,
    pub terminal: WholeBodyState,
    pub probe: ContextProbe,
    last_state: Option<WholeBodyState>,
}

impl JointIntegrator {
    pub fn new(num_joints: usize, step_time: f64) -> Self {
        JointIntegrator {
            num_joints,
            step_time,
            fixed_step_integration: true,
            decoded_duration: 0.,
            full_trajectory: false,
            soft: false,
            residual_padding: 0,
            bound_padding: 0,
            terminal_padding: 0,
            initial: WholeBodyState::new(num_joints),
            terminal: WholeBodyState::new(num_joints),
            probe: ContextProbe::default(),
            last_state: None,
        }
    }

    pub fn block_dimension(num_joints: usize) -> usize {
        6 + 3 * num_joints
    }

    /// Builds a decision block from its parts.
    pub fn block(base_pos: [f64; 6], q: &[f64], dq: &[f64], ddq: &[f64]) -> Vec<f64> {
        base_pos
            .iter()
            .chain(q.iter())
            .chain(dq.iter())
            .chain(ddq.iter())
            .copied()
            .collect()
    }
}

impl Constraint for JointIntegrator {
    fn name(&self) -> &str {
        "joint integrator"
    }

    fn constraint_dimension(&self) -> usize {
        self.num_joints
    }

    fn is_soft_constraint(&self) -> bool {
        self.soft
    }

    fn define_as_soft_constraint(&mut self) {
        self.soft = true;
    }

    fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
        let n = self.num_joints + self.bound_padding;
        (DVector::zeros(n), DVector::zeros(n))
    }

    fn compute(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
        let last = self
            .last_state
            .as_ref()
            .ok_or_else(|| create_precondition_exception("no last state"))?;
        let residual = &state.joint_pos - &last.joint_pos - &state.joint_vel * state.duration;
        Ok(residual.resize_vertically(self.num_joints + self.residual_padding, 0.))
    }

    fn compute_soft(&mut self, state: &WholeBodyState) -> OcpResult<f64> {
        Ok(self.compute(state)?.norm_squared())
    }

    fn set_last_state(&mut self, state: &WholeBodyState) {
        self.last_state = Some(state.clone());
        self.probe.set();
    }

    fn reset_state_buffer(&mut self) {
        self.last_state = None;
        self.probe.reset();
    }
}

impl DynamicalSystem for JointIntegrator {
    fn dimension_of_state(&self) -> usize {
        Self::block_dimension(self.num_joints)
    }

    fn terminal_constraint_dimension(&self) -> usize {
        self.num_joints
    }

    fn is_full_trajectory_optimization(&self) -> bool {
        self.full_trajectory
    }

    fn is_fixed_step_integration(&self) -> bool {
        self.fixed_step_integration
    }

    fn fixed_step_time(&self) -> f64 {
        self.step_time
    }

    fn initial_state(&self) -> &WholeBodyState {
        &self.initial
    }

    fn terminal_state(&self) -> &WholeBodyState {
        &self.terminal
    }

    fn state_bounds(&self) -> (WholeBodyState, WholeBodyState) {
        let mut lower = WholeBodyState::new(self.num_joints);
        let mut upper = WholeBodyState::new(self.num_joints);
        lower.base_pos = Vector6::from_element(-10.);
        upper.base_pos = Vector6::from_element(10.);
        lower.joint_pos = DVector::from_element(self.num_joints, -3.);
        upper.joint_pos = DVector::from_element(self.num_joints, 3.);
        lower.joint_vel = DVector::from_element(self.num_joints, -5.);
        upper.joint_vel = DVector::from_element(self.num_joints, 5.);
        lower.joint_acc = DVector::from_element(self.num_joints, -50.);
        upper.joint_acc = DVector::from_element(self.num_joints, 50.);
        (lower, upper)
    }

    fn terminal_bounds(&self) -> (DVector<f64>, DVector<f64>) {
        let n = self.num_joints + self.terminal_padding;
        (DVector::zeros(n), DVector::zeros(n))
    }

    fn to_whole_body_state(&self, decision_state: &[f64]) -> OcpResult<WholeBodyState> {
        let n = self.num_joints;
        check_dimension("joint integrator state", 6 + 3 * n, decision_state.len())?;
        let mut state = WholeBodyState::new(n);
        state.duration = self.decoded_duration;
        state.base_pos = Vector6::from_column_slice(&decision_state[..6]);
        state.joint_pos = DVector::from_column_slice(&decision_state[6..6 + n]);
        state.joint_vel = DVector::from_column_slice(&decision_state[6 + n..6 + 2 * n]);
        state.joint_acc = DVector::from_column_slice(&decision_state[6 + 2 * n..]);
        state.contact_pos.insert(FOOT.to_string(), DVector::zeros(3));
        state.contact_vel.insert(FOOT.to_string(), DVector::zeros(3));
        state.contact_acc.insert(FOOT.to_string(), DVector::zeros(3));
        Ok(state)
    }

    fn from_whole_body_state(&self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
        check_dimension("joint positions", self.num_joints, state.joint_pos.len())?;
        check_dimension("joint velocities", self.num_joints, state.joint_vel.len())?;
        check_dimension("joint accelerations", self.num_joints, state.joint_acc.len())?;
        let mut base_pos = [0.; 6];
        base_pos.copy_from_slice(state.base_pos.as_slice());
        Ok(DVector::from_vec(Self::block(
            base_pos,
            state.joint_pos.as_slice(),
            state.joint_vel.as_slice(),
            state.joint_acc.as_slice(),
        )))
    }

    fn compute_terminal_constraint(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
        let residual = &state.joint_pos - &self.terminal.joint_pos;
        Ok(residual.resize_vertically(self.num_joints + self.terminal_padding, 0.))
    }

    fn joint_dof(&self) -> usize {
        self.num_joints
    }

    fn end_effector_names(&self) -> Vec<String> {
        vec![FOOT.to_string()]
    }

    fn compute_forward_kinematics(
        &self,
        base_pos: &Vector6<f64>,
        joint_pos: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap {
        let foot = Vector3::new(base_pos[3] + joint_pos[0], base_pos[4], base_pos[5] - 1.);
        contact_map(bodies, foot)
    }

    fn compute_velocity(
        &self,
        _base_pos: &Vector6<f64>,
        _joint_pos: &DVector<f64>,
        base_vel: &Vector6<f64>,
        joint_vel: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap {
        let foot = Vector3::new(base_vel[3] + joint_vel[0], base_vel[4], base_vel[5]);
        contact_map(bodies, foot)
    }

    fn compute_acceleration(
        &self,
        _base_pos: &Vector6<f64>,
        _joint_pos: &DVector<f64>,
        _base_vel: &Vector6<f64>,
        _joint_vel: &DVector<f64>,
        base_acc: &Vector6<f64>,
        joint_acc: &DVector<f64>,
        bodies: &[String],
    ) -> ContactMap {
        let foot = Vector3::new(base_acc[3] + joint_acc[0], base_acc[4], base_acc[5]);
        contact_map(bodies, foot)
    }
}

fn contact_map(bodies: &[String], foot: Vector3<f64>) -> ContactMap {
    bodies
        .iter()
        .filter(|name| name.as_str() == FOOT)
        .map(|name| (name.clone(), DVector::from_column_slice(foot.as_slice())))
        .collect()
}

/// Bounds the change of the joint velocities between two steps.
pub struct VelocityChangeLimit {
    pub name: String,
    pub num_joints: usize,
    pub limit: f64,
    pub soft: bool,
    pub fail_after: Option<usize>,
    pub probe: ContextProbe,
    computations: usize,
    last_state: Option<WholeBodyState>,
}

impl VelocityChangeLimit {
    pub fn new(name: &str, num_joints: usize, limit: f64) -> Self {
        VelocityChangeLimit {
            name: name.to_string(),
            num_joints,
            limit,
            soft: false,
            fail_after: None,
            probe: ContextProbe::default(),
            computations: 0,
            last_state: None,
        }
    }
}

impl Constraint for VelocityChangeLimit {
    fn name(&self) -> &str {
        &self.name
    }

    fn constraint_dimension(&self) -> usize {
        self.num_joints
    }

    fn is_soft_constraint(&self) -> bool {
        self.soft
    }

    fn define_as_soft_constraint(&mut self) {
        self.soft = true;
    }

    fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_element(self.num_joints, -self.limit),
            DVector::from_element(self.num_joints, self.limit),
        )
    }

    fn compute(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
        self.computations += 1;
        if let Some(limit) = self.fail_after {
            if self.computations > limit {
                return Err(create_precondition_exception("velocity change limit failed"));
            }
        }
        let last = self
            .last_state
            .as_ref()
            .ok_or_else(|| create_precondition_exception("no last state"))?;
        Ok(&state.joint_vel - &last.joint_vel)
    }

    fn set_last_state(&mut self, state: &WholeBodyState) {
        self.last_state = Some(state.clone());
        self.probe.set();
    }

    fn reset_state_buffer(&mut self) {
        self.last_state = None;
        self.probe.reset();
    }
}
