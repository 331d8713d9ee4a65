// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the OptimalControl formulation.
use crate::exception::{
    check_dimension, create_dimension_exception, create_precondition_exception, OcpResult,
};
use crate::model::{
    ContactMap, ModelData, OptimizationModel, WholeBodyState, WholeBodyTrajectory,
};
use crate::ocp::constraint::Constraint;
use crate::ocp::cost::Cost;
use crate::ocp::dynamical_system::DynamicalSystem;
use crate::utils::{is_zero, CubicSpline, SplinePoint};
use nalgebra::DVector;
use tracing::{debug, info, warn};

/// Transcribes a locomotion problem over a fixed horizon into one nonlinear program.
///
/// The decision vector stacks one block of
/// [`dimension_of_state`](`DynamicalSystem::dimension_of_state`) values per step; block `k`
/// decodes to the state after step `k + 1`. The initial state of the dynamical system is
/// the fixed state of step 0 and is not a decision variable.
///
/// The constraint vector holds, for every step, the residual of the dynamical system
/// followed by the residuals of the constraints in registration order. Soft contributors
/// are left out and added to the cost instead. For full-trajectory optimization the
/// terminal residual is appended after the last step.
///
/// # Example
/// ```no_run
/// use nalgebra::DVector;
/// use ocp::{DynamicalSystem, IntegralControlEnergyCost, OcpResult, OptimalControl, OptimizationModel};
///
/// fn plan(dynamics: Box<dyn DynamicalSystem>) -> OcpResult<()> {
///     let joint_dof = dynamics.joint_dof();
///     let mut formulation = OptimalControl::with_horizon(20);
///     formulation.add_dynamical_system(dynamics);
///     formulation.add_cost(Box::new(IntegralControlEnergyCost::new(DVector::from_element(
///         joint_dof, 1e-3,
///     ))));
///     formulation.init(false)?;
///
///     let mut x = vec![0.; formulation.dimension_of_state()];
///     formulation.get_starting_point(&mut x)?;
///     // ... hand `formulation` to a solver which iterates on `x` ...
///     let trajectory = formulation.evaluate_solution(&x)?;
///     println!("reached {:?}", trajectory.last().map(|state| &state.base_pos));
///     Ok(())
/// }
/// ```
pub struct OptimalControl {
    data: ModelData,
    dynamical_system: Option<Box<dyn DynamicalSystem>>,
    constraints: Vec<Box<dyn Constraint>>,
    costs: Vec<Box<dyn Cost>>,
    motion_solution: WholeBodyTrajectory,
    horizon: usize,
    state_dimension: usize,
    constraint_dimension: usize,
    terminal_constraint_dimension: usize,
    full_trajectory: bool,
    initialized: bool,
}

impl Default for OptimalControl {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimalControl {
    /// Creates an empty formulation with a horizon of one step.
    pub fn new() -> Self {
        OptimalControl {
            data: ModelData::default(),
            dynamical_system: None,
            constraints: Vec::new(),
            costs: Vec::new(),
            motion_solution: WholeBodyTrajectory::new(),
            horizon: 1,
            state_dimension: 0,
            constraint_dimension: 0,
            terminal_constraint_dimension: 0,
            full_trajectory: false,
            initialized: false,
        }
    }

    /// Creates an empty formulation with the given horizon.
    pub fn with_horizon(horizon: usize) -> Self {
        let mut formulation = Self::new();
        formulation.set_horizon(horizon);
        formulation
    }

    /// Registers the dynamical system. Only one can be registered, further ones are dropped.
    ///
    /// The formulation has to be initialized again afterwards.
    pub fn add_dynamical_system(&mut self, dynamical_system: Box<dyn DynamicalSystem>) {
        if self.dynamical_system.is_some() {
            warn!(
                "could not add the {} dynamical system, there is already one",
                dynamical_system.name()
            );
            return;
        }
        info!("adding the {} dynamical system", dynamical_system.name());
        self.dynamical_system = Some(dynamical_system);
        self.initialized = false;
    }

    /// Unregisters the dynamical system and hands it back.
    pub fn remove_dynamical_system(&mut self) -> Option<Box<dyn DynamicalSystem>> {
        let removed = self.dynamical_system.take();
        self.initialized = false;
        match &removed {
            Some(dynamical_system) => {
                info!("removing the {} dynamical system", dynamical_system.name())
            }
            None => warn!("there was not added a dynamical system"),
        }
        removed
    }

    /// Appends a path constraint. Constraints are evaluated in registration order.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) {
        info!("adding the {} constraint", constraint.name());
        self.constraints.push(constraint);
    }

    /// Drops the first constraint called `name`.
    ///
    /// # Return
    /// true if a constraint was removed.
    pub fn remove_constraint(&mut self, name: &str) -> bool {
        match self.constraints.iter().position(|c| c.name() == name) {
            Some(index) => {
                info!("removing the {} constraint", name);
                self.constraints.remove(index);
                true
            }
            None => {
                warn!("could not remove the {} constraint, it was not added", name);
                false
            }
        }
    }

    /// Appends a running cost.
    pub fn add_cost(&mut self, cost: Box<dyn Cost>) {
        info!("adding the {} cost", cost.name());
        self.costs.push(cost);
    }

    /// Drops the first cost called `name`.
    ///
    /// # Return
    /// true if a cost was removed.
    pub fn remove_cost(&mut self, name: &str) -> bool {
        match self.costs.iter().position(|c| c.name() == name) {
            Some(index) => {
                info!("removing the {} cost", name);
                self.costs.remove(index);
                true
            }
            None => {
                warn!("could not remove the {} cost, it was not added", name);
                false
            }
        }
    }

    /// Sets the number of steps. A horizon of zero is treated as one.
    pub fn set_horizon(&mut self, horizon: usize) {
        self.horizon = horizon.max(1);
    }

    /// Uses `trajectory` for the next [`get_starting_point`](`OptimizationModel::get_starting_point`).
    ///
    /// The first [`horizon`](`Self::horizon`) states are encoded, so the trajectory has to
    /// be at least that long.
    pub fn set_starting_trajectory(&mut self, trajectory: WholeBodyTrajectory) {
        self.motion_solution = trajectory;
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn dynamical_system(&self) -> Option<&dyn DynamicalSystem> {
        self.dynamical_system.as_deref()
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    pub fn costs(&self) -> &[Box<dyn Cost>] {
        &self.costs
    }

    /// Length of one decision block, known after [`init`](`OptimizationModel::init`).
    pub fn state_dimension(&self) -> usize {
        self.state_dimension
    }

    /// Length of the constraint block of one step, known after
    /// [`init`](`OptimizationModel::init`).
    pub fn constraint_dimension(&self) -> usize {
        self.constraint_dimension
    }

    pub fn terminal_constraint_dimension(&self) -> usize {
        self.terminal_constraint_dimension
    }

    /// Trajectory of the last [`evaluate_solution`](`Self::evaluate_solution`) or the one
    /// set by [`set_starting_trajectory`](`Self::set_starting_trajectory`).
    pub fn solution(&self) -> &WholeBodyTrajectory {
        &self.motion_solution
    }

    /// Reconstructs the trajectory encoded by `solution` and caches it as warm start.
    ///
    /// Accelerations which decode to zero are estimated by finite differences of the
    /// velocities and contact quantities which decode to zero are completed with the
    /// kinematics of the dynamical system.
    /// # Errors
    /// * [`PreconditionViolated`](`crate::exception::OcpException::PreconditionViolated`)
    /// if there is no dynamical system or the formulation was not initialized.
    /// * [`InconsistentDimension`](`crate::exception::OcpException::InconsistentDimension`)
    /// if `solution` is not as long as the decision vector.
    pub fn evaluate_solution(&mut self, solution: &[f64]) -> OcpResult<&WholeBodyTrajectory> {
        self.check_decision(solution)?;
        let dynamical_system = self.system()?;
        let contact_names = dynamical_system.end_effector_names();

        let initial_state = dynamical_system.initial_state().clone();
        let mut time = initial_state.time;
        let mut trajectory = WholeBodyTrajectory::with_capacity(self.horizon + 1);
        trajectory.push(initial_state);
        for k in 0..self.horizon {
            let mut state =
                decode_step(dynamical_system, solution, k, self.state_dimension, &mut time)?;

            let last_state = &trajectory[k];
            if is_zero(state.base_acc.as_slice()) && is_zero(state.joint_acc.as_slice()) {
                check_dimension(
                    "joint velocity",
                    last_state.joint_vel.len(),
                    state.joint_vel.len(),
                )?;
                state.base_acc = (state.base_vel - last_state.base_vel) / state.duration;
                state.joint_acc = (&state.joint_vel - &last_state.joint_vel) / state.duration;
            }
            complete_contacts(dynamical_system, &mut state, &contact_names);

            debug!(
                step = k + 1,
                time = state.time,
                duration = state.duration,
                "base_pos = {:?}, joint_pos = {:?}, joint_vel = {:?}, joint_acc = {:?}, joint_eff = {:?}",
                state.base_pos.as_slice(),
                state.joint_pos.as_slice(),
                state.joint_vel.as_slice(),
                state.joint_acc.as_slice(),
                state.joint_eff.as_slice()
            );
            trajectory.push(state);
        }
        self.motion_solution = trajectory;
        Ok(&self.motion_solution)
    }

    fn system(&self) -> OcpResult<&dyn DynamicalSystem> {
        self.dynamical_system
            .as_deref()
            .ok_or_else(|| create_precondition_exception("there is not added a dynamical system"))
    }

    fn check_ready(&self) -> OcpResult<()> {
        self.system()?;
        if !self.initialized {
            return Err(create_precondition_exception(
                "the optimal control formulation was not initialized",
            ));
        }
        Ok(())
    }

    fn check_decision(&self, decision: &[f64]) -> OcpResult<()> {
        self.check_ready()?;
        check_dimension(
            "decision vector",
            self.horizon * self.state_dimension,
            decision.len(),
        )
    }

    /// Seeds the rolling context of every contributor with the initial state.
    fn set_initial_context(&mut self) -> OcpResult<()> {
        let dynamical_system = self
            .dynamical_system
            .as_deref_mut()
            .ok_or_else(|| create_precondition_exception("there is not added a dynamical system"))?;
        let initial_state = dynamical_system.initial_state().clone();
        dynamical_system.set_last_state(&initial_state);
        for constraint in self.constraints.iter_mut() {
            constraint.set_last_state(&initial_state);
        }
        Ok(())
    }

    fn reset_context(&mut self) {
        if let Some(dynamical_system) = self.dynamical_system.as_deref_mut() {
            dynamical_system.reset_state_buffer();
        }
        for constraint in self.constraints.iter_mut() {
            constraint.reset_state_buffer();
        }
    }

    fn constraint_pass(&mut self, constraint: &mut [f64], decision: &[f64]) -> OcpResult<()> {
        let dynamical_system = self
            .dynamical_system
            .as_deref_mut()
            .ok_or_else(|| create_precondition_exception("there is not added a dynamical system"))?;
        let mut time = dynamical_system.initial_state().time;
        let mut index = 0;
        for k in 0..self.horizon {
            let state = decode_step(
                dynamical_system,
                decision,
                k,
                self.state_dimension,
                &mut time,
            )?;

            if !dynamical_system.is_soft_constraint() {
                index = write_residual(dynamical_system, &state, constraint, index)?;
            }
            for path_constraint in self.constraints.iter_mut() {
                if !path_constraint.is_soft_constraint() {
                    index = write_residual(path_constraint.as_mut(), &state, constraint, index)?;
                }
            }

            if self.full_trajectory && k == self.horizon - 1 {
                let residual = dynamical_system.compute_terminal_constraint(&state)?;
                check_dimension(
                    "terminal constraint",
                    self.terminal_constraint_dimension,
                    residual.len(),
                )?;
                index = write_block(constraint, index, &residual)?;
            }
        }
        check_dimension("constraint vector", constraint.len(), index)
    }

    fn cost_pass(&mut self, decision: &[f64]) -> OcpResult<f64> {
        let dynamical_system = self
            .dynamical_system
            .as_deref_mut()
            .ok_or_else(|| create_precondition_exception("there is not added a dynamical system"))?;
        let mut time = dynamical_system.initial_state().time;
        let mut cost = 0.;
        for k in 0..self.horizon {
            let state = decode_step(
                dynamical_system,
                decision,
                k,
                self.state_dimension,
                &mut time,
            )?;

            for running_cost in self.costs.iter() {
                cost += running_cost.compute(&state)?;
            }

            if dynamical_system.is_soft_constraint() {
                cost += dynamical_system.compute_soft(&state)?;
                dynamical_system.set_last_state(&state);
            }
            for path_constraint in self.constraints.iter_mut() {
                if path_constraint.is_soft_constraint() {
                    cost += path_constraint.compute_soft(&state)?;
                    path_constraint.set_last_state(&state);
                }
            }
        }
        Ok(cost)
    }
}

impl OptimizationModel for OptimalControl {
    fn get_model_data(&self) -> &ModelData {
        &self.data
    }

    fn get_model_data_mut(&mut self) -> &mut ModelData {
        &mut self.data
    }

    /// Reads the dimensions of the problem from the registered contributors.
    ///
    /// With `only_soft_constraints` the dynamical system and every constraint are turned
    /// into soft constraints, which leaves the program without constraint vector.
    /// # Errors
    /// * [`PreconditionViolated`](`crate::exception::OcpException::PreconditionViolated`)
    /// if there is no dynamical system.
    fn init(&mut self, only_soft_constraints: bool) -> OcpResult<()> {
        let dynamical_system = self
            .dynamical_system
            .as_deref_mut()
            .ok_or_else(|| create_precondition_exception("there is not added a dynamical system"))?;
        self.state_dimension = dynamical_system.dimension_of_state();
        self.constraint_dimension = 0;
        self.terminal_constraint_dimension = 0;
        self.full_trajectory = false;
        if !only_soft_constraints {
            if !dynamical_system.is_soft_constraint() {
                self.constraint_dimension += dynamical_system.constraint_dimension();
            }
            self.constraint_dimension += self
                .constraints
                .iter()
                .filter(|c| !c.is_soft_constraint())
                .map(|c| c.constraint_dimension())
                .sum::<usize>();
            if dynamical_system.is_full_trajectory_optimization() {
                self.full_trajectory = true;
                self.terminal_constraint_dimension =
                    dynamical_system.terminal_constraint_dimension();
            }
        } else {
            dynamical_system.define_as_soft_constraint();
            for constraint in self.constraints.iter_mut() {
                constraint.define_as_soft_constraint();
            }
        }
        self.initialized = true;
        info!(
            horizon = self.horizon,
            state_dimension = self.state_dimension,
            constraint_dimension = self.constraint_dimension,
            terminal_constraint_dimension = self.terminal_constraint_dimension,
            "initialized the optimal control formulation"
        );
        Ok(())
    }

    /// Writes the warm start.
    ///
    /// Without a cached trajectory the base pose and the joint positions are interpolated
    /// with cubic splines from the initial to the terminal state of the dynamical system,
    /// sampled at `k / horizon` for every step `k`. Otherwise the cached trajectory is
    /// encoded.
    fn get_starting_point(&mut self, decision: &mut [f64]) -> OcpResult<()> {
        self.check_ready()?;
        let dynamical_system = self.system()?;
        let state_dimension = self.state_dimension;
        check_dimension(
            "starting point",
            self.horizon * state_dimension,
            decision.len(),
        )?;

        if self.motion_solution.is_empty() {
            let starting_state = dynamical_system.initial_state();
            let ending_state = dynamical_system.terminal_state();
            let num_joints = dynamical_system.joint_dof();
            check_dimension("initial joint position", num_joints, starting_state.joint_pos.len())?;
            check_dimension("terminal joint position", num_joints, ending_state.joint_pos.len())?;

            let spline = |start: f64, end: f64| {
                CubicSpline::new(0., 1., &SplinePoint::new(start), &SplinePoint::new(end))
            };
            let base_splines = (0..6)
                .map(|i| spline(starting_state.base_pos[i], ending_state.base_pos[i]))
                .collect::<OcpResult<Vec<_>>>()?;
            let joint_splines = (0..num_joints)
                .map(|i| spline(starting_state.joint_pos[i], ending_state.joint_pos[i]))
                .collect::<OcpResult<Vec<_>>>()?;

            let mut current_state = starting_state.clone();
            current_state.duration = 1. / self.horizon as f64;
            for k in 0..self.horizon {
                current_state.time = k as f64 * current_state.duration;
                for (i, base_spline) in base_splines.iter().enumerate() {
                    current_state.base_pos[i] = base_spline.point(current_state.time)?.x;
                }
                for (i, joint_spline) in joint_splines.iter().enumerate() {
                    current_state.joint_pos[i] = joint_spline.point(current_state.time)?.x;
                }
                let block = dynamical_system.from_whole_body_state(&current_state)?;
                write_decision_block(decision, k, state_dimension, &block)?;
            }
        } else {
            if self.motion_solution.len() < self.horizon {
                return Err(create_dimension_exception(
                    "starting trajectory",
                    self.horizon,
                    self.motion_solution.len(),
                ));
            }
            for (k, state) in self.motion_solution.iter().take(self.horizon).enumerate() {
                let block = dynamical_system.from_whole_body_state(state)?;
                write_decision_block(decision, k, state_dimension, &block)?;
            }
        }
        Ok(())
    }

    /// Writes the state bounds of the dynamical system for every block and the bounds of
    /// every hard contributor for every step, followed by the terminal bounds.
    fn evaluate_bounds(
        &mut self,
        decision_lbound: &mut [f64],
        decision_ubound: &mut [f64],
        constraint_lbound: &mut [f64],
        constraint_ubound: &mut [f64],
    ) -> OcpResult<()> {
        self.check_ready()?;
        let dynamical_system = self.system()?;
        let decision_dimension = self.dimension_of_state();
        let constraint_dimension = self.dimension_of_constraints();
        check_dimension("decision lower bound", decision_dimension, decision_lbound.len())?;
        check_dimension("decision upper bound", decision_dimension, decision_ubound.len())?;
        check_dimension("constraint lower bound", constraint_dimension, constraint_lbound.len())?;
        check_dimension("constraint upper bound", constraint_dimension, constraint_ubound.len())?;

        let (lower_state, upper_state) = dynamical_system.state_bounds();
        let state_lower_bound = dynamical_system.from_whole_body_state(&lower_state)?;
        let state_upper_bound = dynamical_system.from_whole_body_state(&upper_state)?;
        for k in 0..self.horizon {
            write_decision_block(decision_lbound, k, self.state_dimension, &state_lower_bound)?;
            write_decision_block(decision_ubound, k, self.state_dimension, &state_upper_bound)?;
        }

        if self.constraint_dimension != 0 {
            let mut lower_bound = Vec::with_capacity(self.constraint_dimension);
            let mut upper_bound = Vec::with_capacity(self.constraint_dimension);
            if !dynamical_system.is_soft_constraint() {
                append_bounds(dynamical_system, &mut lower_bound, &mut upper_bound)?;
            }
            for constraint in self.constraints.iter() {
                if !constraint.is_soft_constraint() {
                    append_bounds(constraint.as_ref(), &mut lower_bound, &mut upper_bound)?;
                }
            }
            check_dimension(
                "constraint bounds of one step",
                self.constraint_dimension,
                lower_bound.len(),
            )?;
            let step_bounds = constraint_lbound
                .chunks_exact_mut(self.constraint_dimension)
                .zip(constraint_ubound.chunks_exact_mut(self.constraint_dimension))
                .take(self.horizon);
            for (lower, upper) in step_bounds {
                lower.copy_from_slice(&lower_bound);
                upper.copy_from_slice(&upper_bound);
            }
        }

        if self.full_trajectory {
            let (lower, upper) = dynamical_system.terminal_bounds();
            check_dimension(
                "terminal constraint lower bound",
                self.terminal_constraint_dimension,
                lower.len(),
            )?;
            check_dimension(
                "terminal constraint upper bound",
                self.terminal_constraint_dimension,
                upper.len(),
            )?;
            let offset = self.horizon * self.constraint_dimension;
            constraint_lbound[offset..].copy_from_slice(lower.as_slice());
            constraint_ubound[offset..].copy_from_slice(upper.as_slice());
        }
        Ok(())
    }

    /// Sums the running costs and the penalties of the soft contributors over the horizon.
    fn evaluate_costs(&mut self, decision: &[f64]) -> OcpResult<f64> {
        self.check_decision(decision)?;
        self.set_initial_context()?;
        let cost = self.cost_pass(decision);
        self.reset_context();
        cost
    }

    /// Stacks the residuals of the hard contributors over the horizon.
    fn evaluate_constraints(&mut self, constraint: &mut [f64], decision: &[f64]) -> OcpResult<()> {
        self.check_decision(decision)?;
        check_dimension(
            "constraint vector",
            self.dimension_of_constraints(),
            constraint.len(),
        )?;
        constraint.iter_mut().for_each(|g| *g = 0.);
        self.set_initial_context()?;
        let result = self.constraint_pass(constraint, decision);
        self.reset_context();
        result
    }

    /// Length of the whole decision vector, `horizon` blocks.
    fn dimension_of_state(&self) -> usize {
        self.horizon * self.state_dimension
    }

    /// Length of the whole constraint vector, `horizon` step blocks and the terminal block.
    fn dimension_of_constraints(&self) -> usize {
        self.horizon * self.constraint_dimension + self.terminal_constraint_dimension
    }
}

/// Decodes block `k` of `decision` and advances the absolute `time` by its duration.
fn decode_step(
    dynamical_system: &dyn DynamicalSystem,
    decision: &[f64],
    k: usize,
    state_dimension: usize,
    time: &mut f64,
) -> OcpResult<WholeBodyState> {
    let block = decision
        .get(k * state_dimension..(k + 1) * state_dimension)
        .ok_or_else(|| {
            create_dimension_exception(
                "decision vector",
                (k + 1) * state_dimension,
                decision.len(),
            )
        })?;
    let mut state = dynamical_system.to_whole_body_state(block)?;
    if dynamical_system.is_fixed_step_integration() {
        state.duration = dynamical_system.fixed_step_time();
    }
    *time += state.duration;
    state.time = *time;
    Ok(state)
}

/// Computes the residual of a hard contributor, writes it at `index` and moves its rolling
/// context forward. Returns the index after the written block.
fn write_residual<C: Constraint + ?Sized>(
    contributor: &mut C,
    state: &WholeBodyState,
    constraint: &mut [f64],
    index: usize,
) -> OcpResult<usize> {
    let residual = contributor.compute(state)?;
    check_dimension(
        contributor.name(),
        contributor.constraint_dimension(),
        residual.len(),
    )?;
    let end = write_block(constraint, index, &residual)?;
    contributor.set_last_state(state);
    Ok(end)
}

fn write_block(target: &mut [f64], index: usize, block: &DVector<f64>) -> OcpResult<usize> {
    let end = index + block.len();
    let target_len = target.len();
    target
        .get_mut(index..end)
        .ok_or_else(|| create_dimension_exception("constraint vector", target_len, end))?
        .copy_from_slice(block.as_slice());
    Ok(end)
}

fn write_decision_block(
    target: &mut [f64],
    k: usize,
    state_dimension: usize,
    block: &DVector<f64>,
) -> OcpResult<()> {
    check_dimension("encoded state", state_dimension, block.len())?;
    let start = k * state_dimension;
    let target_len = target.len();
    target
        .get_mut(start..start + state_dimension)
        .ok_or_else(|| {
            create_dimension_exception("decision vector", start + state_dimension, target_len)
        })?
        .copy_from_slice(block.as_slice());
    Ok(())
}

fn append_bounds<C: Constraint + ?Sized>(
    contributor: &C,
    lower_bound: &mut Vec<f64>,
    upper_bound: &mut Vec<f64>,
) -> OcpResult<()> {
    let (lower, upper) = contributor.bounds();
    let name = contributor.name();
    check_dimension(name, contributor.constraint_dimension(), lower.len())?;
    check_dimension(name, contributor.constraint_dimension(), upper.len())?;
    lower_bound.extend(lower.iter());
    upper_bound.extend(upper.iter());
    Ok(())
}

fn has_zero_entry(contacts: &ContactMap, names: &[String]) -> bool {
    names
        .iter()
        .any(|name| contacts.get(name).map_or(false, |v| is_zero(v.as_slice())))
}

/// Replaces the zero entries of `contacts` by the `computed` ones.
fn fill_zero_entries(contacts: &mut ContactMap, computed: &ContactMap, names: &[String]) {
    for name in names {
        if let (Some(value), Some(computed_value)) = (contacts.get_mut(name), computed.get(name)) {
            if is_zero(value.as_slice()) {
                *value = computed_value.clone();
            }
        }
    }
}

/// Completes contact positions, velocities and accelerations which decoded to zero.
fn complete_contacts(
    dynamical_system: &dyn DynamicalSystem,
    state: &mut WholeBodyState,
    names: &[String],
) {
    if has_zero_entry(&state.contact_pos, names) {
        let computed =
            dynamical_system.compute_forward_kinematics(&state.base_pos, &state.joint_pos, names);
        fill_zero_entries(&mut state.contact_pos, &computed, names);
    }
    if has_zero_entry(&state.contact_vel, names) {
        let computed = dynamical_system.compute_velocity(
            &state.base_pos,
            &state.joint_pos,
            &state.base_vel,
            &state.joint_vel,
            names,
        );
        fill_zero_entries(&mut state.contact_vel, &computed, names);
    }
    if has_zero_entry(&state.contact_acc, names) {
        let computed = dynamical_system.compute_acceleration(
            &state.base_pos,
            &state.joint_pos,
            &state.base_vel,
            &state.joint_vel,
            &state.base_acc,
            &state.joint_acc,
            names,
        );
        fill_zero_entries(&mut state.contact_acc, &computed, names);
    }
}
