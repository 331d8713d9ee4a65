// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! # locomotion-ocp
//! locomotion-ocp formulates trajectory optimization for legged robots as a nonlinear
//! program which can be handed to any NLP solver.
//!
//! ## Design
//! The library is divided into two main modules:
//! * [model](`crate::model`) - contains the solver-facing [`OptimizationModel`] trait together
//!   with its fallbacks (unbounded problem, numerical gradient, soft-constraint penalty) and
//!   the [`WholeBodyState`] every formulation is expressed in.
//! * [ocp](`crate::ocp`) - contains the [`OptimalControl`] formulation which stacks a
//!   [`DynamicalSystem`], path [`Constraint`]s and running [`Cost`]s over a fixed horizon.
//!
//! The dynamical system decides how one block of the decision vector maps to a
//! [`WholeBodyState`], so the formulation itself never looks into the layout of the decision
//! vector.
//!
//! # Example:
//! A dynamical system only has to describe one step. Here a base slides along x with the
//! commanded velocity:
//!```no_run
//! use nalgebra::{DVector, Vector6};
//! use ocp::model::ContactMap;
//! use ocp::{
//!     Constraint, DynamicalSystem, IntegralControlEnergyCost, OcpResult, OptimalControl,
//!     OptimizationModel, WholeBodyState,
//! };
//!
//! struct Slider {
//!     initial: WholeBodyState,
//!     terminal: WholeBodyState,
//!     last_state: Option<WholeBodyState>,
//! }
//!
//! impl Constraint for Slider {
//!     fn name(&self) -> &str {
//!         "slider"
//!     }
//!     fn constraint_dimension(&self) -> usize {
//!         1
//!     }
//!     fn is_soft_constraint(&self) -> bool {
//!         false
//!     }
//!     fn define_as_soft_constraint(&mut self) {}
//!     fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
//!         (DVector::zeros(1), DVector::zeros(1))
//!     }
//!     fn compute(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
//!         let last = self.last_state.as_ref().unwrap_or(&self.initial);
//!         let x = state.base_pos[3] - last.base_pos[3] - state.duration * state.base_vel[3];
//!         Ok(DVector::from_element(1, x))
//!     }
//!     fn set_last_state(&mut self, state: &WholeBodyState) {
//!         self.last_state = Some(state.clone());
//!     }
//!     fn reset_state_buffer(&mut self) {
//!         self.last_state = None;
//!     }
//! }
//!
//! impl DynamicalSystem for Slider {
//!     fn dimension_of_state(&self) -> usize {
//!         2
//!     }
//!     fn is_fixed_step_integration(&self) -> bool {
//!         true
//!     }
//!     fn fixed_step_time(&self) -> f64 {
//!         0.1
//!     }
//!     fn initial_state(&self) -> &WholeBodyState {
//!         &self.initial
//!     }
//!     fn terminal_state(&self) -> &WholeBodyState {
//!         &self.terminal
//!     }
//!     fn state_bounds(&self) -> (WholeBodyState, WholeBodyState) {
//!         let mut lower = WholeBodyState::new(0);
//!         let mut upper = WholeBodyState::new(0);
//!         lower.base_pos[3] = -10.;
//!         upper.base_pos[3] = 10.;
//!         lower.base_vel[3] = -1.;
//!         upper.base_vel[3] = 1.;
//!         (lower, upper)
//!     }
//!     fn to_whole_body_state(&self, decision_state: &[f64]) -> OcpResult<WholeBodyState> {
//!         let mut state = WholeBodyState::new(0);
//!         state.base_pos[3] = decision_state[0];
//!         state.base_vel[3] = decision_state[1];
//!         Ok(state)
//!     }
//!     fn from_whole_body_state(&self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
//!         Ok(DVector::from_vec(vec![state.base_pos[3], state.base_vel[3]]))
//!     }
//!     fn joint_dof(&self) -> usize {
//!         0
//!     }
//!     fn end_effector_names(&self) -> Vec<String> {
//!         Vec::new()
//!     }
//!     fn compute_forward_kinematics(
//!         &self,
//!         _base_pos: &Vector6<f64>,
//!         _joint_pos: &DVector<f64>,
//!         _bodies: &[String],
//!     ) -> ContactMap {
//!         ContactMap::new()
//!     }
//!     fn compute_velocity(
//!         &self,
//!         _base_pos: &Vector6<f64>,
//!         _joint_pos: &DVector<f64>,
//!         _base_vel: &Vector6<f64>,
//!         _joint_vel: &DVector<f64>,
//!         _bodies: &[String],
//!     ) -> ContactMap {
//!         ContactMap::new()
//!     }
//!     fn compute_acceleration(
//!         &self,
//!         _base_pos: &Vector6<f64>,
//!         _joint_pos: &DVector<f64>,
//!         _base_vel: &Vector6<f64>,
//!         _joint_vel: &DVector<f64>,
//!         _base_acc: &Vector6<f64>,
//!         _joint_acc: &DVector<f64>,
//!         _bodies: &[String],
//!     ) -> ContactMap {
//!         ContactMap::new()
//!     }
//! }
//!
//! fn main() -> OcpResult<()> {
//!     let mut terminal = WholeBodyState::new(0);
//!     terminal.base_pos[3] = 1.;
//!     let slider = Slider {
//!         initial: WholeBodyState::new(0),
//!         terminal,
//!         last_state: None,
//!     };
//!
//!     let mut formulation = OptimalControl::with_horizon(50);
//!     formulation.add_dynamical_system(Box::new(slider));
//!     formulation.add_cost(Box::new(IntegralControlEnergyCost::new(DVector::zeros(0))));
//!     formulation.init(false)?;
//!
//!     let mut x = vec![0.; formulation.dimension_of_state()];
//!     formulation.get_starting_point(&mut x)?;
//!     // hand `formulation` and `x` to the NLP solver of your choice
//!     let trajectory = formulation.evaluate_solution(&x)?;
//!     assert_eq!(trajectory.len(), 51);
//!     Ok(())
//! }
//!```
//!
//! The solver only talks to the [`OptimizationModel`] trait:
//!```no_run
//! # use ocp::{OcpResult, OptimizationModel};
//! # fn solver_step<M: OptimizationModel>(formulation: &mut M, x: &[f64]) -> OcpResult<()> {
//! let mut x_l = vec![0.; formulation.dimension_of_state()];
//! let mut x_u = vec![0.; formulation.dimension_of_state()];
//! let mut g_l = vec![0.; formulation.dimension_of_constraints()];
//! let mut g_u = vec![0.; formulation.dimension_of_constraints()];
//! formulation.evaluate_bounds(&mut x_l, &mut x_u, &mut g_l, &mut g_u)?;
//!
//! let f = formulation.evaluate_costs(x)?;
//! let mut g = vec![0.; formulation.dimension_of_constraints()];
//! formulation.evaluate_constraints(&mut g, x)?;
//! let mut grad_f = vec![0.; formulation.dimension_of_state()];
//! formulation.evaluate_cost_gradient(&mut grad_f, x)?;
//! # let _ = f;
//! # Ok(())
//! # }
//! ```
//! Every call returns an [`OcpResult`], inconsistent dimensions of the registered contributors
//! are reported as errors instead of being written out of range.
//!
//! Calling `init(true)` turns every constraint into a penalty which is added to the cost,
//! which is useful for solvers without constraint support.
pub mod exception;
pub mod model;
pub mod ocp;
pub mod utils;

pub use exception::{OcpException, OcpResult};
pub use model::{
    ModelData, NumericDiffMode, OptimizationModel, SoftConstraintFamily,
    SoftConstraintProperties, WholeBodyState, WholeBodyTrajectory, NO_BOUND,
};
pub use ocp::{Constraint, Cost, DynamicalSystem, IntegralControlEnergyCost, OptimalControl};
pub use utils::*;
