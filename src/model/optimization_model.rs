// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the callback contract between a nonlinear program and a generic NLP solver.
use crate::exception::{create_precondition_exception, OcpResult};
use crate::model::numeric_diff::{NumericDiff, NumericDiffMode};
use crate::model::soft_constraint::SoftConstraintProperties;
use tracing::warn;

/// Magnitude used for bounds which should be treated as infinite by the solver.
pub static NO_BOUND: f64 = 2e19;

/// Bookkeeping shared by every [`OptimizationModel`]: problem shape, derivative
/// availability and the soft-constraint configuration.
#[derive(Debug, Clone)]
pub struct ModelData {
    state_dimension: usize,
    constraint_dimension: usize,
    nonzero_jacobian: usize,
    nonzero_hessian: usize,
    gradient: bool,
    jacobian: bool,
    hessian: bool,
    soft_constraints: bool,
    warn_unbounded: bool,
    constraint_bounds: Option<(Vec<f64>, Vec<f64>)>,
    numeric_diff: NumericDiff,
    soft_properties: SoftConstraintProperties,
}

impl Default for ModelData {
    fn default() -> Self {
        ModelData {
            state_dimension: 0,
            constraint_dimension: 0,
            nonzero_jacobian: 0,
            nonzero_hessian: 0,
            gradient: true,
            jacobian: true,
            hessian: true,
            soft_constraints: false,
            warn_unbounded: true,
            constraint_bounds: None,
            numeric_diff: NumericDiff::default(),
            soft_properties: SoftConstraintProperties::default(),
        }
    }
}

/// Callbacks a generic NLP solver drives to solve
///
/// ```text
/// min f(x)  s.t.  x_l <= x <= x_u,  g_l <= g(x) <= g_u
/// ```
///
/// Implementors only have to give access to their [`ModelData`]. Every other method has a
/// fallback: no warm start, no bounds, zero cost, no constraints and a finite-difference
/// gradient. The fallbacks for derivatives clear the matching availability flag, so a
/// solver can ask [`is_cost_gradient_implemented`](`Self::is_cost_gradient_implemented`)
/// and friends after a first evaluation to learn whether it works with approximations.
///
/// All buffers are handed over as slices. A model never resizes them, their lengths
/// follow from [`dimension_of_state`](`Self::dimension_of_state`) and
/// [`dimension_of_constraints`](`Self::dimension_of_constraints`).
pub trait OptimizationModel {
    fn get_model_data(&self) -> &ModelData;
    fn get_model_data_mut(&mut self) -> &mut ModelData;

    /// Prepares the model before a solver uses it.
    ///
    /// # Arguments
    /// * `only_soft_constraints` - true for solvers which cannot handle hard constraints.
    fn init(&mut self, _only_soft_constraints: bool) -> OcpResult<()> {
        Ok(())
    }

    fn set_dimension_of_state(&mut self, dimension: usize) {
        self.get_model_data_mut().state_dimension = dimension;
    }

    fn set_dimension_of_constraints(&mut self, dimension: usize) {
        self.get_model_data_mut().constraint_dimension = dimension;
    }

    fn set_number_of_nonzero_jacobian(&mut self, nonzero: usize) {
        self.get_model_data_mut().nonzero_jacobian = nonzero;
    }

    fn set_number_of_nonzero_hessian(&mut self, nonzero: usize) {
        self.get_model_data_mut().nonzero_hessian = nonzero;
    }

    /// Sets how [`evaluate_as_soft_constraints`](`Self::evaluate_as_soft_constraints`)
    /// penalizes violations.
    fn set_soft_properties(&mut self, properties: SoftConstraintProperties) {
        self.get_model_data_mut().soft_properties = properties;
    }

    /// Sets the scheme and step of the finite-difference gradient fallback.
    fn set_numeric_differentiation(&mut self, mode: NumericDiffMode, epsilon: f64) {
        self.get_model_data_mut().numeric_diff = NumericDiff::new(mode, epsilon);
    }

    fn define_as_soft_constraint(&mut self) {
        self.get_model_data_mut().soft_constraints = true;
    }

    /// Writes the initial guess of the solver into `decision`.
    fn get_starting_point(&mut self, decision: &mut [f64]) -> OcpResult<()> {
        warn!("there is not defined the warm point, default in the origin");
        decision.iter_mut().for_each(|x| *x = 0.);
        Ok(())
    }

    /// Writes the bounds of the decision variables and of the constraints.
    fn evaluate_bounds(
        &mut self,
        decision_lbound: &mut [f64],
        decision_ubound: &mut [f64],
        constraint_lbound: &mut [f64],
        constraint_ubound: &mut [f64],
    ) -> OcpResult<()> {
        let data = self.get_model_data_mut();
        if data.warn_unbounded {
            warn!("there are not defined the bounds, default as boundless");
            data.warn_unbounded = false;
        }
        decision_lbound.iter_mut().for_each(|x| *x = -NO_BOUND);
        decision_ubound.iter_mut().for_each(|x| *x = NO_BOUND);
        constraint_lbound.iter_mut().for_each(|x| *x = -NO_BOUND);
        constraint_ubound.iter_mut().for_each(|x| *x = NO_BOUND);
        Ok(())
    }

    /// Computes the cost of `decision`.
    fn evaluate_costs(&mut self, _decision: &[f64]) -> OcpResult<f64> {
        warn!("no cost function is implemented");
        Ok(0.)
    }

    /// Computes the gradient of the cost.
    ///
    /// The fallback differentiates [`evaluate_costs`](`Self::evaluate_costs`) numerically
    /// and marks the gradient as not implemented.
    fn evaluate_cost_gradient(&mut self, gradient: &mut [f64], decision: &[f64]) -> OcpResult<()> {
        let data = self.get_model_data_mut();
        data.gradient = false;
        let numeric_diff = data.numeric_diff;
        numeric_diff.gradient(|x| self.evaluate_costs(x), decision, gradient)
    }

    /// Computes the constraint vector of `decision`.
    fn evaluate_constraints(&mut self, _constraint: &mut [f64], _decision: &[f64]) -> OcpResult<()> {
        Ok(())
    }

    /// Converts the hard constraints of `decision` into a single penalty value.
    ///
    /// The constraint bounds are requested from
    /// [`evaluate_bounds`](`Self::evaluate_bounds`) on the first call and reused afterwards,
    /// so the shape of the problem must not change once this method was used.
    /// # Errors
    /// * [`InconsistentDimension`](`crate::exception::OcpException::InconsistentDimension`)
    /// if the cached bounds do not fit the current constraint vector.
    fn evaluate_as_soft_constraints(&mut self, decision: &[f64]) -> OcpResult<f64> {
        let constraint_dimension = self.dimension_of_constraints();
        let mut constraint = vec![0.; constraint_dimension];
        self.evaluate_constraints(&mut constraint, decision)?;

        if self.get_model_data().constraint_bounds.is_none() {
            let decision_dimension = decision.len();
            let mut x_l = vec![0.; decision_dimension];
            let mut x_u = vec![0.; decision_dimension];
            let mut g_l = vec![0.; constraint_dimension];
            let mut g_u = vec![0.; constraint_dimension];
            self.evaluate_bounds(&mut x_l, &mut x_u, &mut g_l, &mut g_u)?;
            self.get_model_data_mut().constraint_bounds = Some((g_l, g_u));
        }

        let data = self.get_model_data();
        match &data.constraint_bounds {
            Some((lower, upper)) => data.soft_properties.penalty(&constraint, lower, upper),
            None => Err(create_precondition_exception(
                "the constraint bounds could not be cached",
            )),
        }
    }

    /// Computes the nonzero values of the constraint Jacobian and their row and column
    /// indices. The fallback does nothing and marks the Jacobian as not implemented.
    fn evaluate_constraint_jacobian(
        &mut self,
        _jacobian_values: &mut [f64],
        _row_entries: &mut [usize],
        _col_entries: &mut [usize],
        _decision: &[f64],
        _new_point: bool,
    ) -> OcpResult<()> {
        self.get_model_data_mut().jacobian = false;
        Ok(())
    }

    /// Computes the nonzero values of the Hessian of the Lagrangian and their row and
    /// column indices. The fallback does nothing and marks the Hessian as not implemented.
    #[allow(clippy::too_many_arguments)]
    fn evaluate_lagrangian_hessian(
        &mut self,
        _hessian_values: &mut [f64],
        _row_entries: &mut [usize],
        _col_entries: &mut [usize],
        _obj_factor: f64,
        _lagrange: &[f64],
        _decision: &[f64],
        _new_point: bool,
    ) -> OcpResult<()> {
        self.get_model_data_mut().hessian = false;
        Ok(())
    }

    /// Length of the decision vector.
    fn dimension_of_state(&self) -> usize {
        self.get_model_data().state_dimension
    }

    /// Length of the constraint vector.
    fn dimension_of_constraints(&self) -> usize {
        self.get_model_data().constraint_dimension
    }

    fn number_of_nonzero_jacobian(&self) -> usize {
        self.get_model_data().nonzero_jacobian
    }

    fn number_of_nonzero_hessian(&self) -> usize {
        self.get_model_data().nonzero_hessian
    }

    fn soft_properties(&self) -> SoftConstraintProperties {
        self.get_model_data().soft_properties
    }

    fn is_cost_gradient_implemented(&self) -> bool {
        self.get_model_data().gradient
    }

    fn is_constraint_jacobian_implemented(&self) -> bool {
        self.get_model_data().jacobian
    }

    fn is_lagrangian_hessian_implemented(&self) -> bool {
        self.get_model_data().hessian
    }

    fn is_soft_constraint(&self) -> bool {
        self.get_model_data().soft_constraints
    }
}
