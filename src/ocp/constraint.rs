// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the Constraint trait.
use crate::exception::OcpResult;
use crate::model::{SoftConstraintProperties, WholeBodyState};
use nalgebra::DVector;

/// A path constraint which is evaluated at every step of the horizon.
///
/// # Rolling context
/// Constraints whose residual depends on the previous step (integration, contact
/// switching, ...) may keep the last evaluated state. The formulation drives this with a
/// fixed protocol during every evaluation pass:
/// 1. [`set_last_state`](`Self::set_last_state`) with the initial state of the dynamical
///    system before the first step,
/// 2. [`compute`](`Self::compute`) (or [`compute_soft`](`Self::compute_soft`)) followed by
///    [`set_last_state`](`Self::set_last_state`) with the same state for every step,
/// 3. [`reset_state_buffer`](`Self::reset_state_buffer`) after the pass, also if the pass
///    failed.
///
/// A constraint must not carry anything else from one pass to the next.
pub trait Constraint {
    fn name(&self) -> &str;

    /// Length of the residual returned by [`compute`](`Self::compute`).
    fn constraint_dimension(&self) -> usize;

    fn is_soft_constraint(&self) -> bool;

    /// Turns the constraint into a penalty which is added to the cost.
    fn define_as_soft_constraint(&mut self);

    /// Lower and upper bound of the residual, both of length
    /// [`constraint_dimension`](`Self::constraint_dimension`).
    fn bounds(&self) -> (DVector<f64>, DVector<f64>);

    /// Computes the residual for `state`.
    fn compute(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>>;

    /// Penalty configuration used by the default [`compute_soft`](`Self::compute_soft`).
    fn soft_properties(&self) -> SoftConstraintProperties {
        SoftConstraintProperties::default()
    }

    /// Computes the penalty of `state` when the constraint is soft.
    ///
    /// By default the residual is penalized against [`bounds`](`Self::bounds`) with
    /// [`soft_properties`](`Self::soft_properties`).
    fn compute_soft(&mut self, state: &WholeBodyState) -> OcpResult<f64> {
        let residual = self.compute(state)?;
        let (lower, upper) = self.bounds();
        self.soft_properties()
            .penalty(residual.as_slice(), lower.as_slice(), upper.as_slice())
    }

    /// Stores the state of the previous step.
    fn set_last_state(&mut self, _state: &WholeBodyState) {}

    /// Forgets the state stored by [`set_last_state`](`Self::set_last_state`).
    fn reset_state_buffer(&mut self) {}
}

#[cfg(test)]
mod tests {
    use crate::exception::OcpResult;
    use crate::model::{SoftConstraintFamily, SoftConstraintProperties, WholeBodyState};
    use crate::ocp::constraint::Constraint;
    use nalgebra::DVector;

    struct JointPositionLimit {
        limit: f64,
    }

    impl Constraint for JointPositionLimit {
        fn name(&self) -> &str {
            "joint position limit"
        }
        fn constraint_dimension(&self) -> usize {
            2
        }
        fn is_soft_constraint(&self) -> bool {
            true
        }
        fn define_as_soft_constraint(&mut self) {}
        fn bounds(&self) -> (DVector<f64>, DVector<f64>) {
            (
                DVector::from_element(2, -self.limit),
                DVector::from_element(2, self.limit),
            )
        }
        fn compute(&mut self, state: &WholeBodyState) -> OcpResult<DVector<f64>> {
            Ok(state.joint_pos.clone())
        }
        fn soft_properties(&self) -> SoftConstraintProperties {
            SoftConstraintProperties::new(2., 0., 1., SoftConstraintFamily::Quadratic)
        }
    }

    #[test]
    fn default_soft_penalty_uses_bounds() {
        let mut constraint = JointPositionLimit { limit: 1. };
        let mut state = WholeBodyState::new(2);
        assert_eq!(constraint.compute_soft(&state).unwrap(), 0.);
        state.joint_pos = DVector::from_vec(vec![4., -1.]);
        assert!((constraint.compute_soft(&state).unwrap() - 7.).abs() < 1e-12);
    }
}
