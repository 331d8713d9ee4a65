// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the conversion of hard-constraint violations into a penalty cost.
use crate::exception::{check_dimension, OcpResult};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Shape of the penalty applied to each violated constraint entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftConstraintFamily {
    /// Every violated bound contributes 1, independent of its magnitude.
    Unweighted,
    /// Every violated bound contributes its distance to the (thresholded) bound.
    Quadratic,
}

impl Default for SoftConstraintFamily {
    fn default() -> Self {
        SoftConstraintFamily::Quadratic
    }
}

/// Configuration for converting hard constraints into an additional cost term.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftConstraintProperties {
    /// Scales the norm of the violation vector.
    pub weight: f64,
    /// Shrinks the admissible interval on both sides before violations are measured.
    pub threshold: f64,
    /// Added once if any entry leaves its hard bounds.
    pub offset: f64,
    /// Penalty shape.
    pub family: SoftConstraintFamily,
}

impl Default for SoftConstraintProperties {
    fn default() -> Self {
        SoftConstraintProperties {
            weight: 10000.,
            threshold: 0.,
            offset: 0.,
            family: SoftConstraintFamily::default(),
        }
    }
}

impl SoftConstraintProperties {
    /// Creates new properties.
    pub fn new(
        weight: f64,
        threshold: f64,
        offset: f64,
        family: SoftConstraintFamily,
    ) -> Self {
        SoftConstraintProperties {
            weight,
            threshold,
            offset,
            family,
        }
    }

    fn violation(&self, gap: f64) -> f64 {
        match self.family {
            SoftConstraintFamily::Unweighted => 1.,
            SoftConstraintFamily::Quadratic => gap,
        }
    }

    /// Computes the penalty of a constraint vector against its hard bounds.
    ///
    /// The result is `weight * |v| + offset_applied` where `v` collects the per-entry
    /// violations of the thresholded interval and `offset_applied` is `offset` if at least
    /// one entry lies outside of its un-thresholded bounds, zero otherwise.
    /// # Errors
    /// * [`InconsistentDimension`](`crate::exception::OcpException::InconsistentDimension`)
    /// if the bounds do not have the length of `constraint`.
    pub fn penalty(
        &self,
        constraint: &[f64],
        lower_bound: &[f64],
        upper_bound: &[f64],
    ) -> OcpResult<f64> {
        check_dimension("constraint lower bound", constraint.len(), lower_bound.len())?;
        check_dimension("constraint upper bound", constraint.len(), upper_bound.len())?;

        let mut offset_cost = 0.;
        let mut violation = DVector::<f64>::zeros(constraint.len());
        for (i, &value) in constraint.iter().enumerate() {
            let lower = lower_bound[i] + self.threshold;
            let upper = upper_bound[i] - self.threshold;
            if lower > value {
                violation[i] += self.violation(lower - value);
            }
            if upper < value {
                violation[i] += self.violation(value - upper);
            }
            if upper_bound[i] < value || lower_bound[i] > value {
                offset_cost = self.offset;
            }
        }
        Ok(self.weight * violation.norm() + offset_cost)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::soft_constraint::{SoftConstraintFamily, SoftConstraintProperties};

    fn float_compare(a: f64, b: f64, thresh: f64) {
        assert!((a - b).abs() < thresh, "{} != {}", a, b);
    }

    #[test]
    fn value_at_thresholded_bound_is_free() {
        let properties = SoftConstraintProperties::new(1., 0.5, 3., SoftConstraintFamily::Quadratic);
        float_compare(
            properties.penalty(&[-0.5], &[-1.], &[1.]).unwrap(),
            0.,
            1e-12,
        );
    }

    #[test]
    fn unit_gap_below_threshold() {
        let unweighted =
            SoftConstraintProperties::new(1., 1.5, 0., SoftConstraintFamily::Unweighted);
        let quadratic = SoftConstraintProperties::new(1., 1.5, 0., SoftConstraintFamily::Quadratic);
        // lower + threshold = -1.5, value one unit below, still inside the hard bounds
        float_compare(unweighted.penalty(&[-2.5], &[-3.], &[3.]).unwrap(), 1., 1e-12);
        float_compare(quadratic.penalty(&[-2.5], &[-3.], &[3.]).unwrap(), 1., 1e-12);
    }

    #[test]
    fn unweighted_ignores_magnitude() {
        let properties =
            SoftConstraintProperties::new(2., 0., 0., SoftConstraintFamily::Unweighted);
        float_compare(
            properties.penalty(&[100., -7.], &[0., 0.], &[1., 1.]).unwrap(),
            2. * 2f64.sqrt(),
            1e-12,
        );
    }

    #[test]
    fn weighted_norm_with_offset() {
        let properties = SoftConstraintProperties::new(10., 0., 5., SoftConstraintFamily::Quadratic);
        float_compare(properties.penalty(&[2.], &[-1.], &[1.]).unwrap(), 15., 1e-12);
        float_compare(
            properties
                .penalty(&[4., -1., 0.], &[-1., 0., -1.], &[1., 1., 1.])
                .unwrap(),
            10. * (9f64 + 1.).sqrt() + 5.,
            1e-12,
        );
    }

    #[test]
    fn offset_only_once_and_only_outside_hard_bounds() {
        let properties = SoftConstraintProperties::new(1., 0.5, 5., SoftConstraintFamily::Quadratic);
        // inside the hard bounds but outside the thresholded interval
        float_compare(properties.penalty(&[0.75], &[-1.], &[1.]).unwrap(), 0.25, 1e-12);
        // two entries outside the hard bounds share a single offset
        float_compare(
            properties.penalty(&[1.5, -1.5], &[-1., -1.], &[1., 1.]).unwrap(),
            2f64.sqrt() + 5.,
            1e-12,
        );
    }

    #[test]
    fn bound_dimension_mismatch() {
        let properties = SoftConstraintProperties::default();
        assert!(properties.penalty(&[1., 2.], &[0.], &[0., 0.]).is_err());
        assert!(properties.penalty(&[1.], &[0.], &[0., 0.]).is_err());
    }
}
