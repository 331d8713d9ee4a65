// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! contains interpolation helpers and small vector utilities.
use crate::exception::{OcpException, OcpResult};
use serde::{Deserialize, Serialize};

/// Returns true if every entry is exactly zero.
///
/// An empty slice counts as zero.
pub fn is_zero(values: &[f64]) -> bool {
    values.iter().all(|&x| x == 0.)
}

/// A point of a one-dimensional curve together with its first and second derivative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    /// position
    pub x: f64,
    /// velocity
    pub xd: f64,
    /// acceleration
    pub xdd: f64,
}

impl SplinePoint {
    /// Creates a point at rest.
    pub fn new(x: f64) -> Self {
        SplinePoint {
            x,
            xd: 0.,
            xdd: 0.,
        }
    }
}

/// Cubic polynomial between two boundary points.
///
/// The boundary positions and velocities are matched exactly, the accelerations of the
/// boundary points are ignored as a cubic has no freedom left for them.
#[derive(Debug, Copy, Clone)]
pub struct CubicSpline {
    initial_time: f64,
    duration: f64,
    coefficients: [f64; 4],
}

impl CubicSpline {
    /// Creates a new CubicSpline.
    ///
    /// # Arguments
    /// * `initial_time` - Time of the starting point.
    /// * `duration` - Length of the interpolation interval, has to be positive.
    /// * `start` - Point at `initial_time`.
    /// * `end` - Point at `initial_time + duration`.
    /// # Errors
    /// * [`OutOfRange`](`crate::exception::OcpException::OutOfRange`) if the duration is not positive.
    pub fn new(
        initial_time: f64,
        duration: f64,
        start: &SplinePoint,
        end: &SplinePoint,
    ) -> OcpResult<Self> {
        if !(duration > 0.) || !duration.is_finite() {
            return Err(OcpException::OutOfRange {
                message: format!("spline duration has to be positive, got {}", duration),
            });
        }
        let delta = end.x - start.x;
        let a = start.x;
        let b = start.xd;
        let c = (3. * delta - (2. * start.xd + end.xd) * duration) / duration.powi(2);
        let d = (-2. * delta + (start.xd + end.xd) * duration) / duration.powi(3);
        Ok(CubicSpline {
            initial_time,
            duration,
            coefficients: [a, b, c, d],
        })
    }

    /// Evaluates the spline.
    ///
    /// # Errors
    /// * [`OutOfRange`](`crate::exception::OcpException::OutOfRange`) if `time` lies outside
    /// of the interpolation interval.
    pub fn point(&self, time: f64) -> OcpResult<SplinePoint> {
        let t = time - self.initial_time;
        if t < 0. || t > self.duration || !t.is_finite() {
            return Err(OcpException::OutOfRange {
                message: format!(
                    "time {} is outside of the spline interval [{}, {}]",
                    time,
                    self.initial_time,
                    self.initial_time + self.duration
                ),
            });
        }
        let [a, b, c, d] = self.coefficients;
        Ok(SplinePoint {
            x: a + b * t + c * t.powi(2) + d * t.powi(3),
            xd: b + 2. * c * t + 3. * d * t.powi(2),
            xdd: 2. * c + 6. * d * t,
        })
    }
}
