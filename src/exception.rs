// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains exception and Result definitions
use thiserror::Error;

/// Represents all kind of errors which can occur while an optimization problem is evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcpException {
    /// InconsistentDimension is returned if the size of a vector reported by a contributor
    /// (dynamical system, constraint, cost) or handed over by the solver does not match the
    /// dimension which was declared for it.
    #[error("the dimension of {name} is not consistent: expected {expected}, got {actual}")]
    InconsistentDimension {
        /// Name of the contributor or buffer.
        name: String,
        /// Declared dimension.
        expected: usize,
        /// Reported dimension.
        actual: usize,
    },

    /// PreconditionViolated is returned if an operation is called on a model which is not
    /// ready for it, e.g. evaluating a formulation without a dynamical system.
    #[error("{message}")]
    PreconditionViolated { message: String },

    /// OutOfRange is returned if a curve is queried outside of its definition interval.
    #[error("{message}")]
    OutOfRange { message: String },
}

/// creates a PreconditionViolated from a static string slice
pub(crate) fn create_precondition_exception(message: &'static str) -> OcpException {
    OcpException::PreconditionViolated {
        message: message.to_string(),
    }
}

/// creates an InconsistentDimension for the given name
pub(crate) fn create_dimension_exception<S: Into<String>>(
    name: S,
    expected: usize,
    actual: usize,
) -> OcpException {
    OcpException::InconsistentDimension {
        name: name.into(),
        expected,
        actual,
    }
}

/// Returns an InconsistentDimension if `actual` differs from `expected`.
pub(crate) fn check_dimension(name: &str, expected: usize, actual: usize) -> OcpResult<()> {
    if expected != actual {
        return Err(create_dimension_exception(name, expected, actual));
    }
    Ok(())
}

/// Result type which can have OcpException as Error
pub type OcpResult<T> = Result<T, OcpException>;
