// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the generic optimization model and the robot state it is formulated over.
pub mod numeric_diff;
pub mod optimization_model;
pub mod soft_constraint;
pub mod whole_body_state;

pub use numeric_diff::{NumericDiff, NumericDiffMode, DEFAULT_EPSILON};
pub use optimization_model::{ModelData, OptimizationModel, NO_BOUND};
pub use soft_constraint::{SoftConstraintFamily, SoftConstraintProperties};
pub use whole_body_state::{ContactMap, ContactWrenchMap, WholeBodyState, WholeBodyTrajectory};
