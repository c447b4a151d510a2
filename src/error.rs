//! Error type for model construction and solving.

use thiserror::Error;

use crate::model::SolutionStatus;

/// Errors reported by [crate::ModelAPI].
///
/// Errors returned from the `try_*` functions leave the model in a consistent state, so the
/// caller may continue building. The non-`try_` variants panic on these errors instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The same key was given twice when creating a variable family.
    #[error("duplicate key {key} in variable family '{family}'")]
    DuplicateKey { family : String, key : String },

    /// A domain with a lower bound above its upper bound, or a NaN bound.
    #[error("invalid bounds [{lower}, {upper}]")]
    InvalidBounds { lower : f64, upper : f64 },

    /// An expression contained a NaN or infinite coefficient.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A variable created by a different model was used.
    #[error("variable {index} belongs to model #{owner}, not to model #{model}")]
    ForeignVariable { index : usize, owner : u64, model : u64 },

    /// A constraint created by a different model was used.
    #[error("constraint {index} belongs to model #{owner}, not to model #{model}")]
    ForeignConstraint { index : usize, owner : u64, model : u64 },

    #[error("constraint domains cannot be integer")]
    IntegerConstraint,

    #[error("objective has already been set")]
    ObjectiveAlreadySet,

    #[error("model has no objective")]
    MissingObjective,

    /// The model has been solved; it accepts no further items and no second solve.
    #[error("model has already been solved")]
    AlreadySolved,

    /// Solution values were requested, but the solver did not produce a solution.
    #[error("solution is not available (status: {0})")]
    SolutionUnavailable(SolutionStatus),

    /// The solver backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}
