//! Solver-agnostic modeling layer for linear and mixed-integer planning models.
//!
//! A model is built through a [ModelAPI] object, which owns a solver backend implementing
//! [model::BaseModelTrait]. Variables are created from domains, combined into linear
//! expressions ([Expr]) and used in constraints and the objective. Families of variables
//! indexed by structured keys are created in one call and returned as a [VariableFamily].
//!
//! # Example
//!
//! ```rust
//! use planmodel::*;
//! use planmodel::dummy::Model;
//!
//! let mut m = Model::new(Some("lo1"));
//! let x = m.variable(Some("x"), greater_than(0.0));
//! let y = m.variable(Some("y"), in_range(0.0, 10.0).integer());
//!
//! // 3 x + 2 y <= 12
//! m.constraint(Some("c1"), 3.0 * x + 2.0 * y, less_than(12.0));
//! m.objective(Some("obj"), Sense::Maximize, x + y);
//!
//! assert_eq!(m.num_variables(), 2);
//! assert_eq!(m.num_constraints(), 1);
//! ```
extern crate itertools;

pub mod error;
pub mod domain;
pub mod variable;
pub mod expr;
pub mod constraint;
pub mod model;
pub mod report;
pub mod dummy;

pub use error::ModelError;
pub use domain::*;
pub use variable::{Variable,VariableFamily};
pub use expr::{Expr,IntoExpr};
pub use constraint::Constraint;
pub use model::{ModelAPI,ModelItem,Sense,SolutionStatus,SolverStatistics};
pub use report::SolveReport;
