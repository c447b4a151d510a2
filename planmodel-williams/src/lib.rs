//! Planning models from H. P. Williams, *Model Building in Mathematical Programming*.
//!
//! - [factory_planning]: production, storage and maintenance scheduling (MIP).
//! - [food_manufacture]: oil purchasing, refining and blending (LP).
//! - [manpower_planning]: recruitment, retraining and layoffs (LP).
//!
//! Each model has a data struct whose `Default` holds the data from the book, and a `build`
//! function that adds the model to any [planmodel::ModelAPI]. The executables solve the
//! models with HiGHS:
//!
//! ```no_run
//! use planmodel_williams::{run,food_manufacture::{self,FoodData}};
//!
//! let report = run("food_manufacture_1", |m| food_manufacture::build(m, &FoodData::default())).unwrap();
//! print!("{}", report);
//! ```
use planmodel::SolveReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod sets;
pub mod factory_planning;
pub mod food_manufacture;
pub mod manpower_planning;

pub use error::PlanningError;

/// Upper bound used for quantities that are unbounded in practice.
pub const MAX_QUANTITY : f64 = 1.0e6;

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG` (default `warn`).
/// Calling it more than once has no effect.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a model with `build`, solve it with HiGHS and return the report.
///
/// A model that does not solve to optimality is not an error; the report says so.
pub fn run<F,P>(name : &str, build : F) -> Result<SolveReport,PlanningError>
    where
        F : FnOnce(&mut planmodel_highs::Model) -> Result<P,PlanningError>
{
    let mut m = planmodel_highs::Model::new(Some(name));
    build(&mut m)?;
    let status = m.solve()?;
    info!(model = name, %status, "solved");
    Ok(m.report())
}
