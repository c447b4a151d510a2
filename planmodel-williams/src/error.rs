use std::collections::BTreeMap;
use std::fmt::Display;

use planmodel::ModelError;
use thiserror::Error;

/// Errors from building a planning model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A parameter table has no entry for a key the model needs.
    #[error("parameter table '{table}' has no entry for {key}")]
    MissingParameter { table : &'static str, key : String },
}

/// Look up a required parameter.
pub(crate) fn lookup<K,V>(table : &'static str, map : &BTreeMap<K,V>, key : &K) -> Result<V,PlanningError>
    where
        K : Ord+Display,
        V : Copy
{
    map.get(key).copied().ok_or_else(|| PlanningError::MissingParameter{ table, key : key.to_string() })
}
