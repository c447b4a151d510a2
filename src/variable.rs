//! Module for Variable and VariableFamily objects.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::ops::Index;

use crate::error::ModelError;
use crate::expr::Expr;
use crate::model::{BaseModelTrait,ModelAPI};

/// A Variable object is a handle to a scalar decision variable in a [ModelAPI]. It remembers
/// the id of the model that created it, so using it with another model is detected when the
/// expression is passed to that model.
///
/// A variable is turned into an expression with [Variable::to_expr] or by using it in arithmetic:
///
/// ```
/// use planmodel::*;
/// use planmodel::dummy::Model;
///
/// let mut model = Model::new(None);
/// let x = model.variable(None, greater_than(0.0));
/// model.constraint(None, x.to_expr(), equal_to(1.0));
/// model.constraint(None, 2.0 * x - 1.0, less_than(3.0));
/// ```
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct Variable {
    pub(crate) model : u64,
    pub(crate) index : usize,
}

impl Variable {
    pub(crate) fn new(model : u64, index : usize) -> Variable { Variable{ model, index } }
    /// Index of the variable in the model it belongs to.
    pub fn index(&self) -> usize { self.index }
    /// Id of the model the variable belongs to.
    pub fn model_id(&self) -> u64 { self.model }
    pub fn to_expr(&self) -> Expr { Expr::from(*self) }
}

/// A family of scalar variables indexed by a structured key.
///
/// The family is the result of [ModelAPI::variables], which creates one variable per key. Keys
/// are kept ordered, so iteration is deterministic.
///
/// Indexing with a key that was never registered is a programming error and panics; use
/// [VariableFamily::get] for a checked lookup.
#[derive(Clone,Debug)]
pub struct VariableFamily<K> {
    name : String,
    vars : BTreeMap<K,Variable>,
}

impl<K> VariableFamily<K> where K : Ord {
    pub(crate) fn new(name : &str, vars : BTreeMap<K,Variable>) -> VariableFamily<K> {
        VariableFamily{ name : name.to_string(), vars }
    }

    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn len(&self) -> usize { self.vars.len() }
    pub fn is_empty(&self) -> bool { self.vars.is_empty() }
    pub fn get(&self, key : &K) -> Option<Variable> { self.vars.get(key).copied() }
    pub fn contains_key(&self, key : &K) -> bool { self.vars.contains_key(key) }
    pub fn keys(&self) -> impl Iterator<Item=&K> { self.vars.keys() }
    pub fn iter(&self) -> impl Iterator<Item=(&K,Variable)> { self.vars.iter().map(|(k,&v)| (k,v)) }
    pub fn variables(&self) -> impl Iterator<Item=Variable> + '_ { self.vars.values().copied() }

    /// Sum of all variables in the family.
    pub fn sum(&self) -> Expr { self.vars.values().sum() }

    /// Sum of the variables whose key satisfies `pred`.
    pub fn sum_where<F>(&self, mut pred : F) -> Expr where F : FnMut(&K) -> bool {
        self.vars.iter().filter(|(k,_)| pred(k)).map(|(_,&v)| v).sum()
    }

    /// Primal solution values of all variables in the family, by key.
    pub fn primal_values<M>(&self, m : &ModelAPI<M>) -> Result<BTreeMap<K,f64>,ModelError> where K : Clone, M : BaseModelTrait {
        self.vars.iter()
            .map(|(k,v)| m.primal_solution(v).map(|x| (k.clone(),x)))
            .collect()
    }
}

impl<K> Index<&K> for VariableFamily<K> where K : Ord+Display {
    type Output = Variable;
    fn index(&self, key : &K) -> &Variable {
        match self.vars.get(key) {
            Some(v) => v,
            None => panic!("No variable registered for {}[{}]",self.name,key)
        }
    }
}

impl<'a,K> IntoIterator for &'a VariableFamily<K> {
    type Item = (&'a K,&'a Variable);
    type IntoIter = std::collections::btree_map::Iter<'a,K,Variable>;
    fn into_iter(self) -> Self::IntoIter { self.vars.iter() }
}
