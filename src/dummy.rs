//! This module implements a dummy backend that allows inputting data, but has no support for
//! solving.
//!
//! All data passed to the backend is stored and can be inspected, which makes it useful for
//! testing model construction without a solver:
//!
//! ```
//! use planmodel::*;
//! use planmodel::dummy::Model;
//!
//! let mut m = Model::new(Some("test"));
//! let x = m.variable(Some("x"), in_range(0.0,4.0).integer());
//! m.constraint(Some("c"), 2.0 * x + 1.0, less_than(5.0));
//!
//! let b = m.backend();
//! assert_eq!(b.var_bounds(0), (0.0,4.0));
//! assert!(b.var_is_integer(0));
//! assert_eq!(b.con_bounds(0), (f64::NEG_INFINITY,4.0));
//! assert!(m.try_objective(None, Sense::Maximize, x).is_ok());
//! assert!(matches!(m.solve(), Err(ModelError::Backend(_))));
//! ```
use std::collections::BTreeMap;

use crate::*;
use crate::model::{BaseModelTrait,Solution,SolverParameterValue};

pub type Model = ModelAPI<Backend>;

/// Simple model object that supports input of linear constraints and variables. It only stores
/// data, it does not support solving.
#[derive(Default)]
pub struct Backend {
    name       : Option<String>,

    var_name   : Vec<Option<String>>,
    var_bnd    : Vec<(f64,f64)>,
    var_int    : Vec<bool>,

    con_name   : Vec<Option<String>>,
    con_bnd    : Vec<(f64,f64)>,
    con_ptr    : Vec<usize>,
    con_subj   : Vec<usize>,
    con_cof    : Vec<f64>,

    obj        : Option<(Sense,Vec<usize>,Vec<f64>,f64)>,

    parameters : BTreeMap<String,String>,
}

impl Backend {
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
    pub fn num_var(&self) -> usize { self.var_bnd.len() }
    pub fn num_con(&self) -> usize { self.con_bnd.len() }
    pub fn num_int_var(&self) -> usize { self.var_int.iter().filter(|&&b| b).count() }

    pub fn var_name(&self, i : usize) -> Option<&str> { self.var_name[i].as_deref() }
    pub fn var_bounds(&self, i : usize) -> (f64,f64) { self.var_bnd[i] }
    pub fn var_is_integer(&self, i : usize) -> bool { self.var_int[i] }

    pub fn con_name(&self, i : usize) -> Option<&str> { self.con_name[i].as_deref() }
    pub fn con_bounds(&self, i : usize) -> (f64,f64) { self.con_bnd[i] }
    /// Row `i` as `(subj,cof)`.
    pub fn con_row(&self, i : usize) -> (&[usize],&[f64]) {
        let (b,e) = (self.con_ptr[i],self.con_ptr[i+1]);
        (&self.con_subj[b..e],&self.con_cof[b..e])
    }
    pub fn num_nonzeros(&self) -> usize { self.con_subj.len() }

    /// The objective as `(sense,subj,cof,fix)`, if set.
    pub fn objective_terms(&self) -> Option<(Sense,&[usize],&[f64],f64)> {
        self.obj.as_ref().map(|(sense,subj,cof,fix)| (*sense,subj.as_slice(),cof.as_slice(),*fix))
    }

    /// Parameter value as it was given, formatted as a string.
    pub fn parameter(&self, parname : &str) -> Option<&str> { self.parameters.get(parname).map(|s| s.as_str()) }
}

impl BaseModelTrait for Backend {
    fn new(name : Option<&str>) -> Self {
        Backend{
            name : name.map(|s| s.to_string()),
            con_ptr : vec![0],
            ..Default::default()
        }
    }

    fn linear_variable(&mut self, name : Option<&str>, lower : f64, upper : f64, is_integer : bool) -> Result<usize,String> {
        let index = self.var_bnd.len();
        self.var_name.push(name.map(|s| s.to_string()));
        self.var_bnd.push((lower,upper));
        self.var_int.push(is_integer);
        Ok(index)
    }

    fn linear_constraint(&mut self, name : Option<&str>, subj : &[usize], cof : &[f64], lower : f64, upper : f64) -> Result<usize,String> {
        if let Some(&j) = subj.iter().find(|&&j| j >= self.var_bnd.len()) {
            return Err(format!("Variable index {} out of bounds",j));
        }
        let index = self.con_bnd.len();
        self.con_name.push(name.map(|s| s.to_string()));
        self.con_bnd.push((lower,upper));
        self.con_subj.extend_from_slice(subj);
        self.con_cof.extend_from_slice(cof);
        self.con_ptr.push(self.con_subj.len());
        Ok(index)
    }

    fn objective(&mut self, _name : Option<&str>, sense : Sense, subj : &[usize], cof : &[f64], fix : f64) -> Result<(),String> {
        self.obj = Some((sense,subj.to_vec(),cof.to_vec(),fix));
        Ok(())
    }

    fn solve(&mut self, _sol : &mut Solution) -> Result<SolverStatistics,String> {
        Err("Solving is not supported by the dummy backend".to_string())
    }
}

impl SolverParameterValue<Backend> for f64 {
    fn set(self, parname : &str, model : &mut Backend) -> Result<(),String> {
        model.parameters.insert(parname.to_string(),self.to_string()); Ok(())
    }
}

impl SolverParameterValue<Backend> for i32 {
    fn set(self, parname : &str, model : &mut Backend) -> Result<(),String> {
        model.parameters.insert(parname.to_string(),self.to_string()); Ok(())
    }
}

impl SolverParameterValue<Backend> for bool {
    fn set(self, parname : &str, model : &mut Backend) -> Result<(),String> {
        model.parameters.insert(parname.to_string(),self.to_string()); Ok(())
    }
}

impl SolverParameterValue<Backend> for &str {
    fn set(self, parname : &str, model : &mut Backend) -> Result<(),String> {
        model.parameters.insert(parname.to_string(),self.to_string()); Ok(())
    }
}
