//! HiGHS backend for [planmodel].
//!
//! The backend collects variables, rows and the objective as they are added to the model, and
//! builds a [highs::RowProblem] when the model is solved. The solver runs quietly unless the
//! `output_flag` option is set.
//!
//! ```no_run
//! use planmodel::*;
//! use planmodel_highs::Model;
//!
//! let mut m = Model::new(Some("lo1"));
//! let x = m.variable(Some("x"), in_range(0.0,10.0));
//! let y = m.variable(Some("y"), greater_than(0.0).integer());
//! m.constraint(Some("c"), x + 2.0 * y, less_than(14.0));
//! m.objective(Some("obj"), Sense::Maximize, x + y);
//! m.set_parameter("time_limit", 60.0);
//!
//! let status = m.solve().unwrap();
//! println!("{}: {:?}", status, m.primal_objective_value());
//! println!("{}", m.report());
//! ```
use std::ffi::{c_void,CString};
use std::ops::Bound;
use std::time::Instant;

use highs::{Col,RowProblem};
use highs_sys::HighsInt;
use itertools::izip;
use planmodel::{ModelAPI,Sense,SolutionStatus,SolverStatistics};
use planmodel::model::{BaseModelTrait,Solution,SolverParameterValue};
use tracing::{debug,warn};

pub type Model = ModelAPI<HighsModel>;

/// Option value as given to [ModelAPI::set_parameter].
#[derive(Clone,Debug,PartialEq)]
enum OptionValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    Str(String),
}

#[derive(Clone,Copy,PartialEq,Eq)]
enum OptionType { Bool, Int, Double, Str }

/// HiGHS options accepted by the backend and their value types. Values are checked by HiGHS
/// when the option is set.
const OPTIONS : &[(&str,OptionType)] = &[
    ("output_flag",                  OptionType::Bool),
    ("log_to_console",               OptionType::Bool),
    ("presolve",                     OptionType::Str),
    ("solver",                       OptionType::Str),
    ("parallel",                     OptionType::Str),
    ("threads",                      OptionType::Int),
    ("random_seed",                  OptionType::Int),
    ("simplex_iteration_limit",      OptionType::Int),
    ("mip_max_nodes",                OptionType::Int),
    ("time_limit",                   OptionType::Double),
    ("mip_rel_gap",                  OptionType::Double),
    ("mip_abs_gap",                  OptionType::Double),
    ("mip_feasibility_tolerance",    OptionType::Double),
    ("primal_feasibility_tolerance", OptionType::Double),
    ("dual_feasibility_tolerance",   OptionType::Double),
];

#[derive(Clone,Debug)]
struct Row {
    lower : f64,
    upper : f64,
    subj  : Vec<usize>,
    cof   : Vec<f64>,
}

/// Backend object for HiGHS. Data is stored until [BaseModelTrait::solve] is called.
#[derive(Default)]
pub struct HighsModel {
    name    : Option<String>,

    var_bnd : Vec<(f64,f64)>,
    var_int : Vec<bool>,
    rows    : Vec<Row>,

    sense   : Option<Sense>,
    c       : Vec<f64>,
    c_fix   : f64,

    options : Vec<(String,OptionValue)>,
}

fn bound(v : f64) -> Bound<f64> {
    if v.is_infinite() { Bound::Unbounded } else { Bound::Included(v) }
}

fn bounds(lower : f64, upper : f64) -> (Bound<f64>,Bound<f64>) { (bound(lower),bound(upper)) }

/// Map a HiGHS model status code. The codes are read directly since the `highs` crate has no
/// variant for the solution, interrupt and memory limits.
fn map_status(status : HighsInt) -> SolutionStatus {
    use highs_sys::*;
    match status {
        MODEL_STATUS_OPTIMAL | MODEL_STATUS_MODEL_EMPTY => SolutionStatus::Optimal,
        MODEL_STATUS_INFEASIBLE => SolutionStatus::Infeasible,
        MODEL_STATUS_UNBOUNDED  => SolutionStatus::Unbounded,
        MODEL_STATUS_REACHED_TIME_LIMIT
            | MODEL_STATUS_REACHED_ITERATION_LIMIT
            | MODEL_STATUS_REACHED_SOLUTION_LIMIT
            | MODEL_STATUS_REACHED_INTERRUPT
            | MODEL_STATUS_REACHED_MEMORY_LIMIT => SolutionStatus::LimitReached,
        // Includes MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE
        _ => SolutionStatus::Unknown,
    }
}

/// Set an option on a HiGHS instance. Fails if HiGHS rejects the name or the value.
fn apply_option(highs : *mut c_void, name : &str, value : &OptionValue) -> Result<(),String> {
    let cname = CString::new(name).map_err(|_| format!("Invalid HiGHS option name '{}'",name))?;
    let status = match value {
        OptionValue::Bool(v)   => unsafe { highs_sys::Highs_setBoolOptionValue(highs,cname.as_ptr(),HighsInt::from(*v)) },
        OptionValue::Int(v)    => unsafe { highs_sys::Highs_setIntOptionValue(highs,cname.as_ptr(),HighsInt::from(*v)) },
        OptionValue::Double(v) => unsafe { highs_sys::Highs_setDoubleOptionValue(highs,cname.as_ptr(),*v) },
        OptionValue::Str(v)    => {
            let cvalue = CString::new(v.as_str()).map_err(|_| format!("Invalid value for HiGHS option '{}'",name))?;
            unsafe { highs_sys::Highs_setStringOptionValue(highs,cname.as_ptr(),cvalue.as_ptr()) }
        },
    };
    if status == highs_sys::STATUS_ERROR {
        Err(format!("HiGHS rejected value {:?} for option '{}'",value,name))
    }
    else {
        Ok(())
    }
}

fn int_info(highs : *const c_void, name : &str) -> Option<u64> {
    let cname = CString::new(name).ok()?;
    let mut value : HighsInt = 0;
    let status = unsafe { highs_sys::Highs_getIntInfoValue(highs,cname.as_ptr(),&mut value) };
    if status == highs_sys::STATUS_OK { u64::try_from(value).ok() } else { None }
}

fn int64_info(highs : *const c_void, name : &str) -> Option<u64> {
    let cname = CString::new(name).ok()?;
    let mut value : i64 = 0;
    let status = unsafe { highs_sys::Highs_getInt64InfoValue(highs,cname.as_ptr(),&mut value) };
    if status == highs_sys::STATUS_OK { u64::try_from(value).ok() } else { None }
}

/// Simplex and interior point iterations. For a MIP HiGHS reports the total number of LP
/// iterations as the simplex count.
fn iteration_count(highs : *const c_void) -> Option<u64> {
    match (int_info(highs,"simplex_iteration_count"),int_info(highs,"ipm_iteration_count")) {
        (None,None) => None,
        (a,b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
    }
}

impl HighsModel {
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    fn set_option(&mut self, parname : &str, value : OptionValue) -> Result<(),String> {
        let expected = match OPTIONS.iter().find(|(n,_)| *n == parname) {
            Some((_,t)) => *t,
            None => return Err(format!("Unsupported HiGHS option '{}'",parname)),
        };
        let actual = match value {
            OptionValue::Bool(_)   => OptionType::Bool,
            OptionValue::Int(_)    => OptionType::Int,
            OptionValue::Double(_) => OptionType::Double,
            OptionValue::Str(_)    => OptionType::Str,
        };
        if expected != actual {
            return Err(format!("Invalid value type for HiGHS option '{}'",parname));
        }
        let mut scratch = RowProblem::default().try_optimise(highs::Sense::Minimise)
            .map_err(|e| format!("HiGHS failed: {:?}",e))?;
        scratch.make_quiet();
        apply_option(scratch.as_mut_ptr(),parname,&value)?;

        self.options.retain(|(n,_)| n != parname);
        self.options.push((parname.to_string(),value));
        Ok(())
    }

    /// Build the HiGHS problem. Columns are added in variable order, so column `j` is variable
    /// `j`, and rows in constraint order.
    fn build_problem(&self) -> RowProblem {
        let mut pb = RowProblem::default();
        let cols : Vec<Col> = izip!(self.var_bnd.iter(),self.var_int.iter(),self.c.iter())
            .map(|(&(lb,ub),&is_int,&c)| {
                if is_int { pb.add_integer_column(c,bounds(lb,ub)) }
                else      { pb.add_column(c,bounds(lb,ub)) }
            })
            .collect();
        for row in self.rows.iter() {
            let factors : Vec<(Col,f64)> = izip!(row.subj.iter(),row.cof.iter()).map(|(&j,&c)| (cols[j],c)).collect();
            pb.add_row(bounds(row.lower,row.upper),factors.as_slice());
        }
        pb
    }
}

impl BaseModelTrait for HighsModel {
    fn new(name : Option<&str>) -> Self {
        HighsModel{ name : name.map(|s| s.to_string()), ..Default::default() }
    }

    fn linear_variable(&mut self, _name : Option<&str>, lower : f64, upper : f64, is_integer : bool) -> Result<usize,String> {
        let index = self.var_bnd.len();
        self.var_bnd.push((lower,upper));
        self.var_int.push(is_integer);
        self.c.push(0.0);
        Ok(index)
    }

    fn linear_constraint(&mut self, _name : Option<&str>, subj : &[usize], cof : &[f64], lower : f64, upper : f64) -> Result<usize,String> {
        if subj.len() != cof.len() {
            return Err("Mismatching row data lengths".to_string());
        }
        if let Some(&j) = subj.iter().find(|&&j| j >= self.var_bnd.len()) {
            return Err(format!("Variable index {} out of bounds",j));
        }
        let index = self.rows.len();
        self.rows.push(Row{ lower, upper, subj : subj.to_vec(), cof : cof.to_vec() });
        Ok(index)
    }

    fn objective(&mut self, _name : Option<&str>, sense : Sense, subj : &[usize], cof : &[f64], fix : f64) -> Result<(),String> {
        if let Some(&j) = subj.iter().find(|&&j| j >= self.var_bnd.len()) {
            return Err(format!("Variable index {} out of bounds",j));
        }
        self.c.iter_mut().for_each(|c| *c = 0.0);
        for (&j,&c) in subj.iter().zip(cof.iter()) {
            self.c[j] += c;
        }
        self.c_fix = fix;
        self.sense = Some(sense);
        Ok(())
    }

    fn solve(&mut self, sol : &mut Solution) -> Result<SolverStatistics,String> {
        let sense = match self.sense {
            Some(Sense::Maximize) => highs::Sense::Maximise,
            Some(Sense::Minimize) => highs::Sense::Minimise,
            None => return Err("No objective".to_string()),
        };
        let pb = self.build_problem();
        debug!(name = self.name.as_deref().unwrap_or(""), columns = self.var_bnd.len(), rows = self.rows.len(),
               integer_columns = self.var_int.iter().filter(|&&b| b).count(), "HiGHS problem built");

        let mut model = pb.try_optimise(sense).map_err(|e| format!("HiGHS failed: {:?}",e))?;
        model.make_quiet();
        for (name,value) in self.options.iter() {
            apply_option(model.as_mut_ptr(),name.as_str(),value)?;
        }

        let t0 = Instant::now();
        let solved = model.try_solve().map_err(|e| format!("HiGHS failed: {:?}",e))?;
        let wall_time = t0.elapsed();

        let hstatus = unsafe { highs_sys::Highs_getModelStatus(solved.as_ptr()) };
        sol.status = map_status(hstatus);
        if sol.status == SolutionStatus::Optimal {
            let solution = solved.get_solution();
            sol.var.clear();
            sol.var.extend_from_slice(solution.columns());
            sol.con.clear();
            sol.con.extend_from_slice(solution.rows());
            sol.obj = self.c.iter().zip(sol.var.iter()).map(|(c,x)| c * x).sum::<f64>() + self.c_fix;
            sol.primal_defined = true;
        }
        else {
            warn!(name = self.name.as_deref().unwrap_or(""), status = hstatus, "HiGHS did not find an optimal solution");
        }

        let iterations = iteration_count(solved.as_ptr());
        let nodes = if self.var_int.iter().any(|&b| b) { int64_info(solved.as_ptr(),"mip_node_count") } else { None };
        debug!(name = self.name.as_deref().unwrap_or(""), ?iterations, ?nodes, "HiGHS finished");

        Ok(SolverStatistics{ wall_time, iterations, nodes })
    }
}

impl SolverParameterValue<HighsModel> for bool {
    fn set(self, parname : &str, model : &mut HighsModel) -> Result<(),String> { model.set_option(parname,OptionValue::Bool(self)) }
}

impl SolverParameterValue<HighsModel> for i32 {
    fn set(self, parname : &str, model : &mut HighsModel) -> Result<(),String> { model.set_option(parname,OptionValue::Int(self)) }
}

impl SolverParameterValue<HighsModel> for f64 {
    fn set(self, parname : &str, model : &mut HighsModel) -> Result<(),String> { model.set_option(parname,OptionValue::Double(self)) }
}

impl SolverParameterValue<HighsModel> for &str {
    fn set(self, parname : &str, model : &mut HighsModel) -> Result<(),String> { model.set_option(parname,OptionValue::Str(self.to_string())) }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(map_status(highs_sys::MODEL_STATUS_OPTIMAL), SolutionStatus::Optimal);
        assert_eq!(map_status(highs_sys::MODEL_STATUS_INFEASIBLE), SolutionStatus::Infeasible);
        assert_eq!(map_status(highs_sys::MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE), SolutionStatus::Unknown);
        assert_eq!(map_status(highs_sys::MODEL_STATUS_REACHED_TIME_LIMIT), SolutionStatus::LimitReached);
        assert_eq!(map_status(highs_sys::MODEL_STATUS_REACHED_SOLUTION_LIMIT), SolutionStatus::LimitReached);
        assert_eq!(map_status(highs_sys::MODEL_STATUS_REACHED_MEMORY_LIMIT), SolutionStatus::LimitReached);
        assert_eq!(map_status(99), SolutionStatus::Unknown);
    }

    #[test]
    fn options() {
        let mut m = HighsModel::new(None);
        assert!(10.0f64.set("time_limit",&mut m).is_ok());
        assert!(20.0f64.set("time_limit",&mut m).is_ok());
        assert_eq!(m.options, vec![("time_limit".to_string(),OptionValue::Double(20.0))]);
        assert!("off".set("presolve",&mut m).is_ok());
        assert!(true.set("time_limit",&mut m).is_err());
        assert!(1i32.set("no_such_option",&mut m).is_err());
        assert_eq!(m.options.len(), 2);

        // Values HiGHS does not accept are rejected when set, and the previous value is kept
        assert!("bogus".set("presolve",&mut m).is_err());
        assert!((-1.0f64).set("time_limit",&mut m).is_err());
        assert!((-2i32).set("mip_max_nodes",&mut m).is_err());
        assert_eq!(m.options, vec![("time_limit".to_string(),OptionValue::Double(20.0)),
                                   ("presolve".to_string(),OptionValue::Str("off".to_string()))]);
    }

    #[test]
    fn bound_conversion() {
        assert_eq!(bounds(f64::NEG_INFINITY,3.0), (Bound::Unbounded,Bound::Included(3.0)));
        assert_eq!(bounds(0.0,f64::INFINITY), (Bound::Included(0.0),Bound::Unbounded));
    }
}
