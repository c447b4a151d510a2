//! The [ModelAPI] object and the backend interface.
//!
//! A [ModelAPI] owns a backend implementing [BaseModelTrait]. It keeps track of the variables
//! and constraints that have been created, validates expressions before they are passed to the
//! backend, and stores the solution after [ModelAPI::solve].
//!
//! The life cycle of a model is strictly linear: variables, constraints and the objective are
//! added, then the model is solved exactly once, after which the solution can be queried. Any
//! attempt to modify or solve the model again after solving is rejected.
use std::collections::{BTreeMap,BTreeSet};
use std::fmt::Display;
use std::sync::atomic::{AtomicU64,Ordering};
use std::time::Duration;

use tracing::{debug,info};

use crate::constraint::Constraint;
use crate::domain::Domain;
use crate::error::ModelError;
use crate::expr::{Expr,IntoExpr};
use crate::report::SolveReport;
use crate::variable::{Variable,VariableFamily};

static NEXT_MODEL_ID : AtomicU64 = AtomicU64::new(1);

/// Objective sense
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Sense {
    Maximize,
    Minimize
}

/// Outcome of a solve.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Default)]
pub enum SolutionStatus {
    /// The solution is optimal within tolerances.
    Optimal,
    /// The problem was proven infeasible.
    Infeasible,
    /// The problem was proven unbounded.
    Unbounded,
    /// The solver stopped on a time, iteration or node limit.
    LimitReached,
    /// The model has not been solved.
    #[default]
    NotSolved,
    /// The solver returned without a conclusive status.
    Unknown,
}

impl Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolutionStatus::Optimal      => "optimal",
            SolutionStatus::Infeasible   => "infeasible",
            SolutionStatus::Unbounded    => "unbounded",
            SolutionStatus::LimitReached => "limit reached",
            SolutionStatus::NotSolved    => "not solved",
            SolutionStatus::Unknown      => "unknown",
        };
        f.write_str(s)
    }
}

/// Solution as filled in by a backend.
///
/// `var` is indexed by backend variable index and `con` by backend constraint index. `con`
/// holds row activities, that is the value of the row without the constant moved to the
/// bounds.
#[derive(Clone,Debug,Default)]
pub struct Solution {
    pub status          : SolutionStatus,
    /// True if `var`, `con` and `obj` hold a primal solution, which may be the case also for
    /// non-optimal status values (e.g. a feasible point when a limit is reached).
    pub primal_defined  : bool,
    pub var             : Vec<f64>,
    pub con             : Vec<f64>,
    pub obj             : f64,
}

impl Solution {
    pub fn new(numvar : usize, numcon : usize) -> Solution {
        Solution{ status : SolutionStatus::NotSolved, primal_defined : false, var : vec![0.0; numvar], con : vec![0.0; numcon], obj : 0.0 }
    }
}

/// Solver statistics reported by a backend after solving.
#[derive(Clone,Copy,Debug,Default,PartialEq)]
pub struct SolverStatistics {
    /// Wall clock time spent in the solver.
    pub wall_time  : Duration,
    /// Simplex/barrier iterations, if the backend reports them.
    pub iterations : Option<u64>,
    /// Branch-and-bound nodes, if the backend reports them.
    pub nodes      : Option<u64>,
}

//======================================================
// Backend
//======================================================

/// Interface implemented by a solver backend.
///
/// All indexes passed to and returned from the backend are backend indexes. Bounds are given
/// as `(lower,upper)` where infinite values mean that the side is unbounded. Errors are
/// reported as strings and wrapped in [ModelError::Backend] by the [ModelAPI].
pub trait BaseModelTrait {
    fn new(name : Option<&str>) -> Self where Self : Sized;

    /// Add a scalar variable and return its index.
    fn linear_variable(&mut self, name : Option<&str>, lower : f64, upper : f64, is_integer : bool) -> Result<usize,String>;

    /// Add a row `lower <= sum_k cof[k] x[subj[k]] <= upper` and return its index. `subj` is
    /// sorted and contains no duplicates.
    fn linear_constraint(&mut self, name : Option<&str>, subj : &[usize], cof : &[f64], lower : f64, upper : f64) -> Result<usize,String>;

    /// Set the objective `sum_k cof[k] x[subj[k]] + fix`.
    fn objective(&mut self, name : Option<&str>, sense : Sense, subj : &[usize], cof : &[f64], fix : f64) -> Result<(),String>;

    /// Solve the problem. The backend fills in `sol`, including the status. Not finding an
    /// optimal solution is not an error; only failures of the solver itself are.
    fn solve(&mut self, sol : &mut Solution) -> Result<SolverStatistics,String>;
}

/// A value type that can be used as a solver parameter for backend `M`.
pub trait SolverParameterValue<M : BaseModelTrait> {
    fn set(self, parname : &str, model : &mut M) -> Result<(),String>;
}

//======================================================
// ModelAPI
//======================================================

#[derive(Clone,Copy,Debug)]
struct VarInfo {
    backend    : usize,
    lower      : f64,
    upper      : f64,
    is_integer : bool,
}

/// The model object. It is generic over the backend, and each backend crate defines an alias
/// like `type Model = ModelAPI<Backend>`.
pub struct ModelAPI<T> where T : BaseModelTrait {
    id            : u64,
    name          : Option<String>,
    inner         : T,

    vars          : Vec<VarInfo>,
    cons          : Vec<usize>,
    has_objective : bool,
    solved        : bool,

    sol           : Solution,
    stats         : Option<SolverStatistics>,
}

impl<T> ModelAPI<T> where T : BaseModelTrait {
    /// Create a new empty model.
    ///
    /// # Arguments
    /// - `name` Optional model name, passed on to the backend.
    pub fn new(name : Option<&str>) -> ModelAPI<T> {
        let id = NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed);
        debug!(model = id, name = name.unwrap_or(""), "model created");
        ModelAPI{
            id,
            name : name.map(|s| s.to_string()),
            inner : T::new(name),
            vars : Vec::new(),
            cons : Vec::new(),
            has_objective : false,
            solved : false,
            sol : Solution::new(0,0),
            stats : None,
        }
    }

    /// Process-unique id of the model. Every [Variable] and [Constraint] carries the id of the
    /// model that created it.
    pub fn id(&self) -> u64 { self.id }
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// Access the backend object.
    pub fn backend(&self) -> &T { &self.inner }

    pub fn num_variables(&self) -> usize { self.vars.len() }
    pub fn num_constraints(&self) -> usize { self.cons.len() }
    pub fn has_integer_variables(&self) -> bool { self.vars.iter().any(|v| v.is_integer) }
    pub fn is_solved(&self) -> bool { self.solved }

    fn check_not_solved(&self) -> Result<(),ModelError> {
        if self.solved { Err(ModelError::AlreadySolved) } else { Ok(()) }
    }

    fn check_owner(&self, v : &Variable) -> Result<&VarInfo,ModelError> {
        if v.model != self.id || v.index >= self.vars.len() {
            Err(ModelError::ForeignVariable{ index : v.index, owner : v.model, model : self.id })
        }
        else {
            Ok(&self.vars[v.index])
        }
    }

    /// Validate an expression and convert it into backend indexes.
    fn backend_terms(&self, e : Expr) -> Result<(Vec<usize>,Vec<f64>,f64),ModelError> {
        let e = e.eval_finalize();
        e.check_finite()?;
        let mut subj = Vec::with_capacity(e.terms().len());
        let mut cof  = Vec::with_capacity(e.terms().len());
        for (v,c) in e.terms() {
            subj.push(self.check_owner(v)?.backend);
            cof.push(*c);
        }
        Ok((subj,cof,e.fix()))
    }

    fn add_variable(&mut self, name : Option<&str>, lower : f64, upper : f64, is_integer : bool) -> Result<Variable,ModelError> {
        let backend = self.inner.linear_variable(name,lower,upper,is_integer).map_err(ModelError::Backend)?;
        let index = self.vars.len();
        self.vars.push(VarInfo{ backend, lower, upper, is_integer });
        Ok(Variable::new(self.id,index))
    }

    /// Add a scalar variable.
    ///
    /// # Arguments
    /// - `name` Optional name of the variable.
    /// - `dom` Domain of the variable, e.g. `greater_than(0.0)` or `in_range(0.0,4.0).integer()`.
    ///
    /// # Returns
    /// On success the new variable. On failure the model is unchanged and an error is returned.
    pub fn try_variable<D>(&mut self, name : Option<&str>, dom : D) -> Result<Variable,ModelError> where D : Domain {
        self.check_not_solved()?;
        let (lower,upper) = dom.bounds()?;
        let v = self.add_variable(name,lower,upper,dom.is_integer())?;
        debug!(model = self.id, name = name.unwrap_or(""), lower, upper, integer = dom.is_integer(), "variable added");
        Ok(v)
    }

    /// Add a scalar variable. See [ModelAPI::try_variable].
    ///
    /// Panics on any error.
    pub fn variable<D>(&mut self, name : Option<&str>, dom : D) -> Variable where D : Domain {
        self.try_variable(name,dom).unwrap()
    }

    /// Add a family of variables, one for each key.
    ///
    /// # Arguments
    /// - `name` Family name. Each variable is named `name[key]`.
    /// - `keys` The keys. Each key may occur only once.
    /// - `domain` Function returning the domain of the variable for a key.
    ///
    /// # Returns
    /// The [VariableFamily] mapping keys to variables. If any key is repeated or any domain is
    /// invalid, an error is returned and no variables are added.
    pub fn try_variables<K,I,D,F>(&mut self, name : &str, keys : I, mut domain : F) -> Result<VariableFamily<K>,ModelError>
        where
            K : Ord+Clone+Display,
            I : IntoIterator<Item = K>,
            D : Domain,
            F : FnMut(&K) -> D
    {
        self.check_not_solved()?;
        let mut seen = BTreeSet::new();
        let mut items = Vec::new();
        for k in keys {
            if ! seen.insert(k.clone()) {
                return Err(ModelError::DuplicateKey{ family : name.to_string(), key : k.to_string() });
            }
            let dom = domain(&k);
            let (lower,upper) = dom.bounds()?;
            items.push((k,lower,upper,dom.is_integer()));
        }

        let mut vars = BTreeMap::new();
        for (k,lower,upper,is_integer) in items {
            let vname = format!("{}[{}]",name,k);
            let v = self.add_variable(Some(vname.as_str()),lower,upper,is_integer)?;
            vars.insert(k,v);
        }
        debug!(model = self.id, family = name, count = vars.len(), "variable family added");
        Ok(VariableFamily::new(name,vars))
    }

    /// Add a family of variables. See [ModelAPI::try_variables].
    ///
    /// Panics on any error.
    pub fn variables<K,I,D,F>(&mut self, name : &str, keys : I, domain : F) -> VariableFamily<K>
        where
            K : Ord+Clone+Display,
            I : IntoIterator<Item = K>,
            D : Domain,
            F : FnMut(&K) -> D
    {
        self.try_variables(name,keys,domain).unwrap()
    }

    /// Add a linear constraint `expr ∈ dom`.
    ///
    /// The constant term of the expression is moved to the bounds, terms of the same variable
    /// are merged and zero terms removed before the row is passed to the backend.
    ///
    /// # Arguments
    /// - `name` Optional constraint name.
    /// - `expr` Linear expression.
    /// - `dom` Domain of the expression value. Constraint domains cannot be integer.
    pub fn try_constraint<E,D>(&mut self, name : Option<&str>, expr : E, dom : D) -> Result<Constraint,ModelError>
        where
            E : IntoExpr,
            D : Domain
    {
        self.check_not_solved()?;
        if dom.is_integer() {
            return Err(ModelError::IntegerConstraint);
        }
        let (lower,upper) = dom.bounds()?;
        let (subj,cof,fix) = self.backend_terms(expr.into_expr())?;
        let (lower,upper) = (lower - fix, upper - fix);

        let backend = self.inner.linear_constraint(name,subj.as_slice(),cof.as_slice(),lower,upper).map_err(ModelError::Backend)?;
        let index = self.cons.len();
        self.cons.push(backend);
        debug!(model = self.id, name = name.unwrap_or(""), nnz = subj.len(), lower, upper, "constraint added");
        Ok(Constraint::new(self.id,index))
    }

    /// Add a linear constraint. See [ModelAPI::try_constraint].
    ///
    /// Panics on any error.
    pub fn constraint<E,D>(&mut self, name : Option<&str>, expr : E, dom : D) -> Constraint
        where
            E : IntoExpr,
            D : Domain
    {
        self.try_constraint(name,expr,dom).unwrap()
    }

    /// Set the objective. A model has exactly one objective, and it cannot be replaced.
    pub fn try_objective<E>(&mut self, name : Option<&str>, sense : Sense, expr : E) -> Result<(),ModelError> where E : IntoExpr {
        self.check_not_solved()?;
        if self.has_objective {
            return Err(ModelError::ObjectiveAlreadySet);
        }
        let (subj,cof,fix) = self.backend_terms(expr.into_expr())?;
        self.inner.objective(name,sense,subj.as_slice(),cof.as_slice(),fix).map_err(ModelError::Backend)?;
        self.has_objective = true;
        debug!(model = self.id, name = name.unwrap_or(""), ?sense, nnz = subj.len(), "objective set");
        Ok(())
    }

    /// Set the objective. See [ModelAPI::try_objective].
    ///
    /// Panics on any error.
    pub fn objective<E>(&mut self, name : Option<&str>, sense : Sense, expr : E) where E : IntoExpr {
        self.try_objective(name,sense,expr).unwrap()
    }

    /// Set a solver parameter. Which names and value types are accepted depends on the backend.
    pub fn try_set_parameter<V>(&mut self, parname : &str, parval : V) -> Result<(),ModelError> where V : SolverParameterValue<T> {
        parval.set(parname,&mut self.inner).map_err(ModelError::Backend)
    }

    /// Set a solver parameter. See [ModelAPI::try_set_parameter].
    ///
    /// Panics on any error.
    pub fn set_parameter<V>(&mut self, parname : &str, parval : V) where V : SolverParameterValue<T> {
        self.try_set_parameter(parname,parval).unwrap()
    }

    /// Solve the problem and store the solution.
    ///
    /// This will fail if the model has no objective, has already been solved, or if the
    /// backend fails with an error. Not finding an optimal solution is *not* an error; the
    /// outcome is returned as a [SolutionStatus].
    pub fn solve(&mut self) -> Result<SolutionStatus,ModelError> {
        self.check_not_solved()?;
        if ! self.has_objective {
            return Err(ModelError::MissingObjective);
        }
        self.solved = true;

        info!(event = "solve_start", model = self.id, variables = self.vars.len(), constraints = self.cons.len(), integer = self.has_integer_variables());
        let mut sol = Solution::new(self.vars.len(),self.cons.len());
        let stats = self.inner.solve(&mut sol).map_err(ModelError::Backend)?;
        info!(event = "solve_end", model = self.id, status = %sol.status, elapsed_ms = stats.wall_time.as_millis() as u64);

        let status = sol.status;
        self.sol = sol;
        self.stats = Some(stats);
        Ok(status)
    }

    /// Status of the solution. Before solving this is [SolutionStatus::NotSolved].
    pub fn solution_status(&self) -> SolutionStatus { self.sol.status }

    /// Statistics reported by the backend, if the model has been solved.
    pub fn statistics(&self) -> Option<SolverStatistics> { self.stats }

    fn check_primal(&self) -> Result<(),ModelError> {
        if self.sol.primal_defined { Ok(()) } else { Err(ModelError::SolutionUnavailable(self.sol.status)) }
    }

    /// Objective value of the primal solution, if available.
    pub fn primal_objective_value(&self) -> Option<f64> {
        if self.sol.primal_defined { Some(self.sol.obj) } else { None }
    }

    /// Get the primal solution value of a variable or the activity of a constraint.
    pub fn primal_solution<I>(&self, item : &I) -> Result<f64,ModelError> where I : ModelItem {
        item.primal(self)
    }

    /// Evaluate an expression in the primal solution.
    pub fn evaluate_primal<E>(&self, expr : E) -> Result<f64,ModelError> where E : IntoExpr {
        self.check_primal()?;
        let e = expr.into_expr();
        e.terms().iter()
            .try_fold(e.fix(), |acc,(v,c)| Ok(acc + c * self.var_value(v)?))
    }

    fn var_value(&self, v : &Variable) -> Result<f64,ModelError> {
        let info = self.check_owner(v)?;
        self.check_primal()?;
        Ok(self.sol.var[info.backend])
    }

    fn con_value(&self, c : &Constraint) -> Result<f64,ModelError> {
        if c.model != self.id || c.index >= self.cons.len() {
            return Err(ModelError::ForeignConstraint{ index : c.index, owner : c.model, model : self.id });
        }
        self.check_primal()?;
        Ok(self.sol.con[self.cons[c.index]])
    }

    /// Bounds `(lower,upper)` of a variable.
    pub fn bounds(&self, v : &Variable) -> Result<(f64,f64),ModelError> {
        self.check_owner(v).map(|info| (info.lower,info.upper))
    }

    /// True if the variable is integer.
    pub fn is_integer(&self, v : &Variable) -> Result<bool,ModelError> {
        self.check_owner(v).map(|info| info.is_integer)
    }

    /// Produce a report of the solve. Before solving the report shows a [SolutionStatus::NotSolved]
    /// status and zero statistics.
    pub fn report(&self) -> SolveReport {
        SolveReport{
            status          : self.sol.status,
            objective       : self.primal_objective_value(),
            num_variables   : self.num_variables(),
            num_constraints : self.num_constraints(),
            is_integer      : self.has_integer_variables(),
            statistics      : self.stats.unwrap_or_default(),
        }
    }
}

//======================================================
// ModelItem
//======================================================

/// The `ModelItem` represents either a variable or a constraint belonging to a [ModelAPI]. It
/// is used by [ModelAPI::primal_solution] to determine which solution part to access.
pub trait ModelItem {
    fn primal<M>(&self, m : &ModelAPI<M>) -> Result<f64,ModelError> where M : BaseModelTrait;
}

impl ModelItem for Variable {
    fn primal<M>(&self, m : &ModelAPI<M>) -> Result<f64,ModelError> where M : BaseModelTrait {
        m.var_value(self)
    }
}

impl ModelItem for Constraint {
    fn primal<M>(&self, m : &ModelAPI<M>) -> Result<f64,ModelError> where M : BaseModelTrait {
        m.con_value(self)
    }
}
